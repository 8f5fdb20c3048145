// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::DutySlot;
use crate::types::Member;

/// Returns whether a member qualifies for a duty slot.
///
/// A member qualifies when their eligibility flag for the slot is set and
/// any gender requirement of the duty is satisfied. This is a pure check
/// with no history dependency; rotation fairness is applied elsewhere.
#[must_use]
pub fn is_eligible(member: &Member, slot: DutySlot) -> bool {
    if !member.eligibility.contains(&slot) {
        return false;
    }
    slot.descriptor()
        .requires_gender
        .is_none_or(|required| member.gender == required)
}
