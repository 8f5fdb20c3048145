// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{DutySlot, MemberId};
use time::Date;

/// An operator-confirmed manual assignment or substitution.
///
/// Transient: resolved synchronously into a schedule and ledger mutation,
/// never queued or persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRequest {
    /// The meeting date.
    pub date: Date,
    /// The slot being reassigned.
    pub slot: DutySlot,
    /// The assignee being replaced; `None` fills an empty slot.
    pub original_member: Option<MemberId>,
    /// The incoming assignee; `None` blanks the slot.
    pub new_member: Option<MemberId>,
}

/// Outcome of clearing a month from the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The month existed and was removed.
    Removed,
    /// There was no data to clear for the month.
    NothingToClear,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    /// Slots the selector could not fill, for manual completion.
    pub unfilled: Vec<(Date, DutySlot)>,
}
