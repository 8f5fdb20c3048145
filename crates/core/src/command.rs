// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{CleaningGroupId, DutyCategory, DutySlot, MemberId};
use time::Date;

/// A command represents operator intent as data only.
///
/// Commands are the only way to request schedule-state changes; `apply`
/// turns a command into a transition or a typed failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the rotation selector for one duty category of the month.
    ///
    /// Always lands on a draft; other categories' slots and cleaning
    /// entries are preserved (merge semantics).
    Generate {
        /// The duty category to (re)generate.
        category: DutyCategory,
    },
    /// Manually assign or substitute one slot, bypassing the selector.
    ///
    /// Legal in draft and finalized state alike; the status is preserved.
    Substitute {
        /// The meeting date.
        date: Date,
        /// The slot being reassigned.
        slot: DutySlot,
        /// The assignee being replaced; `None` fills an empty slot.
        original_member: Option<MemberId>,
        /// The incoming assignee; `None` blanks the slot.
        new_member: Option<MemberId>,
    },
    /// Set or clear the post-meeting cleaning group of a date.
    SetPostMeetingCleaning {
        /// The meeting date.
        date: Date,
        /// The responsible group; `None` clears the entry.
        group: Option<CleaningGroupId>,
    },
    /// Set or clear the weekly cleaning responsibility of a week.
    SetWeeklyCleaning {
        /// Any date inside the week; normalized to the week's Sunday.
        week: Date,
        /// Free-text responsible party; blank clears the entry.
        responsible: String,
    },
    /// Finalize the month. Requires every tracked slot and every cleaning
    /// entry to be filled.
    Finalize,
    /// Remove the month's schedule.
    Clear,
}
