// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The history ledger.
//!
//! Mutations over the roster's per-member `assignment_history` maps. Only
//! duty slots are tracked; cleaning entries cannot be recorded here by
//! construction. Mutation is in place over the roster slice; callers hand
//! the updated roster back to the roster provider as a full replacement.

use crate::schedule::AssignmentMap;
use rota_domain::{DutyCategory, DutySlot, Member, MemberId, MonthKey};
use time::Date;

/// Records a duty performed by a member on a date.
///
/// Replaces any previously tracked duty for that date, preserving the
/// at-most-one-tracked-duty-per-date invariant.
pub fn record(roster: &mut [Member], member_id: &MemberId, date: Date, slot: DutySlot) {
    if let Some(member) = roster.iter_mut().find(|m| &m.id == member_id) {
        member.assignment_history.insert(date, slot);
    }
}

/// Removes a member's history entry for a date, whatever it recorded.
pub fn clear(roster: &mut [Member], member_id: &MemberId, date: Date) {
    if let Some(member) = roster.iter_mut().find(|m| &m.id == member_id) {
        member.assignment_history.remove(&date);
    }
}

/// Removes a member's history entry for a date only if it recorded the
/// given slot.
///
/// Used by substitution: the outgoing assignee loses the entry only when it
/// still reflects the slot being reassigned.
pub fn clear_if_matches(roster: &mut [Member], member_id: &MemberId, date: Date, slot: DutySlot) {
    if let Some(member) = roster.iter_mut().find(|m| &m.id == member_id)
        && member.assignment_history.get(&date) == Some(&slot)
    {
        member.assignment_history.remove(&date);
    }
}

/// Returns the most recent date a member performed the given slot.
#[must_use]
pub fn last_assigned(member: &Member, slot: DutySlot) -> Option<Date> {
    member
        .assignment_history
        .iter()
        .filter(|(_, s)| **s == slot)
        .map(|(date, _)| *date)
        .max()
}

/// Returns the most recent date a member performed any tracked duty.
#[must_use]
pub fn last_assigned_any(member: &Member) -> Option<Date> {
    member.assignment_history.keys().max().copied()
}

/// Rewrites one month of one category in every member's history.
///
/// Drops every history entry inside the month that belongs to the
/// category's slots, then re-adds entries from the freshly generated
/// assignments. Entries of other months and other categories are untouched.
pub fn rewrite_month(
    roster: &mut [Member],
    key: MonthKey,
    category: DutyCategory,
    assignments: &AssignmentMap,
) {
    for member in roster.iter_mut() {
        member
            .assignment_history
            .retain(|date, slot| !(key.contains(*date) && slot.category() == category));
    }

    for (date, slots) in assignments {
        for (slot, member_id) in slots {
            if let Some(id) = member_id {
                record(roster, id, *date, *slot);
            }
        }
    }
}
