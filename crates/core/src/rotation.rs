// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The rotation selector.
//!
//! For each (date, slot) pair of the month, in chronological date order and
//! declared slot order, picks the least-recently-assigned eligible member.
//!
//! ## Selection rules (authoritative)
//!
//! A candidate is excluded when:
//! 1. The eligibility filter rejects them for the slot
//! 2. They already hold a different tracked duty on the same date
//! 3. They are related to a member already holding a relative-exclusive
//!    duty of the same category on the same date
//!
//! Remaining candidates are ranked by:
//! 1. Last-assigned date for this specific slot (never-assigned first)
//! 2. Last-assigned date across all tracked duties (never-assigned first)
//! 3. Roster order
//!
//! Ties can never survive rule 3, so selection is deterministic and
//! regeneration against unchanged history reproduces the same map.
//!
//! Every pick is recorded into the working ledger immediately so later
//! dates of the same pass see it; this is why dates are processed
//! chronologically rather than independently. A slot with no surviving
//! candidate stays blank rather than failing the month.

use crate::error::CoreError;
use crate::schedule::AssignmentMap;
use rota_domain::{
    DutyCategory, DutySlot, MeetingDays, Member, MemberId, MonthKey, is_eligible, meeting_dates,
    slots_for,
};
use std::collections::BTreeMap;
use std::cmp::Ordering;
use time::Date;

/// Per-member date → slot view used during one generation pass.
type WorkingLedger = BTreeMap<MemberId, BTreeMap<Date, DutySlot>>;

/// Generates one category's assignments for a month.
///
/// The working history is seeded from the roster's `assignment_history`
/// minus this month's entries for the requested category, so regenerating
/// replaces earlier output for the category instead of rotating past it.
/// Entries of other categories inside the month are kept and block
/// same-date double booking.
///
/// # Errors
///
/// Returns `CoreError::EmptyRoster` when the roster is empty, or a domain
/// violation if the month's dates cannot be resolved. Unfillable slots are
/// not errors; they are returned as `None`.
pub fn generate(
    roster: &[Member],
    key: MonthKey,
    category: DutyCategory,
    days: &MeetingDays,
) -> Result<AssignmentMap, CoreError> {
    if roster.is_empty() {
        return Err(CoreError::EmptyRoster);
    }

    let dates = meeting_dates(key.year(), key.month(), days)?;

    let mut working: WorkingLedger = roster
        .iter()
        .map(|member| {
            let history: BTreeMap<Date, DutySlot> = member
                .assignment_history
                .iter()
                .filter(|(date, slot)| !(key.contains(**date) && slot.category() == category))
                .map(|(date, slot)| (*date, *slot))
                .collect();
            (member.id.clone(), history)
        })
        .collect();

    let by_id: BTreeMap<&MemberId, &Member> = roster.iter().map(|m| (&m.id, m)).collect();

    let mut assignments: AssignmentMap = AssignmentMap::new();
    for md in &dates {
        for slot in slots_for(category, md.meeting) {
            let pick = select(roster, &working, &by_id, md.date, slot);
            if let Some(id) = &pick {
                working.entry(id.clone()).or_default().insert(md.date, slot);
            }
            assignments.entry(md.date).or_default().insert(slot, pick);
        }
    }

    Ok(assignments)
}

/// Picks the assignee for one (date, slot) pair, or `None` when no eligible
/// candidate survives the exclusions.
fn select(
    roster: &[Member],
    working: &WorkingLedger,
    by_id: &BTreeMap<&MemberId, &Member>,
    date: Date,
    slot: DutySlot,
) -> Option<MemberId> {
    roster
        .iter()
        .enumerate()
        .filter(|(_, member)| is_eligible(member, slot))
        .filter(|(_, member)| !holds_duty_on(working, &member.id, date))
        .filter(|(_, member)| !conflicts_with_relative(member, working, by_id, date, slot))
        .min_by(|(index_a, a), (index_b, b)| {
            compare_recency(working, a, b, slot).then(index_a.cmp(index_b))
        })
        .map(|(_, member)| member.id.clone())
}

/// Returns whether a member already holds a tracked duty on the date.
fn holds_duty_on(working: &WorkingLedger, member_id: &MemberId, date: Date) -> bool {
    working
        .get(member_id)
        .is_some_and(|history| history.contains_key(&date))
}

/// Returns whether assigning the candidate would pair them with a relative
/// on a jointly-performed duty of the same category on the same date.
fn conflicts_with_relative(
    candidate: &Member,
    working: &WorkingLedger,
    by_id: &BTreeMap<&MemberId, &Member>,
    date: Date,
    slot: DutySlot,
) -> bool {
    if !slot.descriptor().relative_exclusive {
        return false;
    }

    working.iter().any(|(other_id, history)| {
        history.get(&date).is_some_and(|other_slot| {
            other_slot.descriptor().relative_exclusive
                && other_slot.category() == slot.category()
                && by_id
                    .get(other_id)
                    .is_some_and(|other| candidate.is_related_to(other))
        })
    })
}

/// Compares two candidates by recency: oldest (or absent) last-assigned
/// date for the specific slot first, then across all tracked duties.
fn compare_recency(working: &WorkingLedger, a: &Member, b: &Member, slot: DutySlot) -> Ordering {
    let slot_a = last_for_slot(working, &a.id, slot);
    let slot_b = last_for_slot(working, &b.id, slot);
    match slot_a.cmp(&slot_b) {
        Ordering::Less => return Ordering::Less,
        Ordering::Greater => return Ordering::Greater,
        Ordering::Equal => {}
    }

    let any_a = last_any(working, &a.id);
    let any_b = last_any(working, &b.id);
    any_a.cmp(&any_b)
}

/// Most recent working-ledger date the member performed the given slot.
fn last_for_slot(working: &WorkingLedger, member_id: &MemberId, slot: DutySlot) -> Option<Date> {
    working.get(member_id).and_then(|history| {
        history
            .iter()
            .filter(|(_, s)| **s == slot)
            .map(|(date, _)| *date)
            .max()
    })
}

/// Most recent working-ledger date the member performed any tracked duty.
fn last_any(working: &WorkingLedger, member_id: &MemberId) -> Option<Date> {
    working
        .get(member_id)
        .and_then(|history| history.keys().max().copied())
}
