// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{
    CleaningGroupId, DomainError, DutySlot, MeetingDays, MemberId, MonthKey, ScheduleStatus,
    all_slots_for, meeting_dates, week_start,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// Assignments produced by one generation pass: date → slot → assignee.
///
/// A slot mapped to `None` was enumerated but could not be filled; the
/// operator completes it by hand.
pub type AssignmentMap = BTreeMap<Date, BTreeMap<DutySlot, Option<MemberId>>>;

/// The duty and cleaning entries of a single meeting date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DaySheet {
    /// Duty slot → assigned member (`None` = blank, awaiting assignment).
    pub assignments: BTreeMap<DutySlot, Option<MemberId>>,
    /// Post-meeting cleaning group.
    pub post_meeting_cleaning: Option<CleaningGroupId>,
}

/// A month's schedule: duty assignments, cleaning entries, and lifecycle
/// status, archived under its year-month key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSchedule {
    /// The year-month this schedule covers.
    pub key: MonthKey,
    /// Lifecycle status.
    pub status: ScheduleStatus,
    /// Per-meeting-date entries.
    pub days: BTreeMap<Date, DaySheet>,
    /// Weekly cleaning responsibility, keyed by the week's opening Sunday.
    pub weekly_cleaning: BTreeMap<Date, String>,
}

impl MonthSchedule {
    /// Creates an empty draft schedule for a month.
    #[must_use]
    pub fn new(key: MonthKey) -> Self {
        Self {
            key,
            status: ScheduleStatus::Draft,
            days: BTreeMap::new(),
            weekly_cleaning: BTreeMap::new(),
        }
    }

    /// Returns the sheet for a date, creating it when absent.
    pub fn day_mut(&mut self, date: Date) -> &mut DaySheet {
        self.days.entry(date).or_default()
    }

    /// Returns the member assigned to a slot on a date, if any.
    #[must_use]
    pub fn assignment(&self, date: Date, slot: DutySlot) -> Option<&MemberId> {
        self.days
            .get(&date)?
            .assignments
            .get(&slot)?
            .as_ref()
    }

    /// Merges one category's freshly generated assignments into this
    /// schedule, overwriting only the slots present in `assignments`.
    ///
    /// Other categories' slots and all cleaning entries are preserved; this
    /// is the regeneration merge rule.
    pub fn merge_category(&mut self, assignments: &AssignmentMap) {
        for (date, slots) in assignments {
            let sheet = self.day_mut(*date);
            for (slot, member) in slots {
                sheet.assignments.insert(*slot, member.clone());
            }
        }
    }

    /// Returns every slot of the schedule still mapped to `None`.
    #[must_use]
    pub fn unfilled(&self) -> Vec<(Date, DutySlot)> {
        self.days
            .iter()
            .flat_map(|(date, sheet)| {
                sheet
                    .assignments
                    .iter()
                    .filter(|(_, member)| member.is_none())
                    .map(|(slot, _)| (*date, *slot))
            })
            .collect()
    }

    /// Reports every entry still blocking finalization.
    ///
    /// For every meeting date of the month: each applicable duty slot must
    /// be assigned and the post-meeting cleaning group set. Every week
    /// containing a meeting must carry a non-blank weekly cleaning
    /// responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the month's meeting dates cannot be resolved.
    pub fn missing_entries(&self, days: &MeetingDays) -> Result<Vec<String>, DomainError> {
        let mut missing: Vec<String> = Vec::new();
        let dates = meeting_dates(self.key.year(), self.key.month(), days)?;

        let mut weeks: BTreeSet<Date> = BTreeSet::new();
        for md in &dates {
            weeks.insert(week_start(md.date)?);

            let sheet = self.days.get(&md.date);
            for slot in all_slots_for(md.meeting) {
                let filled = sheet
                    .and_then(|s| s.assignments.get(&slot))
                    .is_some_and(Option::is_some);
                if !filled {
                    missing.push(format!("{}: {}", md.date, slot.descriptor().label));
                }
            }

            let cleaning_set = sheet.is_some_and(|s| s.post_meeting_cleaning.is_some());
            if !cleaning_set {
                missing.push(format!("{}: post-meeting cleaning", md.date));
            }
        }

        for week in weeks {
            let filled = self
                .weekly_cleaning
                .get(&week)
                .is_some_and(|r| !r.trim().is_empty());
            if !filled {
                missing.push(format!("week of {week}: weekly cleaning"));
            }
        }

        Ok(missing)
    }
}
