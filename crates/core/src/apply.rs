// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::ledger;
use crate::rotation;
use crate::schedule::{AssignmentMap, MonthSchedule};
use crate::state::{ScheduleState, Transition};
use rota_domain::{
    DomainError, Member, MemberId, MonthKey, RotaConfig, ScheduleStatus, week_start,
};

/// Applies a command to a month's state, producing a new state and the
/// updated roster.
///
/// The input state and roster are never mutated; a failed command leaves no
/// side effects. The caller persists `Transition::new_state` and hands
/// `Transition::roster` back to the roster provider as a full replacement.
///
/// # Errors
///
/// Returns an error if:
/// - Generation is requested against an empty roster
/// - A command other than `Generate`/`Clear` addresses an absent month
/// - A substitution addresses an unknown member, or a slot that is not
///   applicable to the date under the configured meeting weekdays
/// - A cleaning edit names a group outside the catalog
/// - Finalization preconditions are not met
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &ScheduleState,
    roster: &[Member],
    key: MonthKey,
    command: Command,
    config: &RotaConfig,
) -> Result<Transition, CoreError> {
    match command {
        Command::Generate { category } => {
            let assignments: AssignmentMap =
                rotation::generate(roster, key, category, &config.meeting_days)?;

            // Merge into the month's existing schedule when one is loaded;
            // a schedule for a different month is ignored, not merged.
            let mut schedule: MonthSchedule = match state.schedule() {
                Some(existing) if existing.key == key => existing.clone(),
                _ => MonthSchedule::new(key),
            };
            schedule.merge_category(&assignments);
            // Regeneration always lands on a draft, including over a
            // finalized month: generating is how a new draft is created.
            schedule.status = ScheduleStatus::Draft;

            let mut new_roster: Vec<Member> = roster.to_vec();
            ledger::rewrite_month(&mut new_roster, key, category, &assignments);

            Ok(Transition {
                new_state: ScheduleState::Loaded(schedule),
                roster: new_roster,
            })
        }
        Command::Substitute {
            date,
            slot,
            original_member,
            new_member,
        } => {
            let Some(existing) = state.schedule() else {
                return Err(CoreError::NoScheduleLoaded { key });
            };

            if !key.contains(date) || config.meeting_days.meeting_type_of(date) != Some(slot.meeting)
            {
                return Err(CoreError::SlotNotApplicable { date, slot });
            }

            if let Some(id) = &new_member {
                ensure_member_exists(roster, id)?;
            }

            let mut schedule: MonthSchedule = existing.clone();
            schedule
                .day_mut(date)
                .assignments
                .insert(slot, new_member.clone());

            let mut new_roster: Vec<Member> = roster.to_vec();
            if let Some(original) = &original_member {
                ledger::clear_if_matches(&mut new_roster, original, date, slot);
            }
            if let Some(incoming) = &new_member {
                ledger::record(&mut new_roster, incoming, date, slot);
            }

            Ok(Transition {
                new_state: ScheduleState::Loaded(schedule),
                roster: new_roster,
            })
        }
        Command::SetPostMeetingCleaning { date, group } => {
            let Some(existing) = state.schedule() else {
                return Err(CoreError::NoScheduleLoaded { key });
            };

            if let Some(id) = &group
                && !config.has_cleaning_group(id)
            {
                return Err(CoreError::UnknownCleaningGroup(id.value().to_string()));
            }

            let mut schedule: MonthSchedule = existing.clone();
            schedule.day_mut(date).post_meeting_cleaning = group;

            Ok(Transition {
                new_state: ScheduleState::Loaded(schedule),
                roster: roster.to_vec(),
            })
        }
        Command::SetWeeklyCleaning { week, responsible } => {
            let Some(existing) = state.schedule() else {
                return Err(CoreError::NoScheduleLoaded { key });
            };

            let bucket = week_start(week)?;
            let mut schedule: MonthSchedule = existing.clone();
            let trimmed = responsible.trim();
            if trimmed.is_empty() {
                schedule.weekly_cleaning.remove(&bucket);
            } else {
                schedule
                    .weekly_cleaning
                    .insert(bucket, trimmed.to_string());
            }

            Ok(Transition {
                new_state: ScheduleState::Loaded(schedule),
                roster: roster.to_vec(),
            })
        }
        Command::Finalize => {
            let Some(existing) = state.schedule() else {
                return Err(CoreError::NoScheduleLoaded { key });
            };

            if existing.status == ScheduleStatus::Finalized {
                return Err(CoreError::AlreadyFinalized { key });
            }

            let missing = existing.missing_entries(&config.meeting_days)?;
            if !missing.is_empty() {
                return Err(CoreError::ScheduleIncomplete { missing });
            }

            let mut schedule: MonthSchedule = existing.clone();
            schedule.status = ScheduleStatus::Finalized;

            Ok(Transition {
                new_state: ScheduleState::Loaded(schedule),
                roster: roster.to_vec(),
            })
        }
        Command::Clear => Ok(Transition {
            new_state: ScheduleState::Absent,
            roster: roster.to_vec(),
        }),
    }
}

fn ensure_member_exists(roster: &[Member], id: &MemberId) -> Result<(), CoreError> {
    if roster.iter().any(|m| &m.id == id) {
        return Ok(());
    }
    Err(CoreError::DomainViolation(DomainError::MemberNotFound(
        id.value().to_string(),
    )))
}
