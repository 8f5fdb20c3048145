// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{ScheduleState, Transition};
use crate::tests::helpers::{config, d, full_roster, key, member_eligible, slot};
use rota_domain::{
    BaseDuty, CleaningGroupId, DutyCategory, MeetingType, Member, MemberId, MonthKey,
    ScheduleStatus, meeting_dates, week_start,
};

fn generate_all_categories(
    roster: Vec<Member>,
    month: MonthKey,
) -> (ScheduleState, Vec<Member>) {
    let mut state = ScheduleState::Absent;
    let mut roster = roster;
    for category in DutyCategory::ALL {
        let Transition { new_state, roster: updated } = apply(
            &state,
            &roster,
            month,
            Command::Generate { category },
            &config(),
        )
        .expect("generation should succeed");
        state = new_state;
        roster = updated;
    }
    (state, roster)
}

/// Generates every category and fills every cleaning entry, leaving a
/// schedule that satisfies the finalize preconditions.
fn complete_month(roster: Vec<Member>, month: MonthKey) -> (ScheduleState, Vec<Member>) {
    let (mut state, mut roster) = generate_all_categories(roster, month);

    let dates = meeting_dates(month.year(), month.month(), &config().meeting_days).unwrap();
    for md in &dates {
        let Transition { new_state, roster: updated } = apply(
            &state,
            &roster,
            month,
            Command::SetPostMeetingCleaning {
                date: md.date,
                group: Some(CleaningGroupId::new("group-1")),
            },
            &config(),
        )
        .expect("cleaning edit should succeed");
        state = new_state;
        roster = updated;

        let Transition { new_state, roster: updated } = apply(
            &state,
            &roster,
            month,
            Command::SetWeeklyCleaning {
                week: md.date,
                responsible: String::from("Hall care group"),
            },
            &config(),
        )
        .expect("weekly cleaning edit should succeed");
        state = new_state;
        roster = updated;
    }

    (state, roster)
}

#[test]
fn generation_creates_a_draft_from_absent() {
    let Transition { new_state, .. } = apply(
        &ScheduleState::Absent,
        &full_roster(6),
        key(2026, 2),
        Command::Generate {
            category: DutyCategory::Ushers,
        },
        &config(),
    )
    .expect("generation should succeed");

    assert_eq!(new_state.status(), Some(ScheduleStatus::Draft));
}

#[test]
fn regeneration_preserves_other_categories() {
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(6), month);
    let before = state.schedule().unwrap().clone();
    let first_sunday = d(2026, 2, 1);
    let usher = slot(BaseDuty::ExternalUsher, MeetingType::Weekend);
    let usher_assignee = before.assignment(first_sunday, usher).cloned();
    assert!(usher_assignee.is_some());

    // Regenerate only the microphones; the usher table must be untouched.
    let Transition { new_state, .. } = apply(
        &state,
        &roster,
        month,
        Command::Generate {
            category: DutyCategory::Microphones,
        },
        &config(),
    )
    .expect("regeneration should succeed");

    let after = new_state.schedule().unwrap();
    assert_eq!(after.assignment(first_sunday, usher).cloned(), usher_assignee);
}

#[test]
fn regeneration_of_unchanged_inputs_is_idempotent() {
    // Regenerating a category against an unchanged roster/history must
    // reproduce the same assignment map and leave the ledger as it was.
    let month = key(2026, 2);
    let mut roster = full_roster(6);
    roster[4]
        .assignment_history
        .insert(d(2026, 1, 4), slot(BaseDuty::ExternalUsher, MeetingType::Weekend));

    let (state, roster) = {
        let Transition { new_state, roster: updated } = apply(
            &ScheduleState::Absent,
            &roster,
            month,
            Command::Generate {
                category: DutyCategory::Ushers,
            },
            &config(),
        )
        .expect("generation should succeed");
        (new_state, updated)
    };
    let before = state.schedule().unwrap().clone();

    let Transition { new_state, roster: roster_after } = apply(
        &state,
        &roster,
        month,
        Command::Generate {
            category: DutyCategory::Ushers,
        },
        &config(),
    )
    .expect("regeneration should succeed");

    assert_eq!(new_state.schedule().unwrap(), &before);
    assert_eq!(roster_after, roster);
}

#[test]
fn substitution_requires_a_loaded_schedule() {
    let result = apply(
        &ScheduleState::Absent,
        &full_roster(2),
        key(2026, 2),
        Command::Substitute {
            date: d(2026, 2, 1),
            slot: slot(BaseDuty::ExternalUsher, MeetingType::Weekend),
            original_member: None,
            new_member: Some(MemberId::new("m1")),
        },
        &config(),
    );

    assert!(matches!(result, Err(CoreError::NoScheduleLoaded { .. })));
}

#[test]
fn substitution_rejects_an_unknown_member() {
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(2), month);

    let result = apply(
        &state,
        &roster,
        month,
        Command::Substitute {
            date: d(2026, 2, 1),
            slot: slot(BaseDuty::ExternalUsher, MeetingType::Weekend),
            original_member: None,
            new_member: Some(MemberId::new("ghost")),
        },
        &config(),
    );

    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn substitution_rejects_a_slot_on_the_wrong_meeting_day() {
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(2), month);

    // February 1, 2026 is a Sunday; a midweek slot cannot land there.
    let result = apply(
        &state,
        &roster,
        month,
        Command::Substitute {
            date: d(2026, 2, 1),
            slot: slot(BaseDuty::ExternalUsher, MeetingType::Midweek),
            original_member: None,
            new_member: Some(MemberId::new("m1")),
        },
        &config(),
    );

    assert!(matches!(result, Err(CoreError::SlotNotApplicable { .. })));
}

#[test]
fn substitution_swaps_the_ledger_entries() {
    // Eight members for six slots per date, so someone is always free.
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(8), month);
    let date = d(2026, 2, 1);
    let target = slot(BaseDuty::ExternalUsher, MeetingType::Weekend);
    let original = state
        .schedule()
        .unwrap()
        .assignment(date, target)
        .cloned()
        .expect("slot should be filled");
    let incoming = roster
        .iter()
        .find(|m| m.assignment_history.get(&date).is_none())
        .map(|m| m.id.clone())
        .expect("someone should be free that date");

    let Transition { new_state, roster: updated } = apply(
        &state,
        &roster,
        month,
        Command::Substitute {
            date,
            slot: target,
            original_member: Some(original.clone()),
            new_member: Some(incoming.clone()),
        },
        &config(),
    )
    .expect("substitution should succeed");

    assert_eq!(
        new_state.schedule().unwrap().assignment(date, target),
        Some(&incoming)
    );
    let old = updated.iter().find(|m| m.id == original).unwrap();
    assert!(old.assignment_history.get(&date).is_none());
    let new = updated.iter().find(|m| m.id == incoming).unwrap();
    assert_eq!(new.assignment_history.get(&date), Some(&target));
}

#[test]
fn finalize_is_rejected_while_blanks_remain() {
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(6), month);

    // Cleaning entries were never filled.
    let result = apply(&state, &roster, month, Command::Finalize, &config());
    let Err(CoreError::ScheduleIncomplete { missing }) = result else {
        panic!("expected ScheduleIncomplete, got {result:?}");
    };
    assert!(missing.iter().any(|m| m.contains("cleaning")));
}

#[test]
fn finalize_accepts_a_complete_month() {
    let month = key(2026, 2);
    let (state, roster) = complete_month(full_roster(6), month);

    let Transition { new_state, .. } = apply(&state, &roster, month, Command::Finalize, &config())
        .expect("finalize should succeed");

    assert_eq!(new_state.status(), Some(ScheduleStatus::Finalized));
}

#[test]
fn finalize_twice_is_rejected() {
    let month = key(2026, 2);
    let (state, roster) = complete_month(full_roster(6), month);
    let Transition { new_state, roster } =
        apply(&state, &roster, month, Command::Finalize, &config()).unwrap();

    let result = apply(&new_state, &roster, month, Command::Finalize, &config());
    assert!(matches!(result, Err(CoreError::AlreadyFinalized { .. })));
}

#[test]
fn substitution_on_a_finalized_month_preserves_the_status() {
    // Eight members for six slots per date, so someone is always free.
    let month = key(2026, 2);
    let (state, roster) = complete_month(full_roster(8), month);
    let Transition { new_state, roster } =
        apply(&state, &roster, month, Command::Finalize, &config()).unwrap();

    let date = d(2026, 2, 1);
    let target = slot(BaseDuty::StageUsher, MeetingType::Weekend);
    let original = new_state
        .schedule()
        .unwrap()
        .assignment(date, target)
        .cloned()
        .unwrap();
    let incoming = roster
        .iter()
        .find(|m| m.assignment_history.get(&date).is_none())
        .map(|m| m.id.clone())
        .unwrap();

    let Transition { new_state, .. } = apply(
        &new_state,
        &roster,
        month,
        Command::Substitute {
            date,
            slot: target,
            original_member: Some(original),
            new_member: Some(incoming),
        },
        &config(),
    )
    .expect("substitution on a finalized month is legal");

    assert_eq!(new_state.status(), Some(ScheduleStatus::Finalized));
}

#[test]
fn weekly_cleaning_is_keyed_by_the_week_start() {
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(6), month);

    // Thursday February 5 belongs to the week opened on Sunday February 1.
    let thursday = d(2026, 2, 5);
    let Transition { new_state, .. } = apply(
        &state,
        &roster,
        month,
        Command::SetWeeklyCleaning {
            week: thursday,
            responsible: String::from("  Family Silva  "),
        },
        &config(),
    )
    .expect("weekly cleaning edit should succeed");

    let schedule = new_state.schedule().unwrap();
    let bucket = week_start(thursday).unwrap();
    assert_eq!(bucket, d(2026, 2, 1));
    assert_eq!(schedule.weekly_cleaning[&bucket], "Family Silva");
}

#[test]
fn blank_weekly_cleaning_clears_the_entry() {
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(6), month);
    let Transition { new_state, roster } = apply(
        &state,
        &roster,
        month,
        Command::SetWeeklyCleaning {
            week: d(2026, 2, 1),
            responsible: String::from("Family Silva"),
        },
        &config(),
    )
    .unwrap();

    let Transition { new_state, .. } = apply(
        &new_state,
        &roster,
        month,
        Command::SetWeeklyCleaning {
            week: d(2026, 2, 1),
            responsible: String::from("   "),
        },
        &config(),
    )
    .expect("blanking should succeed");

    assert!(new_state.schedule().unwrap().weekly_cleaning.is_empty());
}

#[test]
fn unknown_cleaning_group_is_rejected() {
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(6), month);

    let result = apply(
        &state,
        &roster,
        month,
        Command::SetPostMeetingCleaning {
            date: d(2026, 2, 1),
            group: Some(CleaningGroupId::new("group-99")),
        },
        &config(),
    );

    assert!(matches!(result, Err(CoreError::UnknownCleaningGroup(_))));
}

#[test]
fn clear_returns_the_month_to_absent() {
    let month = key(2026, 2);
    let (state, roster) = generate_all_categories(full_roster(6), month);

    let Transition { new_state, .. } =
        apply(&state, &roster, month, Command::Clear, &config()).expect("clear should succeed");

    assert_eq!(new_state, ScheduleState::Absent);
}

#[test]
fn generation_over_a_finalized_month_lands_on_a_new_draft() {
    let month = key(2026, 2);
    let (state, roster) = complete_month(full_roster(6), month);
    let Transition { new_state, roster } =
        apply(&state, &roster, month, Command::Finalize, &config()).unwrap();
    let cleaning_before = new_state.schedule().unwrap().weekly_cleaning.clone();

    let Transition { new_state, .. } = apply(
        &new_state,
        &roster,
        month,
        Command::Generate {
            category: DutyCategory::Ushers,
        },
        &config(),
    )
    .expect("regeneration over a finalized month creates a draft");

    assert_eq!(new_state.status(), Some(ScheduleStatus::Draft));
    // Cleaning entries survive the regeneration merge.
    assert_eq!(new_state.schedule().unwrap().weekly_cleaning, cleaning_before);
}

#[test]
fn fairness_converges_over_a_simulated_year() {
    // Six members share one weekend duty for a whole year; nobody should
    // drift more than one assignment away from anyone else.
    let target = slot(BaseDuty::ExternalUsher, MeetingType::Weekend);
    let mut roster: Vec<Member> =
        (1..=6).map(|i| member_eligible(&format!("m{i}"), &[target])).collect();

    for month_number in 1..=12 {
        let month = key(2026, month_number);
        let Transition { roster: updated, .. } = apply(
            &ScheduleState::Absent,
            &roster,
            month,
            Command::Generate {
                category: DutyCategory::Ushers,
            },
            &config(),
        )
        .expect("generation should succeed");
        roster = updated;
    }

    let counts: Vec<usize> = roster
        .iter()
        .map(|m| {
            m.assignment_history
                .values()
                .filter(|s| **s == target)
                .count()
        })
        .collect();
    let max = counts.iter().max().copied().unwrap();
    let min = counts.iter().min().copied().unwrap();
    assert!(counts.iter().sum::<usize>() > 0);
    assert!(max - min <= 1, "unbalanced counts: {counts:?}");
}
