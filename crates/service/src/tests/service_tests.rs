// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ServiceError;
use crate::requests::{ClearOutcome, SubstitutionRequest};
use crate::session::Session;
use crate::tests::helpers::{
    february, fill_cleaning, full_roster, service, service_with_broken_mirror,
};
use rota::CoreError;
use rota_domain::{
    BaseDuty, DutyCategory, DutySlot, MeetingType, MemberId, ScheduleStatus,
};
use time::{Date, Month};

fn d(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::February, day).unwrap()
}

#[test]
fn generation_requires_a_roster() {
    let svc = service();
    let mut session = Session::new();

    let result = svc.generate(&mut session, february(), DutyCategory::Ushers);
    assert_eq!(
        result,
        Err(ServiceError::CoreViolation(CoreError::EmptyRoster))
    );
    assert!(session.active().is_none());
}

#[test]
fn generation_caches_a_draft_that_survives_a_new_session() {
    let svc = service();
    svc.replace_roster(full_roster(6)).unwrap();
    let mut session = Session::new();

    let outcome = svc
        .generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();
    assert!(outcome.unfilled.is_empty());
    assert_eq!(session.status(), Some(ScheduleStatus::Draft));

    // A fresh session resumes the cached working copy.
    let resumed = svc.open_session().unwrap();
    assert_eq!(resumed.status(), Some(ScheduleStatus::Draft));
    assert!(resumed.is_active(february()));
}

#[test]
fn generation_updates_the_member_ledger() {
    let svc = service();
    svc.replace_roster(full_roster(6)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();

    let roster = svc.roster().unwrap();
    let tracked: usize = roster
        .iter()
        .map(|m| m.assignment_history.len())
        .sum();
    // Two usher slots per meeting date, 8 meeting dates in February 2026.
    assert_eq!(tracked, 16);
}

#[test]
fn save_progress_requires_a_loaded_schedule() {
    let svc = service();
    let session = Session::new();
    assert_eq!(svc.save_progress(&session), Err(ServiceError::NothingToSave));
}

#[test]
fn saved_drafts_can_be_loaded_into_a_new_session() {
    let svc = service();
    svc.replace_roster(full_roster(6)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();
    svc.save_progress(&session).unwrap();

    let mut other = Session::new();
    let status = svc.load_month(&mut other, february()).unwrap();
    assert_eq!(status, Some(ScheduleStatus::Draft));
    assert_eq!(other.active(), session.active());
}

#[test]
fn archived_months_lists_keys_and_statuses() {
    let svc = service();
    svc.replace_roster(full_roster(6)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();
    svc.save_progress(&session).unwrap();

    let months = svc.archived_months().unwrap();
    assert_eq!(months, vec![(february(), ScheduleStatus::Draft)]);
}

#[test]
fn loading_a_missing_month_leaves_the_session_absent() {
    let svc = service();
    let mut session = Session::new();
    let status = svc.load_month(&mut session, february()).unwrap();
    assert_eq!(status, None);
    assert!(session.active().is_none());
}

#[test]
fn finalize_rejects_an_incomplete_month_and_stays_draft() {
    let svc = service();
    svc.replace_roster(full_roster(6)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();

    let result = svc.finalize(&mut session);
    assert!(matches!(
        result,
        Err(ServiceError::CoreViolation(CoreError::ScheduleIncomplete { .. }))
    ));
    assert_eq!(session.status(), Some(ScheduleStatus::Draft));
}

fn finalized_session(svc: &crate::schedule_service::ScheduleService) -> Session {
    // Eight members for six slots per date, so someone is always free.
    svc.replace_roster(full_roster(8)).unwrap();
    let mut session = Session::new();
    for category in DutyCategory::ALL {
        svc.generate(&mut session, february(), category).unwrap();
    }
    fill_cleaning(svc, &mut session);
    svc.finalize(&mut session).unwrap();
    session
}

#[test]
fn finalize_archives_the_month() {
    let svc = service();
    let session = finalized_session(&svc);
    assert_eq!(session.status(), Some(ScheduleStatus::Finalized));

    let mut other = Session::new();
    let status = svc.load_month(&mut other, february()).unwrap();
    assert_eq!(status, Some(ScheduleStatus::Finalized));
}

#[test]
fn substitution_on_a_finalized_month_re_archives_it() {
    let svc = service();
    let mut session = finalized_session(&svc);

    let date = d(1);
    let slot = DutySlot::new(BaseDuty::ExternalUsher, MeetingType::Weekend);
    let original = session
        .active()
        .unwrap()
        .assignment(date, slot)
        .cloned()
        .unwrap();
    let roster = svc.roster().unwrap();
    let incoming = roster
        .iter()
        .find(|m| m.assignment_history.get(&date).is_none())
        .map(|m| m.id.clone())
        .unwrap();

    svc.substitute(
        &mut session,
        SubstitutionRequest {
            date,
            slot,
            original_member: Some(original.clone()),
            new_member: Some(incoming.clone()),
        },
    )
    .unwrap();

    assert_eq!(session.status(), Some(ScheduleStatus::Finalized));

    // The archived copy reflects the substitution.
    let mut other = Session::new();
    svc.load_month(&mut other, february()).unwrap();
    assert_eq!(other.active().unwrap().assignment(date, slot), Some(&incoming));

    // And the ledger swapped the history entries.
    let roster = svc.roster().unwrap();
    let old = roster.iter().find(|m| m.id == original).unwrap();
    assert!(old.assignment_history.get(&date).is_none());
    let new = roster.iter().find(|m| m.id == incoming).unwrap();
    assert_eq!(new.assignment_history.get(&date), Some(&slot));
}

#[test]
fn substitution_requires_an_active_schedule() {
    let svc = service();
    let mut session = Session::new();
    let result = svc.substitute(
        &mut session,
        SubstitutionRequest {
            date: d(1),
            slot: DutySlot::new(BaseDuty::ExternalUsher, MeetingType::Weekend),
            original_member: None,
            new_member: Some(MemberId::new("m1")),
        },
    );
    assert_eq!(result, Err(ServiceError::NoActiveSchedule));
}

#[test]
fn clearing_a_missing_month_signals_nothing_to_clear() {
    let svc = service();
    svc.replace_roster(full_roster(4)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();

    // Never saved to the archive, so there is nothing to clear; the active
    // session is still reset because it held that month.
    let outcome = svc.clear_month(&mut session, february()).unwrap();
    assert_eq!(outcome, ClearOutcome::NothingToClear);
    assert!(session.active().is_none());
}

#[test]
fn clearing_a_saved_month_removes_it() {
    let svc = service();
    svc.replace_roster(full_roster(4)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();
    svc.save_progress(&session).unwrap();

    let outcome = svc.clear_month(&mut session, february()).unwrap();
    assert_eq!(outcome, ClearOutcome::Removed);
    assert!(session.active().is_none());
    assert_eq!(svc.load_month(&mut session, february()).unwrap(), None);
}

#[test]
fn clear_all_data_wipes_every_collection() {
    let svc = service();
    svc.replace_roster(full_roster(4)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();
    svc.save_progress(&session).unwrap();

    svc.clear_all_data(&mut session).unwrap();

    assert!(session.active().is_none());
    assert!(svc.roster().unwrap().is_empty());
    assert_eq!(svc.load_month(&mut session, february()).unwrap(), None);
    assert!(svc.open_session().unwrap().active().is_none());
}

#[test]
fn mirror_failures_never_surface() {
    // Every mirror operation fails; the primary store stays the source of
    // truth and every service call still succeeds.
    let svc = service_with_broken_mirror();
    svc.replace_roster(full_roster(4)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();
    svc.save_progress(&session).unwrap();
    assert_eq!(
        svc.clear_month(&mut session, february()).unwrap(),
        ClearOutcome::Removed
    );
    svc.clear_all_data(&mut session).unwrap();
}

#[test]
fn replace_roster_validates() {
    let svc = service();
    let mut duplicate = full_roster(1);
    duplicate.push(duplicate[0].clone());

    let result = svc.replace_roster(duplicate);
    assert!(matches!(result, Err(ServiceError::DomainViolation(_))));
}

#[test]
fn reset_history_clears_one_member_only() {
    let svc = service();
    svc.replace_roster(full_roster(4)).unwrap();
    let mut session = Session::new();
    svc.generate(&mut session, february(), DutyCategory::Ushers)
        .unwrap();

    svc.reset_history(&MemberId::new("m1")).unwrap();

    let roster = svc.roster().unwrap();
    let m1 = roster.iter().find(|m| m.id == MemberId::new("m1")).unwrap();
    assert!(m1.assignment_history.is_empty());
    let others: usize = roster
        .iter()
        .filter(|m| m.id != MemberId::new("m1"))
        .map(|m| m.assignment_history.len())
        .sum();
    assert!(others > 0);
}
