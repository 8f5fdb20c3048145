// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::schedule_service::ScheduleService;
use rota_domain::{
    DutySlot, Gender, Member, MemberId, MonthKey, RotaConfig, catalog, meeting_dates,
};
use rota_persistence::{Mirror, PersistenceError, SqliteStore};
use std::sync::Arc;
use time::Month;

pub fn service() -> ScheduleService {
    let store = SqliteStore::open_in_memory().expect("in-memory store should open");
    ScheduleService::new(store, RotaConfig::default())
}

/// A mirror whose every operation fails, for the swallow-and-log policy.
pub struct FailingMirror;

impl Mirror for FailingMirror {
    fn upsert(
        &self,
        _collection: &str,
        _key: &str,
        _body: &serde_json::Value,
    ) -> Result<(), PersistenceError> {
        Err(PersistenceError::MirrorIo(String::from("mirror is down")))
    }

    fn remove(&self, _collection: &str, _key: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::MirrorIo(String::from("mirror is down")))
    }

    fn wipe(&self, _collection: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::MirrorIo(String::from("mirror is down")))
    }
}

pub fn service_with_broken_mirror() -> ScheduleService {
    let store = SqliteStore::open_in_memory().expect("in-memory store should open");
    ScheduleService::with_mirror(store, Arc::new(FailingMirror), RotaConfig::default())
}

pub fn february() -> MonthKey {
    MonthKey::new(2026, Month::February)
}

/// A male member eligible for every duty slot.
pub fn member_eligible_for_all(id: &str) -> Member {
    let mut member = Member::new(MemberId::new(id), format!("Member {id}"), Gender::Male);
    for entry in catalog() {
        for meeting in entry.meetings {
            member.eligibility.insert(DutySlot::new(entry.duty, *meeting));
        }
    }
    member
}

pub fn full_roster(n: usize) -> Vec<Member> {
    (1..=n)
        .map(|i| member_eligible_for_all(&format!("m{i}")))
        .collect()
}

/// Fills every cleaning entry of the session's active month.
pub fn fill_cleaning(service: &ScheduleService, session: &mut crate::session::Session) {
    let key = session.active().expect("schedule should be loaded").key;
    let dates = meeting_dates(key.year(), key.month(), &service.config().meeting_days)
        .expect("meeting dates should resolve");
    for md in dates {
        service
            .set_post_meeting_cleaning(
                session,
                md.date,
                Some(rota_domain::CleaningGroupId::new("group-1")),
            )
            .expect("post-meeting cleaning should apply");
        service
            .set_weekly_cleaning(session, md.date, String::from("Hall care group"))
            .expect("weekly cleaning should apply");
    }
}
