// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rota_domain::{
    BaseDuty, DutySlot, Gender, MeetingType, Member, MemberId, MonthKey, RotaConfig, catalog,
};
use time::{Date, Month};

pub fn d(year: i32, month: u8, day: u8) -> Date {
    Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
}

pub fn key(year: i32, month: u8) -> MonthKey {
    MonthKey::new(year, Month::try_from(month).unwrap())
}

pub fn slot(duty: BaseDuty, meeting: MeetingType) -> DutySlot {
    DutySlot::new(duty, meeting)
}

pub fn config() -> RotaConfig {
    RotaConfig::default()
}

/// A male member eligible for exactly the given slots.
pub fn member_eligible(id: &str, slots: &[DutySlot]) -> Member {
    let mut member = Member::new(MemberId::new(id), format!("Member {id}"), Gender::Male);
    member.eligibility.extend(slots.iter().copied());
    member
}

/// A male member eligible for every duty slot of the catalog.
pub fn member_eligible_for_all(id: &str) -> Member {
    let mut member = Member::new(MemberId::new(id), format!("Member {id}"), Gender::Male);
    for entry in catalog() {
        for meeting in entry.meetings {
            member.eligibility.insert(DutySlot::new(entry.duty, *meeting));
        }
    }
    member
}

/// `n` members eligible for everything, ids `m1`..`mn`, no relationships.
pub fn full_roster(n: usize) -> Vec<Member> {
    (1..=n)
        .map(|i| member_eligible_for_all(&format!("m{i}")))
        .collect()
}

/// Both usher slots of one meeting type.
pub fn usher_slots(meeting: MeetingType) -> Vec<DutySlot> {
    vec![
        slot(BaseDuty::ExternalUsher, meeting),
        slot(BaseDuty::StageUsher, meeting),
    ]
}
