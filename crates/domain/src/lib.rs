// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod catalog;
mod config;
mod eligibility;
mod error;
mod field_service;
mod midweek_program;
mod public_meeting;
mod types;
mod validation;

pub use calendar::{MeetingDate, MeetingDays, meeting_dates, week_start};
pub use catalog::{
    BaseDuty, DutyCategory, DutyDescriptor, DutySlot, MeetingType, all_slots_for, catalog,
    descriptor, slots_for,
};
pub use config::RotaConfig;
pub use eligibility::is_eligible;
pub use error::DomainError;
pub use field_service::{
    FieldServiceMonth, FieldServiceSlot, FieldServiceTemplate, ManagedItem, WeekdaySlot,
};
pub use midweek_program::{LivingPart, MidweekProgram, MidweekProgramMonth, StudentPart};
pub use public_meeting::{PublicMeetingAssignment, PublicMeetingMonth, Speaker};
pub use types::{
    CleaningGroup, CleaningGroupId, Gender, Member, MemberId, MonthKey, ScheduleStatus,
};
pub use validation::{validate_member_fields, validate_roster};
