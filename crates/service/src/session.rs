// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota::{MonthSchedule, ScheduleState};
use rota_domain::{MonthKey, ScheduleStatus};

/// The operator's working context: the currently loaded schedule, if any.
///
/// This is an explicit value handed to every service call, not ambient
/// state; the service persists it to the cache collection so a new process
/// resumes where the last one stopped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    active: Option<MonthSchedule>,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Creates a session around an already-loaded schedule.
    #[must_use]
    pub const fn with_active(schedule: Option<MonthSchedule>) -> Self {
        Self { active: schedule }
    }

    /// Returns the loaded schedule, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&MonthSchedule> {
        self.active.as_ref()
    }

    /// Returns the loaded schedule's status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<ScheduleStatus> {
        match &self.active {
            Some(schedule) => Some(schedule.status),
            None => None,
        }
    }

    /// Returns whether the session holds the given month.
    #[must_use]
    pub fn is_active(&self, key: MonthKey) -> bool {
        self.active.as_ref().is_some_and(|s| s.key == key)
    }

    /// Returns the engine state for a month: the loaded schedule when it is
    /// this month's, absent otherwise.
    #[must_use]
    pub fn state_for(&self, key: MonthKey) -> ScheduleState {
        match &self.active {
            Some(schedule) if schedule.key == key => ScheduleState::Loaded(schedule.clone()),
            _ => ScheduleState::Absent,
        }
    }

    pub(crate) fn set_active(&mut self, schedule: Option<MonthSchedule>) {
        self.active = schedule;
    }
}
