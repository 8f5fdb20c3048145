// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schedule::MonthSchedule;
use rota_domain::{Member, ScheduleStatus};

/// The lifecycle position of one month as seen by the engine.
///
/// `Absent` means no schedule exists for the month; a loaded schedule is
/// either a draft or finalized (see `ScheduleStatus`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleState {
    /// No schedule exists for the month.
    Absent,
    /// A schedule is loaded.
    Loaded(MonthSchedule),
}

impl ScheduleState {
    /// Returns the loaded schedule, if any.
    #[must_use]
    pub const fn schedule(&self) -> Option<&MonthSchedule> {
        match self {
            Self::Absent => None,
            Self::Loaded(schedule) => Some(schedule),
        }
    }

    /// Returns the loaded schedule's status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<ScheduleStatus> {
        match self {
            Self::Absent => None,
            Self::Loaded(schedule) => Some(schedule.status),
        }
    }
}

/// The result of a successful engine transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The roster is returned whole; the roster provider accepts
/// a full replacement list only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The month's state after the transition.
    pub new_state: ScheduleState,
    /// The roster after the transition, with any ledger updates applied.
    pub roster: Vec<Member>,
}
