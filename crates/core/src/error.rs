// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{DomainError, DutySlot, MonthKey};
use time::Date;

/// Errors that can occur during engine transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Generation was requested against an empty roster.
    EmptyRoster,
    /// The command requires a loaded schedule for the month.
    NoScheduleLoaded {
        /// The month the command addressed.
        key: MonthKey,
    },
    /// The slot is not applicable to the date's meeting type.
    SlotNotApplicable {
        /// The addressed date.
        date: Date,
        /// The addressed slot.
        slot: DutySlot,
    },
    /// The cleaning group is not part of the configured catalog.
    UnknownCleaningGroup(String),
    /// Finalization was requested with blank entries remaining.
    ScheduleIncomplete {
        /// Human-readable descriptions of every blank entry.
        missing: Vec<String>,
    },
    /// The month is already finalized.
    AlreadyFinalized {
        /// The month addressed.
        key: MonthKey,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::EmptyRoster => {
                write!(f, "Cannot generate assignments: the member roster is empty")
            }
            Self::NoScheduleLoaded { key } => {
                write!(f, "No schedule is loaded for {key}")
            }
            Self::SlotNotApplicable { date, slot } => {
                write!(f, "Slot '{slot}' is not applicable on {date}")
            }
            Self::UnknownCleaningGroup(id) => {
                write!(f, "Cleaning group '{id}' is not in the catalog")
            }
            Self::ScheduleIncomplete { missing } => {
                write!(
                    f,
                    "Blank assignments remain ({} entries). Fill every slot before finalizing",
                    missing.len()
                )
            }
            Self::AlreadyFinalized { key } => {
                write!(f, "Schedule for {key} is already finalized")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
