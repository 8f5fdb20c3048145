// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota::CoreError;
use rota_domain::DomainError;
use rota_persistence::PersistenceError;

/// Errors surfaced by the application service.
///
/// These are the messages an operator sees; every variant renders as a
/// human-readable line. Mirror failures never appear here: they are logged
/// and swallowed, the primary store being the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The engine rejected the command.
    CoreViolation(CoreError),
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The primary store failed.
    Persistence(PersistenceError),
    /// No schedule is currently loaded into the session.
    NoActiveSchedule,
    /// There is nothing to save.
    NothingToSave,
    /// An internal invariant was broken.
    Internal(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CoreViolation(err) => write!(f, "{err}"),
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::NoActiveSchedule => {
                write!(f, "No schedule is loaded. Generate or load a month first")
            }
            Self::NothingToSave => write!(f, "No generated schedule to save"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        Self::CoreViolation(err)
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<PersistenceError> for ServiceError {
    fn from(err: PersistenceError) -> Self {
        Self::Persistence(err)
    }
}
