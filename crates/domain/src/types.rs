// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::DutySlot;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use time::{Date, Month};

/// Represents the lifecycle state of a month's schedule.
///
/// A month with no stored schedule is simply absent; once a schedule exists
/// it is either a draft or finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScheduleStatus {
    /// Editable working copy. Regeneration and all edits allowed.
    #[default]
    Draft,
    /// Completed and archived. Manual substitution remains allowed.
    Finalized,
}

impl FromStr for ScheduleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "finalized" => Ok(Self::Finalized),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ScheduleStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Finalized => "finalized",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// The only forward transition is Draft → Finalized. Staying in place is
    /// always valid (substitutions and cleaning edits preserve the status).
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Finalized) | (Self::Draft, Self::Draft) | (Self::Finalized, Self::Finalized)
        )
    }
}

/// Represents a member's gender.
///
/// Some duties carry a gender requirement; see the duty catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Parses a gender from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid gender.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(DomainError::InvalidGender(format!("Unknown gender: {s}"))),
        }
    }

    /// Returns the string representation of this gender.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Represents a member's stable unique identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId {
    value: String,
}

impl MemberId {
    /// Creates a new `MemberId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a congregation member.
///
/// Eligibility is held per duty slot, so midweek and weekend rotations for
/// the same duty stay independent. `assignment_history` holds at most one
/// tracked duty per calendar date; cleaning responsibilities never appear in
/// it (cleaning is scheduled manually and carries no rotation fairness).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Stable unique identifier.
    pub id: MemberId,
    /// Display name (informational, not unique).
    pub name: String,
    /// The member's gender.
    pub gender: Gender,
    /// Duty slots this member may be assigned to.
    pub eligibility: BTreeSet<DutySlot>,
    /// Family ties to other members, used for the same-day pairing exclusion.
    pub relationships: BTreeSet<MemberId>,
    /// Date → tracked duty performed that day.
    pub assignment_history: BTreeMap<Date, DutySlot>,
}

impl Member {
    /// Creates a new member with empty eligibility, relationships, and history.
    #[must_use]
    pub fn new(id: MemberId, name: String, gender: Gender) -> Self {
        Self {
            id,
            name,
            gender,
            eligibility: BTreeSet::new(),
            relationships: BTreeSet::new(),
            assignment_history: BTreeMap::new(),
        }
    }

    /// Returns whether this member has a registered family tie to `other`.
    ///
    /// Ties are treated as symmetric regardless of which side recorded them.
    #[must_use]
    pub fn is_related_to(&self, other: &Self) -> bool {
        self.relationships.contains(&other.id) || other.relationships.contains(&self.id)
    }
}

/// Represents a year-month archive key.
///
/// Schedules and the ancillary assignment sets are archived under this key
/// in the form `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: Month,
}

impl MonthKey {
    /// Creates a new `MonthKey`.
    #[must_use]
    pub const fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns whether the given date falls inside this month.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl FromStr for MonthKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((year_part, month_part)) = s.split_once('-') else {
            return Err(DomainError::InvalidMonthKey(s.to_string()));
        };
        let year: i32 = year_part
            .parse()
            .map_err(|_| DomainError::InvalidMonthKey(s.to_string()))?;
        let month_number: u8 = month_part
            .parse()
            .map_err(|_| DomainError::InvalidMonthKey(s.to_string()))?;
        let month: Month = Month::try_from(month_number)
            .map_err(|_| DomainError::InvalidMonthKey(s.to_string()))?;
        Ok(Self { year, month })
    }
}

impl Serialize for MonthKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Represents a post-meeting cleaning group identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleaningGroupId {
    value: String,
}

impl CleaningGroupId {
    /// Creates a new `CleaningGroupId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for CleaningGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents an entry of the cleaning group catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningGroup {
    /// The group identifier.
    pub id: CleaningGroupId,
    /// Display label.
    pub label: String,
}
