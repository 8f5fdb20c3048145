// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The static duty catalog.
//!
//! Duties are fixed domain constants, not user-editable at runtime. A duty
//! slot is the two-part key (base duty, meeting type): rotation fairness is
//! tracked independently per meeting type, so "external usher on the midweek
//! meeting" and "external usher on the weekend meeting" are distinct slots
//! with distinct histories.

use crate::error::DomainError;
use crate::types::Gender;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two recurring meeting categories, each held on a fixed weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeetingType {
    /// The midweek meeting.
    Midweek,
    /// The weekend (public) meeting.
    Weekend,
}

impl MeetingType {
    /// Returns the string representation of this meeting type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Midweek => "midweek",
            Self::Weekend => "weekend",
        }
    }

    /// Parses a meeting type from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a meeting type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "midweek" => Ok(Self::Midweek),
            "weekend" => Ok(Self::Weekend),
            _ => Err(DomainError::InvalidDutySlot(format!(
                "Unknown meeting type: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for MeetingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The duty table a duty belongs to.
///
/// Generation requests are scoped to one category; regenerating a category
/// never touches another category's slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DutyCategory {
    /// Hall and entrance ushers.
    Ushers,
    /// Roving microphone handlers.
    Microphones,
    /// Audio/video operators and the remote-attendee host.
    AudioVideo,
}

impl DutyCategory {
    /// All categories in declared order.
    pub const ALL: [Self; 3] = [Self::Ushers, Self::Microphones, Self::AudioVideo];

    /// Returns the string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ushers => "ushers",
            Self::Microphones => "microphones",
            Self::AudioVideo => "audio-video",
        }
    }

    /// Parses a category from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a category.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "ushers" => Ok(Self::Ushers),
            "microphones" => Ok(Self::Microphones),
            "audio-video" => Ok(Self::AudioVideo),
            _ => Err(DomainError::InvalidCategory(format!(
                "Unknown duty category: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for DutyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A base duty, independent of meeting type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BaseDuty {
    /// Usher at the outside entrance.
    ExternalUsher,
    /// Usher inside the hall, by the platform.
    StageUsher,
    /// First roving microphone.
    Microphone1,
    /// Second roving microphone.
    Microphone2,
    /// Audio/video operator.
    AudioVideo,
    /// Host for remote attendees.
    ZoomAttendant,
}

impl BaseDuty {
    /// Returns the stable identifier of this duty.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExternalUsher => "external-usher",
            Self::StageUsher => "stage-usher",
            Self::Microphone1 => "microphone-1",
            Self::Microphone2 => "microphone-2",
            Self::AudioVideo => "audio-video",
            Self::ZoomAttendant => "zoom-attendant",
        }
    }

    /// Parses a base duty from its stable identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a duty.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "external-usher" => Ok(Self::ExternalUsher),
            "stage-usher" => Ok(Self::StageUsher),
            "microphone-1" => Ok(Self::Microphone1),
            "microphone-2" => Ok(Self::Microphone2),
            "audio-video" => Ok(Self::AudioVideo),
            "zoom-attendant" => Ok(Self::ZoomAttendant),
            _ => Err(DomainError::InvalidDutySlot(format!("Unknown duty: {s}"))),
        }
    }
}

impl std::fmt::Display for BaseDuty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A duty slot: the unit of assignment and of rotation-fairness tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DutySlot {
    /// The base duty.
    pub duty: BaseDuty,
    /// The meeting type this slot belongs to.
    pub meeting: MeetingType,
}

impl DutySlot {
    /// Creates a new `DutySlot`.
    #[must_use]
    pub const fn new(duty: BaseDuty, meeting: MeetingType) -> Self {
        Self { duty, meeting }
    }

    /// Returns the catalog descriptor for this slot's duty.
    #[must_use]
    pub fn descriptor(&self) -> &'static DutyDescriptor {
        descriptor(self.duty)
    }

    /// Returns the category this slot belongs to.
    #[must_use]
    pub fn category(&self) -> DutyCategory {
        self.descriptor().category
    }
}

impl std::fmt::Display for DutySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.duty, self.meeting)
    }
}

impl FromStr for DutySlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((duty_part, meeting_part)) = s.split_once(':') else {
            return Err(DomainError::InvalidDutySlot(s.to_string()));
        };
        Ok(Self {
            duty: BaseDuty::parse(duty_part)?,
            meeting: MeetingType::parse(meeting_part)?,
        })
    }
}

// Serialized as the "duty:meeting" string so slots can key JSON documents.
impl Serialize for DutySlot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DutySlot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Catalog entry describing one base duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyDescriptor {
    /// The base duty.
    pub duty: BaseDuty,
    /// The table the duty belongs to.
    pub category: DutyCategory,
    /// Display label.
    pub label: &'static str,
    /// Meeting types the duty is filled on.
    pub meetings: &'static [MeetingType],
    /// Gender requirement, if any.
    pub requires_gender: Option<Gender>,
    /// Whether relatives may not hold this duty alongside another
    /// relative-exclusive duty of the same category on the same date.
    /// Set on the jointly-performed pairs (both ushers, both microphones).
    pub relative_exclusive: bool,
}

const BOTH_MEETINGS: &[MeetingType] = &[MeetingType::Midweek, MeetingType::Weekend];

/// The fixed duty catalog, in declared (selection) order.
const CATALOG: [DutyDescriptor; 6] = [
    DutyDescriptor {
        duty: BaseDuty::ExternalUsher,
        category: DutyCategory::Ushers,
        label: "External Usher",
        meetings: BOTH_MEETINGS,
        requires_gender: Some(Gender::Male),
        relative_exclusive: true,
    },
    DutyDescriptor {
        duty: BaseDuty::StageUsher,
        category: DutyCategory::Ushers,
        label: "Stage Usher",
        meetings: BOTH_MEETINGS,
        requires_gender: Some(Gender::Male),
        relative_exclusive: true,
    },
    DutyDescriptor {
        duty: BaseDuty::Microphone1,
        category: DutyCategory::Microphones,
        label: "Microphone 1",
        meetings: BOTH_MEETINGS,
        requires_gender: Some(Gender::Male),
        relative_exclusive: true,
    },
    DutyDescriptor {
        duty: BaseDuty::Microphone2,
        category: DutyCategory::Microphones,
        label: "Microphone 2",
        meetings: BOTH_MEETINGS,
        requires_gender: Some(Gender::Male),
        relative_exclusive: true,
    },
    DutyDescriptor {
        duty: BaseDuty::AudioVideo,
        category: DutyCategory::AudioVideo,
        label: "Audio/Video",
        meetings: BOTH_MEETINGS,
        requires_gender: Some(Gender::Male),
        relative_exclusive: false,
    },
    DutyDescriptor {
        duty: BaseDuty::ZoomAttendant,
        category: DutyCategory::AudioVideo,
        label: "Zoom Attendant",
        meetings: BOTH_MEETINGS,
        requires_gender: Some(Gender::Male),
        relative_exclusive: false,
    },
];

/// Returns the full duty catalog in declared order.
#[must_use]
pub const fn catalog() -> &'static [DutyDescriptor] {
    &CATALOG
}

/// Returns the descriptor for a base duty.
#[must_use]
pub const fn descriptor(duty: BaseDuty) -> &'static DutyDescriptor {
    match duty {
        BaseDuty::ExternalUsher => &CATALOG[0],
        BaseDuty::StageUsher => &CATALOG[1],
        BaseDuty::Microphone1 => &CATALOG[2],
        BaseDuty::Microphone2 => &CATALOG[3],
        BaseDuty::AudioVideo => &CATALOG[4],
        BaseDuty::ZoomAttendant => &CATALOG[5],
    }
}

/// Returns the slots of one category applicable to a meeting type, in
/// declared order.
#[must_use]
pub fn slots_for(category: DutyCategory, meeting: MeetingType) -> Vec<DutySlot> {
    CATALOG
        .iter()
        .filter(|d| d.category == category && d.meetings.contains(&meeting))
        .map(|d| DutySlot::new(d.duty, meeting))
        .collect()
}

/// Returns every slot applicable to a meeting type, across all categories,
/// in declared order.
#[must_use]
pub fn all_slots_for(meeting: MeetingType) -> Vec<DutySlot> {
    CATALOG
        .iter()
        .filter(|d| d.meetings.contains(&meeting))
        .map(|d| DutySlot::new(d.duty, meeting))
        .collect()
}
