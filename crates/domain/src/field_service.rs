// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-service meeting points.
//!
//! A weekly template (per weekday) seeds the month; the monthly data holds
//! the concrete per-date meeting points. Modalities and base locations are
//! small operator-managed lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Date, Weekday};

/// An entry of an operator-managed list (modalities, base locations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedItem {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// One field-service meeting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldServiceSlot {
    /// Start time as displayed, e.g. "09:30".
    pub time: String,
    /// Modality id from the managed list.
    pub modality: Option<String>,
    /// Base location id from the managed list.
    pub location: Option<String>,
    /// Conductor, free text.
    pub conductor: Option<String>,
}

/// The weekly template: meeting points per weekday.
pub type FieldServiceTemplate = BTreeMap<WeekdaySlot, Vec<FieldServiceSlot>>;

/// One month of concrete meeting points, keyed by date.
pub type FieldServiceMonth = BTreeMap<Date, Vec<FieldServiceSlot>>;

/// A weekday usable as a JSON document key.
///
/// `time::Weekday` does not serialize as a plain map key, so the template is
/// keyed by this thin wrapper, ordered Sunday-first like the displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdaySlot(pub Weekday);

impl PartialOrd for WeekdaySlot {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeekdaySlot {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .number_days_from_sunday()
            .cmp(&other.0.number_days_from_sunday())
    }
}

impl Serialize for WeekdaySlot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self.0 {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        })
    }
}

impl<'de> Deserialize<'de> for WeekdaySlot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        let weekday = match raw.as_str() {
            "sunday" => Weekday::Sunday,
            "monday" => Weekday::Monday,
            "tuesday" => Weekday::Tuesday,
            "wednesday" => Weekday::Wednesday,
            "thursday" => Weekday::Thursday,
            "friday" => Weekday::Friday,
            "saturday" => Weekday::Saturday,
            other => {
                return Err(serde::de::Error::custom(format!("unknown weekday: {other}")));
            }
        };
        Ok(Self(weekday))
    }
}
