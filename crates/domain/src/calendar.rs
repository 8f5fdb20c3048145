// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Meeting-day resolution.
//!
//! Date identity here is the plain (year, month, day) triple carried by
//! `time::Date`. Weekday classification is pure calendar arithmetic with no
//! clock or timezone input, so a date classifies the same on every host.

use crate::catalog::MeetingType;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, Weekday};

/// The two configured meeting weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDays {
    /// Weekday of the midweek meeting.
    pub midweek: Weekday,
    /// Weekday of the weekend (public) meeting.
    pub weekend: Weekday,
}

impl Default for MeetingDays {
    fn default() -> Self {
        Self {
            midweek: Weekday::Thursday,
            weekend: Weekday::Sunday,
        }
    }
}

impl MeetingDays {
    /// Classifies a date against the configured meeting weekdays.
    #[must_use]
    pub fn meeting_type_of(&self, date: Date) -> Option<MeetingType> {
        if date.weekday() == self.midweek {
            Some(MeetingType::Midweek)
        } else if date.weekday() == self.weekend {
            Some(MeetingType::Weekend)
        } else {
            None
        }
    }
}

/// A resolved meeting date with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDate {
    /// The calendar date.
    pub date: Date,
    /// The meeting type held on that date.
    pub meeting: MeetingType,
}

/// Enumerates the meeting dates of a month in chronological order.
///
/// Returns every date of the month whose weekday is one of the two
/// configured meeting weekdays, classified by meeting type. No side effects.
///
/// # Errors
///
/// Returns an error only if a date of the month cannot be constructed,
/// which does not happen for valid (year, month) inputs.
pub fn meeting_dates(
    year: i32,
    month: Month,
    days: &MeetingDays,
) -> Result<Vec<MeetingDate>, DomainError> {
    let mut dates: Vec<MeetingDate> = Vec::new();
    for day in 1..=month.length(year) {
        let date: Date =
            Date::from_calendar_date(year, month, day).map_err(|err| DomainError::InvalidDate {
                reason: format!("{year}-{month}-{day}: {err}"),
            })?;
        if let Some(meeting) = days.meeting_type_of(date) {
            dates.push(MeetingDate { date, meeting });
        }
    }
    Ok(dates)
}

/// Returns the Sunday opening the week a date falls in.
///
/// This is the key of the weekly cleaning bucket.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the date underflows the
/// calendar range (only possible at the very edge of the supported range).
pub fn week_start(date: Date) -> Result<Date, DomainError> {
    let back: i64 = i64::from(date.weekday().number_days_from_sunday());
    date.checked_sub(Duration::days(back))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the week start of {date}"),
        })
}
