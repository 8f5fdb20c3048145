// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Public talk logistics for the weekend meeting.
//!
//! These assignments are entered by hand (no rotation) and archived per
//! month alongside the duty schedule.

use crate::types::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// The speaker of a public talk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    /// A member of this congregation.
    Local {
        /// The speaking member.
        member: MemberId,
    },
    /// A visiting speaker from another congregation.
    Visiting {
        /// The speaker's name.
        name: String,
        /// Their home congregation.
        congregation: String,
    },
}

/// Logistics of one weekend public talk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PublicMeetingAssignment {
    /// Talk theme, when announced.
    pub theme: Option<String>,
    /// The speaker.
    pub speaker: Option<Speaker>,
    /// Meeting chairman.
    pub chairman: Option<MemberId>,
    /// Study article reader.
    pub reader: Option<MemberId>,
}

/// One month of public-meeting assignments, keyed by weekend date.
pub type PublicMeetingMonth = BTreeMap<Date, PublicMeetingAssignment>;
