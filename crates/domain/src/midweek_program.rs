// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The structured midweek-meeting program.
//!
//! Mirrors the printed midweek schedule: a fixed frame (chairman, prayers,
//! songs, the three sections) around two dynamic part lists. Entered by
//! hand, archived per month.

use crate::types::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// A ministry (student) part with an optional assistant and second room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StudentPart {
    /// Part name as printed in the workbook.
    pub name: String,
    /// Optional theme line.
    pub theme: Option<String>,
    /// Main-room participant.
    pub participant: Option<MemberId>,
    /// Main-room assistant, when the part uses one.
    pub assistant: Option<MemberId>,
    /// Second-room participant, when a second room operates.
    pub participant_room_b: Option<MemberId>,
}

/// A living-as-christians part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LivingPart {
    /// Part name as printed in the workbook.
    pub name: String,
    /// Optional theme line.
    pub theme: Option<String>,
    /// Assigned participant.
    pub participant: Option<MemberId>,
}

/// The program of one midweek meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MidweekProgram {
    /// Meeting chairman.
    pub chairman: Option<MemberId>,
    /// Opening prayer.
    pub opening_prayer: Option<MemberId>,
    /// Opening song number.
    pub opening_song: Option<u16>,
    /// Treasures talk title override, when the workbook title is customized.
    pub treasures_talk_title: Option<String>,
    /// Treasures talk speaker.
    pub treasures_talk: Option<MemberId>,
    /// Spiritual gems conductor.
    pub spiritual_gems: Option<MemberId>,
    /// Bible reading, main room.
    pub bible_reading: Option<MemberId>,
    /// Bible reading, second room.
    pub bible_reading_room_b: Option<MemberId>,
    /// Ministry parts, in printed order.
    pub student_parts: Vec<StudentPart>,
    /// Middle song number.
    pub middle_song: Option<u16>,
    /// Living-as-christians parts, in printed order.
    pub living_parts: Vec<LivingPart>,
    /// Congregation study conductor.
    pub study_conductor: Option<MemberId>,
    /// Congregation study reader.
    pub study_reader: Option<MemberId>,
    /// Closing comments detail line, when customized.
    pub closing_comments: Option<String>,
    /// Closing song number.
    pub closing_song: Option<u16>,
    /// Closing prayer.
    pub closing_prayer: Option<MemberId>,
}

/// One month of midweek programs, keyed by midweek date.
pub type MidweekProgramMonth = BTreeMap<Date, MidweekProgram>;
