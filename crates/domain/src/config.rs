// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::MeetingDays;
use crate::types::{CleaningGroup, CleaningGroupId};
use serde::{Deserialize, Serialize};

/// Read-only static configuration, loaded once and passed down.
///
/// Covers the meeting weekday constants and the post-meeting cleaning group
/// catalog. The duty catalog itself is compiled in (see `catalog`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaConfig {
    /// The two configured meeting weekdays.
    pub meeting_days: MeetingDays,
    /// The post-meeting cleaning group catalog.
    pub cleaning_groups: Vec<CleaningGroup>,
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            meeting_days: MeetingDays::default(),
            cleaning_groups: (1..=4)
                .map(|n| CleaningGroup {
                    id: CleaningGroupId::new(&format!("group-{n}")),
                    label: format!("Group {n}"),
                })
                .collect(),
        }
    }
}

impl RotaConfig {
    /// Returns whether a cleaning group id belongs to the catalog.
    #[must_use]
    pub fn has_cleaning_group(&self, id: &CleaningGroupId) -> bool {
        self.cleaning_groups.iter().any(|g| &g.id == id)
    }
}
