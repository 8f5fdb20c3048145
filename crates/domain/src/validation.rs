// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Member, MemberId};
use std::collections::HashSet;

/// Validates that a member's basic field constraints are met.
///
/// This function checks field-local rules only; cross-roster rules
/// (uniqueness, relationship resolution) require context and live in
/// [`validate_roster`].
///
/// # Errors
///
/// Returns an error if:
/// - The member's id is empty
/// - The member's name is empty
/// - The member lists itself as a relative
pub fn validate_member_fields(member: &Member) -> Result<(), DomainError> {
    if member.id.value().is_empty() {
        return Err(DomainError::InvalidMemberId(String::from(
            "Member id cannot be empty",
        )));
    }

    if member.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    if member.relationships.contains(&member.id) {
        return Err(DomainError::SelfRelationship {
            member_id: member.id.value().to_string(),
        });
    }

    Ok(())
}

/// Validates a full roster.
///
/// Checks every member's field constraints, id uniqueness across the roster,
/// and that every relationship resolves to a roster member.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_roster(members: &[Member]) -> Result<(), DomainError> {
    let mut seen: HashSet<&MemberId> = HashSet::new();
    for member in members {
        validate_member_fields(member)?;
        if !seen.insert(&member.id) {
            return Err(DomainError::DuplicateMemberId(
                member.id.value().to_string(),
            ));
        }
    }

    let known: HashSet<&MemberId> = members.iter().map(|m| &m.id).collect();
    for member in members {
        for related in &member.relationships {
            if !known.contains(related) {
                return Err(DomainError::UnknownRelationship {
                    member_id: member.id.value().to_string(),
                    related_id: related.value().to_string(),
                });
            }
        }
    }

    Ok(())
}
