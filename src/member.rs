// 👤 Member - stable identity + display name
//
// The id is IDENTITY (never changes, unique for the process lifetime).
// The name is a VALUE set once on creation; members are never edited.

use serde::{Deserialize, Serialize};

/// A participant on one of the rosters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// Stable identity (UUID v4)
    pub id: String,

    /// Display name, already trimmed and never empty
    pub name: String,
}

impl Member {
    /// Create a member from raw user input.
    ///
    /// Returns `None` when the name is empty after trimming.
    pub fn new(raw_name: &str) -> Option<Self> {
        let name = normalize_name(raw_name)?;

        Some(Member {
            id: new_member_id(),
            name,
        })
    }
}

/// Trim a raw name; whitespace-only input yields `None`
pub fn normalize_name(raw_name: &str) -> Option<String> {
    let trimmed = raw_name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn new_member_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
