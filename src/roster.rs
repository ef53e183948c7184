// 📋 Roster Store - two ordered rosters and the moves between them
//
// Invariant: a member lives in exactly one roster. Every mutation takes
// `&mut self`, so a move is one observable transition.
//
// All operations are permissive: blank names, unknown ids and
// same-roster moves are silent no-ops (the return value says whether
// anything changed).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::ShuffleError;
use crate::member::Member;

// ============================================================================
// ROSTER ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RosterId {
    A,
    B,
}

impl RosterId {
    pub const ALL: [RosterId; 2] = [RosterId::A, RosterId::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            RosterId::A => "A",
            RosterId::B => "B",
        }
    }

    /// The opposite roster
    pub fn other(&self) -> Self {
        match self {
            RosterId::A => RosterId::B,
            RosterId::B => RosterId::A,
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            RosterId::A => "Team A",
            RosterId::B => "Team B",
        }
    }
}

impl fmt::Display for RosterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterId {
    type Err = ShuffleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(RosterId::A),
            "B" => Ok(RosterId::B),
            _ => Err(ShuffleError::InvalidRoster {
                value: s.to_string(),
                line: None,
            }),
        }
    }
}

// ============================================================================
// ROSTER
// ============================================================================

/// Ordered members of one team; order is insertion order, display only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn contains(&self, member_id: &str) -> bool {
        self.get(member_id).is_some()
    }

    fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    fn take(&mut self, member_id: &str) -> Option<Member> {
        let index = self.members.iter().position(|m| m.id == member_id)?;
        Some(self.members.remove(index))
    }
}

// ============================================================================
// ROSTER STORE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    team_a: Roster,
    team_b: Roster,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self, id: RosterId) -> &Roster {
        match id {
            RosterId::A => &self.team_a,
            RosterId::B => &self.team_b,
        }
    }

    fn roster_mut(&mut self, id: RosterId) -> &mut Roster {
        match id {
            RosterId::A => &mut self.team_a,
            RosterId::B => &mut self.team_b,
        }
    }

    pub fn len(&self, id: RosterId) -> usize {
        self.roster(id).len()
    }

    pub fn total_len(&self) -> usize {
        self.team_a.len() + self.team_b.len()
    }

    /// Locate a member in either roster
    pub fn find(&self, member_id: &str) -> Option<(RosterId, &Member)> {
        RosterId::ALL
            .into_iter()
            .find_map(|id| self.roster(id).get(member_id).map(|m| (id, m)))
    }

    /// Append a new member; blank names are ignored.
    ///
    /// Returns the new member's id when one was added.
    pub fn add(&mut self, roster: RosterId, raw_name: &str) -> Option<String> {
        let Some(member) = Member::new(raw_name) else {
            debug!(%roster, "ignoring blank member name");
            return None;
        };

        info!(%roster, member_id = %member.id, name = %member.name, "member added");
        let id = member.id.clone();
        self.roster_mut(roster).push(member);
        Some(id)
    }

    /// Remove a member by id; unknown ids are a no-op
    pub fn remove(&mut self, roster: RosterId, member_id: &str) -> bool {
        match self.roster_mut(roster).take(member_id) {
            Some(member) => {
                info!(%roster, member_id, name = %member.name, "member removed");
                true
            }
            None => {
                debug!(%roster, member_id, "remove: member not in roster");
                false
            }
        }
    }

    /// Move a member to the end of `dest`.
    ///
    /// No-op when `source == dest` or the member is not in `source`.
    pub fn move_member(&mut self, source: RosterId, dest: RosterId, member_id: &str) -> bool {
        if source == dest {
            debug!(%source, member_id, "move: source and destination are the same");
            return false;
        }

        let Some(member) = self.roster_mut(source).take(member_id) else {
            debug!(%source, member_id, "move: member not in source roster");
            return false;
        };

        info!(%source, %dest, member_id, name = %member.name, "member moved");
        self.roster_mut(dest).push(member);
        true
    }
}

// ============================================================================
// TESTS
// ============================================================================
