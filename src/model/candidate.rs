use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A candidate standing in an election. Fixed once handed to a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate unique ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Party the candidate stands for.
    pub party: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, party: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            party: party.into(),
        }
    }
}

/// A candidate together with the number of votes recorded for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub id: String,
    pub name: String,
    pub party: String,
    pub votes: u64,
}

impl CandidateResult {
    /// Zero-vote result for the given candidate.
    pub fn new(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            party: candidate.party.clone(),
            votes: 0,
        }
    }
}

impl Display for CandidateResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {} vote{}",
            self.name,
            self.party,
            self.votes,
            if self.votes != 1 { "s" } else { "" }
        )
    }
}
