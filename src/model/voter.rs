use serde::{Deserialize, Serialize};

/// Voters younger than this cannot register.
pub const MIN_VOTER_AGE: f64 = 18.0;

/// A member of the electorate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    /// Voter unique ID.
    pub id: String,
    pub name: String,
    /// Any JSON number is accepted here; eligibility is decided by [`Voter::is_eligible`].
    pub age: f64,
}

impl Voter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: impl Into<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: age.into(),
        }
    }

    /// Whether this voter may be registered: identified, named, and of age.
    pub fn is_eligible(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty() && self.age >= MIN_VOTER_AGE
    }
}

/// Where a voter is in the registration/voting lifecycle.
/// Transitions only go forwards, one step at a time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VoterStatus {
    /// Not known to the session.
    Unregistered,
    /// Registered, has not voted yet.
    Registered,
    /// Has cast their single vote. Terminal.
    Voted,
}
