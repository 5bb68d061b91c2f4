use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Proof that a vote was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceipt {
    pub voter_id: String,
    pub candidate_id: String,
}

/// Reasons a vote can be refused. The display text is the reason reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    #[error("voter '{0}' is not registered")]
    UnregisteredVoter(String),
    #[error("candidate '{0}' is not standing in this election")]
    UnknownCandidate(String),
    #[error("voter '{0}' has already voted")]
    AlreadyVoted(String),
}

/// Reasons a voter can be turned away at registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("malformed voter record: {0}")]
    Malformed(String),
    #[error("voter '{0}' is not eligible to register")]
    Ineligible(String),
    #[error("voter '{0}' is already registered")]
    AlreadyRegistered(String),
}
