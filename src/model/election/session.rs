use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    candidate::{Candidate, CandidateResult},
    voter::{Voter, VoterStatus},
};

use super::receipt::{RegistrationError, VoteError, VoteReceipt};

/// A single election: a fixed slate of candidates, the voters registered so far,
/// and the votes they have cast. All state is private; the methods below are the
/// only way in.
#[derive(Debug)]
pub struct ElectionSession {
    /// Candidates in declaration order. Never changes after construction.
    candidates: Vec<Candidate>,
    /// Registered voters by ID.
    voters: HashMap<String, Voter>,
    /// Maps voter IDs to the candidate they voted for. Write-once per voter.
    votes: HashMap<String, String>,
}

impl ElectionSession {
    /// Open a new election with the given candidates.
    pub fn new(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        let candidates: Vec<Candidate> = candidates.into_iter().collect();
        debug!("Opened election with {} candidates", candidates.len());
        Self {
            candidates,
            voters: HashMap::new(),
            votes: HashMap::new(),
        }
    }

    /// The candidates, in declaration order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Register a voter. Returns `false` without changing anything if the voter is
    /// ineligible or their ID is already registered.
    pub fn register_voter(&mut self, voter: Voter) -> bool {
        self.try_register_voter(voter).is_ok()
    }

    /// Register a voter, reporting why they were turned away on failure.
    pub fn try_register_voter(&mut self, voter: Voter) -> Result<(), RegistrationError> {
        if !voter.is_eligible() {
            info!("Rejected ineligible voter '{}'", voter.id);
            return Err(RegistrationError::Ineligible(voter.id));
        }
        if self.voters.contains_key(&voter.id) {
            info!("Rejected duplicate registration for voter '{}'", voter.id);
            return Err(RegistrationError::AlreadyRegistered(voter.id));
        }

        debug!("Registered voter '{}'", voter.id);
        self.voters.insert(voter.id.clone(), voter);
        Ok(())
    }

    /// Register a voter from a loosely-shaped record, e.g. one read from a file.
    /// Anything that is not a well-formed voter is rejected with `false`.
    pub fn register_voter_record(&mut self, record: &Value) -> bool {
        self.try_register_voter_record(record).is_ok()
    }

    /// As [`Self::register_voter_record`], with the reason for any rejection.
    pub fn try_register_voter_record(&mut self, record: &Value) -> Result<(), RegistrationError> {
        match Voter::deserialize(record) {
            Ok(voter) => self.try_register_voter(voter),
            Err(e) => {
                info!("Rejected malformed voter record: {e}");
                Err(RegistrationError::Malformed(e.to_string()))
            }
        }
    }

    /// Number of registered voters.
    pub fn registered_count(&self) -> usize {
        self.voters.len()
    }

    /// Where the given voter is in their lifecycle.
    pub fn voter_status(&self, voter_id: &str) -> VoterStatus {
        if self.votes.contains_key(voter_id) {
            VoterStatus::Voted
        } else if self.voters.contains_key(voter_id) {
            VoterStatus::Registered
        } else {
            VoterStatus::Unregistered
        }
    }

    /// Record a vote. The voter must be registered and not have voted yet, and the
    /// candidate must be standing. Nothing changes on failure.
    pub fn cast_vote(
        &mut self,
        voter_id: &str,
        candidate_id: &str,
    ) -> Result<VoteReceipt, VoteError> {
        let status = self.voter_status(voter_id);
        if status == VoterStatus::Unregistered {
            return Err(VoteError::UnregisteredVoter(voter_id.to_string()));
        }
        if !self.is_candidate(candidate_id) {
            return Err(VoteError::UnknownCandidate(candidate_id.to_string()));
        }
        if status == VoterStatus::Voted {
            return Err(VoteError::AlreadyVoted(voter_id.to_string()));
        }

        self.votes.insert(voter_id.to_string(), candidate_id.to_string());
        debug!("Recorded vote from '{voter_id}' for '{candidate_id}'");
        Ok(VoteReceipt {
            voter_id: voter_id.to_string(),
            candidate_id: candidate_id.to_string(),
        })
    }

    /// Record a vote, reporting the outcome through exactly one of the two handlers
    /// and returning whatever that handler returns.
    pub fn cast_vote_with<R>(
        &mut self,
        voter_id: &str,
        candidate_id: &str,
        on_success: impl FnOnce(VoteReceipt) -> R,
        on_error: impl FnOnce(VoteError) -> R,
    ) -> R {
        match self.cast_vote(voter_id, candidate_id) {
            Ok(receipt) => on_success(receipt),
            Err(err) => on_error(err),
        }
    }

    /// Total number of votes cast so far.
    pub fn total_votes(&self) -> usize {
        self.votes.len()
    }

    /// One entry per candidate, most votes first. Ties keep declaration order.
    pub fn results(&self) -> Vec<CandidateResult> {
        self.results_sorted_by(|a, b| b.votes.cmp(&a.votes))
    }

    /// One entry per candidate, ordered by the given comparator. The sort is stable,
    /// so entries the comparator considers equal keep declaration order.
    pub fn results_sorted_by<F>(&self, compare: F) -> Vec<CandidateResult>
    where
        F: FnMut(&CandidateResult, &CandidateResult) -> Ordering,
    {
        let mut results = self
            .candidates
            .iter()
            .map(|candidate| {
                let mut result = CandidateResult::new(candidate);
                result.votes = self
                    .votes
                    .values()
                    .filter(|voted_for| **voted_for == candidate.id)
                    .count() as u64;
                result
            })
            .collect::<Vec<_>>();
        results.sort_by(compare);
        results
    }

    /// The leading candidate, with the earliest-declared one winning ties.
    /// There is no winner until at least one vote has been cast.
    pub fn winner(&self) -> Option<CandidateResult> {
        if self.votes.is_empty() {
            return None;
        }
        self.results().into_iter().next()
    }

    fn is_candidate(&self, candidate_id: &str) -> bool {
        self.candidates.iter().any(|c| c.id == candidate_id)
    }
}
