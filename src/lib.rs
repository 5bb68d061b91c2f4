//! Village election tallying: a self-contained election session with voter
//! registration and single-vote casting, plus standalone helpers for screening
//! voter records, summing region vote trees, and building tallies without mutation.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;
pub use model::{
    candidate::{Candidate, CandidateResult},
    election::{ElectionSession, RegistrationError, VoteError, VoteReceipt},
    region::{count_votes_in_regions, RegionNode},
    tally::{tally_pure, Tally},
    validator::{create_vote_validator, Validation, VoteRules},
    voter::{Voter, VoterStatus},
};
