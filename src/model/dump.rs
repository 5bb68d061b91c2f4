use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::model::{
    candidate::{Candidate, CandidateResult},
    election::{ElectionSession, VoteReceipt},
    region::{count_votes_in_regions, RegionNode},
    tally::{tally_pure, Tally},
    validator::create_vote_validator,
};

/// A complete election recorded as JSON: who stood, who turned up, and how they voted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionDump {
    pub candidates: Vec<Candidate>,
    /// Voter records, kept loose so that one bad entry does not spoil the file.
    #[serde(default)]
    pub voters: Vec<Value>,
    /// Votes in the order they were cast.
    #[serde(default)]
    pub votes: Vec<VoteReceipt>,
    /// Optional per-region vote counts.
    #[serde(default)]
    pub regions: Option<RegionNode>,
    /// Optional screening rules for voter records.
    #[serde(default)]
    pub rules: Option<Value>,
}

/// A voter record or vote that was turned away, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The voter ID, if one could be read.
    pub voter_id: Option<String>,
    pub reason: String,
}

/// Everything learned by replaying a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionReport {
    pub registered: usize,
    pub rejected_voters: Vec<Rejection>,
    pub rejected_votes: Vec<Rejection>,
    /// Per-candidate counts, built from the accepted votes.
    pub tally: Tally,
    /// Results in default order.
    pub results: Vec<CandidateResult>,
    pub winner: Option<CandidateResult>,
    pub region_total: u64,
}

impl ElectionDump {
    /// Load a dump from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading election dump from {}", path.display());
        let file = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(file)?)
    }

    /// Run the recorded election through a fresh session.
    ///
    /// Voter records are screened with the dump's own rules, falling back to
    /// `default_rules`; with neither, only the session's built-in checks apply.
    pub fn replay(&self, default_rules: Option<&Value>) -> (ElectionSession, ElectionReport) {
        let mut election = ElectionSession::new(self.candidates.iter().cloned());
        let validator = self
            .rules
            .as_ref()
            .or(default_rules)
            .map(create_vote_validator);

        let mut rejected_voters = Vec::new();
        for record in &self.voters {
            let voter_id = record
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string);
            if let Some(validate) = &validator {
                let validation = validate(record);
                if !validation.valid {
                    rejected_voters.push(Rejection {
                        voter_id,
                        reason: validation.reason,
                    });
                    continue;
                }
            }
            if let Err(err) = election.try_register_voter_record(record) {
                rejected_voters.push(Rejection {
                    voter_id,
                    reason: err.to_string(),
                });
            }
        }

        let mut tally = Tally::default();
        let mut rejected_votes = Vec::new();
        for vote in &self.votes {
            let outcome = election.cast_vote_with(
                &vote.voter_id,
                &vote.candidate_id,
                |receipt| Ok(tally_pure(&tally, &receipt.candidate_id)),
                |err| {
                    Err(Rejection {
                        voter_id: Some(vote.voter_id.clone()),
                        reason: err.to_string(),
                    })
                },
            );
            match outcome {
                Ok(next) => tally = next,
                Err(rejection) => {
                    warn!(
                        "Vote from '{}' rejected: {}",
                        vote.voter_id, rejection.reason
                    );
                    rejected_votes.push(rejection);
                }
            }
        }

        let report = ElectionReport {
            registered: election.registered_count(),
            rejected_voters,
            rejected_votes,
            tally,
            results: election.results(),
            winner: election.winner(),
            region_total: count_votes_in_regions(self.regions.as_ref()),
        };
        info!(
            "Replayed election: {} registered, {} votes accepted",
            report.registered,
            election.total_votes()
        );
        (election, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::model::validator::{AGE_BELOW_MINIMUM, INVALID_RULES, MISSING_FIELDS};

    fn dump() -> ElectionDump {
        serde_json::from_value(json!({
            "candidates": [
                {"id": "C1", "name": "Sarpanch Ram", "party": "Janata"},
                {"id": "C2", "name": "Pradhan Sita", "party": "Lok"}
            ],
            "voters": [
                {"id": "V1", "name": "Mohan", "age": 25},
                {"id": "V2", "name": "Radha", "age": 41},
                {"id": "V3", "name": "Chhotu", "age": 12},
                {"id": "V4", "name": "Kamla"},
                {"id": "V1", "name": "Mohan again", "age": 25}
            ],
            "votes": [
                {"voterId": "V1", "candidateId": "C2"},
                {"voterId": "V2", "candidateId": "C2"},
                {"voterId": "V1", "candidateId": "C1"},
                {"voterId": "V3", "candidateId": "C1"},
                {"voterId": "V2", "candidateId": "C9"}
            ],
            "regions": {
                "name": "Gram Panchayat",
                "votes": 0,
                "subRegions": [{"name": "Ward 1", "votes": 2}]
            }
        }))
        .unwrap()
    }

    #[test]
    fn replay_without_rules() {
        log4rs_test_utils::test_logging::init_logging_once_for(
            ["panchayat_election"],
            None,
            None,
        );

        let (election, report) = dump().replay(None);
        assert_eq!(report.registered, 2);
        assert_eq!(election.total_votes(), 2);
        assert_eq!(
            report
                .rejected_voters
                .iter()
                .map(|r| r.reason.as_str())
                .collect::<Vec<_>>(),
            vec![
                "voter 'V3' is not eligible to register",
                "malformed voter record: missing field `age`",
                "voter 'V1' is already registered",
            ]
        );
        assert_eq!(report.rejected_votes.len(), 3);
        assert_eq!(report.tally, Tally::from_iter([("C2", 2)]));
        assert_eq!(report.winner.unwrap().id, "C2");
        assert_eq!(
            report
                .results
                .iter()
                .map(|r| (r.id.as_str(), r.votes))
                .collect::<Vec<_>>(),
            vec![("C2", 2), ("C1", 0)]
        );
        assert_eq!(report.region_total, 2);
        assert_eq!(
            report.rejected_votes[0].reason,
            "voter 'V1' has already voted"
        );
    }

    #[test]
    fn replay_with_rules() {
        let mut dump = dump();
        dump.rules = Some(json!({"minAge": 18, "requiredFields": ["id", "name", "age"]}));
        let (_, report) = dump.replay(None);

        assert_eq!(
            report.rejected_voters,
            vec![
                Rejection {
                    voter_id: Some("V3".into()),
                    reason: AGE_BELOW_MINIMUM.into(),
                },
                Rejection {
                    voter_id: Some("V4".into()),
                    reason: MISSING_FIELDS.into(),
                },
                Rejection {
                    voter_id: Some("V1".into()),
                    reason: "voter 'V1' is already registered".into(),
                },
            ]
        );
    }

    #[test]
    fn default_rules_only_used_as_fallback() {
        let strict = json!({"minAge": 30, "requiredFields": []});
        let (_, report) = dump().replay(Some(&strict));
        // Only Radha is old enough.
        assert_eq!(report.registered, 1);

        let mut dump = dump();
        dump.rules = Some(json!("not rules"));
        let (_, report) = dump.replay(Some(&strict));
        assert_eq!(report.registered, 0);
        assert!(report
            .rejected_voters
            .iter()
            .all(|r| r.reason == INVALID_RULES));
        assert_eq!(report.winner, None);
    }
}
