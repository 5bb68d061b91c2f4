use serde::{Deserialize, Serialize};

/// A node in a hierarchy of voting areas, e.g. state, district, village.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionNode {
    pub name: String,
    /// Votes counted directly in this region, excluding sub-regions.
    pub votes: u64,
    #[serde(default)]
    pub sub_regions: Vec<RegionNode>,
}

impl RegionNode {
    pub fn new(name: impl Into<String>, votes: u64, sub_regions: Vec<RegionNode>) -> Self {
        Self {
            name: name.into(),
            votes,
            sub_regions,
        }
    }

    /// Votes in this region and everything beneath it. Saturates at `u64::MAX`.
    pub fn total_votes(&self) -> u64 {
        self.sub_regions
            .iter()
            .map(RegionNode::total_votes)
            .fold(self.votes, u64::saturating_add)
    }
}

/// Total votes across a region tree. An absent root counts as zero.
pub fn count_votes_in_regions(root: Option<&RegionNode>) -> u64 {
    root.map(RegionNode::total_votes).unwrap_or(0)
}
