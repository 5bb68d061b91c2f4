use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Vote counts keyed by candidate ID. Read-only once built: updating a tally
/// always produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally(BTreeMap<String, u64>);

impl Deref for Tally {
    type Target = BTreeMap<String, u64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Renders as `C1=1, C2=2`, in candidate ID order.
impl Display for Tally {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (id, count)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}={count}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Tally {
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A copy of `current` with one more vote for `candidate_id`.
///
/// An empty candidate ID is not a vote for anyone and yields an empty tally.
pub fn tally_pure(current: &Tally, candidate_id: &str) -> Tally {
    if candidate_id.is_empty() {
        return Tally::default();
    }
    let mut next = current.clone();
    *next.0.entry(candidate_id.to_string()).or_insert(0) += 1;
    next
}
