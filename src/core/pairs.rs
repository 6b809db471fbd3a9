use serde::{Deserialize, Serialize};
use std::fmt;

/// Unordered pair of roster indices, stored as `(min, max)`
///
/// `first == second` is a self pair and means "left unmatched".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidatePair {
    first: usize,
    second: usize,
}

impl CandidatePair {
    /// Build the canonical pair for `a` and `b` in either order
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    /// Self pair for a participant left without a partner
    #[inline]
    pub fn unmatched(idx: usize) -> Self {
        Self {
            first: idx,
            second: idx,
        }
    }

    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    #[inline]
    pub fn second(&self) -> usize {
        self.second
    }

    #[inline]
    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }

    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.first == idx || self.second == idx
    }

    /// The partner of `idx` in this pair, `None` if `idx` is not a member
    pub fn other(&self, idx: usize) -> Option<usize> {
        if self.first == idx {
            Some(self.second)
        } else if self.second == idx {
            Some(self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for CandidatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Every pairing option for a roster of `n` participants
///
/// Real pairs come first in lexicographic order, followed by one self pair
/// per participant in index order.
#[derive(Debug, Clone)]
pub struct CandidatePairSpace {
    participant_count: usize,
    pairs: Vec<CandidatePair>,
}

impl CandidatePairSpace {
    pub fn new(participant_count: usize) -> Self {
        let mut pairs = Vec::with_capacity(Self::expected_len(participant_count));

        for i in 0..participant_count {
            for j in (i + 1)..participant_count {
                pairs.push(CandidatePair { first: i, second: j });
            }
        }
        pairs.extend((0..participant_count).map(CandidatePair::unmatched));

        Self {
            participant_count,
            pairs,
        }
    }

    /// `n(n-1)/2` real pairs plus `n` self pairs
    #[inline]
    pub fn expected_len(participant_count: usize) -> usize {
        participant_count * (participant_count + 1) / 2
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, pair: &CandidatePair) -> bool {
        pair.second < self.participant_count
    }

    pub fn iter(&self) -> impl Iterator<Item = CandidatePair> + '_ {
        self.pairs.iter().copied()
    }

    pub fn as_slice(&self) -> &[CandidatePair] {
        &self.pairs
    }
}
