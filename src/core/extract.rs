use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::core::capability::Compatibility;
use crate::core::error::MatchError;
use crate::core::model::Objective;
use crate::core::pairs::CandidatePair;
use crate::core::similarity::round_to;
use crate::core::text::title_case;
use crate::core::variables::DecisionVariableStore;
use crate::services::solver::{SolveOutcome, SolveStatus, SolverError};

/// Solver values above this count as selected; binaries come back as floats
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Decoded solution: one selected pair or self pair per participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matching {
    pub status: SolveStatus,
    pub participant_count: usize,
    /// Selected pairs in candidate-space order, self pairs included
    pub selected: Vec<CandidatePair>,
    pub objective_value: f64,
}

impl Matching {
    /// Matched couples, self pairs excluded
    pub fn pairs(&self) -> impl Iterator<Item = CandidatePair> + '_ {
        self.selected.iter().copied().filter(|p| !p.is_self_pair())
    }

    /// Indices of participants left without a partner, ascending
    pub fn unmatched(&self) -> Vec<usize> {
        let mut unmatched: Vec<usize> = self
            .selected
            .iter()
            .filter(|p| p.is_self_pair())
            .map(|p| p.first())
            .collect();
        unmatched.sort_unstable();
        unmatched
    }

    pub fn pair_count(&self) -> usize {
        self.pairs().count()
    }

    pub fn matched_participants(&self) -> usize {
        2 * self.pair_count()
    }

    pub fn unmatched_participants(&self) -> usize {
        self.participant_count - self.matched_participants()
    }

    /// Every pair's score counts for both of its members
    pub fn mean_score_per_participant(&self) -> f64 {
        if self.participant_count == 0 {
            return 0.0;
        }
        2.0 * self.objective_value / self.participant_count as f64
    }

    /// Partner of `idx`, or `idx` itself when unmatched
    pub fn partner_of(&self, idx: usize) -> Option<usize> {
        self.selected.iter().find_map(|p| p.other(idx))
    }

    /// Similarity of every selected pair, self pairs included, rounded for display
    pub fn pair_scores<C: Compatibility + ?Sized>(&self, capability: &C, decimals: u32) -> Vec<f64> {
        self.selected
            .iter()
            .map(|p| round_to(capability.similarity(p.first(), p.second()), decimals))
            .collect()
    }

    /// Matched couples grouped by a categorical attribute of their members
    ///
    /// A couple's category is the shared value, or the non-wildcard side's
    /// value. If both sides hold different non-wildcard values the lower
    /// index wins.
    pub fn breakdown_by_category<'a, F>(
        &self,
        category_of: F,
        wildcard: &str,
    ) -> BTreeMap<String, Vec<CandidatePair>>
    where
        F: Fn(usize) -> &'a str,
    {
        let mut groups: BTreeMap<String, Vec<CandidatePair>> = BTreeMap::new();
        for pair in self.pairs() {
            let category = resolve_category(
                pair,
                category_of(pair.first()),
                category_of(pair.second()),
                wildcard,
            );
            groups.entry(category).or_default().push(pair);
        }
        groups
    }

    /// Matched couples counted per unordered pair of attribute values, e.g. `Man/Woman`
    pub fn breakdown_by_category_pair<'a, F>(&self, attribute_of: F) -> BTreeMap<String, usize>
    where
        F: Fn(usize) -> &'a str,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for pair in self.pairs() {
            let a = title_case(attribute_of(pair.first()));
            let b = title_case(attribute_of(pair.second()));
            let key = if a <= b {
                format!("{}/{}", a, b)
            } else {
                format!("{}/{}", b, a)
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }
}

fn resolve_category(pair: CandidatePair, first: &str, second: &str, wildcard: &str) -> String {
    // Day values are matched case-insensitively, so group them the same way
    let (first, second) = (title_case(first.trim()), title_case(second.trim()));

    if first == second || second.eq_ignore_ascii_case(wildcard) {
        return first;
    }
    if first.eq_ignore_ascii_case(wildcard) {
        return second;
    }

    warn!(
        "Pair {} disagrees on category ('{}' vs '{}'), using '{}'",
        pair, first, second, first
    );
    first
}

/// Turns raw solver values back into a verified [`Matching`]
pub struct ResultExtractor;

impl ResultExtractor {
    /// Decode the selected pairs and check that they partition the roster
    pub fn extract(
        store: &DecisionVariableStore,
        objective: &Objective,
        outcome: &SolveOutcome,
    ) -> Result<Matching, MatchError> {
        if outcome.values.len() != store.len() {
            return Err(MatchError::Solver(SolverError::ValueCountMismatch {
                expected: store.len(),
                returned: outcome.values.len(),
            }));
        }

        let mut selected = Vec::new();
        let mut chosen = vec![0.0; store.len()];
        for (var, a, b) in store.pairs_and_participants() {
            if outcome.values[var.index()] > SELECTION_THRESHOLD {
                selected.push(CandidatePair::new(a, b));
                chosen[var.index()] = 1.0;
            }
        }

        let mut occurrences = vec![0usize; store.participant_count()];
        for pair in &selected {
            occurrences[pair.first()] += 1;
            if !pair.is_self_pair() {
                occurrences[pair.second()] += 1;
            }
        }
        if let Some((participant, &count)) = occurrences.iter().enumerate().find(|(_, c)| **c != 1) {
            return Err(MatchError::ResultInconsistency {
                participant,
                occurrences: count,
            });
        }

        Ok(Matching {
            status: outcome.status,
            participant_count: store.participant_count(),
            selected,
            objective_value: objective.evaluate(&chosen),
        })
    }
}
