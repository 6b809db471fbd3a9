use std::collections::HashMap;

use crate::core::error::MatchError;
use crate::core::model::VariableId;
use crate::core::pairs::{CandidatePair, CandidatePairSpace};

/// One binary decision variable per candidate pair
///
/// Built once from a [`CandidatePairSpace`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct DecisionVariableStore {
    pairs: Vec<CandidatePair>,
    names: Vec<String>,
    by_pair: HashMap<CandidatePair, VariableId>,
    by_participant: Vec<Vec<VariableId>>,
}

impl DecisionVariableStore {
    pub fn new(space: &CandidatePairSpace) -> Self {
        let n = space.participant_count();
        let mut by_pair = HashMap::with_capacity(space.len());
        let mut by_participant = vec![Vec::with_capacity(n); n];
        let mut names = Vec::with_capacity(space.len());

        for (idx, pair) in space.iter().enumerate() {
            let var = VariableId(idx);
            by_pair.insert(pair, var);
            names.push(variable_name(&pair));

            by_participant[pair.first()].push(var);
            if !pair.is_self_pair() {
                by_participant[pair.second()].push(var);
            }
        }

        Self {
            pairs: space.as_slice().to_vec(),
            names,
            by_pair,
            by_participant,
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn participant_count(&self) -> usize {
        self.by_participant.len()
    }

    /// Exact lookup of the variable modelling `pair`
    pub fn variable_for(&self, pair: &CandidatePair) -> Result<VariableId, MatchError> {
        self.by_pair
            .get(pair)
            .copied()
            .ok_or(MatchError::KeyNotFound(*pair))
    }

    /// Every variable whose pair contains `idx`: the real pairs plus its self pair
    pub fn variables_touching(&self, idx: usize) -> &[VariableId] {
        self.by_participant
            .get(idx)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn pair_of(&self, var: VariableId) -> Option<CandidatePair> {
        self.pairs.get(var.index()).copied()
    }

    pub fn name_of(&self, var: VariableId) -> Option<&str> {
        self.names.get(var.index()).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `(variable, i, j)` for every candidate pair, in candidate-space order
    pub fn pairs_and_participants(&self) -> impl Iterator<Item = (VariableId, usize, usize)> + '_ {
        self.pairs
            .iter()
            .enumerate()
            .map(|(idx, pair)| (VariableId(idx), pair.first(), pair.second()))
    }
}

fn variable_name(pair: &CandidatePair) -> String {
    format!("match_{}_{}", pair.first(), pair.second())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(n: usize) -> DecisionVariableStore {
        DecisionVariableStore::new(&CandidatePairSpace::new(n))
    }

    #[test]
    fn test_one_variable_per_pair() {
        let s = store(6);
        assert_eq!(s.len(), 21);
        assert_eq!(s.participant_count(), 6);
    }

    #[test]
    fn test_lookup_is_order_independent() {
        let s = store(4);
        let a = s.variable_for(&CandidatePair::new(1, 3)).unwrap();
        let b = s.variable_for(&CandidatePair::new(3, 1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(s.pair_of(a), Some(CandidatePair::new(1, 3)));
        assert_eq!(s.name_of(a), Some("match_1_3"));
    }

    #[test]
    fn test_missing_pair_is_key_not_found() {
        let s = store(3);
        let err = s.variable_for(&CandidatePair::new(0, 3)).unwrap_err();
        assert!(matches!(err, MatchError::KeyNotFound(p) if p == CandidatePair::new(0, 3)));
    }

    #[test]
    fn test_variables_touching_has_n_entries() {
        let n = 5;
        let s = store(n);
        for idx in 0..n {
            let touching = s.variables_touching(idx);
            assert_eq!(touching.len(), n);
            for var in touching {
                assert!(s.pair_of(*var).unwrap().contains(idx));
            }
            let self_var = s.variable_for(&CandidatePair::unmatched(idx)).unwrap();
            assert!(touching.contains(&self_var));
        }
        assert!(s.variables_touching(n).is_empty());
    }

    #[test]
    fn test_pairs_and_participants_is_restartable() {
        let s = store(4);
        let first: Vec<_> = s.pairs_and_participants().collect();
        let second: Vec<_> = s.pairs_and_participants().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
        assert_eq!(first[0], (VariableId(0), 0, 1));
        assert_eq!(first[9], (VariableId(9), 3, 3));
    }
}
