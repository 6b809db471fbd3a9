//! Participant capability contract consumed by the model builders.
//!
//! The core never looks inside a participant. It only asks three
//! symmetric questions about a pair of roster indices.

use crate::core::error::MatchError;
use crate::core::pairs::{CandidatePair, CandidatePairSpace};

/// Similarity of a participant with itself: being unmatched earns nothing
pub const SELF_SIMILARITY: f64 = 0.0;

/// Preference of a participant for itself: being unmatched is never penalized
pub const SELF_PREFERENCE: f64 = 1.0;

/// Pairability of a participant with itself: anyone may be left unmatched
pub const SELF_PAIRABLE: f64 = 1.0;

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Pairwise compatibility of the participants on a roster
///
/// All three functions must be symmetric. On the diagonal they must return
/// [`SELF_SIMILARITY`], [`SELF_PREFERENCE`] and [`SELF_PAIRABLE`].
pub trait Compatibility {
    fn participant_count(&self) -> usize;

    /// Reward for pairing `a` with `b`, any finite real
    fn similarity(&self, a: usize, b: usize) -> f64;

    /// Preference indicator in `[0, 1]`
    fn preferred(&self, a: usize, b: usize) -> f64;

    /// Eligibility indicator, exactly 0 or 1
    fn pairable(&self, a: usize, b: usize) -> f64;
}

/// Check every candidate pair against the capability contract
///
/// Runs before model construction so that a broken capability is reported
/// by name instead of as an opaque infeasible model.
pub fn validate_contract<C: Compatibility + ?Sized>(capability: &C) -> Result<(), MatchError> {
    let space = CandidatePairSpace::new(capability.participant_count());

    for pair in space.iter() {
        let (a, b) = (pair.first(), pair.second());

        let similarity = capability.similarity(a, b);
        if !similarity.is_finite() {
            return Err(violation("similarity", pair, format!("{} is not finite", similarity)));
        }

        let preferred = capability.preferred(a, b);
        if !(0.0..=1.0).contains(&preferred) {
            return Err(violation("preferred", pair, format!("{} is outside [0, 1]", preferred)));
        }

        let pairable = capability.pairable(a, b);
        if pairable != 0.0 && pairable != 1.0 {
            return Err(violation("pairable", pair, format!("{} is not 0 or 1", pairable)));
        }

        if pair.is_self_pair() {
            check_convention("similarity", pair, similarity, SELF_SIMILARITY)?;
            check_convention("preferred", pair, preferred, SELF_PREFERENCE)?;
            check_convention("pairable", pair, pairable, SELF_PAIRABLE)?;
        } else {
            check_symmetric("similarity", pair, similarity, capability.similarity(b, a))?;
            check_symmetric("preferred", pair, preferred, capability.preferred(b, a))?;
            check_symmetric("pairable", pair, pairable, capability.pairable(b, a))?;
        }
    }

    Ok(())
}

fn check_convention(
    function: &'static str,
    pair: CandidatePair,
    value: f64,
    expected: f64,
) -> Result<(), MatchError> {
    if value != expected {
        return Err(violation(
            function,
            pair,
            format!("self pair must be {}, got {}", expected, value),
        ));
    }
    Ok(())
}

fn check_symmetric(
    function: &'static str,
    pair: CandidatePair,
    forward: f64,
    backward: f64,
) -> Result<(), MatchError> {
    if (forward - backward).abs() > SYMMETRY_TOLERANCE {
        return Err(violation(
            function,
            pair,
            format!("not symmetric ({} vs {})", forward, backward),
        ));
    }
    Ok(())
}

fn violation(function: &'static str, pair: CandidatePair, detail: String) -> MatchError {
    MatchError::CapabilityContractViolation {
        function,
        pair,
        detail,
    }
}

/// Dense tables of similarity, preference and pairability
///
/// Starts with zero similarity, full preference and everyone pairable;
/// setters keep the tables symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityTable {
    size: usize,
    similarity: Vec<f64>,
    preferred: Vec<f64>,
    pairable: Vec<f64>,
}

impl CompatibilityTable {
    pub fn new(size: usize) -> Self {
        let mut similarity = vec![0.0; size * size];
        let mut preferred = vec![1.0; size * size];
        let mut pairable = vec![1.0; size * size];
        for i in 0..size {
            similarity[i * size + i] = SELF_SIMILARITY;
            preferred[i * size + i] = SELF_PREFERENCE;
            pairable[i * size + i] = SELF_PAIRABLE;
        }
        Self {
            size,
            similarity,
            preferred,
            pairable,
        }
    }

    /// Build from a full similarity matrix; rows must be square
    pub fn from_similarity_matrix(matrix: &[Vec<f64>]) -> Self {
        let mut table = Self::new(matrix.len());
        for (i, row) in matrix.iter().enumerate() {
            for (j, value) in row.iter().enumerate().take(matrix.len()) {
                table.similarity[i * table.size + j] = *value;
            }
        }
        table
    }

    pub fn with_similarity(mut self, a: usize, b: usize, value: f64) -> Self {
        Self::set(&mut self.similarity, self.size, a, b, value);
        self
    }

    pub fn with_preference(mut self, a: usize, b: usize, value: f64) -> Self {
        Self::set(&mut self.preferred, self.size, a, b, value);
        self
    }

    pub fn with_pairable(mut self, a: usize, b: usize, value: f64) -> Self {
        Self::set(&mut self.pairable, self.size, a, b, value);
        self
    }

    /// Mark `a` and `b` as never to be paired
    pub fn forbid(self, a: usize, b: usize) -> Self {
        self.with_pairable(a, b, 0.0)
    }

    fn set(table: &mut [f64], size: usize, a: usize, b: usize, value: f64) {
        table[a * size + b] = value;
        table[b * size + a] = value;
    }
}

impl Compatibility for CompatibilityTable {
    fn participant_count(&self) -> usize {
        self.size
    }

    fn similarity(&self, a: usize, b: usize) -> f64 {
        self.similarity[a * self.size + b]
    }

    fn preferred(&self, a: usize, b: usize) -> f64 {
        self.preferred[a * self.size + b]
    }

    fn pairable(&self, a: usize, b: usize) -> f64 {
        self.pairable[a * self.size + b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_satisfies_contract() {
        let table = CompatibilityTable::new(4).with_similarity(0, 1, 0.8).forbid(2, 3);
        assert!(validate_contract(&table).is_ok());
        assert_eq!(table.similarity(1, 0), 0.8);
        assert_eq!(table.pairable(3, 2), 0.0);
    }

    #[test]
    fn test_self_pairable_violation_detected() {
        let table = CompatibilityTable::new(3).with_pairable(1, 1, 0.0);
        let err = validate_contract(&table).unwrap_err();
        match err {
            MatchError::CapabilityContractViolation { function, pair, .. } => {
                assert_eq!(function, "pairable");
                assert_eq!(pair, CandidatePair::unmatched(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_out_of_domain_preference_detected() {
        let table = CompatibilityTable::new(3).with_preference(0, 2, 1.5);
        assert!(matches!(
            validate_contract(&table),
            Err(MatchError::CapabilityContractViolation { function: "preferred", .. })
        ));
    }

    #[test]
    fn test_fractional_pairable_detected() {
        let table = CompatibilityTable::new(2).with_pairable(0, 1, 0.5);
        assert!(matches!(
            validate_contract(&table),
            Err(MatchError::CapabilityContractViolation { function: "pairable", .. })
        ));
    }

    #[test]
    fn test_nan_similarity_detected() {
        let table = CompatibilityTable::new(2).with_similarity(0, 1, f64::NAN);
        assert!(validate_contract(&table).is_err());
    }

    #[test]
    fn test_self_similarity_must_be_zero() {
        let table = CompatibilityTable::from_similarity_matrix(&[
            vec![1.0, 0.5],
            vec![0.5, 0.0],
        ]);
        assert!(matches!(
            validate_contract(&table),
            Err(MatchError::CapabilityContractViolation { function: "similarity", .. })
        ));
    }

    struct Lopsided;

    impl Compatibility for Lopsided {
        fn participant_count(&self) -> usize {
            2
        }
        fn similarity(&self, a: usize, b: usize) -> f64 {
            if a == b { 0.0 } else if a < b { 0.9 } else { 0.1 }
        }
        fn preferred(&self, _a: usize, _b: usize) -> f64 {
            1.0
        }
        fn pairable(&self, _a: usize, _b: usize) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_asymmetry_detected() {
        assert!(matches!(
            validate_contract(&Lopsided),
            Err(MatchError::CapabilityContractViolation { function: "similarity", .. })
        ));
    }
}
