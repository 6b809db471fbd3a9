//! Date Matcher - optimal one-to-one pairing for dating events
//!
//! This library formulates the pairing of a participant roster as a 0/1
//! integer program, hands it to a pluggable solver and decodes the result
//! into couples and unmatched participants.

pub mod config;
pub mod core;
pub mod models;
pub mod report;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CandidatePair, Compatibility, CompatibilityTable, MatchError, Matching, Matchmaker, ParticipantCompatibility};
pub use models::{MatchReport, Participant};
pub use services::{ExhaustiveSolver, LpSolver, SolveStatus, Solver, SolverBackend};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let table = CompatibilityTable::new(2).with_similarity(0, 1, 0.5);
        let matching = Matchmaker::default().run(&table, &ExhaustiveSolver).unwrap();
        assert_eq!(matching.selected, vec![CandidatePair::new(0, 1)]);
    }
}
