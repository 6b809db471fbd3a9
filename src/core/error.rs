use thiserror::Error;

use crate::core::pairs::CandidatePair;
use crate::services::solver::{SolveStatus, SolverError};

/// Errors that abort a matching run
///
/// None of these are retried: rebuilding the same model from the same
/// roster cannot change the outcome.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Capability contract violated by {function}{pair}: {detail}")]
    CapabilityContractViolation {
        function: &'static str,
        pair: CandidatePair,
        detail: String,
    },

    #[error("No decision variable for pair {0}")]
    KeyNotFound(CandidatePair),

    #[error(
        "No solution exists under current eligibility rules \
         ({participants} participants, {coverage_constraints} coverage and \
         {eligibility_constraints} eligibility constraints); check that every \
         participant may be left unmatched"
    )]
    SolverInfeasible {
        participants: usize,
        coverage_constraints: usize,
        eligibility_constraints: usize,
    },

    #[error("Solver could not find or prove an optimal solution within budget (status: {status})")]
    SolverNotOptimal { status: SolveStatus },

    #[error("Internal consistency fault: participant {participant} appears in {occurrences} selected pairs")]
    ResultInconsistency {
        participant: usize,
        occurrences: usize,
    },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Failed to write LP dump: {0}")]
    LpDump(#[from] std::io::Error),
}

impl MatchError {
    /// Short classification used for the user-facing status line
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::InvalidRoster(_) => "invalid roster",
            MatchError::CapabilityContractViolation { .. } => "capability contract violation",
            MatchError::SolverInfeasible { .. } => "infeasible",
            MatchError::SolverNotOptimal { .. } => "not solved",
            MatchError::ResultInconsistency { .. } | MatchError::KeyNotFound(_) => {
                "internal consistency fault"
            }
            MatchError::Solver(_) => "solver failure",
            MatchError::LpDump(_) => "io failure",
        }
    }
}
