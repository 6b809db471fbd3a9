use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::core::model::MatchingModel;

/// Errors raised by a solver backend itself, as opposed to a model outcome
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Backend returned {returned} values for {expected} variables")]
    ValueCountMismatch { expected: usize, returned: usize },
}

/// Outcome status of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    /// Proven optimal
    Optimal,
    /// Best assignment found before the budget ran out
    Feasible,
    Infeasible,
    Unbounded,
    NotSolved,
}

impl SolveStatus {
    /// Whether the assignment may be decoded into a matching
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Feasible => "Feasible",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::NotSolved => "Not Solved",
        };
        write!(f, "{}", label)
    }
}

/// Limits handed to a backend so a solve degrades to "best found so far"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveBudget {
    pub time_limit: Option<Duration>,
    pub node_limit: Option<u64>,
}

impl SolveBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn is_unlimited(&self) -> bool {
        self.time_limit.is_none() && self.node_limit.is_none()
    }
}

/// Status plus one value per model variable
///
/// `values` is empty unless `status.has_solution()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub values: Vec<f64>,
}

impl SolveOutcome {
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
        }
    }
}

/// Black-box 0/1 optimizer
///
/// Model construction never depends on which implementation runs, so
/// backends can be swapped freely (an LP-based one for real rosters, the
/// exhaustive one for small rosters and tests).
pub trait Solver {
    fn name(&self) -> &'static str;

    fn solve(&self, model: &MatchingModel, budget: &SolveBudget) -> Result<SolveOutcome, SolverError>;
}

/// Backend selection used by configuration and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverBackend {
    #[default]
    Lp,
    Exhaustive,
}

impl SolverBackend {
    pub fn build(self) -> Box<dyn Solver> {
        match self {
            SolverBackend::Lp => Box::new(crate::services::lp::LpSolver),
            SolverBackend::Exhaustive => Box::new(crate::services::exhaustive::ExhaustiveSolver),
        }
    }
}

impl std::str::FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lp" | "microlp" => Ok(SolverBackend::Lp),
            "exhaustive" | "brute-force" => Ok(SolverBackend::Exhaustive),
            other => Err(format!("unknown solver backend '{}'", other)),
        }
    }
}

/// Reject outcomes whose value vector does not line up with the model
pub(crate) fn check_value_count(model: &MatchingModel, outcome: &SolveOutcome) -> Result<(), SolverError> {
    if outcome.status.has_solution() && outcome.values.len() != model.variable_count() {
        return Err(SolverError::ValueCountMismatch {
            expected: model.variable_count(),
            returned: outcome.values.len(),
        });
    }
    Ok(())
}
