use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::services::solver::SolveStatus;

/// A matched couple as shown in reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub first: usize,
    pub second: usize,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "secondName")]
    pub second_name: String,
    pub similarity: f64,
}

/// Serializable summary of one matching run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    #[serde(rename = "runId")]
    pub run_id: uuid::Uuid,
    pub status: SolveStatus,
    pub solver: String,
    #[serde(rename = "objectiveValue")]
    pub objective_value: f64,
    #[serde(rename = "meanScorePerPerson")]
    pub mean_score_per_person: f64,
    /// Similarity of every selected pair, self pairs included, rounded
    pub scores: Vec<f64>,
    #[serde(rename = "pairsByDay")]
    pub pairs_by_day: BTreeMap<String, Vec<PairSummary>>,
    pub unmatched: Vec<usize>,
    #[serde(rename = "matchedCount")]
    pub matched_count: usize,
    #[serde(rename = "unmatchedCount")]
    pub unmatched_count: usize,
    #[serde(rename = "genderPairs")]
    pub gender_pairs: BTreeMap<String, usize>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error summary printed instead of a report when a run aborts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
