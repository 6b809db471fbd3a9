//! Plain-text and JSON presentation of a finished run.

use std::fmt::Write as _;

use crate::config::ReportingSettings;
use crate::core::capability::Compatibility;
use crate::core::error::MatchError;
use crate::core::extract::Matching;
use crate::core::filters::ParticipantCompatibility;
use crate::core::similarity::round_to;
use crate::models::{MatchReport, PairSummary};

/// Summarize a matching over the participant roster it was computed for
///
/// Fails when `capability` covers a different roster size than `matching`.
pub fn build_report(
    matching: &Matching,
    capability: &ParticipantCompatibility<'_>,
    settings: &ReportingSettings,
    solver: &str,
) -> Result<MatchReport, MatchError> {
    let participants = capability.participants();
    if participants.len() != matching.participant_count {
        return Err(MatchError::InvalidRoster(format!(
            "report roster has {} participants, matching was computed for {}",
            participants.len(),
            matching.participant_count
        )));
    }
    let decimals = settings.score_decimals;

    let pairs_by_day = matching
        .breakdown_by_category(|i| participants[i].day_choice.as_str(), capability.wildcard())
        .into_iter()
        .map(|(day, pairs)| {
            let summaries = pairs
                .into_iter()
                .map(|p| PairSummary {
                    first: p.first(),
                    second: p.second(),
                    first_name: participants[p.first()].name.clone(),
                    second_name: participants[p.second()].name.clone(),
                    similarity: round_to(capability.similarity(p.first(), p.second()), decimals),
                })
                .collect();
            (day, summaries)
        })
        .collect();

    Ok(MatchReport {
        run_id: uuid::Uuid::new_v4(),
        status: matching.status,
        solver: solver.to_string(),
        objective_value: matching.objective_value,
        mean_score_per_person: matching.mean_score_per_participant(),
        scores: matching.pair_scores(capability, decimals),
        pairs_by_day,
        unmatched: matching.unmatched(),
        matched_count: matching.matched_participants(),
        unmatched_count: matching.unmatched_participants(),
        gender_pairs: matching.breakdown_by_category_pair(|i| participants[i].gender.as_str()),
        timestamp: chrono::Utc::now(),
    })
}

/// Render the console summary of a run
pub fn render_text(report: &MatchReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Status: {}", report.status);
    let _ = writeln!(out, "Mean Score per person: {:.4}", report.mean_score_per_person);
    let scores: Vec<String> = report.scores.iter().map(|s| s.to_string()).collect();
    let _ = writeln!(out, "Scores: [{}]", scores.join(", "));
    out.push('\n');

    for (day, pairs) in &report.pairs_by_day {
        let _ = writeln!(out, "------ {} ------ [{} pairs]", day, pairs.len());
        for pair in pairs {
            let _ = writeln!(
                out,
                "{} - {} ({} & {}, {})",
                pair.first, pair.second, pair.first_name, pair.second_name, pair.similarity
            );
        }
        out.push('\n');
    }

    let unmatched: Vec<String> = report.unmatched.iter().map(|i| i.to_string()).collect();
    let _ = writeln!(out, "Unmatched: [{}]", unmatched.join(", "));
    let _ = writeln!(out, "Number of matches: {}", report.matched_count);
    let _ = writeln!(out, "Number of people not matched: {}", report.unmatched_count);

    for (genders, count) in &report.gender_pairs {
        let _ = writeln!(out, "{}: {}", genders, count);
    }

    out
}

/// One-line status for an aborted run
///
/// Keeps "no solution under the eligibility rules", "solver ran out of
/// budget" and "internal fault" clearly apart.
pub fn failure_line(error: &MatchError) -> String {
    match error {
        MatchError::SolverInfeasible { .. } => {
            format!("Status: Infeasible - {}", error)
        }
        MatchError::SolverNotOptimal { status } => {
            format!("Status: {} - {}", status, error)
        }
        MatchError::ResultInconsistency { .. } | MatchError::KeyNotFound(_) => {
            format!("Status: Internal fault - {}", error)
        }
        other => format!("Status: Aborted ({}) - {}", other.kind(), other),
    }
}
