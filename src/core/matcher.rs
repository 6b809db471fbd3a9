use std::path::PathBuf;
use tracing::{debug, info};

use crate::core::{
    capability::{validate_contract, Compatibility},
    constraints::{ConstraintBuilder, ConstraintSet},
    error::MatchError,
    extract::{Matching, ResultExtractor},
    model::MatchingModel,
    objective::{ObjectiveBuilder, ObjectiveWeights},
    pairs::CandidatePairSpace,
    text::title_snake,
    variables::DecisionVariableStore,
};
use crate::services::lp_writer::write_lp;
use crate::services::solver::{SolveBudget, SolveStatus, Solver};

/// Smallest roster for which a pairing makes sense
pub const MIN_PARTICIPANTS: usize = 2;

/// Everything built for one run before the solver is called
#[derive(Debug, Clone)]
pub struct BuiltModel {
    pub store: DecisionVariableStore,
    pub constraints: ConstraintSet,
    pub model: MatchingModel,
}

/// Main matching orchestrator - builds, solves and decodes the pairing model
///
/// # Pipeline Stages
/// 1. Roster and capability contract validation
/// 2. Candidate pair space and decision variables
/// 3. Objective and constraint families
/// 4. Optional LP dump, then the solver
/// 5. Status handling and result extraction
#[derive(Debug, Clone)]
pub struct Matchmaker {
    problem_name: String,
    objective: ObjectiveBuilder,
    validate_capabilities: bool,
    budget: SolveBudget,
    lp_dump_path: Option<PathBuf>,
}

impl Matchmaker {
    pub fn new(weights: ObjectiveWeights) -> Self {
        Self {
            problem_name: "date_pairing".to_string(),
            objective: ObjectiveBuilder::new(weights),
            validate_capabilities: true,
            budget: SolveBudget::unlimited(),
            lp_dump_path: None,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ObjectiveWeights::default())
    }

    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self::new(settings.matching.weights())
            .with_problem_name(&settings.matching.problem_name)
            .with_validation(settings.matching.validate_capabilities)
            .with_budget(settings.solver.budget())
            .with_lp_dump(settings.solver.lp_dump_path())
    }

    pub fn with_problem_name(mut self, name: &str) -> Self {
        self.problem_name = name.to_string();
        self
    }

    /// Disabling validation lets contract violations reach the solver
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_capabilities = enabled;
        self
    }

    pub fn with_budget(mut self, budget: SolveBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_lp_dump(mut self, path: Option<PathBuf>) -> Self {
        self.lp_dump_path = path;
        self
    }

    pub fn weights(&self) -> &ObjectiveWeights {
        self.objective.weights()
    }

    /// Build the 0/1 program for a roster without solving it
    pub fn build<C: Compatibility + ?Sized>(&self, capability: &C) -> Result<BuiltModel, MatchError> {
        let participants = capability.participant_count();
        if participants < MIN_PARTICIPANTS {
            return Err(MatchError::InvalidRoster(format!(
                "need at least {} participants, got {}",
                MIN_PARTICIPANTS, participants
            )));
        }

        if self.validate_capabilities {
            validate_contract(capability)?;
        }

        let space = CandidatePairSpace::new(participants);
        let store = DecisionVariableStore::new(&space);
        let objective = self.objective.build(&store, capability);
        let constraints = ConstraintBuilder::build(&store, capability);

        debug!(
            "Built model: {} variables, {} coverage and {} eligibility constraints",
            store.len(),
            constraints.coverage_count(),
            constraints.eligibility_count()
        );

        let model = MatchingModel {
            name: title_snake(&format!("{}_problem", self.problem_name)),
            variables: store.names().to_vec(),
            objective,
            constraints: constraints.clone().into_vec(),
        };

        Ok(BuiltModel {
            store,
            constraints,
            model,
        })
    }

    /// Run the full pipeline for one roster
    ///
    /// Any failure aborts the run; no partial matching is returned.
    pub fn run<C, S>(&self, capability: &C, solver: &S) -> Result<Matching, MatchError>
    where
        C: Compatibility + ?Sized,
        S: Solver + ?Sized,
    {
        let built = self.build(capability)?;

        if let Some(path) = &self.lp_dump_path {
            write_lp(&built.model, path)?;
            debug!("Wrote LP dump to {}", path.display());
        }

        let outcome = solver.solve(&built.model, &self.budget)?;
        info!("Status: {} ({})", outcome.status, solver.name());

        match outcome.status {
            SolveStatus::Optimal | SolveStatus::Feasible => {}
            SolveStatus::Infeasible => {
                return Err(MatchError::SolverInfeasible {
                    participants: capability.participant_count(),
                    coverage_constraints: built.constraints.coverage_count(),
                    eligibility_constraints: built.constraints.eligibility_count(),
                })
            }
            status => return Err(MatchError::SolverNotOptimal { status }),
        }

        let matching = ResultExtractor::extract(&built.store, &built.model.objective, &outcome)?;

        info!("Mean Score per person: {}", matching.mean_score_per_participant());

        Ok(matching)
    }
}

impl Default for Matchmaker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
