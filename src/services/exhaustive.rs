//! Exhaustive 0/1 search using branch-and-bound.
//!
//! Variables are fixed in model order, trying 1 before 0 so good
//! assignments are found early. A branch is pruned when some constraint can
//! no longer be satisfied by any completion, or when the optimistic
//! objective bound cannot beat the best assignment found so far.
//!
//! Intended for small rosters and as a reference oracle; the node and time
//! budgets turn it into a "best found so far" search on larger inputs.

use std::time::Instant;
use tracing::{debug, trace};

use crate::core::model::{MatchingModel, Relation, FEASIBILITY_TOLERANCE};
use crate::services::solver::{SolveBudget, SolveOutcome, SolveStatus, Solver, SolverError};

/// The clock is only read every this many nodes
const TIME_CHECK_INTERVAL: u64 = 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSolver;

impl Solver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, model: &MatchingModel, budget: &SolveBudget) -> Result<SolveOutcome, SolverError> {
        let mut search = Search::new(model, budget);
        search.run();

        debug!(
            "Exhaustive search visited {} nodes (budget exhausted: {})",
            search.nodes, search.exhausted
        );

        let outcome = match (search.best, search.exhausted) {
            (Some((_, values)), false) => SolveOutcome {
                status: SolveStatus::Optimal,
                values,
            },
            (Some((_, values)), true) => SolveOutcome {
                status: SolveStatus::Feasible,
                values,
            },
            (None, false) => SolveOutcome::without_solution(SolveStatus::Infeasible),
            (None, true) => SolveOutcome::without_solution(SolveStatus::NotSolved),
        };

        Ok(outcome)
    }
}

struct Search<'a> {
    model: &'a MatchingModel,
    budget: &'a SolveBudget,
    started: Instant,
    objective: Vec<f64>,
    /// Constraints each variable appears in, with its coefficient
    touches: Vec<Vec<(usize, f64)>>,
    /// Contribution of fixed variables to each constraint
    fixed_lhs: Vec<f64>,
    /// Smallest and largest contribution the free variables can still add
    free_min: Vec<f64>,
    free_max: Vec<f64>,
    assignment: Vec<f64>,
    current: f64,
    /// Sum of positive objective coefficients over free variables
    optimistic: f64,
    best: Option<(f64, Vec<f64>)>,
    nodes: u64,
    exhausted: bool,
}

impl<'a> Search<'a> {
    fn new(model: &'a MatchingModel, budget: &'a SolveBudget) -> Self {
        let n = model.variable_count();

        let mut objective = vec![0.0; n];
        for (var, coef) in &model.objective.terms {
            objective[var.index()] += coef;
        }

        let mut touches = vec![Vec::new(); n];
        let mut free_min = vec![0.0; model.constraints.len()];
        let mut free_max = vec![0.0; model.constraints.len()];
        for (ci, constraint) in model.constraints.iter().enumerate() {
            for (var, coef) in &constraint.terms {
                touches[var.index()].push((ci, *coef));
                free_min[ci] += coef.min(0.0);
                free_max[ci] += coef.max(0.0);
            }
        }

        let optimistic = objective.iter().map(|c| c.max(0.0)).sum();

        Self {
            model,
            budget,
            started: Instant::now(),
            objective,
            touches,
            fixed_lhs: vec![0.0; model.constraints.len()],
            free_min,
            free_max,
            assignment: vec![0.0; n],
            current: 0.0,
            optimistic,
            best: None,
            nodes: 0,
            exhausted: false,
        }
    }

    fn run(&mut self) {
        // Constraints without any variable are decided up front
        if (0..self.model.constraints.len()).all(|ci| self.can_hold(ci)) {
            self.branch(0);
        }
    }

    fn branch(&mut self, depth: usize) {
        if self.exhausted || self.out_of_budget() {
            return;
        }
        self.nodes += 1;

        if let Some((best, _)) = &self.best {
            if self.current + self.optimistic <= *best + FEASIBILITY_TOLERANCE {
                return;
            }
        }

        if depth == self.assignment.len() {
            trace!("Improved assignment with objective {:.4}", self.current);
            self.best = Some((self.current, self.assignment.clone()));
            return;
        }

        for value in [1.0, 0.0] {
            self.fix(depth, value);
            if self.touches[depth].iter().all(|(ci, _)| self.can_hold(*ci)) {
                self.branch(depth + 1);
            }
            self.release(depth, value);
        }
    }

    fn fix(&mut self, var: usize, value: f64) {
        for &(ci, coef) in &self.touches[var] {
            self.free_min[ci] -= coef.min(0.0);
            self.free_max[ci] -= coef.max(0.0);
            self.fixed_lhs[ci] += coef * value;
        }
        self.optimistic -= self.objective[var].max(0.0);
        self.current += self.objective[var] * value;
        self.assignment[var] = value;
    }

    fn release(&mut self, var: usize, value: f64) {
        for &(ci, coef) in &self.touches[var] {
            self.free_min[ci] += coef.min(0.0);
            self.free_max[ci] += coef.max(0.0);
            self.fixed_lhs[ci] -= coef * value;
        }
        self.optimistic += self.objective[var].max(0.0);
        self.current -= self.objective[var] * value;
        self.assignment[var] = 0.0;
    }

    /// Whether some completion of the free variables can still satisfy constraint `ci`
    fn can_hold(&self, ci: usize) -> bool {
        let constraint = &self.model.constraints[ci];
        let low = self.fixed_lhs[ci] + self.free_min[ci];
        let high = self.fixed_lhs[ci] + self.free_max[ci];
        match constraint.relation {
            Relation::Eq => {
                low <= constraint.rhs + FEASIBILITY_TOLERANCE
                    && high >= constraint.rhs - FEASIBILITY_TOLERANCE
            }
            Relation::Le => low <= constraint.rhs + FEASIBILITY_TOLERANCE,
            Relation::Ge => high >= constraint.rhs - FEASIBILITY_TOLERANCE,
        }
    }

    fn out_of_budget(&mut self) -> bool {
        if let Some(limit) = self.budget.node_limit {
            if self.nodes >= limit {
                self.exhausted = true;
            }
        }
        if let Some(limit) = self.budget.time_limit {
            if self.nodes % TIME_CHECK_INTERVAL == 0 && self.started.elapsed() >= limit {
                self.exhausted = true;
            }
        }
        self.exhausted
    }
}
