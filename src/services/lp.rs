use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use tracing::{debug, warn};

use crate::core::model::{LinearConstraint, MatchingModel, Relation, VariableId};
use crate::services::solver::{check_value_count, SolveBudget, SolveOutcome, SolveStatus, Solver, SolverError};

/// Integer programming backend built on `good_lp` with the pure-Rust microlp solver
///
/// microlp has no limits of its own. A time limit runs the solve on a
/// worker thread and gives up with `NotSolved` once the deadline passes;
/// the abandoned worker finishes in the background and its result is
/// dropped. Node limits do not apply to this backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LpSolver;

impl Solver for LpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &MatchingModel, budget: &SolveBudget) -> Result<SolveOutcome, SolverError> {
        if budget.node_limit.is_some() {
            warn!("microlp has no node limit, ignoring {:?}", budget.node_limit);
        }

        let outcome = match budget.time_limit {
            None => solve_model(model),
            Some(limit) => {
                let (tx, rx) = mpsc::channel();
                let owned = model.clone();
                thread::Builder::new()
                    .name("microlp".to_string())
                    .spawn(move || {
                        // The receiver is gone if the deadline already passed
                        let _ = tx.send(solve_model(&owned));
                    })
                    .map_err(|e| SolverError::Backend(format!("failed to start solver thread: {}", e)))?;

                match rx.recv_timeout(limit) {
                    Ok(outcome) => outcome,
                    Err(RecvTimeoutError::Timeout) => {
                        warn!("microlp did not finish within {:?}", limit);
                        SolveOutcome::without_solution(SolveStatus::NotSolved)
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err(SolverError::Backend("solver thread exited without a result".to_string()))
                    }
                }
            }
        };

        check_value_count(model, &outcome)?;
        Ok(outcome)
    }
}

fn solve_model(model: &MatchingModel) -> SolveOutcome {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variables
        .iter()
        .map(|name| vars.add(variable().binary().name(name.clone())))
        .collect();

    let objective = linear_expression(&model.objective.terms, &handles);

    let mut problem = vars.maximise(objective).using(microlp);
    for constraint in &model.constraints {
        problem = problem.with(to_good_lp(constraint, &handles));
    }

    debug!(
        "Handing {} variables and {} constraints to microlp",
        handles.len(),
        model.constraints.len()
    );

    match problem.solve() {
        Ok(solution) => SolveOutcome {
            status: SolveStatus::Optimal,
            values: handles.iter().map(|v| solution.value(*v)).collect(),
        },
        Err(ResolutionError::Infeasible) => SolveOutcome::without_solution(SolveStatus::Infeasible),
        Err(ResolutionError::Unbounded) => SolveOutcome::without_solution(SolveStatus::Unbounded),
        Err(e) => {
            warn!("microlp stopped without a solution: {}", e);
            SolveOutcome::without_solution(SolveStatus::NotSolved)
        }
    }
}

fn to_good_lp(constraint: &LinearConstraint, handles: &[Variable]) -> good_lp::Constraint {
    let lhs = linear_expression(&constraint.terms, handles);
    let rhs = constraint.rhs;

    match constraint.relation {
        Relation::Eq => constraint!(lhs == rhs),
        Relation::Le => constraint!(lhs <= rhs),
        Relation::Ge => constraint!(lhs >= rhs),
    }
}

fn linear_expression(terms: &[(VariableId, f64)], handles: &[Variable]) -> Expression {
    terms
        .iter()
        .fold(Expression::from(0.0), |acc, (var, coef)| acc + *coef * handles[var.index()])
}
