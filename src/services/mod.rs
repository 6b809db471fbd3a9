// Service exports
pub mod exhaustive;
pub mod lp;
pub mod lp_writer;
pub mod roster;
pub mod solver;

pub use exhaustive::ExhaustiveSolver;
pub use lp::LpSolver;
pub use lp_writer::{render_lp, write_lp};
pub use roster::{load_roster, RosterError};
pub use solver::{SolveBudget, SolveOutcome, SolveStatus, Solver, SolverBackend, SolverError};
