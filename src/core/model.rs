use serde::Serialize;
use std::fmt;

/// Values closer than this are treated as equal when checking constraints
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Index of a binary decision variable inside a [`MatchingModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariableId(pub usize);

impl VariableId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Eq => write!(f, "="),
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
        }
    }
}

/// `sum(coefficient * variable) <relation> rhs`
#[derive(Debug, Clone, Serialize)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VariableId, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coef)| coef * values.get(var.index()).copied().unwrap_or(0.0))
            .sum()
    }

    pub fn is_satisfied_by(&self, values: &[f64]) -> bool {
        let lhs = self.lhs(values);
        match self.relation {
            Relation::Eq => (lhs - self.rhs).abs() <= FEASIBILITY_TOLERANCE,
            Relation::Le => lhs <= self.rhs + FEASIBILITY_TOLERANCE,
            Relation::Ge => lhs >= self.rhs - FEASIBILITY_TOLERANCE,
        }
    }
}

/// Linear objective over binary variables, always maximized
#[derive(Debug, Clone, Default, Serialize)]
pub struct Objective {
    pub terms: Vec<(VariableId, f64)>,
}

impl Objective {
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coef)| coef * values.get(var.index()).copied().unwrap_or(0.0))
            .sum()
    }

    /// Coefficient of a single variable, 0 when it has no term
    pub fn coefficient(&self, var: VariableId) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| *v == var)
            .map(|(_, c)| c)
            .sum()
    }
}

/// Solver-independent 0/1 integer program
///
/// Backends translate this into their own representation; nothing here
/// knows which optimizer will run it.
#[derive(Debug, Clone, Serialize)]
pub struct MatchingModel {
    pub name: String,
    /// Variable names, indexed by [`VariableId`]
    pub variables: Vec<String>,
    pub objective: Objective,
    pub constraints: Vec<LinearConstraint>,
}

impl MatchingModel {
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn is_satisfied_by(&self, values: &[f64]) -> bool {
        values.len() == self.variables.len()
            && values
                .iter()
                .all(|v| v.abs() <= FEASIBILITY_TOLERANCE || (v - 1.0).abs() <= FEASIBILITY_TOLERANCE)
            && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }
}
