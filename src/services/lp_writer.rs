use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::model::{MatchingModel, Relation};

/// Terms per line before wrapping, keeps dumps readable in an editor
const TERMS_PER_LINE: usize = 8;

/// Render the model in CPLEX LP format
pub fn render_lp(model: &MatchingModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\\* {} *\\", model.name);
    let _ = writeln!(out, "Maximize");
    out.push_str("OBJ:");
    write_terms(
        &mut out,
        model
            .objective
            .terms
            .iter()
            .map(|(var, coef)| (*coef, model.variables[var.index()].as_str())),
    );
    out.push('\n');

    let _ = writeln!(out, "Subject To");
    for constraint in &model.constraints {
        let _ = write!(out, "{}:", constraint.name);
        write_terms(
            &mut out,
            constraint
                .terms
                .iter()
                .map(|(var, coef)| (*coef, model.variables[var.index()].as_str())),
        );
        let relation = match constraint.relation {
            Relation::Eq => "=",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        };
        let _ = writeln!(out, " {} {}", relation, format_number(constraint.rhs));
    }

    let _ = writeln!(out, "Binaries");
    for name in &model.variables {
        let _ = writeln!(out, "{}", name);
    }
    let _ = writeln!(out, "End");

    out
}

/// Write the LP dump, creating parent directories as needed
pub fn write_lp(model: &MatchingModel, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, render_lp(model))
}

fn write_terms<'a>(out: &mut String, terms: impl Iterator<Item = (f64, &'a str)>) {
    let mut written = 0;
    for (coef, name) in terms {
        if written > 0 && written % TERMS_PER_LINE == 0 {
            out.push_str("\n ");
        }
        let sign = if coef < 0.0 { '-' } else { '+' };
        if written == 0 && sign == '+' {
            let _ = write!(out, " {} {}", format_number(coef), name);
        } else {
            let _ = write!(out, " {} {} {}", sign, format_number(coef.abs()), name);
        }
        written += 1;
    }
    if written == 0 {
        out.push_str(" 0");
    }
}

fn format_number(value: f64) -> String {
    // Zero and integral values print without a fractional part
    if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
