//! Calculation Tree Rendering
//!
//! Pure, stateless stringification of an evaluated calculation tree,
//! independent of the final numeric result. Dropped rolls are struck
//! through; roll order is preserved exactly as the evaluator produced it.

use super::fmt_num;
use super::types::Expr;

/// Render a calculation tree as user-facing text.
///
/// Deterministic: rendering the same tree twice yields identical bytes.
#[must_use]
pub fn render(expr: &Expr) -> String {
    match expr {
        Expr::Literal(value) => fmt_num(*value),
        Expr::Variable { value, .. } => fmt_num(*value),
        Expr::Roll { rolls, .. } => {
            let inner = rolls
                .iter()
                .map(|roll| {
                    if roll.dropped {
                        format!("~~{}~~", roll.value)
                    } else {
                        roll.value.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{inner}]")
        }
        Expr::Binary { op, lhs, rhs } => {
            format!("{} {} {}", render(lhs), op.as_str(), render(rhs))
        }
    }
}
