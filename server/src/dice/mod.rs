//! Dice Engine
//!
//! Parses and evaluates dice notation ("4d6kh3 + strength + 2") against a
//! set of named numeric variables, producing a final value, a canonical
//! form of the input, and a calculation tree suitable for rendering.
//!
//! Consumed by the roll command as a black box: the only entry points are
//! [`roll`] / [`roll_with_rng`] and the tree renderer in [`render`].

mod eval;
mod parser;
pub mod render;
mod types;

use std::collections::HashMap;

use rand::Rng;

pub use types::{DiceError, DieRoll, Expr, Op, RollResult};

/// Parse and evaluate a dice expression using the thread-local RNG.
pub fn roll(input: &str, vars: &HashMap<String, f64>) -> Result<RollResult, DiceError> {
    roll_with_rng(input, vars, &mut rand::thread_rng())
}

/// Parse and evaluate a dice expression with an injected RNG.
///
/// Tests pass a seeded `StdRng` for deterministic rolls.
pub fn roll_with_rng<R: Rng>(
    input: &str,
    vars: &HashMap<String, f64>,
    rng: &mut R,
) -> Result<RollResult, DiceError> {
    let ast = parser::parse(input)?;
    let normalized = ast.to_string();
    let (calculation, result) = eval::evaluate(&ast, vars, rng)?;

    Ok(RollResult {
        result,
        normalized,
        calculation,
    })
}

/// Format a numeric value: integers without a trailing ".0", everything
/// else with its shortest decimal form.
pub(crate) fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
