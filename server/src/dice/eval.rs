//! Dice Expression Evaluation
//!
//! Walks the parsed tree, rolling dice and resolving variables, and
//! produces the calculation tree alongside the final value. Rolls are
//! recorded in the order the RNG produced them; keep/drop suffixes only
//! mark entries as dropped, they never reorder.

use std::collections::HashMap;

use rand::Rng;

use super::parser::{Ast, Keep};
use super::types::{DiceError, DieRoll, Expr, Op};

/// Evaluate a parsed expression into a calculation tree and final value.
pub(crate) fn evaluate<R: Rng>(
    ast: &Ast,
    vars: &HashMap<String, f64>,
    rng: &mut R,
) -> Result<(Expr, f64), DiceError> {
    match ast {
        Ast::Number(v) => Ok((Expr::Literal(*v), *v)),
        Ast::Variable(name) => {
            let value = *vars
                .get(name)
                .ok_or_else(|| DiceError::UnknownVariable(name.clone()))?;
            Ok((
                Expr::Variable {
                    name: name.clone(),
                    value,
                },
                value,
            ))
        }
        Ast::Dice { count, sides, keep } => {
            let rolls = roll_dice(*count, *sides, *keep, rng);
            let total: f64 = rolls
                .iter()
                .filter(|r| !r.dropped)
                .map(|r| f64::from(r.value))
                .sum();
            Ok((
                Expr::Roll {
                    notation: Ast::dice_notation(*count, *sides, *keep),
                    rolls,
                    total,
                },
                total,
            ))
        }
        Ast::Binary { op, lhs, rhs } => {
            let (lhs_expr, lhs_val) = evaluate(lhs, vars, rng)?;
            let (rhs_expr, rhs_val) = evaluate(rhs, vars, rng)?;
            let value = match op {
                Op::Add => lhs_val + rhs_val,
                Op::Sub => lhs_val - rhs_val,
                Op::Mul => lhs_val * rhs_val,
                Op::Div => {
                    if rhs_val == 0.0 {
                        return Err(DiceError::DivisionByZero);
                    }
                    lhs_val / rhs_val
                }
            };
            Ok((
                Expr::Binary {
                    op: *op,
                    lhs: Box::new(lhs_expr),
                    rhs: Box::new(rhs_expr),
                },
                value,
            ))
        }
    }
}

/// Roll `count` dice and mark dropped entries per the keep/drop suffix.
fn roll_dice<R: Rng>(count: u32, sides: u32, keep: Option<Keep>, rng: &mut R) -> Vec<DieRoll> {
    let mut rolls: Vec<DieRoll> = (0..count)
        .map(|_| DieRoll {
            value: rng.gen_range(1..=sides),
            dropped: false,
        })
        .collect();

    if let Some(keep) = keep {
        for index in dropped_indices(&rolls, keep) {
            rolls[index].dropped = true;
        }
    }
    rolls
}

/// Indices to drop for a keep/drop suffix.
///
/// Ties break towards the earlier roll, matching a stable sort on value.
fn dropped_indices(rolls: &[DieRoll], keep: Keep) -> Vec<usize> {
    let mut by_value: Vec<usize> = (0..rolls.len()).collect();
    // Ascending by face value, stable on roll order.
    by_value.sort_by_key(|&i| rolls[i].value);

    let len = rolls.len();
    let (from_low, n) = match keep {
        // Keeping the n highest drops the len - n lowest.
        Keep::Highest(n) => (true, len.saturating_sub(n as usize)),
        Keep::Lowest(n) => (false, len.saturating_sub(n as usize)),
        Keep::DropHighest(n) => (false, (n as usize).min(len)),
        Keep::DropLowest(n) => (true, (n as usize).min(len)),
    };

    if from_low {
        by_value[..n].to_vec()
    } else {
        by_value[len - n..].to_vec()
    }
}
