//! Dice Engine Types
//!
//! The evaluated calculation tree and the engine's error taxonomy.

use thiserror::Error;

/// Errors from parsing or evaluating a dice expression.
///
/// These never escape the roll command as protocol errors; they are
/// rendered into a diagnostic follow-up for the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiceError {
    /// The expression string is empty.
    #[error("empty dice expression")]
    Empty,
    /// An unexpected character at a byte offset.
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedChar(char, usize),
    /// The expression ended mid-term.
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// Zero dice or zero-sided dice.
    #[error("invalid dice term '{0}'")]
    InvalidDice(String),
    /// Guard against absurd roll counts.
    #[error("too many dice (limit is {0} per term)")]
    TooManyDice(u32),
    /// A variable reference with no value on the active sheet.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    /// Division by zero during evaluation.
    #[error("division by zero")]
    DivisionByZero,
}

/// Binary operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// The operator's source token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// One physical die roll inside a dice term, in rolled order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DieRoll {
    /// Face value.
    pub value: u32,
    /// Whether a keep/drop suffix discarded this roll.
    pub dropped: bool,
}

/// Evaluated calculation tree.
///
/// Mirrors the shape of the parsed expression with every leaf resolved:
/// variables carry their looked-up value, dice terms carry the ordered
/// rolls (kept and dropped interleaved as rolled) plus their notation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal number.
    Literal(f64),
    /// Named variable with its resolved value.
    Variable { name: String, value: f64 },
    /// Dice term: pre-rendered notation, ordered rolls, kept total.
    Roll {
        notation: String,
        rolls: Vec<DieRoll>,
        total: f64,
    },
    /// Binary operation.
    Binary {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Result of evaluating a dice expression.
#[derive(Debug, Clone, PartialEq)]
pub struct RollResult {
    /// Final numeric value.
    pub result: f64,
    /// Canonical textual form of the parsed input.
    pub normalized: String,
    /// Calculation tree, consumed only for rendering.
    pub calculation: Expr,
}

impl RollResult {
    /// The final value formatted for display.
    #[must_use]
    pub fn result_text(&self) -> String {
        super::fmt_num(self.result)
    }
}
