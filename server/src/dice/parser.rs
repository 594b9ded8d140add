//! Dice Notation Parser
//!
//! Hand-written recursive descent over the input bytes. Grammar:
//!
//! ```text
//! expr    := product (("+" | "-") product)*
//! product := atom (("*" | "/") atom)*
//! atom    := dice | number | identifier
//! dice    := [count] ("d" | "D") sides [("kh" | "kl" | "dh" | "dl") n]
//! ```
//!
//! The parsed tree's `Display` impl is the canonical (normalized) form of
//! the expression: lowercase dice notation, single spaces around
//! operators.

use std::fmt;

use super::fmt_num;
use super::types::{DiceError, Op};

/// Maximum dice per term.
const MAX_DICE: u32 = 100;

/// Maximum sides per die.
const MAX_SIDES: u32 = 10_000;

/// Keep/drop suffix on a dice term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keep {
    /// Keep the n highest rolls.
    Highest(u32),
    /// Keep the n lowest rolls.
    Lowest(u32),
    /// Drop the n highest rolls.
    DropHighest(u32),
    /// Drop the n lowest rolls.
    DropLowest(u32),
}

impl fmt::Display for Keep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Highest(n) => write!(f, "kh{n}"),
            Self::Lowest(n) => write!(f, "kl{n}"),
            Self::DropHighest(n) => write!(f, "dh{n}"),
            Self::DropLowest(n) => write!(f, "dl{n}"),
        }
    }
}

/// Parsed (not yet evaluated) expression tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Ast {
    Number(f64),
    Variable(String),
    Dice {
        count: u32,
        sides: u32,
        keep: Option<Keep>,
    },
    Binary {
        op: Op,
        lhs: Box<Ast>,
        rhs: Box<Ast>,
    },
}

impl Ast {
    /// Canonical notation for a dice term.
    pub(crate) fn dice_notation(count: u32, sides: u32, keep: Option<Keep>) -> String {
        keep.map_or_else(
            || format!("{count}d{sides}"),
            |k| format!("{count}d{sides}{k}"),
        )
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", fmt_num(*v)),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Dice { count, sides, keep } => {
                write!(f, "{}", Self::dice_notation(*count, *sides, *keep))
            }
            Self::Binary { op, lhs, rhs } => write!(f, "{lhs} {} {rhs}", op.as_str()),
        }
    }
}

/// Parse a full expression; trailing garbage is an error.
pub(crate) fn parse(input: &str) -> Result<Ast, DiceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DiceError::Empty);
    }
    if let Some((pos, c)) = trimmed.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(DiceError::UnexpectedChar(c, pos));
    }

    let mut parser = Parser {
        src: trimmed.as_bytes(),
        pos: 0,
    };
    let ast = parser.expr()?;
    parser.skip_ws();
    if parser.pos < parser.src.len() {
        return Err(DiceError::UnexpectedChar(
            parser.src[parser.pos] as char,
            parser.pos,
        ));
    }
    Ok(ast)
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn skip_ws(&mut self) {
        while self.peek() == Some(b' ') || self.peek() == Some(b'\t') {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn expr(&mut self) -> Result<Ast, DiceError> {
        let mut lhs = self.product()?;
        loop {
            self.skip_ws();
            let op = match self.peek() {
                Some(b'+') => Op::Add,
                Some(b'-') => Op::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.product()?;
            lhs = Ast::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn product(&mut self) -> Result<Ast, DiceError> {
        let mut lhs = self.atom()?;
        loop {
            self.skip_ws();
            let op = match self.peek() {
                Some(b'*') => Op::Mul,
                Some(b'/') => Op::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.atom()?;
            lhs = Ast::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn atom(&mut self) -> Result<Ast, DiceError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c.is_ascii_digit() => self.number_or_dice(),
            Some(c) if c.is_ascii_alphabetic() || c == b'_' => self.identifier_or_dice(),
            Some(c) => Err(DiceError::UnexpectedChar(c as char, self.pos)),
            None => Err(DiceError::UnexpectedEnd),
        }
    }

    /// A term starting with a digit: either a dice count or a literal.
    fn number_or_dice(&mut self) -> Result<Ast, DiceError> {
        let int_part = self.integer();

        // "NdS" only when the 'd' is immediately followed by a digit;
        // otherwise the 'd' belongs to an identifier and this atom ends.
        if matches!(self.peek(), Some(b'd' | b'D'))
            && self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.pos += 1;
            return self.dice(int_part);
        }

        // Decimal fraction.
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            let start = self.pos;
            self.pos += 1;
            let frac = self.integer();
            let digits = self.pos - start - 1;
            let value = int_part as f64 + frac as f64 / 10f64.powi(digits as i32);
            return Ok(Ast::Number(value));
        }

        Ok(Ast::Number(int_part as f64))
    }

    /// A term starting with a letter: "dS" shorthand or a variable name.
    fn identifier_or_dice(&mut self) -> Result<Ast, DiceError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.pos += 1;
        }
        let ident = std::str::from_utf8(&self.src[start..self.pos])
            .unwrap_or_default()
            .to_string();

        // "d20" is shorthand for "1d20".
        if ident.len() > 1
            && (ident.starts_with('d') || ident.starts_with('D'))
            && ident[1..].bytes().all(|c| c.is_ascii_digit())
        {
            self.pos = start + 1;
            return self.dice(1);
        }

        Ok(Ast::Variable(ident))
    }

    /// Parse sides and optional keep/drop suffix after the 'd'.
    fn dice(&mut self, count: u32) -> Result<Ast, DiceError> {
        let sides = self.integer();
        if count == 0 || sides == 0 || sides > MAX_SIDES {
            return Err(DiceError::InvalidDice(Ast::dice_notation(
                count, sides, None,
            )));
        }
        if count > MAX_DICE {
            return Err(DiceError::TooManyDice(MAX_DICE));
        }

        let keep = self.keep_suffix(count, sides)?;
        Ok(Ast::Dice { count, sides, keep })
    }

    fn keep_suffix(&mut self, count: u32, sides: u32) -> Result<Option<Keep>, DiceError> {
        let kind = match (self.peek(), self.peek_at(1)) {
            (Some(b'k' | b'K'), Some(b'h' | b'H')) => 0u8,
            (Some(b'k' | b'K'), Some(b'l' | b'L')) => 1,
            (Some(b'd' | b'D'), Some(b'h' | b'H')) => 2,
            (Some(b'd' | b'D'), Some(b'l' | b'L')) => 3,
            _ => return Ok(None),
        };
        if !self.peek_at(2).is_some_and(|c| c.is_ascii_digit()) {
            return Ok(None);
        }
        self.pos += 2;
        let n = self.integer();

        let keep = match kind {
            0 => Keep::Highest(n),
            1 => Keep::Lowest(n),
            2 => Keep::DropHighest(n),
            _ => Keep::DropLowest(n),
        };
        if n == 0 {
            return Err(DiceError::InvalidDice(Ast::dice_notation(
                count,
                sides,
                Some(keep),
            )));
        }
        Ok(Some(keep))
    }

    /// Consume a run of digits, saturating on overflow.
    fn integer(&mut self) -> u32 {
        let mut value: u32 = 0;
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            value = value
                .saturating_mul(10)
                .saturating_add(u32::from(c - b'0'));
            self.pos += 1;
        }
        value
    }
}
