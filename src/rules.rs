//! Remapped arithmetic
//!
//! Every question in the quest is written with the familiar operator
//! symbols, but each symbol stands for a different operation. The
//! [`RuleBook`] records which operation each printed symbol really means and
//! can evaluate a question label under those rules, which is how a catalog's
//! pre-computed answers are checked when it is loaded.

use std::{fmt::Display, str::FromStr};

use enum_map::{Enum, EnumMap, enum_map};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An operator symbol as printed in a question label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `+`
    Plus,
    /// `÷` (also accepts `/`)
    Divide,
    /// `−` (also accepts ASCII `-`)
    Minus,
    /// `x` (also accepts `×` and `*`)
    Times,
}

impl Operator {
    /// The symbol used when writing labels and instructions
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Divide => '÷',
            Self::Minus => '−',
            Self::Times => 'x',
        }
    }

    /// The word used for this symbol in the instructions
    pub fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Divide => "divide",
            Self::Minus => "minus",
            Self::Times => "times",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Plus),
            "÷" | "/" => Some(Self::Divide),
            "−" | "-" => Some(Self::Minus),
            "x" | "X" | "×" | "*" => Some(Self::Times),
            _ => None,
        }
    }
}

/// What an operator actually does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Sum of both operands
    #[display("add")]
    Add,
    /// Left operand minus right operand
    #[display("subtract")]
    Subtract,
    /// Product of both operands
    #[display("multiply")]
    Multiply,
    /// Exact quotient; inexact or by-zero division has no answer
    #[display("divide")]
    Divide,
}

impl Operation {
    /// Applies the operation, returning `None` on overflow or inexact division
    pub fn apply(self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Subtract => lhs.checked_sub(rhs),
            Self::Multiply => lhs.checked_mul(rhs),
            Self::Divide => {
                if rhs == 0 || lhs.checked_rem(rhs)? != 0 {
                    None
                } else {
                    lhs.checked_div(rhs)
                }
            }
        }
    }
}

/// A binary expression read from a question label such as `"9 + 11"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    lhs: i64,
    operator: Operator,
    rhs: i64,
}

/// Errors produced while reading a question label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The label is not three whitespace-separated tokens
    #[error("expected `<number> <operator> <number>`")]
    Shape,
    /// An operand is not an integer
    #[error("`{0}` is not an integer")]
    Operand(String),
    /// The operator symbol is not recognised
    #[error("`{0}` is not a known operator")]
    Operator(String),
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let (lhs, operator, rhs) = label
            .split_whitespace()
            .collect_tuple()
            .ok_or(Error::Shape)?;

        let operand = |s: &str| {
            s.parse::<i64>()
                .map_err(|_| Error::Operand(s.to_string()))
        };

        Ok(Self {
            lhs: operand(lhs)?,
            operator: Operator::from_symbol(operator)
                .ok_or_else(|| Error::Operator(operator.to_string()))?,
            rhs: operand(rhs)?,
        })
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator.symbol(), self.rhs)
    }
}

/// Maps every printed operator to the operation it stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleBook(EnumMap<Operator, Operation>);

impl Default for RuleBook {
    /// The inverted rules used at the event
    fn default() -> Self {
        Self(enum_map! {
            Operator::Plus => Operation::Multiply,
            Operator::Divide => Operation::Add,
            Operator::Minus => Operation::Divide,
            Operator::Times => Operation::Subtract,
        })
    }
}

impl RuleBook {
    /// Builds a rule book from an explicit mapping
    pub fn new(mapping: EnumMap<Operator, Operation>) -> Self {
        Self(mapping)
    }

    /// The operation a printed operator stands for
    pub fn meaning(&self, operator: Operator) -> Operation {
        self.0[operator]
    }

    /// Evaluates an expression under these rules
    ///
    /// # Returns
    ///
    /// `None` if the remapped operation overflows or divides inexactly
    pub fn evaluate(&self, expression: &Expression) -> Option<i64> {
        self.meaning(expression.operator)
            .apply(expression.lhs, expression.rhs)
    }

    /// Renders the rules as the bullet list players read, one line per operator
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|(operator, operation)| {
                format!(
                    "• A {} ({}) sign means to {operation}",
                    operator.name(),
                    operator.symbol()
                )
            })
            .join("\n")
    }
}
