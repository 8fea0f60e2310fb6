//! Version ranges and their intersection.
//!
//! The textual form is `LOW OP v OP HIGH`, e.g. `1.0.0 <= v < 2.0.0`, where
//! each `OP` is `<` or `<=`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::version::Version;

/// Comparison operator on one side of a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    LessThan,
    LessThanOrEqual,
}

impl Op {
    /// Evaluate `left OP right`.
    pub fn evaluate(self, left: &Version, right: &Version) -> bool {
        match self {
            Op::LessThan => left < right,
            Op::LessThanOrEqual => left <= right,
        }
    }

    /// When two bounds coincide the stricter operator wins.
    fn stricter(self, other: Op) -> Op {
        if self == Op::LessThan || other == Op::LessThan {
            Op::LessThan
        } else {
            Op::LessThanOrEqual
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::LessThan => f.write_str("<"),
            Op::LessThanOrEqual => f.write_str("<="),
        }
    }
}

impl FromStr for Op {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Op::LessThan),
            "<=" => Ok(Op::LessThanOrEqual),
            other => Err(ParseError::Operator(other.to_string())),
        }
    }
}

/// Errors from parsing a textual constraint.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected something like '1.0.0 <= v < 2.0.0', got '{0}'")]
    Shape(String),

    #[error("expected '<' or '<=', got '{0}'")]
    Operator(String),

    #[error("expected 'v', got '{0}'")]
    Variable(String),

    #[error("invalid version '{text}': {source}")]
    Version {
        text: String,
        #[source]
        source: semver::Error,
    },
}

/// A range of acceptable versions, `low low_op v high_op high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Constraint {
    pub low: Version,
    pub low_op: Op,
    pub high_op: Op,
    pub high: Version,
}

impl Constraint {
    /// The half-open range `[low, high)`.
    pub const fn new(low: Version, high: Version) -> Self {
        Self {
            low,
            low_op: Op::LessThanOrEqual,
            high_op: Op::LessThan,
            high,
        }
    }

    pub const fn with_ops(low: Version, low_op: Op, high_op: Op, high: Version) -> Self {
        Self {
            low,
            low_op,
            high_op,
            high,
        }
    }

    /// The range containing exactly `version`.
    pub const fn exactly(version: Version) -> Self {
        Self::with_ops(version, Op::LessThanOrEqual, Op::LessThanOrEqual, version)
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.low_op.evaluate(&self.low, version) && self.high_op.evaluate(version, &self.high)
    }

    /// True when no version satisfies the constraint.
    pub fn is_empty(&self) -> bool {
        match self.low.cmp(&self.high) {
            Ordering::Greater => true,
            Ordering::Equal => self.low_op == Op::LessThan || self.high_op == Op::LessThan,
            Ordering::Less => false,
        }
    }

    /// The range accepted by both `self` and `other`, or `None` if they are
    /// disjoint.
    pub fn intersect(&self, other: &Constraint) -> Option<Constraint> {
        let (low, low_op) = match self.low.cmp(&other.low) {
            Ordering::Less => (other.low, other.low_op),
            Ordering::Equal => (self.low, self.low_op.stricter(other.low_op)),
            Ordering::Greater => (self.low, self.low_op),
        };
        let (high, high_op) = match self.high.cmp(&other.high) {
            Ordering::Less => (self.high, self.high_op),
            Ordering::Equal => (self.high, self.high_op.stricter(other.high_op)),
            Ordering::Greater => (other.high, other.high_op),
        };

        let merged = Constraint::with_ops(low, low_op, high_op, high);
        if merged.is_empty() {
            None
        } else {
            Some(merged)
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} v {} {}",
            self.low, self.low_op, self.high_op, self.high
        )
    }
}

impl FromStr for Constraint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [low, low_op, var, high_op, high] = parts.as_slice() else {
            return Err(ParseError::Shape(s.to_string()));
        };
        if *var != "v" {
            return Err(ParseError::Variable(var.to_string()));
        }
        Ok(Constraint::with_ops(
            parse_version(low)?,
            low_op.parse()?,
            high_op.parse()?,
            parse_version(high)?,
        ))
    }
}

fn parse_version(text: &str) -> Result<Version, ParseError> {
    text.parse().map_err(|source| ParseError::Version {
        text: text.to_string(),
        source,
    })
}

impl TryFrom<String> for Constraint {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Constraint> for String {
    fn from(c: Constraint) -> Self {
        c.to_string()
    }
}
