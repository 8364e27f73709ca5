//! The line-balancing score.
//!
//! A score is a lexicographic triple. Hard counts feasibility violations,
//! medium and soft carry the balancing objective of the current phase.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Hard, medium and soft levels, compared in that order. Higher is better.
///
/// # Examples
///
/// ```
/// use eqalbp_core::HardMediumSoftScore;
///
/// let wide = HardMediumSoftScore::of(0, -21, -4000);
/// let tight = HardMediumSoftScore::of(0, -19, -4123);
///
/// // A shorter cycle time wins even with a worse load spread
/// assert!(tight > wide);
/// assert_eq!(tight.to_string(), "0hard/-19medium/-4123soft");
/// assert_eq!("0hard/-19medium/-4123soft".parse(), Ok(tight));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardMediumSoftScore {
    hard: i64,
    medium: i64,
    soft: i64,
}

impl HardMediumSoftScore {
    #[inline]
    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        Self { hard, medium, soft }
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn medium(&self) -> i64 {
        self.medium
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// No precedence or equipment violations.
    #[inline]
    pub const fn is_feasible(&self) -> bool {
        self.hard >= 0
    }
}

impl Ord for HardMediumSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.hard, self.medium, self.soft).cmp(&(other.hard, other.medium, other.soft))
    }
}

impl PartialOrd for HardMediumSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HardMediumSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}medium/{}soft", self.hard, self.medium, self.soft)
    }
}

/// A string that is not of the form `<hard>hard/<medium>medium/<soft>soft`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid score {input:?}: expected <hard>hard/<medium>medium/<soft>soft")]
pub struct ScoreParseError {
    input: String,
}

impl FromStr for HardMediumSoftScore {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScoreParseError {
            input: s.to_string(),
        };
        let mut parts = s.trim().split('/');
        let mut level = |suffix: &str| -> Result<i64, ScoreParseError> {
            parts
                .next()
                .and_then(|part| part.strip_suffix(suffix))
                .and_then(|number| number.parse().ok())
                .ok_or_else(invalid)
        };
        let score = Self::of(level("hard")?, level("medium")?, level("soft")?);
        match parts.next() {
            None => Ok(score),
            Some(_) => Err(invalid()),
        }
    }
}
