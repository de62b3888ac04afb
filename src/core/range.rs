//! Closed numeric intervals parsed from catalog text such as `"0-10m"`,
//! `"26.7-28.2"` or a bare `"15"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("range text is empty")]
    Empty,

    #[error("'{bound}' in range '{text}' is not a number")]
    InvalidBound { text: String, bound: String },

    #[error("range '{text}' has min {min} above max {max}")]
    Inverted { text: String, min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeInterval {
    pub min: f64,
    pub max: f64,
}

impl RangeInterval {
    pub fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Whitespace is ignored and a trailing unit on either bound is dropped.
    /// A leading `-` is a sign; the first `-` after it separates the bounds.
    pub fn parse(text: &str) -> Result<Self, RangeError> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(RangeError::Empty);
        }

        let (low, high) = match separator_index(&compact) {
            Some(index) => (&compact[..index], &compact[index + 1..]),
            None => (compact.as_str(), compact.as_str()),
        };

        let min = parse_bound(text, low)?;
        let max = parse_bound(text, high)?;
        if min > max {
            return Err(RangeError::Inverted {
                text: text.to_string(),
                min,
                max,
            });
        }

        Ok(Self { min, max })
    }
}

impl FromStr for RangeInterval {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RangeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

fn separator_index(compact: &str) -> Option<usize> {
    let mut previous: Option<char> = None;
    for (index, c) in compact.char_indices() {
        if c == '-' && previous.is_some_and(|p| p != '-') {
            return Some(index);
        }
        previous = Some(c);
    }
    None
}

/// Only a trailing unit (letters or `°`) is dropped; a `-` anywhere but
/// the leading sign makes the bound invalid.
fn parse_bound(text: &str, bound: &str) -> Result<f64, RangeError> {
    let invalid = || RangeError::InvalidBound {
        text: text.to_string(),
        bound: bound.to_string(),
    };

    let numeric = bound.trim_end_matches(|c: char| c.is_alphabetic() || c == '°');
    let unsigned = numeric.strip_prefix('-').unwrap_or(numeric);
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }

    numeric
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(invalid)
}
