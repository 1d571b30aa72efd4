//! Module versions
//!
//! Versions are positive numbers. Their textual form is part of every bundle
//! URI (`name+v1.0`), so rendering must be stable: whole numbers always keep
//! one decimal place and fractional versions use the shortest exact form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{JamError, Result, invalid_version};

/// Prefix separating a module name from its pinned version in request tokens
pub const VERSION_PREFIX: &str = "+v";

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Version(f64);

impl Version {
    /// Create a version, rejecting zero, negative and non-finite values
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0 < 1e16 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Version {
    type Err = JamError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| invalid_version(s))
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!("version must be a positive number, got {value}"))
        })
    }
}
