//! Page size bound.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, InvalidLimitError};

/// Number of items a single page may hold, in `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u32")]
pub struct PageLimit(u32);

impl PageLimit {
    /// Smallest accepted page size.
    pub const MIN: PageLimit = PageLimit(1);

    /// Largest accepted page size.
    pub const MAX: PageLimit = PageLimit(100);

    /// Page size used when the caller gives none.
    pub const DEFAULT: PageLimit = PageLimit(10);

    /// Validate an explicit page size. Out-of-range values are rejected,
    /// never clamped.
    pub fn new(limit: u32) -> Result<Self, Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&limit) {
            Ok(Self(limit))
        } else {
            Err(InvalidLimitError {
                value: limit.to_string(),
            }
            .into())
        }
    }

    /// Returns the page size.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the page size as a `usize`, for slicing.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = Error;

    fn try_from(limit: u32) -> Result<Self, Self::Error> {
        Self::new(limit)
    }
}

impl From<PageLimit> for u32 {
    fn from(limit: PageLimit) -> Self {
        limit.0
    }
}

impl FromStr for PageLimit {
    type Err = Error;

    /// Parse a page size from a query string value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let limit = s.trim().parse::<u32>().map_err(|_| InvalidLimitError {
            value: s.to_string(),
        })?;
        Self::new(limit)
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
