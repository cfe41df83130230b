//! Common identifier types
//!
//! The legacy schema stores the same logical id as a string in some tables
//! and an integer in others. These newtypes are the canonical form: parsing
//! happens once at the data-access boundary, comparisons are plain `==`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Canonical customer (tenant) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub i64);

impl CustomerId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(CustomerId)
    }
}

impl From<i64> for CustomerId {
    fn from(v: i64) -> Self {
        CustomerId(v)
    }
}

/// Canonical user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(v: i64) -> Self {
        UserId(v)
    }
}

/// Canonical driver identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub i64);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DriverId {
    fn from(v: i64) -> Self {
        DriverId(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_id_parses_from_legacy_string_column() {
        assert_eq!("42".parse::<CustomerId>().unwrap(), CustomerId(42));
        assert_eq!(" 7 ".parse::<CustomerId>().unwrap(), CustomerId(7));
        assert!("".parse::<CustomerId>().is_err());
        assert!("abc".parse::<CustomerId>().is_err());
    }

    #[test]
    fn ids_compare_numerically() {
        assert_eq!(CustomerId::from(3), "3".parse().unwrap());
        assert_ne!(CustomerId(0), CustomerId(1));
    }
}
