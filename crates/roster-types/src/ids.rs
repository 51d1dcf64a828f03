//! Store-assigned identifier for employee records.
//!
//! Identifiers are positive integers handed out by the record store in
//! strictly increasing order. They are never reused, even after the
//! record they named has been deleted.

use serde::{Deserialize, Serialize};

/// Unique identifier for an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl EmployeeId {
    /// The first identifier a fresh store assigns.
    pub const FIRST: Self = Self(1);

    /// Return the inner integer value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }

    /// The identifier that follows this one.
    ///
    /// Saturates at `u64::MAX`; an in-memory store cannot hold that many
    /// records.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmployeeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<EmployeeId> for u64 {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

impl core::str::FromStr for EmployeeId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(EmployeeId::FIRST.next(), EmployeeId(2));
    }

    #[test]
    fn parses_from_digits() {
        assert_eq!("42".parse::<EmployeeId>().ok(), Some(EmployeeId(42)));
        assert!("abc".parse::<EmployeeId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&EmployeeId(7)).unwrap_or_default();
        assert_eq!(json, "7");
    }
}
