//! Class approval aggregate ("approved/total")

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Snapshot of how many items of a class are approved.
///
/// `approved` never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalCount {
    approved: u32,
    total: u32,
}

impl ApprovalCount {
    /// Build a count, capping `approved` at `total`.
    ///
    /// Stored approvals can outnumber the items a page currently lists (the
    /// list shrank, or the total is unknown), and the snapshot must still
    /// read as a valid fraction.
    pub fn clamped(approved: u32, total: u32) -> Self {
        Self {
            approved: approved.min(total),
            total,
        }
    }

    pub fn approved(&self) -> u32 {
        self.approved
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Every item approved, and there is at least one item.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.approved >= self.total
    }
}

impl fmt::Display for ApprovalCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.approved, self.total)
    }
}

impl FromStr for ApprovalCount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (approved, total) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| DomainError::parse(format!("expected approved/total, got {s:?}")))?;
        let approved: u32 = approved
            .trim()
            .parse()
            .map_err(|_| DomainError::parse(format!("invalid approved count in {s:?}")))?;
        let total: u32 = total
            .trim()
            .parse()
            .map_err(|_| DomainError::parse(format!("invalid total in {s:?}")))?;
        if approved > total {
            return Err(DomainError::parse(format!(
                "approved count exceeds total in {s:?}"
            )));
        }
        Ok(Self { approved, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_numerator_to_denominator() {
        let count = ApprovalCount::clamped(5, 3);
        assert_eq!(count.approved(), 3);
        assert_eq!(count.to_string(), "3/3");
        assert_eq!(ApprovalCount::clamped(2, 0).to_string(), "0/0");
    }

    #[test]
    fn completion_requires_items() {
        assert!(!ApprovalCount::clamped(0, 0).is_complete());
        assert!(!ApprovalCount::clamped(2, 3).is_complete());
        assert!(ApprovalCount::clamped(3, 3).is_complete());
    }

    #[test]
    fn parses_stored_snapshot() {
        let count: ApprovalCount = "1/3".parse().unwrap();
        assert_eq!(count, ApprovalCount::clamped(1, 3));
        assert!("4/3".parse::<ApprovalCount>().is_err());
        assert!("three".parse::<ApprovalCount>().is_err());
        assert!("1/".parse::<ApprovalCount>().is_err());
    }
}
