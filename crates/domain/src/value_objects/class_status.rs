//! Class clearance status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Clearance status of a class.
///
/// Only two states exist. A class becomes `Done` once every item is approved
/// and nothing in this crate moves it back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClassStatus {
    #[default]
    Pending,
    Done,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Done => "Done",
        }
    }

    /// Interpret a stored value. Absent or unrecognized values read as Pending.
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::Pending)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for ClassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Done" => Ok(Self::Done),
            other => Err(DomainError::parse(format!("unknown class status {other:?}"))),
        }
    }
}
