//! Class identifiers
//!
//! A `ClassId` is the canonical decimal form of a class/section number:
//! ASCII digits only, no leading zeros (a lone `"0"` is allowed). Every
//! storage key family is built from this canonical form, so `faculty_07`
//! and `faculty_7` address the same facts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::DomainError;

/// Matches the class page file name, e.g. `/site/faculty_12.html`.
static CLASS_PAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"faculty_(\d+)\.html").expect("valid regex"));

/// Canonical class identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassId(String);

impl ClassId {
    /// Parse a strict digit string (surrounding whitespace allowed).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidClassId` when the trimmed input is empty
    /// or contains anything other than ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_class_id(raw));
        }
        Ok(Self::canonical(trimmed))
    }

    /// Lenient parse for table cells: takes the leading run of digits.
    ///
    /// `"07"` and `"7 - Calculus"` both yield `7`; text without a leading
    /// digit yields `None`.
    pub fn parse_leading(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let end = trimmed
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return None;
        }
        Some(Self::canonical(&trimmed[..end]))
    }

    /// Extract the class from a page path such as `/faculty_07.html`.
    ///
    /// Only the literal `faculty_<digits>.html` file name is recognized.
    /// Classes addressed any other way (query parameters, rewritten routes)
    /// come back as `None` and fall into the global key family.
    pub fn from_page_path(path: &str) -> Option<Self> {
        let lowered = path.to_lowercase();
        let captures = CLASS_PAGE_REGEX.captures(&lowered)?;
        let digits = captures.get(1)?.as_str();
        Some(Self::canonical(digits))
    }

    /// Returns the canonical digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn canonical(digits: &str) -> Self {
        let stripped = digits.trim_start_matches('0');
        if stripped.is_empty() {
            Self("0".to_string())
        } else {
            Self(stripped.to_string())
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClassId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClassId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ClassId> for String {
    fn from(id: ClassId) -> String {
        id.0
    }
}
