//! Storage key scheme
//!
//! Every page load derives keys from the same `(ClassId, index)` inputs, so
//! independent pages address one set of facts in the shared store:
//!
//! | Fact               | Key                          | Value              |
//! |--------------------|------------------------------|--------------------|
//! | approval item      | `approve_{class}_{index}`    | `"approved"`       |
//! | approval item      | `approve_{index}` (no class) | `"approved"`       |
//! | class aggregate    | `classApproval_{class}`      | `"{approved}/{total}"` |
//! | cached total       | `classTotal_{class}`         | `"{total}"`        |
//! | class status       | `classStatus_{class}`        | `"Pending"` / `"Done"` |

use std::fmt;

use crate::ids::ClassId;

/// Value written for an approved item
pub const APPROVED_MARKER: &str = "approved";

const APPROVE_PREFIX: &str = "approve_";
const CLASS_APPROVAL_PREFIX: &str = "classApproval_";
const CLASS_TOTAL_PREFIX: &str = "classTotal_";
const CLASS_STATUS_PREFIX: &str = "classStatus_";

/// A typed storage key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Per-item approval flag, namespaced by class when one is known
    ApprovalItem {
        class: Option<ClassId>,
        index: usize,
    },
    /// Cached `approved/total` snapshot for a class
    ClassApproval(ClassId),
    /// Cached item total for a class
    ClassTotal(ClassId),
    /// Pending/Done status for a class
    ClassStatus(ClassId),
}

impl StorageKey {
    pub fn approval_item(class: Option<&ClassId>, index: usize) -> Self {
        Self::ApprovalItem {
            class: class.cloned(),
            index,
        }
    }

    /// Parse a raw key back into its typed form.
    ///
    /// Only keys in canonical form are recognized; `approve_07_1` is not a
    /// key this scheme ever writes and parses as `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(rest) = raw.strip_prefix(APPROVE_PREFIX) {
            return match rest.split_once('_') {
                Some((class, index)) => {
                    let class = canonical_class(class)?;
                    Some(Self::ApprovalItem {
                        class: Some(class),
                        index: parse_index(index)?,
                    })
                }
                None => Some(Self::ApprovalItem {
                    class: None,
                    index: parse_index(rest)?,
                }),
            };
        }
        if let Some(class) = raw.strip_prefix(CLASS_APPROVAL_PREFIX) {
            return canonical_class(class).map(Self::ClassApproval);
        }
        if let Some(class) = raw.strip_prefix(CLASS_TOTAL_PREFIX) {
            return canonical_class(class).map(Self::ClassTotal);
        }
        if let Some(class) = raw.strip_prefix(CLASS_STATUS_PREFIX) {
            return canonical_class(class).map(Self::ClassStatus);
        }
        None
    }

    /// True when this is an approval item key belonging to `class`.
    pub fn is_item_of(&self, class: &ClassId) -> bool {
        matches!(self, Self::ApprovalItem { class: Some(c), .. } if c == class)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApprovalItem {
                class: Some(class),
                index,
            } => write!(f, "{APPROVE_PREFIX}{class}_{index}"),
            Self::ApprovalItem { class: None, index } => write!(f, "{APPROVE_PREFIX}{index}"),
            Self::ClassApproval(class) => write!(f, "{CLASS_APPROVAL_PREFIX}{class}"),
            Self::ClassTotal(class) => write!(f, "{CLASS_TOTAL_PREFIX}{class}"),
            Self::ClassStatus(class) => write!(f, "{CLASS_STATUS_PREFIX}{class}"),
        }
    }
}

/// Prefix shared by every approval item key of `class`.
pub fn approval_prefix(class: &ClassId) -> String {
    format!("{APPROVE_PREFIX}{class}_")
}

fn canonical_class(raw: &str) -> Option<ClassId> {
    let class = ClassId::parse(raw).ok()?;
    (class.as_str() == raw).then_some(class)
}

fn parse_index(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: usize = raw.parse().ok()?;
    (index.to_string() == raw).then_some(index)
}
