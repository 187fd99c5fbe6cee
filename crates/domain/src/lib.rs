//! Clearance domain types.
//!
//! Everything in this crate is pure: class identifiers, the storage key
//! scheme shared by every page, approval value objects, and the page context
//! value that replaces path sniffing at call sites.

pub mod error;
pub mod ids;
pub mod keys;
pub mod page;
pub mod session;
pub mod value_objects;

pub use error::DomainError;
pub use ids::ClassId;
pub use keys::{approval_prefix, StorageKey, APPROVED_MARKER};
pub use page::{PageContext, PageKind, Role};
pub use session::Credentials;
pub use value_objects::{ApprovalCount, ClassStatus};
