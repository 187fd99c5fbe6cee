//! Value objects for approval state

mod approval_count;
mod class_status;

pub use approval_count::ApprovalCount;
pub use class_status::ClassStatus;
