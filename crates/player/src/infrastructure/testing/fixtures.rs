//! Simple test fixtures used across unit tests.

use clearance_domain::{PageContext, StorageKey, APPROVED_MARKER};

use crate::infrastructure::page::InMemoryPage;
use crate::infrastructure::platform::MemoryStorageProvider;

/// Context for the approval page of class `class`
pub fn class_page_context(class: &str) -> PageContext {
    PageContext::from_location(&format!("/faculty_{class}.html"), false)
}

pub fn classlist_context() -> PageContext {
    PageContext::from_location("/faculty_classlist.html", false)
}

pub fn clearance_context() -> PageContext {
    PageContext::from_location("/faculty_class_clearance.html", false)
}

/// A class approval page listing `items` students
pub fn class_page(items: usize) -> InMemoryPage {
    InMemoryPage::new().with_approve_controls(items)
}

/// Approve item `index` of `context`'s class directly in the store
pub fn store_approval(storage: &MemoryStorageProvider, context: &PageContext, index: usize) {
    use crate::ports::outbound::StorageProvider;

    let key = StorageKey::approval_item(context.class_id.as_ref(), index);
    storage.save(&key.to_string(), APPROVED_MARKER);
}
