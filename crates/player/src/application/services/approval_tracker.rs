//! Approval tracking
//!
//! Reconciles approve controls with stored per-item flags and keeps the
//! class aggregate (`classApproval_*`, `classTotal_*`, `classStatus_*`) in
//! sync after every approval.
//!
//! Approval is one-way: nothing here ever clears an item flag or moves a
//! class back to Pending.

use clearance_domain::{
    approval_prefix, ApprovalCount, ClassId, ClassStatus, PageContext, StorageKey,
    APPROVED_MARKER,
};

use crate::application::services::StatusProjector;
use crate::ports::outbound::{PageSurface, StorageProvider};

const DONE_STATUS_TEXT: &str = "Done";

/// Result of an approve action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// The item was approved and the aggregate recomputed
    Approved { aggregate: ApprovalCount },
    /// The control was already disabled; nothing changed
    AlreadyApproved,
    /// No control exists at that index
    UnknownItem,
}

/// Tracks approvals for the items listed on the current page
#[derive(Clone)]
pub struct ApprovalTracker<S: StorageProvider, P: PageSurface + Clone> {
    class_id: Option<ClassId>,
    storage: S,
    page: P,
    projector: StatusProjector<S, P>,
}

impl<S: StorageProvider, P: PageSurface + Clone> ApprovalTracker<S, P> {
    pub fn new(context: &PageContext, storage: S, page: P) -> Self {
        Self {
            class_id: context.class_id.clone(),
            projector: StatusProjector::new(storage.clone(), page.clone()),
            storage,
            page,
        }
    }

    pub fn class_id(&self) -> Option<&ClassId> {
        self.class_id.as_ref()
    }

    /// Render controls that the store already records as approved.
    ///
    /// Runs once per page load, before any approve action, so a reload shows
    /// earlier approvals. Does not persist an aggregate. Returns the number of
    /// controls restored.
    pub fn initialize(&self) -> usize {
        let mut restored = 0;
        for index in 0..self.page.approve_control_count() {
            if self.is_stored_approved(index) {
                self.render_approved(index);
                restored += 1;
            }
        }
        tracing::debug!(
            class = self.class_label(),
            restored,
            "Approval controls initialized"
        );
        restored
    }

    /// Approve item `index` and persist the new class aggregate.
    pub fn approve(&self, index: usize) -> ApprovalOutcome {
        if index >= self.page.approve_control_count() {
            tracing::warn!(index, "Approve requested for unknown item");
            return ApprovalOutcome::UnknownItem;
        }
        if self.page.is_control_disabled(index) {
            tracing::debug!(index, "Item already approved");
            return ApprovalOutcome::AlreadyApproved;
        }

        self.render_approved(index);
        self.storage
            .save(&self.item_key(index).to_string(), APPROVED_MARKER);

        let aggregate = self.recompute_aggregate();
        tracing::debug!(
            class = self.class_label(),
            index,
            %aggregate,
            "Item approved"
        );
        ApprovalOutcome::Approved { aggregate }
    }

    /// Recompute `(approved, total)` for the page's class and persist it.
    ///
    /// Without a class the count is computed from the page alone and nothing
    /// is written.
    pub fn recompute_aggregate(&self) -> ApprovalCount {
        let listed = count_u32(self.page.approve_control_count());

        let Some(class_id) = self.class_id.as_ref() else {
            let approved = (0..self.page.approve_control_count())
                .filter(|&i| self.page.is_control_disabled(i))
                .count();
            return ApprovalCount::clamped(count_u32(approved), listed);
        };

        let approved = self.count_stored_approvals(class_id);
        let total = if listed > 0 {
            listed
        } else {
            self.cached_total(class_id).unwrap_or(0)
        };
        let count = ApprovalCount::clamped(approved, total);

        self.storage.save(
            &StorageKey::ClassApproval(class_id.clone()).to_string(),
            &count.to_string(),
        );
        if total > 0 {
            self.storage.save(
                &StorageKey::ClassTotal(class_id.clone()).to_string(),
                &total.to_string(),
            );
        }
        if total > 0 && approved >= total {
            self.mark_done(class_id);
        }

        self.projector.render_class_count(class_id, &count);
        count
    }

    fn mark_done(&self, class_id: &ClassId) {
        let key = StorageKey::ClassStatus(class_id.clone()).to_string();
        let previous = ClassStatus::from_stored(self.storage.load(&key).as_deref());
        self.storage.save(&key, ClassStatus::Done.as_str());
        if !previous.is_done() {
            tracing::info!(class = %class_id, "Class clearance complete");
        }
    }

    /// Scan the whole store for approved items of `class_id`.
    fn count_stored_approvals(&self, class_id: &ClassId) -> u32 {
        let prefix = approval_prefix(class_id);
        let approved = self
            .storage
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&prefix))
            .filter(|key| StorageKey::parse(key).is_some_and(|k| k.is_item_of(class_id)))
            .filter(|key| self.storage.load(key).as_deref() == Some(APPROVED_MARKER))
            .count();
        count_u32(approved)
    }

    fn cached_total(&self, class_id: &ClassId) -> Option<u32> {
        let raw = self
            .storage
            .load(&StorageKey::ClassTotal(class_id.clone()).to_string())?;
        match raw.trim().parse() {
            Ok(total) => Some(total),
            Err(_) => {
                tracing::warn!(class = %class_id, value = %raw, "Ignoring unparsable cached total");
                None
            }
        }
    }

    fn is_stored_approved(&self, index: usize) -> bool {
        self.storage.load(&self.item_key(index).to_string()).as_deref() == Some(APPROVED_MARKER)
    }

    fn render_approved(&self, index: usize) {
        self.page.render_control_approved(index);
        if !self.page.set_item_status(index, DONE_STATUS_TEXT) {
            tracing::debug!(index, "Item has no status cell");
        }
    }

    fn item_key(&self, index: usize) -> StorageKey {
        StorageKey::approval_item(self.class_id.as_ref(), index)
    }

    fn class_label(&self) -> &str {
        self.class_id.as_ref().map(ClassId::as_str).unwrap_or("-")
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::page::InMemoryPage;
    use crate::infrastructure::platform::MemoryStorageProvider;
    use crate::infrastructure::testing::fixtures::{
        class_page, class_page_context, clearance_context, store_approval,
    };
    use crate::ports::outbound::MockPageSurface;
    use clearance_domain::PageKind;

    fn tracker_for(
        class: &str,
        items: usize,
        storage: &MemoryStorageProvider,
    ) -> (ApprovalTracker<MemoryStorageProvider, InMemoryPage>, InMemoryPage) {
        let page = class_page(items);
        let tracker = ApprovalTracker::new(&class_page_context(class), storage.clone(), page.clone());
        (tracker, page)
    }

    #[test]
    fn first_approval_records_item_and_partial_count() {
        let storage = MemoryStorageProvider::new();
        let (tracker, page) = tracker_for("7", 3, &storage);

        assert_eq!(tracker.initialize(), 0);
        for i in 0..3 {
            assert!(!page.control(i).unwrap().disabled);
        }
        assert_eq!(storage.load("classApproval_7"), None);

        let outcome = tracker.approve(0);

        assert_eq!(
            outcome,
            ApprovalOutcome::Approved {
                aggregate: ApprovalCount::clamped(1, 3)
            }
        );
        assert_eq!(storage.load("approve_7_0").as_deref(), Some("approved"));
        assert_eq!(storage.load("classApproval_7").as_deref(), Some("1/3"));
        assert_eq!(storage.load("classTotal_7").as_deref(), Some("3"));
        assert_eq!(storage.load("classStatus_7"), None);

        let control = page.control(0).unwrap();
        assert!(control.disabled);
        assert_eq!(control.label, "Approved");
        assert_eq!(control.status.as_deref(), Some("Done"));
    }

    #[test]
    fn approving_every_item_marks_class_done() {
        let storage = MemoryStorageProvider::new();
        let (tracker, _page) = tracker_for("7", 3, &storage);
        tracker.initialize();

        tracker.approve(0);
        tracker.approve(1);
        assert_eq!(storage.load("classStatus_7"), None);
        tracker.approve(2);

        assert_eq!(storage.load("classApproval_7").as_deref(), Some("3/3"));
        assert_eq!(storage.load("classStatus_7").as_deref(), Some("Done"));
    }

    #[test]
    fn approving_twice_is_idempotent() {
        let storage = MemoryStorageProvider::new();
        let (tracker, _page) = tracker_for("4", 2, &storage);

        tracker.approve(1);
        let snapshot: Vec<_> = ["approve_4_1", "classApproval_4"]
            .iter()
            .map(|k| storage.load(k))
            .collect();

        assert_eq!(tracker.approve(1), ApprovalOutcome::AlreadyApproved);

        let after: Vec<_> = ["approve_4_1", "classApproval_4"]
            .iter()
            .map(|k| storage.load(k))
            .collect();
        assert_eq!(snapshot, after);
        assert_eq!(storage.load("classApproval_4").as_deref(), Some("1/2"));
    }

    #[test]
    fn approved_count_never_decreases() {
        let storage = MemoryStorageProvider::new();
        let (tracker, _page) = tracker_for("9", 5, &storage);

        let mut last = 0;
        for index in [3, 3, 0, 4, 0, 1, 2, 2] {
            tracker.approve(index);
            let count: ApprovalCount = storage.load("classApproval_9").unwrap().parse().unwrap();
            assert!(count.approved() >= last);
            assert!(count.approved() <= count.total());
            last = count.approved();
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn reload_restores_approved_items() {
        let storage = MemoryStorageProvider::new();
        let (tracker, _page) = tracker_for("7", 3, &storage);
        tracker.approve(1);

        let (reloaded, page) = tracker_for("7", 3, &storage);
        assert_eq!(reloaded.initialize(), 1);

        let control = page.control(1).unwrap();
        assert!(control.disabled);
        assert_eq!(control.label, "Approved");
        assert_eq!(control.status.as_deref(), Some("Done"));
        assert!(!page.control(0).unwrap().disabled);
    }

    #[test]
    fn leading_zero_url_shares_the_key_family() {
        let storage = MemoryStorageProvider::new();
        let (tracker, _page) = tracker_for("07", 2, &storage);
        tracker.approve(0);

        let (other, page) = tracker_for("7", 2, &storage);
        assert_eq!(other.initialize(), 1);
        assert!(page.control(0).unwrap().disabled);
    }

    #[test]
    fn approvals_from_another_tab_are_counted() {
        let storage = MemoryStorageProvider::new();
        let (tab_a, _) = tracker_for("3", 4, &storage);
        let (tab_b, _) = tracker_for("3", 4, &storage);

        tab_a.approve(0);
        tab_b.approve(1);

        assert_eq!(storage.load("classApproval_3").as_deref(), Some("2/4"));
    }

    #[test]
    fn other_classes_do_not_leak_into_the_scan() {
        let storage = MemoryStorageProvider::with_entries([
            ("approve_70_0", "approved"),
            ("approve_7", "approved"),
            ("approve_7_9", "pending"),
        ]);
        let (tracker, _page) = tracker_for("7", 2, &storage);

        tracker.approve(0);

        assert_eq!(storage.load("classApproval_7").as_deref(), Some("1/2"));
    }

    #[test]
    fn zero_items_never_marks_done() {
        let storage = MemoryStorageProvider::new();
        let (tracker, _page) = tracker_for("8", 0, &storage);
        store_approval(&storage, &class_page_context("8"), 0);
        store_approval(&storage, &class_page_context("8"), 1);

        let count = tracker.recompute_aggregate();

        assert_eq!(count.total(), 0);
        assert_eq!(storage.load("classApproval_8").as_deref(), Some("0/0"));
        assert_eq!(storage.load("classTotal_8"), None);
        assert_eq!(storage.load("classStatus_8"), None);
    }

    #[test]
    fn cached_total_is_used_when_page_lists_no_items() {
        let storage = MemoryStorageProvider::with_entries([("classTotal_6", "2")]);
        let (tracker, _page) = tracker_for("6", 0, &storage);
        store_approval(&storage, &class_page_context("6"), 0);
        store_approval(&storage, &class_page_context("6"), 1);

        let count = tracker.recompute_aggregate();

        assert_eq!(count, ApprovalCount::clamped(2, 2));
        assert_eq!(storage.load("classStatus_6").as_deref(), Some("Done"));
    }

    #[test]
    fn unparsable_cached_total_reads_as_absent() {
        let storage = MemoryStorageProvider::with_entries([("classTotal_6", "many")]);
        let (tracker, _page) = tracker_for("6", 0, &storage);

        assert_eq!(tracker.recompute_aggregate().total(), 0);
        assert_eq!(storage.load("classTotal_6").as_deref(), Some("many"));
    }

    #[test]
    fn done_status_is_never_reverted() {
        let storage = MemoryStorageProvider::with_entries([("classStatus_5", "Done")]);
        let (tracker, _page) = tracker_for("5", 4, &storage);

        tracker.approve(0);

        assert_eq!(storage.load("classApproval_5").as_deref(), Some("1/4"));
        assert_eq!(storage.load("classStatus_5").as_deref(), Some("Done"));
    }

    #[test]
    fn without_class_uses_global_keys_and_page_count() {
        let context = clearance_context();
        assert_eq!(context.kind, PageKind::Clearance);
        let storage = MemoryStorageProvider::new();
        let page = class_page(3);
        let tracker = ApprovalTracker::new(&context, storage.clone(), page.clone());

        let outcome = tracker.approve(2);

        assert_eq!(
            outcome,
            ApprovalOutcome::Approved {
                aggregate: ApprovalCount::clamped(1, 3)
            }
        );
        assert_eq!(storage.load("approve_2").as_deref(), Some("approved"));
        let mut keys = storage.keys();
        keys.sort();
        assert_eq!(keys, vec!["approve_2"]);
    }

    #[test]
    fn without_class_reload_restores_from_global_keys() {
        let storage = MemoryStorageProvider::new();
        let first = ApprovalTracker::new(&clearance_context(), storage.clone(), class_page(3));
        first.approve(1);

        let page = class_page(3);
        let reloaded = ApprovalTracker::new(&clearance_context(), storage.clone(), page.clone());
        assert_eq!(reloaded.class_id(), None);
        assert_eq!(reloaded.initialize(), 1);

        let control = page.control(1).unwrap();
        assert!(control.disabled);
        assert_eq!(control.label, "Approved");
        assert_eq!(control.status.as_deref(), Some("Done"));
        assert!(!page.control(0).unwrap().disabled);
        assert!(!page.control(2).unwrap().disabled);
        assert_eq!(storage.keys(), vec!["approve_1".to_string()]);
    }

    #[test]
    fn approval_updates_count_cell_on_same_page() {
        let storage = MemoryStorageProvider::new();
        let page = class_page(2).with_count_cell(Some("7"), "");
        let tracker = ApprovalTracker::new(&class_page_context("7"), storage, page.clone());

        tracker.approve(0);

        assert_eq!(page.count_text(0).as_deref(), Some("1/2"));
    }

    #[test]
    fn unknown_index_is_ignored() {
        let storage = MemoryStorageProvider::new();
        let (tracker, _page) = tracker_for("7", 1, &storage);

        assert_eq!(tracker.approve(4), ApprovalOutcome::UnknownItem);
        assert!(storage.is_empty());
    }

    #[test]
    fn missing_status_cell_is_tolerated() {
        let storage = MemoryStorageProvider::new();
        let mut page = MockPageSurface::new();
        page.expect_approve_control_count().return_const(1usize);
        page.expect_is_control_disabled().return_const(false);
        page.expect_render_control_approved()
            .withf(|i| *i == 0)
            .times(1)
            .return_const(());
        page.expect_set_item_status().return_const(false);
        page.expect_count_cells().returning(Vec::new);

        let tracker = ApprovalTracker::new(
            &class_page_context("2"),
            storage.clone(),
            std::sync::Arc::new(page),
        );

        assert!(matches!(tracker.approve(0), ApprovalOutcome::Approved { .. }));
        assert_eq!(storage.load("classApproval_2").as_deref(), Some("1/1"));
        assert_eq!(storage.load("classStatus_2").as_deref(), Some("Done"));
    }
}
