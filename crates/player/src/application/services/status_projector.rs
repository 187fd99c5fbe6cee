//! Status projection
//!
//! Read-only views of the approval state: class rows get their Pending/Done
//! status, count cells get their `approved/total` snapshot. Nothing here
//! writes to the store.

use clearance_domain::{ApprovalCount, ClassId, ClassStatus, StorageKey};

use crate::ports::outbound::{PageSurface, StorageProvider};

/// Renders stored class state into the page
#[derive(Clone)]
pub struct StatusProjector<S: StorageProvider, P: PageSurface> {
    storage: S,
    page: P,
}

impl<S: StorageProvider, P: PageSurface> StatusProjector<S, P> {
    pub fn new(storage: S, page: P) -> Self {
        Self { storage, page }
    }

    /// Render the status of every class row.
    ///
    /// Rows without an id cell, with a blank id, or without a status cell are
    /// skipped. A missing stored status, or an id that is not a number,
    /// renders as Pending. Returns the number of rows
    /// rendered.
    pub fn project_classlist(&self) -> usize {
        let mut rendered = 0;
        for (row, class_row) in self.page.class_rows().into_iter().enumerate() {
            if !class_row.has_status_cell {
                continue;
            }
            let Some(id_text) = class_row.id_text.as_deref().map(str::trim) else {
                continue;
            };
            if id_text.is_empty() {
                tracing::debug!(row, "Skipping class row without an id");
                continue;
            }

            // A non-numeric id names no class, so nothing can be Done for it.
            let status = match ClassId::parse_leading(id_text) {
                Some(class_id) => {
                    let stored = self
                        .storage
                        .load(&StorageKey::ClassStatus(class_id).to_string());
                    ClassStatus::from_stored(stored.as_deref())
                }
                None => ClassStatus::Pending,
            };
            self.page.render_class_status(row, status);
            rendered += 1;
        }
        rendered
    }

    /// Copy each class's stored approval count into its count cells.
    ///
    /// Cells whose class has no stored count keep whatever they show.
    /// Returns the number of cells updated.
    pub fn project_clearance(&self) -> usize {
        let mut updated = 0;
        for (cell, count_cell) in self.page.count_cells().into_iter().enumerate() {
            let Some(class_id) = count_cell
                .class_attr
                .as_deref()
                .and_then(|raw| ClassId::parse(raw).ok())
            else {
                tracing::debug!(cell, "Skipping count cell without a class id");
                continue;
            };

            let key = StorageKey::ClassApproval(class_id).to_string();
            if let Some(count) = self.storage.load(&key) {
                self.page.set_count_text(cell, &count);
                updated += 1;
            }
        }
        updated
    }

    /// Show a freshly computed count in every cell tagged with `class_id`
    pub fn render_class_count(&self, class_id: &ClassId, count: &ApprovalCount) {
        let text = count.to_string();
        for (cell, count_cell) in self.page.count_cells().into_iter().enumerate() {
            let matches = count_cell
                .class_attr
                .as_deref()
                .and_then(|raw| ClassId::parse(raw).ok())
                .is_some_and(|id| &id == class_id);
            if matches {
                self.page.set_count_text(cell, &text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::page::InMemoryPage;
    use crate::infrastructure::platform::MemoryStorageProvider;
    use crate::ports::outbound::{ClassRow, MockPageSurface};

    #[test]
    fn done_class_renders_done_with_positive_indicator() {
        let storage = MemoryStorageProvider::with_entries([("classStatus_7", "Done")]);
        let page = InMemoryPage::new().with_class_row(Some("07"), true);
        let projector = StatusProjector::new(storage, page.clone());

        assert_eq!(projector.project_classlist(), 1);

        let row = page.row(0).unwrap();
        assert_eq!(row.status_text.as_deref(), Some("Done"));
        assert_eq!(row.indicator, Some(ClassStatus::Done));
    }

    #[test]
    fn unknown_class_renders_pending() {
        let storage = MemoryStorageProvider::with_entries([("classStatus_3", "Done")]);
        let page = InMemoryPage::new()
            .with_class_row(Some("2"), true)
            .with_class_row(Some("3"), true);
        let projector = StatusProjector::new(storage, page.clone());

        projector.project_classlist();

        assert_eq!(page.row(0).unwrap().indicator, Some(ClassStatus::Pending));
        assert_eq!(page.row(0).unwrap().status_text.as_deref(), Some("Pending"));
        assert_eq!(page.row(1).unwrap().indicator, Some(ClassStatus::Done));
    }

    #[test]
    fn rows_without_id_or_status_cell_are_skipped() {
        let storage = MemoryStorageProvider::new();
        let page = InMemoryPage::new()
            .with_class_row(None, true)
            .with_class_row(Some("  "), true)
            .with_class_row(Some("4"), false);
        let projector = StatusProjector::new(storage, page.clone());

        assert_eq!(projector.project_classlist(), 0);
        assert_eq!(page.row(0).unwrap().indicator, None);
        assert_eq!(page.row(1).unwrap().status_text.as_deref(), Some(""));
    }

    #[test]
    fn non_numeric_id_renders_pending() {
        let storage = MemoryStorageProvider::with_entries([("classStatus_0", "Done")]);
        let page = InMemoryPage::new().with_class_row(Some("Total"), true);
        let projector = StatusProjector::new(storage, page.clone());

        assert_eq!(projector.project_classlist(), 1);

        let row = page.row(0).unwrap();
        assert_eq!(row.status_text.as_deref(), Some("Pending"));
        assert_eq!(row.indicator, Some(ClassStatus::Pending));
    }

    #[test]
    fn clearance_leaves_cells_without_stored_count_untouched() {
        let storage = MemoryStorageProvider::new();
        let page = InMemoryPage::new().with_count_cell(Some("5"), "—");
        let projector = StatusProjector::new(storage, page.clone());

        assert_eq!(projector.project_clearance(), 0);
        assert_eq!(page.count_text(0).as_deref(), Some("—"));
    }

    #[test]
    fn clearance_copies_stored_count_literally() {
        let storage = MemoryStorageProvider::with_entries([("classApproval_5", "2/4")]);
        let page = InMemoryPage::new()
            .with_count_cell(Some("05"), "")
            .with_count_cell(Some("6"), "0/1")
            .with_count_cell(None, "?");
        let projector = StatusProjector::new(storage, page.clone());

        assert_eq!(projector.project_clearance(), 1);
        assert_eq!(page.count_text(0).as_deref(), Some("2/4"));
        assert_eq!(page.count_text(1).as_deref(), Some("0/1"));
        assert_eq!(page.count_text(2).as_deref(), Some("?"));
    }

    #[test]
    fn render_class_count_targets_matching_cells_only() {
        let page = InMemoryPage::new()
            .with_count_cell(Some("7"), "")
            .with_count_cell(Some("70"), "");
        let projector = StatusProjector::new(MemoryStorageProvider::new(), page.clone());
        let seven = ClassId::parse("7").unwrap();

        projector.render_class_count(&seven, &ApprovalCount::clamped(1, 3));

        assert_eq!(page.count_text(0).as_deref(), Some("1/3"));
        assert_eq!(page.count_text(1).as_deref(), Some(""));
    }

    #[test]
    fn projection_never_writes_the_store() {
        let storage = MemoryStorageProvider::new();
        let mut page = MockPageSurface::new();
        page.expect_class_rows().returning(|| {
            vec![ClassRow {
                id_text: Some("9".to_string()),
                has_status_cell: true,
            }]
        });
        page.expect_render_class_status()
            .withf(|row, status| *row == 0 && *status == ClassStatus::Pending)
            .times(1)
            .return_const(());
        page.expect_count_cells().returning(Vec::new);

        let projector = StatusProjector::new(storage.clone(), page);
        projector.project_classlist();
        projector.project_clearance();

        assert!(storage.is_empty());
    }
}
