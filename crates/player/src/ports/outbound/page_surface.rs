//! Page surface port
//!
//! The document a service renders into. Elements are addressed by position
//! in document order: approve control `i`, class row `i`, count cell `i`.
//! Implementations tolerate missing elements by doing nothing.

use std::sync::Arc;

use clearance_domain::ClassStatus;

/// One row of the class list table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassRow {
    /// Text of the first cell, if the row has one
    pub id_text: Option<String>,
    /// Whether the row has a cell the status can be written into
    pub has_status_cell: bool,
}

/// One element showing a class's approval count
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountCell {
    /// Raw value of the class identifier attribute
    pub class_attr: Option<String>,
}

/// Port for reading and rendering page elements
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PageSurface {
    // -------------------------------------------------------------------------
    // Approve controls
    // -------------------------------------------------------------------------

    /// Number of approve controls on the page
    fn approve_control_count(&self) -> usize;

    /// Whether control `index` is already disabled
    fn is_control_disabled(&self, index: usize) -> bool;

    /// Relabel control `index` as "Approved", restyle it, and disable it
    fn render_control_approved(&self, index: usize);

    /// Write `text` into the status cell of control `index`'s row.
    ///
    /// Returns false when the control has no row or the row has no status cell.
    fn set_item_status(&self, index: usize, text: &str) -> bool;

    // -------------------------------------------------------------------------
    // Class list
    // -------------------------------------------------------------------------

    fn class_rows(&self) -> Vec<ClassRow>;

    /// Render `status` into row `row`'s status cell with its indicator style
    fn render_class_status(&self, row: usize, status: ClassStatus);

    // -------------------------------------------------------------------------
    // Approval counts
    // -------------------------------------------------------------------------

    fn count_cells(&self) -> Vec<CountCell>;

    fn set_count_text(&self, cell: usize, text: &str);

    // -------------------------------------------------------------------------
    // Sign-in
    // -------------------------------------------------------------------------

    fn has_login_form(&self) -> bool;

    /// Show the authentication banner with `message`, spinner on when `busy`
    fn show_auth_status(&self, message: &str, busy: bool);
}

/// Shared surfaces, e.g. a mock that services clone into their projector
impl<T: PageSurface + ?Sized> PageSurface for Arc<T> {
    fn approve_control_count(&self) -> usize {
        (**self).approve_control_count()
    }

    fn is_control_disabled(&self, index: usize) -> bool {
        (**self).is_control_disabled(index)
    }

    fn render_control_approved(&self, index: usize) {
        (**self).render_control_approved(index)
    }

    fn set_item_status(&self, index: usize, text: &str) -> bool {
        (**self).set_item_status(index, text)
    }

    fn class_rows(&self) -> Vec<ClassRow> {
        (**self).class_rows()
    }

    fn render_class_status(&self, row: usize, status: ClassStatus) {
        (**self).render_class_status(row, status)
    }

    fn count_cells(&self) -> Vec<CountCell> {
        (**self).count_cells()
    }

    fn set_count_text(&self, cell: usize, text: &str) {
        (**self).set_count_text(cell, text)
    }

    fn has_login_form(&self) -> bool {
        (**self).has_login_form()
    }

    fn show_auth_status(&self, message: &str, busy: bool) {
        (**self).show_auth_status(message, busy)
    }
}
