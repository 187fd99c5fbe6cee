//! In-memory page surface
//!
//! A stand-in document: approve controls, class rows, and count cells held
//! in plain structs. Rendered changes are logged at info level so the
//! headless runner doubles as a console dashboard.

use std::sync::{Arc, Mutex, MutexGuard};

use clearance_domain::ClassStatus;

use crate::ports::outbound::{ClassRow, CountCell, PageSurface};

pub const PENDING_LABEL: &str = "Approve";
pub const APPROVED_LABEL: &str = "Approved";

/// Visual style of an approve control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStyle {
    Success,
    Secondary,
}

/// Snapshot of one approve control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub label: String,
    pub style: ControlStyle,
    pub disabled: bool,
    /// Text of the row's status cell; `None` when the row has no status cell
    pub status: Option<String>,
}

/// Snapshot of one class row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowState {
    pub id_text: Option<String>,
    /// `None` when the row has no status cell
    pub status_text: Option<String>,
    /// Indicator applied to the status cell, if any
    pub indicator: Option<ClassStatus>,
}

/// Snapshot of one count cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountCellState {
    pub class_attr: Option<String>,
    pub text: String,
}

#[derive(Debug, Default)]
struct PageState {
    controls: Vec<ControlState>,
    rows: Vec<RowState>,
    cells: Vec<CountCellState>,
    login_form: bool,
    auth_status: Option<(String, bool)>,
}

/// Page surface held in memory
///
/// Clones share the same document.
#[derive(Clone, Default)]
pub struct InMemoryPage {
    state: Arc<Mutex<PageState>>,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` approve controls, each in a row with a status cell
    pub fn with_approve_controls(self, count: usize) -> Self {
        for _ in 0..count {
            self.push_control(true);
        }
        self
    }

    /// Add one approve control; `status_cell` controls whether its row has one
    pub fn with_control(self, status_cell: bool) -> Self {
        self.push_control(status_cell);
        self
    }

    pub fn with_class_row(self, id_text: Option<&str>, status_cell: bool) -> Self {
        self.lock().rows.push(RowState {
            id_text: id_text.map(str::to_string),
            status_text: status_cell.then(String::new),
            indicator: None,
        });
        self
    }

    pub fn with_count_cell(self, class_attr: Option<&str>, text: &str) -> Self {
        self.lock().cells.push(CountCellState {
            class_attr: class_attr.map(str::to_string),
            text: text.to_string(),
        });
        self
    }

    pub fn with_login_form(self) -> Self {
        self.lock().login_form = true;
        self
    }

    pub fn control(&self, index: usize) -> Option<ControlState> {
        self.lock().controls.get(index).cloned()
    }

    pub fn row(&self, index: usize) -> Option<RowState> {
        self.lock().rows.get(index).cloned()
    }

    pub fn count_text(&self, index: usize) -> Option<String> {
        self.lock().cells.get(index).map(|c| c.text.clone())
    }

    /// Current auth banner message and spinner state
    pub fn auth_status(&self) -> Option<(String, bool)> {
        self.lock().auth_status.clone()
    }

    fn push_control(&self, status_cell: bool) {
        self.lock().controls.push(ControlState {
            label: PENDING_LABEL.to_string(),
            style: ControlStyle::Success,
            disabled: false,
            status: status_cell.then(|| "Pending".to_string()),
        });
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        // A panic while rendering leaves plain data behind; keep using it.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PageSurface for InMemoryPage {
    fn approve_control_count(&self) -> usize {
        self.lock().controls.len()
    }

    fn is_control_disabled(&self, index: usize) -> bool {
        self.lock()
            .controls
            .get(index)
            .map(|c| c.disabled)
            .unwrap_or(false)
    }

    fn render_control_approved(&self, index: usize) {
        if let Some(control) = self.lock().controls.get_mut(index) {
            control.label = APPROVED_LABEL.to_string();
            control.style = ControlStyle::Secondary;
            control.disabled = true;
            tracing::info!(index, "Item approved");
        }
    }

    fn set_item_status(&self, index: usize, text: &str) -> bool {
        match self
            .lock()
            .controls
            .get_mut(index)
            .and_then(|c| c.status.as_mut())
        {
            Some(status) => {
                *status = text.to_string();
                true
            }
            None => false,
        }
    }

    fn class_rows(&self) -> Vec<ClassRow> {
        self.lock()
            .rows
            .iter()
            .map(|r| ClassRow {
                id_text: r.id_text.clone(),
                has_status_cell: r.status_text.is_some(),
            })
            .collect()
    }

    fn render_class_status(&self, row: usize, status: ClassStatus) {
        let mut state = self.lock();
        let Some(row_state) = state.rows.get_mut(row) else {
            return;
        };
        let Some(text) = row_state.status_text.as_mut() else {
            return;
        };
        if text != status.as_str() {
            tracing::info!(
                class = row_state.id_text.as_deref().unwrap_or_default(),
                status = status.as_str(),
                "Class status rendered"
            );
        }
        *text = status.as_str().to_string();
        row_state.indicator = Some(status);
    }

    fn count_cells(&self) -> Vec<CountCell> {
        self.lock()
            .cells
            .iter()
            .map(|c| CountCell {
                class_attr: c.class_attr.clone(),
            })
            .collect()
    }

    fn set_count_text(&self, cell: usize, text: &str) {
        if let Some(cell_state) = self.lock().cells.get_mut(cell) {
            if cell_state.text != text {
                tracing::info!(
                    class = cell_state.class_attr.as_deref().unwrap_or_default(),
                    count = text,
                    "Approval count rendered"
                );
            }
            cell_state.text = text.to_string();
        }
    }

    fn has_login_form(&self) -> bool {
        self.lock().login_form
    }

    fn show_auth_status(&self, message: &str, busy: bool) {
        tracing::info!(busy, "{}", message);
        self.lock().auth_status = Some((message.to_string(), busy));
    }
}
