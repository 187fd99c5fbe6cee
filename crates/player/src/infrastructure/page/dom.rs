//! Browser DOM page surface
//!
//! Elements are re-queried on every call; the document is the source of
//! truth for which controls exist and whether they are disabled.
//!
//! Markup contract:
//! - approve controls: `.approveBtn` buttons, optionally inside a `tr` with a
//!   `.status-cell` or `.status` cell
//! - class list: `tbody tr` rows, id in the first `td`, status in
//!   `.status-cell` or `.td-red, .td-green, .status`
//! - counts: `.approval-count[data-class-id]`
//! - sign-in: `#loginForm`, `#authContainer`, `#authMessage`, `#spinner`

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use clearance_domain::ClassStatus;

use crate::ports::outbound::{ClassRow, CountCell, PageSurface};

const APPROVE_SELECTOR: &str = ".approveBtn";
const ROW_SELECTOR: &str = "tbody tr";
const COUNT_SELECTOR: &str = ".approval-count";
const CLASS_ID_ATTR: &str = "data-class-id";

const PENDING_STYLE: &str = "td-red";
const DONE_STYLE: &str = "td-green";

/// Page surface over the live document
#[derive(Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Surface for the current window's document, if there is one
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// All elements matching `selector`, in document order
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            tracing::warn!("Invalid selector {}", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn approve_button(&self, index: usize) -> Option<HtmlButtonElement> {
        self.query_all(APPROVE_SELECTOR)
            .into_iter()
            .nth(index)?
            .dyn_into::<HtmlButtonElement>()
            .ok()
    }

    fn item_status_cell(button: &Element) -> Option<Element> {
        let row = button.closest("tr").ok().flatten()?;
        first_match(&row, &[".status-cell", ".status"])
    }

    fn row_status_cell(row: &Element) -> Option<Element> {
        first_match(row, &[".status-cell", ".td-red, .td-green, .status"])
    }
}

fn first_match(parent: &Element, selectors: &[&str]) -> Option<Element> {
    selectors
        .iter()
        .find_map(|selector| parent.query_selector(selector).ok().flatten())
}

fn swap_class(element: &Element, remove: &str, add: &str) {
    let classes = element.class_list();
    if let Err(e) = classes.remove_1(remove) {
        tracing::debug!("Failed to remove class {}: {:?}", remove, e);
    }
    if let Err(e) = classes.add_1(add) {
        tracing::debug!("Failed to add class {}: {:?}", add, e);
    }
}

impl PageSurface for DomPage {
    fn approve_control_count(&self) -> usize {
        self.query_all(APPROVE_SELECTOR).len()
    }

    fn is_control_disabled(&self, index: usize) -> bool {
        self.approve_button(index)
            .map(|b| b.disabled())
            .unwrap_or(false)
    }

    fn render_control_approved(&self, index: usize) {
        let Some(button) = self.approve_button(index) else {
            return;
        };
        button.set_text_content(Some("Approved"));
        swap_class(&button, "btn-success", "btn-secondary");
        button.set_disabled(true);
    }

    fn set_item_status(&self, index: usize, text: &str) -> bool {
        let Some(cell) = self
            .approve_button(index)
            .and_then(|b| Self::item_status_cell(&b))
        else {
            return false;
        };
        cell.set_text_content(Some(text));
        true
    }

    fn class_rows(&self) -> Vec<ClassRow> {
        self.query_all(ROW_SELECTOR)
            .iter()
            .map(|row| ClassRow {
                id_text: row
                    .query_selector("td:first-child")
                    .ok()
                    .flatten()
                    .and_then(|cell| cell.text_content()),
                has_status_cell: Self::row_status_cell(row).is_some(),
            })
            .collect()
    }

    fn render_class_status(&self, row: usize, status: ClassStatus) {
        let Some(cell) = self
            .query_all(ROW_SELECTOR)
            .get(row)
            .and_then(Self::row_status_cell)
        else {
            return;
        };
        cell.set_text_content(Some(status.as_str()));
        match status {
            ClassStatus::Done => swap_class(&cell, PENDING_STYLE, DONE_STYLE),
            ClassStatus::Pending => swap_class(&cell, DONE_STYLE, PENDING_STYLE),
        }
    }

    fn count_cells(&self) -> Vec<CountCell> {
        self.query_all(COUNT_SELECTOR)
            .iter()
            .map(|cell| CountCell {
                class_attr: cell.get_attribute(CLASS_ID_ATTR),
            })
            .collect()
    }

    fn set_count_text(&self, cell: usize, text: &str) {
        if let Some(element) = self.query_all(COUNT_SELECTOR).get(cell) {
            element.set_text_content(Some(text));
        }
    }

    fn has_login_form(&self) -> bool {
        self.document.get_element_by_id("loginForm").is_some()
    }

    fn show_auth_status(&self, message: &str, busy: bool) {
        if let Some(banner) = self.document.get_element_by_id("authMessage") {
            banner.set_text_content(Some(message));
        }
        if let Some(spinner) = self
            .document
            .get_element_by_id("spinner")
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            let display = if busy { "inline-block" } else { "none" };
            if let Err(e) = spinner.style().set_property("display", display) {
                tracing::debug!("Failed to toggle spinner: {:?}", e);
            }
        }
        if let Some(container) = self.document.get_element_by_id("authContainer") {
            if let Err(e) = container.class_list().add_1("show") {
                tracing::debug!("Failed to show auth container: {:?}", e);
            }
        }
    }
}
