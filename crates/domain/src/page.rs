//! Page context
//!
//! The page a script runs on decides which behaviors are active. The context
//! is derived once from the page path at bootstrap and then passed around as
//! a value, so services branch on `PageKind` instead of re-reading the URL.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::ClassId;

const CLASSLIST_MARKER: &str = "faculty_classlist";
const CLEARANCE_MARKER: &str = "faculty_class_clearance";

/// User role inferred from the page name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    /// Detect a role from a page path. `"student"` wins over `"faculty"`.
    pub fn from_page_path(path: &str) -> Option<Self> {
        let lowered = path.to_lowercase();
        if lowered.contains("student") {
            Some(Self::Student)
        } else if lowered.contains("faculty") {
            Some(Self::Faculty)
        } else {
            None
        }
    }

    /// Page a freshly signed-in user lands on
    pub fn landing_page(&self) -> &'static str {
        match self {
            Self::Student => "student_log.html",
            Self::Faculty => "faculty_classlist.html",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Faculty => write!(f, "faculty"),
        }
    }
}

/// Which page is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Any page carrying the login form
    Login,
    /// Faculty overview listing every class with its status
    Classlist,
    /// Faculty overview listing every class with its approval count
    Clearance,
    /// Everything else, including per-class approval pages
    Other,
}

/// Everything the services need to know about the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub kind: PageKind,
    pub role: Option<Role>,
    pub class_id: Option<ClassId>,
}

impl PageContext {
    /// Build the context for a page.
    ///
    /// `has_login_form` comes from the document, not the path: login pages
    /// are recognized by their form.
    pub fn from_location(path: &str, has_login_form: bool) -> Self {
        let lowered = path.to_lowercase();
        let kind = if has_login_form {
            PageKind::Login
        } else if lowered.contains(CLASSLIST_MARKER) {
            PageKind::Classlist
        } else if lowered.contains(CLEARANCE_MARKER) {
            PageKind::Clearance
        } else {
            PageKind::Other
        };

        Self {
            kind,
            role: Role::from_page_path(&lowered),
            class_id: ClassId::from_page_path(&lowered),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classlist_page() {
        let ctx = PageContext::from_location("/app/faculty_classlist.html", false);
        assert_eq!(ctx.kind, PageKind::Classlist);
        assert_eq!(ctx.role, Some(Role::Faculty));
        assert_eq!(ctx.class_id, None);
    }

    #[test]
    fn clearance_page() {
        let ctx = PageContext::from_location("/Faculty_Class_Clearance.html", false);
        assert_eq!(ctx.kind, PageKind::Clearance);
        assert_eq!(ctx.class_id, None);
    }

    #[test]
    fn class_page_carries_class_id() {
        let ctx = PageContext::from_location("/faculty_07.html", false);
        assert_eq!(ctx.kind, PageKind::Other);
        assert_eq!(ctx.class_id.as_ref().map(ClassId::as_str), Some("7"));
    }

    #[test]
    fn login_form_wins_over_path() {
        let ctx = PageContext::from_location("/student_login.html", true);
        assert_eq!(ctx.kind, PageKind::Login);
        assert_eq!(ctx.role, Some(Role::Student));
    }

    #[test]
    fn student_checked_before_faculty() {
        assert_eq!(
            Role::from_page_path("/faculty/student_view.html"),
            Some(Role::Student)
        );
        assert_eq!(Role::from_page_path("/index.html"), None);
    }

    #[test]
    fn landing_pages() {
        assert_eq!(Role::Student.landing_page(), "student_log.html");
        assert_eq!(Role::Faculty.landing_page(), "faculty_classlist.html");
    }
}
