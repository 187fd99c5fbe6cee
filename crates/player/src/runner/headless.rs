//! Headless desktop runner
//!
//! Builds the configured page in memory, runs the load sequence against the
//! file-backed store, applies any configured approvals, then keeps polling
//! until Ctrl-C. With `CLEARANCE_PAGE=faculty_classlist.html` this is a live
//! console view of class statuses written by other processes.

use anyhow::{Context, Result};

use clearance_domain::{PageContext, PageKind};

use crate::application::services::{LoginService, PageController};
use crate::config::{HeadlessPageConfig, PlayerConfig};
use crate::infrastructure::page::InMemoryPage;
use crate::infrastructure::platform::{
    DesktopSleepProvider, DesktopStorageProvider, LogNavigator,
};

/// Page context for a headless page path
///
/// There is no markup to inspect, so a path naming a login page stands in
/// for the presence of the sign-in form.
pub fn headless_context(path: &str) -> PageContext {
    let has_login_form = path.to_lowercase().contains("login");
    PageContext::from_location(path, has_login_form)
}

/// Build the in-memory page described by `config` for `context`
pub fn headless_page(config: &HeadlessPageConfig, context: &PageContext) -> InMemoryPage {
    let mut page = InMemoryPage::new();
    match context.kind {
        PageKind::Login => {
            page = page.with_login_form();
        }
        PageKind::Classlist => {
            for class in &config.classes {
                page = page.with_class_row(Some(class.as_str()), true);
            }
        }
        PageKind::Clearance => {
            for class in &config.classes {
                page = page.with_count_cell(Some(class.as_str()), "");
            }
        }
        PageKind::Other => {
            page = page.with_approve_controls(config.items);
        }
    }
    page
}

/// Run the headless page.
///
/// Login pages play the sign-in sequence once and return. Every other page
/// polls until Ctrl-C.
pub async fn run_headless(config: PlayerConfig) -> Result<()> {
    let context = headless_context(&config.headless.path);
    let page = headless_page(&config.headless, &context);

    if context.kind == PageKind::Login {
        let service = LoginService::new(
            context.role,
            page,
            DesktopSleepProvider,
            LogNavigator,
            config.login,
        );
        let landing = service
            .sign_in(&config.headless.email, &config.headless.password)
            .await
            .context("Sign-in failed")?;
        tracing::info!(landing, "Signed in");
        return Ok(());
    }

    let storage = match &config.storage_path {
        Some(path) => DesktopStorageProvider::at(path),
        None => DesktopStorageProvider::new(),
    };
    tracing::info!(path = ?storage.path(), "Using storage file");

    let controller = PageController::new(
        context,
        storage,
        page,
        DesktopSleepProvider,
        config.poll_interval_ms,
    );
    let poller = controller.start();

    for &index in &config.headless.approve {
        let outcome = controller.tracker().approve(index);
        tracing::info!(index, ?outcome, "Applied configured approval");
    }

    let (handle, poll) = poller.start();
    tokio::select! {
        () = poll => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            tracing::info!("Shutting down");
        }
    }
    handle.cancel();
    Ok(())
}
