//! Page bootstrap
//!
//! The once-per-load sequence every page runs: restore approvals, render the
//! class list if this is the class list page, and build the poller. Event
//! wiring (click handlers, form submission) belongs to the runner.

use clearance_domain::{PageContext, PageKind};

use crate::application::services::{ApprovalTracker, Poller, StatusProjector};
use crate::ports::outbound::{PageSurface, SleepProvider, StorageProvider};

/// Services for one loaded page
pub struct PageController<S: StorageProvider, P: PageSurface + Clone, Sl: SleepProvider> {
    context: PageContext,
    tracker: ApprovalTracker<S, P>,
    projector: StatusProjector<S, P>,
    sleep: Sl,
    poll_interval_ms: u64,
}

impl<S: StorageProvider, P: PageSurface + Clone, Sl: SleepProvider> PageController<S, P, Sl> {
    pub fn new(context: PageContext, storage: S, page: P, sleep: Sl, poll_interval_ms: u64) -> Self {
        Self {
            tracker: ApprovalTracker::new(&context, storage.clone(), page.clone()),
            projector: StatusProjector::new(storage, page),
            context,
            sleep,
            poll_interval_ms,
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    pub fn tracker(&self) -> &ApprovalTracker<S, P> {
        &self.tracker
    }

    /// Run the load-time rendering and return the page's poller.
    pub fn start(&self) -> Poller<S, P, Sl> {
        tracing::info!(
            kind = ?self.context.kind,
            role = ?self.context.role,
            class = self.context.class_id.as_ref().map(|c| c.as_str()).unwrap_or("-"),
            "Page loaded"
        );

        self.tracker.initialize();
        if self.context.kind == PageKind::Classlist {
            self.projector.project_classlist();
        }

        Poller::new(
            self.context.kind,
            self.projector.clone(),
            self.sleep.clone(),
            self.poll_interval_ms,
        )
    }
}
