//! Fixed-interval re-render loop
//!
//! Another tab can change the store at any time. The poller re-runs the
//! projection for the active page on a fixed cadence so those changes show
//! up without a reload. It runs until its handle is cancelled or dropped.

use futures_channel::oneshot;
use futures_util::future::{select, Either};

use clearance_domain::PageKind;

use crate::application::services::StatusProjector;
use crate::ports::outbound::{PageSurface, SleepProvider, StorageProvider};

/// Default re-render cadence
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Stops a running poller when cancelled or dropped
#[derive(Debug)]
pub struct PollerHandle {
    stop: Option<oneshot::Sender<()>>,
}

impl PollerHandle {
    pub fn cancel(mut self) {
        self.stop();
    }

    /// Stop the loop when the page is unloaded.
    ///
    /// A page hidden into the back/forward cache (`persisted`) is frozen,
    /// not unloaded, and its loop carries on once the page is shown again.
    pub fn page_hidden(&mut self, persisted: bool) {
        if persisted {
            tracing::debug!("Page cached; poller kept");
            return;
        }
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The loop may already be gone; nothing to stop then.
            let _ = stop.send(());
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop.as_ref().is_some_and(|s| !s.is_canceled())
    }
}

/// Re-renders the active page's projection on a fixed interval
pub struct Poller<S: StorageProvider, P: PageSurface, Sl: SleepProvider> {
    kind: PageKind,
    projector: StatusProjector<S, P>,
    sleep: Sl,
    interval_ms: u64,
}

impl<S: StorageProvider, P: PageSurface, Sl: SleepProvider> Poller<S, P, Sl> {
    pub fn new(kind: PageKind, projector: StatusProjector<S, P>, sleep: Sl, interval_ms: u64) -> Self {
        Self {
            kind,
            projector,
            sleep,
            interval_ms,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Run one projection for the active page.
    ///
    /// Classlist and clearance pages are mutually exclusive; other pages have
    /// nothing to refresh. Returns the number of elements rendered.
    pub fn tick(&self) -> usize {
        match self.kind {
            PageKind::Classlist => self.projector.project_classlist(),
            PageKind::Clearance => self.projector.project_clearance(),
            PageKind::Login | PageKind::Other => 0,
        }
    }

    /// Split into a cancel handle and the loop future.
    ///
    /// The future must be driven by the caller's executor (`spawn_local` on
    /// wasm, a local task or `select!` on desktop). It resolves once the
    /// handle is cancelled or dropped.
    pub fn start(self) -> (PollerHandle, impl std::future::Future<Output = ()>) {
        let (tx, rx) = oneshot::channel();
        let handle = PollerHandle { stop: Some(tx) };
        (handle, self.run(rx))
    }

    async fn run(self, mut stop: oneshot::Receiver<()>) {
        tracing::debug!(kind = ?self.kind, interval_ms = self.interval_ms, "Poller started");
        loop {
            let sleep = self.sleep.sleep_ms(self.interval_ms);
            match select(sleep, &mut stop).await {
                Either::Left(_) => {
                    self.tick();
                }
                Either::Right(_) => break,
            }
        }
        tracing::debug!(kind = ?self.kind, "Poller stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use futures_util::future::join;

    use crate::infrastructure::page::InMemoryPage;
    use crate::infrastructure::platform::{DesktopSleepProvider, MemoryStorageProvider};
    use crate::ports::outbound::StorageProvider;

    fn clearance_poller(
        storage: &MemoryStorageProvider,
        page: &InMemoryPage,
    ) -> Poller<MemoryStorageProvider, InMemoryPage, DesktopSleepProvider> {
        Poller::new(
            PageKind::Clearance,
            StatusProjector::new(storage.clone(), page.clone()),
            DesktopSleepProvider,
            DEFAULT_POLL_INTERVAL_MS,
        )
    }

    #[test]
    fn tick_dispatches_on_page_kind() {
        let storage = MemoryStorageProvider::with_entries([
            ("classStatus_1", "Done"),
            ("classApproval_1", "2/2"),
        ]);
        let page = InMemoryPage::new()
            .with_class_row(Some("1"), true)
            .with_count_cell(Some("1"), "");

        let other = Poller::new(
            PageKind::Other,
            StatusProjector::new(storage.clone(), page.clone()),
            DesktopSleepProvider,
            DEFAULT_POLL_INTERVAL_MS,
        );
        assert_eq!(other.tick(), 0);
        assert_eq!(page.row(0).unwrap().indicator, None);

        let classlist = Poller::new(
            PageKind::Classlist,
            StatusProjector::new(storage.clone(), page.clone()),
            DesktopSleepProvider,
            DEFAULT_POLL_INTERVAL_MS,
        );
        assert_eq!(classlist.tick(), 1);
        assert_eq!(page.count_text(0).as_deref(), Some(""));

        assert_eq!(clearance_poller(&storage, &page).tick(), 1);
        assert_eq!(page.count_text(0).as_deref(), Some("2/2"));
    }

    #[tokio::test(start_paused = true)]
    async fn picks_up_changes_from_another_tab() {
        let storage = MemoryStorageProvider::new();
        let page = InMemoryPage::new().with_count_cell(Some("5"), "—");
        let (handle, poll) = clearance_poller(&storage, &page).start();

        let other_tab = storage.clone();
        let driver = async {
            tokio::time::sleep(Duration::from_millis(1_500)).await;
            assert_eq!(page.count_text(0).as_deref(), Some("—"));

            other_tab.save("classApproval_5", "1/4");
            tokio::time::sleep(Duration::from_millis(1_000)).await;
            assert_eq!(page.count_text(0).as_deref(), Some("1/4"));

            handle.cancel();
        };

        join(poll, driver).await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_loop() {
        let storage = MemoryStorageProvider::new();
        let page = InMemoryPage::new().with_count_cell(Some("5"), "");
        let (handle, poll) = clearance_poller(&storage, &page).start();
        assert!(handle.is_running());

        let driver = async {
            tokio::time::sleep(Duration::from_millis(1_100)).await;
            drop(handle);
            storage.save("classApproval_5", "4/4");
            tokio::time::sleep(Duration::from_millis(5_000)).await;
        };

        join(poll, driver).await;
        assert_eq!(page.count_text(0).as_deref(), Some(""));
    }

    #[tokio::test(start_paused = true)]
    async fn cached_page_keeps_polling_until_unloaded() {
        let storage = MemoryStorageProvider::new();
        let page = InMemoryPage::new().with_count_cell(Some("5"), "");
        let (mut handle, poll) = clearance_poller(&storage, &page).start();

        let driver = async {
            handle.page_hidden(true);
            assert!(handle.is_running());

            storage.save("classApproval_5", "2/4");
            tokio::time::sleep(Duration::from_millis(1_500)).await;
            assert_eq!(page.count_text(0).as_deref(), Some("2/4"));

            handle.page_hidden(false);
            assert!(!handle.is_running());
            storage.save("classApproval_5", "3/4");
            tokio::time::sleep(Duration::from_millis(5_000)).await;
        };

        join(poll, driver).await;
        assert_eq!(page.count_text(0).as_deref(), Some("2/4"));
    }
}
