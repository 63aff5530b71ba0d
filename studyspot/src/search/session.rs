//! Per-user result state with a guard against out-of-order responses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::library_search::{LibrarySearch, LibrarySource, SearchMode, SearchOutcome};

/// Sequence number handed out when a search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// The current result list for one user.
///
/// Every search takes a ticket before it starts. When it finishes, its
/// outcome replaces the current results only if no later search has
/// started in the meantime. Results are replaced, never merged.
#[derive(Debug, Default)]
pub struct SearchSession {
    issued: AtomicU64,
    current: Mutex<SearchOutcome>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently started search.
    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Record a finished search.
    ///
    /// Returns `false`, leaving the results untouched, if a later search
    /// has been started.
    pub fn complete(&self, ticket: SearchTicket, outcome: SearchOutcome) -> bool {
        let mut current = self.lock();
        // Checked under the lock so a stale completion cannot land after a
        // newer one.
        if !self.is_latest(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.issued.load(Ordering::SeqCst),
                "dropping stale search results"
            );
            return false;
        }
        *current = outcome;
        true
    }

    /// The results of the latest completed search.
    pub fn results(&self) -> SearchOutcome {
        self.lock().clone()
    }

    /// Run `mode` and record its outcome if it is still the latest search.
    pub async fn search<S: LibrarySource>(
        &self,
        search: &LibrarySearch<'_, S>,
        mode: &SearchMode,
    ) -> bool {
        let ticket = self.begin();
        let outcome = search.run(mode).await;
        self.complete(ticket, outcome)
    }

    fn lock(&self) -> MutexGuard<'_, SearchOutcome> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
