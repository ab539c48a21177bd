//! Latest-wins coordination for asynchronous searches.
//!
//! Every call to [`SearchCoordinator::run`] takes a new ticket. A run whose
//! ticket was overtaken by a newer one resolves to
//! [`SearchOutcome::Superseded`] instead of results, so callers can apply
//! whatever they receive without tracking request order themselves.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;

/// Identifies one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Exactly one outcome is produced per search invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<T> {
    Completed(Vec<T>),
    /// A newer search was issued before this one finished.
    Superseded,
}

impl<T> SearchOutcome<T> {
    pub fn into_results(self) -> Option<Vec<T>> {
        match self {
            Self::Completed(results) => Some(results),
            Self::Superseded => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchCoordinator {
    latest: AtomicU64,
    latency: Duration,
}

impl SearchCoordinator {
    /// `latency` simulates backend delay; zero skips the wait entirely.
    pub fn new(latency: Duration) -> Self {
        Self {
            latest: AtomicU64::new(0),
            latency,
        }
    }

    /// Issues a new ticket, superseding every earlier one.
    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Takes a fresh ticket now and runs `compute` after the configured latency.
    ///
    /// The ticket is issued when `run` is called, not when the returned future
    /// is first polled. `compute` should close over a snapshot taken before the
    /// call, so the result reflects the collection as it was when the search
    /// was issued.
    pub fn run<'a, T, F>(&'a self, compute: F) -> impl Future<Output = SearchOutcome<T>> + 'a
    where
        F: FnOnce() -> Vec<T> + 'a,
        T: 'a,
    {
        let ticket = self.issue();
        self.resolve(ticket, compute)
    }

    async fn resolve<T, F>(&self, ticket: SearchTicket, compute: F) -> SearchOutcome<T>
    where
        F: FnOnce() -> Vec<T>,
    {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if !self.is_current(ticket) {
            debug!(
                "event=search_superseded module=search status=noop ticket={} stage=before_compute",
                ticket.0
            );
            return SearchOutcome::Superseded;
        }

        let results = compute();
        if !self.is_current(ticket) {
            debug!(
                "event=search_superseded module=search status=noop ticket={} stage=after_compute",
                ticket.0
            );
            return SearchOutcome::Superseded;
        }
        debug!(
            "event=search_complete module=search status=ok ticket={} hits={}",
            ticket.0,
            results.len()
        );
        SearchOutcome::Completed(results)
    }
}
