//! Generation tickets for discarding stale resolutions
//!
//! Every new request (or a cancel) bumps the generation. A result carrying an
//! older ticket must not be applied, so a slow resolve for a previous id can
//! never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of which request generation a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolveTicket(u64);

impl ResolveTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ResolveGuard {
    latest: AtomicU64,
}

impl ResolveGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, invalidating all earlier tickets
    pub fn issue(&self) -> ResolveTicket {
        ResolveTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Invalidate every outstanding ticket without starting a new request
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: ResolveTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
