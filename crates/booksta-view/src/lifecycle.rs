//! Mount lifecycle and request sequencing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "still mounted" flag.
///
/// Clones observe the same flag, so a detached task can check it before
/// writing back.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Issues monotonically increasing tokens; only the latest is current.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    latest: u64,
}

impl Sequencer {
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Makes every outstanding token stale.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_token_is_current() {
        let mut seq = Sequencer::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        seq.invalidate();
        assert!(!seq.is_current(second));
    }

    #[test]
    fn clones_share_liveness() {
        let liveness = Liveness::new();
        let observer = liveness.clone();
        assert!(observer.is_alive());
        liveness.unmount();
        assert!(!observer.is_alive());
    }
}
