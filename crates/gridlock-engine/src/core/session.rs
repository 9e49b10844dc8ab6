use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative liveness signal for the whole session.
///
/// Created valid by the runtime and invalidated exactly once, when the window
/// is closing. The render, worker, and watchdog loops poll it and exit on
/// their own; nothing is ever force-terminated.
#[derive(Debug, Clone)]
pub struct SessionFlag {
    valid: Arc<AtomicBool>,
}

impl SessionFlag {
    pub fn new() -> Self {
        Self {
            valid: Arc::new(AtomicBool::new(true)),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Marks the session as over. Idempotent.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

impl Default for SessionFlag {
    fn default() -> Self {
        Self::new()
    }
}
