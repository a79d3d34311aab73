//! Time source for issuance and verification.
//!
//! Token lifetimes are measured in whole epoch seconds. Production code uses
//! [`SystemClock`]; tests swap in a `ManualClock` (feature `test-utils`) to
//! advance time without sleeping.

use std::fmt;

/// Source of the current Unix timestamp in seconds.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> i64;
}

/// Wall-clock time via `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-utils"))]
mod manual {
    use super::Clock;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    /// Clock that only moves when told to.
    ///
    /// Cloning shares the underlying instant, so a test can keep one handle
    /// and give another to a `TokenAuthority`.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Arc<AtomicI64>,
    }

    impl ManualClock {
        #[must_use]
        pub fn new(start: i64) -> Self {
            Self {
                now: Arc::new(AtomicI64::new(start)),
            }
        }

        pub fn advance(&self, seconds: i64) {
            self.now.fetch_add(seconds, Ordering::SeqCst);
        }

        pub fn set(&self, timestamp: i64) {
            self.now.store(timestamp, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> i64 {
            self.now.load(Ordering::SeqCst)
        }
    }
}
