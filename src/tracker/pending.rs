//! Drain barrier for work that outlives the callback which started it.
//!
//! Synchronous callbacks always return before the item event that fired
//! them does. A callback that hands work to a runtime does not, so that
//! work registers itself here and [`PendingWork::drain`] waits for it.
//!
//! # Examples
//!
//! ```rust
//! use milestone::{Progress, Tracker, Trigger};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> milestone::Result<()> {
//! let tracker = Tracker::new(4)?;
//! let flushed = Arc::new(AtomicUsize::new(0));
//!
//! let pending = tracker.pending();
//! let counter = Arc::clone(&flushed);
//! tracker.every(Trigger::items_done(2), move |_: &Progress| {
//!     let counter = Arc::clone(&counter);
//!     pending
//!         .spawn(async move {
//!             counter.fetch_add(1, Ordering::SeqCst);
//!         })
//!         .expect("inside a runtime");
//! });
//!
//! for _ in 0..4 {
//!     tracker.item_started();
//!     tracker.item_succeeded();
//! }
//! tracker.complete_async().await;
//! assert_eq!(flushed.load(Ordering::SeqCst), 2);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};

use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Shared count of outstanding work registered by callbacks.
///
/// Cheap to clone; every clone refers to the same tracker's barrier.
#[derive(Debug, Clone)]
pub struct PendingWork {
    outstanding: Arc<watch::Sender<usize>>,
}

impl Default for PendingWork {
    fn default() -> Self {
        let (outstanding, _) = watch::channel(0);
        Self {
            outstanding: Arc::new(outstanding),
        }
    }
}

impl PendingWork {
    /// Registers one unit of outstanding work.
    ///
    /// The work counts as finished when the returned guard is dropped, which
    /// includes unwinding out of a panic.
    pub fn enter(&self) -> PendingGuard {
        self.outstanding.send_modify(|n| *n += 1);
        PendingGuard {
            outstanding: Arc::clone(&self.outstanding),
        }
    }

    /// Spawns `future` on the current tokio runtime as outstanding work.
    ///
    /// The work is registered before the task is spawned, so a drain that
    /// starts after this call returns always waits for it. Fails with
    /// [`Error::NoRuntime`] when called outside of a runtime.
    pub fn spawn<F>(&self, future: F) -> Result<JoinHandle<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let guard = self.enter();
        Ok(handle.spawn(async move {
            let _guard = guard;
            future.await
        }))
    }

    /// Number of registered units that have not finished yet.
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Waits until no registered work is outstanding.
    pub async fn drain(&self) {
        let mut rx = self.outstanding.subscribe();
        // Only errors once the sender is gone, and `self` holds it.
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    /// Blocks the current thread until no registered work is outstanding.
    ///
    /// Must not be called from a task of a current-thread runtime that also
    /// runs the pending work, as that work could then never make progress.
    pub fn drain_blocking(&self) {
        futures::executor::block_on(self.drain());
    }
}

/// Marks one unit of outstanding work; finishes it on drop.
#[derive(Debug)]
#[must_use = "the work is finished as soon as the guard is dropped"]
pub struct PendingGuard {
    outstanding: Arc<watch::Sender<usize>>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.outstanding.send_modify(|n| *n = n.saturating_sub(1));
    }
}
