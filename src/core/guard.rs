//! # Once-only termination guard.
//!
//! A subscription can end three ways: the source completes, the source fails,
//! or the subscription is disposed (dropped, cancelled through a handle, or
//! its cancellation token fires). Completion is observed on the polling task,
//! disposal can come from any thread, so the two may race.
//!
//! [`TerminationGuard`] resolves the race with a single compare-and-set on a
//! per-subscription flag: exactly one caller of [`try_terminate`](TerminationGuard::try_terminate)
//! ever gets `true`, and only that caller reports the end.
//!
//! ```text
//!   completion ──┐
//!                ├──► CAS(false → true) ──► winner reports End(state)
//!   disposal ────┘                      └─► loser returns, nothing reported
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

/// Per-subscription termination flag.
#[derive(Debug, Default)]
pub struct TerminationGuard {
    terminated: AtomicBool,
}

impl TerminationGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            terminated: AtomicBool::new(false),
        }
    }

    /// Marks the subscription terminated.
    ///
    /// Returns `true` only for the first caller.
    #[inline]
    pub fn try_terminate(&self) -> bool {
        self.terminated
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_first_caller_wins() {
        let guard = TerminationGuard::new();
        assert!(!guard.is_terminated());
        assert!(guard.try_terminate());
        assert!(guard.is_terminated());
        assert!(!guard.try_terminate());
        assert!(!guard.try_terminate());
    }

    #[test]
    fn test_concurrent_callers_single_winner() {
        const THREADS: usize = 8;

        for _ in 0..100 {
            let guard = Arc::new(TerminationGuard::new());
            let barrier = Arc::new(Barrier::new(THREADS));
            let winners = Arc::new(AtomicUsize::new(0));

            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let guard = Arc::clone(&guard);
                    let barrier = Arc::clone(&barrier);
                    let winners = Arc::clone(&winners);
                    thread::spawn(move || {
                        barrier.wait();
                        if guard.try_terminate() {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    })
                })
                .collect();

            for h in handles {
                h.join().unwrap();
            }
            assert_eq!(winners.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_guards_are_independent() {
        let a = TerminationGuard::new();
        let b = TerminationGuard::new();
        assert!(a.try_terminate());
        assert!(b.try_terminate());
    }
}
