// src/reduce/domain.rs
/*!
Execution domains: where the numeric body of a long reduction runs.

A host environment may serialize all of its work behind one process-wide
execution lock. A reduction must not keep such a lock for its whole numeric
body. [`ExecutionDomain::detach`] expresses that contract: the closure it runs
touches only raw field storage, so the domain may release whatever lock it
represents for the duration and take it back before returning.

- [`Attached`]: no host lock exists; the work runs inline.
- [`HostGuard`]: a held [`HostLock`]; `detach` unlocks it around the work and
  relocks it before handing the result back.
*/

use parking_lot::{Mutex, MutexGuard};
use tracing::trace;

/// Runs work outside the caller's synchronization domain.
pub trait ExecutionDomain {
    fn detach<F, R>(&mut self, work: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send;
}

/// Domain of a caller that holds no host-wide lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Attached;

impl ExecutionDomain for Attached {
    #[inline]
    fn detach<F, R>(&mut self, work: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        work()
    }
}

/// A process-wide execution lock, as held by an embedding host.
#[derive(Debug, Default)]
pub struct HostLock {
    lock: Mutex<()>,
}

impl HostLock {
    pub fn new() -> Self {
        Self { lock: Mutex::new(()) }
    }

    /// Block until the lock is held.
    pub fn acquire(&self) -> HostGuard<'_> {
        HostGuard { guard: self.lock.lock() }
    }

    pub fn try_acquire(&self) -> Option<HostGuard<'_>> {
        self.lock.try_lock().map(|guard| HostGuard { guard })
    }

    /// Whether some caller currently holds the lock.
    pub fn is_held(&self) -> bool {
        self.lock.is_locked()
    }
}

/// Proof of holding a [`HostLock`]; released on drop.
pub struct HostGuard<'a> {
    guard: MutexGuard<'a, ()>,
}

impl ExecutionDomain for HostGuard<'_> {
    fn detach<F, R>(&mut self, work: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        trace!("releasing host lock for detached work");
        let out = MutexGuard::unlocked(&mut self.guard, work);
        trace!("host lock reacquired");
        out
    }
}
