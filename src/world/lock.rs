use crate::world::Chunk;
use parking_lot::{ArcMutexGuard, Mutex, RawMutex};
use std::sync::Arc;

/// Scoped chunk lock for one logical world operation.
///
/// Holds at most one chunk lock at a time: touching a different chunk releases
/// the previous lock before acquiring the next, so two threads each using their
/// own manager can never deadlock on chunk storage. Call [`clear`](Self::clear)
/// before blocking I/O or handing control back outside the owning call chain.
#[derive(Default)]
pub struct WorldLockManager {
    held: Option<ArcMutexGuard<RawMutex, Chunk>>,
}

impl WorldLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `chunk`, reusing the held lock when it is the same chunk
    pub(crate) fn lock_chunk(&mut self, chunk: &Arc<Mutex<Chunk>>) -> &mut Chunk {
        let reuse = self
            .held
            .as_ref()
            .is_some_and(|guard| Arc::ptr_eq(ArcMutexGuard::mutex(guard), chunk));
        if !reuse {
            self.held = None;
        }
        let guard = self.held.get_or_insert_with(|| Mutex::lock_arc(chunk));
        &mut **guard
    }

    /// Release any held lock
    pub fn clear(&mut self) {
        if self.held.take().is_some() {
            log::trace!("WorldLockManager released chunk lock");
        }
    }

    pub fn is_holding_lock(&self) -> bool {
        self.held.is_some()
    }
}

impl std::fmt::Debug for WorldLockManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldLockManager")
            .field("holding_lock", &self.held.is_some())
            .finish()
    }
}
