//! Synthetic entity id allocation.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::types::EntityId;

/// First id handed out by the process-wide allocator.
///
/// Servers number real entities upwards from zero, so starting the synthetic
/// range at 2^30 keeps the two ranges apart for any realistic session.
pub const SYNTHETIC_ID_BASE: i32 = 0x4000_0000;

static GLOBAL: EntityIdAllocator = EntityIdAllocator::starting_at(SYNTHETIC_ID_BASE);

/// Issues unique ids for client-only entities.
///
/// A monotonically increasing atomic counter; safe to share between threads.
/// Ids are never returned to the pool. Exhausting the range is not handled.
#[derive(Debug)]
pub struct EntityIdAllocator {
    next: AtomicI32,
}

impl EntityIdAllocator {
    /// Creates an allocator whose first id is `first`.
    #[must_use]
    pub const fn starting_at(first: i32) -> Self {
        Self {
            next: AtomicI32::new(first),
        }
    }

    /// Returns the process-wide allocator.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns a fresh id.
    pub fn next(&self) -> EntityId {
        EntityId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntityIdAllocator {
    fn default() -> Self {
        Self::starting_at(SYNTHETIC_ID_BASE)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn ids_are_sequential() {
        let allocator = EntityIdAllocator::starting_at(10);
        assert_eq!(allocator.next(), EntityId::new(10));
        assert_eq!(allocator.next(), EntityId::new(11));
        assert_eq!(allocator.next(), EntityId::new(12));
    }

    #[test]
    fn default_starts_at_synthetic_base() {
        let allocator = EntityIdAllocator::default();
        assert_eq!(allocator.next().raw(), SYNTHETIC_ID_BASE);
    }

    #[test]
    fn global_ids_are_synthetic() {
        let id = EntityIdAllocator::global().next();
        assert!(id.raw() >= SYNTHETIC_ID_BASE);
    }

    #[test]
    fn concurrent_ids_are_unique() {
        let allocator = Arc::new(EntityIdAllocator::starting_at(0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let allocator = Arc::clone(&allocator);
                thread::spawn(move || (0..250).map(|_| allocator.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
