//! Lock helpers and an atomically replaceable shared snapshot
//!
//! Readers clone an `Arc` out of a [`SwapCell`] and work on it without holding
//! any lock. A writer builds the replacement off to the side and swaps the
//! single pointer, so a reader sees either the old value or the new one.
//!
//! Every lock in the crate goes through [`MutexExt`] or [`RwLockExt`], which
//! recover from poisoning and log a warning when they do.

use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Extension trait for Mutex with poison recovery
pub trait MutexExt<T> {
    /// Lock the mutex, recovering from poison errors
    fn lock_recovered(&self) -> MutexGuard<'_, T>;
}

/// Extension trait for RwLock with poison recovery
pub trait RwLockExt<T> {
    /// Acquire a read lock, recovering from poison errors
    fn read_recovered(&self) -> RwLockReadGuard<'_, T>;

    /// Acquire a write lock, recovering from poison errors
    fn write_recovered(&self) -> RwLockWriteGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_recovered(&self) -> MutexGuard<'_, T> {
        match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl<T> RwLockExt<T> for RwLock<T> {
    fn read_recovered(&self) -> RwLockReadGuard<'_, T> {
        match self.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("RwLock was poisoned (read), recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write_recovered(&self) -> RwLockWriteGuard<'_, T> {
        match self.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("RwLock was poisoned (write), recovering");
                poisoned.into_inner()
            }
        }
    }
}

/// Holds the current `Arc<T>` and lets it be replaced as a whole
#[derive(Debug)]
pub struct SwapCell<T> {
    current: RwLock<Arc<T>>,
}

impl<T> SwapCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(value)),
        }
    }

    /// Take a snapshot of the current value
    pub fn load(&self) -> Arc<T> {
        Arc::clone(&self.current.read_recovered())
    }

    /// Publish `value`, returning the snapshot it replaced
    pub fn swap(&self, value: T) -> Arc<T> {
        let next = Arc::new(value);
        std::mem::replace(&mut *self.current.write_recovered(), next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_old_snapshot_survives_swap() {
        let cell = SwapCell::new(vec![1, 2, 3]);
        let before = cell.load();

        let replaced = cell.swap(vec![4]);

        assert_eq!(*before, vec![1, 2, 3]);
        assert!(Arc::ptr_eq(&before, &replaced));
        assert_eq!(*cell.load(), vec![4]);
    }

    #[test]
    fn test_readers_never_see_partial_values() {
        let cell = Arc::new(SwapCell::new(vec![0u32; 64]));

        let writer = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || {
                for generation in 1..200u32 {
                    cell.swap(vec![generation; 64]);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let snapshot = cell.load();
                        assert!(snapshot.iter().all(|v| *v == snapshot[0]));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(cell.load()[0], 199);
    }

    #[test]
    fn test_poisoned_locks_are_recovered() {
        let mutex = Arc::new(Mutex::new(1));
        let lock = Arc::new(RwLock::new(vec![1]));

        let (m, l) = (Arc::clone(&mutex), Arc::clone(&lock));
        let result = thread::spawn(move || {
            let _m = m.lock().unwrap();
            let _l = l.write().unwrap();
            panic!("poison both locks");
        })
        .join();
        assert!(result.is_err());
        assert!(mutex.is_poisoned());
        assert!(lock.is_poisoned());

        *mutex.lock_recovered() += 1;
        lock.write_recovered().push(2);

        assert_eq!(*mutex.lock_recovered(), 2);
        assert_eq!(*lock.read_recovered(), vec![1, 2]);
    }

    #[test]
    fn test_swap_cell_survives_poisoned_lock() {
        let cell = Arc::new(SwapCell::new(1));

        let c = Arc::clone(&cell);
        let result = thread::spawn(move || {
            let _guard = c.current.write().unwrap();
            panic!("poison the snapshot lock");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(*cell.load(), 1);
        cell.swap(2);
        assert_eq!(*cell.load(), 2);
    }
}
