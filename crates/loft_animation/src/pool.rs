//! Handle recycling
//!
//! A thread-safe pool of fungible handles. Completion callbacks on the tick
//! driver produce into it while spawn call sites consume from it, so access
//! is guarded by a mutex; no ordering is promised between pooled items.
//!
//! By default the pool grows without bound, which is acceptable for a
//! bounded-concurrency visual effect. A capacity can be set to drop overflow
//! items instead of retaining them indefinitely.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Thread-safe pool of reusable handles.
#[derive(Debug)]
pub struct RecyclePool<T> {
    items: Mutex<VecDeque<T>>,
    capacity: Option<usize>,
}

impl<T> RecyclePool<T> {
    /// An unbounded pool.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            capacity: None,
        }
    }

    /// A pool that holds at most `capacity` items; overflow puts are dropped.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            capacity: Some(capacity),
        }
    }

    /// Take any pooled item, without blocking. Returns `None` when empty.
    pub fn take(&self) -> Option<T> {
        // A poisoned lock means a holder panicked mid-shutdown; report empty
        // rather than propagate.
        match self.items.lock() {
            Ok(mut items) => items.pop_front(),
            Err(_) => None,
        }
    }

    /// Return an item to the pool.
    ///
    /// The item is dropped instead of pooled when the pool is at capacity or
    /// the lock is poisoned by a shutdown-time panic.
    pub fn put(&self, item: T) {
        if let Ok(mut items) = self.items.lock() {
            if self.capacity.map_or(true, |cap| items.len() < cap) {
                items.push_back(item);
            }
        }
    }

    /// Remove every pooled item, invoking `visit` exactly once per item.
    ///
    /// Items are detached from the pool before `visit` runs, so the visitor
    /// may freely call back into the pool.
    pub fn drain_with<F>(&self, visit: F)
    where
        F: FnMut(T),
    {
        let drained = match self.items.lock() {
            Ok(mut items) => std::mem::take(&mut *items),
            Err(_) => return,
        };
        drained.into_iter().for_each(visit);
    }

    /// Drop every pooled item.
    pub fn clear(&self) {
        self.drain_with(drop);
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for RecyclePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_round_trip() {
        let pool = RecyclePool::new();
        assert!(pool.take().is_none());

        pool.put(7u32);
        assert_eq!(pool.take(), Some(7));
        assert!(pool.take().is_none());
    }

    #[test]
    fn test_drain_visits_each_item_once() {
        let pool = RecyclePool::new();
        for i in 0..5 {
            pool.put(i);
        }

        let mut visited = Vec::new();
        pool.drain_with(|item| visited.push(item));

        visited.sort_unstable();
        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
        assert!(pool.is_empty());
        assert!(pool.take().is_none());
    }

    #[test]
    fn test_bounded_pool_drops_overflow() {
        let pool = RecyclePool::bounded(2);
        pool.put(1);
        pool.put(2);
        pool.put(3);

        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_visitor_may_reenter() {
        let pool = RecyclePool::new();
        pool.put(1);
        pool.put(2);

        pool.drain_with(|item| pool.put(item * 10));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_concurrent_put_and_take() {
        let pool = Arc::new(RecyclePool::new());

        let producer = {
            let pool = Arc::clone(&pool);
            std::thread::spawn(move || {
                for i in 0..100 {
                    pool.put(i);
                }
            })
        };

        let mut taken = 0;
        while taken < 50 {
            if pool.take().is_some() {
                taken += 1;
            }
        }
        producer.join().unwrap();

        pool.drain_with(|_| taken += 1);
        assert_eq!(taken, 100);
    }
}
