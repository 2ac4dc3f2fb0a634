//! Blocking FIFO between the reader and the worker pool.
//!
//! Bounded so the reader cannot race arbitrarily far ahead of the workers;
//! a full queue parks the producer until a consumer makes room. Closing the
//! queue wakes everyone, but items already queued still drain in order.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

pub struct WorkQueue<T> {
    state: Mutex<QueueState<T>>,
    item_available: Condvar,
    space_available: Condvar,
    capacity: usize,
}

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

impl<T> WorkQueue<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "work queue capacity must be nonzero");
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            item_available: Condvar::new(),
            space_available: Condvar::new(),
            capacity,
        }
    }

    /// Enqueue an item, waiting while the queue is full. A closed queue stops
    /// waiting for space; late pushes are still delivered to the consumers.
    pub fn push(&self, item: T) {
        let mut state = self.state.lock().unwrap();
        while state.items.len() >= self.capacity && !state.closed {
            state = self.space_available.wait(state).unwrap();
        }
        state.items.push_back(item);
        self.item_available.notify_one();
    }

    /// Dequeue the oldest item, waiting while the queue is empty. Returns
    /// `None` only once the queue is closed and fully drained, which tells
    /// the calling worker to exit.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(item) = state.items.pop_front() {
                self.space_available.notify_one();
                return Some(item);
            }
            if state.closed {
                return None;
            }
            state = self.item_available.wait(state).unwrap();
        }
    }

    /// Mark the queue closed and wake every waiter on both sides.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.item_available.notify_all();
        self.space_available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn fifo_order() {
        let queue = WorkQueue::new(8);
        for i in 0..5 {
            queue.push(i);
        }
        queue.close();
        for i in 0..5 {
            assert_eq!(queue.pop(), Some(i));
        }
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn queued_items_survive_close() {
        let queue = WorkQueue::new(4);
        queue.push("left behind");
        queue.close();
        assert!(queue.is_closed());
        assert_eq!(queue.pop(), Some("left behind"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn pop_waits_for_push() {
        let queue = WorkQueue::new(2);
        thread::scope(|scope| {
            let consumer = scope.spawn(|| queue.pop());
            thread::sleep(Duration::from_millis(20));
            queue.push(17);
            assert_eq!(consumer.join().unwrap(), Some(17));
        });
    }

    #[test]
    fn push_waits_for_space() {
        let queue = WorkQueue::new(1);
        queue.push(1);
        thread::scope(|scope| {
            let producer = scope.spawn(|| {
                // Queue is full, this blocks until the pop below.
                queue.push(2);
            });
            thread::sleep(Duration::from_millis(20));
            assert_eq!(queue.pop(), Some(1));
            producer.join().unwrap();
            assert_eq!(queue.pop(), Some(2));
        });
    }

    #[test]
    fn every_item_reaches_exactly_one_worker() {
        let queue = WorkQueue::new(4);
        let seen = AtomicUsize::new(0);
        thread::scope(|scope| {
            for _ in 0..3 {
                scope.spawn(|| {
                    while let Some(v) = queue.pop() {
                        seen.fetch_add(v, Ordering::Relaxed);
                    }
                });
            }
            for i in 1..=100_usize {
                queue.push(i);
            }
            queue.close();
        });
        assert_eq!(seen.load(Ordering::Relaxed), 5050);
    }
}
