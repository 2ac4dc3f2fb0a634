//! Windowed reorder buffer: out-of-order completion in, strict order out.
//!
//! Workers finish blocks in whatever order the scheduler allows, but the
//! writer must see indices 0, 1, 2, ... with no gaps. The buffer keeps a
//! circular array of `capacity` slots over the window
//! `[next_expected, next_expected + capacity - 1]`; a result lands in slot
//! `index % capacity` and the consumer frees that slot when the window
//! advances past it. A producer whose index is ahead of the window, or whose
//! slot still holds an unconsumed earlier result, parks until the consumer
//! catches up. That caps in-flight results at `capacity` no matter how far
//! the workers race ahead.

use std::sync::{Condvar, Mutex};

/// What a slot currently holds. An occupied slot remembers which block index
/// owns it, so a producer mapping to the same slot a window later cannot
/// clobber it.
enum Slot<T> {
    Free,
    Occupied { index: usize, item: T },
}

pub struct ReorderBuffer<T> {
    state: Mutex<BufferState<T>>,
    next_ready: Condvar,
    slot_freed: Condvar,
    capacity: usize,
}

struct BufferState<T> {
    slots: Vec<Slot<T>>,
    next_expected: usize,
    closed: bool,
}

impl<T> ReorderBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "reorder buffer capacity must be nonzero");
        Self {
            state: Mutex::new(BufferState {
                slots: (0..capacity).map(|_| Slot::Free).collect(),
                next_expected: 0,
                closed: false,
            }),
            next_ready: Condvar::new(),
            slot_freed: Condvar::new(),
            capacity,
        }
    }

    /// Deliver the result for a block index, waiting until that index fits
    /// inside the current window and its slot is free. Results delivered
    /// after close are dropped; the consumer is already gone by then.
    pub fn put(&self, index: usize, item: T) {
        let mut state = self.state.lock().unwrap();
        loop {
            if state.closed {
                return;
            }
            let in_window = index >= state.next_expected
                && index < state.next_expected + self.capacity;
            let slot = index % self.capacity;
            if in_window && matches!(state.slots[slot], Slot::Free) {
                state.slots[slot] = Slot::Occupied { index, item };
                if index == state.next_expected {
                    self.next_ready.notify_one();
                }
                return;
            }
            state = self.slot_freed.wait(state).unwrap();
        }
    }

    /// Take the result for the next expected index, waiting until it arrives.
    /// Frees the slot, advances the window, and wakes parked producers.
    /// Returns `None` once the buffer is closed and that index can no longer
    /// arrive.
    pub fn get_next(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        loop {
            let slot = state.next_expected % self.capacity;
            let ready = matches!(
                state.slots[slot],
                Slot::Occupied { index, .. } if index == state.next_expected
            );
            if ready {
                match std::mem::replace(&mut state.slots[slot], Slot::Free) {
                    Slot::Occupied { item, .. } => {
                        state.next_expected += 1;
                        self.slot_freed.notify_all();
                        return Some(item);
                    }
                    Slot::Free => unreachable!("slot emptied while lock held"),
                }
            }
            if state.closed {
                return None;
            }
            state = self.next_ready.wait(state).unwrap();
        }
    }

    /// Mark the buffer closed and wake waiters on both sides.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.next_ready.notify_all();
        self.slot_freed.notify_all();
    }

    /// Number of results accepted but not yet consumed. Never exceeds the
    /// configured capacity.
    pub fn pending(&self) -> usize {
        let state = self.state.lock().unwrap();
        state
            .slots
            .iter()
            .filter(|s| matches!(s, Slot::Occupied { .. }))
            .count()
    }
}
