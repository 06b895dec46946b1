//! Pending event set and simulation clock
//!
//! Events are kept in a `BinaryHeap` ordered as a min-heap on
//! `(t, seq)`. `seq` is assigned at insertion, so two events scheduled for the
//! same instant are dispatched in the order they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::EventError;

#[derive(Debug, Clone)]
pub struct Event<T> {
    pub t: f64,
    pub seq: u64,
    pub data: T,
}

impl<T> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Event<T> {}

impl<T> Ord for Event<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed so the heap pops the earliest (t, seq) first
        other
            .t
            .total_cmp(&self.t)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct Scheduler<T> {
    queue: BinaryHeap<Event<T>>,
    current_t: f64,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Scheduler<T> {
        Scheduler {
            queue: BinaryHeap::new(),
            current_t: 0.0,
            next_seq: 0,
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> f64 {
        self.current_t
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Time of the event that `pop_next` would return.
    pub fn peek_time(&self) -> Option<f64> {
        self.queue.peek().map(|event| event.t)
    }

    /// Insert an event at absolute time `t`.
    ///
    /// An event requested before the current time is held at the current time,
    /// so the clock never runs backwards.
    pub fn schedule(&mut self, t: f64, data: T) {
        let t = if t < self.current_t {
            debug!(
                requested = t,
                now = self.current_t,
                "event requested in the past, holding at current time"
            );
            self.current_t
        } else {
            t
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Event { t, seq, data });
    }

    /// Remove the earliest event and advance the clock to its time.
    pub fn pop_next(&mut self) -> Result<Event<T>, EventError> {
        let event = self.queue.pop().ok_or(EventError::EmptySchedule)?;
        self.current_t = event.t;
        trace!(t = event.t, seq = event.seq, pending = self.queue.len(), "popped event");
        Ok(event)
    }
}
