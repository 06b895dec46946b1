//! Minimal discrete-event engine.
//!
//! An [`EventLoop`] owns a [`Scheduler`] and a single [`Agent`]. Each step pops
//! the earliest pending event, lets the agent observe it, then hands it to
//! [`Agent::act`] and schedules whatever the agent returns.

pub mod error;
pub mod scheduler;

pub use error::EventError;
pub use scheduler::{Event, Scheduler};

use tracing::trace;

/// Events an agent wants scheduled, as `(absolute time, data)` pairs.
///
/// Events are scheduled in vector order, which decides tie-breaks.
pub struct Response<T> {
    pub events: Vec<(f64, T)>,
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Response::new()
    }
}

impl<T> Response<T> {
    pub fn new() -> Response<T> {
        Response { events: Vec::new() }
    }

    pub fn event(t: f64, data: T) -> Response<T> {
        Response {
            events: vec![(t, data)],
        }
    }

    pub fn events(events: Vec<(f64, T)>) -> Response<T> {
        Response { events }
    }

    pub fn push(&mut self, t: f64, data: T) {
        self.events.push((t, data));
    }
}

pub trait Agent<T> {
    type Stats;

    fn act(&mut self, _current_t: f64, _data: &T) -> Response<T> {
        Response::new()
    }

    /// Called on every popped event before `act`.
    fn observe(&mut self, _current_t: f64, _data: &T) {}

    fn stats(&self) -> Self::Stats;
}

pub struct EventLoop<T, A> {
    scheduler: Scheduler<T>,
    agent: A,
}

impl<T, A: Agent<T>> EventLoop<T, A> {
    pub fn new(events: Vec<(f64, T)>, agent: A) -> EventLoop<T, A> {
        let mut scheduler = Scheduler::new();
        for (t, data) in events {
            scheduler.schedule(t, data);
        }
        EventLoop { scheduler, agent }
    }

    pub fn current_t(&self) -> f64 {
        self.scheduler.now()
    }

    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    pub fn schedule(&mut self, t: f64, data: T) {
        self.scheduler.schedule(t, data);
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn stats(&self) -> A::Stats {
        self.agent.stats()
    }

    /// Dispatch exactly one event.
    pub fn step(&mut self) -> Result<(), EventError> {
        let event = self.scheduler.pop_next()?;
        let current_t = self.scheduler.now();
        self.agent.observe(current_t, &event.data);
        let response = self.agent.act(current_t, &event.data);
        for (t, data) in response.events {
            self.scheduler.schedule(t, data);
        }
        Ok(())
    }

    /// Dispatch events until the clock reaches `until`.
    ///
    /// The check happens between events, so the last event dispatched may sit
    /// at or beyond `until`.
    pub fn run(&mut self, until: f64) -> Result<(), EventError> {
        while self.scheduler.now() < until {
            self.step()?;
        }
        trace!(t = self.scheduler.now(), pending = self.scheduler.len(), "run stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoddyAgent {
        seen: Vec<(f64, u8)>,
        observed: usize,
    }

    impl NoddyAgent {
        fn new() -> NoddyAgent {
            NoddyAgent {
                seen: Vec::new(),
                observed: 0,
            }
        }
    }

    impl Agent<u8> for NoddyAgent {
        type Stats = usize;

        fn act(&mut self, current_t: f64, data: &u8) -> Response<u8> {
            self.seen.push((current_t, *data));
            Response::new()
        }

        fn observe(&mut self, _current_t: f64, _data: &u8) {
            self.observed += 1;
        }

        fn stats(&self) -> usize {
            self.seen.len()
        }
    }

    #[test]
    fn noddy_run() {
        let mut event_loop = EventLoop::new(vec![(1.0, 1), (2.0, 2)], NoddyAgent::new());

        event_loop.run(10.0).unwrap_err();

        assert_eq!(event_loop.current_t(), 2.0);
        assert_eq!(event_loop.stats(), 2);
        assert_eq!(event_loop.agent().observed, 2);
    }

    #[test]
    fn empty_loop_reports_empty_schedule() {
        let mut event_loop = EventLoop::new(vec![], NoddyAgent::new());
        assert_eq!(event_loop.step(), Err(EventError::EmptySchedule));
    }

    struct Ticker {
        period: f64,
    }

    impl Agent<()> for Ticker {
        type Stats = ();

        fn act(&mut self, current_t: f64, _data: &()) -> Response<()> {
            Response::event(current_t + self.period, ())
        }

        fn stats(&self) {}
    }

    #[test]
    fn run_stops_between_events_at_budget() {
        let mut event_loop = EventLoop::new(vec![(0.0, ())], Ticker { period: 3.0 });

        event_loop.run(10.0).unwrap();

        // events at 0, 3, 6, 9, 12: the one at 12 is popped because 9 < 10
        assert_eq!(event_loop.current_t(), 12.0);
        assert_eq!(event_loop.pending(), 1);
    }

    #[test]
    fn zero_budget_dispatches_nothing() {
        let mut event_loop = EventLoop::new(vec![(0.0, ())], Ticker { period: 1.0 });
        event_loop.run(0.0).unwrap();
        assert_eq!(event_loop.pending(), 1);
        assert_eq!(event_loop.current_t(), 0.0);
    }

    #[test]
    fn response_events_keep_their_order_on_ties() {
        struct Splitter {
            order: Vec<u8>,
        }
        impl Agent<u8> for Splitter {
            type Stats = Vec<u8>;
            fn act(&mut self, current_t: f64, data: &u8) -> Response<u8> {
                self.order.push(*data);
                if *data == 0 {
                    Response::events(vec![(current_t + 1.0, 1), (current_t + 1.0, 2)])
                } else {
                    Response::new()
                }
            }
            fn stats(&self) -> Vec<u8> {
                self.order.clone()
            }
        }

        let mut event_loop = EventLoop::new(vec![(0.0, 0)], Splitter { order: Vec::new() });
        event_loop.step().unwrap();
        assert_eq!(event_loop.pending(), 2);
        event_loop.step().unwrap();
        event_loop.step().unwrap();
        assert_eq!(event_loop.stats(), vec![0, 1, 2]);
        assert_eq!(event_loop.current_t(), 1.0);
    }
}
