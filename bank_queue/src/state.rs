//! Mutable state of one run: the tellers, the wait line and the append-only
//! logs.

use serde::{Deserialize, Serialize};

use crate::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerState {
    Free,
    Busy,
}

/// A customer standing in the wait line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Simulated seconds at which the customer joined the line.
    pub arrival_time: f64,
    pub is_priority: bool,
}

/// One dispatched event, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: Event,
    pub time: f64,
}

/// Append-only output sequences of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logs {
    /// Minutes, one entry per customer admitted to a teller.
    pub wait_times: Vec<f64>,
    /// Seconds, one entry per service started.
    pub service_durations: Vec<f64>,
    /// Seconds, every inter-arrival gap drawn.
    pub arrival_gaps: Vec<f64>,
    pub event_log: Vec<EventRecord>,
    /// Wait line length at every dispatched event.
    pub queue_length_log: Vec<usize>,
    /// Whether each customer admitted from the wait line was a priority one.
    pub priority_admissions: Vec<bool>,
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub clock: f64,
    pub servers: Vec<ServerState>,
    pub wait_line: Vec<Customer>,
    pub logs: Logs,
}

impl SimulationState {
    pub fn new(num_servers: usize) -> SimulationState {
        SimulationState {
            clock: 0.0,
            servers: vec![ServerState::Free; num_servers],
            wait_line: Vec::new(),
            logs: Logs::default(),
        }
    }

    pub fn num_servers(&self) -> usize {
        self.servers.len()
    }

    pub fn busy_servers(&self) -> usize {
        self.servers
            .iter()
            .filter(|s| **s == ServerState::Busy)
            .count()
    }

    pub fn free_servers(&self) -> usize {
        self.servers
            .iter()
            .filter(|s| **s == ServerState::Free)
            .count()
    }

    /// Lowest-indexed free teller.
    pub fn first_free_server(&self) -> Option<usize> {
        self.servers.iter().position(|s| *s == ServerState::Free)
    }

    /// Position of the next customer to admit: the earliest priority customer
    /// if there is one, otherwise the head of the line.
    pub fn next_in_line(&self) -> Option<usize> {
        if self.wait_line.is_empty() {
            return None;
        }
        let position = self
            .wait_line
            .iter()
            .position(|c| c.is_priority)
            .unwrap_or(0);
        Some(position)
    }

    /// Remove and return the next customer under the priority-jump rule.
    pub fn take_next_customer(&mut self) -> Option<Customer> {
        self.next_in_line().map(|i| self.wait_line.remove(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(arrival_time: f64, is_priority: bool) -> Customer {
        Customer {
            arrival_time,
            is_priority,
        }
    }

    #[test]
    fn new_state_has_all_servers_free() {
        let state = SimulationState::new(4);
        assert_eq!(state.free_servers(), 4);
        assert_eq!(state.busy_servers(), 0);
        assert_eq!(state.first_free_server(), Some(0));
        assert_eq!(state.clock, 0.0);
    }

    #[test]
    fn first_free_server_is_lowest_index() {
        let mut state = SimulationState::new(3);
        state.servers[0] = ServerState::Busy;
        assert_eq!(state.first_free_server(), Some(1));
        state.servers[1] = ServerState::Busy;
        state.servers[2] = ServerState::Busy;
        assert_eq!(state.first_free_server(), None);
    }

    #[test]
    fn head_of_line_without_priority_customers() {
        let mut state = SimulationState::new(1);
        state.wait_line = vec![customer(3.0, false), customer(5.0, false)];
        assert_eq!(state.take_next_customer(), Some(customer(3.0, false)));
        assert_eq!(state.wait_line, vec![customer(5.0, false)]);
    }

    #[test]
    fn earliest_priority_customer_jumps_the_line() {
        let mut state = SimulationState::new(1);
        state.wait_line = vec![
            customer(1.0, false),
            customer(2.0, true),
            customer(3.0, false),
            customer(4.0, true),
        ];
        assert_eq!(state.take_next_customer(), Some(customer(2.0, true)));
        assert_eq!(state.take_next_customer(), Some(customer(4.0, true)));
        assert_eq!(state.take_next_customer(), Some(customer(1.0, false)));
        assert_eq!(state.take_next_customer(), Some(customer(3.0, false)));
        assert_eq!(state.take_next_customer(), None);
    }
}
