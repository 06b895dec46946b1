//! The bank agent: arrival and service-completion transitions.

use des::{Agent, Response};
use tracing::{debug, error};

use crate::report::Summary;
use crate::state::{Customer, EventRecord, ServerState, SimulationState};
use crate::variates::Variates;
use crate::{Event, ModelConfig, Result};

pub struct Bank {
    state: SimulationState,
    variates: Variates,
}

impl Bank {
    pub fn new(config: &ModelConfig) -> Result<Bank> {
        config.validate()?;
        let variates = Variates::new(config)?;
        Ok(Bank::from_parts(SimulationState::new(config.num_servers), variates))
    }

    /// Build around an existing state, e.g. one with customers already waiting.
    pub fn from_parts(state: SimulationState, variates: Variates) -> Bank {
        Bank { state, variates }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// A customer walks in.
    ///
    /// The next arrival is always scheduled first, so the pending set can
    /// never drain.
    pub fn handle_arrival(&mut self, current_t: f64) -> Response<Event> {
        let gap = self.variates.next_arrival_gap();
        self.state.logs.arrival_gaps.push(gap);
        let mut response = Response::event(current_t + gap, Event::Arrival);
        debug!(t = current_t, next = current_t + gap, "arrival scheduled");

        match self.state.first_free_server() {
            Some(server) => {
                self.state.servers[server] = ServerState::Busy;
                self.state.logs.wait_times.push(0.0);
                let (t, event) = self.start_service(current_t, server);
                response.push(t, event);
            }
            None => {
                let is_priority = self.variates.next_is_priority();
                self.state.wait_line.push(Customer {
                    arrival_time: current_t,
                    is_priority,
                });
                debug!(
                    t = current_t,
                    is_priority,
                    queue_length = self.state.wait_line.len(),
                    "all servers busy, customer joins the line"
                );
            }
        }
        response
    }

    /// Teller `server` finishes with its customer.
    pub fn handle_service_completion(&mut self, current_t: f64, server: usize) -> Response<Event> {
        if server >= self.state.num_servers() {
            error!(server, t = current_t, "service completion for unknown server");
            return Response::new();
        }

        match self.state.take_next_customer() {
            None => {
                self.state.servers[server] = ServerState::Free;
                debug!(t = current_t, server, "server is free");
                Response::new()
            }
            Some(customer) => {
                let wait = (current_t - customer.arrival_time) / 60.0;
                self.state.logs.wait_times.push(wait);
                self.state
                    .logs
                    .priority_admissions
                    .push(customer.is_priority);
                debug!(
                    t = current_t,
                    server,
                    wait_minutes = wait,
                    is_priority = customer.is_priority,
                    "customer admitted from the line"
                );
                let (t, event) = self.start_service(current_t, server);
                Response::event(t, event)
            }
        }
    }

    fn start_service(&mut self, current_t: f64, server: usize) -> (f64, Event) {
        let duration = self.variates.next_service_duration();
        self.state.logs.service_durations.push(duration);
        debug!(
            t = current_t,
            server,
            done = current_t + duration,
            "service completion scheduled"
        );
        (current_t + duration, Event::ServiceCompletion(server))
    }
}

impl Agent<Event> for Bank {
    type Stats = Summary;

    fn act(&mut self, current_t: f64, data: &Event) -> Response<Event> {
        match data {
            Event::Arrival => self.handle_arrival(current_t),
            Event::ServiceCompletion(server) => self.handle_service_completion(current_t, *server),
        }
    }

    fn observe(&mut self, current_t: f64, data: &Event) {
        self.state.clock = current_t;
        self.state.logs.event_log.push(EventRecord {
            kind: *data,
            time: current_t,
        });
        self.state
            .logs
            .queue_length_log
            .push(self.state.wait_line.len());
    }

    fn stats(&self) -> Summary {
        Summary::from_state(&self.state)
    }
}
