//! Run driver: bootstraps the schedule and advances it to a time budget.

use des::EventLoop;
use tracing::info;

use crate::bank::Bank;
use crate::report::{Report, Summary};
use crate::state::{Logs, SimulationState};
use crate::{Event, ModelConfig, Result};

pub const SECONDS_PER_HOUR: f64 = 3600.0;

pub struct Simulation {
    config: ModelConfig,
    event_loop: EventLoop<Event, Bank>,
}

impl Simulation {
    /// Validate `config` and schedule the first arrival at time 0.
    pub fn new(config: ModelConfig) -> Result<Simulation> {
        let bank = Bank::new(&config)?;
        Ok(Simulation::with_bank(config, bank))
    }

    /// Drive a prepared bank; the first arrival is scheduled at its clock.
    pub fn with_bank(config: ModelConfig, bank: Bank) -> Simulation {
        let start = bank.state().clock;
        Simulation {
            config,
            event_loop: EventLoop::new(vec![(start, Event::Arrival)], bank),
        }
    }

    /// Dispatch events until the clock reaches `until` simulated seconds.
    ///
    /// The budget is checked between events, never inside one. Calling this
    /// again with a later budget continues the same run.
    pub fn run_until(&mut self, until: f64) -> Result<()> {
        info!(
            from = self.clock(),
            until,
            servers = self.config.num_servers,
            "running simulation"
        );
        self.event_loop.run(until)?;
        let summary = self.summary();
        info!(
            clock = summary.elapsed_seconds,
            customers = summary.customers_processed,
            queue_length = summary.queue_length,
            "simulation stopped"
        );
        Ok(())
    }

    pub fn run_for_hours(&mut self, hours: f64) -> Result<()> {
        self.run_until(hours * SECONDS_PER_HOUR)
    }

    /// Dispatch a single event.
    pub fn step(&mut self) -> Result<()> {
        self.event_loop.step()?;
        Ok(())
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn clock(&self) -> f64 {
        self.event_loop.current_t()
    }

    pub fn pending_events(&self) -> usize {
        self.event_loop.pending()
    }

    pub fn state(&self) -> &SimulationState {
        self.event_loop.agent().state()
    }

    pub fn logs(&self) -> &Logs {
        &self.state().logs
    }

    pub fn summary(&self) -> Summary {
        self.event_loop.stats()
    }

    pub fn report(&self) -> Report {
        Report::new(&self.config, self.state())
    }
}

/// Build, run for `hours` and return the finished simulation.
pub fn run(config: ModelConfig, hours: f64) -> Result<Simulation> {
    let mut simulation = Simulation::new(config)?;
    simulation.run_for_hours(hours)?;
    Ok(simulation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ServerState;

    #[test]
    fn new_simulation_has_one_arrival_pending() {
        let simulation = Simulation::new(ModelConfig::baseline()).unwrap();
        assert_eq!(simulation.pending_events(), 1);
        assert_eq!(simulation.clock(), 0.0);
        assert_eq!(simulation.logs().event_log.len(), 0);
    }

    #[test]
    fn first_step_serves_first_customer_immediately() {
        let mut simulation = Simulation::new(ModelConfig::baseline()).unwrap();
        simulation.step().unwrap();

        assert_eq!(simulation.logs().wait_times, vec![0.0]);
        assert_eq!(simulation.state().servers[0], ServerState::Busy);
        assert_eq!(simulation.pending_events(), 2);
    }

    #[test]
    fn runs_can_be_continued() {
        let mut simulation = Simulation::new(ModelConfig::baseline()).unwrap();
        simulation.run_for_hours(0.5).unwrap();
        let half = simulation.logs().event_log.len();
        simulation.run_for_hours(1.0).unwrap();

        assert!(simulation.logs().event_log.len() > half);
        assert!(simulation.clock() >= SECONDS_PER_HOUR);
    }

    #[test]
    fn invalid_config_is_not_constructed() {
        let config = ModelConfig {
            arrival_distribution: "gamma".to_string(),
            ..ModelConfig::baseline()
        };
        assert!(Simulation::new(config).is_err());
    }
}
