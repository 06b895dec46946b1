//! Single-line, multi-teller bank queue
//!
//! Customers arrive at random intervals and join one shared line in front of
//! `num_servers` identical tellers. A free teller takes the next customer
//! straight away. Otherwise the customer waits; when a teller finishes, the
//! earliest waiting priority customer goes next, or the head of the line if
//! there is none.
//!
//! Key pieces:
//! - `variates`: seeded samplers for gaps, service times and the priority flag
//! - `state`: tellers, wait line and the append-only logs
//! - `bank`: the arrival and service-completion transitions
//! - `simulation`: the run loop on top of `des::EventLoop`
//! - `report`: end-of-run summary and JSON/CSV export
//!
//! ```no_run
//! use bank_queue::{ModelConfig, Simulation};
//!
//! let mut simulation = Simulation::new(ModelConfig::baseline())?;
//! simulation.run_for_hours(3.0)?;
//! println!("{}", simulation.summary());
//! # Ok::<(), bank_queue::Error>(())
//! ```

pub mod bank;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod simulation;
pub mod state;
pub mod variates;

pub use bank::Bank;
pub use config::ModelConfig;
pub use error::{Error, Result};
pub use report::{Report, Summary};
pub use simulation::{SECONDS_PER_HOUR, Simulation, run};
pub use state::{Customer, EventRecord, Logs, ServerState, SimulationState};
pub use variates::{ArrivalDistribution, Family, Variates};

use serde::{Deserialize, Serialize};

/// Everything that can happen in the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A new customer walks in
    Arrival,
    /// Teller `n` finishes serving its customer
    ServiceCompletion(usize),
}
