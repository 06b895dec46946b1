//! Model configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! num_servers = 4
//! arrival_distribution = "exponential"
//! arrival_mean = 45.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::variates::ArrivalDistribution;
use crate::{Error, Result};

/// Constructor-time parameters of one run. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub num_servers: usize,
    /// `None` seeds from the operating system, so runs are not reproducible.
    pub seed: Option<u64>,

    // Arrivals
    pub arrival_distribution: String,
    /// Used by `gaussian` and `exponential`.
    pub arrival_mean: f64,
    /// Used by `gaussian`.
    pub arrival_std_dev: f64,
    /// Used by `discrete-uniform` and `continuous-uniform`.
    pub arrival_min: f64,
    pub arrival_max: f64,

    // Service (always Gaussian)
    pub service_mean: f64,
    pub service_std_dev: f64,

    pub priority_probability: f64,
}

impl ModelConfig {
    /// Three tellers with roughly one arrival per minute and three-minute
    /// services.
    pub fn baseline() -> Self {
        ModelConfig {
            num_servers: 3,
            seed: Some(1),
            arrival_distribution: "gaussian".to_string(),
            arrival_mean: 59.0,
            arrival_std_dev: 8.0,
            arrival_min: 40.0,
            arrival_max: 100.0,
            service_mean: 180.0,
            service_std_dev: 30.0,
            priority_probability: 0.1,
        }
    }

    /// Starting values of the interactive front end's sliders.
    pub fn interactive_defaults() -> Self {
        ModelConfig {
            arrival_mean: 50.0,
            arrival_std_dev: 10.0,
            arrival_min: 50.0,
            arrival_max: 150.0,
            service_mean: 170.0,
            ..ModelConfig::baseline()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: ModelConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        ModelConfig::from_toml_str(&s)
    }

    pub fn arrival(&self) -> Result<ArrivalDistribution> {
        ArrivalDistribution::from_config(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_servers == 0 {
            return Err(Error::config("num_servers must be at least 1"));
        }
        if !self.service_mean.is_finite() {
            return Err(Error::config("service_mean must be finite"));
        }
        if !self.service_std_dev.is_finite() || self.service_std_dev < 0.0 {
            return Err(Error::config(
                "service_std_dev must be finite and non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.priority_probability) {
            return Err(Error::config(format!(
                "priority_probability must be within [0, 1], got {}",
                self.priority_probability
            )));
        }
        self.arrival().map(|_| ())
    }
}

/// The baseline without a seed: a config file that omits `seed` gets a fresh
/// random stream on every run.
impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            seed: None,
            ..ModelConfig::baseline()
        }
    }
}
