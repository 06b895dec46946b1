//! Random variate generators for inter-arrival gaps, service durations and
//! the priority flag.
//!
//! All three draw from one seeded `StdRng`, so a fixed seed replays the
//! exact same sample sequence. Samples are returned as drawn: a Gaussian gap
//! or duration can come out negative and is not clamped here.

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution, Exp, Normal, Uniform};

use crate::{Error, ModelConfig, Result};

/// Inter-arrival distribution family, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Gaussian,
    DiscreteUniform,
    ContinuousUniform,
    Exponential,
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(s: &str) -> Result<Family> {
        match s.trim().to_lowercase().as_str() {
            "gaussian" | "gauss-norm" => Ok(Family::Gaussian),
            "discrete-uniform" | "uniforme discreta" => Ok(Family::DiscreteUniform),
            "continuous-uniform" | "uniforme continua" => Ok(Family::ContinuousUniform),
            "exponential" | "exponencial" => Ok(Family::Exponential),
            other => Err(Error::config(format!(
                "unknown arrival distribution '{}', expected one of 'gaussian', \
                 'discrete-uniform', 'continuous-uniform' or 'exponential'",
                other
            ))),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Gaussian => "gaussian",
            Family::DiscreteUniform => "discrete-uniform",
            Family::ContinuousUniform => "continuous-uniform",
            Family::Exponential => "exponential",
        };
        f.write_str(name)
    }
}

/// A fully parameterised inter-arrival distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrivalDistribution {
    Gaussian { mean: f64, std_dev: f64 },
    /// Whole seconds, both bounds inclusive.
    DiscreteUniform { min: i64, max: i64 },
    ContinuousUniform { min: f64, max: f64 },
    /// Rate is `1 / mean`.
    Exponential { mean: f64 },
}

impl ArrivalDistribution {
    /// Pick the parameters the configured family uses and check them.
    pub fn from_config(config: &ModelConfig) -> Result<ArrivalDistribution> {
        let family: Family = config.arrival_distribution.parse()?;
        let distribution = match family {
            Family::Gaussian => ArrivalDistribution::Gaussian {
                mean: config.arrival_mean,
                std_dev: config.arrival_std_dev,
            },
            Family::DiscreteUniform => ArrivalDistribution::DiscreteUniform {
                min: config.arrival_min.ceil() as i64,
                max: config.arrival_max.floor() as i64,
            },
            Family::ContinuousUniform => ArrivalDistribution::ContinuousUniform {
                min: config.arrival_min,
                max: config.arrival_max,
            },
            Family::Exponential => ArrivalDistribution::Exponential {
                mean: config.arrival_mean,
            },
        };
        // surfaces parameter errors at configuration time
        ArrivalSampler::new(&distribution)?;
        Ok(distribution)
    }

    pub fn family(&self) -> Family {
        match self {
            ArrivalDistribution::Gaussian { .. } => Family::Gaussian,
            ArrivalDistribution::DiscreteUniform { .. } => Family::DiscreteUniform,
            ArrivalDistribution::ContinuousUniform { .. } => Family::ContinuousUniform,
            ArrivalDistribution::Exponential { .. } => Family::Exponential,
        }
    }
}

enum ArrivalSampler {
    Gaussian(Normal<f64>),
    DiscreteUniform(Uniform<i64>),
    ContinuousUniform(Uniform<f64>),
    Exponential(Exp<f64>),
}

impl ArrivalSampler {
    fn new(distribution: &ArrivalDistribution) -> Result<ArrivalSampler> {
        // the clock only moves on positive gaps
        let can_advance = match *distribution {
            ArrivalDistribution::Gaussian { mean, .. } => mean > 0.0,
            ArrivalDistribution::DiscreteUniform { max, .. } => max > 0,
            ArrivalDistribution::ContinuousUniform { max, .. } => max > 0.0,
            ArrivalDistribution::Exponential { .. } => true,
        };
        if !can_advance {
            return Err(Error::config(format!(
                "{} arrivals never produce a positive gap: {:?}",
                distribution.family(),
                distribution
            )));
        }
        match *distribution {
            ArrivalDistribution::Gaussian { mean, std_dev } => {
                Ok(ArrivalSampler::Gaussian(gaussian("arrival", mean, std_dev)?))
            }
            ArrivalDistribution::DiscreteUniform { min, max } => Uniform::new_inclusive(min, max)
                .map(ArrivalSampler::DiscreteUniform)
                .map_err(|e| {
                    Error::config(format!(
                        "discrete-uniform arrivals need whole seconds with min <= max ({}..={}): {}",
                        min, max, e
                    ))
                }),
            ArrivalDistribution::ContinuousUniform { min, max } => {
                Uniform::new_inclusive(min, max)
                    .map(ArrivalSampler::ContinuousUniform)
                    .map_err(|e| {
                        Error::config(format!(
                            "continuous-uniform arrivals need finite min <= max ({}..={}): {}",
                            min, max, e
                        ))
                    })
            }
            ArrivalDistribution::Exponential { mean } => {
                if !mean.is_finite() || mean <= 0.0 {
                    return Err(Error::config(format!(
                        "exponential arrivals need a positive finite mean, got {}",
                        mean
                    )));
                }
                Exp::new(1.0 / mean)
                    .map(ArrivalSampler::Exponential)
                    .map_err(|e| Error::config(format!("exponential arrivals: {}", e)))
            }
        }
    }

    fn sample(&self, rng: &mut StdRng) -> f64 {
        match self {
            ArrivalSampler::Gaussian(d) => d.sample(rng),
            ArrivalSampler::DiscreteUniform(d) => d.sample(rng) as f64,
            ArrivalSampler::ContinuousUniform(d) => d.sample(rng),
            ArrivalSampler::Exponential(d) => d.sample(rng),
        }
    }
}

fn gaussian(what: &str, mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    if !mean.is_finite() {
        return Err(Error::config(format!("{} mean must be finite, got {}", what, mean)));
    }
    Normal::new(mean, std_dev).map_err(|e| {
        Error::config(format!(
            "{} standard deviation must be finite and non-negative, got {}: {}",
            what, std_dev, e
        ))
    })
}

/// The single random stream of a run and the distributions drawn from it.
pub struct Variates {
    rng: StdRng,
    distribution: ArrivalDistribution,
    arrival: ArrivalSampler,
    service: Normal<f64>,
    priority: Bernoulli,
}

impl Variates {
    pub fn new(config: &ModelConfig) -> Result<Variates> {
        let distribution = ArrivalDistribution::from_config(config)?;
        let arrival = ArrivalSampler::new(&distribution)?;
        let service = gaussian("service", config.service_mean, config.service_std_dev)?;
        let priority = Bernoulli::new(config.priority_probability).map_err(|e| {
            Error::config(format!(
                "priority_probability {}: {}",
                config.priority_probability, e
            ))
        })?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Variates {
            rng,
            distribution,
            arrival,
            service,
            priority,
        })
    }

    pub fn distribution(&self) -> ArrivalDistribution {
        self.distribution
    }

    /// Seconds until the next arrival.
    pub fn next_arrival_gap(&mut self) -> f64 {
        self.arrival.sample(&mut self.rng)
    }

    /// Seconds of service for one customer.
    pub fn next_service_duration(&mut self) -> f64 {
        self.service.sample(&mut self.rng)
    }

    pub fn next_is_priority(&mut self) -> bool {
        self.priority.sample(&mut self.rng)
    }
}
