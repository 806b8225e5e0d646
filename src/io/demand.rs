// src/io/demand.rs

use crate::error::EvaluatorError;
use crate::model::decision::DECISION_LEN;
use rand::distributions::Uniform;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp1, Poisson};
use serde::{Deserialize, Serialize};

/// Largest accepted Poisson rate. Draws at this rate already saturate `u32`,
/// and the sampler stops terminating for rates near `f64::MAX`.
pub const MAX_POISSON_RATE: f64 = 1e12;

/// Per-period demand value for one trial.
pub type DemandSample = [u32; DECISION_LEN];

/// Configured stochastic demand family and its per-period parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum DemandDistribution {
    /// `D_t = floor(mean_t * X * Y_t)` with a shared shock `X ~ Gamma(1, 1)`
    /// and independent `Y_t ~ Exp(1)`.
    CompoundExponential { mean_demands: [f64; DECISION_LEN] },
    /// Independent Poisson demand per period.
    Poisson { rates: [f64; DECISION_LEN] },
    /// Independent discrete uniform demand over `[low_t, high_t]`.
    Uniform {
        low: [u32; DECISION_LEN],
        high: [u32; DECISION_LEN],
    },
}

impl Default for DemandDistribution {
    fn default() -> Self {
        Self::CompoundExponential {
            mean_demands: [50.0, 20.0, 30.0],
        }
    }
}

impl DemandDistribution {
    /// Builds a distribution from a family name and a flat parameter list.
    ///
    /// # Arguments
    /// * `family` - `compound_exponential`, `poisson` or `uniform`.
    /// * `params` - Three means, three rates, or three lows followed by three highs.
    pub fn from_family(family: &str, params: &[f64]) -> Result<Self, EvaluatorError> {
        let expected = match family {
            "compound_exponential" | "poisson" => DECISION_LEN,
            "uniform" => 2 * DECISION_LEN,
            other => {
                return Err(EvaluatorError::InvalidConfiguration(format!(
                    "unrecognized demand distribution family '{}'",
                    other
                )))
            }
        };
        if params.len() != expected {
            return Err(EvaluatorError::InvalidConfiguration(format!(
                "demand family '{}' takes {} parameters, got {}",
                family,
                expected,
                params.len()
            )));
        }

        let triple = |offset: usize| [params[offset], params[offset + 1], params[offset + 2]];
        let distribution = match family {
            "compound_exponential" => Self::CompoundExponential {
                mean_demands: triple(0),
            },
            "poisson" => Self::Poisson { rates: triple(0) },
            _ => Self::Uniform {
                low: to_units(triple(0))?,
                high: to_units(triple(DECISION_LEN))?,
            },
        };

        distribution.validate()?;
        Ok(distribution)
    }

    pub fn family(&self) -> &'static str {
        match self {
            Self::CompoundExponential { .. } => "compound_exponential",
            Self::Poisson { .. } => "poisson",
            Self::Uniform { .. } => "uniform",
        }
    }

    pub fn validate(&self) -> Result<(), EvaluatorError> {
        self.model().map(|_| ())
    }

    /// Turns the parameters into ready-to-sample distributions.
    pub(crate) fn model(&self) -> Result<DemandModel, EvaluatorError> {
        match self {
            Self::CompoundExponential { mean_demands } => {
                for (period, mean) in mean_demands.iter().enumerate() {
                    if !mean.is_finite() || *mean <= 0.0 {
                        return Err(EvaluatorError::InvalidConfiguration(format!(
                            "mean demand for period {} must be positive, got {}",
                            period + 1,
                            mean
                        )));
                    }
                }
                Ok(DemandModel::CompoundExponential {
                    mean_demands: *mean_demands,
                })
            }
            Self::Poisson { rates } => {
                let mut dists = Vec::with_capacity(DECISION_LEN);
                for (period, rate) in rates.iter().enumerate() {
                    if !rate.is_finite() || *rate > MAX_POISSON_RATE {
                        return Err(EvaluatorError::InvalidConfiguration(format!(
                            "poisson rate for period {} must be finite and at most {}, got {}",
                            period + 1,
                            MAX_POISSON_RATE,
                            rate
                        )));
                    }
                    let dist = Poisson::new(*rate).map_err(|e| {
                        EvaluatorError::InvalidConfiguration(format!(
                            "poisson rate for period {} ({}): {}",
                            period + 1,
                            rate,
                            e
                        ))
                    })?;
                    dists.push(dist);
                }
                Ok(DemandModel::Poisson(dists))
            }
            Self::Uniform { low, high } => {
                let mut dists = Vec::with_capacity(DECISION_LEN);
                for period in 0..DECISION_LEN {
                    if low[period] > high[period] {
                        return Err(EvaluatorError::InvalidConfiguration(format!(
                            "uniform demand for period {} has low {} above high {}",
                            period + 1,
                            low[period],
                            high[period]
                        )));
                    }
                    dists.push(Uniform::new_inclusive(low[period], high[period]));
                }
                Ok(DemandModel::Uniform(dists))
            }
        }
    }
}

fn to_units(values: [f64; DECISION_LEN]) -> Result<[u32; DECISION_LEN], EvaluatorError> {
    let mut units = [0u32; DECISION_LEN];
    for (i, v) in values.iter().enumerate() {
        if !v.is_finite() || *v < 0.0 || v.fract() != 0.0 || *v > u32::MAX as f64 {
            return Err(EvaluatorError::InvalidConfiguration(format!(
                "uniform bound must be a nonnegative integer, got {}",
                v
            )));
        }
        units[i] = *v as u32;
    }
    Ok(units)
}

/// Validated, sampling-ready form of a `DemandDistribution`.
#[derive(Debug, Clone)]
pub(crate) enum DemandModel {
    CompoundExponential { mean_demands: [f64; DECISION_LEN] },
    Poisson(Vec<Poisson<f64>>),
    Uniform(Vec<Uniform<u32>>),
}

/// Seeded stream of per-trial demand samples.
///
/// Each evaluation (or evaluation partition) owns its own sampler, so no
/// random state is ever shared between evaluations.
#[derive(Debug, Clone)]
pub struct DemandSampler {
    rng: SmallRng,
    model: DemandModel,
}

impl DemandSampler {
    pub fn new(distribution: &DemandDistribution, seed: u64) -> Result<Self, EvaluatorError> {
        Ok(Self::from_model(distribution.model()?, seed))
    }

    pub(crate) fn from_model(model: DemandModel, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            model,
        }
    }

    /// Draws one demand value per period.
    pub fn sample(&mut self) -> DemandSample {
        let mut demand = [0u32; DECISION_LEN];
        match &self.model {
            DemandModel::CompoundExponential { mean_demands } => {
                // Gamma with shape 1 and scale 1 is Exp(1).
                let shock: f64 = Exp1.sample(&mut self.rng);
                for (period, mean) in mean_demands.iter().enumerate() {
                    let noise: f64 = Exp1.sample(&mut self.rng);
                    demand[period] = to_demand(mean * shock * noise);
                }
            }
            DemandModel::Poisson(dists) => {
                for (period, dist) in dists.iter().enumerate() {
                    demand[period] = to_demand(dist.sample(&mut self.rng));
                }
            }
            DemandModel::Uniform(dists) => {
                for (period, dist) in dists.iter().enumerate() {
                    demand[period] = dist.sample(&mut self.rng);
                }
            }
        }
        demand
    }
}

/// Truncates a real demand draw toward zero, saturating at `u32::MAX`.
fn to_demand(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value as u32
    }
}
