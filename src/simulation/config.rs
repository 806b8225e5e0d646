// src/simulation/config.rs

use crate::error::EvaluatorError;
use crate::io::demand::DemandDistribution;
use crate::model::decision::DECISION_LEN;
use crate::model::inventory::CarryoverPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Evaluator configuration, fixed at construction.
///
/// When read from JSON, `prices` and `purchase_price` must be present;
/// everything else falls back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Unit sale price for periods 1, 2 and 3.
    pub prices: [f64; DECISION_LEN],
    /// Unit purchase cost, paid once up front.
    pub purchase_price: f64,
    #[serde(default)]
    pub demand: DemandDistribution,
    #[serde(default)]
    pub carryover: CarryoverPolicy,
    /// Number of independently seeded chunks the trials are split into.
    #[serde(default = "default_partitions")]
    pub partitions: usize,
}

fn default_seed() -> u64 {
    1
}

fn default_iterations() -> u64 {
    1_000_000
}

fn default_partitions() -> usize {
    1
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            iterations: default_iterations(),
            prices: [100.0, 300.0, 400.0],
            purchase_price: 80.0,
            demand: DemandDistribution::default(),
            carryover: CarryoverPolicy::default(),
            partitions: default_partitions(),
        }
    }
}

impl EvaluatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EvaluatorError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, EvaluatorError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn validate(&self) -> Result<(), EvaluatorError> {
        for (period, price) in self.prices.iter().enumerate() {
            if !price.is_finite() || *price <= 0.0 {
                return Err(EvaluatorError::InvalidConfiguration(format!(
                    "price for period {} must be positive, got {}",
                    period + 1,
                    price
                )));
            }
        }
        if !self.purchase_price.is_finite() || self.purchase_price < 0.0 {
            return Err(EvaluatorError::InvalidConfiguration(format!(
                "purchase price must be nonnegative, got {}",
                self.purchase_price
            )));
        }
        if self.iterations == 0 {
            return Err(EvaluatorError::InvalidConfiguration(
                "iterations must be positive".to_string(),
            ));
        }
        if self.partitions == 0 {
            return Err(EvaluatorError::InvalidConfiguration(
                "partitions must be positive".to_string(),
            ));
        }
        self.demand.validate()
    }
}
