// src/simulation/engine.rs

use crate::error::EvaluatorError;
use crate::io::demand::{DemandModel, DemandSampler};
use crate::model::decision::Decision;
use crate::model::inventory::{trial_revenue, units_sold};
use crate::simulation::config::EvaluatorConfig;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Score reported for infeasible decisions. Far below any attainable revenue.
pub const INFEASIBLE_PENALTY: f64 = -1e9;

/// Outcome of scoring one decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Sample mean of sales revenue minus the up-front purchase cost.
    pub mean_revenue: f64,
    pub feasible: bool,
    /// Trials actually run.
    pub iterations: u64,
    pub cancelled: bool,
}

impl EvaluationResult {
    pub fn infeasible() -> Self {
        Self {
            mean_revenue: INFEASIBLE_PENALTY,
            feasible: false,
            iterations: 0,
            cancelled: false,
        }
    }
}

/// Cooperative cancellation shared between a caller and running evaluations.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// Sum of trial revenues for one partition of the trial range.
#[derive(Debug, Clone, Copy, Default)]
struct PartitionTotals {
    revenue: f64,
    trials: u64,
}

/// Monte Carlo estimator of expected net revenue for reservation decisions.
///
/// The evaluator holds only immutable configuration. Every call builds its
/// own samplers, so `&self` can be shared across threads.
#[derive(Debug, Clone)]
pub struct RevenueEvaluator {
    config: EvaluatorConfig,
    model: DemandModel,
}

impl RevenueEvaluator {
    pub fn new(config: EvaluatorConfig) -> Result<Self, EvaluatorError> {
        config.validate()?;
        let model = config.demand.model()?;
        Ok(Self { config, model })
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Scores a decision with the configured seed and trial count.
    pub fn evaluate(&self, decision: &Decision) -> EvaluationResult {
        self.run(decision, None)
    }

    /// Like [`RevenueEvaluator::evaluate`] but stops between trials once
    /// `flag` is raised. The mean covers only the trials that ran.
    pub fn evaluate_with_cancellation(
        &self,
        decision: &Decision,
        flag: &CancellationFlag,
    ) -> EvaluationResult {
        self.run(decision, Some(flag))
    }

    fn run(&self, decision: &Decision, flag: Option<&CancellationFlag>) -> EvaluationResult {
        if !decision.is_feasible() {
            debug!(?decision, "infeasible decision, skipping simulation");
            return EvaluationResult::infeasible();
        }

        let sizes = partition_sizes(self.config.iterations, self.config.partitions);
        let run_one = |(index, trials): (usize, &u64)| self.run_partition(decision, index, *trials, flag);

        let totals: Vec<PartitionTotals> = if sizes.len() > 1 {
            sizes.par_iter().enumerate().map(run_one).collect()
        } else {
            sizes.iter().enumerate().map(run_one).collect()
        };

        // Combine in partition order so the result never depends on scheduling.
        let mut revenue = 0.0;
        let mut trials = 0u64;
        for partition in &totals {
            revenue += partition.revenue;
            trials += partition.trials;
        }

        let cancelled = trials < self.config.iterations;
        if cancelled {
            warn!(
                ?decision,
                completed = trials,
                requested = self.config.iterations,
                "evaluation cancelled"
            );
        }

        let mean_sales = if trials == 0 { 0.0 } else { revenue / trials as f64 };
        let mean_revenue = mean_sales - self.config.purchase_price * decision.purchase as f64;

        debug!(?decision, mean_revenue, trials, "evaluation complete");

        EvaluationResult {
            mean_revenue,
            feasible: true,
            iterations: trials,
            cancelled,
        }
    }

    fn run_partition(
        &self,
        decision: &Decision,
        index: usize,
        trials: u64,
        flag: Option<&CancellationFlag>,
    ) -> PartitionTotals {
        let seed = self.config.seed.wrapping_add(index as u64);
        let mut sampler = DemandSampler::from_model(self.model.clone(), seed);
        let mut totals = PartitionTotals::default();

        for _ in 0..trials {
            if flag.map_or(false, CancellationFlag::is_cancelled) {
                break;
            }
            let demand = sampler.sample();
            let sold = units_sold(decision, &demand, self.config.carryover);
            totals.revenue += trial_revenue(&self.config.prices, &sold);
            totals.trials += 1;
        }

        debug!(partition = index, seed, trials = totals.trials, "partition finished");
        totals
    }
}

/// Splits `iterations` into `partitions` contiguous chunks, spreading the
/// remainder over the first chunks.
fn partition_sizes(iterations: u64, partitions: usize) -> Vec<u64> {
    let parts = partitions.max(1) as u64;
    let base = iterations / parts;
    let remainder = iterations % parts;
    (0..parts)
        .map(|p| base + u64::from(p < remainder))
        .collect()
}
