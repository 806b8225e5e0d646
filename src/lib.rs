//! Monte Carlo evaluator for a three-period revenue management problem.
//!
//! A decision buys `q0` units up front and reserves `r1` units for periods 2
//! and 3 and `r2` of those for period 3. [`RevenueEvaluator`] estimates the
//! expected sales revenue under stochastic demand, net of purchase cost, and
//! flags decisions that break the reservation ordering.

pub mod error;
pub mod io;
pub mod model;
pub mod problem;
pub mod simulation;

pub use error::EvaluatorError;
pub use io::demand::{DemandDistribution, DemandSampler};
pub use model::decision::Decision;
pub use model::inventory::CarryoverPolicy;
pub use problem::registry::{ProblemDescriptor, ProblemRegistry, RevenueManagementProblem};
pub use problem::traits::ProblemEvaluator;
pub use simulation::config::EvaluatorConfig;
pub use simulation::engine::{CancellationFlag, EvaluationResult, RevenueEvaluator, INFEASIBLE_PENALTY};
