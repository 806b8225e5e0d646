// src/problem/registry.rs

use crate::error::EvaluatorError;
use crate::model::decision::{Decision, DECISION_LEN, MAX_UNITS};
use crate::problem::traits::ProblemEvaluator;
use crate::simulation::config::EvaluatorConfig;
use crate::simulation::engine::{EvaluationResult, RevenueEvaluator};
use rand::RngCore;
use serde::Serialize;

pub const REVENUE_MANAGEMENT: &str = "revenue_management";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Maximize,
    Minimize,
}

/// Self-description a hosting framework can show or filter on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemDescriptor {
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub objective: Objective,
    pub dimension: usize,
    pub lower_bound: i64,
    pub upper_bound: i64,
}

impl ProblemDescriptor {
    pub fn revenue_management() -> Self {
        Self {
            name: REVENUE_MANAGEMENT.to_string(),
            description: "Choose how many units to purchase before a three-period selling \
                horizon and how many to reserve for periods 2 and 3, maximizing Monte Carlo \
                estimated revenue under stochastic demand net of purchase cost."
                .to_string(),
            keywords: ["revenue management", "inventory", "stochastic demand", "monte carlo"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            objective: Objective::Maximize,
            dimension: DECISION_LEN,
            lower_bound: 0,
            upper_bound: MAX_UNITS,
        }
    }
}

/// The revenue management problem as a `ProblemEvaluator`.
#[derive(Debug, Clone)]
pub struct RevenueManagementProblem {
    descriptor: ProblemDescriptor,
    evaluator: RevenueEvaluator,
}

impl RevenueManagementProblem {
    pub fn new(config: EvaluatorConfig) -> Result<Self, EvaluatorError> {
        Ok(Self {
            descriptor: ProblemDescriptor::revenue_management(),
            evaluator: RevenueEvaluator::new(config)?,
        })
    }

    pub fn evaluator(&self) -> &RevenueEvaluator {
        &self.evaluator
    }
}

impl ProblemEvaluator for RevenueManagementProblem {
    fn descriptor(&self) -> &ProblemDescriptor {
        &self.descriptor
    }

    fn evaluate(&self, decision: &Decision) -> EvaluationResult {
        self.evaluator.evaluate(decision)
    }

    fn random_solution(&self, rng: &mut dyn RngCore) -> Decision {
        Decision::random_feasible(rng)
    }
}

/// Builds a boxed evaluator from configuration.
pub type ProblemFactory = fn(EvaluatorConfig) -> Result<Box<dyn ProblemEvaluator>, EvaluatorError>;

fn revenue_management_factory(
    config: EvaluatorConfig,
) -> Result<Box<dyn ProblemEvaluator>, EvaluatorError> {
    Ok(Box::new(RevenueManagementProblem::new(config)?))
}

/// Explicit table of named problem constructors.
#[derive(Debug, Clone, Default)]
pub struct ProblemRegistry {
    factories: Vec<(String, ProblemFactory)>,
}

impl ProblemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every problem this crate ships.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(REVENUE_MANAGEMENT, revenue_management_factory);
        registry
    }

    /// Adds or replaces the factory for `name`.
    pub fn register(&mut self, name: &str, factory: ProblemFactory) {
        match self.factories.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some(entry) => entry.1 = factory,
            None => self.factories.push((name.to_string(), factory)),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn create(
        &self,
        name: &str,
        config: EvaluatorConfig,
    ) -> Result<Box<dyn ProblemEvaluator>, EvaluatorError> {
        let (_, factory) = self
            .factories
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .ok_or_else(|| EvaluatorError::UnknownProblem(name.to_string()))?;
        factory(config)
    }
}
