// src/problem/traits.rs

use crate::error::EvaluatorError;
use crate::model::decision::Decision;
use crate::problem::registry::ProblemDescriptor;
use crate::simulation::engine::EvaluationResult;
use rand::RngCore;
use std::fmt::Debug;

/// Something an optimizer can score candidate decisions against.
///
/// We require `Send` + `Sync` so a population can be scored in parallel
/// against a single evaluator.
pub trait ProblemEvaluator: Debug + Send + Sync {
    /// Name, description and search bounds of the problem.
    fn descriptor(&self) -> &ProblemDescriptor;

    /// Scores a well-formed decision. Infeasible decisions come back with
    /// `feasible = false` rather than as an error.
    fn evaluate(&self, decision: &Decision) -> EvaluationResult;

    /// Draws a random decision that satisfies every constraint.
    fn random_solution(&self, rng: &mut dyn RngCore) -> Decision;

    /// Validates the shape of raw optimizer output, then scores it.
    ///
    /// # Errors
    /// `InvalidDecision` when `candidate` is not exactly three integers.
    fn evaluate_candidate(&self, candidate: &[f64]) -> Result<EvaluationResult, EvaluatorError> {
        let decision = Decision::from_values(candidate)?;
        Ok(self.evaluate(&decision))
    }
}
