// src/io/reporting.rs

use crate::error::EvaluatorError;
use crate::model::decision::Decision;
use crate::simulation::engine::EvaluationResult;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One row of the evaluation log: the decision and how it scored.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    pub purchase: i64,
    pub reserve_period2: i64,
    pub reserve_period3: i64,
    pub feasible: bool,
    pub iterations: u64,
    pub cancelled: bool,
    pub mean_revenue: f64,
}

impl EvaluationRecord {
    pub fn new(decision: &Decision, result: &EvaluationResult) -> Self {
        Self {
            purchase: decision.purchase,
            reserve_period2: decision.reserve_period2,
            reserve_period3: decision.reserve_period3,
            feasible: result.feasible,
            iterations: result.iterations,
            cancelled: result.cancelled,
            mean_revenue: result.mean_revenue,
        }
    }
}

/// Writes evaluation records to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/evaluations.csv").
/// * `data` - The records to export, one row each.
pub fn write_evaluation_log<P: AsRef<Path>>(
    file_path: P,
    data: &[EvaluationRecord],
) -> Result<(), EvaluatorError> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    wtr.flush()?;

    info!(rows = data.len(), path = %path.display(), "exported evaluation log");
    Ok(())
}
