// src/model/decision.rs

use crate::error::EvaluatorError;
use rand::{Rng, RngCore};
use serde::Serialize;

/// Number of entries in a decision vector.
pub const DECISION_LEN: usize = 3;

/// Largest value any decision entry may take while remaining feasible.
pub const MAX_UNITS: i64 = 100;

/// A candidate decision: `[purchase, reserve_period2, reserve_period3]`.
///
/// Values are signed so that out-of-range inputs can still be represented.
/// Such decisions are infeasible, not malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Units bought up front, before period 1.
    pub purchase: i64,
    /// Units held back from period 1 for periods 2 and 3.
    pub reserve_period2: i64,
    /// Units held back from period 2 for period 3.
    pub reserve_period3: i64,
}

impl Decision {
    pub fn new(purchase: i64, reserve_period2: i64, reserve_period3: i64) -> Self {
        Self {
            purchase,
            reserve_period2,
            reserve_period3,
        }
    }

    /// Builds a decision from real-valued optimizer output.
    ///
    /// Every entry must be finite and integral; the vector must have exactly
    /// three entries. Range is not checked here.
    pub fn from_values(values: &[f64]) -> Result<Self, EvaluatorError> {
        if values.len() != DECISION_LEN {
            return Err(EvaluatorError::InvalidDecision(format!(
                "expected {} values, got {}",
                DECISION_LEN,
                values.len()
            )));
        }

        let mut ints = [0i64; DECISION_LEN];
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() || v.fract() != 0.0 {
                return Err(EvaluatorError::InvalidDecision(format!(
                    "entry {} is not an integer: {}",
                    i, v
                )));
            }
            if v.abs() >= i64::MAX as f64 {
                return Err(EvaluatorError::InvalidDecision(format!(
                    "entry {} does not fit in i64: {}",
                    i, v
                )));
            }
            ints[i] = v as i64;
        }

        Ok(Self::new(ints[0], ints[1], ints[2]))
    }

    /// Reservation held back at the start of each period, with nothing
    /// reserved beyond the last period.
    pub fn reserves(&self) -> [i64; DECISION_LEN] {
        [self.reserve_period2, self.reserve_period3, 0]
    }

    /// `0 <= purchase <= 100`, `0 <= reserve_period2 <= purchase` and
    /// `0 <= reserve_period3 <= reserve_period2`.
    pub fn is_feasible(&self) -> bool {
        (0..=MAX_UNITS).contains(&self.purchase)
            && (0..=self.purchase).contains(&self.reserve_period2)
            && (0..=self.reserve_period2).contains(&self.reserve_period3)
    }

    /// Draws a feasible decision by sampling each entry below the previous one.
    pub fn random_feasible(rng: &mut dyn RngCore) -> Self {
        let purchase = rng.gen_range(0..=MAX_UNITS);
        let reserve_period2 = rng.gen_range(0..=purchase);
        let reserve_period3 = rng.gen_range(0..=reserve_period2);
        Self::new(purchase, reserve_period2, reserve_period3)
    }

    pub fn as_array(&self) -> [i64; DECISION_LEN] {
        [self.purchase, self.reserve_period2, self.reserve_period3]
    }
}

impl TryFrom<&[i64]> for Decision {
    type Error = EvaluatorError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        match values {
            [q0, r1, r2] => Ok(Self::new(*q0, *r1, *r2)),
            _ => Err(EvaluatorError::InvalidDecision(format!(
                "expected {} values, got {}",
                DECISION_LEN,
                values.len()
            ))),
        }
    }
}

impl From<[i64; DECISION_LEN]> for Decision {
    fn from(values: [i64; DECISION_LEN]) -> Self {
        Self::new(values[0], values[1], values[2])
    }
}
