//! Domain models shared across the workspace

use crate::health_metrics::{round2, BmiCategory, ComputationResult, Gender, MeasurementInput};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum number of results kept in the history
pub const HISTORY_CAPACITY: usize = 10;

/// Timestamp format used for history entries
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text of a stored number. Whole values keep one decimal ("22.0").
pub fn decimal_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// One past calculation, as kept in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local time the result was saved
    pub recorded_at: NaiveDateTime,
    /// BMI rounded to two decimals
    pub bmi: f64,
    pub category: BmiCategory,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub gender: Gender,
}

impl HistoryEntry {
    /// Build the entry saved for a computation
    pub fn new(
        input: &MeasurementInput,
        result: &ComputationResult,
        recorded_at: NaiveDateTime,
    ) -> Self {
        Self {
            recorded_at,
            bmi: round2(result.bmi),
            category: result.category,
            weight_kg: input.weight_kg,
            height_cm: input.height_cm,
            age_years: input.age_years,
            gender: input.gender,
        }
    }

    /// Timestamp rendered the way it is stored
    pub fn date_text(&self) -> String {
        self.recorded_at.format(HISTORY_DATE_FORMAT).to_string()
    }
}
