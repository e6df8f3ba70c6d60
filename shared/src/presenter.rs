//! Result presentation
//!
//! Turns a [`ComputationResult`] into what the results view shows: values
//! formatted to two decimals, the category, and which picture goes with it.

use crate::health_metrics::{BmiCategory, ComputationResult};
use crate::models::{decimal_text, HistoryEntry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image shown next to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKey {
    Slim,
    Normal,
    Pig,
}

impl AssetKey {
    /// Select the image for a category
    pub fn for_category(category: BmiCategory) -> Self {
        match category {
            BmiCategory::Underweight => AssetKey::Slim,
            BmiCategory::Normal => AssetKey::Normal,
            BmiCategory::Overweight | BmiCategory::Obese => AssetKey::Pig,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKey::Slim => "slim",
            AssetKey::Normal => "normal",
            AssetKey::Pig => "pig",
        }
    }

    /// Image file name, relative to the asset directory
    pub fn file_name(&self) -> String {
        format!("{}.png", self.as_str())
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed from a successful computation to the results view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPayload {
    pub bmi: String,
    pub category: BmiCategory,
    pub ideal_weight_kg: String,
    pub bmr_kcal: String,
    pub asset: AssetKey,
}

impl DisplayPayload {
    /// Text lines of the results view
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("BMI: {}", self.bmi),
            format!("Category: {}", self.category),
            format!("Ideal weight: {} kg", self.ideal_weight_kg),
            format!("BMR: {} kcal/day", self.bmr_kcal),
        ]
    }
}

/// Format a computation for display
pub fn present(result: &ComputationResult) -> DisplayPayload {
    DisplayPayload {
        bmi: format!("{:.2}", result.bmi),
        category: result.category,
        ideal_weight_kg: format!("{:.2}", result.ideal_weight_kg),
        bmr_kcal: format!("{:.2}", result.bmr_kcal),
        asset: AssetKey::for_category(result.category),
    }
}

/// History view lines, newest first
pub fn history_lines(entries: &[HistoryEntry]) -> Vec<String> {
    entries
        .iter()
        .rev()
        .map(|e| format!("{} - BMI: {} - {}", e.date_text(), decimal_text(e.bmi), e.category))
        .collect()
}
