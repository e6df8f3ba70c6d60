//! Health metrics calculations module
//!
//! BMI, BMI category, ideal weight and basal metabolic rate, computed from
//! a single measurement.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Full Precision**: Nothing is rounded here; rounding happens when a
//!    result is presented or stored
//! 3. **Parse at the Edge**: Raw form text becomes a [`MeasurementInput`]
//!    once, and every formula works on typed values

use crate::errors::InvalidInputError;
use crate::units::HeightUnit;
use crate::validation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Measurement Types
// ============================================================================

/// Gender used by the ideal weight and BMR formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = String;

    /// Accepts English names, single letters and the Polish labels found in
    /// legacy history files ("Mężczyzna", "Kobieta")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "mężczyzna" => Ok(Gender::Male),
            "female" | "f" | "kobieta" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// A single measurement, already parsed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters, as entered
    pub height_cm: f64,
    /// Age in years
    pub age_years: u32,
    pub gender: Gender,
}

/// Raw form values as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementForm {
    pub weight: String,
    pub height: String,
    pub age: String,
    pub gender: Gender,
}

impl MeasurementForm {
    /// Parse every field, failing on the first one that is unusable
    pub fn parse(&self) -> Result<MeasurementInput, InvalidInputError> {
        Ok(MeasurementInput {
            weight_kg: validation::parse_weight_kg(&self.weight)?,
            height_cm: validation::parse_height_cm(&self.height)?,
            age_years: validation::parse_age_years(&self.age)?,
            gender: self.gender,
        })
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the half-open BMI range `[low, high)` for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BmiCategory {
    type Err = String;

    /// Accepts labels, snake_case names and the Polish labels found in
    /// legacy history files
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "underweight" | "niedowaga" => Ok(BmiCategory::Underweight),
            "normal" | "prawidłowa waga" => Ok(BmiCategory::Normal),
            "overweight" | "nadwaga" => Ok(BmiCategory::Overweight),
            "obese" | "otyłość" => Ok(BmiCategory::Obese),
            _ => Err(format!("Unknown BMI category: {}", s)),
        }
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = HeightUnit::Meters.from_cm(height_cm);
    weight_kg / (height_m * height_m)
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

// ============================================================================
// Ideal Weight and BMR
// ============================================================================

/// Calculate ideal body weight using the Devine formula
///
/// Men: 50 + 2.3 × (height(in) - 60)
/// Women: 45.5 + 2.3 × (height(in) - 60)
///
/// Heights under five feet are not clamped, so very short inputs yield
/// less than the base value.
pub fn calculate_ideal_weight(height_cm: f64, gender: Gender) -> f64 {
    let inches_over_5ft = HeightUnit::Inches.from_cm(height_cm) - 60.0;
    let base = match gender {
        Gender::Male => 50.0,
        Gender::Female => 45.5,
    };
    base + 2.3 * inches_over_5ft
}

/// Calculate BMR using the revised Harris-Benedict equation
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let age = f64::from(age_years);
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

// ============================================================================
// Combined Result
// ============================================================================

/// Everything derived from one measurement, at full precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub ideal_weight_kg: f64,
    /// Basal metabolic rate in kcal/day
    pub bmr_kcal: f64,
}

/// Compute all metrics for a measurement
pub fn compute_metrics(input: &MeasurementInput) -> ComputationResult {
    let bmi = calculate_bmi(input.weight_kg, input.height_cm);

    ComputationResult {
        bmi,
        category: classify_bmi(bmi),
        ideal_weight_kg: calculate_ideal_weight(input.height_cm, input.gender),
        bmr_kcal: calculate_bmr(input.weight_kg, input.height_cm, input.age_years, input.gender),
    }
}

/// Parse raw form values and compute all metrics
pub fn compute_from_form(form: &MeasurementForm) -> Result<ComputationResult, InvalidInputError> {
    let input = form.parse()?;
    Ok(compute_metrics(&input))
}

/// Round to two decimal places, the precision used for storage and display
///
/// Goes through the `{:.2}` text so a stored value always equals the one
/// shown on the results screen, ties included.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
