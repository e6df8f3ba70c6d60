//! Input parsing and validation
//!
//! The form hands over raw text. Every field is trimmed and parsed here,
//! and anything that cannot feed the formulas is rejected with an
//! [`InvalidInputError`] naming the field.

use crate::errors::InvalidInputError;
use crate::health_metrics::Gender;

/// Parse a weight in kilograms. Must be a finite number greater than zero.
pub fn parse_weight_kg(raw: &str) -> Result<f64, InvalidInputError> {
    parse_positive_real("weight", raw)
}

/// Parse a height in centimeters. Must be a finite number greater than zero.
///
/// Zero would divide by zero in the BMI formula and a negative height
/// squares into a meaningless positive BMI, so both are refused.
pub fn parse_height_cm(raw: &str) -> Result<f64, InvalidInputError> {
    parse_positive_real("height", raw)
}

/// Parse an age in whole years. Must be greater than zero.
pub fn parse_age_years(raw: &str) -> Result<u32, InvalidInputError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| InvalidInputError::new("age", "must be a whole number"))?;

    if value <= 0 {
        return Err(InvalidInputError::new("age", "must be greater than 0"));
    }

    u32::try_from(value).map_err(|_| InvalidInputError::new("age", "is too large"))
}

/// Parse a gender selection
pub fn parse_gender(raw: &str) -> Result<Gender, InvalidInputError> {
    raw.parse::<Gender>().map_err(|_| {
        InvalidInputError::new(
            "gender",
            &format!("must be one of: {}", VALID_GENDERS.join(", ")),
        )
    })
}

/// Gender values offered to the user
pub const VALID_GENDERS: &[&str] = &["male", "female"];

fn parse_positive_real(field: &str, raw: &str) -> Result<f64, InvalidInputError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| InvalidInputError::new(field, "must be a number"))?;

    if value.is_nan() || value.is_infinite() {
        return Err(InvalidInputError::new(field, "must be a valid number"));
    }
    if value <= 0.0 {
        return Err(InvalidInputError::new(field, "must be greater than 0"));
    }
    Ok(value)
}

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" => "Weight (kg)",
        "height" => "Height (cm)",
        "age" => "Age",
        "gender" => "Gender",
        _ => field_name,
    }
}
