//! BMI Calculator WASM Module
//!
//! Browser bindings for the calculator. Nothing is persisted here; the
//! history lives with the backend.

use bmi_calculator_shared::{
    compute_from_form, present, validation::parse_gender, DisplayPayload, InvalidInputError,
    MeasurementForm,
};
use wasm_bindgen::prelude::*;

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    bmi_calculator_shared::calculate_bmi(weight_kg, height_cm)
}

/// Category label for a BMI value
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64) -> String {
    bmi_calculator_shared::classify_bmi(bmi).label().to_string()
}

/// Compute every metric from raw form text and return the display payload
/// as JSON. Throws with the field and reason on invalid input.
#[wasm_bindgen]
pub fn calculate_metrics(
    weight: &str,
    height: &str,
    age: &str,
    gender: &str,
) -> Result<String, JsError> {
    let payload = metrics_payload(weight, height, age, gender)
        .map_err(|e| JsError::new(&e.user_message()))?;
    serde_json::to_string(&payload).map_err(|e| JsError::new(&e.to_string()))
}

fn metrics_payload(
    weight: &str,
    height: &str,
    age: &str,
    gender: &str,
) -> Result<DisplayPayload, InvalidInputError> {
    let form = MeasurementForm {
        weight: weight.to_string(),
        height: height.to_string(),
        age: age.to_string(),
        gender: parse_gender(gender)?,
    };
    Ok(present(&compute_from_form(&form)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmi_calculator_shared::{AssetKey, BmiCategory};

    #[test]
    fn test_bmi() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.857).abs() < 0.001);
    }

    #[test]
    fn test_bmi_without_height_is_zero() {
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
    }

    #[test]
    fn test_classify_bmi_label() {
        assert_eq!(classify_bmi(17.0), "Underweight");
        assert_eq!(classify_bmi(30.0), "Obese");
    }

    #[test]
    fn test_metrics_payload() {
        let payload = metrics_payload("70", "175", "30", "male").unwrap();
        assert_eq!(payload.bmi, "22.86");
        assert_eq!(payload.category, BmiCategory::Normal);
        assert_eq!(payload.ideal_weight_kg, "70.46");
        assert_eq!(payload.bmr_kcal, "1695.67");
        assert_eq!(payload.asset, AssetKey::Normal);
    }

    #[test]
    fn test_metrics_payload_rejects_bad_age() {
        let err = metrics_payload("70", "175", "3.5", "female").unwrap_err();
        assert_eq!(err.field, "age");
    }
}
