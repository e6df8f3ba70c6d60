//! Height unit conversion
//!
//! Heights are entered and stored in centimeters. The formulas need the
//! same value in meters (BMI) and inches (ideal weight), so conversions
//! happen here and nowhere else.

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Unit a centimeter height is converted into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightUnit {
    Meters,
    Inches,
}

impl HeightUnit {
    /// Convert from centimeters to this unit
    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            HeightUnit::Meters => cm / 100.0,
            HeightUnit::Inches => cm / CM_PER_INCH,
        }
    }
}
