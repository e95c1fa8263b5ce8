//! Health metrics calculations module
//!
//! Provides the BMI calculation and the four-band classification used to
//! pick coaching templates.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Total Classification**: Every finite BMI maps to exactly one band
//! 3. **Type Safety**: Undefined BMI is `None`, never a sentinel value

use serde::{Deserialize, Serialize};

// ============================================================================
// Band boundaries
// ============================================================================

/// Lower bound of the normal band (inclusive)
pub const NORMAL_FROM: f64 = 18.5;
/// Lower bound of the overweight band (inclusive)
pub const OVERWEIGHT_FROM: f64 = 25.0;
/// Lower bound of the obese band (inclusive)
pub const OBESE_FROM: f64 = 30.0;

/// Status reported when BMI cannot be computed
pub const UNKNOWN_STATUS: &str = "Unknown";

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
///
/// Bands are half-open `[lower, upper)`, so a BMI of 24.95 is `Normal` and
/// 25.0 is `Overweight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// All categories in ascending order
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    /// Get the BMI range for this category (lower inclusive, upper exclusive)
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (f64::NEG_INFINITY, NORMAL_FROM),
            BmiCategory::Normal => (NORMAL_FROM, OVERWEIGHT_FROM),
            BmiCategory::Overweight => (OVERWEIGHT_FROM, OBESE_FROM),
            BmiCategory::Obese => (OBESE_FROM, f64::INFINITY),
        }
    }

    /// Whether the BMI falls inside this band
    pub fn contains(&self, bmi: f64) -> bool {
        let (lower, upper) = self.range();
        bmi >= lower && bmi < upper
    }

    /// Status label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight 😟",
            BmiCategory::Normal => "Normal ✅",
            BmiCategory::Overweight => "Overweight ⚠️",
            BmiCategory::Obese => "Obese 🚨",
        }
    }
}

/// Calculate BMI from weight and height, rounded to two decimals
///
/// Formula: BMI = weight(kg) / height(m)²
///
/// Returns `None` when height is not positive or the result is not finite.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    let height_m = height_cm / 100.0;
    if !(height_m > 0.0) {
        return None;
    }
    let bmi = weight_kg / (height_m * height_m);
    if !bmi.is_finite() {
        return None;
    }
    Some(round_to_hundredths(bmi))
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < NORMAL_FROM {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_FROM {
        BmiCategory::Normal
    } else if bmi < OBESE_FROM {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Status label for an optional BMI
pub fn bmi_status(bmi: Option<f64>) -> &'static str {
    bmi.map(|b| classify_bmi(b).label()).unwrap_or(UNKNOWN_STATUS)
}

/// Render a number the way the coach prints it: integral values keep one
/// decimal (`25.0`), everything else uses the shortest round-trip form.
pub fn display_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Round the exact binary value to two decimals, ties to even.
/// Scaling by 100 first would round twice (12.574999.. would become 12.58).
fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
