//! Intake record: the eleven screening inputs as entered by the user.
//!
//! Every field is held as a raw string until validated; numeric coercion
//! happens only when the wire request is built.

use serde::{Deserialize, Serialize};

use super::prediction::PredictionRequest;

/// Field keys in submission order. Presence validation reports the first
/// missing field by this key.
pub const FIELD_KEYS: [&str; 11] = [
    "age",
    "gender",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
];

/// Raw screening inputs from the intake form.
///
/// Categorical fields hold their chosen label (`Male`/`Female`,
/// `Normal`/`Border-Line`/`High`, `Yes`/`No`); the remaining fields hold
/// numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// Age in years
    pub age: String,
    /// Gender label (`Male` or `Female`)
    pub gender: String,
    /// Height in cm
    pub height: String,
    /// Weight in kg
    pub weight: String,
    /// Systolic blood pressure in mm Hg
    pub ap_hi: String,
    /// Diastolic blood pressure in mm Hg
    pub ap_lo: String,
    /// Cholesterol level label
    pub cholesterol: String,
    /// Glucose level label
    pub gluc: String,
    /// Smoking label (`Yes` or `No`)
    pub smoke: String,
    /// Alcohol consumption label (`Yes` or `No`)
    pub alco: String,
    /// Physical activity label (`Yes` or `No`)
    pub active: String,
}

/// A single validation rule violation. Rules are evaluated in a fixed order
/// and the first violation wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields. Missing: {0}")]
    MissingField(&'static str),

    #[error("Age must be between 1 and 120")]
    AgeOutOfRange,

    #[error("Height must be between 50 and 250 cm")]
    HeightOutOfRange,

    #[error("Weight must be between 20 and 300 kg")]
    WeightOutOfRange,

    #[error("{0} must be a number")]
    NotNumeric(&'static str),
}

impl IntakeRecord {
    fn fields(&self) -> [&str; 11] {
        [
            &self.age,
            &self.gender,
            &self.height,
            &self.weight,
            &self.ap_hi,
            &self.ap_lo,
            &self.cholesterol,
            &self.gluc,
            &self.smoke,
            &self.alco,
            &self.active,
        ]
    }

    /// Validate the record against the submission rules.
    ///
    /// Rules, in order, short-circuiting on the first failure:
    /// 1. every field non-empty (violation names the field key)
    /// 2. age in [1, 120]
    /// 3. height in [50, 250]
    /// 4. weight in [20, 300]
    ///
    /// No cross-field checks (e.g. `ap_hi > ap_lo`) are performed; that gap
    /// is intentional and documented.
    ///
    /// # Errors
    /// Returns the first rule violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (key, value) in FIELD_KEYS.iter().zip(self.fields()) {
            if value.is_empty() {
                return Err(ValidationError::MissingField(key));
            }
        }

        if !in_range(&self.age, 1.0, 120.0) {
            return Err(ValidationError::AgeOutOfRange);
        }
        if !in_range(&self.height, 50.0, 250.0) {
            return Err(ValidationError::HeightOutOfRange);
        }
        if !in_range(&self.weight, 20.0, 300.0) {
            return Err(ValidationError::WeightOutOfRange);
        }

        Ok(())
    }

    /// Build the wire request, coercing numeric fields to floats and passing
    /// categorical labels through unchanged.
    ///
    /// # Errors
    /// Returns `ValidationError::NotNumeric` if a numeric field cannot be
    /// parsed as a finite float.
    pub fn to_request(&self) -> Result<PredictionRequest, ValidationError> {
        Ok(PredictionRequest {
            age: numeric(&self.age, "age")?,
            gender: self.gender.clone(),
            height: numeric(&self.height, "height")?,
            weight: numeric(&self.weight, "weight")?,
            ap_hi: numeric(&self.ap_hi, "ap_hi")?,
            ap_lo: numeric(&self.ap_lo, "ap_lo")?,
            cholesterol: self.cholesterol.clone(),
            gluc: self.gluc.clone(),
            smoke: self.smoke.clone(),
            alco: self.alco.clone(),
            active: self.active.clone(),
        })
    }
}

fn numeric(value: &str, key: &'static str) -> Result<f64, ValidationError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NotNumeric(key))
}

fn in_range(value: &str, min: f64, max: f64) -> bool {
    matches!(value.trim().parse::<f64>(), Ok(v) if (min..=max).contains(&v))
}
