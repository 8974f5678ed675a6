//! Prediction wire types and risk classification.

use serde::{Deserialize, Serialize};

/// JSON body sent to `POST {base}/predict`.
///
/// Numeric fields are coerced floats; categorical fields carry their chosen
/// label strings and are mapped to model codes by the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub age: f64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub ap_hi: f64,
    pub ap_lo: f64,
    pub cholesterol: String,
    pub gluc: String,
    pub smoke: String,
    pub alco: String,
    pub active: String,
}

/// Result returned by the remote prediction service.
///
/// Trusted as-is (the service is the source of truth); overwritten wholesale
/// by each new submission, never merged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    /// Binary classification (1 = high risk, 0 = low risk)
    pub heart_risk: u8,

    /// Likelihood of elevated cardiovascular risk, in [0, 1]
    pub risk_probability: f64,

    /// Body Mass Index, derived server-side from height and weight
    pub bmi: f64,
}

impl PredictionOutcome {
    /// Classify the binary prediction.
    #[must_use]
    pub fn risk_status(&self) -> RiskStatus {
        if self.heart_risk == 1 {
            RiskStatus::High
        } else {
            RiskStatus::Low
        }
    }

    /// Risk probability as a percentage with one decimal place, e.g. `83.0%`.
    #[must_use]
    pub fn probability_percent(&self) -> String {
        format!("{:.1}%", self.risk_probability * 100.0)
    }
}

/// Risk classification for display and report styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStatus {
    /// No elevated risk detected
    Low,
    /// Elevated risk, professional evaluation advised
    High,
}

impl RiskStatus {
    /// Report/banner label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW RISK",
            Self::High => "HIGH RISK",
        }
    }

    /// Associated RGB color (red for high risk, green for low risk).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (34, 197, 94),   // Green (#22C55E)
            Self::High => (220, 38, 38),  // Red (#DC2626)
        }
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn risk_status_mapping() {
        let high = PredictionOutcome {
            heart_risk: 1,
            risk_probability: 0.83,
            bmi: 24.5,
        };
        let low = PredictionOutcome {
            heart_risk: 0,
            risk_probability: 0.12,
            bmi: 21.0,
        };

        assert_eq!(high.risk_status(), RiskStatus::High);
        assert_eq!(high.risk_status().label(), "HIGH RISK");
        assert_eq!(low.risk_status(), RiskStatus::Low);
        assert_eq!(low.risk_status().label(), "LOW RISK");
    }

    #[test]
    fn probability_formats_to_one_decimal() {
        let outcome = PredictionOutcome {
            heart_risk: 1,
            risk_probability: 0.83,
            bmi: 24.5,
        };
        assert_eq!(outcome.probability_percent(), "83.0%");

        let outcome = PredictionOutcome {
            heart_risk: 0,
            risk_probability: 0.056,
            bmi: 21.0,
        };
        assert_eq!(outcome.probability_percent(), "5.6%");
    }

    #[test]
    fn outcome_deserializes_from_service_json() {
        let outcome: PredictionOutcome =
            serde_json::from_str(r#"{"heart_risk":1,"risk_probability":0.83,"bmi":24.5}"#)
                .expect("should parse");

        assert_eq!(outcome.heart_risk, 1);
        assert!((outcome.risk_probability - 0.83).abs() < f64::EPSILON);
        assert!((outcome.bmi - 24.5).abs() < f64::EPSILON);
    }

    #[test]
    fn request_serializes_numbers_and_labels() {
        let request = PredictionRequest {
            age: 45.0,
            gender: "Female".to_string(),
            height: 165.0,
            weight: 60.0,
            ap_hi: 110.0,
            ap_lo: 70.0,
            cholesterol: "Border-Line".to_string(),
            gluc: "Normal".to_string(),
            smoke: "No".to_string(),
            alco: "No".to_string(),
            active: "Yes".to_string(),
        };

        let json = serde_json::to_value(&request).expect("should serialize");
        assert_eq!(json["age"], 45.0);
        assert_eq!(json["cholesterol"], "Border-Line");
        assert_eq!(json["active"], "Yes");
    }
}
