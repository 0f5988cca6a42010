//! Risk assessment types produced by the scorer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on the reported probability. Point totals above this are
/// clamped.
pub const MAX_PROBABILITY: u32 = 95;

/// Probability above which a result is `High`.
pub const HIGH_RISK_ABOVE: u32 = 60;

/// Probability above which a result is at least `Moderate`.
pub const MODERATE_RISK_ABOVE: u32 = 30;

/// Risk tier derived from the clamped probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// Classify a probability. Both thresholds are exclusive lower bounds:
    /// 30 is `Low`, 60 is `Moderate`.
    pub fn from_probability(probability: u32) -> Self {
        if probability > HIGH_RISK_ABOVE {
            Self::High
        } else if probability > MODERATE_RISK_ABOVE {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// The fixed advisory text for this tier.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::High => {
                "Please consult with a healthcare professional immediately for a comprehensive evaluation."
            }
            Self::Moderate => "Consider lifestyle modifications and regular health check-ups.",
            Self::Low => "Maintain current healthy lifestyle and regular medical check-ups.",
        }
    }

    /// Display label, e.g. `"Moderate Risk"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        }
    }

    /// CSS class used by the result page, e.g. `"moderate-risk"`.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Low => "low-risk",
            Self::Moderate => "moderate-risk",
            Self::High => "high-risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The scorer's output for one Health Attribute Record.
///
/// Computed per request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Clamped point total, always in `0..=MAX_PROBABILITY`.
    pub probability: u32,
    pub recommendation: String,
}

impl RiskAssessment {
    /// Build the assessment for a raw point total, applying the clamp and the
    /// tier thresholds.
    pub fn from_points(points: u32) -> Self {
        let probability = points.min(MAX_PROBABILITY);
        let risk_level = RiskLevel::from_probability(probability);
        Self {
            risk_level,
            probability,
            recommendation: risk_level.recommendation().to_string(),
        }
    }
}

/// Points one attribute added to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// The Health Attribute Record field name, e.g. `"bmi"`.
    pub field: String,
    pub points: u32,
}
