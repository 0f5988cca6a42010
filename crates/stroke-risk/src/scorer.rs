//! Additive rule-table risk scorer.
//!
//! Each attribute contributes a fixed number of points. Numeric attributes
//! are banded: bands are listed highest first and the first band whose
//! exclusive lower bound the value exceeds wins. String attributes match
//! exact, case-sensitive literals. The total is clamped to
//! `MAX_PROBABILITY` and classified by `RiskLevel::from_probability`.
//!
//! | field             | rule                                      | points       |
//! |-------------------|-------------------------------------------|--------------|
//! | age               | > 65 / > 50 / > 35                        | 30 / 20 / 10 |
//! | gender            | == "Male"                                 | 5            |
//! | hypertension      | == "1"                                    | 25           |
//! | heart_disease     | == "1"                                    | 25           |
//! | avg_glucose_level | > 200 / > 140 / > 100                     | 20 / 15 / 5  |
//! | bmi               | > 30 / > 25                               | 15 / 8       |
//! | smoking_status    | == "smokes" / == "formerly smoked"        | 20 / 10      |
//! | work_type         | == "Private"                              | 5            |
//! | ever_married      | == "No"                                   | 5            |

use stroke_contracts::{
    assessment::{Contribution, RiskAssessment},
    health::{HealthRecord, SmokingStatus},
};
use stroke_core::traits::RiskScorer;

/// `(exclusive lower bound, points)`, highest bound first.
type Bands = &'static [(f64, u32)];

const AGE_BANDS: Bands = &[(65.0, 30), (50.0, 20), (35.0, 10)];
const GLUCOSE_BANDS: Bands = &[(200.0, 20), (140.0, 15), (100.0, 5)];
const BMI_BANDS: Bands = &[(30.0, 15), (25.0, 8)];

const MALE_POINTS: u32 = 5;
const HYPERTENSION_POINTS: u32 = 25;
const HEART_DISEASE_POINTS: u32 = 25;
const SMOKES_POINTS: u32 = 20;
const FORMERLY_SMOKED_POINTS: u32 = 10;
const PRIVATE_WORK_POINTS: u32 = 5;
const NEVER_MARRIED_POINTS: u32 = 5;

fn banded(value: f64, bands: Bands) -> u32 {
    bands
        .iter()
        .find(|(above, _)| value > *above)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

fn flag(set: bool, points: u32) -> u32 {
    if set {
        points
    } else {
        0
    }
}

/// The fixed stroke risk rule table.
///
/// Stateless; one instance can be shared by any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTableScorer;

impl RuleTableScorer {
    pub fn new() -> Self {
        Self
    }

    /// Per-field points in table order, including fields that scored zero.
    ///
    /// The unclamped total of these is what `assess` clamps.
    pub fn points(record: &HealthRecord) -> Vec<Contribution> {
        let smoking = match record.smoking() {
            SmokingStatus::Smokes => SMOKES_POINTS,
            SmokingStatus::FormerlySmoked => FORMERLY_SMOKED_POINTS,
            SmokingStatus::Other => 0,
        };

        [
            ("age", banded(record.age(), AGE_BANDS)),
            ("gender", flag(record.is_male(), MALE_POINTS)),
            ("hypertension", flag(record.has_hypertension(), HYPERTENSION_POINTS)),
            ("heart_disease", flag(record.has_heart_disease(), HEART_DISEASE_POINTS)),
            ("avg_glucose_level", banded(record.avg_glucose_level(), GLUCOSE_BANDS)),
            ("bmi", banded(record.bmi(), BMI_BANDS)),
            ("smoking_status", smoking),
            ("work_type", flag(record.works_private(), PRIVATE_WORK_POINTS)),
            ("ever_married", flag(record.never_married(), NEVER_MARRIED_POINTS)),
        ]
        .into_iter()
        .map(|(field, points)| Contribution {
            field: field.to_string(),
            points,
        })
        .collect()
    }
}

impl RiskScorer for RuleTableScorer {
    fn assess(&self, record: &HealthRecord) -> RiskAssessment {
        let total = Self::points(record).iter().map(|c| c.points).sum();
        RiskAssessment::from_points(total)
    }
}
