//! # stroke-risk
//!
//! Heuristic stroke risk scoring.
//!
//! [`RuleTableScorer`] implements the
//! [`RiskScorer`](stroke_core::traits::RiskScorer) trait with a fixed,
//! additive point table. It is not a trained model: there is no learning,
//! calibration, or statistical validation behind the numbers.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use stroke_contracts::health::HealthRecord;
//! use stroke_core::traits::RiskScorer;
//! use stroke_risk::RuleTableScorer;
//!
//! let record = HealthRecord::from_pairs([("age", "70"), ("hypertension", "1")]);
//! let assessment = RuleTableScorer.assess(&record);
//! assert_eq!(assessment.probability, 55);
//! ```

pub mod scorer;

pub use scorer::RuleTableScorer;

// ── Tests ─────────────────────────────────────────────────────────────────────
