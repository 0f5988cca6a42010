//! # stroke-contracts
//!
//! Shared types and error contracts for the stroke risk service.
//!
//! Every crate in the workspace imports from here. Apart from the numeric
//! normalization that turns raw form text into scorer inputs, no business
//! logic lives in this crate.

pub mod assessment;
pub mod error;
pub mod health;
pub mod session;
