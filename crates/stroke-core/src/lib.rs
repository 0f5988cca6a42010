//! # stroke-core
//!
//! The wiring layer of the stroke risk service.
//!
//! This crate provides:
//! - The core traits (`SessionStore`, `RiskScorer`, `Clock`)
//! - The `Gateway` that routes parsed requests through the session gate to
//!   the scorer
//! - Result page rendering
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stroke_core::{Gateway, gateway::Request};
//!
//! let gateway = Gateway::new(Box::new(store), Box::new(scorer));
//! let response = gateway.handle(&Request::get("/home").with_cookie(cookie))?;
//! ```

pub mod gateway;
pub mod render;
pub mod traits;

pub use gateway::Gateway;
