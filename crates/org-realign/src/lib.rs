//! Organizational assessment scoring and restructuring scenario analysis.
//!
//! The [`assessment`] module turns raw survey responses into normalized domain scores,
//! [`algorithms`] layers the seven scoring models on top of it, and [`scenarios`] compares
//! baseline and proposed organization charts and manages the scenario lifecycle.

pub mod algorithms;
pub mod assessment;
pub mod config;
pub mod error;
pub mod scenarios;
pub mod telemetry;
