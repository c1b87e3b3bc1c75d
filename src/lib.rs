//! Founder readiness assessment service: a fixed 15-question self-assessment
//! across five dimensions, scored into a banded report with personalized
//! recommendations for startup grant applicants.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
