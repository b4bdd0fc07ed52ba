pub mod config;
pub mod eligibility;
pub mod error;
pub mod roster;
pub mod telemetry;
