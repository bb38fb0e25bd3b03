//! Bodycomp Tools module
//!
//! MCP tool implementations for the body composition estimator.

pub mod estimate;
pub mod status;
