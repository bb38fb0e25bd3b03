//! Body Composition Estimator (bodycomp) Library
//!
//! Body-fat estimation from skinfold measurements.

pub mod build_info;
pub mod composition;
pub mod mcp;
pub mod tools;
