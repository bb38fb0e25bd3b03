//! Estimation error types
//!
//! Two tiers: caller contract violations (`FormatError`) and the expected
//! "no result" outcomes of an estimation (`Unavailable`).

use serde::Serialize;
use thiserror::Error;

use super::skinfold::SkinfoldSite;

/// Malformed input supplied by the caller
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid birth date '{value}': expected YYYY-MM-DD ({source})")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown skinfold site: {0}")]
    UnknownSite(String),

    #[error("skinfold value for {site} is not a number: {value}")]
    NonNumeric { site: String, value: String },

    #[error("skinfold {site} given more than once (as '{first}' and '{second}')")]
    DuplicateSite {
        site: SkinfoldSite,
        first: String,
        second: String,
    },
}

/// Reason an estimate could not be produced
///
/// None of these are failures of the caller: the practitioner may simply not
/// have collected every site a protocol needs.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unavailable {
    #[error("unrecognized protocol: {protocol}")]
    UnknownProtocol { protocol: String },

    #[error("unrecognized sex: {sex}")]
    UnknownSex { sex: String },

    #[error("missing required skinfold: {site}")]
    MissingSkinfold { site: SkinfoldSite },

    #[error("skinfold {site} must be positive, got {value}")]
    NonPositiveSkinfold { site: SkinfoldSite, value: f64 },

    #[error("body density {density} cannot be converted to percent fat")]
    DegenerateDensity { density: f64 },
}

impl Unavailable {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Unavailable::UnknownProtocol { .. } => "unknown_protocol",
            Unavailable::UnknownSex { .. } => "unknown_sex",
            Unavailable::MissingSkinfold { .. } => "missing_skinfold",
            Unavailable::NonPositiveSkinfold { .. } => "non_positive_skinfold",
            Unavailable::DegenerateDensity { .. } => "degenerate_density",
        }
    }
}
