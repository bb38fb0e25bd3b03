//! Body composition estimation
//!
//! Converts skinfold caliper readings, age and sex into body density and
//! then body-fat percentage using standard anthropometric protocols.

pub mod age;
pub mod density;
pub mod error;
pub mod estimator;
pub mod mass;
pub mod protocol;
pub mod sex;
pub mod siri;
pub mod skinfold;

pub use age::{age_on, parse_date, today};
pub use density::{four_site_bracket, AgeBracket, DensityReading, FOUR_SITE_BRACKETS};
pub use error::{FormatError, Unavailable};
pub use estimator::{
    assess, estimate, estimate_body_fat, estimate_body_fat_on, resolve, Assessment, Estimate,
};
pub use mass::{partition, MassPartition};
pub use protocol::{FormulaShape, Protocol};
pub use sex::Sex;
pub use siri::percent_fat;
pub use skinfold::{parse_millimeters, SkinfoldSet, SkinfoldSite};
