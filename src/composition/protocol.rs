//! Protocol registry
//!
//! Maps a protocol to its required sites and density formula.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::density::{self, DensityReading};
use super::error::Unavailable;
use super::sex::Sex;
use super::skinfold::{SkinfoldSet, SkinfoldSite};

/// Supported skinfold estimation protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// Jackson & Pollock, seven sites
    #[serde(rename = "7-skinfold")]
    SevenSite,
    /// Jackson & Pollock, three sex-specific sites
    #[serde(rename = "3-skinfold")]
    ThreeSite,
    /// Durnin & Womersley, four sites, age-bracketed
    #[serde(rename = "4-skinfold")]
    FourSite,
}

/// Shape of the density regression in the skinfold sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaShape {
    Quadratic,
    LogLinear,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::SevenSite, Protocol::ThreeSite, Protocol::FourSite];

    /// Canonical identifier
    pub fn tag(&self) -> &'static str {
        match self {
            Protocol::SevenSite => "7-skinfold",
            Protocol::ThreeSite => "3-skinfold",
            Protocol::FourSite => "4-skinfold",
        }
    }

    /// Parse a protocol identifier.
    ///
    /// Accepts the canonical tags and the labels used on the consultation form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "7-skinfold" | "pollock 7 dobras" => Some(Protocol::SevenSite),
            "3-skinfold" | "pollock 3 dobras" => Some(Protocol::ThreeSite),
            "4-skinfold" | "durnin & womersley 4 dobras" => Some(Protocol::FourSite),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Protocol::SevenSite => "Jackson & Pollock 7-site",
            Protocol::ThreeSite => "Jackson & Pollock 3-site",
            Protocol::FourSite => "Durnin & Womersley 4-site",
        }
    }

    pub fn shape(&self) -> FormulaShape {
        match self {
            Protocol::SevenSite | Protocol::ThreeSite => FormulaShape::Quadratic,
            Protocol::FourSite => FormulaShape::LogLinear,
        }
    }

    /// Sites that must be measured for `sex`
    pub fn required_sites(&self, sex: Sex) -> &'static [SkinfoldSite] {
        match self {
            Protocol::SevenSite => &density::SEVEN_SITE,
            Protocol::ThreeSite => density::three_site_sites(sex),
            Protocol::FourSite => &density::FOUR_SITE,
        }
    }

    /// Whether the required sites depend on sex
    pub fn sex_specific_sites(&self) -> bool {
        self.required_sites(Sex::Male) != self.required_sites(Sex::Female)
    }

    /// Validate the skinfolds and estimate body density
    pub fn body_density(
        &self,
        sex: Sex,
        age: i32,
        folds: &SkinfoldSet,
    ) -> Result<DensityReading, Unavailable> {
        match self {
            Protocol::SevenSite => density::seven_site(sex, age, folds),
            Protocol::ThreeSite => density::three_site(sex, age, folds),
            Protocol::FourSite => density::four_site(sex, age, folds),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
