//! Skinfold sites and measurement sets
//!
//! Measurements are caliper readings in millimeters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{FormatError, Unavailable};

/// Anatomical skinfold measurement site
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinfoldSite {
    Triceps,
    Subscapular,
    Biceps,
    Chest,
    Midaxillary,
    Suprailiac,
    Abdominal,
    Thigh,
    MedialCalf,
}

impl SkinfoldSite {
    /// Every site in the vocabulary, in consultation-record column order
    pub const ALL: [SkinfoldSite; 9] = [
        SkinfoldSite::Triceps,
        SkinfoldSite::Subscapular,
        SkinfoldSite::Biceps,
        SkinfoldSite::Chest,
        SkinfoldSite::Midaxillary,
        SkinfoldSite::Suprailiac,
        SkinfoldSite::Abdominal,
        SkinfoldSite::Thigh,
        SkinfoldSite::MedialCalf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinfoldSite::Triceps => "triceps",
            SkinfoldSite::Subscapular => "subscapular",
            SkinfoldSite::Biceps => "biceps",
            SkinfoldSite::Chest => "chest",
            SkinfoldSite::Midaxillary => "midaxillary",
            SkinfoldSite::Suprailiac => "suprailiac",
            SkinfoldSite::Abdominal => "abdominal",
            SkinfoldSite::Thigh => "thigh",
            SkinfoldSite::MedialCalf => "medial_calf",
        }
    }

    /// Parse a site name.
    ///
    /// Accepts the canonical names, hyphen/space variants ("medial-calf") and
    /// the consultation column form ("skinfold_triceps_mm").
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        let name = normalized
            .strip_prefix("skinfold_")
            .map(|rest| rest.strip_suffix("_mm").unwrap_or(rest))
            .unwrap_or(normalized.as_str());

        match name {
            "triceps" => Some(SkinfoldSite::Triceps),
            "subscapular" => Some(SkinfoldSite::Subscapular),
            "biceps" => Some(SkinfoldSite::Biceps),
            "chest" | "pectoral" => Some(SkinfoldSite::Chest),
            "midaxillary" | "mid_axillary" => Some(SkinfoldSite::Midaxillary),
            "suprailiac" | "supra_iliac" => Some(SkinfoldSite::Suprailiac),
            "abdominal" | "abdomen" => Some(SkinfoldSite::Abdominal),
            "thigh" => Some(SkinfoldSite::Thigh),
            "medial_calf" | "calf" => Some(SkinfoldSite::MedialCalf),
            _ => None,
        }
    }

}

impl fmt::Display for SkinfoldSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skinfold measurements keyed by site, in millimeters
///
/// Partial sets are normal; which sites matter depends on the protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinfoldSet {
    folds: BTreeMap<SkinfoldSite, f64>,
}

impl SkinfoldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, site: SkinfoldSite, mm: f64) -> Self {
        self.insert(site, mm);
        self
    }

    /// Record a measurement, replacing any previous value for the site
    pub fn insert(&mut self, site: SkinfoldSite, mm: f64) -> Option<f64> {
        self.folds.insert(site, mm)
    }

    pub fn remove(&mut self, site: SkinfoldSite) -> Option<f64> {
        self.folds.remove(&site)
    }

    pub fn get(&self, site: SkinfoldSite) -> Option<f64> {
        self.folds.get(&site).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkinfoldSite, f64)> + '_ {
        self.folds.iter().map(|(site, mm)| (*site, *mm))
    }

    /// Build a set from named numeric measurements.
    ///
    /// Unknown site names, non-finite values and two names for the same
    /// site (e.g. "chest" and "pectoral") are caller errors.
    pub fn from_named<I, K>(entries: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut set = Self::new();
        let mut names: BTreeMap<SkinfoldSite, String> = BTreeMap::new();
        for (name, mm) in entries {
            let name = name.as_ref();
            let site = SkinfoldSite::from_str(name)
                .ok_or_else(|| FormatError::UnknownSite(name.to_string()))?;
            if !mm.is_finite() {
                return Err(FormatError::NonNumeric {
                    site: name.to_string(),
                    value: mm.to_string(),
                });
            }
            if let Some(first) = names.insert(site, name.to_string()) {
                let (first, second) = ordered(first, name.to_string());
                return Err(FormatError::DuplicateSite { site, first, second });
            }
            set.insert(site, mm);
        }
        Ok(set)
    }

    /// Parse a `site=mm` argument, e.g. `triceps=12.5`
    pub fn parse_assignment(arg: &str) -> Result<(SkinfoldSite, f64), FormatError> {
        let (name, raw) = arg
            .split_once('=')
            .ok_or_else(|| FormatError::UnknownSite(arg.to_string()))?;
        let site = SkinfoldSite::from_str(name)
            .ok_or_else(|| FormatError::UnknownSite(name.trim().to_string()))?;
        let mm = parse_millimeters(name, raw)?;
        Ok((site, mm))
    }

    /// Sum the given sites, requiring each to be present and strictly positive
    pub fn sum_required(&self, sites: &[SkinfoldSite]) -> Result<f64, Unavailable> {
        let mut sum = 0.0;
        for &site in sites {
            let mm = self
                .get(site)
                .ok_or(Unavailable::MissingSkinfold { site })?;
            if mm.is_nan() || mm <= 0.0 {
                return Err(Unavailable::NonPositiveSkinfold { site, value: mm });
            }
            sum += mm;
        }
        Ok(sum)
    }
}

impl FromIterator<(SkinfoldSite, f64)> for SkinfoldSet {
    fn from_iter<T: IntoIterator<Item = (SkinfoldSite, f64)>>(iter: T) -> Self {
        Self {
            folds: iter.into_iter().collect(),
        }
    }
}

/// Order two names so the reported pair does not depend on input order
fn ordered(a: String, b: String) -> (String, String) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Parse a textual millimeter reading
pub fn parse_millimeters(site: &str, raw: &str) -> Result<f64, FormatError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("mm").unwrap_or(trimmed).trim();
    match number.parse::<f64>() {
        Ok(mm) if mm.is_finite() => Ok(mm),
        _ => Err(FormatError::NonNumeric {
            site: site.trim().to_string(),
            value: raw.to_string(),
        }),
    }
}
