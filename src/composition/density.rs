//! Body density regression formulas
//!
//! Each formula sums a protocol's required skinfolds and applies
//! sex-specific coefficients from the tables below.

use serde::Serialize;

use super::error::Unavailable;
use super::sex::Sex;
use super::skinfold::{SkinfoldSet, SkinfoldSite};

// ============================================================================
// Required Sites
// ============================================================================

/// Jackson & Pollock seven-site protocol, both sexes
pub static SEVEN_SITE: [SkinfoldSite; 7] = [
    SkinfoldSite::Chest,
    SkinfoldSite::Midaxillary,
    SkinfoldSite::Triceps,
    SkinfoldSite::Subscapular,
    SkinfoldSite::Abdominal,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Thigh,
];

/// Jackson & Pollock three-site protocol, men
pub static THREE_SITE_MALE: [SkinfoldSite; 3] = [
    SkinfoldSite::Chest,
    SkinfoldSite::Abdominal,
    SkinfoldSite::Thigh,
];

/// Jackson & Pollock three-site protocol, women
pub static THREE_SITE_FEMALE: [SkinfoldSite; 3] = [
    SkinfoldSite::Triceps,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Thigh,
];

/// Durnin & Womersley four-site protocol, both sexes
pub static FOUR_SITE: [SkinfoldSite; 4] = [
    SkinfoldSite::Biceps,
    SkinfoldSite::Triceps,
    SkinfoldSite::Subscapular,
    SkinfoldSite::Suprailiac,
];

// ============================================================================
// Coefficient Types
// ============================================================================

/// A pair of coefficient sets, one per sex
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BySex<T> {
    pub male: T,
    pub female: T,
}

impl<T> BySex<T> {
    pub fn get(&self, sex: Sex) -> &T {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}

/// `density = intercept - sum·S + sum_squared·S² - age·A`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadraticCoefficients {
    pub intercept: f64,
    pub sum: f64,
    pub sum_squared: f64,
    pub age: f64,
}

impl QuadraticCoefficients {
    pub fn density(&self, skinfold_sum: f64, age: i32) -> f64 {
        self.intercept - (self.sum * skinfold_sum)
            + (self.sum_squared * (skinfold_sum * skinfold_sum))
            - (self.age * f64::from(age))
    }
}

/// `density = c - m·log10(S)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogCoefficients {
    pub c: f64,
    pub m: f64,
}

impl LogCoefficients {
    pub fn density(&self, skinfold_sum: f64) -> f64 {
        self.c - (self.m * skinfold_sum.log10())
    }
}

/// One row of an age-bracketed coefficient table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeBracket {
    pub label: &'static str,
    /// Inclusive upper bound in whole years; None for the open-ended last row
    pub max_age: Option<i32>,
    pub coefficients: BySex<LogCoefficients>,
}

impl AgeBracket {
    pub fn contains(&self, age: i32) -> bool {
        self.max_age.map_or(true, |max| age <= max)
    }
}

// ============================================================================
// Coefficient Tables
// ============================================================================

pub const SEVEN_SITE_COEFFICIENTS: BySex<QuadraticCoefficients> = BySex {
    male: QuadraticCoefficients {
        intercept: 1.112,
        sum: 0.00043499,
        sum_squared: 0.00000055,
        age: 0.00028826,
    },
    female: QuadraticCoefficients {
        intercept: 1.097,
        sum: 0.00046971,
        sum_squared: 0.00000056,
        age: 0.00012828,
    },
};

pub const THREE_SITE_COEFFICIENTS: BySex<QuadraticCoefficients> = BySex {
    male: QuadraticCoefficients {
        intercept: 1.10938,
        sum: 0.0008267,
        sum_squared: 0.0000016,
        age: 0.0002574,
    },
    female: QuadraticCoefficients {
        intercept: 1.0994921,
        sum: 0.0009929,
        sum_squared: 0.0000023,
        age: 0.0001392,
    },
};

const fn log_row(
    label: &'static str,
    max_age: Option<i32>,
    male: (f64, f64),
    female: (f64, f64),
) -> AgeBracket {
    AgeBracket {
        label,
        max_age,
        coefficients: BySex {
            male: LogCoefficients { c: male.0, m: male.1 },
            female: LogCoefficients { c: female.0, m: female.1 },
        },
    }
}

/// Durnin & Womersley (1974) coefficients, searched top to bottom.
///
/// Ages are whole years, so `<17` is stored as an inclusive bound of 16.
pub static FOUR_SITE_BRACKETS: [AgeBracket; 6] = [
    log_row("<17", Some(16), (1.1533, 0.0643), (1.1369, 0.0598)),
    log_row("17-19", Some(19), (1.1620, 0.0630), (1.1549, 0.0678)),
    log_row("20-29", Some(29), (1.1631, 0.0632), (1.1599, 0.0717)),
    log_row("30-39", Some(39), (1.1422, 0.0544), (1.1423, 0.0632)),
    log_row("40-49", Some(49), (1.1620, 0.0700), (1.1333, 0.0612)),
    log_row(">=50", None, (1.1715, 0.0779), (1.1339, 0.0645)),
];

/// First bracket whose upper bound admits `age`
pub fn four_site_bracket(age: i32) -> &'static AgeBracket {
    FOUR_SITE_BRACKETS
        .iter()
        .find(|bracket| bracket.contains(age))
        .unwrap_or(&FOUR_SITE_BRACKETS[FOUR_SITE_BRACKETS.len() - 1])
}

// ============================================================================
// Formulas
// ============================================================================

/// Density estimate together with the skinfold sum it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityReading {
    pub skinfold_sum: f64,
    pub body_density: f64,
}

/// Jackson & Pollock seven-site body density
pub fn seven_site(sex: Sex, age: i32, folds: &SkinfoldSet) -> Result<DensityReading, Unavailable> {
    let skinfold_sum = folds.sum_required(&SEVEN_SITE)?;
    Ok(DensityReading {
        skinfold_sum,
        body_density: SEVEN_SITE_COEFFICIENTS.get(sex).density(skinfold_sum, age),
    })
}

/// Sites the three-site protocol reads for `sex`
pub fn three_site_sites(sex: Sex) -> &'static [SkinfoldSite] {
    match sex {
        Sex::Male => &THREE_SITE_MALE,
        Sex::Female => &THREE_SITE_FEMALE,
    }
}

/// Jackson & Pollock three-site body density
pub fn three_site(sex: Sex, age: i32, folds: &SkinfoldSet) -> Result<DensityReading, Unavailable> {
    let skinfold_sum = folds.sum_required(three_site_sites(sex))?;
    Ok(DensityReading {
        skinfold_sum,
        body_density: THREE_SITE_COEFFICIENTS.get(sex).density(skinfold_sum, age),
    })
}

/// Durnin & Womersley four-site body density
pub fn four_site(sex: Sex, age: i32, folds: &SkinfoldSet) -> Result<DensityReading, Unavailable> {
    let skinfold_sum = folds.sum_required(&FOUR_SITE)?;
    let coefficients = four_site_bracket(age).coefficients.get(sex);
    Ok(DensityReading {
        skinfold_sum,
        body_density: coefficients.density(skinfold_sum),
    })
}
