//! Body-fat estimation entry points
//!
//! Every call takes its inputs explicitly and returns its result directly;
//! nothing is remembered between calls.

use chrono::NaiveDate;
use serde::Serialize;

use super::age;
use super::error::{FormatError, Unavailable};
use super::protocol::Protocol;
use super::sex::Sex;
use super::siri;
use super::skinfold::SkinfoldSet;

/// A successful body-fat estimate with its intermediate values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub protocol: Protocol,
    pub sex: Sex,
    pub age: i32,
    pub skinfold_sum: f64,
    pub body_density: f64,
    pub body_fat_percentage: f64,
}

/// Outcome of an estimation request
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    Estimated(Estimate),
    /// The age is resolved before any other check, so it is known here too
    NoResult { age: i32, reason: Unavailable },
}

impl Assessment {
    /// Age in completed years on the reference date
    pub fn age(&self) -> i32 {
        match self {
            Assessment::Estimated(estimate) => estimate.age,
            Assessment::NoResult { age, .. } => *age,
        }
    }

    pub fn body_fat(&self) -> Option<f64> {
        self.estimate().map(|e| e.body_fat_percentage)
    }

    pub fn estimate(&self) -> Option<&Estimate> {
        match self {
            Assessment::Estimated(estimate) => Some(estimate),
            Assessment::NoResult { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&Unavailable> {
        match self {
            Assessment::Estimated(_) => None,
            Assessment::NoResult { reason, .. } => Some(reason),
        }
    }
}

/// Estimate body fat from already-typed inputs
pub fn estimate(
    protocol: Protocol,
    sex: Sex,
    age: i32,
    folds: &SkinfoldSet,
) -> Result<Estimate, Unavailable> {
    let reading = protocol.body_density(sex, age, folds)?;

    tracing::debug!(
        protocol = protocol.tag(),
        sex = sex.as_str(),
        age,
        skinfold_sum = reading.skinfold_sum,
        body_density = reading.body_density,
        "Body density estimated"
    );

    let body_fat_percentage = siri::percent_fat(reading.body_density).ok_or_else(|| {
        tracing::warn!(
            "Density {} from {} cannot be converted to percent fat",
            reading.body_density,
            protocol.tag()
        );
        Unavailable::DegenerateDensity {
            density: reading.body_density,
        }
    })?;

    Ok(Estimate {
        protocol,
        sex,
        age,
        skinfold_sum: reading.skinfold_sum,
        body_density: reading.body_density,
        body_fat_percentage,
    })
}

/// Resolve textual protocol and sex tags
pub fn resolve(protocol: &str, sex: &str) -> Result<(Protocol, Sex), Unavailable> {
    let protocol = Protocol::from_str(protocol).ok_or_else(|| Unavailable::UnknownProtocol {
        protocol: protocol.to_string(),
    })?;
    let sex = Sex::from_str(sex).ok_or_else(|| Unavailable::UnknownSex {
        sex: sex.to_string(),
    })?;
    Ok((protocol, sex))
}

/// Assess a request, reporting why no estimate could be made.
///
/// `Err` is reserved for malformed input; a missing skinfold or an unknown
/// protocol is an `Assessment::NoResult`.
pub fn assess(
    protocol: &str,
    birth_date: &str,
    sex: &str,
    folds: &SkinfoldSet,
    today: NaiveDate,
) -> Result<Assessment, FormatError> {
    let birth_date = age::parse_date(birth_date)?;
    let age = age::age_on(birth_date, today);

    match resolve(protocol, sex).and_then(|(protocol, sex)| estimate(protocol, sex, age, folds)) {
        Ok(estimate) => Ok(Assessment::Estimated(estimate)),
        Err(reason) => {
            tracing::debug!(reason = reason.code(), "No body-fat estimate: {}", reason);
            Ok(Assessment::NoResult { age, reason })
        }
    }
}

/// Body-fat percentage as of `today`, or None when it cannot be estimated
pub fn estimate_body_fat_on(
    protocol: &str,
    birth_date: &str,
    sex: &str,
    folds: &SkinfoldSet,
    today: NaiveDate,
) -> Result<Option<f64>, FormatError> {
    Ok(assess(protocol, birth_date, sex, folds, today)?.body_fat())
}

/// Body-fat percentage using today's local date for the age
pub fn estimate_body_fat(
    protocol: &str,
    birth_date: &str,
    sex: &str,
    folds: &SkinfoldSet,
) -> Result<Option<f64>, FormatError> {
    estimate_body_fat_on(protocol, birth_date, sex, folds, age::today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::density::{FOUR_SITE, SEVEN_SITE, THREE_SITE_FEMALE, THREE_SITE_MALE};
    use crate::composition::skinfold::SkinfoldSite;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn uniform(sites: &[SkinfoldSite], mm: f64) -> SkinfoldSet {
        sites.iter().map(|&site| (site, mm)).collect()
    }

    fn full_set() -> SkinfoldSet {
        uniform(&SkinfoldSite::ALL, 14.0)
    }

    #[test]
    fn test_seven_site_reference_value() {
        // Born 1994-06-15, so 30 on 2024-06-15
        let folds = uniform(&SEVEN_SITE, 15.0);
        let pct = estimate_body_fat_on("7-skinfold", "1994-06-15", "male", &folds, today())
            .unwrap()
            .unwrap();

        let density = 1.112 - 0.00043499 * 105.0 + 0.00000055 * 105.0_f64.powi(2) - 0.00028826 * 30.0;
        let expected = 495.0 / density - 450.0;
        assert!((pct - expected).abs() < 0.0001);
        assert!((pct - 15.3384).abs() < 0.001);
    }

    #[test]
    fn test_assess_reports_intermediates() {
        let folds = uniform(&FOUR_SITE, 10.0);
        let assessment = assess("4-skinfold", "1999-01-01", "Female", &folds, today()).unwrap();
        let estimate = assessment.estimate().unwrap();
        assert_eq!(estimate.protocol, Protocol::FourSite);
        assert_eq!(estimate.sex, Sex::Female);
        assert_eq!(estimate.age, 25);
        assert!((estimate.skinfold_sum - 40.0).abs() < 1e-12);
        let density = 1.1599 - 0.0717 * 40f64.log10();
        assert!((estimate.body_density - density).abs() < 1e-12);
        assert!((estimate.body_fat_percentage - (495.0 / density - 450.0)).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_protocol_is_no_result() {
        let result = assess("bioimpedance", "1990-01-01", "male", &full_set(), today()).unwrap();
        assert_eq!(
            result.reason(),
            Some(&Unavailable::UnknownProtocol { protocol: "bioimpedance".into() })
        );
        assert_eq!(
            estimate_body_fat_on("", "1990-01-01", "male", &full_set(), today()).unwrap(),
            None
        );
    }

    #[test]
    fn test_no_result_still_reports_age() {
        let result = assess("7-skinfold", "2000-06-16", "male", &SkinfoldSet::new(), today()).unwrap();
        assert_eq!(result.age(), 23);
        assert!(result.estimate().is_none());
        assert_eq!(
            result.reason(),
            Some(&Unavailable::MissingSkinfold { site: SkinfoldSite::Chest })
        );

        let result = assess("7-skinfold", "2000-06-15", "male", &full_set(), today()).unwrap();
        assert_eq!(result.age(), 24);
        assert_eq!(result.age(), result.estimate().unwrap().age);
    }

    #[test]
    fn test_unknown_sex_is_no_result_for_every_protocol() {
        for protocol in Protocol::ALL {
            let result = assess(protocol.tag(), "1990-01-01", "unknown", &full_set(), today()).unwrap();
            assert_eq!(
                result.reason(),
                Some(&Unavailable::UnknownSex { sex: "unknown".into() })
            );
        }
    }

    #[test]
    fn test_dropping_any_required_site_is_no_result() {
        for protocol in Protocol::ALL {
            for sex in Sex::ALL {
                let sites = protocol.required_sites(sex);
                for &dropped in sites {
                    for replacement in [None, Some(0.0), Some(-4.0)] {
                        let mut folds = uniform(sites, 12.0);
                        match replacement {
                            Some(mm) => folds.insert(dropped, mm),
                            None => folds.remove(dropped),
                        };
                        let pct = estimate_body_fat_on(
                            protocol.tag(),
                            "1990-01-01",
                            sex.as_str(),
                            &folds,
                            today(),
                        )
                        .unwrap();
                        assert_eq!(pct, None, "{} {} without {}", protocol, sex, dropped);
                    }
                }
                let complete = uniform(sites, 12.0);
                assert!(estimate_body_fat_on(protocol.tag(), "1990-01-01", sex.as_str(), &complete, today())
                    .unwrap()
                    .is_some());
            }
        }
    }

    #[test]
    fn test_three_site_male_ignores_female_sites() {
        let folds = uniform(&THREE_SITE_FEMALE, 12.0).with(SkinfoldSite::Chest, 12.0);
        let result = assess("3-skinfold", "1990-01-01", "male", &folds, today()).unwrap();
        assert_eq!(
            result.reason(),
            Some(&Unavailable::MissingSkinfold { site: SkinfoldSite::Abdominal })
        );
    }

    #[test]
    fn test_three_site_female_ignores_male_sites() {
        let mut folds = uniform(&THREE_SITE_MALE, 12.0).with(SkinfoldSite::Suprailiac, 12.0);
        folds.remove(SkinfoldSite::Triceps);
        let result = assess("3-skinfold", "1990-01-01", "female", &folds, today()).unwrap();
        assert_eq!(
            result.reason(),
            Some(&Unavailable::MissingSkinfold { site: SkinfoldSite::Triceps })
        );
    }

    #[test]
    fn test_four_site_boundary_via_birth_date() {
        let folds = uniform(&FOUR_SITE, 10.0);
        for sex in ["male", "female"] {
            // 19 the day before the 20th birthday, 20 on it
            let at_19 = assess("4-skinfold", "2004-06-16", sex, &folds, today()).unwrap();
            let at_20 = assess("4-skinfold", "2004-06-15", sex, &folds, today()).unwrap();
            assert_eq!(at_19.estimate().unwrap().age, 19);
            assert_eq!(at_20.estimate().unwrap().age, 20);
            assert!(at_19.body_fat() != at_20.body_fat());
        }
    }

    #[test]
    fn test_malformed_birth_date_is_format_error() {
        let err = estimate_body_fat_on("7-skinfold", "15/06/1994", "male", &full_set(), today());
        assert!(matches!(err, Err(FormatError::InvalidDate { .. })));
    }

    #[test]
    fn test_birth_date_checked_before_protocol() {
        let err = assess("not-a-protocol", "bad", "male", &full_set(), today());
        assert!(err.is_err());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let folds = full_set();
        for protocol in Protocol::ALL {
            let first = estimate_body_fat_on(protocol.tag(), "1980-02-29", "female", &folds, today())
                .unwrap()
                .unwrap();
            let second = estimate_body_fat_on(protocol.tag(), "1980-02-29", "female", &folds, today())
                .unwrap()
                .unwrap();
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }

    #[test]
    fn test_form_labels_dispatch() {
        let folds = full_set();
        let canonical = estimate_body_fat_on("7-skinfold", "1990-01-01", "female", &folds, today()).unwrap();
        let labelled = estimate_body_fat_on("Pollock 7 dobras", "1990-01-01", "Feminino", &folds, today()).unwrap();
        assert_eq!(canonical, labelled);
    }

    #[test]
    fn test_estimate_body_fat_uses_clock() {
        let folds = uniform(&SEVEN_SITE, 15.0);
        assert!(estimate_body_fat("7-skinfold", "1990-01-01", "male", &folds)
            .unwrap()
            .is_some());
    }
}
