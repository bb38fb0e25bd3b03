//! Body Composition MCP Tools
//!
//! Tools for estimating body fat from skinfold measurements.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::composition::{
    self, partition, AgeBracket, Assessment, FormulaShape, MassPartition,
    Protocol, Sex, SkinfoldSet, SkinfoldSite, FOUR_SITE_BRACKETS,
};

/// Response for estimate_body_fat
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub protocol: String,
    pub birth_date: String,
    pub reference_date: String,
    pub age: i32,
    pub sex: String,
    /// null when no estimate could be made; see `reason`
    pub body_fat_percentage: Option<f64>,
    pub body_density: Option<f64>,
    pub skinfold_sum_mm: Option<f64>,
    pub mass: Option<MassPartition>,
    pub reason: Option<&'static str>,
    pub message: Option<String>,
    /// Sites the protocol needs for this sex, when both are recognized
    pub required_sites: Vec<&'static str>,
    /// Canonical names of every site received, in site order
    pub measured_sites: Vec<&'static str>,
}

/// Protocol summary for listing
#[derive(Debug, Serialize)]
pub struct ProtocolSummary {
    pub tag: &'static str,
    pub display_name: &'static str,
    pub shape: FormulaShape,
    pub sex_specific_sites: bool,
    pub male_sites: Vec<&'static str>,
    pub female_sites: Vec<&'static str>,
}

/// Response for list_protocols
#[derive(Debug, Serialize)]
pub struct ListProtocolsResponse {
    pub protocols: Vec<ProtocolSummary>,
    pub sites: Vec<&'static str>,
    pub four_site_brackets: &'static [AgeBracket],
}

impl From<Protocol> for ProtocolSummary {
    fn from(protocol: Protocol) -> Self {
        Self {
            tag: protocol.tag(),
            display_name: protocol.display_name(),
            shape: protocol.shape(),
            sex_specific_sites: protocol.sex_specific_sites(),
            male_sites: site_names(protocol.required_sites(Sex::Male)),
            female_sites: site_names(protocol.required_sites(Sex::Female)),
        }
    }
}

fn site_names(sites: &[SkinfoldSite]) -> Vec<&'static str> {
    sites.iter().map(|site| site.as_str()).collect()
}

/// Estimate body fat for one consultation
pub fn estimate_body_fat(
    protocol: &str,
    birth_date: &str,
    sex: &str,
    skinfolds: &HashMap<String, f64>,
    weight_kg: Option<f64>,
    today: NaiveDate,
) -> Result<EstimateResponse, String> {
    let folds = SkinfoldSet::from_named(skinfolds.iter().map(|(name, mm)| (name, *mm)))
        .map_err(|e| e.to_string())?;
    let assessment = composition::assess(protocol, birth_date, sex, &folds, today)
        .map_err(|e| e.to_string())?;

    let required_sites = match composition::resolve(protocol, sex) {
        Ok((protocol, sex)) => site_names(protocol.required_sites(sex)),
        Err(_) => Vec::new(),
    };

    let mut response = EstimateResponse {
        protocol: protocol.to_string(),
        birth_date: birth_date.to_string(),
        reference_date: today.to_string(),
        age: assessment.age(),
        sex: sex.to_string(),
        body_fat_percentage: None,
        body_density: None,
        skinfold_sum_mm: None,
        mass: None,
        reason: None,
        message: None,
        required_sites,
        measured_sites: folds.iter().map(|(site, _)| site.as_str()).collect(),
    };

    match assessment {
        Assessment::Estimated(estimate) => {
            response.protocol = estimate.protocol.tag().to_string();
            response.sex = estimate.sex.as_str().to_string();
            response.body_fat_percentage = Some(estimate.body_fat_percentage);
            response.body_density = Some(estimate.body_density);
            response.skinfold_sum_mm = Some(estimate.skinfold_sum);
            response.mass = weight_kg.and_then(|w| partition(w, estimate.body_fat_percentage));
        }
        Assessment::NoResult { reason, .. } => {
            response.reason = Some(reason.code());
            response.message = Some(reason.to_string());
        }
    }

    Ok(response)
}

/// Describe every supported protocol
pub fn list_protocols() -> ListProtocolsResponse {
    ListProtocolsResponse {
        protocols: Protocol::ALL.into_iter().map(ProtocolSummary::from).collect(),
        sites: site_names(&SkinfoldSite::ALL),
        four_site_brackets: &FOUR_SITE_BRACKETS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn seven_sites(mm: f64) -> HashMap<String, f64> {
        ["chest", "midaxillary", "triceps", "subscapular", "abdominal", "suprailiac", "thigh"]
            .into_iter()
            .map(|name| (name.to_string(), mm))
            .collect()
    }

    #[test]
    fn test_estimate_with_weight() {
        let response =
            estimate_body_fat("Pollock 7 dobras", "1994-06-15", "MALE", &seven_sites(15.0), Some(80.0), today())
                .unwrap();
        assert_eq!(response.protocol, "7-skinfold");
        assert_eq!(response.sex, "male");
        assert_eq!(response.age, 30);
        assert_eq!(response.required_sites.len(), 7);
        let pct = response.body_fat_percentage.unwrap();
        assert!((pct - 15.3384).abs() < 0.001);
        let mass = response.mass.unwrap();
        assert!((mass.fat_mass_kg - 80.0 * pct / 100.0).abs() < 1e-9);
        assert!(response.reason.is_none());
    }

    #[test]
    fn test_no_result_carries_reason() {
        let mut folds = seven_sites(15.0);
        folds.remove("thigh");
        let response =
            estimate_body_fat("7-skinfold", "1994-06-15", "female", &folds, Some(60.0), today()).unwrap();
        assert_eq!(response.body_fat_percentage, None);
        assert!(response.mass.is_none());
        assert_eq!(response.reason, Some("missing_skinfold"));
        assert_eq!(response.message.as_deref(), Some("missing required skinfold: thigh"));

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["body_fat_percentage"].is_null());
    }

    #[test]
    fn test_unknown_protocol_has_no_required_sites() {
        let response =
            estimate_body_fat("caliper", "1994-06-15", "male", &seven_sites(15.0), None, today()).unwrap();
        assert_eq!(response.reason, Some("unknown_protocol"));
        assert!(response.required_sites.is_empty());
    }

    #[test]
    fn test_two_names_for_one_site_are_rejected_every_time() {
        let mut folds = seven_sites(15.0);
        folds.insert("chest".to_string(), 10.0);
        folds.insert("pectoral".to_string(), 30.0);

        let mut errors = std::collections::HashSet::new();
        for _ in 0..50 {
            // A fresh map each time so iteration order varies between calls
            let request: HashMap<String, f64> = folds.clone().into_iter().collect();
            let err = estimate_body_fat("7-skinfold", "1994-06-15", "male", &request, None, today()).unwrap_err();
            errors.insert(err);
        }
        assert_eq!(errors.len(), 1);
        let err = errors.into_iter().next().unwrap();
        assert!(err.contains("chest") && err.contains("pectoral"), "{}", err);
    }

    #[test]
    fn test_no_result_reports_age_and_measured_sites() {
        let mut folds = HashMap::new();
        folds.insert("skinfold_thigh_mm".to_string(), 20.0);
        folds.insert("triceps".to_string(), 12.0);
        let response = estimate_body_fat("3-skinfold", "2000-06-16", "female", &folds, None, today()).unwrap();
        assert_eq!(response.age, 23);
        assert_eq!(response.reason, Some("missing_skinfold"));
        assert_eq!(response.measured_sites, vec!["triceps", "thigh"]);
    }

    #[test]
    fn test_format_errors() {
        assert!(estimate_body_fat("7-skinfold", "1994/06/15", "male", &seven_sites(15.0), None, today()).is_err());

        let mut folds = seven_sites(15.0);
        folds.insert("forearm".to_string(), 5.0);
        let err = estimate_body_fat("7-skinfold", "1994-06-15", "male", &folds, None, today()).unwrap_err();
        assert!(err.contains("forearm"));
    }

    #[test]
    fn test_list_protocols() {
        let response = list_protocols();
        assert_eq!(response.protocols.len(), 3);
        assert_eq!(response.sites.len(), 9);
        assert_eq!(response.four_site_brackets.len(), 6);

        let three = &response.protocols[1];
        assert_eq!(three.tag, "3-skinfold");
        assert_eq!(three.male_sites, vec!["chest", "abdominal", "thigh"]);
        assert_eq!(three.female_sites, vec!["triceps", "suprailiac", "thigh"]);
        assert!(three.sex_specific_sites);
        assert!(!response.protocols[0].sex_specific_sites);
        assert!(!response.protocols[2].sex_specific_sites);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["four_site_brackets"][1]["max_age"], 19);
        assert_eq!(json["four_site_brackets"][5]["max_age"], serde_json::Value::Null);
    }
}
