//! Bodycomp Status Tool
//!
//! Provides runtime status information about the bodycomp service.

use chrono::NaiveDate;
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Body composition instructions for AI assistants
pub const BODY_COMPOSITION_INSTRUCTIONS: &str = r#"
# Body Composition Estimation Instructions

This guide explains how to estimate body-fat percentage from skinfold measurements.

## Overview

To estimate body fat you need:
1. **Protocol** - which skinfold method was used at the consultation
2. **Birth date** - ISO format YYYY-MM-DD; age is derived from it
3. **Sex** - "male" or "female" (case-insensitive)
4. **Skinfolds** - caliper readings in millimeters, keyed by site name

Call `list_protocols` to see the sites each protocol needs.

---

## Protocols

| Tag | Method | Sites |
|-----|--------|-------|
| `7-skinfold` | Jackson & Pollock | chest, midaxillary, triceps, subscapular, abdominal, suprailiac, thigh |
| `3-skinfold` | Jackson & Pollock | men: chest, abdominal, thigh / women: triceps, suprailiac, thigh |
| `4-skinfold` | Durnin & Womersley | biceps, triceps, subscapular, suprailiac |

The form labels "Pollock 7 dobras", "Pollock 3 dobras" and
"Durnin & Womersley 4 dobras" are accepted as well.

Body density is converted to body fat with the Siri equation:
`%BF = 495 / density - 450`.

---

## Site Names

triceps, subscapular, biceps, chest, midaxillary, suprailiac, abdominal,
thigh, medial_calf

Extra sites are ignored by protocols that do not use them, so it is fine to
send everything that was measured.

---

## When No Estimate Is Returned

`body_fat_percentage` is null and `reason` says why:

- `unknown_protocol` - protocol tag not recognized
- `unknown_sex` - sex is not male or female
- `missing_skinfold` - a required site was not measured
- `non_positive_skinfold` - a required site is zero or negative
- `degenerate_density` - the readings produce an unusable density

Ask the practitioner for the missing reading rather than guessing a value.

## Mass Partition

Pass `weight_kg` to also get fat mass and lean mass in kilograms.

## Notes

- Age is computed against today's date unless `today` is given
- Results are not clamped to 0-100%; unusual values point at a data-entry problem
- Malformed dates or unknown site names are rejected as invalid parameters
"#;

/// Runtime status of the bodycomp service
#[derive(Debug, Clone, Serialize)]
pub struct BodycompStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Pinned reference date, if configured
    pub reference_date: Option<String>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    reference_date: Option<NaiveDate>,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(reference_date: Option<NaiveDate>) -> Self {
        Self {
            start_time: Instant::now(),
            reference_date,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> BodycompStatus {
        let build_info = BuildInfo::current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        BodycompStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            reference_date: self.reference_date.map(|d| d.to_string()),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
