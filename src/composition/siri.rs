//! Density to percent-fat conversion (Siri, 1961)

/// Body-fat percentage from body density in g/mL.
///
/// ```text
/// %BF = 495 / density - 450
/// ```
///
/// Returns None for a zero or non-finite density. The result is not clamped
/// to 0-100.
pub fn percent_fat(density: f64) -> Option<f64> {
    if !density.is_finite() || density == 0.0 {
        return None;
    }

    let pct = 495.0 / density - 450.0;
    pct.is_finite().then_some(pct)
}
