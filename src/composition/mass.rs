//! Fat and lean mass partition of body weight

use serde::Serialize;

/// Body weight split into fat and lean (fat-free) mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassPartition {
    pub weight_kg: f64,
    pub fat_mass_kg: f64,
    pub lean_mass_kg: f64,
}

/// Split `weight_kg` by body-fat percentage.
///
/// ```text
/// fat  = weight × BF% / 100
/// lean = weight - fat
/// ```
///
/// Returns None for a non-positive or non-finite weight.
pub fn partition(weight_kg: f64, body_fat_pct: f64) -> Option<MassPartition> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 || !body_fat_pct.is_finite() {
        return None;
    }

    let fat_mass_kg = weight_kg * body_fat_pct / 100.0;
    Some(MassPartition {
        weight_kg,
        fat_mass_kg,
        lean_mass_kg: weight_kg - fat_mass_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition() {
        let split = partition(80.0, 20.0).unwrap();
        assert!((split.fat_mass_kg - 16.0).abs() < 1e-9);
        assert!((split.lean_mass_kg - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_partition_rejects_bad_weight() {
        assert_eq!(partition(0.0, 20.0), None);
        assert_eq!(partition(-70.0, 20.0), None);
        assert_eq!(partition(f64::NAN, 20.0), None);
    }
}
