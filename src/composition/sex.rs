//! Sex designation used to select regression coefficients

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Case-insensitive parse; also accepts the Portuguese form labels
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "masculino" => Some(Sex::Male),
            "female" | "feminino" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(Sex::from_str("MALE"), Some(Sex::Male));
        assert_eq!(Sex::from_str("Female"), Some(Sex::Female));
        assert_eq!(Sex::from_str(" male "), Some(Sex::Male));
    }

    #[test]
    fn test_form_labels() {
        assert_eq!(Sex::from_str("Masculino"), Some(Sex::Male));
        assert_eq!(Sex::from_str("feminino"), Some(Sex::Female));
    }

    #[test]
    fn test_rejects_other_values() {
        assert_eq!(Sex::from_str(""), None);
        assert_eq!(Sex::from_str("m"), None);
        assert_eq!(Sex::from_str("other"), None);
    }
}
