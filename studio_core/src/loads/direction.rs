//! Load direction definitions
//!
//! A load acts on a component in one of three local senses. The direction
//! decides which stress term the load's magnitude feeds.

use serde::{Deserialize, Serialize};

/// Sense in which a load acts on its component.
///
/// # Example
/// ```
/// use studio_core::loads::LoadDirection;
///
/// let dir = LoadDirection::Moment;
/// assert_eq!(dir.unit(), "kN·m");
/// assert_eq!(dir.to_string(), "moment");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadDirection {
    /// Force along the member axis (kN)
    #[default]
    Axial,
    /// Force across the section (kN)
    Shear,
    /// Bending moment (kN·m)
    Moment,
}

impl LoadDirection {
    /// All directions in standard order
    pub const ALL: [LoadDirection; 3] = [LoadDirection::Axial, LoadDirection::Shear, LoadDirection::Moment];

    /// Lowercase keyword, as used in JSON and reports
    pub fn code(&self) -> &'static str {
        match self {
            LoadDirection::Axial => "axial",
            LoadDirection::Shear => "shear",
            LoadDirection::Moment => "moment",
        }
    }

    /// Unit the magnitude is entered in
    pub fn unit(&self) -> &'static str {
        match self {
            LoadDirection::Axial | LoadDirection::Shear => "kN",
            LoadDirection::Moment => "kN·m",
        }
    }
}

impl std::fmt::Display for LoadDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for LoadDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoadDirection::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown load direction '{}' (expected axial, shear or moment)", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(LoadDirection::Axial.code(), "axial");
        assert_eq!(LoadDirection::Shear.code(), "shear");
        assert_eq!(LoadDirection::Moment.code(), "moment");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Shear".parse::<LoadDirection>().unwrap(), LoadDirection::Shear);
        assert_eq!(" moment ".parse::<LoadDirection>().unwrap(), LoadDirection::Moment);
        assert!("torsion".parse::<LoadDirection>().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LoadDirection::Moment).unwrap();
        assert_eq!(json, "\"moment\"");
        let parsed: LoadDirection = serde_json::from_str("\"axial\"").unwrap();
        assert_eq!(parsed, LoadDirection::Axial);
    }
}
