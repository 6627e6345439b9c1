use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four fare classes a train can offer, each with independent inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FareClass {
    Sleeper,
    Ac3Tier,
    Ac2Tier,
    AcFirstClass,
}

impl FareClass {
    pub const ALL: [FareClass; 4] = [
        FareClass::Sleeper,
        FareClass::Ac3Tier,
        FareClass::Ac2Tier,
        FareClass::AcFirstClass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FareClass::Sleeper => "SLEEPER",
            FareClass::Ac3Tier => "AC3TIER",
            FareClass::Ac2Tier => "AC2TIER",
            FareClass::AcFirstClass => "ACFIRSTCLASS",
        }
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid seat class: {0}")]
pub struct InvalidFareClass(pub String);

impl FromStr for FareClass {
    type Err = InvalidFareClass;

    // Class names arrive from callers in arbitrary case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SLEEPER" => Ok(FareClass::Sleeper),
            "AC3TIER" => Ok(FareClass::Ac3Tier),
            "AC2TIER" => Ok(FareClass::Ac2Tier),
            "ACFIRSTCLASS" => Ok(FareClass::AcFirstClass),
            _ => Err(InvalidFareClass(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("sleeper".parse::<FareClass>().unwrap(), FareClass::Sleeper);
        assert_eq!("Ac3Tier".parse::<FareClass>().unwrap(), FareClass::Ac3Tier);
        assert_eq!("AC2TIER".parse::<FareClass>().unwrap(), FareClass::Ac2Tier);
        assert_eq!(
            "acfirstclass".parse::<FareClass>().unwrap(),
            FareClass::AcFirstClass
        );
    }

    #[test]
    fn test_parse_rejects_unknown_class() {
        assert!("BUSINESS".parse::<FareClass>().is_err());
        assert!("".parse::<FareClass>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for class in FareClass::ALL {
            assert_eq!(class.to_string().parse::<FareClass>().unwrap(), class);
        }
    }
}
