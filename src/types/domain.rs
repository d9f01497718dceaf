//! Domain Types
//!
//! The coarse task category that selects keyword tables, strategies and templates.

use serde::{Deserialize, Serialize};

/// Task domain
///
/// Declaration order is the classifier's table order and is relied on for
/// stable tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Software,
    Content,
    Business,
    #[serde(alias = "data")]
    DataAnalysis,
    TechnicalDocumentation,
    Creative,
    Education,
    #[default]
    General,
}

impl Domain {
    /// Every domain, in table order
    pub const ALL: [Domain; 8] = [
        Domain::Software,
        Domain::Content,
        Domain::Business,
        Domain::DataAnalysis,
        Domain::TechnicalDocumentation,
        Domain::Creative,
        Domain::Education,
        Domain::General,
    ];

    /// Stable identifier string
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Software => "software",
            Domain::Content => "content",
            Domain::Business => "business",
            Domain::DataAnalysis => "data_analysis",
            Domain::TechnicalDocumentation => "technical_documentation",
            Domain::Creative => "creative",
            Domain::Education => "education",
            Domain::General => "general",
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, Domain::General)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "software" => Ok(Domain::Software),
            "content" => Ok(Domain::Content),
            "business" => Ok(Domain::Business),
            "data_analysis" | "data" => Ok(Domain::DataAnalysis),
            "technical_documentation" => Ok(Domain::TechnicalDocumentation),
            "creative" => Ok(Domain::Creative),
            "education" => Ok(Domain::Education),
            "general" => Ok(Domain::General),
            _ => Err(format!(
                "Unknown domain: {}. Valid values: software, content, business, data_analysis, \
                 technical_documentation, creative, education, general",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_identifiers() {
        for domain in Domain::ALL {
            assert_eq!(domain.as_str().parse::<Domain>().unwrap(), domain);
        }
    }

    #[test]
    fn test_data_alias() {
        assert_eq!("data".parse::<Domain>().unwrap(), Domain::DataAnalysis);
        assert_eq!("Data Analysis".parse::<Domain>().unwrap(), Domain::DataAnalysis);
        let parsed: Domain = serde_json::from_str("\"data\"").unwrap();
        assert_eq!(parsed, Domain::DataAnalysis);
    }

    #[test]
    fn test_unknown_domain() {
        assert!("astrology".parse::<Domain>().is_err());
    }

    #[test]
    fn test_serialized_form() {
        assert_eq!(
            serde_json::to_string(&Domain::TechnicalDocumentation).unwrap(),
            "\"technical_documentation\""
        );
    }
}
