//! Visa catalog record types.
//!
//! Records are produced only by the validating loader (see `validation.rs`)
//! and are never mutated afterwards. Field names serialize in camelCase to
//! match the data files.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Required documents in display order (typically 2-4 entries).
pub type Documents = SmallVec<[String; 4]>;

/// Entry requirement for a Korean passport holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisaStatus {
    VisaFree,
    VisaRequired,
}

impl VisaStatus {
    pub const ALL: [VisaStatus; 2] = [VisaStatus::VisaFree, VisaStatus::VisaRequired];

    /// Value used in the data files.
    pub fn code(&self) -> &'static str {
        match self {
            VisaStatus::VisaFree => "VISA_FREE",
            VisaStatus::VisaRequired => "VISA_REQUIRED",
        }
    }

    /// Badge text shown on the card.
    pub fn label(&self) -> &'static str {
        match self {
            VisaStatus::VisaFree => "무비자",
            VisaStatus::VisaRequired => "비자 필요",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// How much paperwork entry takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Hard];

    pub fn code(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Moderate => "MODERATE",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "쉬움",
            Difficulty::Moderate => "보통",
            Difficulty::Hard => "어려움",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// Continent grouping used by the search filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Continent {
    Asia,
    Europe,
    America,
    MiddleEast,
    Africa,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::Asia,
        Continent::Europe,
        Continent::America,
        Continent::MiddleEast,
        Continent::Africa,
        Continent::Oceania,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Continent::Asia => "ASIA",
            Continent::Europe => "EUROPE",
            Continent::America => "AMERICA",
            Continent::MiddleEast => "MIDDLE_EAST",
            Continent::Africa => "AFRICA",
            Continent::Oceania => "OCEANIA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Continent::Asia => "아시아",
            Continent::Europe => "유럽",
            Continent::America => "아메리카",
            Continent::MiddleEast => "중동",
            Continent::Africa => "아프리카",
            Continent::Oceania => "오세아니아",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

/// Digital nomad programme flag attached to a country record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalNomadVisa {
    pub available: bool,
    pub program_name: String,
}

/// One destination's visa information for a Korean passport holder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryVisaRecord {
    pub country_name: String,
    pub visa_status: VisaStatus,
    pub stay_duration_days: Option<u32>,
    pub difficulty: Difficulty,
    pub required_documents: Documents,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_nomad_visa: Option<DigitalNomadVisa>,
    pub guide_link_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<Continent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl CountryVisaRecord {
    /// Default call-to-action text when the data file omits one.
    pub fn default_guide_label(country_name: &str) -> String {
        format!("{} 여행 가이드 보기", country_name)
    }

    /// Programme name when a nomad visa is actually on offer.
    pub fn nomad_program(&self) -> Option<&str> {
        self.digital_nomad_visa
            .as_ref()
            .filter(|v| v.available)
            .map(|v| v.program_name.as_str())
    }
}

/// A dedicated remote-work visa, shown in the comparison section.
///
/// `country_name` joins loosely to [`CountryVisaRecord::country_name`]; the
/// country does not have to exist in the main dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NomadVisaRecord {
    pub country_name: String,
    pub visa_program_name: String,
    pub stay_duration_label: String,
    pub minimum_income_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_codes_and_labels_round_trip() {
        for status in VisaStatus::ALL {
            assert_eq!(VisaStatus::from_code(status.code()), Some(status));
            assert_eq!(VisaStatus::from_label(status.label()), Some(status));
        }
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_code(difficulty.code()), Some(difficulty));
            assert_eq!(Difficulty::from_label(difficulty.label()), Some(difficulty));
        }
        for continent in Continent::ALL {
            assert_eq!(Continent::from_code(continent.code()), Some(continent));
        }
        assert_eq!(Difficulty::from_code("MEDIUM"), None);
    }

    #[test]
    fn test_serde_codes_match_code() {
        let json = serde_json::to_string(&VisaStatus::VisaRequired).unwrap();
        assert_eq!(json, "\"VISA_REQUIRED\"");
        let json = serde_json::to_string(&Continent::MiddleEast).unwrap();
        assert_eq!(json, "\"MIDDLE_EAST\"");
    }

    #[test]
    fn test_nomad_program_requires_available() {
        let mut record = CountryVisaRecord {
            country_name: "태국".to_string(),
            visa_status: VisaStatus::VisaFree,
            stay_duration_days: Some(30),
            difficulty: Difficulty::Easy,
            required_documents: smallvec!["유효한 여권".to_string()],
            digital_nomad_visa: Some(DigitalNomadVisa {
                available: true,
                program_name: "LTR 비자".to_string(),
            }),
            guide_link_label: CountryVisaRecord::default_guide_label("태국"),
            continent: None,
            language: None,
            currency: None,
        };
        assert_eq!(record.nomad_program(), Some("LTR 비자"));

        record.digital_nomad_visa.as_mut().unwrap().available = false;
        assert_eq!(record.nomad_program(), None);
        assert_eq!(record.guide_link_label, "태국 여행 가이드 보기");
    }
}
