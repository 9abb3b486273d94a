//! Destination search behind the page's visa checker form.
//!
//! Matching rules:
//! - destination is required; matched case-insensitively in both directions
//!   (country name contains the query, or the query contains the country name)
//! - purpose `DigitalNomad` keeps only countries with an available nomad visa
//! - continent narrows to one continent
//! - duration never filters; it flags visa-free stays that are too short

use serde::de::{value::StringDeserializer, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::catalog::types::{Continent, CountryVisaRecord, VisaStatus};
use crate::data::VisaDataset;

/// Trip purpose options in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelPurpose {
    Tourism,
    Business,
    DigitalNomad,
    LongStay,
    Study,
}

impl TravelPurpose {
    pub const ALL: [TravelPurpose; 5] = [
        TravelPurpose::Tourism,
        TravelPurpose::Business,
        TravelPurpose::DigitalNomad,
        TravelPurpose::LongStay,
        TravelPurpose::Study,
    ];

    /// Query-string value.
    pub fn slug(&self) -> &'static str {
        match self {
            TravelPurpose::Tourism => "tourism",
            TravelPurpose::Business => "business",
            TravelPurpose::DigitalNomad => "digital_nomad",
            TravelPurpose::LongStay => "long_stay",
            TravelPurpose::Study => "study",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelPurpose::Tourism => "관광",
            TravelPurpose::Business => "출장",
            TravelPurpose::DigitalNomad => "디지털노마드",
            TravelPurpose::LongStay => "장기체류",
            TravelPurpose::Study => "학업",
        }
    }
}

/// Planned length of stay options in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayLength {
    WithinWeek,
    WithinMonth,
    WithinThreeMonths,
    WithinSixMonths,
    YearOrMore,
}

impl StayLength {
    pub const ALL: [StayLength; 5] = [
        StayLength::WithinWeek,
        StayLength::WithinMonth,
        StayLength::WithinThreeMonths,
        StayLength::WithinSixMonths,
        StayLength::YearOrMore,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            StayLength::WithinWeek => "within_week",
            StayLength::WithinMonth => "within_month",
            StayLength::WithinThreeMonths => "within_three_months",
            StayLength::WithinSixMonths => "within_six_months",
            StayLength::YearOrMore => "year_or_more",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StayLength::WithinWeek => "1주 이내",
            StayLength::WithinMonth => "1개월 이내",
            StayLength::WithinThreeMonths => "3개월 이내",
            StayLength::WithinSixMonths => "6개월 이내",
            StayLength::YearOrMore => "1년 이상",
        }
    }

    /// Longest stay the option covers, in days. "1년 이상" counts as a year.
    pub fn upper_bound_days(&self) -> u32 {
        match self {
            StayLength::WithinWeek => 7,
            StayLength::WithinMonth => 30,
            StayLength::WithinThreeMonths => 90,
            StayLength::WithinSixMonths => 180,
            StayLength::YearOrMore => 365,
        }
    }
}

/// Search form submission.
///
/// The form posts `""` for an unselected dropdown, so blank filter values
/// read as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisaQuery {
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub purpose: Option<TravelPurpose>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub duration: Option<StayLength>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub continent: Option<Continent>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            let value: StringDeserializer<D::Error> = value.trim().to_string().into_deserializer();
            T::deserialize(value).map(Some)
        }
        _ => Ok(None),
    }
}

impl VisaQuery {
    pub fn destination(destination: &str) -> Self {
        Self {
            destination: Some(destination.to_string()),
            ..Self::default()
        }
    }

    pub fn with_purpose(mut self, purpose: TravelPurpose) -> Self {
        self.purpose = Some(purpose);
        self
    }

    pub fn with_duration(mut self, duration: StayLength) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_continent(mut self, continent: Continent) -> Self {
        self.continent = Some(continent);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("목적지를 입력해주세요.")]
    EmptyDestination,
}

/// One matching country.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit<'a> {
    pub record: &'a CountryVisaRecord,
    /// Visa-free stay is shorter than the selected stay length.
    pub exceeds_visa_free_stay: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome<'a> {
    pub destination: String,
    pub purpose: Option<TravelPurpose>,
    pub duration: Option<StayLength>,
    pub hits: Vec<SearchHit<'a>>,
}

impl SearchOutcome<'_> {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Nomad advice box is shown for nomad searches that found something.
    pub fn shows_nomad_notice(&self) -> bool {
        self.purpose == Some(TravelPurpose::DigitalNomad) && !self.hits.is_empty()
    }
}

fn matches_destination(country_name: &str, needle: &str) -> bool {
    let name = country_name.to_lowercase();
    name.contains(needle) || needle.contains(&name)
}

fn exceeds_visa_free_stay(record: &CountryVisaRecord, duration: Option<StayLength>) -> bool {
    match (record.visa_status, record.stay_duration_days, duration) {
        (VisaStatus::VisaFree, Some(days), Some(length)) => days < length.upper_bound_days(),
        _ => false,
    }
}

/// Run a query against the dataset. Hits keep dataset order.
pub fn search<'a>(
    dataset: &'a VisaDataset,
    query: &VisaQuery,
) -> Result<SearchOutcome<'a>, SearchError> {
    let destination = query
        .destination
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or(SearchError::EmptyDestination)?;
    let needle = destination.to_lowercase();

    let hits: Vec<SearchHit<'a>> = dataset
        .countries()
        .iter()
        .filter(|r| matches_destination(&r.country_name, &needle))
        .filter(|r| query.purpose != Some(TravelPurpose::DigitalNomad) || r.nomad_program().is_some())
        .filter(|r| query.continent.map_or(true, |c| r.continent == Some(c)))
        .map(|record| SearchHit {
            record,
            exceeds_visa_free_stay: exceeds_visa_free_stay(record, query.duration),
        })
        .collect();

    tracing::debug!(
        "Search '{}' (purpose: {:?}, continent: {:?}) returned {} hits",
        destination,
        query.purpose,
        query.continent,
        hits.len()
    );

    Ok(SearchOutcome {
        destination: destination.to_string(),
        purpose: query.purpose,
        duration: query.duration,
        hits,
    })
}
