//! Data Loading
//!
//! Loads the two catalog files from a data directory:
//! - `countries.json`: `{ "asOf": "YYYY-MM-DD", "countries": [CountryVisaRecord...] }`
//! - `nomad_visas.json`: `[NomadVisaRecord...]`
//!
//! Both files are validated record by record before anything is rendered.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::catalog::types::{CountryVisaRecord, NomadVisaRecord};
use crate::catalog::validation::{
    validate_all, validate_country, validate_nomad_visa, DatasetError, RawCountryRecord,
    RawNomadVisaRecord, RecordError,
};

pub const COUNTRIES_FILE: &str = "countries.json";
pub const NOMAD_VISAS_FILE: &str = "nomad_visas.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountriesFile {
    as_of: Option<NaiveDate>,
    countries: Vec<RawCountryRecord>,
}

/// Immutable, validated visa catalog.
#[derive(Debug, Clone)]
pub struct VisaDataset {
    /// Date the visa information was last checked
    as_of: Option<NaiveDate>,
    countries: Vec<CountryVisaRecord>,
    nomad_visas: Vec<NomadVisaRecord>,
}

impl VisaDataset {
    /// Load and validate both files from `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        let countries_path = data_dir.join(COUNTRIES_FILE);
        let nomad_path = data_dir.join(NOMAD_VISAS_FILE);

        let countries_json = std::fs::read_to_string(&countries_path)
            .with_context(|| format!("Failed to read {}", countries_path.display()))?;
        let nomad_json = std::fs::read_to_string(&nomad_path)
            .with_context(|| format!("Failed to read {}", nomad_path.display()))?;

        let dataset = Self::from_json(&countries_json, &nomad_json)
            .with_context(|| format!("Invalid visa data in {}", data_dir.display()))?;
        Ok(dataset)
    }

    /// Catalog shipped in the crate's `data/` directory.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(
            include_str!("../data/countries.json"),
            include_str!("../data/nomad_visas.json"),
        )
    }

    /// Parse and validate file contents.
    pub fn from_json(countries_json: &str, nomad_json: &str) -> Result<Self, DatasetError> {
        let countries_file: CountriesFile = serde_json::from_str(countries_json)
            .map_err(|source| DatasetError::Parse { file: COUNTRIES_FILE, source })?;
        let raw_nomads: Vec<RawNomadVisaRecord> = serde_json::from_str(nomad_json)
            .map_err(|source| DatasetError::Parse { file: NOMAD_VISAS_FILE, source })?;

        Self::from_raw(countries_file.as_of, countries_file.countries, raw_nomads)
    }

    /// Validate already-deserialized records.
    pub fn from_raw(
        as_of: Option<NaiveDate>,
        raw_countries: Vec<RawCountryRecord>,
        raw_nomads: Vec<RawNomadVisaRecord>,
    ) -> Result<Self, DatasetError> {
        let countries = validate_all(raw_countries, validate_country, |r| r.country_name.as_str())
            .map_err(|errors| invalid(COUNTRIES_FILE, errors))?;
        let nomad_visas = validate_all(raw_nomads, validate_nomad_visa, |r| r.country_name.as_str())
            .map_err(|errors| invalid(NOMAD_VISAS_FILE, errors))?;

        let dataset = Self {
            as_of,
            countries,
            nomad_visas,
        };

        for nomad in &dataset.nomad_visas {
            if dataset.country(&nomad.country_name).is_none() {
                tracing::debug!(
                    "Nomad visa '{}' has no matching country record",
                    nomad.country_name
                );
            }
        }

        tracing::info!(
            "Loaded {} country records, {} nomad visa records (as of {})",
            dataset.countries.len(),
            dataset.nomad_visas.len(),
            dataset
                .as_of
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );

        Ok(dataset)
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// Country records in display order.
    pub fn countries(&self) -> &[CountryVisaRecord] {
        &self.countries
    }

    /// Nomad visa records in display order.
    pub fn nomad_visas(&self) -> &[NomadVisaRecord] {
        &self.nomad_visas
    }

    pub fn country(&self, name: &str) -> Option<&CountryVisaRecord> {
        self.countries.iter().find(|r| r.country_name == name)
    }

    pub fn nomad_visa(&self, name: &str) -> Option<&NomadVisaRecord> {
        self.nomad_visas.iter().find(|r| r.country_name == name)
    }
}

fn invalid(file: &'static str, errors: Vec<RecordError>) -> DatasetError {
    for error in &errors {
        tracing::error!("{}: {}", file, error);
    }
    DatasetError::InvalidRecords { file, errors }
}
