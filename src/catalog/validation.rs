//! Load-time validation of catalog records.
//!
//! Data files deserialize into loose `Raw*` structs first so a missing field
//! or an unknown enum value can be reported against the record that carries
//! it. Every issue in a file is collected; a file with any invalid record is
//! rejected as a whole.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::types::{
    Continent, CountryVisaRecord, DigitalNomadVisa, Difficulty, Documents, NomadVisaRecord,
    VisaStatus,
};

/// Unvalidated country record as it appears in `countries.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCountryRecord {
    pub country_name: Option<String>,
    pub visa_status: Option<String>,
    pub stay_duration_days: Option<i64>,
    pub difficulty: Option<String>,
    pub required_documents: Option<Vec<String>>,
    pub digital_nomad_visa: Option<RawDigitalNomadVisa>,
    pub guide_link_label: Option<String>,
    pub continent: Option<String>,
    pub language: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDigitalNomadVisa {
    #[serde(default = "default_available")]
    pub available: bool,
    pub program_name: Option<String>,
}

fn default_available() -> bool {
    true
}

/// Unvalidated record from `nomad_visas.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNomadVisaRecord {
    pub country_name: Option<String>,
    pub visa_program_name: Option<String>,
    pub stay_duration_label: Option<String>,
    pub minimum_income_label: Option<String>,
}

/// What is wrong with a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordIssue {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is blank")]
    BlankField(&'static str),
    #[error("field `{field}` has unknown value {value:?}")]
    UnknownValue { field: &'static str, value: String },
    #[error("`requiredDocuments` is empty")]
    EmptyDocuments,
    #[error("required document #{position} is blank")]
    BlankDocument { position: usize },
    #[error("visa-free record has no `stayDurationDays`")]
    MissingStayDuration,
    #[error("`stayDurationDays` must be a positive number of days, got {0}")]
    InvalidStayDuration(i64),
    #[error("field `{field}` contains a line break or control character")]
    ControlCharacter { field: &'static str },
    #[error("duplicate country, first defined by record #{first_index}")]
    DuplicateCountry { first_index: usize },
}

/// An issue located in a data file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record #{index} ({label}): {issue}")]
pub struct RecordError {
    pub index: usize,
    /// Country name, or `<unnamed>` when the record has none.
    pub label: String,
    pub issue: RecordIssue,
}

/// Why a dataset could not be built.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{file}: {} invalid record(s): {}", .errors.len(), join_errors(.errors))]
    InvalidRecords {
        file: &'static str,
        errors: Vec<RecordError>,
    },
}

impl DatasetError {
    /// Record-level issues, empty for parse failures.
    pub fn record_errors(&self) -> &[RecordError] {
        match self {
            DatasetError::Parse { .. } => &[],
            DatasetError::InvalidRecords { errors, .. } => errors,
        }
    }
}

fn join_errors(errors: &[RecordError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn record_label(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.escape_debug().to_string(),
        _ => "<unnamed>".to_string(),
    }
}

/// Collects issues for one record, then converts into `RecordError`s.
struct IssueSink {
    index: usize,
    label: String,
    issues: Vec<RecordIssue>,
}

impl IssueSink {
    fn new(index: usize, name: Option<&str>) -> Self {
        Self {
            index,
            label: record_label(name),
            issues: Vec::new(),
        }
    }

    fn push(&mut self, issue: RecordIssue) {
        self.issues.push(issue);
    }

    /// Required, non-blank, single-line text field.
    fn text(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match value {
            None => {
                self.push(RecordIssue::MissingField(field));
                None
            }
            Some(v) if v.trim().is_empty() => {
                self.push(RecordIssue::BlankField(field));
                None
            }
            Some(v) => self.single_line(field, v.trim()),
        }
    }

    /// Optional free-text field: blank counts as absent.
    fn optional_text(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let value = value?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        self.single_line(field, value)
    }

    fn single_line(&mut self, field: &'static str, value: &str) -> Option<String> {
        if value.chars().any(char::is_control) {
            self.push(RecordIssue::ControlCharacter { field });
            None
        } else {
            Some(value.to_string())
        }
    }

    fn into_errors(self) -> Vec<RecordError> {
        let IssueSink { index, label, issues } = self;
        issues
            .into_iter()
            .map(|issue| RecordError {
                index,
                label: label.clone(),
                issue,
            })
            .collect()
    }
}

/// Validate one country record.
pub fn validate_country(
    index: usize,
    raw: RawCountryRecord,
) -> Result<CountryVisaRecord, Vec<RecordError>> {
    let mut sink = IssueSink::new(index, raw.country_name.as_deref());

    let country_name = sink.text("countryName", raw.country_name);

    let visa_status = match raw.visa_status {
        None => {
            sink.push(RecordIssue::MissingField("visaStatus"));
            None
        }
        Some(code) => {
            let parsed = VisaStatus::from_code(code.trim());
            if parsed.is_none() {
                sink.push(RecordIssue::UnknownValue { field: "visaStatus", value: code });
            }
            parsed
        }
    };

    let difficulty = match raw.difficulty {
        None => {
            sink.push(RecordIssue::MissingField("difficulty"));
            None
        }
        Some(code) => {
            let parsed = Difficulty::from_code(code.trim());
            if parsed.is_none() {
                sink.push(RecordIssue::UnknownValue { field: "difficulty", value: code });
            }
            parsed
        }
    };

    let stay_duration_days = match raw.stay_duration_days {
        None => None,
        Some(days) => match u32::try_from(days) {
            Ok(d) if d > 0 => Some(d),
            _ => {
                sink.push(RecordIssue::InvalidStayDuration(days));
                None
            }
        },
    };
    if visa_status == Some(VisaStatus::VisaFree) && raw.stay_duration_days.is_none() {
        sink.push(RecordIssue::MissingStayDuration);
    }

    let mut required_documents = Documents::new();
    match raw.required_documents {
        None => sink.push(RecordIssue::MissingField("requiredDocuments")),
        Some(docs) if docs.is_empty() => sink.push(RecordIssue::EmptyDocuments),
        Some(docs) => {
            for (position, doc) in docs.into_iter().enumerate() {
                let doc = doc.trim();
                if doc.is_empty() {
                    sink.push(RecordIssue::BlankDocument { position: position + 1 });
                } else if let Some(doc) = sink.single_line("requiredDocuments", doc) {
                    required_documents.push(doc);
                }
            }
        }
    }

    let digital_nomad_visa = raw.digital_nomad_visa.and_then(|nomad| {
        sink.text("digitalNomadVisa.programName", nomad.program_name)
            .map(|program_name| DigitalNomadVisa {
                available: nomad.available,
                program_name,
            })
    });

    let continent = raw.continent.and_then(|code| {
        let parsed = Continent::from_code(code.trim());
        if parsed.is_none() {
            sink.push(RecordIssue::UnknownValue { field: "continent", value: code });
        }
        parsed
    });

    let guide_link_label = sink.optional_text("guideLinkLabel", raw.guide_link_label);
    let language = sink.optional_text("language", raw.language);
    let currency = sink.optional_text("currency", raw.currency);

    match (country_name, visa_status, difficulty) {
        (Some(country_name), Some(visa_status), Some(difficulty)) if sink.issues.is_empty() => {
            let guide_link_label = guide_link_label
                .unwrap_or_else(|| CountryVisaRecord::default_guide_label(&country_name));
            Ok(CountryVisaRecord {
                country_name,
                visa_status,
                stay_duration_days,
                difficulty,
                required_documents,
                digital_nomad_visa,
                guide_link_label,
                continent,
                language,
                currency,
            })
        }
        _ => Err(sink.into_errors()),
    }
}

/// Validate one nomad visa record.
pub fn validate_nomad_visa(
    index: usize,
    raw: RawNomadVisaRecord,
) -> Result<NomadVisaRecord, Vec<RecordError>> {
    let mut sink = IssueSink::new(index, raw.country_name.as_deref());

    let country_name = sink.text("countryName", raw.country_name);
    let visa_program_name = sink.text("visaProgramName", raw.visa_program_name);
    let stay_duration_label = sink.text("stayDurationLabel", raw.stay_duration_label);
    let minimum_income_label = sink.text("minimumIncomeLabel", raw.minimum_income_label);

    match (country_name, visa_program_name, stay_duration_label, minimum_income_label) {
        (Some(country_name), Some(visa_program_name), Some(stay_duration_label), Some(minimum_income_label)) => {
            Ok(NomadVisaRecord {
                country_name,
                visa_program_name,
                stay_duration_label,
                minimum_income_label,
            })
        }
        _ => Err(sink.into_errors()),
    }
}

/// Validate every record and check name uniqueness across the file.
///
/// Returns all records or all errors, never a partial set.
pub fn validate_all<R, T>(
    raw: Vec<R>,
    validate: impl Fn(usize, R) -> Result<T, Vec<RecordError>>,
    name_of: impl Fn(&T) -> &str,
) -> Result<Vec<T>, Vec<RecordError>> {
    let mut records = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();
    let mut first_seen: FxHashMap<String, usize> = FxHashMap::default();

    for (index, raw_record) in raw.into_iter().enumerate() {
        match validate(index, raw_record) {
            Ok(record) => {
                let name = name_of(&record).to_string();
                if let Some(&first_index) = first_seen.get(&name) {
                    errors.push(RecordError {
                        index,
                        label: name,
                        issue: RecordIssue::DuplicateCountry { first_index },
                    });
                } else {
                    first_seen.insert(name, index);
                    records.push(record);
                }
            }
            Err(mut record_errors) => errors.append(&mut record_errors),
        }
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(errors)
    }
}
