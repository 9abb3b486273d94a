//! Visa Catalog
//!
//! Record types for the destination and nomad-visa datasets, their load-time
//! validation, and the destination search used by the checker form.

pub mod types;
pub mod validation;
pub mod search;

pub use types::{
    Continent, CountryVisaRecord, DigitalNomadVisa, Difficulty, Documents, NomadVisaRecord,
    VisaStatus,
};
pub use validation::{DatasetError, RecordError, RecordIssue};
pub use search::{search, SearchError, SearchHit, SearchOutcome, StayLength, TravelPurpose, VisaQuery};
