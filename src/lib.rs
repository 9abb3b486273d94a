//! Visa Checker Rust Implementation
//!
//! Korean-passport visa checker page: a validated catalog of destination visa
//! requirements and nomad visa programmes, rendered as HTML, Markdown or JSON.
//!
//! - `catalog/`: record types, load-time validation, destination search
//! - `data`: dataset loading from `countries.json` and `nomad_visas.json`
//! - `render/`: view models, askama templates, output formatters, generator
//! - `config`: environment configuration
//! - `api_server`: Axum server (feature `api`)

pub mod config;
pub mod catalog;
pub mod data;
pub mod render;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{
    search, Continent, CountryVisaRecord, DatasetError, Difficulty, NomadVisaRecord, SearchError,
    SearchOutcome, StayLength, TravelPurpose, VisaQuery, VisaStatus,
};
pub use config::AppConfig;
pub use data::VisaDataset;
pub use render::{HtmlFormatter, JsonFormatter, MarkdownFormatter, PageGenerator, PageView};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
