//! Page Rendering
//!
//! View models, static copy, the three output formatters and the generator
//! that ties them to a dataset.

pub mod copy;
pub mod view_models;
pub mod formatters;
pub mod generator;

pub use formatters::{HtmlFormatter, JsonFormatter, MarkdownFormatter, ParseCardError, ParsedCard};
pub use generator::{GeneratedFiles, PageGenerator};
pub use view_models::{
    Badge, IconKey, NomadVisaCardView, PageView, SearchFormView, SearchResultsView, VisaCardView,
};
