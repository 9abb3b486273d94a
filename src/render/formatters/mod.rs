pub mod markdown;
pub mod json;
pub mod html;

pub use markdown::{MarkdownFormatter, ParseCardError, ParsedCard};
pub use json::JsonFormatter;
pub use html::HtmlFormatter;
