use crate::render::view_models::PageView;
use serde_json;

/// JSON formatter for the page view model
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format page as pretty-printed JSON
    pub fn format(page: &PageView) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(page)
    }

    /// Format page as compact JSON (no whitespace)
    pub fn format_compact(page: &PageView) -> Result<String, serde_json::Error> {
        serde_json::to_string(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VisaDataset;
    use crate::render::generator::PageGenerator;

    fn page() -> PageView {
        let dataset = VisaDataset::bundled().unwrap();
        PageGenerator::new().build(&dataset, None)
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&page()).unwrap();

        assert!(json.contains("\"country_name\": \"일본\""));
        assert!(json.contains("\"label\": \"무비자\""));
        assert!(json.contains("\"calculator_label\": \"노마드 계산기로 분석\""));
        assert!(json.contains("\"results\": null"));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&page()).unwrap();

        // Compact format should have no newlines (except potentially in strings)
        assert!(!json.contains("\n  "));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nomad"]["cards"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["tips"].as_array().map(Vec::len), Some(4));
    }
}
