use askama::Template;

use crate::render::view_models::{NomadVisaCardView, PageView, SearchResultsView, VisaCardView};

#[derive(Template)]
#[template(path = "partials/visa_card.html")]
pub struct VisaCardTemplate<'a> {
    pub card: &'a VisaCardView,
}

#[derive(Template)]
#[template(path = "partials/nomad_card.html")]
pub struct NomadCardTemplate<'a> {
    pub card: &'a NomadVisaCardView,
}

#[derive(Template)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate<'a> {
    pub results: &'a SearchResultsView,
}

#[derive(Template)]
#[template(path = "pages/visa_checker.html")]
pub struct PageTemplate<'a> {
    pub page: &'a PageView,
}

/// HTML formatter backed by the askama templates in `templates/`
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn render_visa_card(card: &VisaCardView) -> askama::Result<String> {
        VisaCardTemplate { card }.render()
    }

    pub fn render_nomad_card(card: &NomadVisaCardView) -> askama::Result<String> {
        NomadCardTemplate { card }.render()
    }

    /// Results fragment, as swapped in by HTMX
    pub fn render_search_results(results: &SearchResultsView) -> askama::Result<String> {
        SearchResultsTemplate { results }.render()
    }

    /// Standalone page with embedded CSS
    pub fn render_page(page: &PageView) -> askama::Result<String> {
        PageTemplate { page }.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{Continent, CountryVisaRecord, Difficulty, NomadVisaRecord, VisaStatus};
    use crate::data::VisaDataset;
    use smallvec::smallvec;

    fn unescape(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&#x2f;", "/")
            .replace("&amp;", "&")
    }

    fn attr(html: &str, name: &str) -> Option<String> {
        let marker = format!("{}=\"", name);
        let start = html.find(&marker)? + marker.len();
        let len = html[start..].find('"')?;
        Some(unescape(&html[start..start + len]))
    }

    fn documents(html: &str) -> Vec<String> {
        html.split("<li class=\"visa-card__document\">")
            .skip(1)
            .filter_map(|rest| rest.split("</li>").next())
            .map(unescape)
            .collect()
    }

    fn stay_days(html: &str) -> Option<u32> {
        let section = &html[html.find("class=\"visa-card__duration\"")?..];
        let start = section.find("<strong>")? + "<strong>".len();
        let end = section.find("일</strong>")?;
        section[start..end].parse().ok()
    }

    fn japan() -> CountryVisaRecord {
        CountryVisaRecord {
            country_name: "일본".to_string(),
            visa_status: VisaStatus::VisaFree,
            stay_duration_days: Some(90),
            difficulty: Difficulty::Easy,
            required_documents: smallvec![
                "유효한 여권".to_string(),
                "왕복 항공권".to_string(),
                "체류비 증명".to_string()
            ],
            digital_nomad_visa: None,
            guide_link_label: "일본 여행 가이드 보기".to_string(),
            continent: None,
            language: None,
            currency: None,
        }
    }

    #[test]
    fn test_render_visa_card() {
        let html = HtmlFormatter::render_visa_card(&VisaCardView::from_record(&japan())).unwrap();

        assert!(html.contains("data-country=\"일본\""));
        assert!(html.contains("무비자"));
        assert!(html.contains("90일"));
        assert!(html.contains("쉬움"));
        assert!(html.contains("badge--visa-free"));
        assert!(html.contains("href=\"/?destination=%EC%9D%BC%EB%B3%B8&visa=guide\""));
        assert_eq!(html.matches("class=\"visa-card__document\"").count(), 3);
        // No nomad panel or locale footer for this record
        assert!(!html.contains("visa-card__nomad"));
        assert!(!html.contains("visa-card__locale"));
        assert!(!html.contains("data-icon=\"globe\""));
    }

    #[test]
    fn test_rendered_card_carries_record_fields() {
        let mut extra = japan();
        extra.country_name = "A&B \"섬\"".to_string();
        extra.required_documents = smallvec!["여권/비자 <원본>".to_string(), "Tom's 초청장".to_string()];

        let dataset = VisaDataset::bundled().unwrap();
        for record in dataset.countries().iter().chain([&extra]) {
            let html = HtmlFormatter::render_visa_card(&VisaCardView::from_record(record)).unwrap();

            assert_eq!(attr(&html, "data-country").as_deref(), Some(record.country_name.as_str()));
            let status = attr(&html, "data-status").and_then(|c| VisaStatus::from_code(&c));
            assert_eq!(status, Some(record.visa_status));
            let difficulty = attr(&html, "data-difficulty").and_then(|c| Difficulty::from_code(&c));
            assert_eq!(difficulty, Some(record.difficulty));
            assert_eq!(stay_days(&html), record.stay_duration_days);
            assert_eq!(documents(&html), record.required_documents.to_vec());
        }
    }

    #[test]
    fn test_render_locale_and_continent() {
        let mut record = japan();
        record.continent = Some(Continent::Asia);
        record.language = Some("일본어".to_string());
        record.currency = Some("JPY".to_string());
        let html = HtmlFormatter::render_visa_card(&VisaCardView::from_record(&record)).unwrap();

        assert!(html.contains("<footer class=\"visa-card__locale\">언어: 일본어 · 통화: JPY</footer>"));
        assert!(html.contains("data-icon=\"globe\""));
        assert!(html.contains("아시아"));

        record.language = None;
        let html = HtmlFormatter::render_visa_card(&VisaCardView::from_record(&record)).unwrap();
        assert!(html.contains("<footer class=\"visa-card__locale\">통화: JPY</footer>"));
    }

    #[test]
    fn test_render_escapes_data() {
        let mut record = japan();
        record.country_name = "<script>".to_string();
        let html = HtmlFormatter::render_visa_card(&VisaCardView::from_record(&record)).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_nomad_card() {
        let record = NomadVisaRecord {
            country_name: "에스토니아".to_string(),
            visa_program_name: "Digital Nomad Visa".to_string(),
            stay_duration_label: "1년".to_string(),
            minimum_income_label: "$3,500/월".to_string(),
        };
        let html = HtmlFormatter::render_nomad_card(&NomadVisaCardView::from_record(&record)).unwrap();

        assert!(html.contains("data-nomad-country=\"에스토니아\""));
        assert!(html.contains("Digital Nomad Visa"));
        assert!(html.contains("체류기간"));
        assert!(html.contains("최소소득"));
        assert!(html.contains("$3,500"));
        assert!(html.contains("노마드 계산기로 분석"));
    }
}
