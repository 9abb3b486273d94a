use chrono::Utc;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use thiserror::Error;

use crate::catalog::types::{Difficulty, VisaStatus};
use crate::render::view_models::{NomadVisaCardView, PageView, SearchResultsView, VisaCardView};

const STATUS_KEY: &str = "비자";
const DURATION_KEY: &str = "체류 기간";
const DIFFICULTY_KEY: &str = "난이도";
const NOMAD_KEY: &str = "디지털노마드";
const CONTINENT_KEY: &str = "대륙";

/// Characters that carry inline meaning in CommonMark
const MARKDOWN_SPECIAL: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '#', '|', '&', '!'];

/// Markdown formatter for the visa checker page
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format one destination card as a level-3 section
    pub fn format_card(card: &VisaCardView) -> String {
        let mut md = String::with_capacity(512);
        Self::write_card(&mut md, card);
        md
    }

    pub fn format_nomad_card(card: &NomadVisaCardView) -> String {
        let mut md = String::with_capacity(256);
        Self::write_nomad_card(&mut md, card);
        md
    }

    /// Format the whole page with YAML frontmatter
    pub fn format_page(page: &PageView) -> String {
        let mut md = String::with_capacity(16 * 1024);

        // Frontmatter
        md.push_str("---\n");
        md.push_str(&format!("title: \"{}\"\n", page.title.replace('"', "\\\"")));
        md.push_str(&format!("generated: {}\n", Utc::now().to_rfc3339()));
        if let Some(as_of) = &page.search_form.as_of_label {
            md.push_str(&format!("as_of: \"{}\"\n", as_of));
        }
        md.push_str(&format!("countries: {}\n", page.popular_cards.len()));
        md.push_str(&format!("nomad_visas: {}\n", page.nomad.cards.len()));
        md.push_str("---\n\n");

        // Hero
        md.push_str(&format!("# {}\n\n", escape_inline(page.hero.title)));
        md.push_str(&format!("> {}\n\n", escape_inline(page.hero.subtitle)));
        md.push_str(&format!("{}\n\n", escape_inline(page.hero.body)));
        md.push_str(&format!("*{}*\n\n", escape_inline(page.search_form.copy.notice)));

        if let Some(results) = &page.results {
            Self::write_results(&mut md, results);
        }

        // Popular destinations
        md.push_str(&format!(
            "## {} {}\n\n",
            page.popular_heading.lead, page.popular_heading.strong
        ));
        for card in &page.popular_cards {
            Self::write_card(&mut md, card);
        }

        // Nomad visas
        md.push_str(&format!(
            "## {} {}\n\n",
            page.nomad.heading.lead, page.nomad.heading.strong
        ));
        if let Some(subtitle) = page.nomad.heading.subtitle {
            md.push_str(&format!("{}\n\n", escape_inline(subtitle)));
        }
        for card in &page.nomad.cards {
            Self::write_nomad_card(&mut md, card);
        }
        md.push_str(&format!(
            "[{}]({})\n\n",
            escape_inline(page.nomad.compare_label),
            page.nomad.compare_href
        ));

        // Tips
        md.push_str(&format!(
            "## {} {}\n\n",
            page.tips_heading.lead, page.tips_heading.strong
        ));
        for group in page.tips {
            md.push_str(&format!("### {}\n\n", escape_inline(group.title)));
            for item in group.items {
                md.push_str(&format!("- {}\n", escape_item(item)));
            }
            md.push('\n');
        }

        // Call to action
        let cta = page.call_to_action;
        md.push_str(&format!(
            "## {} {}\n\n",
            escape_inline(cta.lead),
            escape_inline(cta.strong)
        ));
        md.push_str(&format!("{}\n\n", escape_inline(cta.body)));
        for feature in cta.features {
            md.push_str(&format!(
                "- **{}**: {}\n",
                escape_inline(feature.title),
                escape_inline(feature.body)
            ));
        }
        md.push('\n');
        md.push_str(&format!(
            "[{}]({})\n",
            escape_inline(cta.button_label),
            cta.button_href
        ));

        md
    }

    fn write_results(md: &mut String, results: &SearchResultsView) {
        md.push_str(&format!(
            "## 검색 결과: {}\n\n",
            escape_inline(&results.destination)
        ));
        if results.cards.is_empty() {
            md.push_str(&format!(
                "**{}**\n\n{}\n\n",
                results.no_results_title, results.no_results_hint
            ));
        }
        for card in &results.cards {
            Self::write_card(md, card);
        }
        if let Some(notice) = results.nomad_notice {
            md.push_str(&format!("> **{}**\n>\n> {}\n>\n", notice.title, notice.body));
            for item in notice.items {
                md.push_str(&format!("> - {}\n", escape_item(item)));
            }
            md.push('\n');
        }
    }

    fn write_card(md: &mut String, card: &VisaCardView) {
        md.push_str(&format!("### {}\n\n", escape_inline(&card.country_name)));

        md.push_str(&format!("- **{}**: {}\n", STATUS_KEY, card.status.label));
        if let Some(duration) = &card.stay_duration {
            md.push_str(&format!("- **{}**: {}\n", DURATION_KEY, duration));
        }
        md.push_str(&format!("- **{}**: {}\n", DIFFICULTY_KEY, card.difficulty.label));
        if let Some(program) = &card.nomad_program {
            md.push_str(&format!("- **{}**: {}\n", NOMAD_KEY, escape_inline(program)));
        }
        if let Some(continent) = card.continent {
            md.push_str(&format!("- **{}**: {}\n", CONTINENT_KEY, continent));
        }
        if let Some(locale) = &card.locale {
            for (label, value) in locale.entries() {
                md.push_str(&format!("- **{}**: {}\n", label, escape_inline(value)));
            }
        }
        md.push('\n');

        if let Some(warning) = card.stay_warning {
            md.push_str(&format!("> {}\n\n", warning));
        }

        md.push_str(&format!("**{}**\n\n", card.documents_heading));
        for (i, document) in card.required_documents.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, escape_item(document)));
        }
        md.push('\n');

        md.push_str(&format!(
            "[{}]({})\n\n",
            escape_inline(&card.guide_link_label),
            card.guide_href
        ));
    }

    fn write_nomad_card(md: &mut String, card: &NomadVisaCardView) {
        md.push_str(&format!("### {}\n\n", escape_inline(&card.country_name)));
        md.push_str(&format!("- **프로그램**: {}\n", escape_inline(&card.program_name)));
        md.push_str(&format!("- **체류기간**: {}\n", escape_inline(&card.stay_duration_label)));
        md.push_str(&format!("- **최소소득**: {}\n\n", escape_inline(&card.minimum_income_label)));
        md.push_str(&format!(
            "[{}]({})\n\n",
            escape_inline(card.calculator_label),
            card.calculator_href
        ));
    }

    /// Read a card produced by [`MarkdownFormatter::format_card`] back into its record fields.
    ///
    /// Only the first level-3 heading and the lists that follow it are read.
    pub fn parse_card(markdown: &str) -> Result<ParsedCard, ParseCardError> {
        let mut heading: Option<String> = None;
        let mut facts: Vec<(String, String)> = Vec::new();
        let mut documents: Vec<String> = Vec::new();

        let mut in_heading = false;
        let mut list_stack: Vec<bool> = Vec::new(); // true = ordered
        let mut item_text: Option<String> = None;

        for event in Parser::new(markdown) {
            match event {
                Event::Start(Tag::Heading { level: HeadingLevel::H3, .. }) => {
                    if heading.is_some() {
                        break;
                    }
                    in_heading = true;
                    heading = Some(String::new());
                }
                Event::End(TagEnd::Heading(HeadingLevel::H3)) => in_heading = false,
                Event::Start(Tag::List(start)) => list_stack.push(start.is_some()),
                Event::End(TagEnd::List(_)) => {
                    list_stack.pop();
                }
                Event::Start(Tag::Item) => item_text = Some(String::new()),
                Event::End(TagEnd::Item) => {
                    if let Some(text) = item_text.take() {
                        match list_stack.last() {
                            Some(true) => documents.push(text),
                            Some(false) => {
                                if let Some((key, value)) = text.split_once(": ") {
                                    facts.push((key.to_string(), value.to_string()));
                                }
                            }
                            None => {}
                        }
                    }
                }
                Event::Text(text) | Event::Code(text) => {
                    if in_heading {
                        if let Some(h) = heading.as_mut() {
                            h.push_str(&text);
                        }
                    } else if let Some(item) = item_text.as_mut() {
                        item.push_str(&text);
                    }
                }
                _ => {}
            }
        }

        let country_name = heading
            .filter(|h| !h.is_empty())
            .ok_or(ParseCardError::MissingHeading)?;
        let fact = |key: &str| facts.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());

        let status_label = fact(STATUS_KEY).ok_or(ParseCardError::MissingField(STATUS_KEY))?;
        let visa_status = VisaStatus::from_label(status_label).ok_or_else(|| {
            ParseCardError::UnknownLabel {
                field: STATUS_KEY,
                value: status_label.to_string(),
            }
        })?;

        let difficulty_label =
            fact(DIFFICULTY_KEY).ok_or(ParseCardError::MissingField(DIFFICULTY_KEY))?;
        let difficulty = Difficulty::from_label(difficulty_label).ok_or_else(|| {
            ParseCardError::UnknownLabel {
                field: DIFFICULTY_KEY,
                value: difficulty_label.to_string(),
            }
        })?;

        let stay_duration_days = match fact(DURATION_KEY) {
            Some(value) => Some(
                value
                    .strip_suffix('일')
                    .and_then(|days| days.parse::<u32>().ok())
                    .ok_or_else(|| ParseCardError::InvalidDuration(value.to_string()))?,
            ),
            None => None,
        };

        Ok(ParsedCard {
            country_name,
            visa_status,
            stay_duration_days,
            difficulty,
            required_documents: documents,
            nomad_program: fact(NOMAD_KEY).map(str::to_string),
        })
    }
}

/// Record fields recovered from a Markdown card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCard {
    pub country_name: String,
    pub visa_status: VisaStatus,
    pub stay_duration_days: Option<u32>,
    pub difficulty: Difficulty,
    pub required_documents: Vec<String>,
    pub nomad_program: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("card has no level-3 heading")]
    MissingHeading,
    #[error("card is missing '{0}'")]
    MissingField(&'static str),
    #[error("unknown {field} label '{value}'")]
    UnknownLabel { field: &'static str, value: String },
    #[error("invalid stay duration '{0}'")]
    InvalidDuration(String),
}

/// Backslash-escape every CommonMark inline metacharacter.
fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if MARKDOWN_SPECIAL.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Like [`escape_inline`], plus list markers at the start of a list item.
fn escape_item(text: &str) -> String {
    let escaped = escape_inline(text);
    let digits = escaped.chars().take_while(|c| c.is_ascii_digit()).count();
    let rest = &escaped[digits..];

    if digits > 0 && (rest.starts_with('.') || rest.starts_with(')')) {
        format!("{}\\{}", &escaped[..digits], rest)
    } else if escaped.starts_with(['-', '+', '=']) {
        format!("\\{}", escaped)
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{CountryVisaRecord, DigitalNomadVisa, NomadVisaRecord};
    use crate::catalog::validation::{validate_country, RawCountryRecord, RecordIssue};
    use proptest::prelude::*;

    fn record(
        name: &str,
        status: VisaStatus,
        days: Option<u32>,
        difficulty: Difficulty,
        documents: &[&str],
    ) -> CountryVisaRecord {
        CountryVisaRecord {
            country_name: name.to_string(),
            visa_status: status,
            stay_duration_days: days,
            difficulty,
            required_documents: documents.iter().map(|d| d.to_string()).collect(),
            digital_nomad_visa: None,
            guide_link_label: CountryVisaRecord::default_guide_label(name),
            continent: None,
            language: None,
            currency: None,
        }
    }

    #[test]
    fn test_format_card() {
        let japan = record(
            "일본",
            VisaStatus::VisaFree,
            Some(90),
            Difficulty::Easy,
            &["유효한 여권", "왕복 항공권", "체류비 증명"],
        );
        let md = MarkdownFormatter::format_card(&VisaCardView::from_record(&japan));

        assert!(md.starts_with("### 일본\n"));
        assert!(md.contains("- **비자**: 무비자"));
        assert!(md.contains("- **체류 기간**: 90일"));
        assert!(md.contains("- **난이도**: 쉬움"));
        assert!(md.contains("1. 유효한 여권\n2. 왕복 항공권\n3. 체류비 증명"));
        assert!(md.contains("[일본 여행 가이드 보기](/?destination=%EC%9D%BC%EB%B3%B8&visa=guide)"));
    }

    #[test]
    fn test_visa_required_card_has_no_duration() {
        let china = record(
            "중국",
            VisaStatus::VisaRequired,
            None,
            Difficulty::Hard,
            &["관광비자 필요", "초청장", "호텔 예약", "왕복 항공권"],
        );
        let md = MarkdownFormatter::format_card(&VisaCardView::from_record(&china));
        assert!(md.contains("비자 필요"));
        assert!(!md.contains(DURATION_KEY));

        let parsed = MarkdownFormatter::parse_card(&md).unwrap();
        assert_eq!(parsed.stay_duration_days, None);
        assert_eq!(parsed.difficulty, Difficulty::Hard);
        assert_eq!(parsed.required_documents.len(), 4);
    }

    #[test]
    fn test_parse_card_with_nomad_program() {
        let mut thailand = record(
            "태국",
            VisaStatus::VisaFree,
            Some(30),
            Difficulty::Easy,
            &["유효한 여권 (6개월 이상)"],
        );
        thailand.digital_nomad_visa = Some(DigitalNomadVisa {
            available: true,
            program_name: "LTR 비자".to_string(),
        });
        let md = MarkdownFormatter::format_card(&VisaCardView::from_record(&thailand));
        let parsed = MarkdownFormatter::parse_card(&md).unwrap();
        assert_eq!(parsed.nomad_program.as_deref(), Some("LTR 비자"));
        assert_eq!(parsed.required_documents, vec!["유효한 여권 (6개월 이상)"]);
    }

    #[test]
    fn test_parse_card_errors() {
        assert_eq!(
            MarkdownFormatter::parse_card("no heading here").unwrap_err(),
            ParseCardError::MissingHeading
        );
        assert_eq!(
            MarkdownFormatter::parse_card("### 일본\n\n- **난이도**: 쉬움\n").unwrap_err(),
            ParseCardError::MissingField(STATUS_KEY)
        );
        assert!(matches!(
            MarkdownFormatter::parse_card("### 일본\n\n- **비자**: 무비자\n- **체류 기간**: 석달\n- **난이도**: 쉬움\n")
                .unwrap_err(),
            ParseCardError::InvalidDuration(_)
        ));
    }

    #[test]
    fn test_escape_item_list_markers() {
        assert_eq!(escape_item("1. 항목"), "1\\. 항목");
        assert_eq!(escape_item("- 항목"), "\\- 항목");
        assert_eq!(escape_item("*강조*"), "\\*강조\\*");
        assert_eq!(escape_item("여권"), "여권");
    }

    #[test]
    fn test_format_nomad_card() {
        let estonia = NomadVisaRecord {
            country_name: "에스토니아".to_string(),
            visa_program_name: "Digital Nomad Visa".to_string(),
            stay_duration_label: "1년".to_string(),
            minimum_income_label: "$3,500/월".to_string(),
        };
        let md = MarkdownFormatter::format_nomad_card(&NomadVisaCardView::from_record(&estonia));
        assert!(md.contains("### 에스토니아"));
        assert!(md.contains("- **최소소득**: $3,500/월"));
        assert!(md.contains("(/nomad-calculator?country=%EC%97%90%EC%8A%A4%ED%86%A0%EB%8B%88%EC%95%84)"));
    }

    // Line breaks are allowed here so loading has to reject them
    fn text_strategy() -> impl Strategy<Value = String> {
        "[가-힣A-Za-z][가-힣A-Za-z0-9 (),.*_#\\r\\n-]{0,18}[가-힣A-Za-z0-9)]"
    }

    fn status_strategy() -> impl Strategy<Value = VisaStatus> {
        prop_oneof![Just(VisaStatus::VisaFree), Just(VisaStatus::VisaRequired)]
    }

    fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
        prop_oneof![
            Just(Difficulty::Easy),
            Just(Difficulty::Moderate),
            Just(Difficulty::Hard)
        ]
    }

    proptest! {
        #[test]
        fn prop_card_round_trip(
            name in text_strategy(),
            status in status_strategy(),
            days in proptest::option::of(1u32..400),
            difficulty in difficulty_strategy(),
            documents in proptest::collection::vec(text_strategy(), 1..6),
        ) {
            let days = match status {
                VisaStatus::VisaFree => Some(days.unwrap_or(30)),
                VisaStatus::VisaRequired => days,
            };
            let raw = RawCountryRecord {
                country_name: Some(name.clone()),
                visa_status: Some(status.code().to_string()),
                stay_duration_days: days.map(i64::from),
                difficulty: Some(difficulty.code().to_string()),
                required_documents: Some(documents.clone()),
                ..RawCountryRecord::default()
            };
            let has_line_break = std::iter::once(&name)
                .chain(documents.iter())
                .any(|text| text.chars().any(char::is_control));

            let original = match validate_country(0, raw) {
                Ok(record) => record,
                Err(errors) => {
                    prop_assert!(has_line_break);
                    let all_control = errors
                        .iter()
                        .all(|e| matches!(e.issue, RecordIssue::ControlCharacter { .. }));
                    prop_assert!(all_control);
                    return Ok(());
                }
            };
            prop_assert!(!has_line_break);

            let md = MarkdownFormatter::format_card(&VisaCardView::from_record(&original));
            let parsed = MarkdownFormatter::parse_card(&md).unwrap();

            prop_assert_eq!(parsed.country_name, original.country_name);
            prop_assert_eq!(parsed.visa_status, original.visa_status);
            prop_assert_eq!(parsed.stay_duration_days, original.stay_duration_days);
            prop_assert_eq!(parsed.difficulty, original.difficulty);
            prop_assert_eq!(parsed.required_documents, documents);
        }
    }
}
