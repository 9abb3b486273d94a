//! View Models for the visa checker page
//!
//! Flat, display-ready structures built from catalog records. Templates and
//! the JSON export both consume these; nothing here looks at raw data.

use serde::Serialize;

use crate::catalog::search::{SearchOutcome, StayLength, TravelPurpose};
use crate::catalog::types::{CountryVisaRecord, Difficulty, NomadVisaRecord, VisaStatus};
use crate::render::copy::{self, CallToActionCopy, HeroCopy, NoticeCopy, SearchFormCopy, SectionHeading, TipGroup};

/// Icon asset keys resolved by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    CheckCircle,
    FileText,
    Gauge,
    AlertTriangle,
    Laptop,
    Globe,
}

impl IconKey {
    pub fn name(&self) -> &'static str {
        match self {
            IconKey::CheckCircle => "check-circle",
            IconKey::FileText => "file-text",
            IconKey::Gauge => "gauge",
            IconKey::AlertTriangle => "alert-triangle",
            IconKey::Laptop => "laptop",
            IconKey::Globe => "globe",
        }
    }

    pub fn svg_path(&self) -> &'static str {
        match self {
            IconKey::CheckCircle => r#"<path d="M22 11.08V12a10 10 0 1 1-5.93-9.14"/><path d="m9 11 3 3L22 4"/>"#,
            IconKey::FileText => r#"<path d="M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z"/><path d="M14 2v4a2 2 0 0 0 2 2h4"/><path d="M10 9H8"/><path d="M16 13H8"/><path d="M16 17H8"/>"#,
            IconKey::Gauge => r#"<path d="m12 14 4-4"/><path d="M3.34 19a10 10 0 1 1 17.32 0"/>"#,
            IconKey::AlertTriangle => r#"<path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3"/><path d="M12 9v4"/><path d="M12 17h.01"/>"#,
            IconKey::Laptop => r#"<path d="M20 16V7a2 2 0 0 0-2-2H6a2 2 0 0 0-2 2v9m16 0H4m16 0 1.28 2.55a1 1 0 0 1-.9 1.45H3.62a1 1 0 0 1-.9-1.45L4 16"/>"#,
            IconKey::Globe => r#"<circle cx="12" cy="12" r="10"/><path d="M12 2a14.5 14.5 0 0 0 0 20 14.5 14.5 0 0 0 0-20"/><path d="M2 12h20"/>"#,
        }
    }
}

/// Status or difficulty badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub code: &'static str,
    pub label: &'static str,
    pub css_class: &'static str,
    pub icon: IconKey,
}

impl Badge {
    pub fn for_status(status: VisaStatus) -> Self {
        let (css_class, icon) = match status {
            VisaStatus::VisaFree => ("badge badge--visa-free", IconKey::CheckCircle),
            VisaStatus::VisaRequired => ("badge badge--visa-required", IconKey::FileText),
        };
        Self {
            code: status.code(),
            label: status.label(),
            css_class,
            icon,
        }
    }

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (css_class, icon) = match difficulty {
            Difficulty::Easy => ("badge badge--easy", IconKey::Gauge),
            Difficulty::Moderate => ("badge badge--moderate", IconKey::Gauge),
            Difficulty::Hard => ("badge badge--hard", IconKey::AlertTriangle),
        };
        Self {
            code: difficulty.code(),
            label: difficulty.label(),
            css_class,
            icon,
        }
    }
}

/// Card footer; present when the record has a language or a currency.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleLine {
    pub language: Option<String>,
    pub currency: Option<String>,
}

impl LocaleLine {
    /// Labelled entries in display order, e.g. `("언어", "일본어")`.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            (copy::LANGUAGE_LABEL, self.language.as_deref()),
            (copy::CURRENCY_LABEL, self.currency.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}

// ============================================================================
// Cards
// ============================================================================

/// One destination card.
#[derive(Debug, Clone, Serialize)]
pub struct VisaCardView {
    pub country_name: String,
    pub status: Badge,
    /// "90일"; absent when the record has no stay duration
    pub stay_duration: Option<String>,
    pub difficulty: Badge,
    pub required_documents: Vec<String>,
    /// Programme name when a nomad visa is available
    pub nomad_program: Option<String>,
    pub guide_link_label: String,
    pub guide_href: String,
    pub continent: Option<&'static str>,
    pub continent_icon: IconKey,
    pub locale: Option<LocaleLine>,
    /// Set on search hits whose visa-free stay is shorter than requested
    pub stay_warning: Option<&'static str>,
    pub documents_heading: &'static str,
    pub nomad_heading: &'static str,
    pub nomad_icon: IconKey,
}

impl VisaCardView {
    pub fn from_record(record: &CountryVisaRecord) -> Self {
        let locale = (record.language.is_some() || record.currency.is_some()).then(|| LocaleLine {
            language: record.language.clone(),
            currency: record.currency.clone(),
        });

        Self {
            country_name: record.country_name.clone(),
            status: Badge::for_status(record.visa_status),
            stay_duration: record.stay_duration_days.map(format_days),
            difficulty: Badge::for_difficulty(record.difficulty),
            required_documents: record.required_documents.iter().cloned().collect(),
            nomad_program: record.nomad_program().map(str::to_string),
            guide_link_label: record.guide_link_label.clone(),
            guide_href: guide_href(&record.country_name),
            continent: record.continent.map(|c| c.label()),
            continent_icon: IconKey::Globe,
            locale,
            stay_warning: None,
            documents_heading: copy::DOCUMENTS_HEADING,
            nomad_heading: copy::NOMAD_PANEL_HEADING,
            nomad_icon: IconKey::Laptop,
        }
    }

    pub fn with_stay_warning(mut self, exceeds: bool) -> Self {
        self.stay_warning = exceeds.then_some(copy::STAY_WARNING);
        self
    }
}

/// One row of the nomad visa comparison.
#[derive(Debug, Clone, Serialize)]
pub struct NomadVisaCardView {
    pub country_name: String,
    pub program_name: String,
    pub stay_duration_label: String,
    pub minimum_income_label: String,
    pub calculator_label: &'static str,
    pub calculator_href: String,
}

impl NomadVisaCardView {
    pub fn from_record(record: &NomadVisaRecord) -> Self {
        Self {
            country_name: record.country_name.clone(),
            program_name: record.visa_program_name.clone(),
            stay_duration_label: record.stay_duration_label.clone(),
            minimum_income_label: record.minimum_income_label.clone(),
            calculator_label: copy::NOMAD_CALCULATOR_LABEL,
            calculator_href: calculator_href(&record.country_name),
        }
    }
}

pub fn format_days(days: u32) -> String {
    format!("{}일", days)
}

pub fn guide_href(country_name: &str) -> String {
    format!("/?destination={}&visa=guide", urlencoding::encode(country_name))
}

pub fn calculator_href(country_name: &str) -> String {
    format!("/nomad-calculator?country={}", urlencoding::encode(country_name))
}

// ============================================================================
// Search form and results
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchFormView {
    pub copy: &'static SearchFormCopy,
    /// "2025년 최신 정보 기준"
    pub as_of_label: Option<String>,
    pub notice_icon: IconKey,
    pub destination: String,
    pub purposes: Vec<SelectOption>,
    pub durations: Vec<SelectOption>,
}

impl SearchFormView {
    pub fn new(
        as_of_year: Option<i32>,
        destination: &str,
        purpose: Option<TravelPurpose>,
        duration: Option<StayLength>,
    ) -> Self {
        let purpose = purpose.unwrap_or(TravelPurpose::Tourism);
        let duration = duration.unwrap_or(StayLength::WithinWeek);

        Self {
            copy: &copy::SEARCH_FORM,
            as_of_label: as_of_year.map(|year| format!("{}년 최신 정보 기준", year)),
            notice_icon: IconKey::AlertTriangle,
            destination: destination.to_string(),
            purposes: TravelPurpose::ALL
                .into_iter()
                .map(|p| SelectOption {
                    value: p.slug(),
                    label: p.label(),
                    selected: p == purpose,
                })
                .collect(),
            durations: StayLength::ALL
                .into_iter()
                .map(|d| SelectOption {
                    value: d.slug(),
                    label: d.label(),
                    selected: d == duration,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResultsView {
    pub destination: String,
    pub cards: Vec<VisaCardView>,
    pub no_results_title: &'static str,
    pub no_results_hint: &'static str,
    pub nomad_notice: Option<&'static NoticeCopy>,
}

impl SearchResultsView {
    pub fn from_outcome(outcome: &SearchOutcome<'_>) -> Self {
        Self {
            destination: outcome.destination.clone(),
            cards: outcome
                .hits
                .iter()
                .map(|hit| VisaCardView::from_record(hit.record).with_stay_warning(hit.exceeds_visa_free_stay))
                .collect(),
            no_results_title: copy::NO_RESULTS_TITLE,
            no_results_hint: copy::NO_RESULTS_HINT,
            nomad_notice: outcome.shows_nomad_notice().then_some(&copy::NOMAD_NOTICE),
        }
    }
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NomadSectionView {
    pub heading: &'static SectionHeading,
    pub cards: Vec<NomadVisaCardView>,
    pub compare_label: &'static str,
    pub compare_href: &'static str,
}

/// Whole page, in render order.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: &'static str,
    pub hero: &'static HeroCopy,
    pub search_form: SearchFormView,
    pub results: Option<SearchResultsView>,
    pub popular_heading: &'static SectionHeading,
    pub popular_cards: Vec<VisaCardView>,
    pub nomad: NomadSectionView,
    pub tips_heading: &'static SectionHeading,
    pub tips: &'static [TipGroup],
    pub call_to_action: &'static CallToActionCopy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::DigitalNomadVisa;
    use smallvec::smallvec;

    fn thailand() -> CountryVisaRecord {
        CountryVisaRecord {
            country_name: "태국".to_string(),
            visa_status: VisaStatus::VisaFree,
            stay_duration_days: Some(30),
            difficulty: Difficulty::Easy,
            required_documents: smallvec!["유효한 여권 (6개월 이상)".to_string(), "출국 티켓 증명".to_string()],
            digital_nomad_visa: Some(DigitalNomadVisa {
                available: true,
                program_name: "LTR 비자".to_string(),
            }),
            guide_link_label: "태국 여행 가이드 보기".to_string(),
            continent: Some(crate::catalog::types::Continent::Asia),
            language: Some("태국어".to_string()),
            currency: Some("THB".to_string()),
        }
    }

    #[test]
    fn test_locale_line_with_one_value() {
        let mut record = thailand();
        record.language = None;
        let view = VisaCardView::from_record(&record);
        assert_eq!(view.locale.as_ref().map(LocaleLine::entries), Some(vec![("통화", "THB")]));

        record.currency = None;
        assert!(VisaCardView::from_record(&record).locale.is_none());
    }

    #[test]
    fn test_badges_are_deterministic() {
        assert_eq!(Badge::for_status(VisaStatus::VisaFree).label, "무비자");
        assert_eq!(Badge::for_status(VisaStatus::VisaRequired).label, "비자 필요");
        assert_eq!(Badge::for_difficulty(Difficulty::Moderate).label, "보통");
        assert_eq!(Badge::for_difficulty(Difficulty::Hard).icon, IconKey::AlertTriangle);
        assert_ne!(
            Badge::for_difficulty(Difficulty::Easy).css_class,
            Badge::for_difficulty(Difficulty::Hard).css_class
        );
    }

    #[test]
    fn test_card_view_from_record() {
        let view = VisaCardView::from_record(&thailand());
        assert_eq!(view.stay_duration.as_deref(), Some("30일"));
        assert_eq!(view.nomad_program.as_deref(), Some("LTR 비자"));
        assert_eq!(view.continent, Some("아시아"));
        assert_eq!(
            view.locale.as_ref().map(LocaleLine::entries),
            Some(vec![("언어", "태국어"), ("통화", "THB")])
        );
        assert_eq!(view.guide_href, "/?destination=%ED%83%9C%EA%B5%AD&visa=guide");
        assert!(view.stay_warning.is_none());
        assert!(view.with_stay_warning(true).stay_warning.is_some());
    }

    #[test]
    fn test_calculator_href_encodes_country() {
        assert_eq!(calculator_href("멕시코"), "/nomad-calculator?country=%EB%A9%95%EC%8B%9C%EC%BD%94");
    }

    #[test]
    fn test_search_form_selection() {
        let form = SearchFormView::new(Some(2025), "태국", Some(TravelPurpose::DigitalNomad), None);
        assert_eq!(form.as_of_label.as_deref(), Some("2025년 최신 정보 기준"));
        let selected: Vec<_> = form.purposes.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, vec!["digital_nomad"]);
        assert!(form.durations[0].selected);
    }

    #[test]
    fn test_icon_names_match_serde() {
        let json = serde_json::to_string(&IconKey::AlertTriangle).unwrap();
        assert_eq!(json, format!("\"{}\"", IconKey::AlertTriangle.name()));
    }
}
