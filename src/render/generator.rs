//! Page Generator
//!
//! Assembles the visa checker page from a dataset and renders it in any of
//! the three output formats.
//!
//! Public API (consumed by api_server.rs and generate_static_page.rs):
//! - PageGenerator::new() -> Self
//! - PageGenerator::build(dataset, outcome) -> PageView
//! - PageGenerator::render_html / render_markdown / render_json
//! - PageGenerator::write_to_dir(dataset, dir) -> Result<GeneratedFiles>

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Datelike;

use crate::catalog::search::SearchOutcome;
use crate::data::VisaDataset;
use crate::render::copy;
use crate::render::formatters::{HtmlFormatter, JsonFormatter, MarkdownFormatter};
use crate::render::view_models::{
    NomadSectionView, NomadVisaCardView, PageView, SearchFormView, SearchResultsView, VisaCardView,
};

pub const HTML_FILE: &str = "index.html";
pub const MARKDOWN_FILE: &str = "visa-guide.md";
pub const JSON_FILE: &str = "visa-guide.json";

/// Paths written by [`PageGenerator::write_to_dir`].
#[derive(Debug, Clone)]
pub struct GeneratedFiles {
    pub html: PathBuf,
    pub markdown: PathBuf,
    pub json: PathBuf,
}

/// Page generator - stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageGenerator;

impl PageGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the page view. `outcome` adds the results section and pre-fills the form.
    pub fn build(&self, dataset: &VisaDataset, outcome: Option<&SearchOutcome<'_>>) -> PageView {
        let search_form = SearchFormView::new(
            dataset.as_of().map(|d| d.year()),
            outcome.map(|o| o.destination.as_str()).unwrap_or(""),
            outcome.and_then(|o| o.purpose),
            outcome.and_then(|o| o.duration),
        );

        PageView {
            title: copy::PAGE_TITLE,
            hero: &copy::HERO,
            search_form,
            results: outcome.map(SearchResultsView::from_outcome),
            popular_heading: &copy::POPULAR_HEADING,
            popular_cards: dataset.countries().iter().map(VisaCardView::from_record).collect(),
            nomad: NomadSectionView {
                heading: &copy::NOMAD_HEADING,
                cards: dataset
                    .nomad_visas()
                    .iter()
                    .map(NomadVisaCardView::from_record)
                    .collect(),
                compare_label: copy::NOMAD_COMPARE_LABEL,
                compare_href: copy::NOMAD_COMPARE_HREF,
            },
            tips_heading: &copy::TIPS_HEADING,
            tips: copy::TIPS,
            call_to_action: &copy::CALL_TO_ACTION,
        }
    }

    pub fn render_html(&self, dataset: &VisaDataset, outcome: Option<&SearchOutcome<'_>>) -> Result<String> {
        let page = self.build(dataset, outcome);
        HtmlFormatter::render_page(&page).context("Failed to render visa checker page")
    }

    pub fn render_markdown(&self, dataset: &VisaDataset, outcome: Option<&SearchOutcome<'_>>) -> String {
        MarkdownFormatter::format_page(&self.build(dataset, outcome))
    }

    pub fn render_json(&self, dataset: &VisaDataset, outcome: Option<&SearchOutcome<'_>>) -> Result<String> {
        let page = self.build(dataset, outcome);
        JsonFormatter::format(&page).context("Failed to serialize visa checker page")
    }

    /// Write the unsearched page as HTML, Markdown and JSON into `dir`.
    pub fn write_to_dir(&self, dataset: &VisaDataset, dir: impl AsRef<Path>) -> Result<GeneratedFiles> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        let files = GeneratedFiles {
            html: dir.join(HTML_FILE),
            markdown: dir.join(MARKDOWN_FILE),
            json: dir.join(JSON_FILE),
        };

        write_file(&files.html, &self.render_html(dataset, None)?)?;
        write_file(&files.markdown, &self.render_markdown(dataset, None))?;
        write_file(&files.json, &self.render_json(dataset, None)?)?;

        tracing::info!(
            "Wrote {} country cards and {} nomad cards to {}",
            dataset.countries().len(),
            dataset.nomad_visas().len(),
            dir.display()
        );

        Ok(files)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::search::{search, TravelPurpose, VisaQuery};

    #[test]
    fn test_build_keeps_dataset_order() {
        let dataset = VisaDataset::bundled().unwrap();
        let page = PageGenerator::new().build(&dataset, None);

        let names: Vec<_> = page.popular_cards.iter().map(|c| c.country_name.as_str()).collect();
        let expected: Vec<_> = dataset.countries().iter().map(|r| r.country_name.as_str()).collect();
        assert_eq!(names, expected);
        assert_eq!(page.nomad.cards[0].country_name, "에스토니아");
        assert!(page.results.is_none());
        assert_eq!(page.search_form.as_of_label.as_deref(), Some("2025년 최신 정보 기준"));
    }

    #[test]
    fn test_build_with_outcome_prefills_form() {
        let dataset = VisaDataset::bundled().unwrap();
        let query = VisaQuery::destination("포르투갈").with_purpose(TravelPurpose::DigitalNomad);
        let outcome = search(&dataset, &query).unwrap();
        let page = PageGenerator::new().build(&dataset, Some(&outcome));

        assert_eq!(page.search_form.destination, "포르투갈");
        let results = page.results.unwrap();
        assert_eq!(results.cards.len(), 1);
        assert!(results.nomad_notice.is_some());
    }

    #[test]
    fn test_write_to_dir() {
        let dataset = VisaDataset::bundled().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let files = PageGenerator::new().write_to_dir(&dataset, dir.path().join("dist")).unwrap();

        let html = std::fs::read_to_string(&files.html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        let md = std::fs::read_to_string(&files.markdown).unwrap();
        assert!(md.starts_with("---\n"));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&files.json).unwrap()).unwrap();
        assert!(json["popular_cards"].is_array());
    }
}
