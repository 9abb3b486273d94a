//! Generate Static Visa Checker Page
//!
//! Renders the page from the catalog in DATA_DIR and writes index.html,
//! visa-guide.md and visa-guide.json into OUTPUT_DIR (or the first argument).
//! Run with: cargo run --bin generate_static_page [output_dir]

use anyhow::Context;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visa_checker_rust::{AppConfig, PageGenerator, VisaDataset};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "visa_checker_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = AppConfig::from_env();
    if let Some(dir) = std::env::args().nth(1) {
        config.output_dir = PathBuf::from(dir);
    }
    config.log();

    let dataset = VisaDataset::load(&config.data_dir)
        .with_context(|| format!("Cannot generate page from {}", config.data_dir.display()))?;

    println!("Generating visa checker page...\n");
    let files = PageGenerator::new().write_to_dir(&dataset, &config.output_dir)?;

    println!("  Saved: {}", files.html.display());
    println!("  Saved: {}", files.markdown.display());
    println!("  Saved: {}", files.json.display());
    println!(
        "\nDone: {} destinations, {} nomad visas",
        dataset.countries().len(),
        dataset.nomad_visas().len()
    );

    Ok(())
}
