//! Operator actions shared by the one-shot commands and the interactive session

use anyhow::Result;
use balance_core::render::ColumnHeaders;
use balance_core::{CurrencyFormat, ReportView, normalize};
use chrono::Local;
use std::path::Path;
use tracing::warn;

use crate::config::Config;
use crate::export;
use crate::sinks::BrowserSink;
use crate::source::LoadError;

/// Fetch, normalize and swap a fresh collection into `view`.
///
/// The view only changes after the whole list is fetched and normalized; on
/// error it keeps its previous state. Returns the number of loaded records.
pub async fn load_into(view: &mut ReportView, config: &Config) -> Result<usize, LoadError> {
    let raw = config.source.fetch().await?;
    let records = normalize(raw, &config.directory, &config.fields);
    let count = records.len();
    view.load(records);
    Ok(count)
}

/// Load, reporting failure to the operator instead of propagating it
pub async fn load_or_report(view: &mut ReportView, config: &Config) -> bool {
    println!("Loading clients from {}...", config.source.describe());
    match load_into(view, config).await {
        Ok(count) => {
            println!("  Loaded {} client(s)", count);
            true
        }
        Err(e) => {
            warn!(error = %e, "client list load failed");
            eprintln!("  ⚠️  Could not load clients: {}", e);
            if view.is_loaded() {
                eprintln!("  ⚠️  Keeping the previously loaded list");
            }
            false
        }
    }
}

/// Caption line for the printed report: when, how many, how much
pub fn report_caption(view: &ReportView, currency: &CurrencyFormat) -> String {
    format!(
        "{} | {} | {}",
        Local::now().format("%d/%m/%Y %H:%M"),
        view.selected_records().len(),
        currency.format(view.total())
    )
}

/// Print the selection through the browser sink.
///
/// Refuses (without error) when nothing is selected.
pub fn print_selection(view: &ReportView, config: &Config) -> Result<()> {
    if !view.can_print() {
        println!("Nothing selected. Select clients before printing.");
        return Ok(());
    }

    let options = config.report_options(Some(report_caption(view, &config.currency)));
    let mut sink = BrowserSink::new(config.output_dir.clone(), config.open_browser);

    if let Some(document) = view.print_selected(&options, &mut sink)? {
        if let Some(path) = sink.last_written() {
            println!("  Report with {} client(s) written to {}", document.rows, path.display());
        }
    }
    Ok(())
}

/// Export the selection to CSV.
///
/// Refuses (without error) when nothing is selected.
pub fn export_selection(view: &ReportView, path: &Path) -> Result<()> {
    let selected = view.selected_records();
    if selected.is_empty() {
        println!("Nothing selected. Select clients before exporting.");
        return Ok(());
    }
    export::export_csv(path, &selected, &ColumnHeaders::default())
}
