use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::TooltipConfig;
use crate::error::UpdateError;
use crate::fred::{FredClient, RateTable, Seasonality};
use crate::page::{render_page, replace_svg_in_html, update_meta_in_html};
use crate::states::STATES;
use crate::svg::enhance_svg;

/// Inputs of one page update
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub svg_path: PathBuf,
    pub html_path: PathBuf,
    pub seasonality: Seasonality,
    pub api_key: Option<String>,
    pub tooltip: TooltipConfig,
    /// Script referenced by a freshly rendered page
    pub script_src: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub latest_date: Option<NaiveDate>,
    pub states_with_data: usize,
    pub states_without_data: Vec<String>,
    pub html_path: PathBuf,
    pub backup_path: Option<PathBuf>,
}

/// Format used for the page's "Refreshed" badge
#[must_use]
pub fn refreshed_label(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Build the new page from the template SVG and the current page, if any
///
/// # Errors
/// Returns an error if the SVG cannot be rewritten
pub fn build_page(
    svg_template: &str,
    existing_html: Option<&str>,
    rates: &RateTable,
    options: &UpdateOptions,
    refreshed: &str,
) -> Result<String, UpdateError> {
    let svg = enhance_svg(svg_template, rates, &options.tooltip.value_attribute).map_err(UpdateError::Svg)?;

    let html = match existing_html {
        Some(html) => replace_svg_in_html(html, &svg),
        None => render_page(&svg, &options.script_src, &options.tooltip).map_err(UpdateError::Page)?,
    };

    Ok(update_meta_in_html(&html, options.seasonality, refreshed))
}

fn backup_path(html_path: &Path) -> PathBuf {
    let mut name = html_path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

fn read_optional(path: &Path) -> Result<Option<String>, UpdateError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(UpdateError::io(path, e)),
    }
}

/// Write `html` to the page, keeping the previous content next to it
///
/// # Errors
/// Returns an error if either file cannot be written
pub fn write_page(html_path: &Path, previous: Option<&str>, html: &str) -> Result<Option<PathBuf>, UpdateError> {
    let backup = match previous {
        Some(previous) => {
            let backup = backup_path(html_path);
            fs::write(&backup, previous).map_err(|e| UpdateError::io(&backup, e))?;
            Some(backup)
        }
        None => None,
    };

    fs::write(html_path, html).map_err(|e| UpdateError::io(html_path, e))?;
    Ok(backup)
}

/// Fetch the latest rates, rewrite the map and write the page
///
/// # Errors
/// Returns an error if no API key is available, the SVG template cannot be
/// read or rewritten, or the page cannot be written. Individual state fetch
/// failures are logged and do not abort the run.
pub fn run_update(options: &UpdateOptions) -> Result<UpdateReport, UpdateError> {
    let api_key = options
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or(UpdateError::MissingApiKey)?;

    let svg_template = fs::read_to_string(&options.svg_path).map_err(|e| UpdateError::io(&options.svg_path, e))?;

    log::info!("Fetching {} series for {} states", options.seasonality, STATES.len());
    let client = FredClient::new(api_key)?;
    let rates = client.latest_rates(STATES.iter().map(|(abbr, _)| *abbr), options.seasonality);
    let latest_date = rates.latest_date();
    match latest_date {
        Some(date) => log::info!("Latest FRED month: {date}"),
        None => log::warn!("No observations returned for any state"),
    }
    let states_without_data = rates.states_without_data();
    if !states_without_data.is_empty() {
        log::warn!("No data for {}", states_without_data.join(", "));
    }

    let existing = read_optional(&options.html_path)?;
    if existing.is_none() {
        log::info!("{} not found, rendering a new page", options.html_path.display());
    }

    let html = build_page(
        &svg_template,
        existing.as_deref(),
        &rates,
        options,
        &refreshed_label(Utc::now()),
    )?;
    let backup_path = write_page(&options.html_path, existing.as_deref(), &html)?;

    Ok(UpdateReport {
        latest_date,
        states_with_data: rates.with_data(),
        states_without_data,
        html_path: options.html_path.clone(),
        backup_path,
    })
}
