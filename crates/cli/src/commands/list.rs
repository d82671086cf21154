//! List command implementation.

use std::path::Path;

use chrono::NaiveDate;
use console::style;
use infowidget_core::{Plugin, UpdateCenter};
use infowidget_engine::renderer::format_date;
use miette::{Result, miette};
use serde::Serialize;

/// One plugin line of the listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PluginSummary<'a> {
    key: &'a str,
    name: &'a str,
    version: Option<&'a str>,
    date: Option<NaiveDate>,
    sonar_version: Option<&'a str>,
}

impl<'a> From<&'a Plugin> for PluginSummary<'a> {
    fn from(plugin: &'a Plugin) -> Self {
        let release = plugin.last_release();
        Self {
            key: &plugin.key,
            name: &plugin.name,
            version: release.map(|r| r.version.name()),
            date: release.map(|r| r.date),
            sonar_version: release.map(|r| r.minimum_sonar_version.name()),
        }
    }
}

/// Lists all plugins with their last release.
pub fn execute(metadata: &Path, json: bool) -> Result<()> {
    let catalog = infowidget_parser::parse_file(metadata)
        .map_err(|e| miette!("Failed to load metadata: {}", e))?;

    if json {
        println!("{}", to_json(&catalog)?);
        return Ok(());
    }

    println!("{}", style("Available plugins:").bold());
    println!();

    for plugin in catalog.plugins() {
        print!("  {}", style(&plugin.key).cyan().bold());

        if plugin.name != plugin.key {
            print!(" {}", style(format!("({})", plugin.name)).dim());
        }

        match plugin.last_release() {
            Some(release) => println!(
                " - {} {}",
                release.version,
                style(format!("released {}", format_date(release.date))).dim()
            ),
            None => println!(" - {}", style("no release").yellow()),
        }
    }

    Ok(())
}

fn to_json(catalog: &UpdateCenter) -> Result<String> {
    let summaries: Vec<PluginSummary> = catalog.plugins().map(PluginSummary::from).collect();
    serde_json::to_string_pretty(&summaries).map_err(|e| miette!("Failed to serialize: {}", e))
}
