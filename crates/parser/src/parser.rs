//! Properties to UpdateCenter conversion.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use infowidget_core::{Plugin, Release, Result, UpdateCenter, Version, WidgetError};

use crate::ast::Property;
use crate::combinators;
use crate::error::ParseError;
use crate::lexer::span;

/// Release dates are written as `YYYY-MM-DD`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses properties syntax, returning entries in file order.
pub fn parse_properties(content: &str) -> std::result::Result<Vec<Property>, ParseError> {
    match combinators::properties(span(content)) {
        Ok((_, ast)) => Ok(ast.entries),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(ParseError::new(
            "Expected a comment, a blank line or a key=value entry",
            content,
            e.input.location_offset(),
            e.input.location_line(),
            e.input.get_utf8_column(),
        )),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::new(
            "Unexpected end of file",
            content,
            content.len(),
            content.lines().count().max(1) as u32,
            1,
        )),
    }
}

/// Parses an update-center catalog from properties content.
pub fn parse_update_center(content: &str, path: &Path) -> Result<UpdateCenter> {
    build_update_center(parse_properties(content)?, path)
}

/// Builds an update-center catalog from already parsed entries.
pub fn build_update_center(entries: Vec<Property>, path: &Path) -> Result<UpdateCenter> {
    convert_properties(&Properties::from_entries(entries), path)
}

/// Key lookup over parsed entries. Later entries override earlier ones.
struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    fn from_entries(entries: Vec<Property>) -> Self {
        Self {
            values: entries.into_iter().map(|p| (p.key, p.value)).collect(),
        }
    }

    /// Returns the trimmed value, or `None` when absent or blank.
    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| WidgetError::MissingProperty(key.to_string()))
    }

    /// Splits a comma-separated value, dropping empty items.
    fn list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Converts properties to an UpdateCenter.
fn convert_properties(props: &Properties, path: &Path) -> Result<UpdateCenter> {
    let mut center = UpdateCenter::new(path);

    let sonar_versions = props
        .list("sonar.versions")
        .iter()
        .map(|v| Version::parse(v))
        .collect::<Result<Vec<_>>>()?;
    center.set_sonar_versions(sonar_versions);

    for key in props.list("plugins") {
        center.add_plugin(convert_plugin(props, &key)?);
    }

    Ok(center)
}

/// Converts the `<key>.*` properties to a Plugin.
fn convert_plugin(props: &Properties, key: &str) -> Result<Plugin> {
    let mut plugin = Plugin::new(key);

    if let Some(name) = props.get(&format!("{}.name", key)) {
        plugin = plugin.with_name(name);
    }

    if let Some(license) = props.get(&format!("{}.license", key)) {
        plugin = plugin.with_license(license);
    }

    if let Some(url) = props.get(&format!("{}.issueTrackerUrl", key)) {
        plugin = plugin.with_issue_tracker_url(url);
    }

    if let Some(desc) = props.get(&format!("{}.description", key)) {
        plugin = plugin.with_description(desc);
    }

    if let Some(url) = props.get(&format!("{}.homepageUrl", key)) {
        plugin = plugin.with_homepage_url(url);
    }

    if let Some(org) = props.get(&format!("{}.organization", key)) {
        plugin = plugin.with_organization(org);
    }

    for version in props.list(&format!("{}.versions", key)) {
        plugin.add_release(convert_release(props, key, &version)?);
    }

    Ok(plugin)
}

/// Converts the `<key>.<version>.*` properties to a Release.
fn convert_release(props: &Properties, key: &str, version: &str) -> Result<Release> {
    let prefix = format!("{}.{}", key, version);
    let version = Version::parse(version)?;

    let date = parse_date(props.require(&format!("{}.date", prefix))?)?;
    let download_url = props.require(&format!("{}.downloadUrl", prefix))?;

    let required_key = format!("{}.requiredSonarVersions", prefix);
    let minimum_sonar_version = props
        .list(&required_key)
        .iter()
        .map(|v| Version::parse(v))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .min()
        .ok_or(WidgetError::MissingProperty(required_key))?;

    let mut release = Release::new(
        version,
        date,
        download_url,
        minimum_sonar_version,
    )
    .with_developers(props.list(&format!("{}.developers", prefix)));

    if let Some(url) = props.get(&format!("{}.sourcesUrl", prefix)) {
        release = release.with_sources_url(url);
    }

    if let Some(url) = props.get(&format!("{}.changelogUrl", prefix)) {
        release = release.with_changelog_url(url);
    }

    if let Some(desc) = props.get(&format!("{}.description", prefix)) {
        release = release.with_description(desc);
    }

    Ok(release)
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| WidgetError::InvalidDate {
        value: value.to_string(),
        message: e.to_string(),
    })
}
