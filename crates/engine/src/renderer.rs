//! Widget rendering by fixed placeholder substitution.
//!
//! The template recognises nine tokens:
//! - `%name%` - plugin name
//! - `%version%` - last release version
//! - `%date%` - last release date, e.g. `5 Jan 2024`
//! - `%downloadUrl%` - last release download URL
//! - `%sonarVersion%` - minimum platform version of the last release
//! - `%issueTracker%` - issue tracker link
//! - `%sources%` - sources link
//! - `%license%` - plugin license
//! - `%developers%` - comma-separated developer names
//!
//! Any other text, including a lone `%`, is copied through unchanged.

use chrono::{Datelike, NaiveDate};
use infowidget_core::{Plugin, Release, Result, WidgetError};

/// Value used when a field is absent.
pub const UNKNOWN: &str = "Unknown";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The placeholders a widget template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Name,
    Version,
    Date,
    DownloadUrl,
    SonarVersion,
    IssueTracker,
    Sources,
    License,
    Developers,
}

impl Placeholder {
    /// Every placeholder, in template documentation order.
    pub const ALL: [Placeholder; 9] = [
        Placeholder::Name,
        Placeholder::Version,
        Placeholder::Date,
        Placeholder::DownloadUrl,
        Placeholder::SonarVersion,
        Placeholder::IssueTracker,
        Placeholder::Sources,
        Placeholder::License,
        Placeholder::Developers,
    ];

    /// Returns the literal token as it appears in the template.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Name => "%name%",
            Placeholder::Version => "%version%",
            Placeholder::Date => "%date%",
            Placeholder::DownloadUrl => "%downloadUrl%",
            Placeholder::SonarVersion => "%sonarVersion%",
            Placeholder::IssueTracker => "%issueTracker%",
            Placeholder::Sources => "%sources%",
            Placeholder::License => "%license%",
            Placeholder::Developers => "%developers%",
        }
    }

    /// Computes the replacement for this placeholder.
    fn resolve(self, plugin: &Plugin, release: &Release) -> String {
        match self {
            Placeholder::Name => plugin.name.clone(),
            Placeholder::Version => release.version.name().to_string(),
            Placeholder::Date => format_date(release.date),
            Placeholder::DownloadUrl => release.download_url.clone(),
            Placeholder::SonarVersion => release.minimum_sonar_version.name().to_string(),
            Placeholder::IssueTracker => format_link(plugin.issue_tracker_url.as_deref()),
            Placeholder::Sources => format_link(release.sources_url.as_deref()),
            Placeholder::License => format_license(plugin.license.as_deref()),
            Placeholder::Developers => format_developers(&release.developers),
        }
    }
}

/// Renders the widget for a plugin's last release.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use infowidget_core::{Plugin, Release, Version};
/// use infowidget_engine::render;
///
/// let plugin = Plugin::new("pmd").with_name("PMD").with_release(Release::new(
///     Version::parse("1.0").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
///     "http://x/pmd.jar",
///     Version::parse("2.0").unwrap(),
/// ));
///
/// let html = render("<b>%name%</b> %version% (%date%)", &plugin).unwrap();
/// assert_eq!(html, "<b>PMD</b> 1.0 (9 Mar 2024)");
/// ```
pub fn render(template: &str, plugin: &Plugin) -> Result<String> {
    let release = plugin
        .last_release()
        .ok_or_else(|| WidgetError::MissingRelease {
            plugin: plugin.key.clone(),
        })?;

    let replacements: Vec<(&str, String)> = Placeholder::ALL
        .iter()
        .map(|p| (p.token(), p.resolve(plugin, release)))
        .collect();

    Ok(replace_each(template, &replacements))
}

/// Replaces `%`-prefixed tokens in one left-to-right pass.
/// Inserted values are never scanned again.
fn replace_each(template: &str, replacements: &[(&str, String)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find('%') {
        result.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        match replacements
            .iter()
            .find(|(token, _)| tail.starts_with(token))
        {
            Some((token, value)) => {
                result.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                result.push('%');
                rest = &tail[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Formats a URL as a top-level link, or `Unknown` when absent or blank.
pub fn format_link(url: Option<&str>) -> String {
    match url {
        Some(url) if !url.trim().is_empty() => {
            format!("<a href=\"{}\" target=\"_top\">{}</a>", url, url)
        }
        _ => UNKNOWN.to_string(),
    }
}

/// Formats a date as `D MMM YYYY` with English month abbreviations.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {:04}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Joins developer names with `, `, or `Unknown` when there are none.
pub fn format_developers(developers: &[String]) -> String {
    if developers.is_empty() {
        return UNKNOWN.to_string();
    }
    developers.join(", ")
}

/// Returns the license, or `Unknown` when absent or empty.
pub fn format_license(license: Option<&str>) -> String {
    match license {
        Some(license) if !license.is_empty() => license.to_string(),
        _ => UNKNOWN.to_string(),
    }
}
