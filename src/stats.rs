use itertools::Itertools;
use owo_colors::OwoColorize;
use serde::Deserialize;
use serde_with::{DurationMilliSeconds, serde_as};
use std::{fmt::Write, time::Duration};

/// The subset of webpack's `--json` stats this build reports on.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStats {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub time: Option<Duration>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub errors: Vec<StatsMessage>,
    #[serde(default)]
    pub warnings: Vec<StatsMessage>,
}

impl BundleStats {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

/// webpack 4 reports plain strings, webpack 5 reports objects.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum StatsMessage {
    Text(String),
    Detailed(StatsMessageDetail),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsMessageDetail {
    pub message: String,
    #[serde(default)]
    pub module_name: Option<String>,
    #[serde(default)]
    pub loc: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl StatsMessage {
    fn origin(&self) -> Option<&str> {
        match self {
            StatsMessage::Text(_) => None,
            StatsMessage::Detailed(detail) => {
                detail.module_name.as_deref().or(detail.loc.as_deref())
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            StatsMessage::Text(text) => text,
            StatsMessage::Detailed(detail) => &detail.message,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            StatsMessage::Text(_) => None,
            StatsMessage::Detailed(detail) => detail.details.as_deref(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StatsReportOptions {
    pub error_details: bool,
    pub colors: bool,
}

#[derive(Clone, Copy)]
enum Paint {
    Error,
    Warning,
    Asset,
    Heading,
}

fn paint(text: &str, kind: Paint, colors: bool) -> String {
    if !colors {
        return text.to_string();
    }
    match kind {
        Paint::Error => text.red().bold().to_string(),
        Paint::Warning => text.yellow().bold().to_string(),
        Paint::Asset => text.green().bold().to_string(),
        Paint::Heading => text.bold().to_string(),
    }
}

fn format_size(size: u64) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];
    if size < 1024 {
        return format!("{} bytes", size);
    }
    let mut value = size as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

fn write_message(
    report: &mut String,
    label: &str,
    kind: Paint,
    message: &StatsMessage,
    options: StatsReportOptions,
) {
    let heading = match message.origin() {
        Some(origin) => format!("{} in {}", label, origin),
        None => label.to_string(),
    };
    if !report.is_empty() {
        report.push('\n');
    }
    let _ = writeln!(report, "{}", paint(&heading, kind, options.colors));
    let _ = writeln!(report, "{}", message.message());
    if options.error_details {
        if let Some(details) = message.details() {
            let _ = writeln!(report, "{}", details);
        }
    }
}

/// Renders stats the way webpack's `stats.toString()` lays them out.
pub fn render_report(stats: &BundleStats, options: StatsReportOptions) -> String {
    let mut report = String::new();

    if let Some(hash) = &stats.hash {
        let _ = writeln!(report, "Hash: {}", paint(hash, Paint::Heading, options.colors));
    }
    if let Some(version) = &stats.version {
        let _ = writeln!(
            report,
            "Version: webpack {}",
            paint(version, Paint::Heading, options.colors)
        );
    }
    if let Some(time) = stats.time {
        let time = format!("{}ms", time.as_millis());
        let _ = writeln!(report, "Time: {}", paint(&time, Paint::Heading, options.colors));
    }

    if !stats.assets.is_empty() {
        let name_width = stats
            .assets
            .iter()
            .map(|asset| asset.name.len())
            .max()
            .unwrap_or(0)
            .max("Asset".len());
        let rows = stats
            .assets
            .iter()
            .map(|asset| {
                let padding = " ".repeat(name_width - asset.name.len());
                format!(
                    "{}{}  {}",
                    padding,
                    paint(&asset.name, Paint::Asset, options.colors),
                    format_size(asset.size)
                )
            })
            .join("\n");
        let _ = writeln!(report, "{:>width$}  Size", "Asset", width = name_width);
        let _ = writeln!(report, "{}", rows);
    }

    for warning in &stats.warnings {
        write_message(&mut report, "WARNING", Paint::Warning, warning, options);
    }
    for error in &stats.errors {
        write_message(&mut report, "ERROR", Paint::Error, error, options);
    }

    report.trim_end().to_string()
}
