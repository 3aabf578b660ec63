//! Rendering and saving of collected URLs.

use crate::url::decode_url;
use chrono::{DateTime, TimeZone};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use urlc_domain::{DomainReport, OutputFormat, SearchHit};

#[urlc_derive::urlc_error]
pub enum ExportError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("JSON error{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

/// Display switches for [`render`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Prefix table rows with `[score]`.
    pub scores: bool,
    /// Percent-decode URLs.
    pub decode: bool,
}

/// Renders reports in input order.
///
/// `score` is only consulted for table output with `scores` enabled.
pub fn render<F>(
    reports: &[DomainReport],
    format: OutputFormat,
    options: RenderOptions,
    score: F,
) -> Result<String, ExportError>
where
    F: Fn(&DomainReport, &SearchHit) -> i32,
{
    let url = |hit: &SearchHit| -> String {
        if options.decode { decode_url(&hit.url).into_owned() } else { hit.url.clone() }
    };

    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            let mut map = Map::new();
            for report in reports {
                let urls = report.hits.iter().map(|hit| Value::String(url(hit))).collect();
                map.insert(report.domain.clone(), Value::Array(urls));
            }
            out = serde_json::to_string_pretty(&Value::Object(map))
                .context("rendering JSON output")?;
        },
        OutputFormat::Txt => {
            for report in reports {
                let _ = writeln!(out, "\n# {}", report.domain);
                for hit in &report.hits {
                    let _ = writeln!(out, "{}", url(hit));
                }
            }
        },
        OutputFormat::Table => {
            for report in reports {
                if let Some(error) = &report.error {
                    let _ = writeln!(out, "\n=== {} ===", report.domain);
                    let _ = writeln!(out, "  error: {error}");
                    continue;
                }
                let _ = writeln!(out, "\n=== {} ({}) ===", report.domain, report.total());
                for hit in &report.hits {
                    if options.scores {
                        let _ = writeln!(out, "  [{:3}] {}", score(report, hit), url(hit));
                    } else {
                        let _ = writeln!(out, "  {}", url(hit));
                    }
                }
            }
        },
    }
    Ok(out)
}

/// Writes every report into one file: a `# domain` header followed by its URLs.
pub fn write_combined(path: &Path, reports: &[DomainReport]) -> Result<(), ExportError> {
    let mut lines = Vec::new();
    for report in reports {
        lines.push(format!("# {}", report.domain));
        lines.extend(report.hits.iter().map(|hit| hit.url.clone()));
    }

    fs::write(path, lines.join("\n")).context(format!("writing {}", path.display()))?;
    info!(path = %path.display(), "Results saved");
    Ok(())
}

/// File name for one domain: dots and slashes become underscores.
#[must_use]
pub fn per_domain_file_name<Tz>(domain: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let safe = domain.replace(['.', '/'], "_");
    format!("{safe}_{}.txt", timestamp.format("%Y-%m-%d_%H%M%S"))
}

/// Writes one file per non-empty report with decoded URLs, one per line.
///
/// Returns the written paths in report order.
pub fn write_per_domain<Tz>(
    dir: &Path,
    reports: &[DomainReport],
    timestamp: &DateTime<Tz>,
) -> Result<Vec<PathBuf>, ExportError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    fs::create_dir_all(dir).context(format!("creating {}", dir.display()))?;

    let mut written = Vec::new();
    for report in reports.iter().filter(|r| !r.hits.is_empty()) {
        let path = dir.join(per_domain_file_name(&report.domain, timestamp));
        let mut body = String::new();
        for hit in &report.hits {
            let _ = writeln!(body, "{}", decode_url(&hit.url));
        }
        fs::write(&path, body).context(format!("writing {}", path.display()))?;
        written.push(path);
    }

    info!(files = written.len(), dir = %dir.display(), "Per-domain files saved");
    Ok(written)
}
