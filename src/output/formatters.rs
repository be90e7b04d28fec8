//! Output formatting functionality
//!
//! This module renders command reports as text or JSON.

use crate::error::Result;
use crate::models::report::{FingerprintEntry, Report};
use ansi_term::Colour::{Blue, Green};
use ansi_term::Style;

fn header(title: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", Blue.bold().paint(title))
    } else {
        format!("{}\n", title)
    }
}

fn format_fingerprint(entry: &FingerprintEntry, use_colors: bool) -> String {
    // Same layout as sha256sum
    if use_colors {
        format!("{}  {}\n", Green.paint(entry.fingerprint.as_str()), entry.path)
    } else {
        format!("{}  {}\n", entry.fingerprint, entry.path)
    }
}

/// Format a report as text, one entry per line
pub fn format_report_text(report: &Report, use_colors: bool, quiet: bool) -> String {
    let mut output = String::new();

    if !quiet {
        output.push_str(&header(&report.title(), use_colors));
    }

    match report {
        Report::Imports { files, .. } => {
            for file in files {
                output.push_str(file);
                output.push('\n');
            }
        }
        Report::Fingerprints { fingerprints } => {
            for entry in fingerprints {
                output.push_str(&format_fingerprint(entry, use_colors));
            }
        }
        Report::Importers { importers, .. } => {
            for env in importers {
                output.push_str(env);
                output.push('\n');
            }
        }
        Report::Environments { environments, .. } => {
            for env in environments {
                output.push_str(env);
                output.push('\n');
            }
        }
    }

    if !quiet && report.is_empty() {
        let none = "(none)";
        if use_colors {
            output.push_str(&format!("{}\n", Style::new().dimmed().paint(none)));
        } else {
            output.push_str(none);
            output.push('\n');
        }
    }

    output
}

/// Format a report as pretty-printed JSON
pub fn format_report_json(report: &Report) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}
