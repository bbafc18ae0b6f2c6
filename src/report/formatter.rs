// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report formatting and output

use super::FormReport;
use crate::i18n::{entries, Lang};
use crate::types::FieldState;
use anyhow::Result;
use colored::*;
use std::fs;
use std::path::Path;

use super::ReportOutputFormat;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, report: &FormReport) {
        for line in self.lines(report) {
            println!("{}", line);
        }
    }

    /// Terminal rendering of a report, one entry per line.
    pub fn lines(&self, report: &FormReport) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "{} {} ({})",
            "FORM".bold().cyan(),
            report.form.bold(),
            report.lang
        ));

        for field in &report.fields {
            let badge = match field.state {
                FieldState::Valid => "ok".green(),
                FieldState::Invalid => "!!".red().bold(),
                FieldState::Untouched => "--".dimmed(),
            };
            let mut line = format!("  [{}] {:<12} {:?}", badge, field.id, field.value);
            if let (Some(key), Some(message)) = (&field.key, &field.message) {
                line.push_str(&format!("  {} {}", key.as_str().yellow(), message));
            }
            lines.push(line);
        }

        let invalid = report.invalid_fields().count();
        let verdict = if report.valid {
            "VALID".green().bold()
        } else {
            "INVALID".red().bold()
        };
        lines.push(format!(
            "{}: {} field(s), {} invalid",
            verdict,
            report.fields.len(),
            invalid
        ));
        lines
    }

    /// Print the message catalog for one language.
    pub fn print_catalog(&self, lang: Lang) {
        println!("{} ({})", "MESSAGES".bold().cyan(), lang);
        for (key, message) in entries(lang) {
            println!("  {:<15} {}", key.as_str().yellow(), message);
        }
    }

    pub fn save(&self, report: &FormReport, format: ReportOutputFormat, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, format.serialize(report)?)?;
        Ok(())
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
