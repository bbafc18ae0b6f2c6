// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sweep: batch checking of recorded submissions
//!
//! Walks a directory for submission files (`.json`, `.yaml`, `.yml`),
//! validates each against one schema on a fresh page, and produces a summary
//! sorted with invalid submissions first.

use crate::dom::Page;
use crate::i18n::Lang;
use crate::report::{check_page, FormReport};
use crate::schema::FormSchema;
use crate::submission::Submission;
use crate::types::MessageKey;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for a sweep run
pub struct SweepConfig {
    /// Directory to scan for submission files
    pub directory: PathBuf,
    pub schema: FormSchema,
    pub lang: Lang,
    /// Only keep submissions that failed validation
    pub invalid_only: bool,
}

/// Result of checking one submission file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub path: PathBuf,
    pub valid: bool,
    pub invalid_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub report: Option<FormReport>,
}

/// Complete sweep report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub created_at: String,
    pub directory: PathBuf,
    pub form: String,
    pub lang: Lang,
    pub scanned: usize,
    pub invalid: usize,
    pub unreadable: usize,
    /// How many submissions failed with each message key. A submission
    /// counts once per key however many of its fields report it.
    pub failures_by_key: BTreeMap<MessageKey, usize>,
    pub results: Vec<SubmissionResult>,
}

fn is_submission_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "json" | "yaml" | "yml"))
        .unwrap_or(false)
}

/// Find every submission file under the given directory
fn discover_submissions(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        anyhow::bail!("Not a directory: {}", directory.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable directory entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_submission_file(path))
        .collect();

    files.sort();
    Ok(files)
}

fn check_file(path: &Path, config: &SweepConfig) -> SubmissionResult {
    match Submission::load(path) {
        Ok(submission) => {
            let mut page = Page::from_schema(&config.schema);
            page.fill(submission.entries());
            let report = check_page(&mut page, config.lang);
            debug!(path = %path.display(), valid = report.valid, "submission checked");
            SubmissionResult {
                path: path.to_path_buf(),
                valid: report.valid,
                invalid_fields: report.invalid_fields().map(|f| f.id.clone()).collect(),
                error: None,
                report: Some(report),
            }
        }
        Err(e) => {
            warn!(path = %path.display(), "skipping submission: {:#}", e);
            SubmissionResult {
                path: path.to_path_buf(),
                valid: false,
                invalid_fields: Vec::new(),
                error: Some(format!("{:#}", e)),
                report: None,
            }
        }
    }
}

/// Run sweep across all submissions in a directory
pub fn run(config: &SweepConfig) -> Result<SweepReport> {
    let files = discover_submissions(&config.directory)?;
    let mut results: Vec<SubmissionResult> =
        files.iter().map(|path| check_file(path, config)).collect();

    let mut failures_by_key = BTreeMap::new();
    for report in results.iter().filter_map(|r| r.report.as_ref()) {
        let keys: BTreeSet<MessageKey> = report.invalid_fields().filter_map(|f| f.key).collect();
        for key in keys {
            *failures_by_key.entry(key).or_insert(0) += 1;
        }
    }

    let invalid = results.iter().filter(|r| !r.valid).count();
    let unreadable = results.iter().filter(|r| r.error.is_some()).count();

    // Invalid first, most broken fields first, then by path
    results.sort_by(|a, b| {
        a.valid
            .cmp(&b.valid)
            .then(b.invalid_fields.len().cmp(&a.invalid_fields.len()))
            .then(a.path.cmp(&b.path))
    });

    if config.invalid_only {
        results.retain(|r| !r.valid);
    }

    Ok(SweepReport {
        created_at: chrono::Utc::now().to_rfc3339(),
        directory: config.directory.clone(),
        form: config.schema.name.clone(),
        lang: config.lang,
        scanned: files.len(),
        invalid,
        unreadable,
        failures_by_key,
        results,
    })
}

/// Print a summary table to the terminal
pub fn print_summary(report: &SweepReport, quiet: bool) {
    if quiet {
        return;
    }

    println!("\n=== SWEEP SUMMARY ===");
    println!(
        "Directory: {}  |  Form: {}  |  Scanned: {}  |  Invalid: {}  |  Unreadable: {}",
        report.directory.display(),
        report.form,
        report.scanned,
        report.invalid,
        report.unreadable
    );
    println!();

    if report.results.is_empty() {
        println!("  No submissions to show.");
        return;
    }

    println!("  {:<48} {:>7}  {}", "Submission", "Valid", "Invalid fields");
    println!("  {}", "-".repeat(78));

    for result in report.results.iter().take(20) {
        let name = result
            .path
            .strip_prefix(&report.directory)
            .unwrap_or(&result.path)
            .display()
            .to_string();
        if let Some(err) = &result.error {
            println!("  {:<48} ERROR: {}", name, err);
        } else {
            println!(
                "  {:<48} {:>7}  {}",
                name,
                if result.valid { "yes" } else { "no" },
                result.invalid_fields.join(", ")
            );
        }
    }

    if report.results.len() > 20 {
        println!("  ... and {} more submissions", report.results.len() - 20);
    }

    if !report.failures_by_key.is_empty() {
        println!("\n  Failures by message:");
        for (key, count) in &report.failures_by_key {
            println!("    {:<15} {}", key.as_str(), count);
        }
    }
    println!();
}

/// Write sweep report as JSON
pub fn write_report(report: &SweepReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}
