// SPDX-License-Identifier: PMPL-1.0-or-later

//! Input sanitization
//!
//! Pure string cleanups applied to a field's raw value before validation.
//! The cleaned value is what the validator writes back into the field, so
//! the user sees the normalized text.
//!
//! `strip_html` removes anything between `<` and `>`. It is display
//! cleanup for a contact message, not an XSS barrier: it neither escapes
//! nor understands markup.

use crate::types::FieldRole;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Anything a person name may not contain.
static NAME_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-zÀ-ÖØ-öø-ÿ' -]").unwrap());

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-' ]{2,}").unwrap());

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// NFKC-normalize, collapse whitespace runs to one space, trim.
pub fn clean_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    WHITESPACE_RUN
        .replace_all(&normalized, " ")
        .trim()
        .to_string()
}

/// Clean a person name.
///
/// Keeps ASCII letters, Latin-1 accented letters, apostrophes, hyphens and
/// spaces. Runs of two or more separators collapse to one space, so
/// `"Jean---Luc"` becomes `"Jean Luc"` while `"Jean-Luc"` is kept.
pub fn clean_name(raw: &str) -> String {
    let text = clean_text(raw);
    let letters = NAME_DISALLOWED.replace_all(&text, "");
    SEPARATOR_RUN.replace_all(&letters, " ").trim().to_string()
}

/// Drop tag-shaped spans, then re-normalize whitespace.
pub fn strip_html(raw: &str) -> String {
    clean_text(&HTML_TAG.replace_all(raw, ""))
}

/// Normalize and lower-case an email address.
pub fn clean_email(raw: &str) -> String {
    clean_text(raw).to_lowercase()
}

/// The ASCII digits of a phone entry, in order.
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Sanitize a raw value according to the field's role.
pub fn sanitize(raw: &str, role: FieldRole) -> String {
    match role {
        FieldRole::Name => clean_name(raw),
        FieldRole::Message => strip_html(raw),
        FieldRole::Email => clean_email(raw),
        FieldRole::Phone | FieldRole::Generic => clean_text(raw),
    }
}
