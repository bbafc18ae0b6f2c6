// SPDX-License-Identifier: PMPL-1.0-or-later

//! Validation reports
//!
//! A report freezes one evaluation of a form: each candidate field's
//! sanitized value, state and localized message.

pub mod formatter;
pub mod output;

use crate::dom::{FormSurface, Page};
use crate::i18n::{render, Lang};
use crate::types::{FieldRole, FieldState, MessageKey};
use crate::validate::{evaluate, FieldVerdict};
use serde::{Deserialize, Serialize};

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub id: String,
    pub role: FieldRole,
    pub value: String,
    pub state: FieldState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<MessageKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldReport {
    fn from_verdict(verdict: FieldVerdict, lang: Lang) -> Self {
        let (state, key, message) = match verdict.outcome {
            Ok(()) => (FieldState::Valid, None, None),
            Err(violation) => (
                FieldState::Invalid,
                Some(violation.key),
                Some(render(lang, &violation)),
            ),
        };
        Self {
            id: verdict.id,
            role: verdict.role,
            value: verdict.value,
            state,
            key,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormReport {
    pub form: String,
    pub lang: Lang,
    pub created_at: String,
    pub valid: bool,
    pub fields: Vec<FieldReport>,
}

impl FormReport {
    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|f| f.state == FieldState::Invalid)
    }
}

/// Validate every field of `page` and capture the result.
pub fn check_page(page: &mut Page, lang: Lang) -> FormReport {
    let verdicts = evaluate(page, lang);
    let valid = verdicts.iter().all(FieldVerdict::is_valid);
    FormReport {
        form: page.form.name.clone(),
        lang,
        created_at: chrono::Utc::now().to_rfc3339(),
        valid,
        fields: verdicts
            .into_iter()
            .map(|v| FieldReport::from_verdict(v, lang))
            .collect(),
    }
}

/// Resolve the language for a page: an explicit choice, else its `lang`
/// attribute.
pub fn resolve_lang(page: &Page, explicit: Option<Lang>) -> Lang {
    explicit.unwrap_or_else(|| Lang::from_tag(page.lang_attr()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FormSchema;

    #[test]
    fn report_lists_invalid_fields_with_messages() {
        let mut page = Page::from_schema(&FormSchema::contact());
        page.fill([("email", "a@b"), ("prenom", "Jean---Luc")]);
        let report = check_page(&mut page, Lang::En);

        assert!(!report.valid);
        let email = report.fields.iter().find(|f| f.id == "email").unwrap();
        assert_eq!(email.key, Some(MessageKey::EmailInvalid));
        assert_eq!(
            email.message.as_deref(),
            Some("Please enter a valid email (must contain a @)")
        );
        let prenom = report.fields.iter().find(|f| f.id == "prenom").unwrap();
        assert_eq!(prenom.state, FieldState::Valid);
        assert_eq!(prenom.value, "Jean Luc");
        assert!(report.invalid_fields().all(|f| f.message.is_some()));
    }

    #[test]
    fn resolve_lang_prefers_explicit_choice() {
        let page = Page::from_schema(&FormSchema::contact()).with_lang("en-US");
        assert_eq!(resolve_lang(&page, None), Lang::En);
        assert_eq!(resolve_lang(&page, Some(Lang::Fr)), Lang::Fr);
    }
}
