// SPDX-License-Identifier: PMPL-1.0-or-later

//! Field and form validation
//!
//! Validating a field is: read its raw value, sanitize it by role, write
//! the cleaned value back, run the role's rules, and present the verdict.
//! Form validity is never stored; it is recomputed by re-running every
//! candidate field.

pub mod rules;

use crate::dom::{clear_error, set_error, FormSurface};
use crate::i18n::{render, Lang};
use crate::sanitize::sanitize;
use crate::types::{FieldRole, Outcome};
use tracing::{debug, trace};

/// What one field evaluation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldVerdict {
    pub id: String,
    pub role: FieldRole,
    /// Sanitized value, as written back into the field.
    pub value: String,
    pub outcome: Outcome,
}

impl FieldVerdict {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Ids of the fields that take part in form validation, in document order.
///
/// Hidden inputs, buttons and the honeypot are skipped.
pub fn candidate_ids<S: FormSurface + ?Sized>(surface: &S) -> Vec<String> {
    surface
        .field_ids()
        .into_iter()
        .filter(|id| is_candidate(surface, id))
        .collect()
}

/// Whether `id` takes part in validation.
pub fn is_candidate<S: FormSurface + ?Sized>(surface: &S, id: &str) -> bool {
    surface.honeypot() != Some(id)
        && surface
            .schema(id)
            .map(|schema| schema.kind.is_candidate())
            .unwrap_or(false)
}

/// Sanitize, evaluate and present one field.
///
/// Returns `None` when the page has no such field.
pub fn run_field<S: FormSurface + ?Sized>(
    surface: &mut S,
    id: &str,
    lang: Lang,
) -> Option<FieldVerdict> {
    let schema = surface.schema(id)?.clone();
    let raw = surface.value(id).unwrap_or_default().to_string();
    let role = schema.role();

    let value = sanitize(&raw, role);
    if value != raw {
        trace!(field = id, "sanitized value written back");
        surface.set_value(id, &value);
    }

    let outcome = rules::check(&value, &schema);
    match &outcome {
        Ok(()) => clear_error(surface, id),
        Err(violation) => set_error(surface, id, &render(lang, violation)),
    }
    debug!(
        field = id,
        ?role,
        verdict = outcome.as_ref().err().map(|v| v.key.as_str()).unwrap_or("ok"),
        "field validated"
    );

    Some(FieldVerdict {
        id: id.to_string(),
        role,
        value,
        outcome,
    })
}

/// Validate one field. A field the page does not have counts as valid.
pub fn validate_field<S: FormSurface + ?Sized>(surface: &mut S, id: &str, lang: Lang) -> bool {
    run_field(surface, id, lang)
        .map(|verdict| verdict.is_valid())
        .unwrap_or(true)
}

/// Validate every candidate field and report whether all passed.
///
/// Does not stop at the first failure: every field's presentation is
/// refreshed.
pub fn validate_form<S: FormSurface + ?Sized>(surface: &mut S, lang: Lang) -> bool {
    evaluate(surface, lang).iter().all(FieldVerdict::is_valid)
}

/// Validate every candidate field and return the individual verdicts.
pub fn evaluate<S: FormSurface + ?Sized>(surface: &mut S, lang: Lang) -> Vec<FieldVerdict> {
    let verdicts: Vec<FieldVerdict> = candidate_ids(surface)
        .iter()
        .filter_map(|id| run_field(&mut *surface, id, lang))
        .collect();
    debug!(
        fields = verdicts.len(),
        invalid = verdicts.iter().filter(|v| !v.is_valid()).count(),
        "form validated"
    );
    verdicts
}
