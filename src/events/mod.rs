// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event binding
//!
//! Maps form events onto validation calls. Every keystroke validates the
//! field that changed; once the user has tried to submit, each event also
//! re-runs the whole form so errors elsewhere appear or disappear at once.
//! There is no debouncing and nothing runs asynchronously.

pub mod replay;

use crate::dom::FormSurface;
use crate::i18n::Lang;
use crate::validate::{is_candidate, validate_field, validate_form};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// A DOM event on the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Input(String),
    Change(String),
    FocusOut(String),
}

impl FormEvent {
    /// The field the event targets; `None` for submit.
    pub fn target(&self) -> Option<&str> {
        match self {
            FormEvent::Submit => None,
            FormEvent::Input(id) | FormEvent::Change(id) | FormEvent::FocusOut(id) => Some(id),
        }
    }
}

impl fmt::Display for FormEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormEvent::Submit => f.write_str("submit"),
            FormEvent::Input(id) => write!(f, "input #{}", id),
            FormEvent::Change(id) => write!(f, "change #{}", id),
            FormEvent::FocusOut(id) => write!(f, "focusout #{}", id),
        }
    }
}

/// What handling one event did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Dispatch {
    /// The host should cancel the default action (submit only).
    pub prevent_default: bool,
    /// Verdict of the targeted field, when one was validated.
    pub field_valid: Option<bool>,
    /// Verdict of the whole form, when it was re-run.
    pub form_valid: Option<bool>,
}

/// Owns a form surface and routes events to the validator
pub struct FormController<S: FormSurface> {
    surface: S,
    lang: Option<Lang>,
    submit_attempted: bool,
}

impl<S: FormSurface> FormController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            lang: None,
            submit_attempted: false,
        }
    }

    /// Pin the message language instead of reading the page attribute.
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }

    /// Language for the next verdict. Read per event so a language toggle
    /// on the page takes effect immediately.
    pub fn lang(&self) -> Lang {
        self.lang
            .unwrap_or_else(|| Lang::from_tag(self.surface.lang_attr()))
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn dispatch(&mut self, event: &FormEvent) -> Dispatch {
        let lang = self.lang();
        match event {
            FormEvent::Submit => {
                self.submit_attempted = true;
                let valid = validate_form(&mut self.surface, lang);
                debug!(valid, "submit");
                Dispatch {
                    prevent_default: !valid,
                    field_valid: None,
                    form_valid: Some(valid),
                }
            }
            FormEvent::Input(id) | FormEvent::Change(id) | FormEvent::FocusOut(id) => {
                if !is_candidate(&self.surface, id) {
                    return Dispatch::default();
                }
                let field_valid = validate_field(&mut self.surface, id, lang);
                let form_valid = self
                    .submit_attempted
                    .then(|| validate_form(&mut self.surface, lang));
                Dispatch {
                    prevent_default: false,
                    field_valid: Some(field_valid),
                    form_valid,
                }
            }
        }
    }
}
