// SPDX-License-Identifier: PMPL-1.0-or-later

//! Validation message catalog for kwoon.
//!
//! Embeds every user-facing error string for the two site languages as a
//! compile-time static table. Lookup is linear over ten keys, which is fine:
//! it runs once per field verdict.
//!
//! ## Adding a new key
//!
//! 1. Add a variant to [`MessageKey`]
//! 2. Add the entry to both `FR` and `EN` (the key-parity test enforces it)

use crate::types::{MessageKey, Violation};
use serde::{Deserialize, Serialize};

/// Site languages.
///
/// The school site is French first; English is the alternate. The page
/// carries the active one in its `lang` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    /// ISO 639-1 two-letter code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }

    /// Resolve a document `lang` attribute (`"en"`, `"en-CA"`, `"fr-ca"`, ...).
    ///
    /// Any tag starting with `en` selects English; anything else, including
    /// an absent attribute, falls back to French.
    pub fn from_tag(tag: Option<&str>) -> Lang {
        match tag {
            Some(tag) if tag.trim().to_ascii_lowercase().starts_with("en") => Lang::En,
            _ => Lang::Fr,
        }
    }

    /// All supported languages, in display order.
    pub fn all() -> &'static [Lang] {
        &[Lang::Fr, Lang::En]
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ─── Translation Lookup ─────────────────────────────────────────────

/// Look up the message for `key` in `lang`.
///
/// Both tables define every key, so this never returns an empty string.
///
/// # Examples
///
/// ```
/// use kwoon::i18n::{t, Lang};
/// use kwoon::types::MessageKey;
/// assert_eq!(t(Lang::En, MessageKey::Required), "This field is required.");
/// assert_eq!(t(Lang::Fr, MessageKey::Required), "Champ obligatoire.");
/// ```
pub fn t(lang: Lang, key: MessageKey) -> &'static str {
    lookup(catalog_for(lang), key)
        .or_else(|| lookup(FR, key))
        .unwrap_or_else(|| key.as_str())
}

/// Render a violation as display text, substituting the `{n}` bound
/// placeholder where the message has one.
pub fn render(lang: Lang, violation: &Violation) -> String {
    let template = t(lang, violation.key);
    match violation.bound {
        Some(n) => template.replace("{n}", &n.to_string()),
        None => template.to_string(),
    }
}

/// Every `(key, message)` pair for a language, in taxonomy order.
pub fn entries(lang: Lang) -> Vec<(MessageKey, &'static str)> {
    MessageKey::all().iter().map(|key| (*key, t(lang, *key))).collect()
}

fn lookup(catalog: &'static [(MessageKey, &'static str)], key: MessageKey) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn catalog_for(lang: Lang) -> &'static [(MessageKey, &'static str)] {
    match lang {
        Lang::Fr => FR,
        Lang::En => EN,
    }
}

// ─── French (source language) ───────────────────────────────────────

const FR: &[(MessageKey, &str)] = &[
    (MessageKey::Required, "Champ obligatoire."),
    (MessageKey::SelectRequired, "Veuillez choisir une option."),
    (MessageKey::MinLen, "Doit contenir au moins {n} caractères."),
    (MessageKey::MaxLen, "Doit contenir au plus {n} caractères."),
    (
        MessageKey::NameInvalid,
        "Veuillez entrer un nom valide (lettres, espaces, tirets, apostrophes).",
    ),
    (MessageKey::NameLen, "Doit contenir entre 2 et 50 caractères."),
    (
        MessageKey::EmailInvalid,
        "Veuillez entrer un courriel valide (doit contenir un @)",
    ),
    (
        MessageKey::PhoneInvalid,
        "Seulement les chiffres sont permis pour le champ téléphone.",
    ),
    (
        MessageKey::PhoneLen,
        "Veuillez entrer un numéro nord-américain à 10 chiffres.",
    ),
    (
        MessageKey::MsgLen,
        "Le message doit contenir au moins 10 caractères (max 2000).",
    ),
];

// ─── English ────────────────────────────────────────────────────────

const EN: &[(MessageKey, &str)] = &[
    (MessageKey::Required, "This field is required."),
    (MessageKey::SelectRequired, "Please choose an option."),
    (MessageKey::MinLen, "Must be at least {n} characters."),
    (MessageKey::MaxLen, "Must be at most {n} characters."),
    (
        MessageKey::NameInvalid,
        "Please enter a valid name (letters, spaces, hyphens, apostrophes).",
    ),
    (MessageKey::NameLen, "Must be between 2 and 50 characters."),
    (
        MessageKey::EmailInvalid,
        "Please enter a valid email (must contain a @)",
    ),
    (MessageKey::PhoneInvalid, "Only digits are allowed in the phone field."),
    (
        MessageKey::PhoneLen,
        "Please enter a 10-digit North American phone number.",
    ),
    (
        MessageKey::MsgLen,
        "Message must be at least 10 characters (max 2000).",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_in_every_language() {
        for lang in Lang::all() {
            for key in MessageKey::all() {
                let msg = t(*lang, *key);
                assert!(!msg.is_empty(), "{:?}/{} should resolve", lang, key);
                assert_ne!(msg, key.as_str(), "{:?}/{} fell through to the key", lang, key);
            }
        }
    }

    #[test]
    fn languages_differ_for_every_key() {
        for key in MessageKey::all() {
            assert_ne!(t(Lang::Fr, *key), t(Lang::En, *key), "{} is untranslated", key);
        }
    }

    #[test]
    fn catalogs_have_same_key_count() {
        assert_eq!(FR.len(), MessageKey::all().len());
        assert_eq!(EN.len(), FR.len());
    }

    #[test]
    fn lang_from_tag_defaults_to_french() {
        assert_eq!(Lang::from_tag(None), Lang::Fr);
        assert_eq!(Lang::from_tag(Some("")), Lang::Fr);
        assert_eq!(Lang::from_tag(Some("fr-CA")), Lang::Fr);
        assert_eq!(Lang::from_tag(Some("de")), Lang::Fr);
        assert_eq!(Lang::from_tag(Some("en")), Lang::En);
        assert_eq!(Lang::from_tag(Some("EN-us")), Lang::En);
        assert_eq!(Lang::from_tag(Some(" en")), Lang::En);
    }

    #[test]
    fn render_substitutes_bounds() {
        let v = Violation::with_bound(MessageKey::MinLen, 3);
        assert_eq!(render(Lang::En, &v), "Must be at least 3 characters.");
        assert_eq!(render(Lang::Fr, &v), "Doit contenir au moins 3 caractères.");

        let plain = Violation::new(MessageKey::Required);
        assert_eq!(render(Lang::En, &plain), "This field is required.");
    }
}
