// SPDX-License-Identifier: PMPL-1.0-or-later

//! Property tests for the phone rule, the sanitizer and re-validation

use kwoon::dom::{FormSurface, Page};
use kwoon::i18n::Lang;
use kwoon::sanitize::{clean_name, clean_text, sanitize};
use kwoon::schema::FormSchema;
use kwoon::types::{FieldRole, MessageKey};
use kwoon::validate::{rules, validate_field};
use proptest::prelude::*;

/// Typed-text alphabet: accented letters in precomposed form, separators,
/// markup brackets and a few non-ASCII spaces.
const TYPED: &str = "[a-zA-Z0-9éÉàçÀ' ,.@<>/\t\n\u{a0}\u{2003}-]{0,40}";

proptest! {
    #[test]
    fn nanp_numbers_are_accepted(digits in "1?[2-9][0-9]{2}[2-9][0-9]{6}") {
        prop_assert!(rules::phone(&digits, true).is_ok());
    }

    #[test]
    fn formatted_nanp_numbers_are_accepted(
        area in "[2-9][0-9]{2}",
        exchange in "[2-9][0-9]{2}",
        line in "[0-9]{4}",
    ) {
        let formatted = format!("({}) {}-{}", area, exchange, line);
        prop_assert!(rules::phone(&formatted, true).is_ok());
    }

    #[test]
    fn digitless_phone_entries_are_rejected(value in "[a-zA-Z()+.#*-]{1,20}") {
        let err = rules::phone(&value, false).unwrap_err();
        prop_assert_eq!(err.key, MessageKey::PhoneInvalid);
    }

    #[test]
    fn area_code_starting_low_is_rejected(
        lead in "[01]",
        rest in "[0-9]{2}[2-9][0-9]{6}",
    ) {
        let digits = format!("{}{}", lead, rest);
        // A leading 1 followed by nine digits is still too short.
        let err = rules::phone(&digits, true).unwrap_err();
        prop_assert_eq!(err.key, MessageKey::PhoneLen);
    }

    #[test]
    fn clean_text_is_idempotent(raw in TYPED) {
        let once = clean_text(&raw);
        prop_assert_eq!(clean_text(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn clean_name_never_leaves_separator_runs(raw in "[A-Za-zé' -]{0,30}") {
        let name = clean_name(&raw);
        for run in ["--", "''", "  ", "-'", "'-", " -", "- ", " '", "' "] {
            prop_assert!(!name.contains(run), "{:?} -> {:?}", raw, name);
        }
        prop_assert_eq!(clean_name(&name), name.clone());
    }

    #[test]
    fn sanitize_is_stable_for_every_role(raw in TYPED) {
        for role in [
            FieldRole::Phone,
            FieldRole::Name,
            FieldRole::Email,
            FieldRole::Message,
            FieldRole::Generic,
        ] {
            let once = sanitize(&raw, role);
            prop_assert_eq!(sanitize(&once, role), once.clone(), "{:?}", role);
        }
    }

    #[test]
    fn validating_twice_gives_the_same_presentation(
        value in TYPED,
        id in prop::sample::select(vec!["prenom", "nom", "email", "telephone", "message", "age"]),
    ) {
        let mut page = Page::from_schema(&FormSchema::contact());
        page.set_value(id, &value);

        let first = validate_field(&mut page, id, Lang::Fr);
        let snapshot = (
            page.value(id).map(str::to_string),
            page.state(id),
            page.error_text(id).map(str::to_string),
        );
        let second = validate_field(&mut page, id, Lang::Fr);
        prop_assert_eq!(first, second);
        prop_assert_eq!(
            snapshot,
            (
                page.value(id).map(str::to_string),
                page.state(id),
                page.error_text(id).map(str::to_string),
            )
        );
    }
}
