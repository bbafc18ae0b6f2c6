// SPDX-License-Identifier: PMPL-1.0-or-later

//! Integration tests: schema files, submissions, replay scripts and reports

use kwoon::dom::{FormSurface, Page};
use kwoon::events::replay::{load_script, replay};
use kwoon::events::FormController;
use kwoon::i18n::Lang;
use kwoon::report::{check_page, resolve_lang, ReportFormatter, ReportOutputFormat};
use kwoon::schema::FormSchema;
use kwoon::submission::Submission;
use kwoon::types::{FieldRole, FieldState, MessageKey};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_schema_file_loads_with_inferred_roles() {
    let schema = FormSchema::load(&fixture("trial-class.yaml")).expect("fixture schema is valid");
    assert_eq!(schema.name, "cours-essai");
    assert_eq!(schema.honeypot.as_deref(), Some("website"));
    assert_eq!(schema.field("nom").unwrap().role(), FieldRole::Name);
    assert_eq!(schema.field("courriel").unwrap().role(), FieldRole::Email);
    assert_eq!(schema.field("cellulaire").unwrap().role(), FieldRole::Phone);
    assert_eq!(schema.field("notes").unwrap().role(), FieldRole::Message);
    assert_eq!(schema.field("code-promo").unwrap().role(), FieldRole::Generic);
    assert!(!schema.field("website").unwrap().error_slot);
}

#[test]
fn test_schema_json_and_yaml_agree() {
    let dir = TempDir::new().unwrap();
    let yaml_schema = FormSchema::load(&fixture("trial-class.yaml")).unwrap();
    let json_path = dir.path().join("trial-class.json");
    fs::write(&json_path, serde_json::to_string(&yaml_schema).unwrap()).unwrap();

    let json_schema = FormSchema::load(&json_path).unwrap();
    assert_eq!(json_schema, yaml_schema);
}

#[test]
fn test_invalid_schema_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        "name: bad\nfields:\n  - id: nom\n    kind: text\n  - id: nom\n    kind: email\n",
    )
    .unwrap();
    let err = FormSchema::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("nom"), "{:#}", err);
}

#[test]
fn test_windows_1252_submission_checks_clean() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.json");
    // "Hélène" with é and è as single Windows-1252 bytes
    let mut bytes = b"{\"prenom\": \"H".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(b"l");
    bytes.push(0xE8);
    bytes.extend_from_slice(b"ne\"}");
    fs::write(&path, bytes).unwrap();

    let submission = Submission::load(&path).unwrap();
    assert_eq!(submission.get("prenom"), Some("Hélène"));

    let mut page = Page::from_schema(&FormSchema::contact());
    page.fill(submission.entries());
    let report = check_page(&mut page, Lang::Fr);
    let prenom = report.fields.iter().find(|f| f.id == "prenom").unwrap();
    assert_eq!(prenom.state, FieldState::Valid);
}

#[test]
fn test_utf8_bom_submission_checks_clean() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export.json");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("{\"prenom\": \"Hélène\"}".as_bytes());
    fs::write(&path, bytes).unwrap();

    let submission = Submission::load(&path).expect("BOM-prefixed UTF-8 should load");
    assert_eq!(submission.get("prenom"), Some("Hélène"));

    let mut page = Page::from_schema(&FormSchema::contact());
    page.fill(submission.entries());
    let report = check_page(&mut page, Lang::Fr);
    let prenom = report.fields.iter().find(|f| f.id == "prenom").unwrap();
    assert_eq!(prenom.state, FieldState::Valid);
}

#[test]
fn test_check_report_roundtrips_through_file() {
    let dir = TempDir::new().unwrap();
    let mut page = Page::from_schema(&FormSchema::contact()).with_lang("en-CA");
    page.fill([("prenom", "Léa"), ("telephone", "555-0199")]);

    let lang = resolve_lang(&page, None);
    assert_eq!(lang, Lang::En);
    let report = check_page(&mut page, lang);
    assert!(!report.valid);

    let path = dir.path().join("report.yaml");
    let format = ReportOutputFormat::from_path(&path).unwrap();
    ReportFormatter::new().save(&report, format, &path).unwrap();

    let loaded: kwoon::report::FormReport =
        serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, report);
    let phone = loaded.fields.iter().find(|f| f.id == "telephone").unwrap();
    assert_eq!(phone.key, Some(MessageKey::PhoneLen));
    assert_eq!(
        phone.message.as_deref(),
        Some("Please enter a 10-digit North American phone number.")
    );
}

#[test]
fn test_replay_typing_session() {
    let schema = FormSchema::load(&fixture("trial-class.yaml")).unwrap();
    let steps = load_script(&fixture("typing-session.yaml")).unwrap();
    let mut controller = FormController::new(Page::from_schema(&schema).with_lang("fr"));

    let outcomes = replay(&mut controller, &steps).unwrap();
    assert_eq!(outcomes.len(), 7);

    // "W" is too short for a name
    assert_eq!(outcomes[0].dispatch.field_valid, Some(false));
    assert_eq!(outcomes[0].dispatch.form_valid, None);

    // First submit is blocked: nom, courriel and creneau are unresolved
    assert!(outcomes[2].dispatch.prevent_default);
    assert!(controller.submit_attempted());

    // After a submit attempt every keystroke re-runs the form
    assert_eq!(outcomes[3].dispatch.field_valid, Some(true));
    assert_eq!(outcomes[3].dispatch.form_valid, Some(false));
    assert_eq!(outcomes[4].dispatch.form_valid, Some(false));
    assert_eq!(outcomes[5].dispatch.form_valid, Some(true));

    // Final submit goes through
    assert!(!outcomes[6].dispatch.prevent_default);
    assert_eq!(outcomes[6].dispatch.form_valid, Some(true));

    let page = controller.into_surface();
    assert_eq!(page.value("courriel"), Some("fei@kwoon.ca"));
    assert_eq!(page.state("website"), Some(FieldState::Untouched));
    assert_eq!(page.state("cellulaire"), Some(FieldState::Valid));
}
