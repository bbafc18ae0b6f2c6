// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for kwoon
//!
//! Field kinds mirror the HTML input types a contact form carries; field
//! roles are the closed set of validation behaviours those fields map onto.

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTML control kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
    Textarea,
    Hidden,
    Submit,
    Reset,
    Button,
}

impl FieldKind {
    /// Whether a field of this kind takes part in form validation.
    ///
    /// Hidden inputs and buttons never carry user input.
    pub fn is_candidate(&self) -> bool {
        !matches!(
            self,
            FieldKind::Hidden | FieldKind::Submit | FieldKind::Reset | FieldKind::Button
        )
    }
}

/// Validation behaviour of a field
///
/// Each role owns one rule function in [`crate::validate::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Phone,
    Name,
    Email,
    Message,
    Generic,
}

/// Field ids that are treated as person names when no role is declared
const NAME_LIKE_IDS: &[&str] = &[
    "prenom",
    "nom",
    "name",
    "first_name",
    "last_name",
    "firstname",
    "lastname",
    "given_name",
    "family_name",
];

impl FieldRole {
    /// Derive the role for a field that does not declare one.
    pub fn infer(id: &str, kind: FieldKind) -> Self {
        match kind {
            FieldKind::Tel => FieldRole::Phone,
            FieldKind::Email => FieldRole::Email,
            FieldKind::Textarea => FieldRole::Message,
            FieldKind::Text => {
                let id = id.to_ascii_lowercase();
                if NAME_LIKE_IDS.contains(&id.as_str()) {
                    FieldRole::Name
                } else {
                    FieldRole::Generic
                }
            }
            _ => FieldRole::Generic,
        }
    }
}

/// Symbolic identifier of a localized validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
    Required,
    SelectRequired,
    MinLen,
    MaxLen,
    NameInvalid,
    NameLen,
    EmailInvalid,
    PhoneInvalid,
    PhoneLen,
    MsgLen,
}

impl MessageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::Required => "required",
            MessageKey::SelectRequired => "selectRequired",
            MessageKey::MinLen => "minLen",
            MessageKey::MaxLen => "maxLen",
            MessageKey::NameInvalid => "nameInvalid",
            MessageKey::NameLen => "nameLen",
            MessageKey::EmailInvalid => "emailInvalid",
            MessageKey::PhoneInvalid => "phoneInvalid",
            MessageKey::PhoneLen => "phoneLen",
            MessageKey::MsgLen => "msgLen",
        }
    }

    pub fn all() -> &'static [MessageKey] {
        &[
            MessageKey::Required,
            MessageKey::SelectRequired,
            MessageKey::MinLen,
            MessageKey::MaxLen,
            MessageKey::NameInvalid,
            MessageKey::NameLen,
            MessageKey::EmailInvalid,
            MessageKey::PhoneInvalid,
            MessageKey::PhoneLen,
            MessageKey::MsgLen,
        ]
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed rule: which message to show, and the length bound it refers to
/// (only set for `minLen`/`maxLen`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub key: MessageKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound: Option<usize>,
}

impl Violation {
    pub fn new(key: MessageKey) -> Self {
        Self { key, bound: None }
    }

    pub fn with_bound(key: MessageKey, bound: usize) -> Self {
        Self {
            key,
            bound: Some(bound),
        }
    }
}

impl From<MessageKey> for Violation {
    fn from(key: MessageKey) -> Self {
        Violation::new(key)
    }
}

/// Result of evaluating one validation rule
pub type Outcome = Result<(), Violation>;

/// Last-evaluated validity of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldState::Untouched => "untouched",
            FieldState::Valid => "valid",
            FieldState::Invalid => "invalid",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_inference_follows_kind_then_id() {
        assert_eq!(FieldRole::infer("telephone", FieldKind::Tel), FieldRole::Phone);
        assert_eq!(FieldRole::infer("courriel", FieldKind::Email), FieldRole::Email);
        assert_eq!(FieldRole::infer("message", FieldKind::Textarea), FieldRole::Message);
        assert_eq!(FieldRole::infer("prenom", FieldKind::Text), FieldRole::Name);
        assert_eq!(FieldRole::infer("Last_Name", FieldKind::Text), FieldRole::Name);
        assert_eq!(FieldRole::infer("company", FieldKind::Text), FieldRole::Generic);
        assert_eq!(FieldRole::infer("nom", FieldKind::Select), FieldRole::Generic);
    }

    #[test]
    fn buttons_and_hidden_inputs_are_not_candidates() {
        assert!(FieldKind::Text.is_candidate());
        assert!(FieldKind::Select.is_candidate());
        assert!(!FieldKind::Hidden.is_candidate());
        assert!(!FieldKind::Submit.is_candidate());
        assert!(!FieldKind::Reset.is_candidate());
        assert!(!FieldKind::Button.is_candidate());
    }

    #[test]
    fn message_keys_serialize_as_camel_case() {
        let json = serde_json::to_string(&MessageKey::SelectRequired).unwrap();
        assert_eq!(json, "\"selectRequired\"");
        for key in MessageKey::all() {
            let json = serde_json::to_string(key).unwrap();
            assert_eq!(json.trim_matches('"'), key.as_str());
        }
    }
}
