// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-role validation rules
//!
//! Every function here is pure: it takes an already-sanitized value and the
//! field's schema and returns the first failing check.
//!
//! Lengths are counted in characters (Unicode scalar values), not bytes or
//! UTF-16 code units: an emoji counts as one.

use crate::sanitize::phone_digits;
use crate::schema::FieldSchema;
use crate::types::{FieldKind, FieldRole, MessageKey, Outcome, Violation};
use regex::Regex;
use std::sync::LazyLock;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 2000;
pub const EMAIL_MIN_CHARS: usize = 6;
pub const EMAIL_MAX_CHARS: usize = 254;

/// `local@domain.tld` with a TLD of at least two characters.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());

static NAME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ' -]+$").unwrap());

/// NANP: optional country code 1, area code and exchange both start 2-9.
static NANP_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1?[2-9][0-9]{2}[2-9][0-9]{6}$").unwrap());

/// Evaluate every rule that applies to `field`, stopping at the first
/// failure.
pub fn check(value: &str, field: &FieldSchema) -> Outcome {
    let role = field.role();

    // The phone rule owns the whole decision, including emptiness.
    if role == FieldRole::Phone {
        return phone(value, field.required);
    }

    if value.is_empty() {
        return if !field.required {
            Ok(())
        } else if field.kind == FieldKind::Select {
            Err(MessageKey::SelectRequired.into())
        } else {
            Err(MessageKey::Required.into())
        };
    }

    match role {
        FieldRole::Email => email(value)?,
        FieldRole::Name => name(value)?,
        FieldRole::Message => message(value)?,
        FieldRole::Phone | FieldRole::Generic => {}
    }

    declared_bounds(value, field)
}

/// Telephone rule.
pub fn phone(value: &str, required: bool) -> Outcome {
    if value.is_empty() {
        return if required {
            Err(MessageKey::Required.into())
        } else {
            Ok(())
        };
    }
    let digits = phone_digits(value);
    if digits.is_empty() {
        return Err(MessageKey::PhoneInvalid.into());
    }
    if !NANP_DIGITS.is_match(&digits) {
        return Err(MessageKey::PhoneLen.into());
    }
    Ok(())
}

pub fn email(value: &str) -> Outcome {
    let len = value.chars().count();
    if !(EMAIL_MIN_CHARS..=EMAIL_MAX_CHARS).contains(&len) || !EMAIL_SHAPE.is_match(value) {
        return Err(MessageKey::EmailInvalid.into());
    }
    Ok(())
}

pub fn name(value: &str) -> Outcome {
    if !NAME_SHAPE.is_match(value) {
        return Err(MessageKey::NameInvalid.into());
    }
    let len = value.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(MessageKey::NameLen.into());
    }
    Ok(())
}

pub fn message(value: &str) -> Outcome {
    let len = value.chars().count();
    if !(MESSAGE_MIN_CHARS..=MESSAGE_MAX_CHARS).contains(&len) {
        return Err(MessageKey::MsgLen.into());
    }
    Ok(())
}

/// The field's own `minlength`/`maxlength` attributes.
pub fn declared_bounds(value: &str, field: &FieldSchema) -> Outcome {
    let len = value.chars().count();
    if let Some(min) = field.minlength {
        if len < min {
            return Err(Violation::with_bound(MessageKey::MinLen, min));
        }
    }
    if let Some(max) = field.maxlength {
        if len > max {
            return Err(Violation::with_bound(MessageKey::MaxLen, max));
        }
    }
    Ok(())
}
