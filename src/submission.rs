// SPDX-License-Identifier: PMPL-1.0-or-later

//! Recorded form submissions
//!
//! A submission is the flat `field id -> raw value` map a form post carries,
//! stored as JSON or YAML. Exports from the French site are sometimes
//! Windows-1252 rather than UTF-8, so decoding falls back to that.

use crate::schema::is_yaml;
use anyhow::{Context, Result};
use encoding_rs::{Encoding, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    pub values: BTreeMap<String, String>,
}

/// Scalars a hand-written submission may contain
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl RawScalar {
    fn into_text(self) -> String {
        match self {
            RawScalar::Text(s) => s,
            RawScalar::Int(n) => n.to_string(),
            RawScalar::Float(n) => n.to_string(),
            RawScalar::Bool(b) => b.to_string(),
        }
    }
}

type RawMap = BTreeMap<String, Option<RawScalar>>;

impl Submission {
    /// Read a submission file, decoding it as UTF-8 (with or without a
    /// byte-order mark) or Windows-1252.
    pub fn load(path: &Path) -> Result<Self> {
        let raw_bytes =
            fs::read(path).with_context(|| format!("reading submission {}", path.display()))?;
        let content = decode(raw_bytes);
        if is_yaml(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
        .with_context(|| format!("parsing submission {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawMap = serde_json::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawMap = serde_yaml::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawMap) -> Self {
        let values = raw
            .into_iter()
            .map(|(id, value)| (id, value.map(RawScalar::into_text).unwrap_or_default()))
            .collect();
        Self { values }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    /// `(id, value)` pairs, ready for [`Page::fill`](crate::dom::Page::fill).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decode by byte-order mark when there is one, else as UTF-8, else as
/// Windows-1252.
fn decode(raw_bytes: Vec<u8>) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(&raw_bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&raw_bytes[bom_len..]);
        return text.into_owned();
    }
    match String::from_utf8(raw_bytes) {
        Ok(s) => s,
        // Every byte has a Windows-1252 mapping, so this cannot fail.
        Err(err) => WINDOWS_1252.decode(err.as_bytes()).0.into_owned(),
    }
}
