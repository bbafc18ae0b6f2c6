// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form schemas
//!
//! A schema is the static description of a form: which fields it has, their
//! HTML kind, and the `required`/`minlength`/`maxlength` attributes they
//! declare. Schemas load from YAML or JSON; the school's own contact form is
//! built in.

use crate::types::{FieldKind, FieldRole};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// One field of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub id: String,
    pub kind: FieldKind,
    /// Explicit validation role; inferred from `id` and `kind` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<FieldRole>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minlength: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<usize>,
    /// Whether the page carries a `data-error-for` element for this field.
    #[serde(default = "default_true")]
    pub error_slot: bool,
}

fn default_true() -> bool {
    true
}

impl FieldSchema {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
            role: None,
            required: false,
            minlength: None,
            maxlength: None,
            error_slot: kind.is_candidate(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn bounds(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.minlength = min;
        self.maxlength = max;
        self
    }

    pub fn with_role(mut self, role: FieldRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn without_error_slot(mut self) -> Self {
        self.error_slot = false;
        self
    }

    /// The role that selects this field's rule function.
    pub fn role(&self) -> FieldRole {
        self.role
            .unwrap_or_else(|| FieldRole::infer(&self.id, self.kind))
    }
}

/// A complete form description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub name: String,
    /// Id of the anti-spam trap field. Never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honeypot: Option<String>,
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// The contact form of the school site.
    pub fn contact() -> Self {
        Self {
            name: "contact".to_string(),
            honeypot: Some("bot-field".to_string()),
            fields: vec![
                FieldSchema::new("form-name", FieldKind::Hidden),
                FieldSchema::new("bot-field", FieldKind::Text).without_error_slot(),
                FieldSchema::new("prenom", FieldKind::Text)
                    .required()
                    .bounds(Some(2), Some(50)),
                FieldSchema::new("nom", FieldKind::Text)
                    .required()
                    .bounds(Some(2), Some(50)),
                FieldSchema::new("email", FieldKind::Email)
                    .required()
                    .bounds(None, Some(254)),
                FieldSchema::new("telephone", FieldKind::Tel).required(),
                FieldSchema::new("discipline", FieldKind::Select).required(),
                FieldSchema::new("age", FieldKind::Select).required(),
                FieldSchema::new("reference", FieldKind::Select).required(),
                FieldSchema::new("message", FieldKind::Textarea)
                    .required()
                    .bounds(Some(10), Some(2000)),
                FieldSchema::new("envoyer", FieldKind::Submit),
            ],
        }
    }

    /// Load a schema from a `.yaml`/`.yml` or JSON file and check it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading form schema {}", path.display()))?;
        let schema = if is_yaml(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
        .with_context(|| format!("parsing form schema {}", path.display()))?;
        Ok(schema)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let schema: FormSchema = serde_yaml::from_str(content)?;
        schema.check()?;
        Ok(schema)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let schema: FormSchema = serde_json::from_str(content)?;
        schema.check()?;
        Ok(schema)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject schemas a page could not represent.
    pub fn check(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.id.trim().is_empty() {
                bail!("form '{}' has a field with an empty id", self.name);
            }
            if !seen.insert(field.id.as_str()) {
                bail!("form '{}' declares field '{}' twice", self.name, field.id);
            }
            if let (Some(min), Some(max)) = (field.minlength, field.maxlength) {
                if min > max {
                    bail!(
                        "field '{}' has minlength {} greater than maxlength {}",
                        field.id,
                        min,
                        max
                    );
                }
            }
        }
        if let Some(honeypot) = &self.honeypot {
            if !seen.contains(honeypot.as_str()) {
                bail!("honeypot field '{}' is not declared", honeypot);
            }
        }
        Ok(())
    }

    pub fn field(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == id)
    }
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}
