// SPDX-License-Identifier: PMPL-1.0-or-later

//! Page model
//!
//! The validator never touches a concrete document. It talks to a
//! [`FormSurface`]: field values, CSS classes, the paired error-display
//! element of each field (`data-error-for`), and the page's `lang`
//! attribute. [`Page`] is the in-memory implementation used by the CLI and
//! the tests; a browser binding would implement the same trait over
//! `web-sys` nodes.
//!
//! A surface must tolerate malformed pages: writes to a field or error slot
//! that does not exist are no-ops and reads return `None`.

pub mod presenter;

use crate::schema::{FieldSchema, FormSchema};
use crate::types::FieldState;
use std::collections::{BTreeMap, BTreeSet};

pub use presenter::{clear_error, set_error, INVALID_CLASS};

/// What the validator needs from a host document
pub trait FormSurface {
    /// Raw `lang` attribute of the document element.
    fn lang_attr(&self) -> Option<&str>;

    /// Ids of every field in document order, candidates or not.
    fn field_ids(&self) -> Vec<String>;

    fn schema(&self, id: &str) -> Option<&FieldSchema>;

    fn honeypot(&self) -> Option<&str>;

    fn value(&self, id: &str) -> Option<&str>;

    fn set_value(&mut self, id: &str, value: &str);

    fn has_class(&self, id: &str, class: &str) -> bool;

    fn add_class(&mut self, id: &str, class: &str);

    fn remove_class(&mut self, id: &str, class: &str);

    /// Text of the field's error-display element, if the page has one.
    fn error_text(&self, id: &str) -> Option<&str>;

    fn set_error_text(&mut self, id: &str, text: &str);

    fn state(&self, id: &str) -> Option<FieldState>;

    fn set_state(&mut self, id: &str, state: FieldState);
}

/// A live form control
#[derive(Debug, Clone)]
pub struct FieldNode {
    pub schema: FieldSchema,
    pub value: String,
    pub classes: BTreeSet<String>,
    pub state: FieldState,
}

impl FieldNode {
    fn new(schema: FieldSchema) -> Self {
        Self {
            schema,
            value: String::new(),
            classes: BTreeSet::new(),
            state: FieldState::Untouched,
        }
    }
}

/// The element a field's error text is written into
#[derive(Debug, Clone, Default)]
pub struct ErrorSlot {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct FormNode {
    pub name: String,
    pub honeypot: Option<String>,
    pub fields: Vec<FieldNode>,
    /// Keyed by the field id the slot is associated with.
    pub error_slots: BTreeMap<String, ErrorSlot>,
}

/// In-memory document holding one form
#[derive(Debug, Clone)]
pub struct Page {
    pub lang: Option<String>,
    pub form: FormNode,
}

impl Page {
    /// Build an empty page for a schema, with one error slot per field that
    /// declares one.
    pub fn from_schema(schema: &FormSchema) -> Self {
        let error_slots = schema
            .fields
            .iter()
            .filter(|f| f.error_slot)
            .map(|f| (f.id.clone(), ErrorSlot::default()))
            .collect();
        let fields = schema.fields.iter().cloned().map(FieldNode::new).collect();

        Self {
            lang: None,
            form: FormNode {
                name: schema.name.clone(),
                honeypot: schema.honeypot.clone(),
                fields,
                error_slots,
            },
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set raw values as typed by a user, without validating.
    ///
    /// Ids the form does not have are skipped.
    pub fn fill<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (id, value) in values {
            match self.field_mut(id) {
                Some(node) => node.value = value.to_string(),
                None => tracing::debug!(field = id, "ignoring value for unknown field"),
            }
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldNode> {
        self.form.fields.iter().find(|f| f.schema.id == id)
    }

    fn field_mut(&mut self, id: &str) -> Option<&mut FieldNode> {
        self.form.fields.iter_mut().find(|f| f.schema.id == id)
    }
}

impl FormSurface for Page {
    fn lang_attr(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    fn field_ids(&self) -> Vec<String> {
        self.form
            .fields
            .iter()
            .map(|f| f.schema.id.clone())
            .collect()
    }

    fn schema(&self, id: &str) -> Option<&FieldSchema> {
        self.field(id).map(|f| &f.schema)
    }

    fn honeypot(&self) -> Option<&str> {
        self.form.honeypot.as_deref()
    }

    fn value(&self, id: &str) -> Option<&str> {
        self.field(id).map(|f| f.value.as_str())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(node) = self.field_mut(id) {
            if node.value != value {
                node.value = value.to_string();
            }
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.field(id)
            .map(|f| f.classes.contains(class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(node) = self.field_mut(id) {
            node.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(node) = self.field_mut(id) {
            node.classes.remove(class);
        }
    }

    fn error_text(&self, id: &str) -> Option<&str> {
        self.form.error_slots.get(id).map(|slot| slot.text.as_str())
    }

    fn set_error_text(&mut self, id: &str, text: &str) {
        if let Some(slot) = self.form.error_slots.get_mut(id) {
            slot.text = text.to_string();
        }
    }

    fn state(&self, id: &str) -> Option<FieldState> {
        self.field(id).map(|f| f.state)
    }

    fn set_state(&mut self, id: &str, state: FieldState) {
        if let Some(node) = self.field_mut(id) {
            node.state = state;
        }
    }
}
