// SPDX-License-Identifier: PMPL-1.0-or-later

//! Scripted event replay
//!
//! Drives a [`FormController`] from a recorded list of steps, so a typing
//! session can be reproduced outside a browser:
//!
//! ```yaml
//! - on: input
//!   field: nom
//!   value: "Wong"
//! - on: focusout
//!   field: nom
//! - on: submit
//! ```

use super::{Dispatch, FormController, FormEvent};
use crate::dom::FormSurface;
use crate::schema::is_yaml;
use crate::types::FieldState;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Input,
    Change,
    FocusOut,
    Submit,
}

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStep {
    pub on: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// New raw value of `field`, set before the event fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ReplayStep {
    pub fn event(&self) -> Result<FormEvent> {
        let field = || {
            self.field
                .clone()
                .with_context(|| format!("'{:?}' step needs a field", self.on))
        };
        Ok(match self.on {
            StepKind::Submit => FormEvent::Submit,
            StepKind::Input => FormEvent::Input(field()?),
            StepKind::Change => FormEvent::Change(field()?),
            StepKind::FocusOut => FormEvent::FocusOut(field()?),
        })
    }
}

/// Field states after a step, keyed by field id in document order.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub event: String,
    pub dispatch: Dispatch,
    pub states: Vec<(String, FieldState)>,
}

pub fn load_script(path: &Path) -> Result<Vec<ReplayStep>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading replay script {}", path.display()))?;
    let steps: Vec<ReplayStep> = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    if steps.is_empty() {
        bail!("replay script {} has no steps", path.display());
    }
    Ok(steps)
}

/// Apply every step in order and record what each one did.
pub fn replay<S: FormSurface>(
    controller: &mut FormController<S>,
    steps: &[ReplayStep],
) -> Result<Vec<StepOutcome>> {
    let mut outcomes = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let event = step
            .event()
            .with_context(|| format!("replay step {}", index + 1))?;
        if let (Some(field), Some(value)) = (event.target(), &step.value) {
            controller.surface_mut().set_value(field, value);
        }
        let dispatch = controller.dispatch(&event);
        let surface = controller.surface();
        let states = surface
            .field_ids()
            .into_iter()
            .filter_map(|id| surface.state(&id).map(|state| (id, state)))
            .collect();
        outcomes.push(StepOutcome {
            step: index + 1,
            event: event.to_string(),
            dispatch,
            states,
        });
    }
    Ok(outcomes)
}
