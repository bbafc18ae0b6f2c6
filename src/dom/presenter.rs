// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error presentation
//!
//! Reflects a field verdict into the page: the `invalid` class on the
//! control, the message in its error-display element, and the field state.
//! Both operations are idempotent.

use super::FormSurface;
use crate::types::FieldState;

/// CSS class carried by a field whose last evaluation failed
pub const INVALID_CLASS: &str = "invalid";

/// Mark `id` invalid and show `message` next to it.
pub fn set_error<S: FormSurface + ?Sized>(surface: &mut S, id: &str, message: &str) {
    surface.add_class(id, INVALID_CLASS);
    surface.set_error_text(id, message);
    surface.set_state(id, FieldState::Invalid);
}

/// Mark `id` valid and empty its error-display element.
pub fn clear_error<S: FormSurface + ?Sized>(surface: &mut S, id: &str) {
    surface.remove_class(id, INVALID_CLASS);
    surface.set_error_text(id, "");
    surface.set_state(id, FieldState::Valid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Page;
    use crate::schema::FormSchema;

    #[test]
    fn set_then_clear_leaves_no_stale_text() {
        let mut page = Page::from_schema(&FormSchema::contact());
        set_error(&mut page, "email", "bad");
        assert!(page.has_class("email", INVALID_CLASS));
        assert_eq!(page.error_text("email"), Some("bad"));
        assert_eq!(page.state("email"), Some(FieldState::Invalid));

        clear_error(&mut page, "email");
        assert!(!page.has_class("email", INVALID_CLASS));
        assert_eq!(page.error_text("email"), Some(""));
        assert_eq!(page.state("email"), Some(FieldState::Valid));
    }

    #[test]
    fn repeated_calls_are_idempotent() {
        let mut page = Page::from_schema(&FormSchema::contact());
        set_error(&mut page, "nom", "x");
        let once = format!("{:?}", page.field("nom"));
        set_error(&mut page, "nom", "x");
        assert_eq!(format!("{:?}", page.field("nom")), once);

        clear_error(&mut page, "nom");
        let cleared = format!("{:?}", page.field("nom"));
        clear_error(&mut page, "nom");
        assert_eq!(format!("{:?}", page.field("nom")), cleared);
    }

    #[test]
    fn field_without_slot_still_gets_class() {
        let mut page = Page::from_schema(&FormSchema::contact());
        set_error(&mut page, "bot-field", "x");
        assert!(page.has_class("bot-field", INVALID_CLASS));
        assert_eq!(page.error_text("bot-field"), None);
    }
}
