// SPDX-License-Identifier: PMPL-1.0-or-later

//! Kwoon: contact-form validation for the school site.
//!
//! Cleans and checks what visitors type into the bilingual (French/English)
//! contact form, and reflects each verdict back into the page as a CSS
//! class plus a localized message next to the field.
//!
//! PIPELINE:
//! 1. **Sanitize**: Unicode normalization, whitespace collapsing, and
//!    role-specific cleanup (names, email, free text).
//! 2. **Validate**: one rule function per field role (phone, name, email,
//!    message, generic), short-circuiting at the first failure.
//! 3. **Present**: set or clear the `invalid` class and error text through
//!    a [`dom::FormSurface`].
//! 4. **Bind**: route submit/input/change/focusout events to the above.

pub mod dom;
pub mod events;
pub mod i18n;
pub mod logging;
pub mod report;
pub mod sanitize;
pub mod schema;
pub mod submission;
pub mod sweep;
pub mod types;
pub mod validate;
