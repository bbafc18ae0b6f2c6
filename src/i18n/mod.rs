// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation module for kwoon.
//!
//! The validator speaks the two languages of the school site:
//!
//! | Code | Language | Role     |
//! |------|----------|----------|
//! | fr   | French   | default  |
//! | en   | English  | alternate|
//!
//! Messages are keyed by [`MessageKey`](crate::types::MessageKey) rather than
//! dotted strings, so a missing translation is a compile-visible gap and the
//! parity test catches it. The catalog is static data, loaded once and
//! never mutated.
//!
//! The active language is always an explicit argument. Hosts resolve it from
//! the page's `lang` attribute with [`Lang::from_tag`].

mod catalog;

pub use catalog::{entries, render, t, Lang};
