//! Fragment sanitizer for vitrine.
//!
//! Removes document-level boilerplate (footers, attribution credits) from
//! independently authored component fragments and neutralizes hard-coded
//! dark backgrounds so each fragment inherits its card's background.

pub mod markup;
pub mod rules;
pub mod sanitizer;

pub use rules::SanitizeRules;
pub use sanitizer::{strip_first_footer, SanitizeError, Sanitizer};
