//! Clause drafting for grouped citizen submissions.
//!
//! A [`ClauseGenerator`] picks the legal-clause template matching a
//! cluster's theme, fills its placeholders with parameters found in the
//! member submissions, and returns a [`peoplesbill_core::Clause`].
//! [`validate_clause`] checks any clause body for basic drafting form.

pub mod extract;
pub mod generator;
pub mod templates;
pub mod validate;

pub use extract::DraftParameters;
pub use generator::ClauseGenerator;
pub use templates::{CLAUSE_TEMPLATES, ClauseTemplate};
pub use validate::validate_clause;
