//! Recovers display casing for candidates drawn from lowercase models.

use crate::model::{rank_order, ModelStore, ScoreTable};

/// Whether the user started the current word with a capital letter.
///
/// Only completion tiers know this; next-word tiers always pass `AsStored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseHint {
    #[default]
    AsStored,
    StartUpper,
}

impl CaseHint {
    pub fn from_starts_with_upper(starts_with_upper: bool) -> Self {
        if starts_with_upper {
            Self::StartUpper
        } else {
            Self::AsStored
        }
    }
}

/// Resolve the display form of `word`.
///
/// The highest-scoring surface form from the capitalization table wins. An
/// all-uppercase form of two or more characters is an abbreviation and is
/// returned untouched whatever the hint says.
pub fn resolve(word: &str, hint: CaseHint, store: &ModelStore) -> String {
    let best = store
        .cap_pattern(&word.to_lowercase())
        .and_then(best_surface_form);

    match (best, hint) {
        (Some(form), _) if is_abbreviation(form) => form.to_string(),
        (Some(form), CaseHint::StartUpper) => capitalize_first(form),
        (Some(form), CaseHint::AsStored) => form.to_string(),
        (None, CaseHint::StartUpper) => capitalize_first(word),
        (None, CaseHint::AsStored) => word.to_string(),
    }
}

/// Highest-scoring surface form; ties go to the smallest form.
pub fn best_surface_form(patterns: &ScoreTable) -> Option<&str> {
    patterns
        .iter()
        .min_by(|a, b| rank_order(*a, *b))
        .map(|(form, _)| form.as_str())
}

pub fn is_abbreviation(form: &str) -> bool {
    form.chars().count() >= 2 && form.to_uppercase() == form
}

/// Uppercase the first character, leaving the rest as is.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
