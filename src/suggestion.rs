//! Turns a tapped candidate into the text edit the host document should make.
//!
//! A completion replaces the word being typed; a next-word prediction is
//! appended after it. The distinction is recovered by re-running the
//! predictor on the in-progress word and checking whether its candidates
//! extend that word.

use crate::predictor::{Predictor, DEFAULT_MAX_SUGGESTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionKind {
    /// Replaces the partially typed last word.
    Completion,
    /// Adds a new word after the context.
    NextWord,
}

/// Characters to delete behind the cursor, then text to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub kind: InsertionKind,
    pub delete_backward: usize,
    pub text: String,
}

impl Insertion {
    /// Apply the edit to `context` as if the cursor sat at its end.
    pub fn apply_to(&self, context: &str) -> String {
        let keep = context
            .char_indices()
            .rev()
            .nth(self.delete_backward.saturating_sub(1))
            .map(|(idx, _)| idx);
        let kept = match (self.delete_backward, keep) {
            (0, _) => context,
            (_, Some(idx)) => &context[..idx],
            (_, None) => "",
        };
        format!("{kept}{}", self.text)
    }
}

/// Plan how to insert `chosen` into a document whose text before the cursor
/// is `context`.
///
/// # Example
/// ```rust
/// use keyboard_predict::{plan_insertion, InsertionKind, ModelStore, Predictor};
///
/// let store = ModelStore::new().with_completions([("ко", vec![("коми", 1.0)])]);
/// let predictor = Predictor::new(store);
/// let insertion = plan_insertion("ме ко", "коми", &predictor);
/// assert_eq!(insertion.kind, InsertionKind::Completion);
/// assert_eq!(insertion.apply_to("ме ко"), "ме коми ");
/// ```
pub fn plan_insertion(context: &str, chosen: &str, predictor: &Predictor) -> Insertion {
    let typed = match context.trim().split(' ').rev().find(|word| !word.is_empty()) {
        Some(word) if !context.ends_with(' ') => word,
        _ => {
            return Insertion {
                kind: InsertionKind::NextWord,
                delete_backward: 0,
                text: format!("{chosen} "),
            };
        }
    };
    let current = typed.to_lowercase();

    let extends_current = predictor
        .predict(&current, DEFAULT_MAX_SUGGESTIONS)
        .iter()
        .any(|candidate| candidate.to_lowercase().starts_with(&current));

    if extends_current {
        Insertion {
            kind: InsertionKind::Completion,
            // Lowercasing can change the char count, so count the word as typed.
            delete_backward: typed.chars().count(),
            text: format!("{chosen} "),
        }
    } else {
        Insertion {
            kind: InsertionKind::NextWord,
            delete_backward: 0,
            text: format!(" {chosen} "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelStore;

    fn predictor() -> Predictor {
        Predictor::new(
            ModelStore::new()
                .with_unigrams([("лун", 5.0), ("лунтыр", 1.0), ("ме", 9.0)])
                .with_bigrams([("ме", vec![("кӧсъя", 3.0)])])
                .with_completions([("ко", vec![("коми", 4.0)])]),
        )
    }

    #[test]
    fn test_trailing_space_appends() {
        let insertion = plan_insertion("ме ", "кӧсъя", &predictor());
        assert_eq!(insertion.kind, InsertionKind::NextWord);
        assert_eq!(insertion.delete_backward, 0);
        assert_eq!(insertion.apply_to("ме "), "ме кӧсъя ");
    }

    #[test]
    fn test_empty_context_appends() {
        let insertion = plan_insertion("", "Ме", &predictor());
        assert_eq!(insertion.kind, InsertionKind::NextWord);
        assert_eq!(insertion.apply_to(""), "Ме ");
    }

    #[test]
    fn test_completion_replaces_current_word() {
        let insertion = plan_insertion("Тэ Ко", "Коми", &predictor());
        assert_eq!(insertion.kind, InsertionKind::Completion);
        assert_eq!(insertion.delete_backward, 2);
        assert_eq!(insertion.apply_to("Тэ Ко"), "Тэ Коми ");
    }

    #[test]
    fn test_fuzzy_completion_replaces_current_word() {
        let insertion = plan_insertion("лу", "лун", &predictor());
        assert_eq!(insertion.kind, InsertionKind::Completion);
        assert_eq!(insertion.apply_to("лу"), "лун ");
    }

    #[test]
    fn test_complete_word_gets_next_word() {
        // No candidate extends "ме", so the choice follows it.
        let insertion = plan_insertion("ме", "кӧсъя", &predictor());
        assert_eq!(insertion.kind, InsertionKind::NextWord);
        assert_eq!(insertion.apply_to("ме"), "ме кӧсъя ");
    }

    #[test]
    fn test_completion_deletes_typed_length() {
        let predictor = Predictor::new(
            ModelStore::new().with_completions([("i\u{307}s", vec![("İstanbul", 1.0)])]),
        );
        let insertion = plan_insertion("ме İs", "İstanbul", &predictor);
        assert_eq!(insertion.kind, InsertionKind::Completion);
        assert_eq!(insertion.delete_backward, 2);
        assert_eq!(insertion.apply_to("ме İs"), "ме İstanbul ");
    }

    #[test]
    fn test_apply_to_counts_chars_not_bytes() {
        let insertion = Insertion {
            kind: InsertionKind::Completion,
            delete_backward: 3,
            text: "ӧ".to_string(),
        };
        assert_eq!(insertion.apply_to("кӧсъ"), "кӧ");
        let overshoot = Insertion {
            delete_backward: 10,
            ..insertion
        };
        assert_eq!(overshoot.apply_to("кӧсъ"), "ӧ");
    }
}
