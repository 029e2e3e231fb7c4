//! Tokenizes the text before the cursor and decides what to predict.

use crate::casing::CaseHint;

/// What the engine is predicting for a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The last token is still being typed.
    Completion,
    /// The context ends at a word boundary (or is empty).
    NextWord,
}

/// A parsed context: tokens as typed, their lowercase copies, and the mode.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    tokens: Vec<&'a str>,
    lower: Vec<String>,
    mode: Mode,
}

impl<'a> Context<'a> {
    /// Trim the text, split it on spaces and pick the mode.
    ///
    /// Runs of spaces never produce empty tokens. The context is in
    /// completion mode when it does not end with a space and has at least one
    /// token.
    pub fn parse(text: &'a str) -> Self {
        let tokens: Vec<&str> = text
            .trim()
            .split(' ')
            .filter(|token| !token.is_empty())
            .collect();
        let lower = tokens.iter().map(|token| token.to_lowercase()).collect();
        let mode = if !text.ends_with(' ') && !tokens.is_empty() {
            Mode::Completion
        } else {
            Mode::NextWord
        };

        Self {
            tokens,
            lower,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Lowercase last token.
    pub fn last(&self) -> Option<&str> {
        self.lower.last().map(String::as_str)
    }

    /// Lowercase trigram key `"second_to_last last"`.
    pub fn pair_key(&self) -> Option<String> {
        match self.lower.as_slice() {
            [.., first, second] => Some(format!("{first} {second}")),
            _ => None,
        }
    }

    /// The lowercase in-progress word, in completion mode only.
    pub fn current_word(&self) -> Option<&str> {
        match self.mode {
            Mode::Completion => self.last(),
            Mode::NextWord => None,
        }
    }

    /// The in-progress word as typed, in completion mode only.
    pub fn original_word(&self) -> Option<&'a str> {
        match self.mode {
            Mode::Completion => self.tokens.last().copied(),
            Mode::NextWord => None,
        }
    }

    pub fn starts_with_upper(&self) -> bool {
        self.original_word()
            .and_then(|word| word.chars().next())
            .is_some_and(char::is_uppercase)
    }

    pub fn case_hint(&self) -> CaseHint {
        CaseHint::from_starts_with_upper(self.starts_with_upper())
    }
}
