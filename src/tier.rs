//! The ranked lookup strategies that make up the fallback cascade.
//!
//! Each tier answers with `None` when it does not apply to the context or
//! has no data for it. The predictor walks them in order and stops at the
//! first non-empty answer:
//!
//! ```text
//! completion mode:  ExactPrefix → FuzzyPrefix ─┐
//! next-word mode:   ───────────────────────────┴→ Trigram → Bigram → Unigram
//! ```
//!
//! When both completion tiers come up empty, the next-word tiers run on the
//! same tokens, so the partial last word is used as if it were complete.

use crate::casing::{self, CaseHint};
use crate::context::Context;
use crate::model::{rank_order, top_entries, ModelStore, ScoreTable};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    ExactPrefix,
    FuzzyPrefix,
    Trigram,
    Bigram,
    Unigram,
}

impl TierKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::ExactPrefix => "exact-prefix",
            Self::FuzzyPrefix => "fuzzy-prefix",
            Self::Trigram => "trigram",
            Self::Bigram => "bigram",
            Self::Unigram => "unigram",
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of the cascade.
pub trait Tier: Send + Sync {
    fn kind(&self) -> TierKind;

    /// Up to `limit` display-ready candidates, or `None` to defer to the
    /// next tier.
    fn try_predict(
        &self,
        context: &Context<'_>,
        store: &ModelStore,
        limit: usize,
    ) -> Option<Vec<String>>;
}

/// Prefix → completion lookup for the in-progress word.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactPrefixTier;

impl Tier for ExactPrefixTier {
    fn kind(&self) -> TierKind {
        TierKind::ExactPrefix
    }

    fn try_predict(
        &self,
        context: &Context<'_>,
        store: &ModelStore,
        limit: usize,
    ) -> Option<Vec<String>> {
        let current = context.current_word()?;
        let completions = store.completion(current)?;
        non_empty(resolve_all(
            top_entries(completions, limit),
            context.case_hint(),
            store,
        ))
    }
}

/// Unigram words that extend the in-progress word.
#[derive(Debug, Default, Clone, Copy)]
pub struct FuzzyPrefixTier;

impl Tier for FuzzyPrefixTier {
    fn kind(&self) -> TierKind {
        TierKind::FuzzyPrefix
    }

    fn try_predict(
        &self,
        context: &Context<'_>,
        store: &ModelStore,
        limit: usize,
    ) -> Option<Vec<String>> {
        let current = context.current_word()?;
        let mut matches: Vec<(&String, &f64)> = store
            .unigrams()
            .iter()
            .filter(|(word, _)| word.starts_with(current) && word.as_str() != current)
            .collect();
        matches.sort_by(|a, b| rank_order(*a, *b));
        matches.truncate(limit);

        let words = matches.into_iter().map(|(word, _)| word.as_str()).collect();
        non_empty(resolve_all(words, context.case_hint(), store))
    }
}

/// Next word after the last two tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrigramTier;

impl Tier for TrigramTier {
    fn kind(&self) -> TierKind {
        TierKind::Trigram
    }

    fn try_predict(
        &self,
        context: &Context<'_>,
        store: &ModelStore,
        limit: usize,
    ) -> Option<Vec<String>> {
        let key = context.pair_key()?;
        next_words(store.trigram(&key)?, store, limit)
    }
}

/// Next word after the last token.
#[derive(Debug, Default, Clone, Copy)]
pub struct BigramTier;

impl Tier for BigramTier {
    fn kind(&self) -> TierKind {
        TierKind::Bigram
    }

    fn try_predict(
        &self,
        context: &Context<'_>,
        store: &ModelStore,
        limit: usize,
    ) -> Option<Vec<String>> {
        let last = context.last()?;
        next_words(store.bigram(last)?, store, limit)
    }
}

/// Most frequent words overall. Always answers, possibly with nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnigramTier;

impl Tier for UnigramTier {
    fn kind(&self) -> TierKind {
        TierKind::Unigram
    }

    fn try_predict(
        &self,
        _context: &Context<'_>,
        store: &ModelStore,
        limit: usize,
    ) -> Option<Vec<String>> {
        Some(resolve_all(
            top_entries(store.unigrams(), limit),
            CaseHint::AsStored,
            store,
        ))
    }
}

/// The standard cascade, in priority order.
pub fn default_tiers() -> Vec<Box<dyn Tier>> {
    vec![
        Box::new(ExactPrefixTier),
        Box::new(FuzzyPrefixTier),
        Box::new(TrigramTier),
        Box::new(BigramTier),
        Box::new(UnigramTier),
    ]
}

fn next_words(table: &ScoreTable, store: &ModelStore, limit: usize) -> Option<Vec<String>> {
    non_empty(resolve_all(
        top_entries(table, limit),
        CaseHint::AsStored,
        store,
    ))
}

fn resolve_all(words: Vec<&str>, hint: CaseHint, store: &ModelStore) -> Vec<String> {
    words
        .into_iter()
        .map(|word| casing::resolve(word, hint, store))
        .collect()
}

fn non_empty(candidates: Vec<String>) -> Option<Vec<String>> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates)
    }
}
