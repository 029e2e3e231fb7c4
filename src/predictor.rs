//! The prediction engine: runs the tier cascade over a shared model store.
//!
//! `predict` is a pure read-only computation. It performs no I/O, keeps no
//! state between calls and can be called concurrently from any number of
//! threads through clones of the same [`Predictor`].

use crate::context::Context;
use crate::model::ModelStore;
use crate::tier::{default_tiers, Tier, TierKind};
use std::sync::Arc;
use tracing::debug;

/// Number of candidates a suggestion bar shows.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Candidates together with the tier that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prediction {
    /// `None` when no tier produced anything.
    pub tier: Option<TierKind>,
    pub candidates: Vec<String>,
}

#[derive(Clone)]
pub struct Predictor {
    store: Arc<ModelStore>,
    tiers: Arc<[Box<dyn Tier>]>,
}

impl Predictor {
    /// Predictor with the standard cascade.
    pub fn new(store: impl Into<Arc<ModelStore>>) -> Self {
        Self::with_tiers(store, default_tiers())
    }

    /// Predictor with a custom cascade, evaluated in the given order.
    pub fn with_tiers(store: impl Into<Arc<ModelStore>>, tiers: Vec<Box<dyn Tier>>) -> Self {
        Self {
            store: store.into(),
            tiers: tiers.into(),
        }
    }

    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    pub fn tiers(&self) -> impl Iterator<Item = TierKind> + '_ {
        self.tiers.iter().map(|tier| tier.kind())
    }

    /// Ranked display-ready candidates for the text before the cursor.
    ///
    /// # Arguments
    /// * `context` - Document text immediately preceding the cursor
    /// * `max_suggestions` - Upper bound on the number of candidates
    ///
    /// # Example
    /// ```rust
    /// use keyboard_predict::{ModelStore, Predictor};
    ///
    /// let store = ModelStore::new().with_unigrams([("лун", 5.0), ("аски", 3.0), ("ме", 9.0)]);
    /// let predictor = Predictor::new(store);
    /// assert_eq!(predictor.predict("", 3), vec!["ме", "лун", "аски"]);
    /// ```
    pub fn predict(&self, context: &str, max_suggestions: usize) -> Vec<String> {
        self.predict_with_tier(context, max_suggestions).candidates
    }

    pub fn predict_default(&self, context: &str) -> Vec<String> {
        self.predict(context, DEFAULT_MAX_SUGGESTIONS)
    }

    /// Like [`predict`](Self::predict), also reporting which tier answered.
    pub fn predict_with_tier(&self, context: &str, max_suggestions: usize) -> Prediction {
        if max_suggestions == 0 {
            return Prediction::default();
        }

        let parsed = Context::parse(context);
        for tier in self.tiers.iter() {
            match tier.try_predict(&parsed, &self.store, max_suggestions) {
                Some(candidates) if !candidates.is_empty() => {
                    debug!(
                        tier = %tier.kind(),
                        mode = ?parsed.mode(),
                        count = candidates.len(),
                        "prediction tier answered"
                    );
                    return Prediction {
                        tier: Some(tier.kind()),
                        candidates,
                    };
                }
                _ => {}
            }
        }

        debug!(mode = ?parsed.mode(), "no tier produced candidates");
        Prediction::default()
    }
}
