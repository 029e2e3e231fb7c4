//! Next-word and word-completion prediction for a soft keyboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Context string  │ ← text before the cursor, supplied by the host
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Predictor      │ ← runs the tier cascade (predictor.rs)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Tiers          │ ← exact/fuzzy prefix, trigram, bigram, unigram (tier.rs)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  ModelStore     │ ← five immutable JSON-loaded tables (model.rs)
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - `model`: table loading with per-table failure isolation
//! - `casing`: capitalization recovery from observed surface forms
//! - `context`: tokenization and completion/next-word mode detection
//! - `tier`: the individual ranked lookup strategies
//! - `predictor`: the ordered cascade and public `predict` entry point
//! - `suggestion`: how a chosen candidate edits the host text
//! - `config`: persisted CLI settings

pub mod casing;
pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod predictor;
pub mod suggestion;
pub mod tier;

pub use casing::CaseHint;
pub use context::{Context, Mode};
pub use error::LoadError;
pub use model::{ModelSources, ModelStore, NestedTable, ScoreTable, TableKind};
pub use predictor::{Prediction, Predictor, DEFAULT_MAX_SUGGESTIONS};
pub use suggestion::{plan_insertion, Insertion, InsertionKind};
pub use tier::{default_tiers, Tier, TierKind};
