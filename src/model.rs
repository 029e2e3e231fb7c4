//! Model loading and storage for the prediction engine.
//!
//! The engine reads five precomputed tables:
//! - **Unigram**: word → frequency score, the global fallback
//! - **Bigram**: previous word → next word → score
//! - **Trigram**: `"word1 word2"` → next word → score
//! - **Completion**: typed prefix → completed word → score
//! - **Capitalization patterns**: lowercase word → surface form → score
//!
//! # Resource Format
//!
//! Every table is a JSON object. The unigram table is flat, the others are
//! nested one level:
//! ```text
//! unigram_probs.json      {"ме": 0.031, "лун": 0.004}
//! bigram_probs.json       {"ме": {"кӧсъя": 0.12, "муньӧ": 0.08}}
//! cap_patterns_probs.json {"асс": {"АСС": 1.0}}
//! ```
//!
//! # Partial Failure
//!
//! Each table is loaded on its own. A missing or malformed resource leaves
//! that one table empty and the rest load normally, so a store can always be
//! constructed, even a completely empty one.

use crate::error::LoadError;
use ahash::AHashMap;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Word (or surface form) → score.
pub type ScoreTable = AHashMap<String, f64>;

/// Lookup key → inner score table.
pub type NestedTable = AHashMap<String, ScoreTable>;

pub const UNIGRAM_FILE: &str = "unigram_probs.json";
pub const BIGRAM_FILE: &str = "bigram_probs.json";
pub const TRIGRAM_FILE: &str = "trigram_probs.json";
pub const COMPLETION_FILE: &str = "completion_probs.json";
pub const CAP_PATTERN_FILE: &str = "cap_patterns_probs.json";

/// Identifies one of the five model tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Unigram,
    Bigram,
    Trigram,
    Completion,
    CapPattern,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Unigram,
        TableKind::Bigram,
        TableKind::Trigram,
        TableKind::Completion,
        TableKind::CapPattern,
    ];

    /// Default resource file name inside a model directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Unigram => UNIGRAM_FILE,
            Self::Bigram => BIGRAM_FILE,
            Self::Trigram => TRIGRAM_FILE,
            Self::Completion => COMPLETION_FILE,
            Self::CapPattern => CAP_PATTERN_FILE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unigram => "unigram",
            Self::Bigram => "bigram",
            Self::Trigram => "trigram",
            Self::Completion => "completion",
            Self::CapPattern => "cap_pattern",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where each table should be read from. `None` means the table is not
/// supplied at all and stays empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSources {
    pub unigram: Option<PathBuf>,
    pub bigram: Option<PathBuf>,
    pub trigram: Option<PathBuf>,
    pub completion: Option<PathBuf>,
    pub cap_pattern: Option<PathBuf>,
}

impl ModelSources {
    /// Point every table at its default file name inside `dir`.
    ///
    /// # Example
    /// ```rust
    /// let sources = keyboard_predict::ModelSources::from_dir("models");
    /// assert!(sources.unigram.unwrap().ends_with("unigram_probs.json"));
    /// ```
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            unigram: Some(dir.join(TableKind::Unigram.file_name())),
            bigram: Some(dir.join(TableKind::Bigram.file_name())),
            trigram: Some(dir.join(TableKind::Trigram.file_name())),
            completion: Some(dir.join(TableKind::Completion.file_name())),
            cap_pattern: Some(dir.join(TableKind::CapPattern.file_name())),
        }
    }

    pub fn path(&self, kind: TableKind) -> Option<&Path> {
        match kind {
            TableKind::Unigram => self.unigram.as_deref(),
            TableKind::Bigram => self.bigram.as_deref(),
            TableKind::Trigram => self.trigram.as_deref(),
            TableKind::Completion => self.completion.as_deref(),
            TableKind::CapPattern => self.cap_pattern.as_deref(),
        }
    }
}

/// The five immutable lookup tables backing the predictor.
///
/// All lookup keys are lowercase. Inner keys keep the casing they were
/// stored with, since completion and capitalization data record surface
/// forms.
#[derive(Debug, Clone, Default)]
pub struct ModelStore {
    unigrams: ScoreTable,
    bigrams: NestedTable,
    trigrams: NestedTable,
    completions: NestedTable,
    cap_patterns: NestedTable,
}

impl ModelStore {
    /// An empty store. Every tier degrades to nothing and
    /// [`Predictor::predict`](crate::Predictor::predict) returns no candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every table named in `sources`.
    ///
    /// Never fails: each table is read by its own scoped load and any error
    /// is logged and replaced by an empty table.
    ///
    /// # Example
    /// ```rust,no_run
    /// use keyboard_predict::{ModelSources, ModelStore};
    ///
    /// let store = ModelStore::load(&ModelSources::from_dir("models"));
    /// println!("{} words", store.len(keyboard_predict::TableKind::Unigram));
    /// ```
    pub fn load(sources: &ModelSources) -> Self {
        let store = Self {
            unigrams: load_or_empty(TableKind::Unigram, sources, read_flat),
            bigrams: load_or_empty(TableKind::Bigram, sources, read_nested),
            trigrams: load_or_empty(TableKind::Trigram, sources, read_nested),
            completions: load_or_empty(TableKind::Completion, sources, read_nested),
            cap_patterns: load_or_empty(TableKind::CapPattern, sources, read_nested),
        };
        store.log_summary();
        store
    }

    /// Shorthand for `load(&ModelSources::from_dir(dir))`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        Self::load(&ModelSources::from_dir(dir))
    }

    /// Build a store from in-memory JSON documents, one per table.
    ///
    /// A `None` or undecodable document leaves its table empty, the same as
    /// a missing or malformed file.
    pub fn from_json_strs(
        unigram: Option<&str>,
        bigram: Option<&str>,
        trigram: Option<&str>,
        completion: Option<&str>,
        cap_pattern: Option<&str>,
    ) -> Self {
        fn decode<T>(
            kind: TableKind,
            json: Option<&str>,
            parse: fn(&str) -> Result<T, serde_json::Error>,
        ) -> T
        where
            T: Default,
        {
            match json.map(parse) {
                Some(Ok(table)) => table,
                Some(Err(err)) => {
                    warn!(table = %kind, error = %err, "malformed model data; table left empty");
                    T::default()
                }
                None => T::default(),
            }
        }

        let store = Self {
            unigrams: decode(TableKind::Unigram, unigram, parse_flat),
            bigrams: decode(TableKind::Bigram, bigram, parse_nested),
            trigrams: decode(TableKind::Trigram, trigram, parse_nested),
            completions: decode(TableKind::Completion, completion, parse_nested),
            cap_patterns: decode(TableKind::CapPattern, cap_pattern, parse_nested),
        };
        store.log_summary();
        store
    }

    fn log_summary(&self) {
        info!(
            unigrams = self.unigrams.len(),
            bigrams = self.bigrams.len(),
            trigrams = self.trigrams.len(),
            completions = self.completions.len(),
            cap_patterns = self.cap_patterns.len(),
            "prediction models loaded"
        );
    }

    pub fn with_unigrams<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.unigrams = normalize_flat(entries);
        self
    }

    pub fn with_bigrams<I, K, J, W>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, J)>,
        K: Into<String>,
        J: IntoIterator<Item = (W, f64)>,
        W: Into<String>,
    {
        self.bigrams = normalize_nested(entries);
        self
    }

    pub fn with_trigrams<I, K, J, W>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, J)>,
        K: Into<String>,
        J: IntoIterator<Item = (W, f64)>,
        W: Into<String>,
    {
        self.trigrams = normalize_nested(entries);
        self
    }

    pub fn with_completions<I, K, J, W>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, J)>,
        K: Into<String>,
        J: IntoIterator<Item = (W, f64)>,
        W: Into<String>,
    {
        self.completions = normalize_nested(entries);
        self
    }

    pub fn with_cap_patterns<I, K, J, W>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, J)>,
        K: Into<String>,
        J: IntoIterator<Item = (W, f64)>,
        W: Into<String>,
    {
        self.cap_patterns = normalize_nested(entries);
        self
    }

    pub fn unigrams(&self) -> &ScoreTable {
        &self.unigrams
    }

    /// Next-word scores after `previous` (lowercase).
    pub fn bigram(&self, previous: &str) -> Option<&ScoreTable> {
        self.bigrams.get(previous)
    }

    /// Next-word scores after the lowercase pair key `"word1 word2"`.
    pub fn trigram(&self, pair: &str) -> Option<&ScoreTable> {
        self.trigrams.get(pair)
    }

    pub fn completion(&self, prefix: &str) -> Option<&ScoreTable> {
        self.completions.get(prefix)
    }

    pub fn cap_pattern(&self, word: &str) -> Option<&ScoreTable> {
        self.cap_patterns.get(word)
    }

    /// Number of top-level entries in a table.
    pub fn len(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Unigram => self.unigrams.len(),
            TableKind::Bigram => self.bigrams.len(),
            TableKind::Trigram => self.trigrams.len(),
            TableKind::Completion => self.completions.len(),
            TableKind::CapPattern => self.cap_patterns.len(),
        }
    }

    /// True when no table has any data.
    pub fn is_empty(&self) -> bool {
        TableKind::ALL.iter().all(|&kind| self.len(kind) == 0)
    }
}

/// Ranking order shared by every tier: score descending, then key ascending.
pub(crate) fn rank_order(a: (&String, &f64), b: (&String, &f64)) -> Ordering {
    b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0))
}

/// Keys of `table` in ranking order, at most `limit` of them.
pub(crate) fn top_entries(table: &ScoreTable, limit: usize) -> Vec<&str> {
    let mut entries: Vec<(&String, &f64)> = table.iter().collect();
    entries.sort_by(|a, b| rank_order(*a, *b));
    entries.truncate(limit);
    entries.into_iter().map(|(key, _)| key.as_str()).collect()
}

fn load_or_empty<T: Default>(
    kind: TableKind,
    sources: &ModelSources,
    read: fn(&Path) -> Result<T, LoadError>,
) -> T {
    let Some(path) = sources.path(kind) else {
        debug!(table = %kind, "no source configured; table left empty");
        return T::default();
    };

    match read(path) {
        Ok(table) => table,
        Err(err) if err.is_missing() => {
            warn!(table = %kind, path = %path.display(), "model resource missing; table left empty");
            T::default()
        }
        Err(err) => {
            warn!(table = %kind, error = %err, "failed to load model; table left empty");
            T::default()
        }
    }
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn read_flat(path: &Path) -> Result<ScoreTable, LoadError> {
    let text = read_source(path)?;
    parse_flat(&text).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn read_nested(path: &Path) -> Result<NestedTable, LoadError> {
    let text = read_source(path)?;
    parse_nested(&text).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a `{string: number}` document.
pub fn parse_flat(json: &str) -> Result<ScoreTable, serde_json::Error> {
    let raw: HashMap<String, f64> = serde_json::from_str(json)?;
    Ok(normalize_flat(raw))
}

/// Decode a `{string: {string: number}}` document.
pub fn parse_nested(json: &str) -> Result<NestedTable, serde_json::Error> {
    let raw: HashMap<String, HashMap<String, f64>> = serde_json::from_str(json)?;
    Ok(normalize_nested(raw))
}

fn valid_score(key: &str, score: f64) -> bool {
    let valid = score.is_finite() && score >= 0.0;
    if !valid {
        debug!(key, score, "dropping entry with unusable score");
    }
    valid
}

/// Insert keeping the higher score when a key repeats.
fn insert_max(table: &mut ScoreTable, key: String, score: f64) {
    table
        .entry(key)
        .and_modify(|existing| *existing = existing.max(score))
        .or_insert(score);
}

fn normalize_flat<I, K>(entries: I) -> ScoreTable
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    let mut table = ScoreTable::new();
    for (key, score) in entries {
        let key = key.into();
        if valid_score(&key, score) {
            insert_max(&mut table, key.to_lowercase(), score);
        }
    }
    table
}

fn normalize_nested<I, K, J, W>(entries: I) -> NestedTable
where
    I: IntoIterator<Item = (K, J)>,
    K: Into<String>,
    J: IntoIterator<Item = (W, f64)>,
    W: Into<String>,
{
    let mut table = NestedTable::new();
    for (key, inner) in entries {
        let slot = table.entry(key.into().to_lowercase()).or_default();
        for (word, score) in inner {
            let word = word.into();
            if valid_score(&word, score) {
                insert_max(slot, word, score);
            }
        }
    }
    table.retain(|_, inner| !inner.is_empty());
    table
}
