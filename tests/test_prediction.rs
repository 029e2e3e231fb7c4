use keyboard_predict::model::{
    BIGRAM_FILE, CAP_PATTERN_FILE, COMPLETION_FILE, TRIGRAM_FILE, UNIGRAM_FILE,
};
use keyboard_predict::{ModelStore, Predictor, TableKind, TierKind};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_models(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in files {
        fs::write(dir.path().join(name), body).unwrap();
    }
    dir
}

fn predictor_from(dir: &Path) -> Predictor {
    Predictor::new(ModelStore::load_dir(dir))
}

#[test]
fn test_unigram_ranking_from_files() {
    let dir = write_models(&[(UNIGRAM_FILE, r#"{"лун": 5.0, "аски": 3.0, "ме": 9.0}"#)]);
    let predictor = predictor_from(dir.path());
    assert_eq!(predictor.predict("", 3), vec!["ме", "лун", "аски"]);
    assert_eq!(predictor.predict("   ", 3), vec!["ме", "лун", "аски"]);
    assert_eq!(predictor.predict("", 2), vec!["ме", "лун"]);
}

#[test]
fn test_completion_table_beats_unigram_prefix_matches() {
    let dir = write_models(&[
        (UNIGRAM_FILE, r#"{"коркө": 50.0, "кос": 40.0}"#),
        (COMPLETION_FILE, r#"{"ко": {"коми": 1.0, "колӧ": 0.5}}"#),
    ]);
    let predictor = predictor_from(dir.path());
    let prediction = predictor.predict_with_tier("ко", 3);
    assert_eq!(prediction.tier, Some(TierKind::ExactPrefix));
    assert_eq!(prediction.candidates, vec!["коми", "колӧ"]);
}

#[test]
fn test_trigram_preferred_over_bigram() {
    let dir = write_models(&[
        (BIGRAM_FILE, r#"{"кӧсъя": {"вӧччыны": 10.0}}"#),
        (TRIGRAM_FILE, r#"{"ме кӧсъя": {"мунны": 0.1}}"#),
    ]);
    let predictor = predictor_from(dir.path());
    assert_eq!(predictor.predict("ме кӧсъя ", 3), vec!["мунны"]);
    assert_eq!(predictor.predict("Ме Кӧсъя ", 3), vec!["мунны"]);
}

#[test]
fn test_capitalized_completion_is_not_doubled() {
    let dir = write_models(&[
        (UNIGRAM_FILE, r#"{"ме": 9.0}"#),
        (CAP_PATTERN_FILE, r#"{"ме": {"Ме": 2.0, "ме": 1.0}}"#),
    ]);
    let predictor = predictor_from(dir.path());
    assert_eq!(predictor.predict("М", 3), vec!["Ме"]);
}

#[test]
fn test_abbreviation_kept_in_every_tier() {
    let dir = write_models(&[
        (UNIGRAM_FILE, r#"{"асс": 1.0}"#),
        (BIGRAM_FILE, r#"{"ме": {"асс": 1.0}}"#),
        (CAP_PATTERN_FILE, r#"{"асс": {"АСС": 5.0}}"#),
    ]);
    let predictor = predictor_from(dir.path());
    assert_eq!(predictor.predict("а", 3), vec!["АСС"]);
    assert_eq!(predictor.predict("А", 3), vec!["АСС"]);
    assert_eq!(predictor.predict("ме ", 3), vec!["АСС"]);
    assert_eq!(predictor.predict("", 3), vec!["АСС"]);
}

#[test]
fn test_fuzzy_prefix_excludes_exact_word() {
    let dir = write_models(&[(UNIGRAM_FILE, r#"{"лун": 5.0, "лунын": 1.0}"#)]);
    let predictor = predictor_from(dir.path());
    let prediction = predictor.predict_with_tier("лун", 3);
    assert_eq!(prediction.tier, Some(TierKind::FuzzyPrefix));
    assert_eq!(prediction.candidates, vec!["лунын"]);
}

#[test]
fn test_fuzzy_prefix_never_returns_typed_word() {
    let dir = write_models(&[(UNIGRAM_FILE, r#"{"лун": 5.0}"#)]);
    let predictor = predictor_from(dir.path());
    // Falls through to the unigram tier, which is not a completion.
    let prediction = predictor.predict_with_tier("лун", 3);
    assert_eq!(prediction.tier, Some(TierKind::Unigram));
}

#[test]
fn test_broken_tables_degrade_independently() {
    let dir = write_models(&[
        (UNIGRAM_FILE, r#"{"ме": 9.0, "лун": 5.0}"#),
        (BIGRAM_FILE, "{\"ме\": "),
        (TRIGRAM_FILE, r#"{"ме кӧсъя": 3}"#),
    ]);
    let store = ModelStore::load_dir(dir.path());
    assert_eq!(store.len(TableKind::Unigram), 2);
    assert_eq!(store.len(TableKind::Bigram), 0);
    assert_eq!(store.len(TableKind::Trigram), 0);

    let predictor = Predictor::new(store);
    assert_eq!(predictor.predict("ме кӧсъя ", 3), vec!["ме", "лун"]);
}

#[test]
fn test_no_models_at_all() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor_from(dir.path());
    assert!(predictor.store().is_empty());
    assert!(predictor.predict("", 3).is_empty());
    assert!(predictor.predict("ме кӧ", 3).is_empty());
}

#[test]
fn test_json_strings_match_files() {
    let from_strs = ModelStore::from_json_strs(
        Some(r#"{"лун": 5.0, "аски": 3.0, "ме": 9.0}"#),
        None,
        Some("not json"),
        None,
        None,
    );
    assert_eq!(from_strs.len(TableKind::Unigram), 3);
    assert_eq!(from_strs.len(TableKind::Trigram), 0);
    assert_eq!(
        Predictor::new(from_strs).predict("", 3),
        vec!["ме", "лун", "аски"]
    );
}

#[test]
fn test_predictor_shared_across_threads() {
    let dir = write_models(&[(UNIGRAM_FILE, r#"{"лун": 5.0, "аски": 3.0, "ме": 9.0}"#)]);
    let predictor = predictor_from(dir.path());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predictor = predictor.clone();
            std::thread::spawn(move || predictor.predict("", 3))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["ме", "лун", "аски"]);
    }
}
