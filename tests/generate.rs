//! Integration tests for the card generator pipeline.

use std::path::{Path, PathBuf};

use cardsmith::{Error, FontParams, GeneratorParams, generate_cards};

fn write_words(dir: &Path, words: &[String]) -> PathBuf {
    let path = dir.join("words.json");
    std::fs::write(&path, serde_json::to_string(words).unwrap()).unwrap();
    path
}

/// Parameters writing into `dir`, with fonts pinned to the built-in fallback.
fn params_in(dir: &Path) -> GeneratorParams {
    GeneratorParams {
        words_path: dir.join("words.json"),
        output_path: dir.join("out/cards.pdf"),
        fonts: FontParams {
            search_dirs: vec![dir.join("no-fonts")],
            ..FontParams::default()
        },
        ..GeneratorParams::default()
    }
}

#[test]
fn twenty_five_words_fill_three_pages() {
    let dir = tempfile::tempdir().unwrap();
    let words: Vec<String> = (1..=25).map(|i| format!("palavra {}", i)).collect();
    write_words(dir.path(), &words);

    let params = GeneratorParams {
        // 3 columns x 4 rows
        page_height: 1800,
        ..params_in(dir.path())
    };
    let report = generate_cards(&params).unwrap();

    assert_eq!(report.cards, 25);
    assert_eq!(report.cards_per_page, 12);
    assert_eq!(report.pages, 3);
    assert_eq!(report.output.as_deref(), Some(params.output_path.as_path()));

    let doc = lopdf::Document::load(&params.output_path).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
}

#[test]
fn default_a4_page_holds_twenty_one_cards() {
    let dir = tempfile::tempdir().unwrap();
    let words: Vec<String> = ["ação", "banco", "espião"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    write_words(dir.path(), &words);

    let report = generate_cards(&params_in(dir.path())).unwrap();
    assert_eq!(report.cards_per_page, 21);
    assert_eq!(report.pages, 1);

    let doc = lopdf::Document::load(dir.path().join("out/cards.pdf")).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    // 2480 x 3508 px at 300 DPI
    assert!((media_box[2].as_float().unwrap() - 595.2).abs() < 0.1);
    assert!((media_box[3].as_float().unwrap() - 841.92).abs() < 0.1);
}

#[test]
fn empty_word_list_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_words(dir.path(), &[]);
    let params = params_in(dir.path());

    let report = generate_cards(&params).unwrap();
    assert_eq!(report.pages, 0);
    assert_eq!(report.cards, 0);
    assert!(report.output.is_none());
    assert!(!params.output_path.exists());
}

#[test]
fn missing_word_list_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let params = params_in(dir.path());

    let err = generate_cards(&params).unwrap_err();
    assert!(matches!(err, Error::MissingInput { .. }));
    assert!(!params.output_path.exists());
}

#[test]
fn card_larger_than_page_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_words(dir.path(), &["one".to_string()]);
    let params = GeneratorParams {
        card_width: 3000,
        ..params_in(dir.path())
    };

    let err = generate_cards(&params).unwrap_err();
    assert!(matches!(err, Error::InvalidLayout(_)));
    assert!(!params.output_path.exists());
}
