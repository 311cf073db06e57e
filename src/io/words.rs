use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Loads a word list stored as a single JSON array of strings.
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(Error::missing(path));
    }
    let text = std::fs::read_to_string(path)?;
    let words: Vec<String> = serde_json::from_str(&text)?;
    debug!("Read {} words from {}", words.len(), path.display());
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_words_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, r#"["maçã", "Banco", "espião"]"#).unwrap();

        let words = load_word_list(&path).unwrap();
        assert_eq!(words, vec!["maçã", "Banco", "espião"]);
    }

    #[test]
    fn missing_file_and_bad_json_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            load_word_list(&missing),
            Err(Error::MissingInput { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"words": 3}"#).unwrap();
        assert!(matches!(load_word_list(&bad), Err(Error::Json(_))));
    }
}
