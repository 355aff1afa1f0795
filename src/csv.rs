use crate::error::FormatError;
use crate::models::WordEntry;
use csv::{ReaderBuilder, Trim};
use encoding_rs::SHIFT_JIS;
use std::fs;
use std::path::{Path, PathBuf};

/// Header labels that identify the word and meaning columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub word: String,
    pub meaning: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            word: "単語".to_string(),
            meaning: "意味".to_string(),
        }
    }
}

pub fn get_csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            if let Some(ext) = entry.path().extension()
                && ext.eq_ignore_ascii_case("csv")
            {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files
}

pub fn load_csv(path: &Path, columns: &ColumnNames) -> Result<Vec<WordEntry>, FormatError> {
    let bytes = fs::read(path)?;
    parse_word_set(&bytes, columns)
}

/// Decodes raw bytes as UTF-8, falling back to Shift_JIS.
pub fn decode_text(bytes: &[u8]) -> Result<String, FormatError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(FormatError::Undecodable);
    }
    Ok(text.into_owned())
}

pub fn parse_word_set(bytes: &[u8], columns: &ColumnNames) -> Result<Vec<WordEntry>, FormatError> {
    let text = decode_text(bytes)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(FormatError::MissingHeader);
    }

    let word_idx = headers.iter().position(|h| h == columns.word);
    let meaning_idx = headers.iter().position(|h| h == columns.meaning);
    let (word_idx, meaning_idx) = match (word_idx, meaning_idx) {
        (Some(w), Some(m)) => (w, m),
        (w, m) => {
            let mut missing = Vec::new();
            if w.is_none() {
                missing.push(columns.word.clone());
            }
            if m.is_none() {
                missing.push(columns.meaning.clone());
            }
            return Err(FormatError::MissingColumns(missing));
        }
    };

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let word = record.get(word_idx).unwrap_or_default();
        let meaning = record.get(meaning_idx).unwrap_or_default();
        if !word.is_empty() && !meaning.is_empty() {
            entries.push(WordEntry::new(word, meaning));
        }
    }

    Ok(entries)
}
