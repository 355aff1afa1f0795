//! Answer history and its CSV export.

use crate::error::{ExportError, ValidationError};
use crate::models::{AnswerRecord, Outcome};
use chrono::NaiveDateTime;
use csv::{Terminator, WriterBuilder};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const EXPORT_HEADERS: [&str; 5] = ["順番", "単語", "意味", "正誤", "解答時間"];
const TOTAL_LABEL: &str = "合計時間";
const FILENAME_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Renders whole seconds as `M分S秒`, or `S秒` under a minute.
pub fn format_duration(seconds: u64) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    if minutes > 0 {
        format!("{}分{}秒", minutes, secs)
    } else {
        format!("{}秒", secs)
    }
}

/// Characters that cannot appear in a file name on common platforms.
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces path separators, reserved and control characters with `_`.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_control() || RESERVED_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

pub fn export_filename(user_name: &str, at: NaiveDateTime) -> Result<String, ValidationError> {
    let name = user_name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().all(|c| c == '.') {
        return Err(ValidationError::InvalidName);
    }
    Ok(format!("{}_{}.csv", sanitize_name(name), at.format(FILENAME_TIMESTAMP)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub data: Vec<u8>,
    pub total_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<AnswerRecord>,
    next_order: u32,
}

impl History {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_order: 1,
        }
    }

    pub fn record(
        &mut self,
        word: &str,
        meaning: &str,
        result: Outcome,
        elapsed_secs: u64,
    ) -> &AnswerRecord {
        let order = self.next_order.max(1);
        self.next_order = order + 1;
        self.records.push(AnswerRecord {
            order,
            word: word.to_string(),
            meaning: meaning.to_string(),
            result,
            elapsed_secs,
        });
        &self.records[self.records.len() - 1]
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.next_order = 1;
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_secs(&self) -> u64 {
        self.records.iter().map(|r| r.elapsed_secs).sum()
    }

    pub fn count(&self, result: Outcome) -> usize {
        self.records.iter().filter(|r| r.result == result).count()
    }

    /// CSV bytes with a leading BOM, a header row and the total-time row first.
    pub fn export_table(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(UTF8_BOM.to_vec());

        writer.write_record(EXPORT_HEADERS)?;
        let total = format_duration(self.total_secs());
        writer.write_record(["", "", "", TOTAL_LABEL, total.as_str()])?;

        for record in &self.records {
            writer.write_record([
                record.order.to_string().as_str(),
                record.word.as_str(),
                record.meaning.as_str(),
                record.result.label(),
                format_duration(record.elapsed_secs).as_str(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }

    pub fn export(&self, user_name: &str, at: NaiveDateTime) -> Result<ExportFile, ExportError> {
        let filename = export_filename(user_name, at)?;
        let data = self.export_table()?;
        Ok(ExportFile {
            filename,
            data,
            total_secs: self.total_secs(),
        })
    }
}
