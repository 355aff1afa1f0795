pub mod app;
pub mod availability;
pub mod checker;
pub mod config;
pub mod csv;
pub mod db;
pub mod error;
pub mod file_io;
pub mod history;
pub mod logger;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use app::App;
pub use availability::{Availability, AvailabilityConfig, Unavailable};
pub use checker::{is_correct, validate_answer_input};
pub use config::AppConfig;
pub use csv::{get_csv_files, load_csv, ColumnNames};
pub use error::{ConfigError, ExportError, FormatError, ValidationError};
pub use history::{export_filename, format_duration, ExportFile, History};
pub use models::{AnswerRecord, AppState, Notice, Outcome, Phase, WordEntry};
pub use session::{AdvanceMode, QuizSession, ResetPolicy};
pub use ui::draw_app;
