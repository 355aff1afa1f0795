use crate::availability::{days_until, Availability, Unavailable};
use crate::checker::ANSWER_LEN;
use crate::config::AppConfig;
use crate::csv::{get_csv_files, load_csv};
use crate::db::results::{list_recent_results, record_result, NewResult, ResultSummary};
use crate::error::{ExportError, ValidationError};
use crate::file_io::save_export;
use crate::logger;
use crate::models::{AppState, Notice, Outcome, Phase};
use crate::session::QuizSession;
use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Instant;

const RECENT_RESULTS: usize = 20;

pub struct App {
    pub state: AppState,
    pub config: AppConfig,
    pub csv_files: Vec<PathBuf>,
    pub selected_file_index: usize,
    pub results: Vec<ResultSummary>,
    pub session: Option<QuizSession>,
    pub answer_input: String,
    pub name_input: String,
    pub last_user_name: String,
    pub notice: Option<Notice>,
    pub saved_path: Option<PathBuf>,
    pub lock_reason: Option<Unavailable>,
    pub should_quit: bool,
    availability: Availability,
    db: Option<Connection>,
}

impl App {
    pub fn new(config: AppConfig, availability: Availability, db: Option<Connection>) -> Self {
        let mut app = Self {
            state: AppState::Menu,
            csv_files: Vec::new(),
            selected_file_index: 0,
            results: Vec::new(),
            session: None,
            answer_input: String::new(),
            name_input: String::new(),
            last_user_name: String::new(),
            notice: None,
            saved_path: None,
            lock_reason: None,
            should_quit: false,
            config,
            availability,
            db,
        };
        app.refresh_menu();
        app
    }

    pub fn refresh_menu(&mut self) {
        self.csv_files = get_csv_files(&self.config.wordlist_dir);
        self.selected_file_index = self
            .selected_file_index
            .min(self.csv_files.len().saturating_sub(1));
        self.results = match &self.db {
            Some(conn) => list_recent_results(conn, RECENT_RESULTS).unwrap_or_else(|e| {
                logger::log(&format!("Failed to list results: {}", e));
                Vec::new()
            }),
            None => Vec::new(),
        };
    }

    /// Locks the app while outside the configured availability window.
    pub fn check_availability(&mut self, now: DateTime<Utc>) -> bool {
        match self.availability.check(now) {
            Ok(()) => {
                if self.state == AppState::Locked {
                    self.state = AppState::Menu;
                    self.lock_reason = None;
                }
                true
            }
            Err(reason) => {
                if self.state != AppState::Locked {
                    logger::log(&format!("Access refused: {}", reason.message()));
                }
                self.state = AppState::Locked;
                self.session = None;
                self.lock_reason = Some(reason);
                false
            }
        }
    }

    pub fn days_to_exam(&self, now: DateTime<Utc>) -> Option<i64> {
        self.config
            .exam_date
            .map(|exam| days_until(exam, self.availability.today(now)))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if !self.check_availability(Utc::now()) {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.should_quit = true;
            }
            return;
        }

        match self.state {
            AppState::Locked => {}
            AppState::Menu => self.handle_menu_input(key),
            AppState::Quiz => self.handle_quiz_input(key),
            AppState::QuizQuitConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.back_to_menu(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = AppState::Quiz;
                }
                _ => {}
            },
        }
    }

    /// Fires the automatic advance from feedback when it is due.
    pub fn tick(&mut self, now: Instant) {
        if self.state == AppState::Quiz
            && let Some(session) = self.session.as_mut()
        {
            session.tick(now);
        }
    }

    fn handle_menu_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.selected_file_index = self.selected_file_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_file_index < self.csv_files.len().saturating_sub(1) {
                    self.selected_file_index += 1;
                }
            }
            KeyCode::Enter => {
                if !self.csv_files.is_empty() {
                    self.start_quiz(self.selected_file_index);
                }
            }
            KeyCode::Char('r') => self.refresh_menu(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    pub fn start_quiz(&mut self, index: usize) {
        let Some(path) = self.csv_files.get(index).cloned() else {
            return;
        };
        let deck_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        match load_csv(&path, &self.config.columns()) {
            Ok(words) => {
                logger::log(&format!("Loaded {} words from {}", words.len(), path.display()));
                let session = QuizSession::new(deck_name, words)
                    .with_reset_policy(self.config.reset_policy)
                    .with_advance_mode(self.config.advance_mode());
                self.session = Some(session);
                self.answer_input.clear();
                self.name_input.clear();
                self.notice = None;
                self.saved_path = None;
                self.state = AppState::Quiz;
            }
            Err(e) => {
                logger::log(&format!("Rejected {}: {}", path.display(), e));
                self.notice = Some(Notice::Error(format!("Could not load {}: {}", deck_name, e)));
            }
        }
    }

    fn back_to_menu(&mut self) {
        self.session = None;
        self.answer_input.clear();
        self.name_input.clear();
        self.saved_path = None;
        self.notice = None;
        self.state = AppState::Menu;
        self.refresh_menu();
    }

    fn handle_quiz_input(&mut self, key: KeyEvent) {
        let Some(phase) = self.session.as_ref().map(|s| s.phase()) else {
            self.state = AppState::Menu;
            return;
        };

        match phase {
            Phase::Quiz => match key.code {
                KeyCode::Esc => self.state = AppState::QuizQuitConfirm,
                KeyCode::Enter => {
                    let input = std::mem::take(&mut self.answer_input);
                    if let Some(session) = self.session.as_mut() {
                        // Rejected input is dropped without feedback.
                        let _ = session.submit_answer(&input);
                    }
                }
                KeyCode::Backspace => {
                    self.answer_input.pop();
                }
                KeyCode::Char(c) => {
                    if self.answer_input.chars().count() < ANSWER_LEN {
                        self.answer_input.push(c);
                    }
                }
                _ => {}
            },
            Phase::Feedback => match key.code {
                KeyCode::Esc => self.state = AppState::QuizQuitConfirm,
                KeyCode::Enter | KeyCode::Tab | KeyCode::Char(' ') => {
                    if let Some(session) = self.session.as_mut() {
                        session.advance();
                    }
                }
                _ => {}
            },
            Phase::Done => match key.code {
                KeyCode::Esc => self.state = AppState::QuizQuitConfirm,
                KeyCode::Char('r') => {
                    if let Some(session) = self.session.as_mut() {
                        session.play_again();
                    }
                }
                KeyCode::Char('e') => {
                    if let Some(session) = self.session.as_mut() {
                        session.finish();
                    }
                    self.name_input.clear();
                    self.notice = None;
                }
                _ => {}
            },
            Phase::Finished => match key.code {
                KeyCode::Esc => self.back_to_menu(),
                KeyCode::Enter => self.save_history(),
                KeyCode::Backspace => {
                    self.name_input.pop();
                }
                KeyCode::Char(c) => self.name_input.push(c),
                _ => {}
            },
        }
    }

    /// Exports the history under the typed name and records the result.
    pub fn save_history(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let name = std::mem::take(&mut self.name_input);

        let export = match session.export(&name, Local::now().naive_local()) {
            Ok(export) => export,
            Err(ExportError::Validation(ValidationError::EmptyName)) => {
                self.notice = Some(Notice::Warning("Please enter your name.".to_string()));
                return;
            }
            Err(ExportError::Validation(ValidationError::InvalidName)) => {
                self.notice = Some(Notice::Warning("Please enter a different name.".to_string()));
                return;
            }
            Err(e) => {
                self.notice = Some(Notice::Error(format!("Export failed: {}", e)));
                return;
            }
        };

        let path = match save_export(&self.config.export_dir, &export) {
            Ok(path) => path,
            Err(e) => {
                logger::log(&format!("Failed to save {}: {}", export.filename, e));
                self.notice = Some(Notice::Error(format!("Could not save {}: {}", export.filename, e)));
                return;
            }
        };
        logger::log(&format!("Saved history to {}", path.display()));

        let history = session.history();
        if let Some(conn) = &self.db {
            let result = NewResult {
                user_name: session.user_name(),
                deck_name: &session.deck_name,
                finished_at: Utc::now().timestamp(),
                answers: u32::try_from(history.len()).unwrap_or(u32::MAX),
                correct: u32::try_from(history.count(Outcome::Correct)).unwrap_or(u32::MAX),
                incorrect: u32::try_from(history.count(Outcome::Incorrect)).unwrap_or(u32::MAX),
                total_seconds: export.total_secs,
                export_file: &export.filename,
            };
            if let Err(e) = record_result(conn, &result) {
                logger::log(&format!("Failed to record result: {}", e));
            }
        }

        self.last_user_name = session.user_name().to_string();
        self.notice = Some(Notice::Info(format!("Saved {}", path.display())));
        self.saved_path = Some(path);
    }
}
