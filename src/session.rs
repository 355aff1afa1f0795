use crate::checker::{is_correct, validate_answer_input};
use crate::error::{ExportError, ValidationError};
use crate::history::{ExportFile, History};
use crate::logger;
use crate::models::{LastOutcome, Outcome, Phase, WordEntry};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// What "play again" does with the answers recorded so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    #[default]
    ClearHistory,
    KeepHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvanceMode {
    #[default]
    Manual,
    Auto(Duration),
}

#[derive(Debug)]
pub struct QuizSession<R = StdRng> {
    pub deck_name: String,
    words: Vec<WordEntry>,
    pool: Vec<WordEntry>,
    current: Option<usize>,
    phase: Phase,
    last_outcome: Option<LastOutcome>,
    history: History,
    reset_policy: ResetPolicy,
    advance_mode: AdvanceMode,
    round: u32,
    round_started: Instant,
    question_started: Option<Instant>,
    feedback_started: Option<Instant>,
    prior_rounds_secs: u64,
    user_name: String,
    rng: R,
}

impl QuizSession<StdRng> {
    pub fn new(deck_name: impl Into<String>, words: Vec<WordEntry>) -> Self {
        Self::with_rng(deck_name, words, StdRng::from_entropy())
    }

    pub fn seeded(deck_name: impl Into<String>, words: Vec<WordEntry>, seed: u64) -> Self {
        Self::with_rng(deck_name, words, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSession<R> {
    /// Builds a session and starts its first round.
    pub fn with_rng(deck_name: impl Into<String>, words: Vec<WordEntry>, rng: R) -> Self {
        let now = Instant::now();
        let mut session = Self {
            deck_name: deck_name.into(),
            pool: Vec::new(),
            words,
            current: None,
            phase: Phase::Quiz,
            last_outcome: None,
            history: History::new(),
            reset_policy: ResetPolicy::default(),
            advance_mode: AdvanceMode::default(),
            round: 0,
            round_started: now,
            question_started: None,
            feedback_started: None,
            prior_rounds_secs: 0,
            user_name: String::new(),
            rng,
        };
        session.start_at(now);
        session
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    pub fn with_advance_mode(mut self, mode: AdvanceMode) -> Self {
        self.advance_mode = mode;
        self
    }

    /// Refills the pool and selects the first question of a new round.
    pub fn start_at(&mut self, now: Instant) {
        if self.round > 0 {
            self.prior_rounds_secs += now.saturating_duration_since(self.round_started).as_secs();
            if self.reset_policy == ResetPolicy::ClearHistory {
                self.history.clear();
            }
        }
        self.round += 1;
        self.pool = self.words.clone();
        self.current = None;
        self.phase = Phase::Quiz;
        self.last_outcome = None;
        self.round_started = now;
        self.feedback_started = None;
        logger::log(&format!(
            "Round {} of '{}' started with {} words",
            self.round,
            self.deck_name,
            self.pool.len()
        ));
        self.select_question_at(now);
    }

    pub fn select_question_at(&mut self, now: Instant) {
        self.feedback_started = None;
        if self.pool.is_empty() {
            if self.phase != Phase::Done {
                logger::log(&format!(
                    "Round {} of '{}' complete after {} answers",
                    self.round,
                    self.deck_name,
                    self.history.len()
                ));
            }
            self.current = None;
            self.question_started = None;
            self.phase = Phase::Done;
            return;
        }

        let index = self.rng.gen_range(0..self.pool.len());
        self.current = Some(index);
        self.phase = Phase::Quiz;
        self.last_outcome = None;
        self.question_started = Some(now);
    }

    pub fn submit_answer_at(&mut self, input: &str, now: Instant) -> Result<Outcome, ValidationError> {
        let index = match (self.phase, self.current) {
            (Phase::Quiz, Some(index)) => index,
            _ => return Err(ValidationError::NotAwaitingAnswer),
        };
        validate_answer_input(input)?;

        let elapsed_secs = self
            .question_started
            .map(|started| now.saturating_duration_since(started).as_secs())
            .unwrap_or(0);

        let entry = &self.pool[index];
        let result = if is_correct(input, entry) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.history
            .record(&entry.word, &entry.meaning, result, elapsed_secs);
        self.last_outcome = Some(LastOutcome {
            result,
            word: entry.word.clone(),
            elapsed_secs,
        });

        if result == Outcome::Correct {
            self.pool.remove(index);
        }
        self.current = None;
        self.question_started = None;
        self.feedback_started = Some(now);
        self.phase = Phase::Feedback;
        Ok(result)
    }

    /// Moves from feedback to the next question. Returns false in any other phase.
    pub fn advance_at(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Feedback {
            return false;
        }
        self.select_question_at(now);
        true
    }

    /// Advances when an automatic delay is configured and has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match (self.advance_mode, self.phase, self.feedback_started) {
            (AdvanceMode::Auto(delay), Phase::Feedback, Some(started))
                if now.saturating_duration_since(started) >= delay =>
            {
                self.advance_at(now)
            }
            _ => false,
        }
    }

    /// "Again" from the done screen.
    pub fn play_again_at(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Done {
            return false;
        }
        self.start_at(now);
        true
    }

    /// "End" from the done screen; enables export.
    pub fn finish(&mut self) -> bool {
        if self.phase != Phase::Done {
            return false;
        }
        self.phase = Phase::Finished;
        logger::log(&format!(
            "Quiz '{}' finished: {} answers, {}s",
            self.deck_name,
            self.history.len(),
            self.history.total_secs()
        ));
        true
    }

    pub fn export(&mut self, user_name: &str, at: NaiveDateTime) -> Result<ExportFile, ExportError> {
        if self.phase != Phase::Finished {
            return Err(ValidationError::ExportUnavailable.into());
        }
        let file = self.history.export(user_name, at)?;
        self.user_name = user_name.trim().to_string();
        Ok(file)
    }

    pub fn select_question(&mut self) {
        self.select_question_at(Instant::now());
    }

    pub fn submit_answer(&mut self, input: &str) -> Result<Outcome, ValidationError> {
        self.submit_answer_at(input, Instant::now())
    }

    pub fn advance(&mut self) -> bool {
        self.advance_at(Instant::now())
    }

    pub fn play_again(&mut self) -> bool {
        self.play_again_at(Instant::now())
    }
}

impl<R> QuizSession<R> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_question(&self) -> Option<&WordEntry> {
        self.current.and_then(|i| self.pool.get(i))
    }

    pub fn last_outcome(&self) -> Option<&LastOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pool(&self) -> &[WordEntry] {
        &self.pool
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn advance_mode(&self) -> AdvanceMode {
        self.advance_mode
    }

    pub fn question_elapsed(&self, now: Instant) -> Duration {
        self.question_started
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default()
    }

    pub fn round_elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.round_started)
    }

    /// Wall time of every round so far, including the running one.
    pub fn cumulative_elapsed_secs(&self, now: Instant) -> u64 {
        self.prior_rounds_secs + self.round_elapsed(now).as_secs()
    }
}
