pub mod layout;
mod locked;
mod menu;
mod quiz;
mod sessions;
mod summary;

pub use layout::{calculate_quiz_chunks, calculate_summary_chunks};
pub use locked::draw_locked;
pub use menu::draw_menu;
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use sessions::format_session_date;
pub use summary::{draw_done, draw_save};

use crate::app::App;
use crate::models::{AppState, Phase};
use chrono::Utc;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};
use std::time::Instant;

pub fn draw_app(f: &mut Frame, app: &App, now: Instant) {
    match app.state {
        AppState::Locked => draw_locked(f, app.lock_reason.as_ref()),
        AppState::Menu => draw_menu(
            f,
            &app.csv_files,
            app.selected_file_index,
            &app.results,
            app.days_to_exam(Utc::now()),
            app.notice.as_ref(),
        ),
        AppState::QuizQuitConfirm => draw_quit_confirmation(f),
        AppState::Quiz => {
            if let Some(session) = &app.session {
                match session.phase() {
                    Phase::Quiz | Phase::Feedback => draw_quiz(f, session, &app.answer_input, now),
                    Phase::Done => draw_done(f, session, now),
                    Phase::Finished => draw_save(
                        f,
                        session,
                        &app.name_input,
                        &app.last_user_name,
                        app.notice.as_ref(),
                    ),
                }
            }
        }
    }
}

pub(crate) fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
