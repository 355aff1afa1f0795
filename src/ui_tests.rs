#[cfg(test)]
mod ui_integration_tests {
    use crate::availability::Unavailable;
    use crate::models::{Notice, Phase, WordEntry};
    use crate::session::{AdvanceMode, QuizSession};
    use crate::ui::{draw_done, draw_locked, draw_menu, draw_quit_confirmation, draw_quiz, draw_save};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Frame, Terminal};
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn render<F: FnOnce(&mut Frame)>(draw: F) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(draw).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn create_test_session() -> QuizSession {
        QuizSession::seeded(
            "animals",
            vec![
                WordEntry::new("cat", "neko"),
                WordEntry::new("dog", "inu"),
            ],
            7,
        )
    }

    fn finish_round(session: &mut QuizSession, now: Instant) {
        while session.phase() != Phase::Done {
            let word = session.current_question().unwrap().word.clone();
            session.submit_answer_at(&word[..2], now).unwrap();
            session.advance_at(now);
        }
    }

    /// The menu lists word files by stem and shows the exam countdown.
    #[test]
    fn test_menu_screen() {
        let files = vec![PathBuf::from("wordlists/animals.csv"), PathBuf::from("wordlists/fruits.csv")];
        let screen = render(|f| draw_menu(f, &files, 1, &[], Some(5), None));

        assert!(screen.contains("Tango Quiz - Exam in 5 days"));
        assert!(screen.contains("animals"));
        assert!(screen.contains("fruits"));
        assert!(screen.contains("No saved results"));
    }

    #[test]
    fn test_menu_shows_notice() {
        let notice = Notice::Error("Could not load broken".to_string());
        let screen = render(|f| draw_menu(f, &[], 0, &[], None, Some(&notice)));

        assert!(screen.contains("No word lists found"));
        assert!(screen.contains("Could not load broken"));
    }

    /// The question screen shows the meaning and an input placeholder.
    #[test]
    fn test_quiz_screen_shows_meaning() {
        let session = create_test_session();
        let meaning = session.current_question().unwrap().meaning.clone();
        let screen = render(|f| draw_quiz(f, &session, "", Instant::now()));

        assert!(screen.contains("Round 1 - animals - 2 / 2 left"));
        assert!(screen.contains(&meaning));
        assert!(screen.contains("[Type the first 2 letters]"));
        assert!(screen.contains("Submit"));
    }

    #[test]
    fn test_quiz_screen_echoes_input() {
        let session = create_test_session();
        let screen = render(|f| draw_quiz(f, &session, "ca", Instant::now()));
        assert!(!screen.contains("[Type the first 2 letters]"));
        assert!(screen.contains("ca"));
    }

    /// Feedback keeps the answered meaning on screen and names the word.
    #[test]
    fn test_feedback_screen_after_wrong_answer() {
        let mut session = create_test_session();
        let now = Instant::now();
        let entry = session.current_question().unwrap().clone();
        session.submit_answer_at("zz", now).unwrap();

        let screen = render(|f| draw_quiz(f, &session, "", now));
        assert!(screen.contains(&format!("Incorrect! The answer is {}", entry.word)));
        assert!(screen.contains(&entry.meaning));
        assert!(screen.contains("Next"));
    }

    #[test]
    fn test_feedback_screen_with_auto_advance() {
        let mut session = create_test_session().with_advance_mode(AdvanceMode::Auto(Duration::from_secs(2)));
        let now = Instant::now();
        let word = session.current_question().unwrap().word.clone();
        session.submit_answer_at(&word[..2], now).unwrap();

        let screen = render(|f| draw_quiz(f, &session, "", now));
        assert!(screen.contains(&format!("Correct! {}", word)));
        assert!(screen.contains("Next question in 2s"));
    }

    #[test]
    fn test_quit_confirmation_screen() {
        let screen = render(draw_quit_confirmation);
        assert!(screen.contains("Quit to Menu"));
        assert!(screen.contains("Yes (Return to Menu)"));
    }

    #[test]
    fn test_done_screen_totals() {
        let mut session = create_test_session();
        let now = Instant::now();
        finish_round(&mut session, now);

        let screen = render(|f| draw_done(f, &session, now));
        assert!(screen.contains("All words answered!"));
        assert!(screen.contains("Answers: 2 (correct 2, incorrect 0)"));
        assert!(screen.contains("Again"));
    }

    #[test]
    fn test_save_screen_placeholder_and_warning() {
        let mut session = create_test_session();
        let now = Instant::now();
        finish_round(&mut session, now);
        session.finish();

        let screen = render(|f| draw_save(f, &session, "", "", None));
        assert!(screen.contains("Save History - animals"));
        assert!(screen.contains("e.g. Yamada Taro"));

        let warning = Notice::Warning("Please enter your name.".to_string());
        let screen = render(|f| draw_save(f, &session, "", "hanako", Some(&warning)));
        assert!(screen.contains("hanako"));
        assert!(screen.contains("Please enter your name."));
    }

    #[test]
    fn test_locked_screen() {
        let reason = Unavailable::Expired(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
        let screen = render(|f| draw_locked(f, Some(&reason)));
        assert!(screen.contains("Not Available"));
        assert!(screen.contains(&reason.message()));
    }
}
