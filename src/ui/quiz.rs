use crate::history::format_duration;
use crate::models::{Outcome, Phase};
use crate::session::{AdvanceMode, QuizSession};
use crate::ui::key_span;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::display_width;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, answer_input: &str, now: Instant) {
    let layout = calculate_quiz_chunks(f.area());

    let progress = format!(
        "Round {} - {} - {} / {} left",
        session.round(),
        session.deck_name,
        session.pool_len(),
        session.word_count()
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let feedback = session.phase() == Phase::Feedback;

    let meaning = if feedback {
        session.history().records().last().map(|r| r.meaning.as_str())
    } else {
        session.current_question().map(|entry| entry.meaning.as_str())
    }
    .unwrap_or("");
    let question = Paragraph::new(Text::from(meaning))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Meaning"));
    f.render_widget(question, layout.question_area);

    let (answer_title, answer_content) = match session.last_outcome() {
        Some(outcome) if feedback => {
            let line = match outcome.result {
                Outcome::Correct => Line::from(Span::styled(
                    format!("Correct! {}", outcome.word),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Outcome::Incorrect => Line::from(Span::styled(
                    format!("Incorrect! The answer is {}", outcome.word),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
            };
            let mut text = Text::default();
            text.push_line(line);
            text.push_line(Line::from(format!(
                "Answered in {}",
                format_duration(outcome.elapsed_secs)
            )));
            ("Result", text)
        }
        _ => {
            let content = if answer_input.is_empty() {
                Text::styled(
                    "[Type the first 2 letters]",
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                Text::from(answer_input)
            };
            ("First two letters (ASCII)", content)
        }
    };

    let answer = Paragraph::new(answer_content)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(answer_title));
    f.render_widget(answer, layout.answer_area);

    if !feedback {
        let cursor_x = layout.answer_area.x + 1 + display_width(answer_input) as u16;
        f.set_cursor_position((cursor_x, layout.answer_area.y + 1));
    }

    let timer = Paragraph::new(format!(
        "This question: {}   This round: {}   All rounds: {}",
        format_duration(session.question_elapsed(now).as_secs()),
        format_duration(session.round_elapsed(now).as_secs()),
        format_duration(session.cumulative_elapsed_secs(now))
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Time"));
    f.render_widget(timer, layout.timer_area);

    let mut help_spans = Vec::new();
    if feedback {
        match session.advance_mode() {
            AdvanceMode::Auto(delay) => help_spans.push(Span::from(format!(
                "Next question in {}s  ",
                delay.as_secs_f32().ceil() as u64
            ))),
            AdvanceMode::Manual => {}
        }
        help_spans.extend([key_span("Enter/Tab"), Span::from(" Next  ")]);
    } else {
        help_spans.extend([key_span("Enter"), Span::from(" Submit  ")]);
    }
    help_spans.extend([
        key_span("Esc"),
        Span::from(" Quit to Menu  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ]);

    let help = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Return to main menu? Unsaved answers are discarded.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
