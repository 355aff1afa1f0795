use crate::history::format_duration;
use crate::models::{Notice, Outcome};
use crate::session::QuizSession;
use crate::ui::key_span;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::{display_width, truncate_string};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

const NAME_PLACEHOLDER: &str = "e.g. Yamada Taro";

pub fn draw_done(f: &mut Frame, session: &QuizSession, now: Instant) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new(format!("All words answered! - {}", session.deck_name))
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let history = session.history();
    let mut text = Text::default();
    text.push_line(Line::from(format!("Round: {}", session.round())));
    text.push_line(Line::from(format!(
        "Answers: {} (correct {}, incorrect {})",
        history.len(),
        history.count(Outcome::Correct),
        history.count(Outcome::Incorrect)
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("Total answer time: {}", format_duration(history.total_secs())),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(format!(
        "Time across all rounds: {}",
        format_duration(session.cumulative_elapsed_secs(now))
    )));

    let content = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, layout.content_area);

    let help_text = vec![Line::from(vec![
        key_span("r"),
        Span::from(" Again  "),
        key_span("e"),
        Span::from(" End and Save  "),
        key_span("Esc"),
        Span::from(" Quit to Menu"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

pub fn draw_save(
    f: &mut Frame,
    session: &QuizSession,
    name_input: &str,
    last_user_name: &str,
    notice: Option<&Notice>,
) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new(format!("Save History - {}", session.deck_name))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(layout.content_area);

    let name_content = if name_input.is_empty() {
        let placeholder = if last_user_name.is_empty() {
            NAME_PLACEHOLDER
        } else {
            last_user_name
        };
        Text::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Text::from(name_input.to_string())
    };
    let name_box = Paragraph::new(name_content)
        .block(Block::default().borders(Borders::ALL).title("Name"));
    f.render_widget(name_box, body[0]);
    f.set_cursor_position((body[0].x + 1 + display_width(name_input) as u16, body[0].y + 1));

    let (status_text, status_style) = match notice {
        Some(Notice::Info(m)) => (m.as_str(), Style::default().fg(Color::Green)),
        Some(Notice::Warning(m)) => (m.as_str(), Style::default().fg(Color::Yellow)),
        Some(Notice::Error(m)) => (m.as_str(), Style::default().fg(Color::Red)),
        None => (
            "Press Enter to save the history CSV",
            Style::default().fg(Color::DarkGray),
        ),
    };
    let status = Paragraph::new(status_text)
        .style(status_style)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, body[1]);

    let history = session.history();
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        format!("Total: {}", format_duration(history.total_secs())),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for record in history.records() {
        let style = match record.result {
            Outcome::Correct => Style::default(),
            Outcome::Incorrect => Style::default().fg(Color::Red),
        };
        text.push_line(Line::from(Span::styled(
            format!(
                "{:>3}. {}  {}  {}  {}",
                record.order,
                truncate_string(&record.word, 20),
                truncate_string(&record.meaning, 30),
                record.result,
                format_duration(record.elapsed_secs)
            ),
            style,
        )));
    }
    let records = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("History"));
    f.render_widget(records, body[2]);

    let help_text = vec![Line::from(vec![
        key_span("Enter"),
        Span::from(" Save  "),
        key_span("Esc"),
        Span::from(" Main Menu  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
