use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::path::PathBuf;

use super::key_span;
use super::sessions::format_session_date;
use crate::db::results::ResultSummary;
use crate::history::format_duration;
use crate::models::Notice;
use crate::utils::truncate_string;

fn format_result_item(result: &ResultSummary) -> String {
    format!(
        "{} - {} - {} ({}/{} correct, {})",
        format_session_date(result.finished_at),
        truncate_string(&result.user_name, 16),
        truncate_string(&result.deck_name, 24),
        result.correct,
        result.answers,
        format_duration(result.total_seconds)
    )
}

fn countdown_line(days_left: i64) -> String {
    match days_left {
        d if d > 0 => format!("Exam in {} days", d),
        0 => "Exam day".to_string(),
        d => format!("Exam was {} days ago", -d),
    }
}

fn notice_style(notice: &Notice) -> Style {
    match notice {
        Notice::Info(_) => Style::default().fg(Color::Green),
        Notice::Warning(_) => Style::default().fg(Color::Yellow),
        Notice::Error(_) => Style::default().fg(Color::Red),
    }
}

pub fn draw_menu(
    f: &mut Frame,
    csv_files: &[PathBuf],
    selected_file_index: usize,
    results: &[ResultSummary],
    days_to_exam: Option<i64>,
    notice: Option<&Notice>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title_text = match days_to_exam {
        Some(days) => format!("Tango Quiz - {}", countdown_line(days)),
        None => "Tango Quiz".to_string(),
    };
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let file_items: Vec<ListItem> = if csv_files.is_empty() {
        vec![ListItem::new("No word lists found").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        csv_files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                let style = if i == selected_file_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(name).style(style)
            })
            .collect()
    };

    let file_list = List::new(file_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Word Lists"),
    );
    f.render_widget(file_list, chunks[1]);

    let result_items: Vec<ListItem> = if results.is_empty() {
        vec![ListItem::new("No saved results").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        results
            .iter()
            .map(|r| ListItem::new(format_result_item(r)))
            .collect()
    };

    let result_list = List::new(result_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Recent Results"),
    );
    f.render_widget(result_list, chunks[2]);

    let (notice_text, style) = match notice {
        Some(notice) => (notice.message().to_string(), notice_style(notice)),
        None => (
            "Pick a CSV with 単語 and 意味 columns".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let status = Paragraph::new(notice_text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[3]);

    let help_text = vec![Line::from(vec![
        key_span("↑/↓"),
        Span::from(" Navigate  "),
        key_span("Enter"),
        Span::from(" Start  "),
        key_span("r"),
        Span::from(" Refresh  "),
        key_span("q/Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_line() {
        assert_eq!(countdown_line(12), "Exam in 12 days");
        assert_eq!(countdown_line(0), "Exam day");
        assert_eq!(countdown_line(-3), "Exam was 3 days ago");
    }
}
