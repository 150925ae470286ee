use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

use crate::browse::CategoryProgress;
use crate::content::WordCategory;
use crate::models::QuizMode;
use crate::progress::{GlobalProgress, QuizStats};
use crate::session::MenuState;
use crate::ui::key_span;
use crate::utils::{format_last_played, truncate_string};

/// Everything the menu shows besides the selection itself.
pub struct MenuView<'a> {
    pub categories: &'a [WordCategory],
    pub category_progress: &'a [CategoryProgress],
    pub stats: QuizStats,
    pub global: GlobalProgress,
    pub status: Option<&'a str>,
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn format_stats(stats: &QuizStats) -> String {
    let last = stats
        .last_played
        .map(format_last_played)
        .unwrap_or_else(|| "never".to_string());
    format!(
        "Answered: {}  Correct: {}%  Best: {}%  Last played: {}",
        stats.played, stats.success_percentage, stats.best, last
    )
}

fn draw_panel_header(area: Rect, title: &str, f: &mut Frame) {
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(Block::default());
    f.render_widget(header, area);
}

pub fn draw_menu(f: &mut Frame, menu: &MenuState, view: &MenuView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(concat!("Lingo Cards v", env!("CARGO_PKG_VERSION")))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let quiz_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[1]);
    draw_panel_header(
        quiz_chunks[0],
        &format!("Quiz ({} questions, ←/→ to change)", menu.quiz_length()),
        f,
    );
    let mode_items: Vec<ListItem> = QuizMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| ListItem::new(mode.label()).style(row_style(i == menu.selected_row)))
        .collect();
    f.render_widget(
        List::new(mode_items).block(Block::default().borders(Borders::ALL)),
        quiz_chunks[1],
    );

    let deck_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[2]);
    draw_panel_header(deck_chunks[0], "Flashcards", f);
    let deck_items: Vec<ListItem> = if view.categories.is_empty() {
        vec![ListItem::new("No vocabulary loaded").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        view.categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let progress = view
                    .category_progress
                    .get(i)
                    .map(|p| format!("{}/{}", p.learned, p.total))
                    .unwrap_or_default();
                let icon = category.icon.as_deref().unwrap_or("•");
                let text = format!("{} {}  {}", icon, truncate_string(&category.name, 32), progress);
                ListItem::new(text)
                    .style(row_style(QuizMode::ALL.len() + i == menu.selected_row))
            })
            .collect()
    };
    f.render_widget(
        List::new(deck_items).block(Block::default().borders(Borders::ALL)),
        deck_chunks[1],
    );

    let stats = Paragraph::new(format_stats(&view.stats))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Statistics"));
    f.render_widget(stats, chunks[3]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .percent(view.global.percentage.min(100) as u16)
        .label(format!(
            "Overall progress {}% ({}/{})",
            view.global.percentage, view.global.learned_items, view.global.total_items
        ));
    f.render_widget(gauge, chunks[4]);

    let mut help_spans = vec![
        key_span("↑/↓"),
        Span::from(" Navigate  "),
        key_span("←/→"),
        Span::from(" Length  "),
        key_span("Enter"),
        Span::from(" Select  "),
        key_span("d"),
        Span::from(" Flashcards  "),
        key_span("l"),
        Span::from(" Lessons  "),
        key_span("p"),
        Span::from(" Phrases  "),
        key_span("v"),
        Span::from(" Verbs  "),
        key_span("q/Esc"),
        Span::from(" Quit"),
    ];
    if let Some(status) = view.status {
        help_spans.push(Span::styled(
            format!("  {}", status),
            Style::default().fg(Color::Yellow),
        ));
    }
    let help = Paragraph::new(vec![Line::from(help_spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[5]);
}
