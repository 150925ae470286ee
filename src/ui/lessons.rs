use crate::browse::{LessonBrowser, level_progress};
use crate::content::{ContentBlock, ContentRepository, Lesson};
use crate::ui::key_span;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::collections::HashSet;

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Full reading view of one lesson.
pub fn lesson_text(lesson: &Lesson, complete: bool) -> Text<'static> {
    let mut text = Text::default();
    text.push_line(Line::from(format!("Level: {}", lesson.level)));
    if complete {
        text.push_line(Line::from(Span::styled(
            "✓ completed",
            Style::default().fg(Color::Green),
        )));
    }

    if !lesson.objectives.is_empty() {
        text.push_line(Line::from(""));
        text.push_line(heading("Objectives"));
        for objective in &lesson.objectives {
            text.push_line(Line::from(format!("• {}", objective)));
        }
    }

    for block in &lesson.content {
        text.push_line(Line::from(""));
        match block {
            ContentBlock::Explanation { text: body } => {
                text.push_line(Line::from(body.clone()));
            }
            ContentBlock::Vocabulary { words } => {
                text.push_line(heading("Vocabulary"));
                for word in words {
                    let phonetic = word
                        .phonetic
                        .as_ref()
                        .map(|p| format!(" [{}]", p))
                        .unwrap_or_default();
                    text.push_line(Line::from(format!(
                        "{} - {}{}",
                        word.foreign, word.native, phonetic
                    )));
                }
            }
            ContentBlock::Example {
                native,
                foreign,
                phonetic,
            } => {
                text.push_line(Line::from(vec![
                    Span::styled(
                        foreign.clone(),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::from(format!("  {}", native)),
                ]));
                if let Some(phonetic) = phonetic {
                    text.push_line(Line::from(Span::styled(
                        format!("[{}]", phonetic),
                        Style::default()
                            .fg(Color::Gray)
                            .add_modifier(Modifier::ITALIC),
                    )));
                }
            }
            ContentBlock::Tip { text: tip } => {
                text.push_line(Line::from(Span::styled(
                    format!("Tip: {}", tip),
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
    }
    text
}

pub fn draw_lessons(
    f: &mut Frame,
    browser: &LessonBrowser,
    content: &ContentRepository,
    completed: &HashSet<String>,
    status: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let reading = browser.reading.as_deref().and_then(|id| content.lesson(id));

    let title = match (reading, &browser.level) {
        (Some(lesson), _) => lesson.title.clone(),
        (None, Some(level)) => format!("Lessons - {}", level),
        (None, None) => "Lessons - all levels".to_string(),
    };
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let help_spans = if let Some(lesson) = reading {
        let body = Paragraph::new(lesson_text(lesson, completed.contains(&lesson.id)))
            .wrap(Wrap { trim: false })
            .scroll((browser.scroll, 0))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, chunks[1]);
        vec![
            key_span("↑/↓"),
            Span::from(" Scroll  "),
            key_span("c"),
            Span::from(" Toggle Completed  "),
            key_span("Esc"),
            Span::from(" Back"),
        ]
    } else {
        let items: Vec<ListItem> = browser
            .visible(content)
            .iter()
            .enumerate()
            .map(|(i, lesson)| {
                let mark = if completed.contains(&lesson.id) { "✓" } else { " " };
                let icon = lesson.icon.as_deref().unwrap_or("•");
                let style = if i == browser.selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!("[{}] {} {}  ({})", mark, icon, lesson.title, lesson.level))
                    .style(style)
            })
            .collect();
        let levels: Vec<String> = level_progress(content, |id| completed.contains(id))
            .iter()
            .map(|l| format!("{} {}/{}", l.level, l.done, l.total))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(levels.join("  ")),
        );
        f.render_widget(list, chunks[1]);
        vec![
            key_span("↑/↓"),
            Span::from(" Navigate  "),
            key_span("Enter"),
            Span::from(" Read  "),
            key_span("Tab"),
            Span::from(" Level  "),
            key_span("Esc"),
            Span::from(" Menu"),
        ]
    };

    if let Some(status) = status {
        let line = Paragraph::new(status)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(line, chunks[2]);
    }

    let help = Paragraph::new(vec![Line::from(help_spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
