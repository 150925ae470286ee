use crate::browse::{PhraseBrowser, PhraseGroup};
use crate::ui::key_span;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// One heading line per category, then one line per phrase. The highlighted
/// phrase is the `selected`-th phrase across all groups.
pub fn phrase_lines(groups: &[PhraseGroup], selected: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut index = 0;
    for group in groups {
        let icon = group.category.icon.as_deref().unwrap_or("•");
        lines.push(Line::from(Span::styled(
            format!("{} {}", icon, group.category.name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for hit in &group.hits {
            let star = if hit.favorite { "★" } else { "☆" };
            let style = if index == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = vec![Span::styled(
                format!(" {} {}  {}", star, hit.phrase.foreign, hit.phrase.native),
                style,
            )];
            if let Some(phonetic) = &hit.phrase.phonetic {
                spans.push(Span::styled(
                    format!("  [{}]", phonetic),
                    Style::default().fg(Color::Gray),
                ));
            }
            if let Some(context) = &hit.phrase.context {
                spans.push(Span::styled(
                    format!("  ({})", context),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
            lines.push(Line::from(spans));
            index += 1;
        }
    }
    lines
}

pub fn draw_phrases(
    f: &mut Frame,
    browser: &PhraseBrowser,
    groups: &[PhraseGroup],
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

    let filter = if browser.favorites_only {
        "Search (favorites)"
    } else {
        "Search"
    };
    let search = Paragraph::new(format!("{}_", browser.query))
        .block(Block::default().borders(Borders::ALL).title(filter));
    f.render_widget(search, chunks[0]);

    let body = if groups.is_empty() {
        Paragraph::new("No phrases found").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        let lines = phrase_lines(groups, browser.selected);
        // Keep the highlighted row on screen: one heading per group above it.
        let row = browser.selected
            + groups
                .iter()
                .scan(0, |seen, g| {
                    let before = *seen;
                    *seen += g.hits.len();
                    Some(before)
                })
                .filter(|start| *start <= browser.selected)
                .count();
        let visible = chunks[1].height.saturating_sub(2) as usize;
        let scroll = row.saturating_sub(visible.saturating_sub(1)) as u16;
        Paragraph::new(lines).scroll((scroll, 0))
    };
    f.render_widget(
        body.wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Phrases")),
        chunks[1],
    );

    if let Some(status) = status {
        let line = Paragraph::new(status)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(line, chunks[2]);
    }

    let help_text = vec![Line::from(vec![
        key_span("Type"),
        Span::from(" Search  "),
        key_span("↑/↓"),
        Span::from(" Navigate  "),
        key_span("Enter"),
        Span::from(" Favorite  "),
        key_span("Tab"),
        Span::from(" Favorites Only  "),
        key_span("Esc"),
        Span::from(" Menu"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
