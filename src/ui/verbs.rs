use crate::browse::{Tense, VerbBrowser};
use crate::content::ContentRepository;
use crate::ui::key_span;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table},
};

/// Tense tabs with the current one highlighted.
pub fn tense_line(current: Tense) -> Line<'static> {
    let spans: Vec<Span> = Tense::ALL
        .iter()
        .map(|tense| {
            let style = if *tense == current {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {} ", tense.label()), style)
        })
        .collect();
    Line::from(spans)
}

pub fn draw_verbs(f: &mut Frame, browser: &VerbBrowser, content: &ContentRepository) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    let search = Paragraph::new(format!("{}_", browser.query))
        .block(Block::default().borders(Borders::ALL).title("Search verbs"));
    f.render_widget(search, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    let verbs = browser.results(content);
    let items: Vec<ListItem> = if verbs.is_empty() {
        vec![ListItem::new("No verbs found").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        verbs
            .iter()
            .enumerate()
            .map(|(i, verb)| {
                let style = if i == browser.selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if verb.is_irregular() { " *" } else { "" };
                ListItem::new(format!("{} - {}{}", verb.foreign, verb.native, marker)).style(style)
            })
            .collect()
    };
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Verbs")),
        body[0],
    );

    let table_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(body[1]);
    f.render_widget(
        Paragraph::new(tense_line(browser.tense)).alignment(Alignment::Center),
        table_chunks[0],
    );

    let rows: Vec<Row> = browser
        .table(content)
        .into_iter()
        .map(|row| Row::new(vec![row.pronoun.to_string(), row.form]))
        .collect();
    let title = browser
        .selected_verb(content)
        .map(|verb| format!("{} ({})", verb.foreign, verb.native))
        .unwrap_or_default();
    let table = Table::new(rows, [Constraint::Percentage(55), Constraint::Percentage(45)])
        .header(
            Row::new(vec!["Pronoun", "Form"]).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, table_chunks[1]);

    let help_text = vec![Line::from(vec![
        key_span("Type"),
        Span::from(" Search  "),
        key_span("↑/↓"),
        Span::from(" Verb  "),
        key_span("←/→"),
        Span::from(" Tense  "),
        key_span("Esc"),
        Span::from(" Menu"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
