use crate::browse::FlashcardDeck;
use crate::ui::key_span;
use crate::ui::layout::calculate_deck_chunks;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Card text for the current side of the current word.
pub fn card_text(deck: &FlashcardDeck, learned: bool) -> Text<'static> {
    let Some(word) = deck.current() else {
        return Text::from("No words to show");
    };

    let mut text = Text::default();
    text.push_line(Line::from(""));
    if deck.flipped {
        text.push_line(Line::from(Span::styled(
            word.foreign.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(phonetic) = &word.phonetic {
            text.push_line(Line::from(Span::styled(
                format!("[{}]", phonetic),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        if let Some(gender) = &word.gender {
            text.push_line(Line::from(format!("({})", gender)));
        }
    } else {
        text.push_line(Line::from(Span::styled(
            word.native.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    if learned {
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            "✓ learned",
            Style::default().fg(Color::Green),
        )));
    }
    text
}

pub fn draw_deck(f: &mut Frame, deck: &FlashcardDeck, learned: bool, status: Option<&str>) {
    let layout = calculate_deck_chunks(f.area());

    let mode = if deck.review_mode { "  [review]" } else { "" };
    let header_text = format!(
        "{}  |  Card {} / {}{}",
        deck.category_name,
        (deck.index + 1).min(deck.words.len()),
        deck.words.len(),
        mode
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let side = if deck.flipped { "Translation" } else { "Word" };
    let card = Paragraph::new(card_text(deck, learned))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(side));
    f.render_widget(card, layout.card_area);

    if let Some(status) = status {
        let line = Paragraph::new(status)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(line, layout.status_area);
    }

    let help_text = vec![Line::from(vec![
        key_span("←/→"),
        Span::from(" Navigate  "),
        key_span("Space"),
        Span::from(" Flip  "),
        key_span("l"),
        Span::from(" Learned  "),
        key_span("s"),
        Span::from(" Shuffle  "),
        key_span("v"),
        Span::from(" Review  "),
        key_span("Esc"),
        Span::from(" Back"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
