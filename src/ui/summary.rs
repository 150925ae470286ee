use crate::models::{QuizMode, QuizSummary, Tier};
use crate::ui::key_span;
use crate::ui::layout::calculate_summary_chunks;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Perfect | Tier::Excellent => Color::Green,
        Tier::Good => Color::Cyan,
        Tier::KeepPracticing => Color::Yellow,
        Tier::NeedsReview => Color::Red,
    }
}

pub fn draw_summary(f: &mut Frame, summary: &QuizSummary, mode: QuizMode, score: u32) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new(format!("Quiz Results - {}", mode.label()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        format!("{}%", summary.percentage),
        Style::default()
            .fg(tier_color(summary.tier))
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "Correct answers: {} / {}",
        summary.correct, summary.total
    )));
    text.push_line(Line::from(format!("Incorrect answers: {}", summary.incorrect)));
    text.push_line(Line::from(format!("Score: {} pts", score)));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        summary.tier.message(),
        Style::default().fg(tier_color(summary.tier)),
    )));

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.content_area);

    let help_text = vec![Line::from(vec![
        key_span("r"),
        Span::from(" Retry  "),
        key_span("m"),
        Span::from(" Main Menu  "),
        key_span("q"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
