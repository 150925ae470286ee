use crate::models::QuizSession;
use crate::ui::key_span;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::option_letter;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

fn option_style(session: &QuizSession, index: usize) -> Style {
    let Some(outcome) = session.current_outcome else {
        return Style::default();
    };
    if index == outcome.correct_index {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if index == outcome.chosen_index {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Shown when the pool could not fill the requested length.
pub fn truncation_notice(session: &QuizSession) -> Option<String> {
    (session.effective_total < session.requested_total).then(|| {
        format!(
            "Only {} questions available ({} requested)",
            session.effective_total, session.requested_total
        )
    })
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_quiz_chunks(f.area());
    let Some(question) = session.current_question() else {
        return;
    };

    let header_text = format!(
        "Question {} / {}  |  Score: {} pts",
        session.position + 1,
        session.effective_total,
        session.score
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

    let ratio = if session.effective_total == 0 {
        0.0
    } else {
        session.position as f64 / session.effective_total as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, layout.progress_area);

    let mut question_text = Text::default();
    question_text.push_line(Line::from(Span::styled(
        question.source_label.as_str(),
        Style::default().fg(Color::DarkGray),
    )));
    question_text.push_line(Line::from(""));
    question_text.push_line(Line::from(Span::styled(
        question.prompt.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if let Some(context) = &question.context {
        question_text.push_line(Line::from(Span::styled(
            context.as_str(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    if session.position == 0
        && let Some(notice) = truncation_notice(session)
    {
        question_text.push_line(Line::from(""));
        question_text.push_line(Line::from(Span::styled(
            notice,
            Style::default().fg(Color::Yellow),
        )));
    }
    let question_widget = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    let option_lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            Line::from(Span::styled(
                format!("{}. {}", option_letter(i), option),
                option_style(session, i),
            ))
        })
        .collect();
    let options_title = match session.current_outcome {
        Some(outcome) if outcome.correct => "Correct!",
        Some(_) => "Incorrect",
        None => "Options",
    };
    let options = Paragraph::new(option_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(options_title));
    f.render_widget(options, layout.options_area);

    let mut help_spans = Vec::new();
    if session.is_answered() {
        help_spans.extend([key_span("Enter"), Span::from(" Next  ")]);
    } else {
        help_spans.extend([
            key_span("1-4 / A-D"),
            Span::from(" Answer  "),
        ]);
    }
    help_spans.extend([key_span("Esc"), Span::from(" Quit to Menu")]);
    let help_text = vec![
        Line::from(help_spans),
        Line::from(vec![key_span("Ctrl+C"), Span::from(" Exit App")]),
    ];
    let help = Paragraph::new(help_text)
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

    let title = Paragraph::new("Quit Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Abandon this quiz? Your score will not be saved.")
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
        Span::from(" No (Continue Quiz)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizPolicy;
    use crate::models::Question;
    use crate::quiz::start_session;

    fn question() -> Question {
        Question {
            prompt: "How do you say \"pain\"?".to_string(),
            context: None,
            options: vec!["chleb".to_string(), "woda".to_string()],
            correct_index: 0,
            source_label: "Native → Foreign".to_string(),
        }
    }

    #[test]
    fn test_truncation_notice() {
        let start = start_session(vec![question()], 10, QuizPolicy::default());
        assert_eq!(
            truncation_notice(&start.session).as_deref(),
            Some("Only 1 questions available (10 requested)")
        );

        let full = start_session(vec![question()], 1, QuizPolicy::default());
        assert!(truncation_notice(&full.session).is_none());
    }

    #[test]
    fn test_option_style_after_answer() {
        let mut session = start_session(vec![question()], 1, QuizPolicy::default()).session;
        assert_eq!(option_style(&session, 0), Style::default());

        session.submit_answer(1);
        assert_eq!(option_style(&session, 0).fg, Some(Color::Green));
        assert_eq!(option_style(&session, 1).fg, Some(Color::Red));
    }
}
