mod deck;
pub mod layout;
mod lessons;
mod menu;
mod phrases;
mod quiz;
mod summary;
mod verbs;

pub use deck::{card_text, draw_deck};
pub use lessons::{draw_lessons, lesson_text};
pub use layout::{calculate_deck_chunks, calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::{MenuView, draw_menu, format_stats};
pub use phrases::{draw_phrases, phrase_lines};
pub use quiz::{draw_quit_confirmation, draw_quiz, truncation_notice};
pub use summary::draw_summary;
pub use verbs::{draw_verbs, tense_line};

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

pub(crate) fn key_span(label: &str) -> Span<'_> {
    Span::styled(
        label,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
