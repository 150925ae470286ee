use crate::browse::{
    DeckMove, FlashcardDeck, LessonBrowser, PhraseBrowser, ReviewToggle, VerbBrowser,
};
use crate::content::ContentRepository;
use crate::config::QUIZ_LENGTHS;
use crate::db::ProgressStore;
use crate::logger;
use crate::models::{AppState, QuizMode, QuizSession, SessionState};
use crate::progress;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    Ignored,
    Answered,
    Advanced,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    None,
    StartQuiz(QuizMode, usize),
    OpenDeck(String),
    OpenLessons,
    OpenPhrases,
    OpenVerbs,
    Quit,
}

/// Rows are the quiz modes followed by one flashcard deck per category.
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    pub selected_row: usize,
    pub length_index: usize,
}

impl MenuState {
    pub fn quiz_length(&self) -> usize {
        QUIZ_LENGTHS[self.length_index % QUIZ_LENGTHS.len()]
    }
}

fn answer_index(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c @ '1'..='4') => Some(c as usize - '1' as usize),
        KeyCode::Char(c @ 'a'..='d') => Some(c as usize - 'a' as usize),
        KeyCode::Char(c @ 'A'..='D') => Some(c as usize - 'A' as usize),
        _ => None,
    }
}

pub fn handle_quiz_input(
    session: &mut QuizSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> QuizInput {
    match key.code {
        KeyCode::Esc => {
            *app_state = AppState::QuizQuitConfirm;
            QuizInput::Ignored
        }
        KeyCode::Enter if session.is_answered() => {
            if session.advance() == SessionState::Complete {
                *app_state = AppState::Summary;
                QuizInput::Completed
            } else {
                QuizInput::Advanced
            }
        }
        code if !session.is_answered() => {
            let Some(index) = answer_index(code) else {
                return QuizInput::Ignored;
            };
            let option_count = session
                .current_question()
                .map(|q| q.options.len())
                .unwrap_or(0);
            if index >= option_count {
                return QuizInput::Ignored;
            }
            match session.submit_answer(index) {
                Some(outcome) => {
                    logger::log(&format!(
                        "Question {} answered: chose {}, correct {}",
                        session.position + 1,
                        outcome.chosen_index,
                        outcome.correct_index
                    ));
                    QuizInput::Answered
                }
                None => QuizInput::Ignored,
            }
        }
        _ => QuizInput::Ignored,
    }
}

/// Returns true when the learner confirmed abandoning the quiz.
pub fn handle_quit_confirm(key: KeyEvent, app_state: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            *app_state = AppState::Menu;
            true
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            *app_state = AppState::Quiz;
            false
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    None,
    Retry,
    Menu,
    Quit,
}

pub fn handle_summary_input(key: KeyEvent, app_state: &mut AppState) -> SummaryAction {
    match key.code {
        KeyCode::Char('r') => {
            *app_state = AppState::Quiz;
            SummaryAction::Retry
        }
        KeyCode::Char('m') | KeyCode::Esc => {
            *app_state = AppState::Menu;
            SummaryAction::Menu
        }
        KeyCode::Char('q') => SummaryAction::Quit,
        _ => SummaryAction::None,
    }
}

pub fn handle_menu_input(
    menu: &mut MenuState,
    key: KeyEvent,
    category_ids: &[String],
) -> MenuAction {
    let rows = QuizMode::ALL.len() + category_ids.len();
    match key.code {
        KeyCode::Up => {
            menu.selected_row = menu.selected_row.saturating_sub(1);
            MenuAction::None
        }
        KeyCode::Down => {
            if menu.selected_row + 1 < rows {
                menu.selected_row += 1;
            }
            MenuAction::None
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            menu.length_index = (menu.length_index + 1) % QUIZ_LENGTHS.len();
            MenuAction::None
        }
        KeyCode::Enter => {
            if let Some(mode) = QuizMode::ALL.get(menu.selected_row) {
                MenuAction::StartQuiz(*mode, menu.quiz_length())
            } else if let Some(id) = category_ids.get(menu.selected_row - QuizMode::ALL.len()) {
                MenuAction::OpenDeck(id.clone())
            } else {
                MenuAction::None
            }
        }
        KeyCode::Char('d') => {
            let deck_row = menu.selected_row.saturating_sub(QuizMode::ALL.len());
            match category_ids.get(deck_row).or_else(|| category_ids.first()) {
                Some(id) => MenuAction::OpenDeck(id.clone()),
                None => MenuAction::None,
            }
        }
        KeyCode::Char('l') => MenuAction::OpenLessons,
        KeyCode::Char('p') => MenuAction::OpenPhrases,
        KeyCode::Char('v') => MenuAction::OpenVerbs,
        KeyCode::Char('q') | KeyCode::Esc => MenuAction::Quit,
        _ => MenuAction::None,
    }
}

/// Applies a key to the flashcard deck and returns a short status message
/// for the learner, if any.
pub fn handle_deck_input<R: Rng + ?Sized>(
    deck: &mut FlashcardDeck,
    key: KeyEvent,
    store: &mut dyn ProgressStore,
    app_state: &mut AppState,
    rng: &mut R,
) -> rusqlite::Result<Option<String>> {
    let message = match key.code {
        KeyCode::Esc => {
            *app_state = AppState::Menu;
            None
        }
        KeyCode::Right => match deck.next() {
            DeckMove::EndOfDeck => Some("End of the category!".to_string()),
            _ => None,
        },
        KeyCode::Left => {
            deck.prev();
            None
        }
        KeyCode::Char(' ') => {
            deck.flip();
            None
        }
        KeyCode::Char('s') => {
            deck.shuffle(rng);
            Some("Cards shuffled!".to_string())
        }
        KeyCode::Char('l') => match deck.current().cloned() {
            Some(word) => {
                if progress::toggle_learned(store, &deck.category_id, &word)? {
                    Some("Word marked as learned!".to_string())
                } else {
                    Some("Word removed from learned".to_string())
                }
            }
            None => None,
        },
        KeyCode::Char('v') => {
            let learned = progress::learned_words(store, &deck.category_id)?;
            match deck.toggle_review_mode(&learned) {
                ReviewToggle::Reviewing(n) => Some(format!("{} words to review", n)),
                ReviewToggle::AllLearned => {
                    Some("Every word in this category is learned!".to_string())
                }
                ReviewToggle::Learning => None,
            }
        }
        _ => None,
    };
    Ok(message)
}

/// List keys pick and filter lessons; inside a lesson the arrows scroll and
/// `c` toggles completion.
pub fn handle_lessons_input(
    browser: &mut LessonBrowser,
    key: KeyEvent,
    content: &ContentRepository,
    store: &mut dyn ProgressStore,
    app_state: &mut AppState,
) -> rusqlite::Result<Option<String>> {
    let Some(lesson_id) = browser.reading.clone() else {
        match key.code {
            KeyCode::Up => browser.select(false, content),
            KeyCode::Down => browser.select(true, content),
            KeyCode::Tab | KeyCode::Char('f') => browser.cycle_level(content),
            KeyCode::Enter => {
                browser.open(content);
            }
            KeyCode::Esc => *app_state = AppState::Menu,
            _ => {}
        }
        return Ok(None);
    };

    let message = match key.code {
        KeyCode::Up => {
            browser.scroll = browser.scroll.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            browser.scroll = browser.scroll.saturating_add(1);
            None
        }
        KeyCode::Char('c') => {
            let complete = !progress::is_lesson_complete(store, &lesson_id)?;
            progress::set_lesson_complete(store, &lesson_id, complete)?;
            logger::log(&format!("Lesson {} complete: {}", lesson_id, complete));
            if complete {
                Some("Lesson completed!".to_string())
            } else {
                Some("Lesson marked as not completed".to_string())
            }
        }
        KeyCode::Esc => {
            browser.close();
            None
        }
        _ => None,
    };
    Ok(message)
}

fn is_text_input(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

/// Typing edits the search; Enter toggles the highlighted favorite and Tab
/// switches to favorites only.
pub fn handle_phrases_input(
    browser: &mut PhraseBrowser,
    key: KeyEvent,
    content: &ContentRepository,
    store: &mut dyn ProgressStore,
    app_state: &mut AppState,
) -> rusqlite::Result<Option<String>> {
    if let Some(c) = is_text_input(&key) {
        browser.push_char(c);
        return Ok(None);
    }

    let message = match key.code {
        KeyCode::Backspace => {
            browser.pop_char();
            None
        }
        KeyCode::Up | KeyCode::Down => {
            let favorites = progress::favorites(store)?;
            let groups = browser.results(content, &favorites);
            browser.select(key.code == KeyCode::Down, &groups);
            None
        }
        KeyCode::Tab => {
            browser.toggle_favorites_only();
            None
        }
        KeyCode::Enter => {
            let favorites = progress::favorites(store)?;
            let groups = browser.results(content, &favorites);
            match browser.selected_hit(&groups).map(|hit| hit.id.clone()) {
                Some(id) => {
                    if progress::toggle_favorite(store, &id)? {
                        Some("Added to favorites".to_string())
                    } else {
                        Some("Removed from favorites".to_string())
                    }
                }
                None => None,
            }
        }
        KeyCode::Esc => {
            *app_state = AppState::Menu;
            None
        }
        _ => None,
    };
    Ok(message)
}

/// Typing edits the search; the arrows pick a verb and ←/→ pick the tense.
pub fn handle_verbs_input(
    browser: &mut VerbBrowser,
    key: KeyEvent,
    content: &ContentRepository,
    app_state: &mut AppState,
) {
    if let Some(c) = is_text_input(&key) {
        browser.push_char(c);
        return;
    }
    match key.code {
        KeyCode::Backspace => browser.pop_char(),
        KeyCode::Up => browser.select(false, content),
        KeyCode::Down => browser.select(true, content),
        KeyCode::Right | KeyCode::Tab => browser.cycle_tense(true),
        KeyCode::Left => browser.cycle_tense(false),
        KeyCode::Esc => *app_state = AppState::Menu,
        _ => {}
    }
}

pub fn is_exit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
