use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lingo_cards::{
    AppConfig, AppState, ContentRepository, QuizMode, QuizSession, QuizSummary,
    browse::{self, FlashcardDeck, LessonBrowser, PhraseBrowser, VerbBrowser},
    content::ContentError,
    db::{SqliteStore, init_db},
    logger,
    progress::{self, GlobalProgress, QuizStats},
    quiz::new_session,
    session::{
        MenuAction, MenuState, QuizInput, SummaryAction, handle_deck_input, handle_lessons_input,
        handle_menu_input, handle_phrases_input, handle_quit_confirm, handle_quiz_input,
        handle_summary_input, handle_verbs_input, is_exit_key,
    },
    ui::{
        MenuView, draw_deck, draw_lessons, draw_menu, draw_phrases, draw_quit_confirmation,
        draw_quiz, draw_summary, draw_verbs,
    },
    utils::unix_now,
};
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::HashSet;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("progress database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
}

struct ActiveQuiz {
    mode: QuizMode,
    count: usize,
    session: QuizSession,
}

struct App {
    config: AppConfig,
    content: ContentRepository,
    store: SqliteStore,
    rng: ThreadRng,
    app_state: AppState,
    menu: MenuState,
    quiz: Option<ActiveQuiz>,
    summary: Option<QuizSummary>,
    deck: Option<FlashcardDeck>,
    lessons: LessonBrowser,
    phrases: PhraseBrowser,
    verbs: VerbBrowser,
    status: Option<String>,
}

impl App {
    fn category_ids(&self) -> Vec<String> {
        self.content
            .vocabulary
            .categories
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    fn start_quiz(&mut self, mode: QuizMode, count: usize) {
        let start = new_session(&self.content, mode, count, self.config.policy, &mut self.rng);
        if start.session.is_complete() {
            self.status = Some(format!("No {} questions available", mode.label()));
            self.app_state = AppState::Menu;
            return;
        }
        logger::log(&format!(
            "Starting {} quiz with {} questions",
            mode.label(),
            start.session.effective_total
        ));
        self.status = None;
        self.summary = None;
        self.quiz = Some(ActiveQuiz {
            mode,
            count,
            session: start.session,
        });
        self.app_state = AppState::Quiz;
    }

    fn finish_quiz(&mut self) -> rusqlite::Result<()> {
        let Some(quiz) = &self.quiz else {
            return Ok(());
        };
        let summary = quiz.session.finalize();
        progress::record_quiz_result(&mut self.store, &summary, unix_now())?;
        self.summary = Some(summary);
        Ok(())
    }

    fn menu_data(&self) -> rusqlite::Result<(Vec<browse::CategoryProgress>, QuizStats, GlobalProgress)> {
        let mut category_progress = Vec::new();
        for category in &self.content.vocabulary.categories {
            let learned = progress::learned_words(&self.store, &category.id)?;
            category_progress.push(browse::category_progress(category, &learned));
        }
        let stats = progress::quiz_stats(&self.store)?;
        let global = progress::global_progress(&self.store, &self.content)?;
        Ok((category_progress, stats, global))
    }

    fn completed_lessons(&self) -> rusqlite::Result<HashSet<String>> {
        let mut completed = HashSet::new();
        for lesson in &self.content.lessons.lessons {
            if progress::is_lesson_complete(&self.store, &lesson.id)? {
                completed.insert(lesson.id.clone());
            }
        }
        Ok(completed)
    }

    fn current_card_learned(&self) -> rusqlite::Result<bool> {
        match &self.deck {
            Some(deck) => match deck.current() {
                Some(word) => progress::is_learned(&self.store, &deck.category_id, word),
                None => Ok(false),
            },
            None => Ok(false),
        }
    }
}

fn main() -> Result<(), AppError> {
    logger::init();
    let config = AppConfig::from_env();

    let content = match ContentRepository::load(&config.data_dir) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to load learning content: {}", e);
            return Err(e.into());
        }
    };
    let store = SqliteStore::new(init_db(&config.db_path)?);
    logger::log(&format!(
        "Loaded {} words and {} lessons from {}",
        content.total_words(),
        content.lessons.lessons.len(),
        config.data_dir.display()
    ));

    let mut app = App {
        config,
        content,
        store,
        rng: rand::thread_rng(),
        app_state: AppState::Menu,
        menu: MenuState::default(),
        quiz: None,
        summary: None,
        deck: None,
        lessons: LessonBrowser::default(),
        phrases: PhraseBrowser::default(),
        verbs: VerbBrowser::default(),
        status: None,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exiting with error: {}", e));
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), AppError> {
    loop {
        let menu_data = match app.app_state {
            AppState::Menu => Some(app.menu_data()?),
            _ => None,
        };
        let card_learned = app.current_card_learned()?;
        let completed = match app.app_state {
            AppState::Lessons => app.completed_lessons()?,
            _ => HashSet::new(),
        };
        let favorites = match app.app_state {
            AppState::Phrases => progress::favorites(&app.store)?,
            _ => Vec::new(),
        };

        terminal.draw(|f| match app.app_state {
            AppState::Menu => {
                if let Some((category_progress, stats, global)) = &menu_data {
                    let view = MenuView {
                        categories: &app.content.vocabulary.categories,
                        category_progress,
                        stats: *stats,
                        global: *global,
                        status: app.status.as_deref(),
                    };
                    draw_menu(f, &app.menu, &view);
                }
            }
            AppState::Quiz => {
                if let Some(quiz) = &app.quiz {
                    draw_quiz(f, &quiz.session);
                }
            }
            AppState::QuizQuitConfirm => draw_quit_confirmation(f),
            AppState::Summary => {
                if let (Some(quiz), Some(summary)) = (&app.quiz, &app.summary) {
                    draw_summary(f, summary, quiz.mode, quiz.session.score);
                }
            }
            AppState::Deck => {
                if let Some(deck) = &app.deck {
                    draw_deck(f, deck, card_learned, app.status.as_deref());
                }
            }
            AppState::Lessons => {
                draw_lessons(f, &app.lessons, &app.content, &completed, app.status.as_deref())
            }
            AppState::Phrases => {
                let groups = app.phrases.results(&app.content, &favorites);
                draw_phrases(f, &app.phrases, &groups, app.status.as_deref());
            }
            AppState::Verbs => draw_verbs(f, &app.verbs, &app.content),
        })?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_exit_key(&key) {
            break;
        }

        match app.app_state {
            AppState::Menu => {
                let category_ids = app.category_ids();
                match handle_menu_input(&mut app.menu, key, &category_ids) {
                    MenuAction::StartQuiz(mode, count) => app.start_quiz(mode, count),
                    MenuAction::OpenDeck(id) => {
                        if let Some(category) = app.content.category(&id) {
                            app.deck = Some(FlashcardDeck::new(category));
                            app.status = None;
                            app.app_state = AppState::Deck;
                        }
                    }
                    MenuAction::OpenLessons => {
                        app.status = None;
                        app.app_state = AppState::Lessons;
                    }
                    MenuAction::OpenPhrases => {
                        app.status = None;
                        app.app_state = AppState::Phrases;
                    }
                    MenuAction::OpenVerbs => {
                        app.status = None;
                        app.app_state = AppState::Verbs;
                    }
                    MenuAction::Quit => break,
                    MenuAction::None => {}
                }
            }
            AppState::Quiz => {
                let completed = match &mut app.quiz {
                    Some(quiz) => {
                        handle_quiz_input(&mut quiz.session, key, &mut app.app_state)
                            == QuizInput::Completed
                    }
                    None => false,
                };
                if completed {
                    app.finish_quiz()?;
                }
            }
            AppState::QuizQuitConfirm => {
                if handle_quit_confirm(key, &mut app.app_state) {
                    logger::log("Quiz abandoned");
                    app.quiz = None;
                }
            }
            AppState::Summary => match handle_summary_input(key, &mut app.app_state) {
                SummaryAction::Retry => {
                    if let Some((mode, count)) = app.quiz.as_ref().map(|q| (q.mode, q.count)) {
                        app.start_quiz(mode, count);
                    }
                }
                SummaryAction::Menu => {
                    app.quiz = None;
                    app.summary = None;
                }
                SummaryAction::Quit => break,
                SummaryAction::None => {}
            },
            AppState::Deck => {
                if let Some(deck) = &mut app.deck {
                    app.status =
                        handle_deck_input(deck, key, &mut app.store, &mut app.app_state, &mut app.rng)?;
                }
                if app.app_state == AppState::Menu {
                    app.deck = None;
                    app.status = None;
                }
            }
            AppState::Lessons => {
                app.status = handle_lessons_input(
                    &mut app.lessons,
                    key,
                    &app.content,
                    &mut app.store,
                    &mut app.app_state,
                )?;
            }
            AppState::Phrases => {
                app.status = handle_phrases_input(
                    &mut app.phrases,
                    key,
                    &app.content,
                    &mut app.store,
                    &mut app.app_state,
                )?;
            }
            AppState::Verbs => {
                handle_verbs_input(&mut app.verbs, key, &app.content, &mut app.app_state)
            }
        }
    }

    Ok(())
}
