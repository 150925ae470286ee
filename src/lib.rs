pub mod browse;
pub mod config;
pub mod content;
pub mod db;
pub mod logger;
pub mod models;
pub mod progress;
pub mod quiz;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use config::{AppConfig, QuizPolicy};
pub use content::{ContentError, ContentRepository};
pub use db::{MemoryStore, ProgressStore, SqliteStore};
pub use models::{AppState, Question, QuizMode, QuizSession, QuizSummary, Tier};
pub use quiz::{SessionStart, new_session, start_session};
pub use session::handle_quiz_input;
