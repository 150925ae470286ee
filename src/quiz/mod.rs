pub mod engine;
pub mod generator;

pub use engine::{SessionStart, percentage, start_session, tier_for};
pub use generator::{
    generate_lesson_questions, generate_mixed_questions, generate_vocabulary_questions,
};

use crate::config::QuizPolicy;
use crate::content::ContentRepository;
use crate::models::{Question, QuizMode};
use rand::Rng;

pub fn generate_questions<R: Rng + ?Sized>(
    content: &ContentRepository,
    mode: QuizMode,
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    match mode {
        QuizMode::Vocabulary => generate_vocabulary_questions(&content.word_pool(), count, rng),
        QuizMode::Lessons => generate_lesson_questions(&content.lesson_quiz_pool(), count, rng),
        QuizMode::Mixed => generate_mixed_questions(
            &content.word_pool(),
            &content.lesson_quiz_pool(),
            count,
            rng,
        ),
    }
}

/// Generates questions for `mode` and opens a session over them.
pub fn new_session<R: Rng + ?Sized>(
    content: &ContentRepository,
    mode: QuizMode,
    count: usize,
    policy: QuizPolicy,
    rng: &mut R,
) -> SessionStart {
    start_session(generate_questions(content, mode, count, rng), count, policy)
}
