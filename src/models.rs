use crate::config::QuizPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    #[serde(alias = "pl")]
    pub foreign: String,
    #[serde(alias = "fr")]
    pub native: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub category: String,
}

impl Word {
    /// Key under which this word is remembered as learned.
    pub fn learned_key(&self) -> String {
        format!("{}_{}", self.foreign, self.native)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonQuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl LessonQuizItem {
    pub fn is_well_formed(&self) -> bool {
        (2..=4).contains(&self.options.len()) && self.answer < self.options.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    NativeToForeign,
    ForeignToNative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub context: Option<String>,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub source_label: String,
}

impl Question {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    Vocabulary,
    Lessons,
    Mixed,
}

impl QuizMode {
    pub const ALL: [QuizMode; 3] = [QuizMode::Vocabulary, QuizMode::Lessons, QuizMode::Mixed];

    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Vocabulary => "Vocabulary",
            QuizMode::Lessons => "Lessons",
            QuizMode::Mixed => "Mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_index: usize,
    pub chosen_index: usize,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    pub questions: Vec<Question>,
    pub position: usize,
    pub score: u32,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub requested_total: usize,
    pub effective_total: usize,
    pub state: SessionState,
    pub current_outcome: Option<AnswerOutcome>,
    pub policy: QuizPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Perfect,
    Excellent,
    Good,
    KeepPracticing,
    NeedsReview,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Perfect => "perfect",
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::KeepPracticing => "keep-practicing",
            Tier::NeedsReview => "needs-review",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Perfect => "Perfect score! You are incredible!",
            Tier::Excellent => "Excellent result! Keep it up!",
            Tier::Good => "Good work! A little more effort!",
            Tier::KeepPracticing => "Keep practicing, you are improving!",
            Tier::NeedsReview => "Review the lessons and try again!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub percentage: u32,
    pub tier: Tier,
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Summary,
    Deck,
    Lessons,
    Phrases,
    Verbs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learned_key_joins_foreign_and_native() {
        let word = Word {
            foreign: "kot".to_string(),
            native: "chat".to_string(),
            phonetic: None,
            gender: None,
            category: "Animals".to_string(),
        };
        assert_eq!(word.learned_key(), "kot_chat");
    }

    #[test]
    fn test_lesson_quiz_item_well_formed() {
        let item = |n: usize, answer: usize| LessonQuizItem {
            question: "Q".to_string(),
            options: (0..n).map(|i| i.to_string()).collect(),
            answer,
        };
        assert!(item(2, 1).is_well_formed());
        assert!(item(4, 3).is_well_formed());
        assert!(!item(1, 0).is_well_formed());
        assert!(!item(5, 0).is_well_formed());
        assert!(!item(3, 3).is_well_formed());
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(Tier::KeepPracticing.as_str(), "keep-practicing");
        assert_eq!(Tier::NeedsReview.as_str(), "needs-review");
    }
}
