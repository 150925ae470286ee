use crate::config::QuizPolicy;
use crate::logger;
use crate::models::{AnswerOutcome, Question, QuizSession, QuizSummary, SessionState, Tier};

/// A freshly started session plus whether it came out shorter than requested.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub session: QuizSession,
    pub truncated: bool,
}

pub fn start_session(
    mut questions: Vec<Question>,
    requested_total: usize,
    policy: QuizPolicy,
) -> SessionStart {
    let truncated = questions.len() < requested_total;
    let effective_total = questions.len().min(requested_total);
    questions.truncate(effective_total);

    if truncated {
        logger::log(&format!(
            "Quiz shortened: {} questions available, {} requested",
            effective_total, requested_total
        ));
    }

    let state = if effective_total == 0 {
        SessionState::Complete
    } else {
        SessionState::InProgress
    };

    SessionStart {
        session: QuizSession {
            questions,
            position: 0,
            score: 0,
            correct_count: 0,
            incorrect_count: 0,
            requested_total,
            effective_total,
            state,
            current_outcome: None,
            policy,
        },
        truncated,
    }
}

pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

pub fn tier_for(percentage: u32, policy: &QuizPolicy) -> Tier {
    if percentage >= policy.perfect_threshold {
        Tier::Perfect
    } else if percentage >= policy.excellent_threshold {
        Tier::Excellent
    } else if percentage >= policy.good_threshold {
        Tier::Good
    } else if percentage >= policy.keep_practicing_threshold {
        Tier::KeepPracticing
    } else {
        Tier::NeedsReview
    }
}

impl QuizSession {
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.position)
    }

    pub fn is_answered(&self) -> bool {
        self.current_outcome.is_some()
    }

    /// Scores the answer for the current question. A repeated call before
    /// `advance` returns the first outcome unchanged.
    pub fn submit_answer(&mut self, option_index: usize) -> Option<AnswerOutcome> {
        if let Some(outcome) = self.current_outcome {
            return Some(outcome);
        }
        let correct_index = self.current_question()?.correct_index;

        let correct = option_index == correct_index;
        if correct {
            self.score += self.policy.points_per_correct;
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }

        let outcome = AnswerOutcome {
            correct,
            correct_index,
            chosen_index: option_index,
        };
        self.current_outcome = Some(outcome);
        Some(outcome)
    }

    pub fn advance(&mut self) -> SessionState {
        if self.is_complete() {
            return self.state;
        }
        self.position += 1;
        self.current_outcome = None;
        if self.position >= self.effective_total {
            self.position = self.effective_total;
            self.state = SessionState::Complete;
        }
        self.state
    }

    pub fn finalize(&self) -> QuizSummary {
        let percentage = percentage(self.correct_count, self.effective_total);
        QuizSummary {
            correct: self.correct_count,
            incorrect: self.incorrect_count,
            total: self.effective_total,
            percentage,
            tier: tier_for(percentage, &self.policy),
        }
    }
}
