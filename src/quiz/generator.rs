use crate::content::LessonQuizSource;
use crate::models::{Direction, Question, Word};
use rand::Rng;
use rand::seq::SliceRandom;

pub const DISTRACTOR_COUNT: usize = 3;

fn answer_text(word: &Word, direction: Direction) -> &str {
    match direction {
        Direction::NativeToForeign => &word.foreign,
        Direction::ForeignToNative => &word.native,
    }
}

fn vocabulary_question<R: Rng + ?Sized>(
    shuffled: &[&Word],
    index: usize,
    rng: &mut R,
) -> Question {
    let word = shuffled[index];
    let direction = if rng.gen_bool(0.5) {
        Direction::NativeToForeign
    } else {
        Direction::ForeignToNative
    };
    let correct = answer_text(word, direction).to_string();

    let mut candidates: Vec<&Word> = shuffled
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, w)| *w)
        .collect();
    candidates.shuffle(rng);

    // Distinct texts only, so the correct answer appears exactly once.
    let mut options = vec![correct.clone()];
    for candidate in candidates {
        if options.len() > DISTRACTOR_COUNT {
            break;
        }
        let text = answer_text(candidate, direction);
        if !options.iter().any(|o| o == text) {
            options.push(text.to_string());
        }
    }
    options.shuffle(rng);
    let correct_index = options
        .iter()
        .position(|o| *o == correct)
        .unwrap_or_default();

    let (prompt, context, source_label) = match direction {
        Direction::NativeToForeign => (
            format!("How do you say \"{}\"?", word.native),
            word.phonetic.as_ref().map(|p| format!("[{}]", p)),
            "Native → Foreign".to_string(),
        ),
        Direction::ForeignToNative => (
            format!("What does \"{}\" mean?", word.foreign),
            word.phonetic
                .as_ref()
                .map(|p| format!("Pronunciation: [{}]", p)),
            "Foreign → Native".to_string(),
        ),
    };

    Question {
        prompt,
        context,
        options,
        correct_index,
        source_label,
    }
}

/// Builds up to `count` translation questions, each from a different word.
pub fn generate_vocabulary_questions<R: Rng + ?Sized>(
    pool: &[Word],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut shuffled: Vec<&Word> = pool.iter().collect();
    shuffled.shuffle(rng);

    let selected = count.min(shuffled.len());
    (0..selected)
        .map(|index| vocabulary_question(&shuffled, index, rng))
        .collect()
}

pub fn generate_lesson_questions<R: Rng + ?Sized>(
    items: &[LessonQuizSource],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut shuffled: Vec<&LessonQuizSource> =
        items.iter().filter(|s| s.item.is_well_formed()).collect();
    shuffled.shuffle(rng);

    shuffled
        .into_iter()
        .take(count)
        .map(|source| Question {
            prompt: source.item.question.clone(),
            context: None,
            options: source.item.options.clone(),
            correct_index: source.item.answer,
            source_label: format!("Lesson: {}", source.lesson_title),
        })
        .collect()
}

/// Vocabulary gets the larger half when `count` is odd.
pub fn generate_mixed_questions<R: Rng + ?Sized>(
    pool: &[Word],
    items: &[LessonQuizSource],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let vocabulary_count = count.div_ceil(2);
    let mut questions = generate_vocabulary_questions(pool, vocabulary_count, rng);
    questions.extend(generate_lesson_questions(
        items,
        count - vocabulary_count,
        rng,
    ));
    questions.shuffle(rng);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LessonQuizItem;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn word(foreign: &str, native: &str) -> Word {
        Word {
            foreign: foreign.to_string(),
            native: native.to_string(),
            phonetic: Some(foreign.to_lowercase()),
            gender: None,
            category: "Test".to_string(),
        }
    }

    fn pool(n: usize) -> Vec<Word> {
        (0..n)
            .map(|i| word(&format!("pl{}", i), &format!("fr{}", i)))
            .collect()
    }

    fn lesson_items(n: usize) -> Vec<LessonQuizSource> {
        (0..n)
            .map(|i| LessonQuizSource {
                lesson_title: format!("Lesson {}", i % 3),
                item: LessonQuizItem {
                    question: format!("Question {}", i),
                    options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    answer: i % 3,
                },
            })
            .collect()
    }

    /// Recovers which word a question was built from.
    fn source_word(question: &Question) -> String {
        question
            .prompt
            .split('"')
            .nth(1)
            .map(|s| s.trim_start_matches("pl").trim_start_matches("fr").to_string())
            .unwrap()
    }

    #[test]
    fn test_exact_count_when_pool_is_large_enough() {
        let words = pool(30);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for count in [0, 1, 4, 10, 30] {
                let questions = generate_vocabulary_questions(&words, count, &mut rng);
                assert_eq!(questions.len(), count);
                for q in &questions {
                    assert!(q.correct_index < q.options.len());
                }
            }
        }
    }

    #[test]
    fn test_source_words_are_not_repeated() {
        let words = pool(25);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = generate_vocabulary_questions(&words, 25, &mut rng);
            let sources: HashSet<String> = questions.iter().map(source_word).collect();
            assert_eq!(sources.len(), 25);
        }
    }

    #[test]
    fn test_short_pool_is_not_padded() {
        let words = pool(5);
        let mut rng = StdRng::seed_from_u64(7);
        let questions = generate_vocabulary_questions(&words, 10, &mut rng);
        assert_eq!(questions.len(), 5);
    }

    #[test]
    fn test_four_distinct_options_with_one_correct() {
        let words = pool(10);
        let mut rng = StdRng::seed_from_u64(42);
        for q in generate_vocabulary_questions(&words, 10, &mut rng) {
            assert_eq!(q.options.len(), 4);
            let distinct: HashSet<&String> = q.options.iter().collect();
            assert_eq!(distinct.len(), 4);

            let source = source_word(&q);
            let expected = if q.source_label == "Native → Foreign" {
                format!("pl{}", source)
            } else {
                format!("fr{}", source)
            };
            assert_eq!(q.correct_option(), expected);
            assert_eq!(q.options.iter().filter(|o| **o == expected).count(), 1);
        }
    }

    #[test]
    fn test_options_follow_question_direction() {
        let words = pool(8);
        let mut rng = StdRng::seed_from_u64(3);
        for q in generate_vocabulary_questions(&words, 8, &mut rng) {
            let prefix = if q.source_label == "Native → Foreign" {
                "pl"
            } else {
                "fr"
            };
            assert!(q.options.iter().all(|o| o.starts_with(prefix)));
        }
    }

    #[test]
    fn test_small_pool_has_fewer_options_and_no_placeholders() {
        let words = pool(3);
        let mut rng = StdRng::seed_from_u64(11);
        for q in generate_vocabulary_questions(&words, 3, &mut rng) {
            assert_eq!(q.options.len(), 3);
            assert!(q.correct_index < 3);
        }

        let single = pool(1);
        let questions = generate_vocabulary_questions(&single, 5, &mut rng);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options.len(), 1);
        assert_eq!(questions[0].correct_index, 0);
    }

    #[test]
    fn test_duplicate_translations_are_not_offered_twice() {
        let words = vec![
            word("zamek", "château"),
            word("zamek", "serrure"),
            word("dom", "maison"),
            word("kot", "chat"),
            word("pies", "chien"),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            for q in generate_vocabulary_questions(&words, 5, &mut rng) {
                let correct = q.correct_option().to_string();
                assert_eq!(q.options.iter().filter(|o| **o == correct).count(), 1);
                let distinct: HashSet<&String> = q.options.iter().collect();
                assert_eq!(distinct.len(), q.options.len());
            }
        }
    }

    #[test]
    fn test_both_directions_occur() {
        let words = pool(40);
        let mut rng = StdRng::seed_from_u64(99);
        let questions = generate_vocabulary_questions(&words, 40, &mut rng);
        let native_to_foreign = questions
            .iter()
            .filter(|q| q.source_label == "Native → Foreign")
            .count();
        assert!(native_to_foreign > 5 && native_to_foreign < 35);
    }

    #[test]
    fn test_context_carries_phonetic() {
        let mut words = pool(4);
        words[0].phonetic = None;
        let mut rng = StdRng::seed_from_u64(1);
        for q in generate_vocabulary_questions(&words, 4, &mut rng) {
            if source_word(&q) == "0" {
                assert!(q.context.is_none());
            } else {
                assert!(q.context.as_deref().unwrap().contains('['));
            }
        }
    }

    #[test]
    fn test_same_seed_same_questions() {
        let words = pool(12);
        let a = generate_vocabulary_questions(&words, 6, &mut StdRng::seed_from_u64(8));
        let b = generate_vocabulary_questions(&words, 6, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }

    #[test]
    fn test_lesson_questions_are_labelled_and_capped() {
        let items = lesson_items(6);
        let mut rng = StdRng::seed_from_u64(2);

        let questions = generate_lesson_questions(&items, 4, &mut rng);
        assert_eq!(questions.len(), 4);
        let prompts: HashSet<&String> = questions.iter().map(|q| &q.prompt).collect();
        assert_eq!(prompts.len(), 4);
        for q in &questions {
            assert!(q.source_label.starts_with("Lesson: Lesson "));
            assert!(q.context.is_none());
        }

        let all = generate_lesson_questions(&items, 50, &mut rng);
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn test_lesson_questions_keep_correct_answer() {
        let items = lesson_items(5);
        let mut rng = StdRng::seed_from_u64(4);
        for q in generate_lesson_questions(&items, 5, &mut rng) {
            let n: usize = q.prompt.trim_start_matches("Question ").parse().unwrap();
            assert_eq!(q.correct_index, n % 3);
        }
    }

    #[test]
    fn test_malformed_lesson_items_are_ignored() {
        let mut items = lesson_items(2);
        items[1].item.answer = 9;
        let mut rng = StdRng::seed_from_u64(4);
        let questions = generate_lesson_questions(&items, 5, &mut rng);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt, "Question 0");
    }

    #[test]
    fn test_mixed_split_rounds_vocabulary_up() {
        let words = pool(20);
        let items = lesson_items(20);
        let mut rng = StdRng::seed_from_u64(6);

        let questions = generate_mixed_questions(&words, &items, 7, &mut rng);
        assert_eq!(questions.len(), 7);
        let lessons = questions
            .iter()
            .filter(|q| q.source_label.starts_with("Lesson"))
            .count();
        assert_eq!(lessons, 3);
    }

    #[test]
    fn test_mixed_is_shorter_when_a_pool_runs_out() {
        let words = pool(2);
        let items = lesson_items(20);
        let mut rng = StdRng::seed_from_u64(6);

        let questions = generate_mixed_questions(&words, &items, 10, &mut rng);
        assert_eq!(questions.len(), 7);
    }

    #[test]
    fn test_mixed_questions_are_interleaved() {
        let words = pool(20);
        let items = lesson_items(20);
        let is_lesson = |q: &Question| q.source_label.starts_with("Lesson: ");

        let interleaved = (0..20)
            .filter(|seed| {
                let mut rng = StdRng::seed_from_u64(*seed);
                let questions = generate_mixed_questions(&words, &items, 10, &mut rng);
                let first_lesson = questions.iter().position(is_lesson).unwrap();
                questions[first_lesson..].iter().any(|q| !is_lesson(q))
            })
            .count();
        assert!(interleaved > 10);
    }
}
