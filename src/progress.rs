//! Learner progress kept in a [`ProgressStore`]: learned words, finished
//! lessons, favorite phrases and quiz running totals.

use crate::browse::category_progress;
use crate::content::ContentRepository;
use crate::db::ProgressStore;
use crate::logger;
use crate::models::{QuizSummary, Word};
use crate::quiz::percentage;
use rusqlite::Result;

pub const QUIZ_TOTAL_PLAYED: &str = "quiz_total_played";
pub const QUIZ_TOTAL_CORRECT: &str = "quiz_total_correct";
pub const QUIZ_BEST_SCORE: &str = "quiz_best_score";
pub const QUIZ_LAST_PLAYED: &str = "quiz_last_played";
pub const PHRASE_FAVORITES: &str = "phrase_favorites";

pub fn learned_key(category_id: &str) -> String {
    format!("vocab_learned_{}", category_id)
}

pub fn lesson_key(lesson_id: &str) -> String {
    format!("lesson_complete_{}", lesson_id)
}

pub fn phrase_id(category_id: &str, index: usize) -> String {
    format!("{}_{}", category_id, index)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizStats {
    pub played: u64,
    pub correct: u64,
    pub best: u32,
    pub success_percentage: u32,
    pub last_played: Option<u64>,
}

fn read_list(store: &dyn ProgressStore, key: &str) -> Result<Vec<String>> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(list) => Ok(list),
        Err(e) => {
            logger::log(&format!("Ignoring corrupt list under {}: {}", key, e));
            Ok(Vec::new())
        }
    }
}

fn write_list(store: &mut dyn ProgressStore, key: &str, list: &[String]) -> Result<()> {
    let raw = serde_json::to_string(list)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    store.set(key, &raw)
}

fn read_number(store: &dyn ProgressStore, key: &str) -> Result<u64> {
    let Some(raw) = store.get(key)? else {
        return Ok(0);
    };
    match raw.trim().parse() {
        Ok(n) => Ok(n),
        Err(_) => {
            logger::log(&format!("Ignoring non-numeric value under {}: {:?}", key, raw));
            Ok(0)
        }
    }
}

/// Adds `item` to the list under `key` if absent, removes it otherwise.
/// Returns whether the item is now present.
fn toggle_in_list(store: &mut dyn ProgressStore, key: &str, item: &str) -> Result<bool> {
    let mut list = read_list(store, key)?;
    let present = if let Some(pos) = list.iter().position(|x| x == item) {
        list.remove(pos);
        false
    } else {
        list.push(item.to_string());
        true
    };
    write_list(store, key, &list)?;
    Ok(present)
}

pub fn learned_words(store: &dyn ProgressStore, category_id: &str) -> Result<Vec<String>> {
    read_list(store, &learned_key(category_id))
}

pub fn is_learned(store: &dyn ProgressStore, category_id: &str, word: &Word) -> Result<bool> {
    Ok(learned_words(store, category_id)?.contains(&word.learned_key()))
}

pub fn toggle_learned(
    store: &mut dyn ProgressStore,
    category_id: &str,
    word: &Word,
) -> Result<bool> {
    toggle_in_list(store, &learned_key(category_id), &word.learned_key())
}

pub fn is_lesson_complete(store: &dyn ProgressStore, lesson_id: &str) -> Result<bool> {
    Ok(store
        .get(&lesson_key(lesson_id))?
        .is_some_and(|v| !v.is_empty()))
}

pub fn set_lesson_complete(
    store: &mut dyn ProgressStore,
    lesson_id: &str,
    complete: bool,
) -> Result<()> {
    if complete {
        store.set(&lesson_key(lesson_id), "1")
    } else {
        store.delete(&lesson_key(lesson_id))
    }
}

pub fn favorites(store: &dyn ProgressStore) -> Result<Vec<String>> {
    read_list(store, PHRASE_FAVORITES)
}

pub fn toggle_favorite(store: &mut dyn ProgressStore, phrase_id: &str) -> Result<bool> {
    toggle_in_list(store, PHRASE_FAVORITES, phrase_id)
}

pub fn quiz_stats(store: &dyn ProgressStore) -> Result<QuizStats> {
    let played = read_number(store, QUIZ_TOTAL_PLAYED)?;
    let correct = read_number(store, QUIZ_TOTAL_CORRECT)?;
    let best = read_number(store, QUIZ_BEST_SCORE)? as u32;
    let last_played = store
        .get(QUIZ_LAST_PLAYED)?
        .and_then(|v| v.trim().parse().ok());

    Ok(QuizStats {
        played,
        correct,
        best,
        success_percentage: percentage(correct as usize, played as usize),
        last_played,
    })
}

/// Folds a finished session into the running totals. The best score only
/// moves up.
pub fn record_quiz_result(
    store: &mut dyn ProgressStore,
    summary: &QuizSummary,
    now: u64,
) -> Result<QuizStats> {
    let played = read_number(store, QUIZ_TOTAL_PLAYED)? + summary.total as u64;
    let correct = read_number(store, QUIZ_TOTAL_CORRECT)? + summary.correct as u64;
    store.set(QUIZ_TOTAL_PLAYED, &played.to_string())?;
    store.set(QUIZ_TOTAL_CORRECT, &correct.to_string())?;

    let best = read_number(store, QUIZ_BEST_SCORE)?;
    if u64::from(summary.percentage) > best {
        store.set(QUIZ_BEST_SCORE, &summary.percentage.to_string())?;
    }
    store.set(QUIZ_LAST_PLAYED, &now.to_string())?;

    logger::log(&format!(
        "Recorded quiz result {}/{} ({}%)",
        summary.correct, summary.total, summary.percentage
    ));
    quiz_stats(store)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalProgress {
    pub learned_items: usize,
    pub total_items: usize,
    pub percentage: u32,
}

/// Learned words plus completed lessons, over all words plus all lessons.
/// Learned keys that match no word of their category are not counted.
pub fn global_progress(
    store: &dyn ProgressStore,
    content: &ContentRepository,
) -> Result<GlobalProgress> {
    let mut total_items = 0;
    let mut learned_items = 0;

    for category in &content.vocabulary.categories {
        let learned = learned_words(store, &category.id)?;
        let progress = category_progress(category, &learned);
        total_items += progress.total;
        learned_items += progress.learned;
    }
    for lesson in &content.lessons.lessons {
        total_items += 1;
        if is_lesson_complete(store, &lesson.id)? {
            learned_items += 1;
        }
    }

    Ok(GlobalProgress {
        learned_items,
        total_items,
        percentage: percentage(learned_items, total_items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::fixture_repository;
    use crate::db::MemoryStore;
    use crate::models::Tier;

    fn summary(correct: usize, total: usize, percentage: u32) -> QuizSummary {
        QuizSummary {
            correct,
            incorrect: total - correct,
            total,
            percentage,
            tier: Tier::Good,
        }
    }

    #[test]
    fn test_toggle_learned_word() {
        let mut store = MemoryStore::new();
        let content = fixture_repository();
        let word = &content.vocabulary.categories[0].words[0];

        assert!(!is_learned(&store, "food", word).unwrap());
        assert!(toggle_learned(&mut store, "food", word).unwrap());
        assert!(is_learned(&store, "food", word).unwrap());
        assert_eq!(
            store.get("vocab_learned_food").unwrap().as_deref(),
            Some(r#"["chleb_pain"]"#)
        );

        assert!(!toggle_learned(&mut store, "food", word).unwrap());
        assert!(learned_words(&store, "food").unwrap().is_empty());
    }

    #[test]
    fn test_lesson_completion_set_and_reset() {
        let mut store = MemoryStore::new();
        assert!(!is_lesson_complete(&store, "l1").unwrap());

        set_lesson_complete(&mut store, "l1", true).unwrap();
        assert!(is_lesson_complete(&store, "l1").unwrap());
        assert_eq!(store.get("lesson_complete_l1").unwrap().as_deref(), Some("1"));

        set_lesson_complete(&mut store, "l1", false).unwrap();
        assert!(!is_lesson_complete(&store, "l1").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_favorite_phrase() {
        let mut store = MemoryStore::new();
        let id = phrase_id("greetings", 1);
        assert_eq!(id, "greetings_1");

        assert!(toggle_favorite(&mut store, &id).unwrap());
        assert!(toggle_favorite(&mut store, "shop_0").unwrap());
        assert_eq!(favorites(&store).unwrap(), vec!["greetings_1", "shop_0"]);

        assert!(!toggle_favorite(&mut store, &id).unwrap());
        assert_eq!(favorites(&store).unwrap(), vec!["shop_0"]);
    }

    #[test]
    fn test_corrupt_values_read_as_empty() {
        let mut store = MemoryStore::new();
        store.set(PHRASE_FAVORITES, "not json").unwrap();
        store.set(QUIZ_TOTAL_PLAYED, "abc").unwrap();

        assert!(favorites(&store).unwrap().is_empty());
        assert_eq!(quiz_stats(&store).unwrap().played, 0);
    }

    #[test]
    fn test_record_quiz_result_accumulates_totals() {
        let mut store = MemoryStore::new();

        let stats = record_quiz_result(&mut store, &summary(7, 10, 70), 1_700_000_000).unwrap();
        assert_eq!(stats.played, 10);
        assert_eq!(stats.correct, 7);
        assert_eq!(stats.best, 70);
        assert_eq!(stats.success_percentage, 70);
        assert_eq!(stats.last_played, Some(1_700_000_000));

        let stats = record_quiz_result(&mut store, &summary(20, 20, 100), 1_700_000_100).unwrap();
        assert_eq!(stats.played, 30);
        assert_eq!(stats.correct, 27);
        assert_eq!(stats.best, 100);
        assert_eq!(stats.success_percentage, 90);
    }

    #[test]
    fn test_best_score_only_increases() {
        let mut store = MemoryStore::new();
        record_quiz_result(&mut store, &summary(8, 10, 80), 1).unwrap();
        let stats = record_quiz_result(&mut store, &summary(3, 10, 30), 2).unwrap();
        assert_eq!(stats.best, 80);
        assert_eq!(store.get(QUIZ_BEST_SCORE).unwrap().as_deref(), Some("80"));
    }

    #[test]
    fn test_empty_stats() {
        let store = MemoryStore::new();
        assert_eq!(quiz_stats(&store).unwrap(), QuizStats::default());
    }

    #[test]
    fn test_global_progress() {
        let mut store = MemoryStore::new();
        let content = fixture_repository();
        assert_eq!(global_progress(&store, &content).unwrap().percentage, 0);

        let words = &content.vocabulary.categories[0].words;
        toggle_learned(&mut store, "food", &words[0]).unwrap();
        toggle_learned(&mut store, "food", &words[1]).unwrap();
        set_lesson_complete(&mut store, "l2", true).unwrap();

        let progress = global_progress(&store, &content).unwrap();
        assert_eq!(progress.total_items, 7);
        assert_eq!(progress.learned_items, 3);
        assert_eq!(progress.percentage, 43);
    }

    #[test]
    fn test_global_progress_ignores_stale_learned_keys() {
        let mut store = MemoryStore::new();
        let content = fixture_repository();
        let stale: Vec<String> = std::iter::once("chleb_pain".to_string())
            .chain((0..7).map(|i| format!("gone{}_old{}", i, i)))
            .collect();
        write_list(&mut store, &learned_key("food"), &stale).unwrap();

        let progress = global_progress(&store, &content).unwrap();
        assert_eq!(progress.learned_items, 1);
        assert_eq!(progress.total_items, 7);
        assert_eq!(progress.percentage, 14);
        assert!(progress.learned_items <= progress.total_items);
    }
}
