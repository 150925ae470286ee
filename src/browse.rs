//! Non-rendering state for the browsing screens: the flashcard deck, phrase
//! search, verb lookup and lesson listing.

use crate::content::{
    ContentRepository, Lesson, Phrase, PhraseCategory, Verb, WordCategory,
};
use crate::models::Word;
use crate::progress::phrase_id;
use crate::quiz::percentage;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckMove {
    Moved,
    AtStart,
    EndOfDeck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewToggle {
    /// Review mode on, with this many unlearned words.
    Reviewing(usize),
    /// Nothing left to review, so the full deck stays in place.
    AllLearned,
    Learning,
}

#[derive(Debug, Clone)]
pub struct FlashcardDeck {
    pub category_id: String,
    pub category_name: String,
    all_words: Vec<Word>,
    pub words: Vec<Word>,
    pub index: usize,
    pub flipped: bool,
    pub review_mode: bool,
}

impl FlashcardDeck {
    pub fn new(category: &WordCategory) -> Self {
        let words: Vec<Word> = category
            .words
            .iter()
            .map(|w| Word {
                category: category.name.clone(),
                ..w.clone()
            })
            .collect();
        Self {
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            all_words: words.clone(),
            words,
            index: 0,
            flipped: false,
            review_mode: false,
        }
    }

    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    pub fn total_in_category(&self) -> usize {
        self.all_words.len()
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn next(&mut self) -> DeckMove {
        if self.index + 1 < self.words.len() {
            self.index += 1;
            self.flipped = false;
            DeckMove::Moved
        } else {
            DeckMove::EndOfDeck
        }
    }

    pub fn prev(&mut self) -> DeckMove {
        if self.index > 0 {
            self.index -= 1;
            self.flipped = false;
            DeckMove::Moved
        } else {
            DeckMove::AtStart
        }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words.shuffle(rng);
        self.index = 0;
        self.flipped = false;
    }

    /// Switches between the whole category and only the words whose learned
    /// keys are not in `learned`.
    pub fn toggle_review_mode(&mut self, learned: &[String]) -> ReviewToggle {
        self.index = 0;
        self.flipped = false;

        if self.review_mode {
            self.review_mode = false;
            self.words = self.all_words.clone();
            return ReviewToggle::Learning;
        }

        let learned: HashSet<&str> = learned.iter().map(String::as_str).collect();
        let remaining: Vec<Word> = self
            .all_words
            .iter()
            .filter(|w| !learned.contains(w.learned_key().as_str()))
            .cloned()
            .collect();

        if remaining.is_empty() {
            self.words = self.all_words.clone();
            return ReviewToggle::AllLearned;
        }

        let count = remaining.len();
        self.words = remaining;
        self.review_mode = true;
        ReviewToggle::Reviewing(count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProgress {
    pub learned: usize,
    pub total: usize,
    pub percentage: u32,
}

pub fn category_progress(category: &WordCategory, learned: &[String]) -> CategoryProgress {
    let keys: HashSet<String> = category.words.iter().map(Word::learned_key).collect();
    let learned = learned.iter().filter(|k| keys.contains(*k)).count();
    let total = category.words.len();
    CategoryProgress {
        learned,
        total,
        percentage: percentage(learned, total),
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn phrase_matches(phrase: &Phrase, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    contains_folded(&phrase.native, &term)
        || contains_folded(&phrase.foreign, &term)
        || phrase
            .phonetic
            .as_deref()
            .is_some_and(|p| contains_folded(p, &term))
        || phrase
            .context
            .as_deref()
            .is_some_and(|c| contains_folded(c, &term))
}

#[derive(Debug, Clone)]
pub struct PhraseHit<'a> {
    pub id: String,
    pub phrase: &'a Phrase,
    pub favorite: bool,
}

#[derive(Debug, Clone)]
pub struct PhraseGroup<'a> {
    pub category: &'a PhraseCategory,
    pub hits: Vec<PhraseHit<'a>>,
}

/// Groups matching phrases by category; empty categories are left out.
pub fn search_phrases<'a>(
    content: &'a ContentRepository,
    term: &str,
    favorites: &[String],
    favorites_only: bool,
) -> Vec<PhraseGroup<'a>> {
    let favorites: HashSet<&str> = favorites.iter().map(String::as_str).collect();

    content
        .phrases
        .categories
        .iter()
        .filter_map(|category| {
            let hits: Vec<PhraseHit> = category
                .phrases
                .iter()
                .enumerate()
                .filter_map(|(i, phrase)| {
                    let id = phrase_id(&category.id, i);
                    let favorite = favorites.contains(id.as_str());
                    if favorites_only && !favorite {
                        return None;
                    }
                    phrase_matches(phrase, term).then_some(PhraseHit {
                        id,
                        phrase,
                        favorite,
                    })
                })
                .collect();
            (!hits.is_empty()).then_some(PhraseGroup { category, hits })
        })
        .collect()
}

pub fn search_verbs<'a>(content: &'a ContentRepository, term: &str) -> Vec<&'a Verb> {
    let term = term.trim().to_lowercase();
    content
        .verbs
        .verbs
        .iter()
        .filter(|v| {
            term.is_empty()
                || contains_folded(&v.native, &term)
                || contains_folded(&v.foreign, &term)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tense {
    #[default]
    Present,
    Past,
    Future,
}

impl Tense {
    pub const ALL: [Tense; 3] = [Tense::Present, Tense::Past, Tense::Future];

    pub fn label(self) -> &'static str {
        match self {
            Tense::Present => "Present",
            Tense::Past => "Past",
            Tense::Future => "Future",
        }
    }

    /// Pronoun keys in display order, paired with their labels.
    pub fn pronouns(self) -> &'static [(&'static str, &'static str)] {
        const PERSONS: &[(&str, &str)] = &[
            ("je", "I (ja)"),
            ("tu", "you (ty)"),
            ("il", "he/she (on/ona)"),
            ("nous", "we (my)"),
            ("vous", "you pl. (wy)"),
            ("ils", "they (oni/one)"),
        ];
        const GENDERED: &[(&str, &str)] = &[
            ("je_m", "I (masc.) - ja"),
            ("je_f", "I (fem.) - ja"),
            ("tu_m", "you (masc.) - ty"),
            ("tu_f", "you (fem.) - ty"),
            ("il", "he - on"),
            ("elle", "she - ona"),
            ("nous_m", "we (masc./mixed) - my"),
            ("nous_f", "we (fem.) - my"),
            ("vous_m", "you pl. (masc./mixed) - wy"),
            ("vous_f", "you pl. (fem.) - wy"),
            ("ils", "they (masc.) - oni"),
            ("elles", "they (fem.) - one"),
        ];
        match self {
            Tense::Present | Tense::Future => PERSONS,
            Tense::Past => GENDERED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjugationRow {
    pub pronoun: &'static str,
    pub form: String,
}

/// Table rows for one tense; pronouns without a form are skipped.
pub fn conjugation_table(verb: &Verb, tense: Tense) -> Vec<ConjugationRow> {
    let forms = match tense {
        Tense::Present => &verb.conjugations.present,
        Tense::Past => &verb.conjugations.past,
        Tense::Future => &verb.conjugations.future,
    };
    tense
        .pronouns()
        .iter()
        .filter_map(|(key, label)| {
            forms.get(*key).map(|form| ConjugationRow {
                pronoun: *label,
                form: form.clone(),
            })
        })
        .collect()
}

pub fn lessons_by_level<'a>(content: &'a ContentRepository, level: Option<&str>) -> Vec<&'a Lesson> {
    content
        .lessons
        .lessons
        .iter()
        .filter(|l| level.is_none_or(|lv| l.level == lv))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: String,
    pub done: usize,
    pub total: usize,
}

/// Completion counts per level, in order of first appearance.
pub fn level_progress(
    content: &ContentRepository,
    is_complete: impl Fn(&str) -> bool,
) -> Vec<LevelProgress> {
    let mut levels: Vec<LevelProgress> = Vec::new();
    for lesson in &content.lessons.lessons {
        let done = usize::from(is_complete(&lesson.id));
        match levels.iter_mut().find(|l| l.level == lesson.level) {
            Some(entry) => {
                entry.total += 1;
                entry.done += done;
            }
            None => levels.push(LevelProgress {
                level: lesson.level.clone(),
                done,
                total: 1,
            }),
        }
    }
    levels
}

/// Moves `selected` by one step within `len` rows, clamping at both ends.
fn step(selected: usize, forward: bool, len: usize) -> usize {
    if forward {
        (selected + 1).min(len.saturating_sub(1))
    } else {
        selected.saturating_sub(1)
    }
}

/// Lesson list with an optional level filter and the lesson being read.
#[derive(Debug, Clone, Default)]
pub struct LessonBrowser {
    pub level: Option<String>,
    pub selected: usize,
    pub reading: Option<String>,
    pub scroll: u16,
}

impl LessonBrowser {
    pub fn visible<'a>(&self, content: &'a ContentRepository) -> Vec<&'a Lesson> {
        lessons_by_level(content, self.level.as_deref())
    }

    /// All levels, then each level in order of first appearance.
    pub fn cycle_level(&mut self, content: &ContentRepository) {
        let levels: Vec<String> = level_progress(content, |_| false)
            .into_iter()
            .map(|l| l.level)
            .collect();
        let next = match &self.level {
            None => levels.first(),
            Some(current) => levels
                .iter()
                .position(|l| l == current)
                .and_then(|i| levels.get(i + 1)),
        };
        self.level = next.cloned();
        self.selected = 0;
    }

    pub fn select(&mut self, forward: bool, content: &ContentRepository) {
        self.selected = step(self.selected, forward, self.visible(content).len());
    }

    pub fn selected_lesson<'a>(&self, content: &'a ContentRepository) -> Option<&'a Lesson> {
        self.visible(content).get(self.selected).copied()
    }

    pub fn open(&mut self, content: &ContentRepository) -> bool {
        match self.selected_lesson(content) {
            Some(lesson) => {
                self.reading = Some(lesson.id.clone());
                self.scroll = 0;
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.reading = None;
        self.scroll = 0;
    }
}

/// Search term, favorites filter and the highlighted phrase.
#[derive(Debug, Clone, Default)]
pub struct PhraseBrowser {
    pub query: String,
    pub favorites_only: bool,
    pub selected: usize,
}

impl PhraseBrowser {
    pub fn results<'a>(
        &self,
        content: &'a ContentRepository,
        favorites: &[String],
    ) -> Vec<PhraseGroup<'a>> {
        search_phrases(content, &self.query, favorites, self.favorites_only)
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn toggle_favorites_only(&mut self) {
        self.favorites_only = !self.favorites_only;
        self.selected = 0;
    }

    pub fn select(&mut self, forward: bool, groups: &[PhraseGroup]) {
        let total = groups.iter().map(|g| g.hits.len()).sum();
        self.selected = step(self.selected, forward, total);
    }

    pub fn selected_hit<'g, 'a>(&self, groups: &'g [PhraseGroup<'a>]) -> Option<&'g PhraseHit<'a>> {
        groups.iter().flat_map(|g| g.hits.iter()).nth(self.selected)
    }
}

/// Search term, highlighted verb and the tense shown in the table.
#[derive(Debug, Clone, Default)]
pub struct VerbBrowser {
    pub query: String,
    pub selected: usize,
    pub tense: Tense,
}

impl VerbBrowser {
    pub fn results<'a>(&self, content: &'a ContentRepository) -> Vec<&'a Verb> {
        search_verbs(content, &self.query)
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.selected = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn select(&mut self, forward: bool, content: &ContentRepository) {
        self.selected = step(self.selected, forward, self.results(content).len());
    }

    pub fn selected_verb<'a>(&self, content: &'a ContentRepository) -> Option<&'a Verb> {
        self.results(content).get(self.selected).copied()
    }

    pub fn cycle_tense(&mut self, forward: bool) {
        let i = Tense::ALL.iter().position(|t| *t == self.tense).unwrap_or(0);
        let n = Tense::ALL.len();
        self.tense = Tense::ALL[if forward { (i + 1) % n } else { (i + n - 1) % n }];
    }

    pub fn table(&self, content: &ContentRepository) -> Vec<ConjugationRow> {
        self.selected_verb(content)
            .map(|verb| conjugation_table(verb, self.tense))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::fixture_repository;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn food_deck(content: &ContentRepository) -> FlashcardDeck {
        FlashcardDeck::new(content.category("food").unwrap())
    }

    #[test]
    fn test_deck_navigation_clamps() {
        let content = fixture_repository();
        let mut deck = food_deck(&content);
        assert_eq!(deck.current().unwrap().foreign, "chleb");
        assert_eq!(deck.current().unwrap().category, "Food");

        assert_eq!(deck.prev(), DeckMove::AtStart);
        assert_eq!(deck.next(), DeckMove::Moved);
        assert_eq!(deck.next(), DeckMove::Moved);
        assert_eq!(deck.next(), DeckMove::EndOfDeck);
        assert_eq!(deck.index, 2);
        assert_eq!(deck.prev(), DeckMove::Moved);
        assert_eq!(deck.index, 1);
    }

    #[test]
    fn test_deck_flip_resets_on_move() {
        let content = fixture_repository();
        let mut deck = food_deck(&content);
        deck.flip();
        assert!(deck.flipped);
        deck.next();
        assert!(!deck.flipped);
    }

    #[test]
    fn test_deck_shuffle_keeps_words() {
        let content = fixture_repository();
        let mut deck = food_deck(&content);
        deck.next();
        deck.shuffle(&mut StdRng::seed_from_u64(3));
        assert_eq!(deck.index, 0);
        let mut names: Vec<&str> = deck.words.iter().map(|w| w.foreign.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["chleb", "mleko", "woda"]);
    }

    #[test]
    fn test_review_mode_filters_learned_words() {
        let content = fixture_repository();
        let mut deck = food_deck(&content);
        let learned = vec!["chleb_pain".to_string()];

        assert_eq!(deck.toggle_review_mode(&learned), ReviewToggle::Reviewing(2));
        assert!(deck.review_mode);
        assert!(deck.words.iter().all(|w| w.foreign != "chleb"));

        assert_eq!(deck.toggle_review_mode(&learned), ReviewToggle::Learning);
        assert_eq!(deck.words.len(), 3);
    }

    #[test]
    fn test_review_mode_with_everything_learned() {
        let content = fixture_repository();
        let mut deck = food_deck(&content);
        let learned: Vec<String> = deck.words.iter().map(Word::learned_key).collect();

        assert_eq!(deck.toggle_review_mode(&learned), ReviewToggle::AllLearned);
        assert!(!deck.review_mode);
        assert_eq!(deck.words.len(), 3);
    }

    #[test]
    fn test_category_progress_ignores_stale_keys() {
        let content = fixture_repository();
        let category = content.category("food").unwrap();
        let learned = vec!["woda_eau".to_string(), "gone_word".to_string()];
        let progress = category_progress(category, &learned);
        assert_eq!(progress.learned, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.percentage, 33);
    }

    #[test]
    fn test_phrase_search_is_case_insensitive() {
        let content = fixture_repository();
        let groups = search_phrases(&content, "BONJOUR", &[], false);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].hits.len(), 1);
        assert_eq!(groups[0].hits[0].id, "greetings_0");

        let by_context = search_phrases(&content, "formal", &[], false);
        assert_eq!(by_context[0].hits[0].phrase.foreign, "Dzień dobry");

        let all = search_phrases(&content, "  ", &[], false);
        assert_eq!(all.iter().map(|g| g.hits.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_phrase_favorites_only() {
        let content = fixture_repository();
        let favorites = vec!["shop_0".to_string()];
        let groups = search_phrases(&content, "", &favorites, true);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category.id, "shop");
        assert!(groups[0].hits[0].favorite);

        assert!(search_phrases(&content, "", &[], true).is_empty());
    }

    #[test]
    fn test_verb_search() {
        let content = fixture_repository();
        assert_eq!(search_verbs(&content, "").len(), 2);
        let hits = search_verbs(&content, "LIRE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].foreign, "czytać");
        assert!(search_verbs(&content, "zzz").is_empty());
    }

    #[test]
    fn test_conjugation_table_order_and_gaps() {
        let content = fixture_repository();
        let verb = &content.verbs.verbs[0];

        let present = conjugation_table(verb, Tense::Present);
        assert_eq!(present.len(), 6);
        assert_eq!(present[0].form, "jestem");
        assert_eq!(present[5].form, "są");

        let past = conjugation_table(verb, Tense::Past);
        let forms: Vec<&str> = past.iter().map(|r| r.form.as_str()).collect();
        assert_eq!(forms, vec!["byłem", "byłam", "był", "była"]);

        assert_eq!(conjugation_table(&content.verbs.verbs[1], Tense::Future).len(), 0);
    }

    #[test]
    fn test_lessons_by_level_and_progress() {
        let content = fixture_repository();
        assert_eq!(lessons_by_level(&content, None).len(), 2);
        let beginners = lessons_by_level(&content, Some("Débutant"));
        assert_eq!(beginners.len(), 1);
        assert_eq!(beginners[0].id, "l1");
        assert!(lessons_by_level(&content, Some("Avancé")).is_empty());

        let levels = level_progress(&content, |id| id == "l1");
        assert_eq!(
            levels,
            vec![
                LevelProgress {
                    level: "Débutant".to_string(),
                    done: 1,
                    total: 1
                },
                LevelProgress {
                    level: "Intermédiaire".to_string(),
                    done: 0,
                    total: 1
                },
            ]
        );
    }

    #[test]
    fn test_lesson_browser_filters_and_opens() {
        let content = fixture_repository();
        let mut browser = LessonBrowser::default();
        assert_eq!(browser.visible(&content).len(), 2);

        browser.select(true, &content);
        browser.select(true, &content);
        assert_eq!(browser.selected, 1);

        browser.cycle_level(&content);
        assert_eq!(browser.level.as_deref(), Some("Débutant"));
        assert_eq!(browser.selected, 0);
        browser.cycle_level(&content);
        assert_eq!(browser.level.as_deref(), Some("Intermédiaire"));
        assert_eq!(browser.selected_lesson(&content).unwrap().id, "l2");
        browser.cycle_level(&content);
        assert_eq!(browser.level, None);

        assert!(browser.open(&content));
        assert_eq!(browser.reading.as_deref(), Some("l1"));
        browser.close();
        assert!(browser.reading.is_none());
    }

    #[test]
    fn test_phrase_browser_selection_spans_groups() {
        let content = fixture_repository();
        let mut browser = PhraseBrowser::default();
        let groups = browser.results(&content, &[]);

        for _ in 0..5 {
            browser.select(true, &groups);
        }
        assert_eq!(browser.selected, 2);
        assert_eq!(browser.selected_hit(&groups).unwrap().id, "shop_0");

        browser.push_char('s');
        browser.push_char('a');
        assert_eq!(browser.selected, 0);
        let groups = browser.results(&content, &[]);
        assert_eq!(browser.selected_hit(&groups).unwrap().id, "greetings_1");

        browser.pop_char();
        assert_eq!(browser.query, "s");
    }

    #[test]
    fn test_verb_browser_table_follows_selection_and_tense() {
        let content = fixture_repository();
        let mut browser = VerbBrowser::default();
        assert_eq!(browser.table(&content).len(), 6);

        browser.cycle_tense(true);
        assert_eq!(browser.tense, Tense::Past);
        assert_eq!(browser.table(&content).len(), 4);
        browser.cycle_tense(false);
        browser.cycle_tense(false);
        assert_eq!(browser.tense, Tense::Future);

        browser.push_char('l');
        browser.push_char('i');
        assert_eq!(browser.selected_verb(&content).unwrap().foreign, "czytać");
        assert!(browser.table(&content).is_empty());

        browser.push_char('x');
        assert!(browser.selected_verb(&content).is_none());
    }
}
