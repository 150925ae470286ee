//! Static content bundles: vocabulary, verbs, phrases and lessons.

use crate::logger;
use crate::models::{LessonQuizItem, Word};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const VOCABULARY_FILE: &str = "vocabulary.json";
pub const VERBS_FILE: &str = "verbs.json";
pub const PHRASES_FILE: &str = "phrases.json";
pub const LESSONS_FILE: &str = "lessons.json";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyBundle {
    pub categories: Vec<WordCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerbBundle {
    pub verbs: Vec<Verb>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Verb {
    #[serde(alias = "pl")]
    pub foreign: String,
    #[serde(alias = "fr")]
    pub native: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub conjugations: Conjugations,
}

impl Verb {
    pub fn is_irregular(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|k| k.starts_with("irr"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Conjugations {
    #[serde(default)]
    pub present: HashMap<String, String>,
    #[serde(default)]
    pub past: HashMap<String, String>,
    #[serde(default)]
    pub future: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhraseBundle {
    pub categories: Vec<PhraseCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhraseCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub phrases: Vec<Phrase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Phrase {
    #[serde(alias = "pl")]
    pub foreign: String,
    #[serde(alias = "fr")]
    pub native: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonBundle {
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub level: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub quiz: Vec<LessonQuizItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Explanation {
        text: String,
    },
    Vocabulary {
        words: Vec<Word>,
    },
    Example {
        #[serde(alias = "fr")]
        native: String,
        #[serde(alias = "pl")]
        foreign: String,
        #[serde(default)]
        phonetic: Option<String>,
    },
    Tip {
        text: String,
    },
}

/// A lesson quiz item tagged with the title of the lesson it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonQuizSource {
    pub lesson_title: String,
    pub item: LessonQuizItem,
}

/// Read-only view over the four loaded bundles.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    pub vocabulary: VocabularyBundle,
    pub verbs: VerbBundle,
    pub phrases: PhraseBundle,
    pub lessons: LessonBundle,
}

fn read_bundle<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<T, ContentError> {
    let path = dir.join(file_name);
    let content = fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ContentError::Parse { path, source })
}

impl ContentRepository {
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let repository = Self {
            vocabulary: read_bundle(dir, VOCABULARY_FILE)?,
            verbs: read_bundle(dir, VERBS_FILE)?,
            phrases: read_bundle(dir, PHRASES_FILE)?,
            lessons: read_bundle(dir, LESSONS_FILE)?,
        };
        logger::log(&format!(
            "Loaded content from {}: {} word categories, {} verbs, {} phrase categories, {} lessons",
            dir.display(),
            repository.vocabulary.categories.len(),
            repository.verbs.verbs.len(),
            repository.phrases.categories.len(),
            repository.lessons.lessons.len()
        ));
        Ok(repository)
    }

    /// Every word across all categories, each tagged with its category name.
    pub fn word_pool(&self) -> Vec<Word> {
        self.vocabulary
            .categories
            .iter()
            .flat_map(|cat| {
                cat.words.iter().map(|w| Word {
                    category: cat.name.clone(),
                    ..w.clone()
                })
            })
            .collect()
    }

    /// Every well-formed lesson quiz item, tagged with its lesson title.
    pub fn lesson_quiz_pool(&self) -> Vec<LessonQuizSource> {
        let mut pool = Vec::new();
        for lesson in &self.lessons.lessons {
            for item in &lesson.quiz {
                if !item.is_well_formed() {
                    logger::log(&format!(
                        "Skipping malformed quiz item in lesson {}: {:?}",
                        lesson.id, item.question
                    ));
                    continue;
                }
                pool.push(LessonQuizSource {
                    lesson_title: lesson.title.clone(),
                    item: item.clone(),
                });
            }
        }
        pool
    }

    pub fn total_words(&self) -> usize {
        self.vocabulary
            .categories
            .iter()
            .map(|c| c.words.len())
            .sum()
    }

    pub fn total_phrases(&self) -> usize {
        self.phrases.categories.iter().map(|c| c.phrases.len()).sum()
    }

    pub fn category(&self, id: &str) -> Option<&WordCategory> {
        self.vocabulary.categories.iter().find(|c| c.id == id)
    }

    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons.lessons.iter().find(|l| l.id == id)
    }
}
