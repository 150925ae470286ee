use std::path::PathBuf;

pub const DEFAULT_POINTS_PER_CORRECT: u32 = 10;
pub const DEFAULT_PERFECT_THRESHOLD: u32 = 100;
pub const DEFAULT_EXCELLENT_THRESHOLD: u32 = 80;
pub const DEFAULT_GOOD_THRESHOLD: u32 = 60;
pub const DEFAULT_KEEP_PRACTICING_THRESHOLD: u32 = 40;

pub const QUIZ_LENGTHS: [usize; 2] = [10, 20];

const DATA_DIR_ENV: &str = "LINGO_CARDS_DATA";
const DB_PATH_ENV: &str = "LINGO_CARDS_DB";

/// Scoring policy applied by a quiz session and its result summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizPolicy {
    pub points_per_correct: u32,
    pub perfect_threshold: u32,
    pub excellent_threshold: u32,
    pub good_threshold: u32,
    pub keep_practicing_threshold: u32,
}

impl Default for QuizPolicy {
    fn default() -> Self {
        Self {
            points_per_correct: DEFAULT_POINTS_PER_CORRECT,
            perfect_threshold: DEFAULT_PERFECT_THRESHOLD,
            excellent_threshold: DEFAULT_EXCELLENT_THRESHOLD,
            good_threshold: DEFAULT_GOOD_THRESHOLD,
            keep_practicing_threshold: DEFAULT_KEEP_PRACTICING_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub policy: QuizPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_dir = std::env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let db_path = std::env::var(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_db_path());

        Self {
            data_dir,
            db_path,
            policy: QuizPolicy::default(),
        }
    }
}

fn get_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\lingo-cards")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/lingo-cards")
    }
}

pub fn default_db_path() -> PathBuf {
    get_data_dir().join("progress.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_values() {
        let policy = QuizPolicy::default();
        assert_eq!(policy.points_per_correct, 10);
        assert_eq!(policy.perfect_threshold, 100);
        assert_eq!(policy.excellent_threshold, 80);
        assert_eq!(policy.good_threshold, 60);
        assert_eq!(policy.keep_practicing_threshold, 40);
    }

    #[test]
    fn test_default_db_path_file_name() {
        let path = default_db_path();
        assert_eq!(path.file_name().unwrap(), "progress.db");
        assert!(path.to_string_lossy().contains("lingo-cards"));
    }
}
