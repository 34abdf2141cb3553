use std::path::PathBuf;

use crate::lyrics::retry::RetryPolicy;
use crate::rewrite::GenerationSettings;

pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_RAW_DIR: &str = "lyrics_downloaded";
pub const DEFAULT_GENERATED_DIR: &str = "generated_lyrics";

#[derive(Debug, Clone)]
pub struct Config {
    pub genius_access_token: Option<String>,
    pub groq_api_key: Option<String>,
    pub cache_dir: PathBuf,
    pub raw_output_dir: PathBuf,
    pub generated_output_dir: PathBuf,
    pub generation: GenerationSettings,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genius_access_token: None,
            groq_api_key: None,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            raw_output_dir: PathBuf::from(DEFAULT_RAW_DIR),
            generated_output_dir: PathBuf::from(DEFAULT_GENERATED_DIR),
            generation: GenerationSettings::default(),
            retry: RetryPolicy::default(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mut generation = defaults.generation;
        if let Some(model) = non_empty_var("GROQ_MODEL") {
            generation.model = model;
        }

        Self {
            genius_access_token: non_empty_var("GENIUS_ACCESS_TOKEN"),
            groq_api_key: non_empty_var("GROQ_API_KEY"),
            cache_dir: non_empty_var("LYRICFORGE_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            raw_output_dir: non_empty_var("LYRICFORGE_RAW_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.raw_output_dir),
            generated_output_dir: non_empty_var("LYRICFORGE_GENERATED_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.generated_output_dir),
            generation,
            retry: defaults.retry,
        }
    }

    pub fn has_genius_credentials(&self) -> bool {
        self.genius_access_token.is_some()
    }

    pub fn has_groq_credentials(&self) -> bool {
        self.groq_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Use a mutex to ensure tests don't interfere with each other
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "GENIUS_ACCESS_TOKEN",
        "GROQ_API_KEY",
        "GROQ_MODEL",
        "LYRICFORGE_CACHE_DIR",
        "LYRICFORGE_RAW_DIR",
        "LYRICFORGE_GENERATED_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_from_env_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = Config::from_env();
        assert!(config.genius_access_token.is_none());
        assert!(config.groq_api_key.is_none());
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
        assert_eq!(config.raw_output_dir, PathBuf::from("lyrics_downloaded"));
        assert_eq!(config.generated_output_dir, PathBuf::from("generated_lyrics"));
        assert_eq!(config.generation.model, "llama3-70b-8192");
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_from_env_with_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("GENIUS_ACCESS_TOKEN", "genius_token");
        std::env::set_var("GROQ_API_KEY", "groq_key");
        std::env::set_var("GROQ_MODEL", "llama-3.3-70b-versatile");
        std::env::set_var("LYRICFORGE_CACHE_DIR", "/tmp/lyricforge-cache");

        let config = Config::from_env();
        assert_eq!(config.genius_access_token, Some("genius_token".to_string()));
        assert_eq!(config.groq_api_key, Some("groq_key".to_string()));
        assert_eq!(config.generation.model, "llama-3.3-70b-versatile");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/lyricforge-cache"));
        assert_eq!(config.raw_output_dir, PathBuf::from(DEFAULT_RAW_DIR));

        clear_env();
    }

    #[test]
    fn test_blank_values_ignored() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("GENIUS_ACCESS_TOKEN", "   ");
        let config = Config::from_env();
        assert!(!config.has_genius_credentials());

        clear_env();
    }

    #[test]
    fn test_credential_helpers() {
        let config = Config {
            genius_access_token: Some("t".to_string()),
            ..Config::default()
        };
        assert!(config.has_genius_credentials());
        assert!(!config.has_groq_credentials());

        let config = Config {
            groq_api_key: Some("k".to_string()),
            ..Config::default()
        };
        assert!(!config.has_genius_credentials());
        assert!(config.has_groq_credentials());
    }
}
