use anyhow::Result;

use crate::config::Config;
use crate::lyrics::cache::LyricsCache;
use crate::lyrics::LyricsFetcher;
use crate::providers::genius::GeniusProvider;
use crate::rewrite::{GroqBackend, RewriteClient};

pub fn create_lyrics_fetcher(config: &Config) -> Result<Option<LyricsFetcher<GeniusProvider>>> {
    let Some(token) = config.genius_access_token.clone() else {
        return Ok(None);
    };

    let provider = GeniusProvider::new(token)?;
    Ok(Some(LyricsFetcher::new(
        provider,
        LyricsCache::new(&config.cache_dir),
        config.retry,
    )))
}

pub fn create_rewrite_client(config: &Config) -> Option<RewriteClient<GroqBackend>> {
    config.groq_api_key.clone().map(|key| {
        RewriteClient::new(GroqBackend::new(key), config.generation.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lyrics_fetcher_with_credentials() {
        let config = Config {
            genius_access_token: Some("test_token".to_string()),
            ..Config::default()
        };

        let fetcher = create_lyrics_fetcher(&config).unwrap();
        assert!(fetcher.is_some());
        assert_eq!(fetcher.unwrap().cache().cache_dir(), config.cache_dir.as_path());
    }

    #[test]
    fn test_create_lyrics_fetcher_without_credentials() {
        let config = Config::default();
        assert!(create_lyrics_fetcher(&config).unwrap().is_none());
    }

    #[test]
    fn test_create_rewrite_client_with_key() {
        let config = Config {
            groq_api_key: Some("test_key".to_string()),
            ..Config::default()
        };

        let client = create_rewrite_client(&config);
        assert!(client.is_some());
        assert_eq!(client.unwrap().settings(), &config.generation);
    }

    #[test]
    fn test_create_rewrite_client_without_key() {
        assert!(create_rewrite_client(&Config::default()).is_none());
    }
}
