pub mod cache;
pub mod cleaner;
pub mod retry;

use anyhow::Result;
use tracing::{info, warn};

use self::cache::{now_secs, LyricsCache};
use self::cleaner::clean_lyrics;
use self::retry::RetryPolicy;
use crate::error::ApiError;
use crate::models::{LyricsRecord, SongQuery};
use crate::providers::LyricsProvider;

/// Cache-first lyrics lookup with a bounded retry around the network path.
pub struct LyricsFetcher<P> {
    provider: P,
    cache: LyricsCache,
    retry: RetryPolicy,
}

impl<P: LyricsProvider> LyricsFetcher<P> {
    pub fn new(provider: P, cache: LyricsCache, retry: RetryPolicy) -> Self {
        Self {
            provider,
            cache,
            retry,
        }
    }

    pub fn cache(&self) -> &LyricsCache {
        &self.cache
    }

    /// `None` when the song is not found or every attempt failed.
    pub fn fetch(&self, title: &str, artist: &str) -> Option<LyricsRecord> {
        let query = SongQuery::new(title, artist);
        info!(title, artist, "Getting lyrics");

        if let Some(cached) = self.cache.get(&query) {
            info!("Retrieved lyrics from cache");
            return Some(cached);
        }

        match self.retry.run(|_| self.fetch_remote(&query)) {
            Ok(Some(record)) => {
                self.cache.put(&query, &record);
                Some(record)
            }
            Ok(None) => {
                warn!(title, artist, "Could not find lyrics");
                None
            }
            Err(_) => None,
        }
    }

    fn fetch_remote(&self, query: &SongQuery) -> Result<Option<LyricsRecord>> {
        let hits = self.provider.search(query)?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };
        info!(title = %hit.title, artist = %hit.artist, "Found song");

        let raw_lyrics = clean_lyrics(&self.provider.lyrics(&hit)?);
        if raw_lyrics.is_empty() {
            return Err(ApiError::EmptyLyrics(hit.url).into());
        }

        let genres = match self.provider.tags(hit.id) {
            Ok(genres) => genres,
            Err(e) => {
                warn!(id = hit.id, "Error getting genres: {e:#}");
                Vec::new()
            }
        };

        Ok(Some(LyricsRecord {
            title: hit.title,
            artist: hit.artist,
            raw_lyrics,
            url: hit.url,
            genres,
            fetched_at: now_secs(),
        }))
    }
}
