mod api;
mod page;

use self::api::GeniusApi;
use crate::models::SongQuery;
use crate::providers::{LyricsProvider, SearchHit};
use anyhow::Result;
use tracing::debug;

pub use self::page::extract_lyrics;

pub struct GeniusProvider {
    api: GeniusApi,
}

impl GeniusProvider {
    pub fn new(access_token: String) -> Result<Self> {
        Ok(Self {
            api: GeniusApi::new(access_token)?,
        })
    }
}

impl LyricsProvider for GeniusProvider {
    fn search(&self, query: &SongQuery) -> Result<Vec<SearchHit>> {
        self.api.search(&query.search_text())
    }

    fn lyrics(&self, hit: &SearchHit) -> Result<String> {
        if let Some(lyrics) = structured_lyrics(hit) {
            debug!(id = hit.id, "Using lyrics from search result");
            return Ok(lyrics.to_string());
        }

        let html = self.api.fetch_page(&hit.url)?;
        Ok(extract_lyrics(&html, &hit.url)?)
    }

    fn tags(&self, song_id: u64) -> Result<Vec<String>> {
        self.api.song_tags(song_id)
    }
}

/// Lyrics carried on the hit itself, ignoring a blank field.
fn structured_lyrics(hit: &SearchHit) -> Option<&str> {
    hit.lyrics.as_deref().filter(|l| !l.trim().is_empty())
}
