use crate::models::SongQuery;
use anyhow::Result;

pub mod genius;

/// A candidate song returned by an upstream search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub url: String,
    /// Lyrics body when the search API already carries it
    pub lyrics: Option<String>,
}

// Blocking lookups against a lyrics database
pub trait LyricsProvider {
    /// Ordered candidates for the query, best match first.
    fn search(&self, query: &SongQuery) -> Result<Vec<SearchHit>>;

    /// Uncleaned lyrics text for a hit.
    fn lyrics(&self, hit: &SearchHit) -> Result<String>;

    /// Genre tags for a song id.
    fn tags(&self, song_id: u64) -> Result<Vec<String>>;
}
