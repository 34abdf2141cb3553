use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

use crate::models::{LyricsRecord, SongQuery};

pub const CACHE_MAX_AGE_SECS: u64 = 24 * 60 * 60;

#[derive(Serialize, Deserialize)]
struct CachedLyrics {
    #[serde(flatten)]
    record: LyricsRecord,
    timestamp: u64,
}

/// One JSON file per song, keyed by the normalized artist and title.
#[derive(Debug, Clone)]
pub struct LyricsCache {
    cache_dir: PathBuf,
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

impl LyricsCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn path_for(&self, query: &SongQuery) -> PathBuf {
        self.cache_dir.join(format!("{}.json", query.cache_key()))
    }

    pub fn get(&self, query: &SongQuery) -> Option<LyricsRecord> {
        let cache_path = self.path_for(query);

        if !cache_path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&cache_path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %cache_path.display(), "Error reading cache: {e}");
                return None;
            }
        };

        let cached: CachedLyrics = match serde_json::from_str(&contents) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(path = %cache_path.display(), "Error parsing cache: {e}");
                return None;
            }
        };

        if !is_fresh(cached.timestamp, now_secs()) {
            debug!(path = %cache_path.display(), "Cache entry is stale");
            return None;
        }

        Some(cached.record)
    }

    /// Best-effort write; failures are logged and otherwise ignored.
    pub fn put(&self, query: &SongQuery, record: &LyricsRecord) {
        if let Err(e) = self.try_put(query, record) {
            warn!(key = %query.cache_key(), "Error saving to cache: {e:#}");
        }
    }

    fn try_put(&self, query: &SongQuery, record: &LyricsRecord) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let cached = CachedLyrics {
            record: record.clone(),
            timestamp: now_secs(),
        };

        let json = serde_json::to_string_pretty(&cached)?;
        fs::write(self.path_for(query), json)?;

        Ok(())
    }
}

fn is_fresh(timestamp: u64, now: u64) -> bool {
    // Entries stamped in the future are treated as fresh
    if timestamp > now {
        return true;
    }
    now - timestamp < CACHE_MAX_AGE_SECS
}
