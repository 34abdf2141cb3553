use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::{normalize, LyricsRecord, RewriteResult};

/// Written when the upstream returned no genre tags.
pub const FALLBACK_GENRE_TEXT: &str = "romantic ballad pop vocal emotional";

/// Space-joined upstream genres, or the fallback description.
pub fn genre_text(record: &LyricsRecord) -> String {
    if record.genres.is_empty() {
        FALLBACK_GENRE_TEXT.to_string()
    } else {
        record.genres.join(" ")
    }
}

/// Plain-text artifacts for fetched and generated lyrics.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    raw_dir: PathBuf,
    generated_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub lyrics: PathBuf,
    pub genre: PathBuf,
}

impl OutputWriter {
    pub fn new(raw_dir: impl Into<PathBuf>, generated_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            generated_dir: generated_dir.into(),
        }
    }

    /// `{raw_dir}/Raw_{title}_lyric.txt` and `{raw_dir}/{title}_genre.txt`.
    pub fn save_original(&self, record: &LyricsRecord) -> Result<WrittenFiles> {
        let safe_title = normalize(&record.title);

        let genre = self.raw_dir.join(format!("{safe_title}_genre.txt"));
        write_text(&genre, &genre_text(record))?;
        info!(path = %genre.display(), "Genre file created");

        let lyrics = self.raw_dir.join(format!("Raw_{safe_title}_lyric.txt"));
        write_text(&lyrics, &record.raw_lyrics)?;
        info!(path = %lyrics.display(), "Raw lyrics file created");

        Ok(WrittenFiles { lyrics, genre })
    }

    /// `{generated_dir}/generated_{title}_lyrics.txt` and `..._genre.txt`.
    pub fn save_generated(&self, original_title: &str, result: &RewriteResult) -> Result<WrittenFiles> {
        let safe_title = normalize(original_title);

        let lyrics = self
            .generated_dir
            .join(format!("generated_{safe_title}_lyrics.txt"));
        write_text(&lyrics, &result.lyrics)?;
        info!(path = %lyrics.display(), "Generated lyrics saved");

        let genre = self
            .generated_dir
            .join(format!("generated_{safe_title}_genre.txt"));
        write_text(&genre, &result.genre)?;
        info!(path = %genre.display(), "Generated genre saved");

        Ok(WrittenFiles { lyrics, genre })
    }
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(genres: Vec<&str>) -> LyricsRecord {
        LyricsRecord {
            title: "Shape of You".to_string(),
            artist: "Ed Sheeran".to_string(),
            raw_lyrics: "[Verse 1]\nThe club isn't the best place".to_string(),
            url: "https://genius.com/Ed-sheeran-shape-of-you-lyrics".to_string(),
            genres: genres.into_iter().map(String::from).collect(),
            fetched_at: 0,
        }
    }

    #[test]
    fn test_genre_text() {
        assert_eq!(genre_text(&record(vec!["Pop", "UK"])), "Pop UK");
        assert_eq!(genre_text(&record(vec![])), FALLBACK_GENRE_TEXT);
    }

    #[test]
    fn test_save_original() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("raw"), dir.path().join("gen"));

        let files = writer.save_original(&record(vec!["Pop"])).unwrap();

        assert_eq!(files.lyrics, dir.path().join("raw").join("Raw_shape of you_lyric.txt"));
        assert_eq!(files.genre, dir.path().join("raw").join("shape of you_genre.txt"));
        assert_eq!(
            fs::read_to_string(&files.lyrics).unwrap(),
            "[Verse 1]\nThe club isn't the best place"
        );
        assert_eq!(fs::read_to_string(&files.genre).unwrap(), "Pop");
    }

    #[test]
    fn test_save_generated() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path().join("raw"), dir.path().join("gen"));
        let result = RewriteResult {
            genre: "Dance Pop".to_string(),
            lyrics: "[Verse 1]\nnew words".to_string(),
        };

        let files = writer.save_generated("Shape of You!", &result).unwrap();

        assert_eq!(
            files.lyrics,
            dir.path().join("gen").join("generated_shape of you_lyrics.txt")
        );
        assert_eq!(fs::read_to_string(&files.lyrics).unwrap(), "[Verse 1]\nnew words");
        assert_eq!(fs::read_to_string(&files.genre).unwrap(), "Dance Pop");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let writer = OutputWriter::new(&blocker, &blocker);
        assert!(writer.save_original(&record(vec![])).is_err());
    }
}
