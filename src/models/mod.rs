use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SEED: u64 = 42;
pub const MIN_SEED: u64 = 1;
pub const MAX_SEED: u64 = 1_000_000;

/// Lowercase and keep only word characters, whitespace and hyphens.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub title: String,
    pub artist: String,
}

impl SongQuery {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// `{artist}_{title}`, both normalized. Also used as the cache file stem.
    pub fn cache_key(&self) -> String {
        format!("{}_{}", normalize(&self.artist), normalize(&self.title))
    }

    /// Free-text query sent to the upstream search endpoint.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title.trim(), self.artist.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsRecord {
    pub title: String,
    pub artist: String,
    pub raw_lyrics: String,
    pub url: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub fetched_at: u64, // Unix timestamp
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    SameAsOriginal,
    Happy,
    Sad,
    Angry,
    Romantic,
    Motivational,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::SameAsOriginal,
        Theme::Happy,
        Theme::Sad,
        Theme::Angry,
        Theme::Romantic,
        Theme::Motivational,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::SameAsOriginal => "Same as Original",
            Theme::Happy => "Happy",
            Theme::Sad => "Sad",
            Theme::Angry => "Angry",
            Theme::Romantic => "Romantic",
            Theme::Motivational => "Motivational",
        }
    }

    fn short_name(&self) -> &'static str {
        match self {
            Theme::SameAsOriginal => "same",
            Theme::Happy => "happy",
            Theme::Sad => "sad",
            Theme::Angry => "angry",
            Theme::Romantic => "romantic",
            Theme::Motivational => "motivational",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Theme::ALL
            .into_iter()
            .find(|t| {
                t.label().eq_ignore_ascii_case(wanted) || t.short_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                let names: Vec<&str> = Theme::ALL.iter().map(|t| t.short_name()).collect();
                format!("unknown theme '{wanted}' (expected one of: {})", names.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationMode {
    #[default]
    Replace,
    Extend,
}

impl GenerationMode {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationMode::Replace => "Replace Original Lyrics",
            GenerationMode::Extend => "Extend Original Lyrics",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("replace")
            || wanted.eq_ignore_ascii_case(GenerationMode::Replace.label())
        {
            Ok(GenerationMode::Replace)
        } else if wanted.eq_ignore_ascii_case("extend")
            || wanted.eq_ignore_ascii_case(GenerationMode::Extend.label())
        {
            Ok(GenerationMode::Extend)
        } else {
            Err(format!("unknown generation mode '{wanted}' (expected replace or extend)"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    pub original_lyrics: String,
    pub theme: Theme,
    pub mode: GenerationMode,
    pub seed: u64,
}

impl RewriteRequest {
    pub fn new(original_lyrics: impl Into<String>) -> Self {
        Self {
            original_lyrics: original_lyrics.into(),
            theme: Theme::default(),
            mode: GenerationMode::default(),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    pub genre: String,
    pub lyrics: String,
}

impl RewriteResult {
    pub const UNKNOWN_GENRE: &'static str = "Unknown";

    /// Result reported when the generation request itself failed.
    pub fn failed() -> Self {
        Self {
            genre: Self::UNKNOWN_GENRE.to_string(),
            lyrics: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lyrics.trim().is_empty()
    }
}
