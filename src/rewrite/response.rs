//! Recovering `GENRE:` and the bracketed lyric sections from a free-text completion.
//!
//! Models drift from the requested format, so every step here is best-effort:
//!
//! - The first line starting with `GENRE:` wins (case-sensitive, leading `*`/`#`
//!   markdown allowed). A `GENRE:` mentioned mid-sentence is narrative, and later
//!   `GENRE:` lines are discarded before the first section header.
//! - Genre labels are kept verbatim apart from trimming and stray `*`/`[]`
//!   decoration, so non-English labels pass through untouched.
//! - Text before the first `[Section]` header line is dropped.
//! - Closing commentary ("In this rewritten version...", "I maintained...") is cut.
//! - A tail ending inside an unclosed `[` (a header cut off by the token limit)
//!   is truncated back to the end of the last complete section.
//! - With no section header at all the body is returned as-is.

use crate::models::RewriteResult;
use regex::Regex;
use std::sync::OnceLock;

fn genre_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t*#]*GENRE:[ \t]*([^\n]*)").unwrap())
}

fn section_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*\[[^\]\n]+\]").unwrap())
}

fn commentary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\n[ \t]*\n[ \t]*(?:In this rewritten version|I maintained).*$").unwrap()
    })
}

pub fn parse_completion(text: &str) -> RewriteResult {
    let genre_match = genre_regex().captures(text);

    let genre = genre_match
        .as_ref()
        .and_then(|caps| caps.get(1))
        .map(|m| clean_genre(m.as_str()))
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| RewriteResult::UNKNOWN_GENRE.to_string());

    // Everything after the first GENRE line
    let body = match genre_match.as_ref().and_then(|caps| caps.get(0)) {
        Some(m) => &text[m.end()..],
        None => text,
    };

    RewriteResult {
        genre,
        lyrics: extract_lyrics(body),
    }
}

fn clean_genre(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '*' || c == '[' || c == ']')
        .trim()
        .to_string()
}

fn extract_lyrics(body: &str) -> String {
    let body = body.trim();

    let from_first_section = match section_header_regex().find(body) {
        Some(m) => &body[m.start()..],
        None => body,
    };

    let without_commentary = commentary_regex().replace(from_first_section, "");
    let lyrics = without_commentary.trim();

    truncate_unclosed_tail(lyrics).to_string()
}

fn truncate_unclosed_tail(lyrics: &str) -> &str {
    let Some(last_open) = lyrics.rfind('[') else {
        return lyrics;
    };

    let closed = lyrics.rfind(']').is_some_and(|close| close > last_open);
    if closed {
        lyrics
    } else {
        lyrics[..last_open].trim_end()
    }
}
