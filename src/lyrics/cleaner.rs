use regex::Regex;
use std::sync::OnceLock;

fn contributors_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\d*\s*Contributors.*?Read More").unwrap())
}

fn blank_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

/// Strip page boilerplate from scraped lyrics.
///
/// Removes the first "Contributors ... Read More" banner, a leading title line
/// that is immediately repeated, literal `\n` escapes and stray backslashes,
/// and collapses runs of blank lines down to a single blank line.
pub fn clean_lyrics(raw: &str) -> String {
    let without_banner = contributors_regex().replace(raw, "");
    let trimmed = without_banner.trim();

    let deduped = drop_repeated_first_line(trimmed);

    let unescaped = deduped.replace("\\n", "\n").replace('\\', "");
    let collapsed = blank_run_regex().replace_all(&unescaped, "\n\n");

    collapsed.trim().to_string()
}

fn drop_repeated_first_line(text: &str) -> &str {
    let Some((first, rest)) = text.split_once('\n') else {
        return text;
    };

    let first = first.trim();
    let second = rest.lines().next().unwrap_or("").trim();

    if !first.is_empty() && first == second {
        rest
    } else {
        text
    }
}
