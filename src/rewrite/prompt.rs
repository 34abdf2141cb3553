use crate::models::{GenerationMode, RewriteRequest, Theme};

const REPLACE_INSTRUCTION: &str = "
Your task is to create new lyrics that maintain the same emotional energy, style, and theme, but use different words and expressions.
The new lyrics should be in the same language as the original.";

const EXTEND_INSTRUCTION: &str = "
Your task is to extend the original lyrics by adding new verses and sections while maintaining the same style and theme.
ONLY provide the new sections that you create - do not include the original lyrics in your response.
Make sure the new sections maintain the same emotional energy and style as the original.";

const RESPONSE_FORMAT: &str = "First, analyze the lyrics and determine their genre based on the style, themes, and language used.
Then, create new lyrics that match that genre while:
1. Maintaining the same emotional tone and energy
2. Keeping the same general theme and message
3. Using different words and expressions
4. Maintaining similar length and structure
5. Keeping the same language style

Format your response exactly like this:
GENRE: [genre name]

[Verse 1]
[your lyrics here]

[Chorus]
[your lyrics here]

[Verse 2]
[your lyrics here]

[etc...]";

fn mode_instruction(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Replace => REPLACE_INSTRUCTION,
        GenerationMode::Extend => EXTEND_INSTRUCTION,
    }
}

fn theme_instruction(theme: Theme) -> String {
    match theme {
        Theme::SameAsOriginal => String::new(),
        other => format!(
            "\nAdditionally, modify the emotional tone to be {} while maintaining the core message.",
            other.label().to_lowercase()
        ),
    }
}

/// Rewrite instruction for the completion model. Pure: same inputs, same string.
pub fn build_prompt(lyrics: &str, theme: Theme, mode: GenerationMode) -> String {
    format!(
        "You are a creative songwriter. I will provide you with original lyrics. \n\
         {mode}{theme}\n\n\
         {format}\n\n\
         Original Lyrics:\n\
         {lyrics}\n\n\
         Please first identify the genre, then generate new lyrics in that style.",
        mode = mode_instruction(mode),
        theme = theme_instruction(theme),
        format = RESPONSE_FORMAT,
    )
}

pub fn build_request_prompt(request: &RewriteRequest) -> String {
    build_prompt(&request.original_lyrics, request.theme, request.mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LYRICS: &str = "[Verse 1]\nYesterday, all my troubles seemed so far away";

    #[test]
    fn test_prompt_is_deterministic() {
        for theme in Theme::ALL {
            for mode in [GenerationMode::Replace, GenerationMode::Extend] {
                assert_eq!(build_prompt(LYRICS, theme, mode), build_prompt(LYRICS, theme, mode));
            }
        }
    }

    #[test]
    fn test_replace_mode_instruction() {
        let prompt = build_prompt(LYRICS, Theme::SameAsOriginal, GenerationMode::Replace);
        assert!(prompt.starts_with("You are a creative songwriter."));
        assert!(prompt.contains("use different words and expressions"));
        assert!(!prompt.contains("ONLY provide the new sections"));
    }

    #[test]
    fn test_extend_mode_instruction() {
        let prompt = build_prompt(LYRICS, Theme::SameAsOriginal, GenerationMode::Extend);
        assert!(prompt.contains("ONLY provide the new sections"));
        assert!(!prompt.contains("The new lyrics should be in the same language"));
    }

    #[test]
    fn test_theme_clause() {
        let same = build_prompt(LYRICS, Theme::SameAsOriginal, GenerationMode::Replace);
        assert!(!same.contains("modify the emotional tone"));

        let happy = build_prompt(LYRICS, Theme::Happy, GenerationMode::Replace);
        assert!(happy.contains("modify the emotional tone to be happy while maintaining the core message."));

        let motivational = build_prompt(LYRICS, Theme::Motivational, GenerationMode::Extend);
        assert!(motivational.contains("to be motivational while"));
    }

    #[test]
    fn test_format_template_and_lyrics() {
        let prompt = build_prompt(LYRICS, Theme::Sad, GenerationMode::Replace);
        assert!(prompt.contains("GENRE: [genre name]\n\n[Verse 1]\n[your lyrics here]"));
        assert!(prompt.contains(&format!("Original Lyrics:\n{LYRICS}\n\n")));
        assert!(prompt.ends_with("generate new lyrics in that style."));
    }

    #[test]
    fn test_request_prompt_matches() {
        let request = RewriteRequest::new(LYRICS)
            .with_theme(Theme::Angry)
            .with_mode(GenerationMode::Extend);
        assert_eq!(
            build_request_prompt(&request),
            build_prompt(LYRICS, Theme::Angry, GenerationMode::Extend)
        );
    }
}
