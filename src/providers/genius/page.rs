use crate::error::ApiError;
use scraper::{ElementRef, Html, Node, Selector};

const LYRICS_CONTAINER: &str = r#"div[data-lyrics-container="true"]"#;

/// Lyrics text from every lyrics container on the page, in document order.
///
/// `<br>` becomes a newline and each container ends on its own line. Elements
/// marked `data-exclude-from-selection` (page chrome inside a container) are skipped.
pub fn extract_lyrics(html: &str, url: &str) -> Result<String, ApiError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(LYRICS_CONTAINER)
        .map_err(|e| ApiError::UnexpectedResponse(format!("bad selector: {e:?}")))?;

    let mut blocks = Vec::new();
    for container in document.select(&selector) {
        let mut text = String::new();
        collect_text(container, &mut text);
        blocks.push(text);
    }

    if blocks.is_empty() {
        return Err(ApiError::MissingLyricsContainer(url.to_string()));
    }

    let lyrics = blocks.join("\n");
    if lyrics.trim().is_empty() {
        return Err(ApiError::EmptyLyrics(url.to_string()));
    }

    Ok(lyrics.trim_end().to_string())
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) => {
                if el.attr("data-exclude-from-selection") == Some("true") {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, out);
                }
            }
            _ => {}
        }
    }
}
