use crate::error::ApiError;
use crate::providers::SearchHit;
use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const API_BASE_URL: &str = "https://api.genius.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
// Genius serves a stripped page to non-browser agents
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "type", default)]
    kind: String,
    result: HitResult,
}

#[derive(Debug, Deserialize)]
struct HitResult {
    id: u64,
    title: String,
    url: String,
    primary_artist: PrimaryArtist,
    #[serde(default)]
    lyrics: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PrimaryArtist {
    name: String,
}

pub struct GeniusApi {
    client: reqwest::blocking::Client,
    access_token: String,
}

impl GeniusApi {
    pub fn new(access_token: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            access_token,
        })
    }

    pub fn search(&self, text: &str) -> Result<Vec<SearchHit>> {
        let encoded = urlencoding::encode(text);
        info!(query = text, "Searching Genius");

        let response = self
            .client
            .get(format!("{API_BASE_URL}/search?q={encoded}"))
            .bearer_auth(&self.access_token)
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response("search", response).into());
        }

        let envelope: Envelope<SearchResponse> = response.json()?;
        Ok(song_hits(envelope.response))
    }

    pub fn song_tags(&self, song_id: u64) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{API_BASE_URL}/songs/{song_id}"))
            .bearer_auth(&self.access_token)
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response("songs", response).into());
        }

        let json: serde_json::Value = response.json()?;
        Ok(extract_tags(&json))
    }

    pub fn fetch_page(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching lyrics page");

        let response = self
            .client
            .get(url)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(url, response).into());
        }

        Ok(response.text()?)
    }
}

fn song_hits(response: SearchResponse) -> Vec<SearchHit> {
    response
        .hits
        .into_iter()
        .filter(|hit| hit.kind.is_empty() || hit.kind == "song")
        .map(|hit| SearchHit {
            id: hit.result.id,
            title: hit.result.title,
            artist: hit.result.primary_artist.name,
            url: hit.result.url,
            lyrics: hit.result.lyrics,
        })
        .collect()
}

/// Tag names from a song detail payload; tags may be plain strings or `{ "name": .. }` objects.
fn extract_tags(json: &serde_json::Value) -> Vec<String> {
    let Some(tags) = json
        .get("response")
        .and_then(|r| r.get("song"))
        .and_then(|s| s.get("tags"))
        .and_then(|t| t.as_array())
    else {
        return Vec::new();
    };

    tags.iter()
        .filter_map(|tag| {
            tag.as_str()
                .or_else(|| tag.get("name").and_then(|n| n.as_str()))
                .map(|s| s.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_payload() -> serde_json::Value {
        json!({
            "meta": { "status": 200 },
            "response": {
                "hits": [
                    {
                        "index": "song",
                        "type": "song",
                        "result": {
                            "id": 2346,
                            "title": "Kiss Me Now",
                            "full_title": "Kiss Me Now by Pierce The Veil",
                            "url": "https://genius.com/Pierce-the-veil-kiss-me-now-lyrics",
                            "primary_artist": { "id": 19, "name": "Pierce The Veil" }
                        }
                    },
                    {
                        "index": "song",
                        "type": "video",
                        "result": {
                            "id": 9,
                            "title": "Live",
                            "url": "https://genius.com/videos/9",
                            "primary_artist": { "id": 19, "name": "Pierce The Veil" }
                        }
                    }
                ]
            }
        })
    }

    #[test]
    fn test_search_response_parsing() {
        let envelope: Envelope<SearchResponse> = serde_json::from_value(search_payload()).unwrap();
        let hits = song_hits(envelope.response);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2346);
        assert_eq!(hits[0].title, "Kiss Me Now");
        assert_eq!(hits[0].artist, "Pierce The Veil");
        assert_eq!(hits[0].url, "https://genius.com/Pierce-the-veil-kiss-me-now-lyrics");
        assert!(hits[0].lyrics.is_none());
    }

    #[test]
    fn test_empty_search_response() {
        let payload = json!({ "response": { "hits": [] } });
        let envelope: Envelope<SearchResponse> = serde_json::from_value(payload).unwrap();
        assert!(song_hits(envelope.response).is_empty());

        let payload = json!({ "response": {} });
        let envelope: Envelope<SearchResponse> = serde_json::from_value(payload).unwrap();
        assert!(song_hits(envelope.response).is_empty());
    }

    #[test]
    fn test_extract_tags_mixed_shapes() {
        let payload = json!({
            "response": {
                "song": {
                    "id": 2346,
                    "tags": [
                        { "id": 1, "name": "Rock", "primary": true },
                        "Emo",
                        { "id": 3 },
                        42
                    ]
                }
            }
        });
        assert_eq!(extract_tags(&payload), vec!["Rock".to_string(), "Emo".to_string()]);
    }

    #[test]
    fn test_extract_tags_missing() {
        assert!(extract_tags(&json!({ "response": { "song": {} } })).is_empty());
        assert!(extract_tags(&json!({})).is_empty());
    }

    #[test]
    fn test_api_creation() {
        let api = GeniusApi::new("token".to_string());
        assert!(api.is_ok());
    }
}
