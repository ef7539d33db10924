//! Streaming client for the Gemini generateContent API.
//!
//! Uses the SSE variant (`streamGenerateContent?alt=sse`): the body arrives
//! as `data: {json}` lines, each carrying candidate parts with a text
//! fragment. Chunk boundaries do not respect line boundaries, so decoding
//! buffers bytes and cuts on newlines.

use std::collections::VecDeque;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};

use super::{FragmentStream, GenerateError, TextGenerator};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), api_key: api_key.into(), model: model.into() }
    }

    /// Build a client from AppConfig; errors if no API key is configured.
    pub fn from_config(config: &crate::config::AppConfig) -> Result<Self, GenerateError> {
        let api_key = config
            .assistant
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenerateError::MissingApiKey)?;
        Ok(Self::new(api_key, config.assistant.model.clone()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<FragmentStream, GenerateError> {
        let url = format!(
            "{}/{}:streamGenerateContent?alt=sse&key={}",
            BASE_URL, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Upstream { status, body });
        }

        // State: raw body stream, partial-line byte buffer, fragments
        // decoded but not yet yielded. The buffer stays bytes because a
        // network chunk can end mid-way through a multi-byte character.
        let state = (response.bytes_stream().fuse(), Vec::<u8>::new(), VecDeque::<String>::new());
        let stream = futures::stream::try_unfold(state, |(mut body, mut buf, mut pending)| async move {
            loop {
                if let Some(text) = pending.pop_front() {
                    return Ok(Some((text, (body, buf, pending))));
                }
                match body.next().await {
                    Some(Ok(bytes)) => {
                        buf.extend_from_slice(&bytes);
                        pending.extend(drain_complete_lines(&mut buf)?);
                    }
                    Some(Err(e)) => return Err(GenerateError::Transport(e.to_string())),
                    None => {
                        // Flush a final unterminated line, if any
                        let line = std::mem::take(&mut buf);
                        pending.extend(decode_sse_line(decode_utf8(&line)?.trim())?);
                        match pending.pop_front() {
                            Some(text) => return Ok(Some((text, (body, buf, pending)))),
                            None => return Ok(None),
                        }
                    }
                }
            }
        });

        Ok(Box::pin(stream))
    }
}

/// Drain every complete (newline-terminated) line out of the byte buffer
/// and decode it. Trailing bytes short of a newline stay in the buffer
/// until the next chunk completes them.
fn drain_complete_lines(buf: &mut Vec<u8>) -> Result<Vec<String>, GenerateError> {
    let mut fragments = Vec::new();
    while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
        let line: Vec<u8> = buf.drain(..=pos).collect();
        fragments.extend(decode_sse_line(decode_utf8(&line)?.trim())?);
    }
    Ok(fragments)
}

fn decode_utf8(bytes: &[u8]) -> Result<&str, GenerateError> {
    std::str::from_utf8(bytes).map_err(|e| GenerateError::Decode(format!("invalid utf-8 in stream: {e}")))
}

/// Decode one SSE line into zero or more text fragments.
fn decode_sse_line(line: &str) -> Result<Vec<String>, GenerateError> {
    let Some(payload) = line.strip_prefix("data:") else {
        // Comments, blank keep-alives, event names
        return Ok(Vec::new());
    };
    let payload = payload.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| GenerateError::Decode(format!("bad event payload: {e}")))?;
    Ok(fragment_texts(&value))
}

/// Pull all candidate part texts out of one stream event.
fn fragment_texts(event: &Value) -> Vec<String> {
    event
        .get("candidates")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|c| c.pointer("/content/parts").and_then(Value::as_array))
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_data_line_into_fragment() {
        let line = r#"data: {"candidates":[{"content":{"parts":[{"text":"Olá"}]}}]}"#;
        assert_eq!(decode_sse_line(line).unwrap(), vec!["Olá".to_string()]);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert!(decode_sse_line("").unwrap().is_empty());
        assert!(decode_sse_line(": keep-alive").unwrap().is_empty());
        assert!(decode_sse_line("data: [DONE]").unwrap().is_empty());
    }

    #[test]
    fn bad_json_is_a_decode_error() {
        assert!(matches!(decode_sse_line("data: {nope"), Err(GenerateError::Decode(_))));
    }

    #[test]
    fn multibyte_char_split_across_chunks_survives() {
        let line = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Olá, tudo à disposição\"}]}}]}\n";
        let bytes = line.as_bytes();
        // Cut in the middle of the two-byte 'á' (0xC3 0xA1)
        let cut = bytes.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut buf = Vec::new();
        buf.extend_from_slice(&bytes[..cut]);
        assert!(drain_complete_lines(&mut buf).unwrap().is_empty());
        buf.extend_from_slice(&bytes[cut..]);
        let fragments = drain_complete_lines(&mut buf).unwrap();
        assert_eq!(fragments, vec!["Olá, tudo à disposição".to_string()]);
        assert!(!fragments[0].contains('\u{FFFD}'));
        assert!(buf.is_empty());
    }

    #[test]
    fn truly_invalid_bytes_are_a_decode_error() {
        let mut buf = b"data: [DONE]\xff\n".to_vec();
        assert!(matches!(drain_complete_lines(&mut buf), Err(GenerateError::Decode(_))));
    }

    #[test]
    fn collects_every_part_in_order() {
        let event: Value = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(fragment_texts(&event), vec!["a", "b"]);
    }

    #[test]
    fn event_without_candidates_yields_nothing() {
        let event: Value = serde_json::from_str(r#"{"usageMetadata":{"totalTokenCount":3}}"#).unwrap();
        assert!(fragment_texts(&event).is_empty());
    }
}
