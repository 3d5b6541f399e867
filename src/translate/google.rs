//! [`Translator`] backed by the public Google Translate web endpoint
//! (`/translate_a/single?client=gtx`), which needs no API key.
//!
//! The base URL comes from [`TranslateConfig`] so a self-hosted proxy or a
//! test server can stand in for it.

use async_trait::async_trait;
use serde_json::Value;

use super::{TranslateError, Translator};
use crate::config::TranslateConfig;

/// Google Translate client.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    /// Build a client with the per-request timeout from `config.timeout_secs`.
    ///
    /// A default (no-timeout) client is used if the builder fails.
    pub fn from_config(config: &TranslateConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        let url = format!("{}/translate_a/single", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        parse_response(&json)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists sentence segments,
/// each `[translated, original, ...]`.
pub(crate) fn parse_response(json: &Value) -> Result<String, TranslateError> {
    let segments = json
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Parse("missing segment list".into()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_all_segments() {
        let body = json!([
            [
                ["Merhaba dünya. ", "Hello world. ", null, null, 10],
                ["Nasılsın?", "How are you?", null, null, 10]
            ],
            null,
            "en"
        ]);
        assert_eq!(parse_response(&body).unwrap(), "Merhaba dünya. Nasılsın?");
    }

    #[test]
    fn empty_segment_list_is_empty_translation() {
        let body = json!([[], null, "en"]);
        assert_eq!(parse_response(&body).unwrap(), "");
    }

    #[test]
    fn unexpected_shape_is_parse_error() {
        let body = json!({"error": "quota"});
        assert!(matches!(parse_response(&body), Err(TranslateError::Parse(_))));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let config = TranslateConfig {
            base_url: "http://localhost:8080/".into(),
            ..TranslateConfig::default()
        };
        let t = GoogleTranslator::from_config(&config);
        assert_eq!(t.base_url, "http://localhost:8080");
    }
}
