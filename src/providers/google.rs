use super::{check_status, non_empty, ProviderError, TranslationProvider};
use crate::config::Config;
use async_trait::async_trait;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Unofficial Google web-translate endpoint (`client=gtx`).
///
/// No credentials and no availability guarantee, so it sits last in the chain.
/// It can be switched off entirely with `GOOGLE_TRANSLATE_ENABLED=false`.
pub struct GoogleTranslator {
    client: reqwest::Client,
    url: String,
    enabled: bool,
}

impl GoogleTranslator {
    /// Create a translator for the given endpoint
    pub fn new(client: reqwest::Client, url: String, enabled: bool) -> Self {
        Self {
            client,
            url,
            enabled,
        }
    }

    /// Create a translator from the Google URL and enable flag in `config`
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self::new(
            client,
            config.google_translate_url.clone(),
            config.google_translate_enabled,
        )
    }
}

/// Concatenate the translated segments found at `[0][*][0]`.
///
/// Long inputs come back split into several sentence segments.
fn extract_translation(json: &serde_json::Value) -> Result<String, ProviderError> {
    let segments = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ProviderError::MalformedResponse("missing segment array".to_string()))?;

    let translation: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    non_empty(Some(translation))
}

#[async_trait]
impl TranslationProvider for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured);
        }

        let source = if source_lang.is_empty() { "auto" } else { source_lang };

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let json: serde_json::Value = check_status(response).await?.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("Google response: {}", e))
        })?;

        extract_translation(&json)
    }
}
