use super::{check_status, is_auto, non_empty, ProviderError, TranslationProvider};
use crate::config::Config;
use async_trait::async_trait;
use serde::Deserialize;

/// DeepL API. Language codes are uppercase; the source is omitted for auto-detect.
pub struct DeeplTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeeplResponse {
    #[serde(default)]
    translations: Vec<DeeplTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeeplTranslation {
    text: Option<String>,
}

impl DeeplTranslator {
    /// Create a translator; `None` credentials leave it disabled
    pub fn new(client: reqwest::Client, api_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    /// Create a translator from the DeepL key and URL in `config`
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self::new(
            client,
            config.deepl_api_url.clone(),
            config.deepl_api_key.clone(),
        )
    }
}

/// Form fields sent to DeepL
fn build_form(text: &str, source_lang: &str, target_lang: &str) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("text", text.to_string()),
        ("target_lang", target_lang.to_uppercase()),
    ];
    if !is_auto(source_lang) {
        form.push(("source_lang", source_lang.to_uppercase()));
    }
    form
}

#[async_trait]
impl TranslationProvider for DeeplTranslator {
    fn name(&self) -> &'static str {
        "deepl"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", api_key))
            .form(&build_form(text, source_lang, target_lang))
            .send()
            .await?;

        let body: DeeplResponse = check_status(response).await?.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("DeepL response: {}", e))
        })?;

        let first = body
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("no translations".to_string()))?;

        non_empty(first.text)
    }
}
