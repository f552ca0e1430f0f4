use super::{check_status, is_auto, non_empty, ProviderError, TranslationProvider};
use crate::config::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "3.0";

/// Azure Translator (Cognitive Services). `from` is left out to auto-detect.
pub struct AzureTranslator {
    client: reqwest::Client,
    key: Option<String>,
    endpoint: Option<String>,
    region: String,
}

#[derive(Debug, Serialize)]
struct AzureRequestItem<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AzureResponseItem {
    #[serde(default)]
    translations: Vec<AzureTranslation>,
}

#[derive(Debug, Deserialize)]
struct AzureTranslation {
    text: Option<String>,
}

impl AzureTranslator {
    /// Create a translator; `None` credentials leave it disabled
    pub fn new(
        client: reqwest::Client,
        key: Option<String>,
        endpoint: Option<String>,
        region: String,
    ) -> Self {
        Self {
            client,
            key,
            endpoint,
            region,
        }
    }

    /// Create a translator from the Azure key, endpoint and region in `config`
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self::new(
            client,
            config.azure_translator_key.clone(),
            config.azure_translator_endpoint.clone(),
            config.azure_translator_region.clone(),
        )
    }
}

fn build_query<'a>(source_lang: &'a str, target_lang: &'a str) -> Vec<(&'static str, &'a str)> {
    let mut query = vec![("api-version", API_VERSION), ("to", target_lang)];
    if !is_auto(source_lang) {
        query.push(("from", source_lang));
    }
    query
}

#[async_trait]
impl TranslationProvider for AzureTranslator {
    fn name(&self) -> &'static str {
        "azure"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let (key, endpoint) = match (&self.key, &self.endpoint) {
            (Some(key), Some(endpoint)) => (key, endpoint),
            _ => return Err(ProviderError::NotConfigured),
        };

        let url = format!("{}/translate", endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .query(&build_query(source_lang, target_lang))
            .header("Ocp-Apim-Subscription-Key", key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .json(&[AzureRequestItem { text }])
            .send()
            .await?;

        let items: Vec<AzureResponseItem> =
            check_status(response).await?.json().await.map_err(|e| {
                ProviderError::MalformedResponse(format!("Azure response: {}", e))
            })?;

        let translation = items
            .into_iter()
            .next()
            .and_then(|item| item.translations.into_iter().next())
            .ok_or_else(|| ProviderError::MalformedResponse("no translations".to_string()))?;

        non_empty(translation.text)
    }
}
