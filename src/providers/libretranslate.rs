use super::{check_status, non_empty, ProviderError, TranslationProvider};
use crate::config::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// LibreTranslate. Accepts `"auto"` as a source code directly.
pub struct LibreTranslator {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl LibreTranslator {
    /// Create a translator for the given endpoint
    pub fn new(client: reqwest::Client, url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    /// Create a translator from the LibreTranslate URL and optional key in `config`
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self::new(
            client,
            config.libretranslate_url.clone(),
            config.libretranslate_api_key.clone(),
        )
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslator {
    fn name(&self) -> &'static str {
        "libretranslate"
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let request = LibreRequest {
            q: text,
            source: if source_lang.is_empty() { "auto" } else { source_lang },
            target: target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self.client.post(&self.url).json(&request).send().await?;

        let body: LibreResponse = check_status(response).await?.json().await.map_err(|e| {
            ProviderError::MalformedResponse(format!("LibreTranslate response: {}", e))
        })?;

        non_empty(body.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::build_http_client_with_timeout;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_request_serialization_without_key() {
        let request = LibreRequest {
            q: "Hello",
            source: "auto",
            target: "fr",
            format: "text",
            api_key: None,
        };

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("\"source\":\"auto\""));
        assert!(json.contains("\"format\":\"text\""));
        assert!(!json.contains("api_key"));
    }

    #[tokio::test]
    async fn test_translate_success_passes_auto_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_json(serde_json::json!({
                "q": "Hello",
                "source": "auto",
                "target": "fr",
                "format": "text",
                "api_key": "libre-key"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "Bonjour"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = LibreTranslator::new(
            reqwest::Client::new(),
            format!("{}/translate", mock_server.uri()),
            Some("libre-key".to_string()),
        );

        let result = translator
            .translate("Hello", "auto", "fr")
            .await
            .expect("Should succeed");

        assert_eq!(result, "Bonjour");
    }

    #[tokio::test]
    async fn test_missing_translated_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "busy"})),
            )
            .mount(&mock_server)
            .await;

        let translator = LibreTranslator::new(
            reqwest::Client::new(),
            format!("{}/translate", mock_server.uri()),
            None,
        );

        let result = translator.translate("Hello", "en", "fr").await;

        assert!(matches!(result, Err(ProviderError::EmptyTranslation)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&mock_server)
            .await;

        let translator = LibreTranslator::new(
            reqwest::Client::new(),
            format!("{}/translate", mock_server.uri()),
            None,
        );

        let err = translator.translate("Hello", "en", "fr").await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"translatedText": "Bonjour"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = build_http_client_with_timeout(Duration::from_millis(200))
            .expect("Should build client");
        let translator =
            LibreTranslator::new(client, format!("{}/translate", mock_server.uri()), None);

        let err = translator.translate("Hello", "en", "fr").await.unwrap_err();

        match err {
            ProviderError::Request(e) => assert!(e.is_timeout()),
            other => panic!("Expected a timeout, got {:?}", other),
        }
    }
}
