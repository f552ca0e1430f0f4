//! Translation provider adapters.
//!
//! Every adapter wraps one external translation API behind the
//! [`TranslationProvider`] trait. Adapters map the common
//! `(source_lang, target_lang)` pair onto their own language-code
//! conventions, make exactly one outbound request per call, and report any
//! problem as a [`ProviderError`] so the caller can move on to the next one.
//!
//! # Providers
//!
//! - `deepl`: DeepL API (requires an API key)
//! - `azure`: Azure Translator (requires key + endpoint)
//! - `libretranslate`: LibreTranslate (public instance by default)
//! - `google`: unofficial Google web-translate endpoint, last resort

mod azure;
mod deepl;
mod google;
mod libretranslate;

pub use azure::AzureTranslator;
pub use deepl::DeeplTranslator;
pub use google::GoogleTranslator;
pub use libretranslate::LibreTranslator;

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Per-call timeout applied to every upstream request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sentinel source language meaning "let the provider detect it"
pub const AUTO_DETECT: &str = "auto";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Credentials or endpoint missing; the provider is disabled.
    #[error("provider is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("upstream returned an empty translation")]
    EmptyTranslation,
}

impl ProviderError {
    /// Disabled providers are skipped quietly; everything else is a real failure.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, ProviderError::NotConfigured)
    }
}

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short stable identifier used in logs, metrics and API responses
    fn name(&self) -> &'static str;

    /// Translate `text`. A successful result is never empty.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;
}

/// Build the shared HTTP client used by all adapters
pub fn build_http_client() -> Result<reqwest::Client> {
    build_http_client_with_timeout(REQUEST_TIMEOUT)
}

/// Build an HTTP client whose every request gives up after `timeout`
pub fn build_http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Build the provider chain in priority order: managed APIs with SLAs first,
/// the unofficial scraping endpoint last.
pub fn default_chain(
    config: &Config,
    client: &reqwest::Client,
) -> Vec<Box<dyn TranslationProvider>> {
    vec![
        Box::new(DeeplTranslator::from_config(config, client.clone())),
        Box::new(AzureTranslator::from_config(config, client.clone())),
        Box::new(LibreTranslator::from_config(config, client.clone())),
        Box::new(GoogleTranslator::from_config(config, client.clone())),
    ]
}

/// Turn a non-success response into a [`ProviderError::Status`]
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
    Err(ProviderError::Status { status, body })
}

fn non_empty(text: Option<String>) -> Result<String, ProviderError> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ProviderError::EmptyTranslation),
    }
}

fn is_auto(source_lang: &str) -> bool {
    source_lang.is_empty() || source_lang.eq_ignore_ascii_case(AUTO_DETECT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chain_order() {
        let config = Config::default();
        let client = reqwest::Client::new();

        let names: Vec<&str> = default_chain(&config, &client)
            .iter()
            .map(|p| p.name())
            .collect();

        assert_eq!(names, vec!["deepl", "azure", "libretranslate", "google"]);
    }

    #[test]
    fn test_request_timeout_is_ten_seconds() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(10));
        assert!(build_http_client().is_ok());
    }

    #[test]
    fn test_is_auto() {
        assert!(is_auto("auto"));
        assert!(is_auto("AUTO"));
        assert!(is_auto(""));
        assert!(!is_auto("en"));
    }

    #[test]
    fn test_non_empty_rejects_blank() {
        assert!(matches!(non_empty(None), Err(ProviderError::EmptyTranslation)));
        assert!(matches!(
            non_empty(Some("   ".to_string())),
            Err(ProviderError::EmptyTranslation)
        ));
        assert_eq!(non_empty(Some("Bonjour".to_string())).unwrap(), "Bonjour");
    }

    #[test]
    fn test_not_configured_classification() {
        assert!(ProviderError::NotConfigured.is_not_configured());
        assert!(!ProviderError::EmptyTranslation.is_not_configured());
        assert!(!ProviderError::MalformedResponse("x".to_string()).is_not_configured());
    }

    #[test]
    fn test_status_error_message_contains_code() {
        let err = ProviderError::Status {
            status: reqwest::StatusCode::FORBIDDEN,
            body: "Forbidden".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("Forbidden"));
    }
}
