use crate::config::Config;
use crate::metrics::TranslationMetrics;
use crate::providers::{self, TranslationProvider};
use anyhow::Result;
use tracing::{debug, info, warn};

/// All output of the service is French
pub const TARGET_LANG: &str = "fr";

/// Outcome of running a text through the provider chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Provider that produced `text`, `None` when the original was passed through
    pub provider: Option<&'static str>,
}

impl Translation {
    fn passthrough(text: &str) -> Self {
        Self {
            text: text.to_string(),
            provider: None,
        }
    }

    /// Whether a provider produced the text (false on identity fallback)
    pub fn is_translated(&self) -> bool {
        self.provider.is_some()
    }
}

/// Tries each provider in priority order until one succeeds.
///
/// Provider failures never escape: when the whole chain is exhausted the
/// original text is returned unchanged. Results are never cached.
pub struct TranslationService {
    providers: Vec<Box<dyn TranslationProvider>>,
    metrics: TranslationMetrics,
}

impl TranslationService {
    /// Create a service that tries `providers` in the given order
    pub fn new(providers: Vec<Box<dyn TranslationProvider>>) -> Self {
        Self {
            providers,
            metrics: TranslationMetrics::new(),
        }
    }

    /// Standard chain: DeepL, Azure, LibreTranslate, then Google
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = providers::build_http_client()?;
        Ok(Self::new(providers::default_chain(config, &client)))
    }

    /// Names of the configured providers, in priority order
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Counters for this service's provider chain
    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Translate to French and return just the text
    pub async fn translate_to_french(&self, text: &str, source_lang: &str) -> String {
        self.translate(text, source_lang).await.text
    }

    /// Translate to French, reporting which provider answered
    pub async fn translate(&self, text: &str, source_lang: &str) -> Translation {
        self.translate_to(text, source_lang, TARGET_LANG).await
    }

    /// Run `text` through the chain towards any target language.
    ///
    /// Blank text is returned as-is without calling any provider.
    pub async fn translate_to(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Translation {
        // Nothing to translate; don't spend an upstream call on it
        if text.trim().is_empty() {
            return Translation::passthrough(text);
        }

        self.metrics.record_translation();

        for provider in &self.providers {
            let name = provider.name();

            match provider.translate(text, source_lang, target_lang).await {
                Ok(translated) => {
                    self.metrics.record_provider_call();
                    info!(
                        "Translated {} chars ({} -> {}) with {}",
                        text.chars().count(),
                        source_lang,
                        target_lang,
                        name
                    );
                    return Translation {
                        text: translated,
                        provider: Some(name),
                    };
                }
                Err(e) if e.is_not_configured() => {
                    self.metrics.record_provider_skipped();
                    debug!("Skipping {}: {}", name, e);
                }
                Err(e) => {
                    self.metrics.record_provider_call();
                    self.metrics.record_provider_failure();
                    warn!("Translation backend {} failed: {}", name, e);
                }
            }
        }

        self.metrics.record_identity_fallback();
        warn!("All translation backends failed, returning original text");
        Translation::passthrough(text)
    }
}
