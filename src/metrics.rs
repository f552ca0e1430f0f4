//! Translation metrics.
//!
//! Counters for the fallback chain: how many texts were translated, how many
//! upstream calls were made and failed, how often a disabled provider was
//! skipped and how often every provider was exhausted.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Texts submitted to the fallback chain
    translations: AtomicUsize,

    /// Upstream calls actually made (disabled providers excluded)
    provider_calls: AtomicUsize,

    /// Upstream calls that failed
    provider_failures: AtomicUsize,

    /// Providers skipped because they are not configured
    providers_skipped: AtomicUsize,

    /// Texts returned untranslated because every provider failed
    identity_fallbacks: AtomicUsize,
}

impl TranslationMetrics {
    /// Create a fresh set of counters, all at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text submitted to the provider chain.
    pub fn record_translation(&self) {
        self.translations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an upstream call that was actually made.
    pub fn record_provider_call(&self) {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an upstream call that failed.
    pub fn record_provider_failure(&self) {
        self.provider_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a provider skipped because it is not configured.
    pub fn record_provider_skipped(&self) {
        self.providers_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a text returned untranslated after the chain was exhausted.
    pub fn record_identity_fallback(&self) {
        self.identity_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the number of texts submitted to the chain.
    pub fn translations(&self) -> usize {
        self.translations.load(Ordering::Relaxed)
    }

    /// Get the number of upstream calls made.
    pub fn provider_calls(&self) -> usize {
        self.provider_calls.load(Ordering::Relaxed)
    }

    /// Get the number of failed upstream calls.
    pub fn provider_failures(&self) -> usize {
        self.provider_failures.load(Ordering::Relaxed)
    }

    /// Get the number of skipped (unconfigured) providers.
    pub fn providers_skipped(&self) -> usize {
        self.providers_skipped.load(Ordering::Relaxed)
    }

    /// Get the number of identity fallbacks.
    pub fn identity_fallbacks(&self) -> usize {
        self.identity_fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let translations = self.translations();
        let calls = self.provider_calls();
        let failures = self.provider_failures();
        let fallbacks = self.identity_fallbacks();

        let provider_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };
        let identity_fallback_rate = if translations > 0 {
            (fallbacks as f64 / translations as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            translations,
            provider_calls: calls,
            provider_failures: failures,
            providers_skipped: self.providers_skipped(),
            provider_success_rate,
            identity_fallbacks: fallbacks,
            identity_fallback_rate,
        }
    }
}

/// Snapshot of the counters, served by `GET /metrics`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub translations: usize,
    pub provider_calls: usize,
    pub provider_failures: usize,
    pub providers_skipped: usize,

    /// Percentage (0-100) of upstream calls that succeeded
    pub provider_success_rate: f64,

    pub identity_fallbacks: usize,

    /// Percentage (0-100) of texts returned untranslated
    pub identity_fallback_rate: f64,
}
