use crate::fallback::{Translation, TranslationService};

/// Default source language for email content
pub const DEFAULT_EMAIL_SOURCE_LANG: &str = "en";

/// Translated subject and body, each with the provider that handled it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTranslation {
    pub subject: Translation,
    pub content: Translation,
}

/// Translate subject and content independently.
///
/// Each field goes through the full provider chain on its own, so the two
/// may be handled by different providers, or one may fall back while the
/// other is translated.
pub async fn translate_email(
    service: &TranslationService,
    subject: &str,
    content: &str,
    source_lang: &str,
) -> EmailTranslation {
    let subject = service.translate(subject, source_lang).await;
    let content = service.translate(content, source_lang).await;

    EmailTranslation { subject, content }
}

/// Returns `(translated_subject, translated_content)`
pub async fn translate_email_content(
    service: &TranslationService,
    subject: &str,
    content: &str,
    source_lang: &str,
) -> (String, String) {
    let translated = translate_email(service, subject, content, source_lang).await;
    (translated.subject.text, translated.content.text)
}
