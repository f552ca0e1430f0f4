//! Translate binary - runs text through the provider chain from the command line
//!
//! Usage:
//!   cargo run --bin translate -- "Hello, I am interested in selling my property."
//!   cargo run --bin translate -- --from es "Hola, estoy interesado en vender mi propiedad."
//!   cargo run --bin translate -- --email "Subject line" "Email body"
//!
//! Providers are configured through the same environment variables as the
//! server (DEEPL_API_KEY, AZURE_TRANSLATOR_KEY, LIBRETRANSLATE_URL, ...).

use anyhow::{bail, Context, Result};
use tracing::info;
use translation_gateway::{
    config::Config,
    email::{translate_email, DEFAULT_EMAIL_SOURCE_LANG},
    fallback::TranslationService,
    providers::AUTO_DETECT,
};

struct Args {
    source_lang: Option<String>,
    email: bool,
    texts: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        source_lang: None,
        email: false,
        texts: Vec::new(),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--from" => {
                parsed.source_lang = Some(args.next().context("--from requires a language code")?);
            }
            "--email" => parsed.email = true,
            _ => parsed.texts.push(arg),
        }
    }

    Ok(parsed)
}

fn provider_label(provider: Option<&str>) -> &str {
    provider.unwrap_or("none, original text kept")
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translation_gateway=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;
    let service = TranslationService::from_config(&config)?;
    info!("Provider chain: {:?}", service.provider_names());

    if args.email {
        let [subject, content] = args.texts.as_slice() else {
            bail!("--email expects exactly two arguments: <subject> <content>");
        };
        let source_lang = args
            .source_lang
            .as_deref()
            .unwrap_or(DEFAULT_EMAIL_SOURCE_LANG);

        let translated = translate_email(&service, subject, content, source_lang).await;

        println!(
            "Subject ({}): {}",
            provider_label(translated.subject.provider),
            translated.subject.text
        );
        println!(
            "Content ({}): {}",
            provider_label(translated.content.provider),
            translated.content.text
        );
        return Ok(());
    }

    if args.texts.is_empty() {
        bail!("Usage: translate [--from <lang>] [--email] <text>...");
    }

    let source_lang = args.source_lang.as_deref().unwrap_or(AUTO_DETECT);
    for text in &args.texts {
        let translation = service.translate(text, source_lang).await;
        println!("[{}] {}", provider_label(translation.provider), translation.text);
    }

    let report = service.metrics().report();
    info!(
        "Done: {} texts, {} provider calls, {} fallbacks",
        report.translations, report.provider_calls, report.identity_fallbacks
    );

    Ok(())
}
