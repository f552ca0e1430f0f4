use anyhow::{Context, Result};

pub const DEFAULT_DEEPL_API_URL: &str = "https://api-free.deepl.com/v2/translate";
pub const DEFAULT_LIBRETRANSLATE_URL: &str = "https://libretranslate.com/translate";
pub const DEFAULT_GOOGLE_TRANSLATE_URL: &str =
    "https://translate.googleapis.com/translate_a/single";

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub debug: bool,

    // DeepL
    pub deepl_api_key: Option<String>,
    pub deepl_api_url: String,

    // Azure Translator
    pub azure_translator_key: Option<String>,
    pub azure_translator_endpoint: Option<String>,
    pub azure_translator_region: String,

    // LibreTranslate
    pub libretranslate_url: String,
    pub libretranslate_api_key: Option<String>,

    // Google (unofficial web endpoint)
    pub google_translate_url: String,
    pub google_translate_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables, applying defaults
    /// for everything except provider credentials
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: std::env::var("PORT")
                .ok()
                .map(|v| v.parse::<u16>().context("PORT must be a valid port number"))
                .transpose()?
                .unwrap_or(5000),
            debug: env_flag("DEBUG", false),

            // DeepL
            deepl_api_key: env_non_empty("DEEPL_API_KEY"),
            deepl_api_url: env_non_empty("DEEPL_API_URL")
                .unwrap_or_else(|| DEFAULT_DEEPL_API_URL.to_string()),

            // Azure Translator - both key and endpoint are required to enable it
            azure_translator_key: env_non_empty("AZURE_TRANSLATOR_KEY"),
            azure_translator_endpoint: env_non_empty("AZURE_TRANSLATOR_ENDPOINT"),
            azure_translator_region: env_non_empty("AZURE_TRANSLATOR_REGION")
                .unwrap_or_else(|| "westeurope".to_string()),

            // LibreTranslate
            libretranslate_url: env_non_empty("LIBRETRANSLATE_URL")
                .unwrap_or_else(|| DEFAULT_LIBRETRANSLATE_URL.to_string()),
            libretranslate_api_key: env_non_empty("LIBRETRANSLATE_API_KEY"),

            // Google
            google_translate_url: env_non_empty("GOOGLE_TRANSLATE_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_TRANSLATE_URL.to_string()),
            google_translate_enabled: env_flag("GOOGLE_TRANSLATE_ENABLED", true),
        })
    }
}

impl Default for Config {
    /// Public endpoints only, no credentials.
    fn default() -> Self {
        Self {
            port: 5000,
            debug: false,
            deepl_api_key: None,
            deepl_api_url: DEFAULT_DEEPL_API_URL.to_string(),
            azure_translator_key: None,
            azure_translator_endpoint: None,
            azure_translator_region: "westeurope".to_string(),
            libretranslate_url: DEFAULT_LIBRETRANSLATE_URL.to_string(),
            libretranslate_api_key: None,
            google_translate_url: DEFAULT_GOOGLE_TRANSLATE_URL.to_string(),
            google_translate_enabled: true,
        }
    }
}

/// Read an env var, treating unset and blank values the same way
fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(key: &str, default: bool) -> bool {
    match env_non_empty(key) {
        Some(v) => matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "PORT",
        "DEBUG",
        "DEEPL_API_KEY",
        "DEEPL_API_URL",
        "AZURE_TRANSLATOR_KEY",
        "AZURE_TRANSLATOR_ENDPOINT",
        "AZURE_TRANSLATOR_REGION",
        "LIBRETRANSLATE_URL",
        "LIBRETRANSLATE_API_KEY",
        "GOOGLE_TRANSLATE_URL",
        "GOOGLE_TRANSLATE_ENABLED",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().expect("defaults should load");

        assert_eq!(config.port, 5000);
        assert!(!config.debug);
        assert!(config.deepl_api_key.is_none());
        assert_eq!(config.deepl_api_url, DEFAULT_DEEPL_API_URL);
        assert!(config.azure_translator_key.is_none());
        assert!(config.azure_translator_endpoint.is_none());
        assert_eq!(config.azure_translator_region, "westeurope");
        assert_eq!(config.libretranslate_url, DEFAULT_LIBRETRANSLATE_URL);
        assert!(config.google_translate_enabled);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_credentials() {
        clear_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("DEBUG", "True");
        std::env::set_var("DEEPL_API_KEY", "deepl-key:fx");
        std::env::set_var("AZURE_TRANSLATOR_KEY", "azure-key");
        std::env::set_var(
            "AZURE_TRANSLATOR_ENDPOINT",
            "https://api.cognitive.microsofttranslator.com",
        );
        std::env::set_var("AZURE_TRANSLATOR_REGION", "francecentral");
        std::env::set_var("GOOGLE_TRANSLATE_ENABLED", "false");

        let config = Config::from_env().expect("config should load");
        clear_env();

        assert_eq!(config.port, 8080);
        assert!(config.debug);
        assert_eq!(config.deepl_api_key.as_deref(), Some("deepl-key:fx"));
        assert_eq!(config.azure_translator_key.as_deref(), Some("azure-key"));
        assert_eq!(config.azure_translator_region, "francecentral");
        assert!(!config.google_translate_enabled);
    }

    #[test]
    #[serial]
    fn test_blank_credentials_are_absent() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", "   ");
        std::env::set_var("AZURE_TRANSLATOR_KEY", "");

        let config = Config::from_env().expect("config should load");
        clear_env();

        assert!(config.deepl_api_key.is_none());
        assert!(config.azure_translator_key.is_none());
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");

        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("PORT"));
    }
}
