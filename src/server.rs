//! HTTP façade: request validation and response shaping around the
//! translation service. All translation decisions live in
//! [`crate::fallback`]; handlers here never see provider errors.

use crate::config::Config;
use crate::email::{translate_email, DEFAULT_EMAIL_SOURCE_LANG};
use crate::fallback::{TranslationService, TARGET_LANG};
use crate::metrics::MetricsReport;
use crate::providers::AUTO_DETECT;
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<TranslationService>,
}

impl AppState {
    /// Wrap an already-built translation service
    pub fn new(config: Config, translator: TranslationService) -> Self {
        Self {
            config: Arc::new(config),
            translator: Arc::new(translator),
        }
    }

    /// Build the standard provider chain from `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let translator = TranslationService::from_config(&config)?;
        Ok(Self::new(config, translator))
    }
}

/// Errors surfaced to HTTP clients as `{"success": false, "error": ...}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub source_lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: &'static str,
    /// `null` when no provider succeeded and the text was passed through
    pub provider: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct EmailTranslateRequest {
    pub subject: Option<String>,
    pub content: Option<String>,
    pub source_lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailTranslateResponse {
    pub success: bool,
    pub translated_subject: String,
    pub translated_content: String,
    pub source_lang: String,
    pub target_lang: &'static str,
    pub subject_provider: Option<&'static str>,
    pub content_provider: Option<&'static str>,
}

/// Build the full application router with middleware and shared state
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/translate", post(translate))
        .route("/translate-email", post(translate_email_handler));

    with_middleware(routes).with_state(state)
}

/// Panic recovery, request tracing and permissive CORS
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind on all interfaces and serve until the process is stopped
pub async fn serve(state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    info!(
        "Translation API listening on {} (debug: {}, providers: {:?})",
        addr,
        state.config.debug,
        state.translator.provider_names()
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, create_router(state))
        .await
        .context("Server error")?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "translation-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.translator.metrics().report())
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) = payload?;

    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing required field: text".to_string()))?;
    let source_lang = request
        .source_lang
        .unwrap_or_else(|| AUTO_DETECT.to_string());

    let translation = state.translator.translate(&text, &source_lang).await;

    Ok(Json(TranslateResponse {
        success: true,
        translated_text: translation.text,
        source_lang,
        target_lang: TARGET_LANG,
        provider: translation.provider,
    }))
}

async fn translate_email_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmailTranslateRequest>, JsonRejection>,
) -> Result<Json<EmailTranslateResponse>, ApiError> {
    let Json(request) = payload?;

    let (subject, content) = match (request.subject, request.content) {
        (Some(subject), Some(content)) => (subject, content),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required fields: subject and content".to_string(),
            ))
        }
    };
    let source_lang = request
        .source_lang
        .unwrap_or_else(|| DEFAULT_EMAIL_SOURCE_LANG.to_string());

    let translated = translate_email(&state.translator, &subject, &content, &source_lang).await;

    Ok(Json(EmailTranslateResponse {
        success: true,
        translated_subject: translated.subject.text,
        translated_content: translated.content.text,
        source_lang,
        target_lang: TARGET_LANG,
        subject_provider: translated.subject.provider,
        content_provider: translated.content.provider,
    }))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown internal error".to_string()
    };
    error!("Handler panicked: {}", message);

    ApiError::Internal(message).into_response()
}
