use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use traductor::{
    Backend, BackendSet, SUPPORTED_LANGUAGES, TranslateError, TranslationService,
};

fn default_target() -> String {
    "es".to_string()
}

fn default_source() -> String {
    "auto".to_string()
}

fn default_service() -> String {
    "google".to_string()
}

#[derive(Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_target")]
    pub target_language: String,
    #[serde(default = "default_source")]
    pub source_language: String,
    #[serde(default = "default_service")]
    pub service: String,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub service_used: String,
    pub success: bool,
}

#[derive(Deserialize)]
pub struct BatchTranslateRequest {
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default = "default_target")]
    pub target_language: String,
    #[serde(default = "default_source")]
    pub source_language: String,
    #[serde(default = "default_service")]
    pub service: String,
}

#[derive(Serialize)]
pub struct BatchTranslateResponse {
    pub results: Vec<traductor::BatchItem>,
    pub total_processed: usize,
    pub success: bool,
}

#[derive(Deserialize)]
pub struct DetectLanguageRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct DetectLanguageResponse {
    pub text: String,
    pub detected_language: String,
    pub success: bool,
}

#[derive(Serialize)]
pub struct SupportedLanguagesResponse {
    pub languages: BTreeMap<&'static str, &'static str>,
    pub success: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Error body. Validation errors carry only `error`; backend failures add
/// `message` and `success: false`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a service error onto the HTTP status and body convention: caller
/// mistakes are 400 with the error text itself, backend failures are 500
/// under a stable per-endpoint label.
fn map_failure(err: TranslateError, label: &str) -> ApiError {
    if err.is_invalid_input() {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
                message: None,
                success: None,
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: label.to_string(),
                message: Some(err.to_string()),
                success: Some(false),
            }),
        )
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let backends = BackendSet::from_env()
        .map_err(|e| format!("Failed to initialize translation backends: {}", e))?;
    let state = AppState {
        service: Arc::new(TranslationService::new(backends)),
    };

    let addr = std::env::var("TRADUCTOR_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Translation API running at http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Build the application router. Tests drive it directly without a socket.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .route("/batch-translate", post(batch_translate))
        .route("/detect-language", post(detect_language))
        .route("/supported-languages", get(supported_languages))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let backend = Backend::from_name(&request.service);

    let translated = state
        .service
        .translate(
            &request.text,
            &request.source_language,
            &request.target_language,
            backend,
        )
        .await
        .map_err(|err| map_failure(err, "Translation failed"))?;

    let original = request.text.trim().to_string();
    if translated.trim().to_lowercase() == original.to_lowercase() {
        info!("Text appears to already be in target language");
    }

    Ok(Json(TranslateResponse {
        original_text: original,
        translated_text: translated,
        source_language: request.source_language,
        target_language: request.target_language,
        service_used: backend.as_str().to_string(),
        success: true,
    }))
}

async fn batch_translate(
    State(state): State<AppState>,
    Json(request): Json<BatchTranslateRequest>,
) -> Result<Json<BatchTranslateResponse>, ApiError> {
    let backend = Backend::from_name(&request.service);

    let results = state
        .service
        .translate_batch(
            &request.texts,
            &request.source_language,
            &request.target_language,
            backend,
        )
        .await
        .map_err(|err| map_failure(err, "Batch translation failed"))?;

    Ok(Json(BatchTranslateResponse {
        total_processed: results.len(),
        results,
        success: true,
    }))
}

async fn detect_language(
    State(state): State<AppState>,
    Json(request): Json<DetectLanguageRequest>,
) -> Result<Json<DetectLanguageResponse>, ApiError> {
    let detected = state
        .service
        .detect_language(&request.text)
        .await
        .map_err(|err| map_failure(err, "Language detection failed"))?;

    Ok(Json(DetectLanguageResponse {
        text: request.text.trim().to_string(),
        detected_language: detected,
        success: true,
    }))
}

async fn supported_languages() -> Json<SupportedLanguagesResponse> {
    Json(SupportedLanguagesResponse {
        languages: SUPPORTED_LANGUAGES.iter().copied().collect(),
        success: true,
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
