use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::gemini::ProviderError;
use crate::prompts;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/definition", post(definition))
        .route("/api/image", post(image))
        .route("/api/speech", post(speech))
        .route("/api/story", post(story))
        .route("/api/quick", post(quick))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefinitionRequest {
    term: String,
    native_lang: String,
    target_lang: String,
}

async fn definition(
    State(state): State<AppState>,
    Json(req): Json<DefinitionRequest>,
) -> Result<Response, ApiError> {
    let prompt = prompts::definition(&req.term, &req.native_lang, &req.target_lang);
    let payload = state
        .gemini
        .generate_json(&prompt, prompts::definition_schema())
        .await?;

    // The model's JSON text passes through untouched; the client strips
    // any code fence before parsing.
    Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageRequest {
    term: String,
    target_lang: String,
}

#[derive(Serialize)]
struct ImageResponse {
    image: Option<String>,
}

async fn image(
    State(state): State<AppState>,
    Json(req): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    let prompt = prompts::image(&req.term, &req.target_lang);
    let image = state
        .gemini
        .generate_image(&prompt)
        .await?
        .map(|data| format!("data:image/png;base64,{data}"));

    Ok(Json(ImageResponse { image }))
}

#[derive(Deserialize)]
struct SpeechRequest {
    text: String,
}

#[derive(Serialize)]
struct SpeechResponse {
    audio: Option<String>,
}

async fn speech(
    State(state): State<AppState>,
    Json(req): Json<SpeechRequest>,
) -> Result<Json<SpeechResponse>, ApiError> {
    let audio = state.gemini.generate_speech(&req.text).await?;
    Ok(Json(SpeechResponse { audio }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoryRequest {
    words: Vec<String>,
    native_lang: String,
    target_lang: String,
}

#[derive(Serialize)]
struct StoryResponse {
    story: String,
}

async fn story(
    State(state): State<AppState>,
    Json(req): Json<StoryRequest>,
) -> Result<Json<StoryResponse>, ApiError> {
    if req.words.is_empty() {
        return Err(ApiError::bad_request("words must not be empty"));
    }

    let prompt = prompts::story(&req.words, &req.native_lang, &req.target_lang);
    let story = state.gemini.generate_text(&prompt).await?;
    Ok(Json(StoryResponse { story }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuickRequest {
    term: String,
    category: String,
    native_lang: String,
    target_lang: String,
}

#[derive(Serialize)]
struct QuickResponse {
    answer: String,
}

async fn quick(
    State(state): State<AppState>,
    Json(req): Json<QuickRequest>,
) -> Result<Json<QuickResponse>, ApiError> {
    let instruction = prompts::quick_instruction(&req.category, &req.term)
        .ok_or_else(|| ApiError::bad_request("unknown category"))?;

    let prompt = prompts::quick(&instruction, &req.native_lang, &req.target_lang);
    let answer = state.gemini.generate_text(&prompt).await?;
    Ok(Json(QuickResponse { answer }))
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        // Provider detail stays in the server log; clients only ever see a
        // generic retryable message.
        tracing::error!("provider call failed: {e}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "generation failed".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
