//! quotemaster HTTP handlers.
//!
//! - `GET /quotemaster/random`: a random quote
//! - `GET /quotemaster/popular`: a random quote among the most liked
//! - `GET /quotemaster/id/{id}`: a specific quote
//! - `POST /quotemaster/like`: `{"id": n}`, adds a like
//! - `POST /quotemaster/new`: `{"quote": "...", "name": "..."}`, returns `{"id": n}`
//! - `POST /quotemaster/reset`: `{"pass": "..."}`, restores the default quotes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use mini_apis_core::{Quote, QuoteError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;
use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/random", get(random_quote))
        .route("/popular", get(popular_quote))
        .route("/id/{id}", get(quote_by_id))
        .route("/like", post(like_quote))
        .route("/new", post(new_quote))
        .route("/reset", post(reset_quotes))
}

async fn random_quote(State(state): State<AppState>) -> Result<Json<Quote>, ApiError> {
    let quotes = state.quotes();
    Ok(Json(quotes.random_quote()?.clone()))
}

async fn popular_quote(State(state): State<AppState>) -> Result<Json<Quote>, ApiError> {
    let quotes = state.quotes();
    Ok(Json(quotes.popular_quote()?.clone()))
}

async fn quote_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quote>, ApiError> {
    let id: i64 = id.parse().map_err(|_| QuoteError::InvalidId)?;
    let quotes = state.quotes();
    Ok(Json(quotes.quote_by_id(id)?.clone()))
}

/// Reads a JSON request body. Bodies that fail to parse are treated as
/// empty, so every field is reported as missing.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!("Unreadable request body: {}", rejection);
            Value::Null
        }
    }
}

/// A string field, or `""` if it is missing or not a string.
fn str_field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}

async fn like_quote(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = json_body(body)
        .get("id")
        .and_then(Value::as_i64)
        .ok_or(QuoteError::InvalidId)?;
    state.quotes().like_quote(id)?;
    Ok(StatusCode::OK)
}

#[derive(Debug, Serialize, Deserialize)]
struct NewQuoteResponse {
    id: u64,
}

/// Non-string `quote` and `name` fields fail the same length checks as
/// empty ones.
async fn new_quote(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<NewQuoteResponse>, ApiError> {
    let body = json_body(body);
    let id = state
        .quotes()
        .new_quote(str_field(&body, "quote"), str_field(&body, "name"))?;
    Ok(Json(NewQuoteResponse { id }))
}

async fn reset_quotes(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let body = json_body(body);
    state.quotes().reset_quotes(str_field(&body, "pass"))?;
    Ok(StatusCode::OK)
}
