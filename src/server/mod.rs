//! HTTP surface: serves the persisted CSV back as JSON.
//!
//! One read endpoint, `GET /api/users`. Every request re-reads and
//! re-parses the file; there is no caching, so the response always reflects
//! the last completed fetch run.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::core::table::{table_to_records, DecodeOptions};
use crate::core::Storage;

/// State shared by all handlers.
pub struct ServerState<S> {
    pub storage: S,
    pub csv_file: String,
}

impl<S> ServerState<S> {
    pub fn new(storage: S, csv_file: String) -> Self {
        Self { storage, csv_file }
    }
}

/// Builds the users API router. Non-GET methods on the route get axum's
/// 405 response.
pub fn users_router<S>(state: Arc<ServerState<S>>) -> Router
where
    S: Storage + 'static,
{
    Router::new()
        .route("/api/users", get(list_users::<S>))
        .with_state(state)
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> impl IntoResponse {
    (status, Json(ErrorResponse { error: msg.into() }))
}

/// `GET /api/users` — decode the CSV file and return it as a JSON array.
///
/// A missing file is "not found", not "empty": the caller is told to run
/// the fetch job. Read and decode failures are server errors.
async fn list_users<S: Storage>(State(state): State<Arc<ServerState<S>>>) -> impl IntoResponse {
    if !state.storage.exists(&state.csv_file).await {
        return error_response(
            StatusCode::NOT_FOUND,
            "No data yet. Run the users-etl fetch job first",
        )
        .into_response();
    }

    let bytes = match state.storage.read_file(&state.csv_file).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                .into_response()
        }
    };

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "stored CSV is not valid UTF-8",
            )
            .into_response()
        }
    };

    match table_to_records(&text, &DecodeOptions::serving()) {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
