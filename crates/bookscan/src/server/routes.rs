use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use log::{info, trace};
use serde_json::{json, Value};

use crate::{
    format::{csv, html},
    BookRecord, IsbnRequest,
};

use super::{ApiError, ServerState};

/// Creates the router serving every route of the service.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/scan", post(scan))
        .route("/fetch_book_info", post(fetch_book_info))
        .route("/commit_book_info", post(commit_book_info))
        .route("/download", get(download))
        .with_state(state)
}

async fn index(State(state): State<ServerState>) -> Html<String> {
    let records = state.store.snapshot();
    let head = BookRecord::COLUMNS
        .iter()
        .map(|column| format!("<th>{column}</th>"))
        .collect::<String>();

    Html(format!(
        "<!DOCTYPE html>\n\
         <html><head><meta charset=\"utf-8\"><title>bookscan</title></head>\n\
         <body>\n\
         <h1>Recorded books</h1>\n\
         <table id=\"books-table\"><thead><tr>{head}</tr></thead>{body}</table>\n\
         <p><a id=\"download-csv\" href=\"/download\">Download CSV</a></p>\n\
         </body></html>\n",
        body = html::compose_body(&records),
    ))
}

async fn scan(
    State(state): State<ServerState>,
    Json(IsbnRequest { isbn }): Json<IsbnRequest>,
) -> Result<Json<BookRecord>, ApiError> {
    let record = lookup(&state, isbn).await?;
    info!("Recording '{}' ({})", record.title, record.isbn);
    state.store.push(record.clone());
    Ok(Json(record))
}

async fn fetch_book_info(
    State(state): State<ServerState>,
    Json(IsbnRequest { isbn }): Json<IsbnRequest>,
) -> Result<Json<BookRecord>, ApiError> {
    lookup(&state, isbn).await.map(Json)
}

async fn commit_book_info(
    State(state): State<ServerState>,
    Json(record): Json<BookRecord>,
) -> Json<Value> {
    info!("Recording '{}' ({})", record.title, record.isbn);
    state.store.push(record);
    Json(json!({ "status": "success" }))
}

async fn download(State(state): State<ServerState>) -> impl IntoResponse {
    let records = state.store.snapshot();
    trace!("Exporting {} record(s)", records.len());

    (
        [
            (header::CONTENT_TYPE, csv::CONTENT_TYPE.to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", csv::FILE_NAME),
            ),
        ],
        csv::compose(&records),
    )
}

async fn lookup(state: &ServerState, isbn: String) -> Result<BookRecord, ApiError> {
    if isbn.trim().is_empty() {
        return Err(ApiError::BadRequest("The isbn field is empty".to_owned()));
    }

    let source = Arc::clone(&state.source);
    tokio::task::spawn_blocking(move || source.fetch(&isbn))
        .await
        .map_err(|e| ApiError::Internal(format!("Lookup task failed: {e}")))?
        .map_err(ApiError::from)
}
