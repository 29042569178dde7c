use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use lexicon::{HistoryDocument, normalize_word};
use serde::{Deserialize, Serialize};

#[cfg(feature = "translate")]
use axum::extract::rejection::JsonRejection;
#[cfg(feature = "translate")]
use tracing::debug;

#[cfg(feature = "translate")]
use crate::error::AppError::TranslationUnavailable;
use crate::{
    error::AppError::{self, MissingParameter, NotFound},
    lookup::DefinitionResult,
    state::AppState,
};

#[derive(Deserialize)]
pub struct DefinitionParams {
    word: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    term: String,
}

#[derive(Serialize)]
pub struct Message {
    message: &'static str,
}

pub async fn root_handler() -> &'static str {
    "Dictionnaire API"
}

pub async fn definitions_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DefinitionParams>,
) -> Result<Json<DefinitionResult>, AppError> {
    let word = params
        .word
        .as_deref()
        .and_then(normalize_word)
        .ok_or(MissingParameter("word"))?;

    Ok(Json(state.lookup.lookup(&word).await))
}

pub async fn history_handler(State(state): State<Arc<AppState>>) -> Json<HistoryDocument> {
    Json(state.history.list().await)
}

pub async fn delete_history_item_handler(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> Result<Json<Message>, AppError> {
    let word = normalize_word(&word).ok_or(NotFound)?;

    if !state.history.remove(&word).await? {
        return Err(NotFound);
    }

    Ok(Json(Message {
        message: "Item deleted from history.",
    }))
}

pub async fn clear_history_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Message>, AppError> {
    state.history.clear().await?;

    Ok(Json(Message {
        message: "History cleared.",
    }))
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<String>> {
    Json(state.index.suggest(&params.term))
}

#[cfg(feature = "translate")]
#[derive(Deserialize)]
pub struct TranslateRequest {
    text: Option<String>,
    target: Option<String>,
}

#[cfg(feature = "translate")]
#[derive(Serialize)]
pub struct TranslateResponse {
    translation: String,
}

#[cfg(feature = "translate")]
pub async fn translate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Unreadable translate body: {rejection}");
        MissingParameter("text")
    })?;

    let text = payload
        .text
        .filter(|text| !text.trim().is_empty())
        .ok_or(MissingParameter("text"))?;

    let translator = state.translator.as_ref().ok_or(TranslationUnavailable)?;
    let target = payload
        .target
        .as_deref()
        .unwrap_or(translator.default_target());

    let translation = translator.translate(&text, target).await?;

    Ok(Json(TranslateResponse { translation }))
}
