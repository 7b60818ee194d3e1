use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{middleware::error_handling::AppError, ApiState};

/// `GET /{collection}`; every query parameter is an equality filter on a top-level field.
#[axum::debug_handler]
pub async fn list_records(
    State(state): State<Arc<ApiState>>,
    Path(collection): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, AppError> {
    let records = state.store.list(&collection, &filters).await?;
    Ok(Json(records))
}

#[axum::debug_handler]
pub async fn get_record(
    State(state): State<Arc<ApiState>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let record = state.store.get(&collection, &id).await?;
    Ok(Json(record))
}

#[axum::debug_handler]
pub async fn create_record(
    State(state): State<Arc<ApiState>>,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let record = state.store.insert(&collection, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[axum::debug_handler]
pub async fn update_record(
    State(state): State<Arc<ApiState>>,
    Path((collection, id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let record = state.store.update(&collection, &id, payload).await?;
    Ok(Json(record))
}

#[axum::debug_handler]
pub async fn delete_record(
    State(state): State<Arc<ApiState>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&collection, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
