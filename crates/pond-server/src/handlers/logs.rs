//! Reading log handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use pond_core::{NewReading, Reading};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Reading>>, ApiError> {
    let readings = state.store.list_all().await?;
    debug!("Returning {} readings", readings.len());
    Ok(Json(readings))
}

/// The body is taken as raw JSON so that every missing or non-numeric field
/// can be named in the 400 response.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(body) = payload?;
    let reading = NewReading::from_json(&body)?;

    let id = state.store.insert(&reading).await?;
    info!(
        "Logged reading {}: ph={} ec={} do={} temp={}",
        id, reading.ph, reading.ec, reading.do_, reading.temp
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Log added",
        }),
    ))
}
