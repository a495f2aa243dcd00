/// HTTP request handlers
use crate::domain::{Health, RoverName};
use crate::errors::ApiError;
use crate::services::ImageryService;
use crate::state::{ApodView, EpicView, RoverView};
use crate::utils::parse_calendar_date;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub imagery_service: Arc<ImageryService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    fn parsed(&self) -> Result<Option<NaiveDate>, ApiError> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => Ok(Some(parse_calendar_date(s)?)),
        }
    }
}

fn parse_rover(name: &str) -> Result<RoverName, ApiError> {
    name.parse().map_err(ApiError::UnknownRover)
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Astronomy Picture of the Day
pub async fn get_apod(
    Query(query): Query<DateQuery>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<ApodView>>, ApiError> {
    let view = state.imagery_service.apod(query.parsed()?).await?;
    Ok(Json(SuccessResponse::new(view)))
}

/// Latest EPIC images
pub async fn get_epic(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<EpicView>>, ApiError> {
    let view = state.imagery_service.epic().await?;
    Ok(Json(SuccessResponse::new(view)))
}

/// Rover manifest with computed availability
pub async fn get_rover_manifest(
    Path(rover): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let rover = parse_rover(&rover)?;
    let (manifest, availability) = state.imagery_service.rover_manifest(rover).await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({
            "manifest": manifest,
            "availability": availability
        })
    ))))
}

/// Rover photos for the requested or default date
pub async fn get_rover(
    Path(rover): Path<String>,
    Query(query): Query<DateQuery>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<RoverView>>, ApiError> {
    let rover = parse_rover(&rover)?;
    let view = state
        .imagery_service
        .rover_view(rover, query.parsed()?)
        .await?;
    Ok(Json(SuccessResponse::new(view)))
}
