use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{FiltersState, Space, SpaceType};
use crate::services::availability::{compute_free_slots, compute_valid_end_times};
use crate::services::{geo, search};
use crate::state::AppState;

// GET /api/spaces
#[derive(Deserialize)]
pub struct SpacesQuery {
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Comma-separated space type names, e.g. "Consultorio,Oficina Privada".
    pub types: Option<String>,
    pub capacity: Option<u32>,
    pub date: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl SpacesQuery {
    fn into_filters(self) -> Result<FiltersState, AppError> {
        let mut space_types: Vec<SpaceType> = Vec::new();
        for name in self.types.as_deref().unwrap_or("").split(',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            match SpaceType::parse(name) {
                Some(t) => space_types.push(t),
                None => {
                    return Err(AppError::Validation(format!(
                        "unknown space type: {name}"
                    )))
                }
            }
        }

        Ok(FiltersState {
            location: self.location.unwrap_or_default(),
            price_range: (
                self.min_price.unwrap_or(0.0),
                self.max_price.unwrap_or(f64::MAX),
            ),
            space_types,
            capacity: self.capacity.unwrap_or(1),
            date: self.date.filter(|d| !d.is_empty()),
        })
    }
}

pub async fn list_spaces(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SpacesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let reference = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        _ => None,
    };
    let filters = query.into_filters()?;

    let spaces = {
        let db = state.db.lock().unwrap();
        queries::list_spaces(&db)?
    };
    let filtered = search::filter_spaces(&spaces, &filters);

    let body = match reference {
        Some((lat, lng)) => serde_json::to_value(geo::sort_by_distance(filtered, lat, lng)),
        None => serde_json::to_value(filtered),
    }
    .map_err(|e| AppError::Database(e.into()))?;

    Ok(Json(body))
}

// GET /api/spaces/:id
pub async fn get_space(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Space>, AppError> {
    let space = {
        let db = state.db.lock().unwrap();
        queries::get_space(&db, &id)?
    };
    space
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("space {id}")))
}

// GET /api/spaces/:id/availability?date=YYYY-MM-DD[&start=HH:00]
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub start: Option<String>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub date: String,
    pub free_slots: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_end_times: Option<Vec<String>>,
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    if query.date.parse::<NaiveDate>().is_err() {
        return Err(AppError::Validation(format!(
            "invalid date: {}",
            query.date
        )));
    }

    let (space, bookings) = {
        let db = state.db.lock().unwrap();
        let space = queries::get_space(&db, &id)?
            .ok_or_else(|| AppError::NotFound(format!("space {id}")))?;
        let bookings = queries::get_bookings_for_space_on_date(&db, &id, &query.date)?;
        (space, bookings)
    };

    let free_slots = compute_free_slots(space.declared_slots(&query.date), &bookings);
    let valid_end_times = query
        .start
        .as_deref()
        .map(|start| compute_valid_end_times(start, &free_slots));

    Ok(Json(AvailabilityResponse {
        date: query.date,
        free_slots,
        valid_end_times,
    }))
}
