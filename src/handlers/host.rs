use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::auth::current_user;
use crate::models::{AvailabilityMap, Booking, Location, Space, SpaceType};
use crate::state::AppState;

// POST /api/host/spaces
#[derive(Deserialize)]
pub struct CreateSpaceRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub space_type: SpaceType,
    pub description: String,
    pub location: Location,
    pub capacity: u32,
    pub price_per_hour: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub availability: AvailabilityMap,
}

pub async fn create_space(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateSpaceRequest>,
) -> Result<Json<Space>, AppError> {
    let user = current_user(&state, &headers)?;
    if !user.is_host {
        return Err(AppError::Forbidden(
            "only hosts can publish spaces".to_string(),
        ));
    }

    let space = Space {
        id: Uuid::new_v4().to_string(),
        title: body.title,
        space_type: body.space_type,
        description: body.description,
        location: body.location,
        capacity: body.capacity,
        price_per_hour: body.price_per_hour,
        amenities: body.amenities,
        images: body.images,
        host_id: user.id.clone(),
        rating: 0.0,
        review_count: 0,
        availability: body.availability,
    };

    {
        let db = state.db.lock().unwrap();
        queries::upsert_space(&db, &space)?;
    }

    tracing::info!(space_id = %space.id, host_id = %user.id, "space published");
    Ok(Json(space))
}

// GET /api/host/spaces
pub async fn list_host_spaces(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Space>>, AppError> {
    let user = current_user(&state, &headers)?;
    if !user.is_host {
        return Err(AppError::Forbidden(
            "only hosts have listings".to_string(),
        ));
    }

    let db = state.db.lock().unwrap();
    Ok(Json(queries::get_spaces_for_host(&db, &user.id)?))
}

// GET /api/host/bookings
pub async fn list_host_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    let user = current_user(&state, &headers)?;
    if !user.is_host {
        return Err(AppError::Forbidden(
            "only hosts receive bookings".to_string(),
        ));
    }

    let db = state.db.lock().unwrap();
    Ok(Json(queries::get_bookings_for_host(&db, &user.id)?))
}

// PUT /api/host/spaces/:id/availability
#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub availability: AvailabilityMap,
}

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(space_id): Path<String>,
    Json(body): Json<UpdateAvailabilityRequest>,
) -> Result<Json<Space>, AppError> {
    let user = current_user(&state, &headers)?;

    let db = state.db.lock().unwrap();
    let space = queries::get_space(&db, &space_id)?
        .ok_or_else(|| AppError::NotFound(format!("space {space_id}")))?;
    if space.host_id != user.id {
        return Err(AppError::Forbidden(
            "only the owner can edit the calendar".to_string(),
        ));
    }

    queries::set_space_availability(&db, &space_id, &body.availability)?;
    let updated = queries::get_space(&db, &space_id)?
        .ok_or_else(|| AppError::NotFound(format!("space {space_id}")))?;
    Ok(Json(updated))
}
