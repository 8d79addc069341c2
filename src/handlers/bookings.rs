use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::auth::current_user;
use crate::models::{Booking, BookingDraft, BookingSummary, Recurrence, RecurrenceType};
use crate::services::availability::slot_hour;
use crate::services::scheduling::{validate_booking, SchedulingError};
use crate::services::{recurrence, scheduling};
use crate::state::AppState;

const MAX_RECURRENCE_COUNT: u32 = 52;

// POST /api/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub space_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub recurrence: Recurrence,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<BookingSummary>, AppError> {
    let user = current_user(&state, &headers)?;

    let date: NaiveDate = body
        .date
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid date: {}", body.date)))?;

    let (start_hour, end_hour) = match (slot_hour(&body.start_time), slot_hour(&body.end_time)) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => {
            return Err(AppError::Validation(
                "end time must be after start time".to_string(),
            ))
        }
    };

    if body.recurrence.recurrence_type != RecurrenceType::None
        && body.recurrence.count > MAX_RECURRENCE_COUNT
    {
        return Err(AppError::Validation(format!(
            "recurrence count must be at most {MAX_RECURRENCE_COUNT}"
        )));
    }

    // Validation and persistence share one lock scope so a concurrent
    // request cannot slip a conflicting booking in between.
    let summary = {
        let db = state.db.lock().unwrap();

        let space = queries::get_space(&db, &body.space_id)?
            .ok_or_else(|| AppError::NotFound(format!("space {}", body.space_id)))?;

        // Price is derived here, never trusted from the client.
        let duration = (end_hour - start_hour) as f64;
        let draft = BookingDraft {
            user_id: user.id.clone(),
            space: space.clone(),
            date,
            start_time: body.start_time.clone(),
            end_time: body.end_time.clone(),
            total_price: space.price_per_hour * duration,
        };

        let instances = recurrence::expand_recurrence(&draft, body.recurrence);

        // All instances must be bookable before any is written.
        for instance in &instances {
            validate_booking(
                &db,
                &space,
                &instance.date.to_string(),
                &instance.start_time,
                &instance.end_time,
            )
            .map_err(map_scheduling_error)?;
        }
        for instance in &instances {
            queries::create_booking(&db, instance)?;
        }

        tracing::info!(
            user_id = %user.id,
            space_id = %space.id,
            instances = instances.len(),
            "booking series created"
        );

        recurrence::summarize(&instances, body.recurrence)
            .ok_or_else(|| AppError::Validation("no booking instances generated".to_string()))?
    };

    Ok(Json(summary))
}

fn map_scheduling_error(e: SchedulingError) -> AppError {
    match e {
        scheduling::SchedulingError::InvalidRange => {
            AppError::Validation("end time must be after start time".to_string())
        }
        scheduling::SchedulingError::Unavailable { .. } => AppError::Validation(e.to_string()),
        scheduling::SchedulingError::Conflict { .. } => AppError::Conflict(e.to_string()),
        scheduling::SchedulingError::Storage(err) => AppError::Database(err),
    }
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    let user = current_user(&state, &headers)?;
    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_bookings_for_user(&db, &user.id)?
    };
    Ok(Json(bookings))
}
