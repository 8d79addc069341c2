use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Review;
use crate::state::AppState;

// GET /api/spaces/:id/reviews
//
// Remote reviews win when the store answers with rows; otherwise the
// locally seeded reviews serve as the fallback, newest first.
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(space_id): Path<String>,
) -> Result<Json<Vec<Review>>, AppError> {
    match state.remote.list_reviews(&space_id).await {
        Ok(rows) if !rows.is_empty() => {
            let mut reviews: Vec<Review> = rows.into_iter().map(|r| r.into_review()).collect();
            reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(Json(reviews))
        }
        Ok(_) => {
            let db = state.db.lock().unwrap();
            Ok(Json(queries::get_reviews_for_space(&db, &space_id)?))
        }
        Err(e) => {
            tracing::warn!(space_id = %space_id, error = %e, "remote reviews unavailable, serving local");
            let db = state.db.lock().unwrap();
            Ok(Json(queries::get_reviews_for_space(&db, &space_id)?))
        }
    }
}
