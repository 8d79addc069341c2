use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::User;
use crate::services::remote::NewProfileRow;
use crate::state::AppState;

/// Resolve the session behind the request's bearer token. Booking and
/// host actions call this first; a missing or stale token aborts with 401.
pub fn current_user(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let db = state.db.lock().unwrap();
    queries::get_session_user(&db, token)?.ok_or(AppError::Unauthorized)
}

// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if let Err(e) = state.remote.authenticate(&body.email, &body.password).await {
        tracing::info!(email = %body.email, error = %e, "authentication rejected");
        return Err(AppError::Unauthorized);
    }

    // Credentials are valid but without a profile row there is no usable
    // account; surface the error and establish no session.
    let profile = state
        .remote
        .get_profile(&body.email)
        .await
        .map_err(|e| AppError::Remote(format!("profile lookup failed: {e}")))?;
    let user = match profile {
        Some(row) => row.into_user(),
        None => return Err(AppError::NotFound("user profile".to_string())),
    };

    let token = Uuid::new_v4().to_string();
    {
        let db = state.db.lock().unwrap();
        queries::save_user(&db, &user)?;
        queries::create_session(&db, &token, &user.id)?;
    }

    tracing::info!(user_id = %user.id, "session established");
    Ok(Json(LoginResponse { token, user }))
}

// POST /api/auth/signup
#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_host: bool,
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if let Err(e) = state.remote.sign_up(&body.email, &body.password).await {
        tracing::info!(email = %body.email, error = %e, "registration rejected");
        return Err(AppError::Validation(format!("could not register: {e}")));
    }

    let profile = NewProfileRow {
        name: body.name,
        email: body.email.clone(),
        is_host: body.is_host,
        avatar_url: format!("https://i.pravatar.cc/150?u={}", body.email),
        bio: String::new(),
    };
    let user = state
        .remote
        .create_profile(&profile)
        .await
        .map_err(|e| AppError::Remote(format!("profile creation failed: {e}")))?
        .into_user();

    let token = Uuid::new_v4().to_string();
    {
        let db = state.db.lock().unwrap();
        queries::save_user(&db, &user)?;
        queries::create_session(&db, &token, &user.id)?;
    }

    tracing::info!(user_id = %user.id, "account registered");
    Ok(Json(LoginResponse { token, user }))
}

// POST /api/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let token = auth.strip_prefix("Bearer ").unwrap_or("");

    let db = state.db.lock().unwrap();
    queries::delete_session(&db, token)?;
    Ok(Json(serde_json::json!({"ok": true})))
}

// GET /api/auth/me
#[derive(Serialize)]
pub struct MeResponse {
    pub user: User,
    pub favorite_space_ids: Vec<String>,
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, AppError> {
    let user = current_user(&state, &headers)?;
    let favorite_space_ids = {
        let db = state.db.lock().unwrap();
        queries::list_favorites(&db, &user.id)?
    };
    Ok(Json(MeResponse {
        user,
        favorite_space_ids,
    }))
}

// POST /api/favorites/:space_id/toggle
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(space_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = current_user(&state, &headers)?;
    let favorited = {
        let db = state.db.lock().unwrap();
        queries::toggle_favorite(&db, &user.id, &space_id)?
    };
    Ok(Json(serde_json::json!({"favorited": favorited})))
}

// GET /api/favorites
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, AppError> {
    let user = current_user(&state, &headers)?;
    let ids = {
        let db = state.db.lock().unwrap();
        queries::list_favorites(&db, &user.id)?
    };
    Ok(Json(ids))
}
