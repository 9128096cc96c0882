use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{Decision, Role, VerifyError},
    db::user_repo,
    error::AppError,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRoleParams {
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct VerifyRoleResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Matching is exact, so serve the canonical trailing-slash form
        // alongside the bare one.
        .route("/users", get(list_users))
        .route("/users/", get(list_users))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/verify-role", get(verify_role))
        .with_state(state)
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let (Some(username), Some(email), Some(password)) = (body.username, body.email, body.password)
    else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    let id = state
        .authenticator
        .register(&username, &email, &password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created",
            id,
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(AppError::unauthorized("Invalid credentials"));
    };

    let tokens = state.authenticator.login(&username, &password).await?;

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user_id: tokens.user_id,
    }))
}

async fn verify_role(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyRoleParams>,
    headers: HeaderMap,
) -> Result<Json<VerifyRoleResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let requested_role = params.role.as_deref().unwrap_or(Role::Admin.as_str());

    match state.verifier.verify(token, requested_role).await? {
        Decision::Authorized => Ok(Json(VerifyRoleResponse {
            status: "authorized",
        })),
        Decision::Denied => Err(AppError::forbidden("Insufficient permissions")),
    }
}

async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user_repo::list_all(&state.db).await?;

    Ok(Json(
        users
            .into_iter()
            .map(|user| UserResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                role: user.role,
                created_at: user.created_at.to_rfc3339(),
            })
            .collect(),
    ))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Missing token"))
}

impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Expired => AppError::unauthorized("Token expired"),
            VerifyError::Invalid => AppError::unauthorized("Invalid token"),
            VerifyError::SubjectNotFound => AppError::not_found("User not found"),
            VerifyError::Db(err) => err.into(),
        }
    }
}
