use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use tatkal_core::repository::UserRepository;
use tatkal_core::user::{NewUser, Role, UserView};
use tatkal_core::DomainError;

use crate::error::ApiError;
use crate::middleware::auth::Claims;
use crate::password;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_registration(&req)?;

    if state
        .users
        .email_exists(&req.email)
        .await
        .map_err(DomainError::Storage)?
    {
        return Err(DomainError::DuplicateUser("Email already in use".to_string()).into());
    }
    if state
        .users
        .username_exists(&req.username)
        .await
        .map_err(DomainError::Storage)?
    {
        return Err(DomainError::DuplicateUser("Username already in use".to_string()).into());
    }

    let user = state
        .users
        .insert(NewUser {
            username: req.username,
            full_name: req.full_name,
            email: req.email,
            password_hash: password::hash_password(&req.password),
            phone_number: req.phone_number,
            role: req.role.unwrap_or(Role::User),
        })
        .await
        .map_err(DomainError::Storage)?;

    info!(email = %user.email, "user registered");
    let token = issue_token(&state, &user.email, user.role)?;
    Ok(Json(json!({ "user": UserView::from(&user), "token": token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .users
        .find_by_email(&req.email)
        .await
        .map_err(DomainError::Storage)?
        .ok_or(DomainError::InvalidCredentials)?;

    // Unknown email and wrong password fail identically.
    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(DomainError::InvalidCredentials.into());
    }

    info!(email = %user.email, "user logged in");
    let token = issue_token(&state, &user.email, user.role)?;
    Ok(Json(json!({ "user": UserView::from(&user), "token": token })))
}

fn issue_token(state: &AppState, email: &str, role: Role) -> Result<String, ApiError> {
    let claims = Claims {
        sub: email.to_string(),
        role: role.as_str().to_string(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration_seconds as i64)).timestamp()
            as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("Token encoding failed: {e}")))
}

fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    if req.username.trim().is_empty() || req.username.len() > 30 {
        return Err(DomainError::InvalidRequest("Username is required".to_string()).into());
    }
    if req.full_name.trim().is_empty() {
        return Err(DomainError::InvalidRequest("Full name is required".to_string()).into());
    }
    if req.password.len() < 6 {
        return Err(DomainError::InvalidRequest(
            "Password must be at least 6 characters long".to_string(),
        )
        .into());
    }
    if !req.email.contains('@') {
        return Err(DomainError::InvalidRequest("Invalid email format".to_string()).into());
    }
    if req.phone_number.len() != 10 || !req.phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(
            DomainError::InvalidRequest("Phone number must be 10 digits".to_string()).into(),
        );
    }
    Ok(())
}
