use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, ServiceResult,
    jwt::generate_jwt,
    user::{User, UserRole, UserService},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthBody {
    pub token: String,
    pub user: User,
}

pub async fn handle_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> ServiceResult<Json<AuthBody>> {
    let user = state
        .user_service
        .login(&payload.username, &payload.password)?;
    let token = generate_jwt(&user.username);
    Ok(Json(AuthBody { token, user }))
}

pub async fn handle_register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> ServiceResult<Json<AuthBody>> {
    let user = state.user_service.register(
        &payload.username,
        &payload.password,
        &payload.email,
        payload.role,
    )?;
    let token = generate_jwt(&user.username);
    Ok(Json(AuthBody { token, user }))
}
