use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserPublic};
use crate::services::AuthService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// Регистрация пользователя
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Пользователь создан", body = AuthResponse),
        (status = 409, description = "Имя пользователя или email заняты"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let auth_service = AuthService::new(state.config.clone());
    let response = auth_service.register(state.store(), payload).await?;
    Ok(Json(response))
}

/// Вход по имени пользователя и паролю
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Успешный вход", body = AuthResponse),
        (status = 401, description = "Неверные учётные данные")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let auth_service = AuthService::new(state.config.clone());
    let response = auth_service.login(state.store(), payload).await?;
    Ok(Json(response))
}

/// Текущий пользователь
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Профиль", body = UserPublic),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserPublic>> {
    let user = AuthService::get_user_by_id(state.store(), auth_user.user_id).await?;
    Ok(Json(UserPublic::from(user)))
}
