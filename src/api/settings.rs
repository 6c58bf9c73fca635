use axum::{extract::State, routing::get, Json, Router};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::{AppSettings, Currency, CurrencyInfo, CurrencyListResponse, UpdateSettingsRequest};
use crate::services::SettingsService;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}

pub fn currency_routes() -> Router<AppState> {
    Router::new().route("/", get(list_currencies))
}

/// Настройки приложения (создаются по умолчанию при первом запросе)
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Настройки", body = AppSettings),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<AppSettings>> {
    let settings = SettingsService::get(state.store()).await?;
    Ok(Json(settings))
}

/// Обновление настроек (создаёт запись, если её ещё нет)
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Настройки обновлены", body = AppSettings),
        (status = 401, description = "Не авторизован"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(payload): Json<UpdateSettingsRequest>,
) -> AppResult<Json<AppSettings>> {
    payload.validate()?;
    let settings = SettingsService::update(state.store(), payload).await?;
    Ok(Json(settings))
}

/// Поддерживаемые валюты
#[utoipa::path(
    get,
    path = "/api/v1/currencies",
    tag = "settings",
    responses(
        (status = 200, description = "Список валют", body = CurrencyListResponse)
    )
)]
pub async fn list_currencies() -> Json<CurrencyListResponse> {
    Json(CurrencyListResponse {
        currencies: Currency::ALL.into_iter().map(CurrencyInfo::from).collect(),
    })
}
