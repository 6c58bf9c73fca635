use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::MessageResponse;
use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::{Unit, UnitRequest, UnitsQuery};
use crate::services::UnitService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_units).post(create_unit))
        .route("/:id", get(get_unit).put(update_unit).delete(delete_unit))
}

/// Создание юнита внутри объекта
#[utoipa::path(
    post,
    path = "/api/v1/units",
    tag = "units",
    security(("bearer_auth" = [])),
    request_body = UnitRequest,
    responses(
        (status = 200, description = "Юнит создан", body = Unit),
        (status = 404, description = "Объект не найден"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn create_unit(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(payload): Json<UnitRequest>,
) -> AppResult<Json<Unit>> {
    let unit = UnitService::create(state.store(), payload).await?;
    Ok(Json(unit))
}

/// Список юнитов
#[utoipa::path(
    get,
    path = "/api/v1/units",
    tag = "units",
    security(("bearer_auth" = [])),
    params(UnitsQuery),
    responses(
        (status = 200, description = "Список юнитов", body = Vec<Unit>),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn list_units(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<UnitsQuery>,
) -> AppResult<Json<Vec<Unit>>> {
    let units = UnitService::list(state.store(), query.property_id).await?;
    Ok(Json(units))
}

/// Юнит по ID
#[utoipa::path(
    get,
    path = "/api/v1/units/{id}",
    tag = "units",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID юнита")
    ),
    responses(
        (status = 200, description = "Юнит", body = Unit),
        (status = 404, description = "Юнит не найден")
    )
)]
pub async fn get_unit(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Unit>> {
    let unit = UnitService::get(state.store(), id).await?;
    Ok(Json(unit))
}

/// Полное обновление юнита
#[utoipa::path(
    put,
    path = "/api/v1/units/{id}",
    tag = "units",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID юнита")
    ),
    request_body = UnitRequest,
    responses(
        (status = 200, description = "Юнит обновлён", body = Unit),
        (status = 404, description = "Юнит или объект не найден")
    )
)]
pub async fn update_unit(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UnitRequest>,
) -> AppResult<Json<Unit>> {
    let unit = UnitService::update(state.store(), id, payload).await?;
    Ok(Json(unit))
}

/// Удаление юнита
#[utoipa::path(
    delete,
    path = "/api/v1/units/{id}",
    tag = "units",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID юнита")
    ),
    responses(
        (status = 200, description = "Юнит удалён", body = MessageResponse),
        (status = 404, description = "Юнит не найден")
    )
)]
pub async fn delete_unit(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    UnitService::delete(state.store(), id).await?;
    Ok(Json(MessageResponse::ok("Unit deleted")))
}
