use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::MessageResponse;
use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::{Property, PropertyRequest, Unit};
use crate::services::{PropertyService, UnitService};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/:id/units", get(list_property_units))
}

/// Создание объекта
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    tag = "properties",
    security(("bearer_auth" = [])),
    request_body = PropertyRequest,
    responses(
        (status = 200, description = "Объект создан", body = Property),
        (status = 401, description = "Не авторизован"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn create_property(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(payload): Json<PropertyRequest>,
) -> AppResult<Json<Property>> {
    let property = PropertyService::create(state.store(), payload).await?;
    Ok(Json(property))
}

/// Список объектов
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    tag = "properties",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Список объектов", body = Vec<Property>),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<Property>>> {
    let properties = PropertyService::list(state.store()).await?;
    Ok(Json(properties))
}

/// Объект по ID
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID объекта")
    ),
    responses(
        (status = 200, description = "Объект", body = Property),
        (status = 404, description = "Объект не найден")
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Property>> {
    let property = PropertyService::get(state.store(), id).await?;
    Ok(Json(property))
}

/// Полное обновление объекта
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID объекта")
    ),
    request_body = PropertyRequest,
    responses(
        (status = 200, description = "Объект обновлён", body = Property),
        (status = 404, description = "Объект не найден"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn update_property(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PropertyRequest>,
) -> AppResult<Json<Property>> {
    let property = PropertyService::update(state.store(), id, payload).await?;
    Ok(Json(property))
}

/// Удаление объекта
#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID объекта")
    ),
    responses(
        (status = 200, description = "Объект удалён", body = MessageResponse),
        (status = 404, description = "Объект не найден")
    )
)]
pub async fn delete_property(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    PropertyService::delete(state.store(), id).await?;
    Ok(Json(MessageResponse::ok("Property deleted")))
}

/// Юниты объекта
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}/units",
    tag = "properties",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID объекта")
    ),
    responses(
        (status = 200, description = "Юниты объекта", body = Vec<Unit>),
        (status = 404, description = "Объект не найден")
    )
)]
pub async fn list_property_units(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Unit>>> {
    PropertyService::get(state.store(), id).await?;
    let units = UnitService::list(state.store(), Some(id)).await?;
    Ok(Json(units))
}
