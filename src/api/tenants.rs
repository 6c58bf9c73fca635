use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::MessageResponse;
use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::{Tenant, TenantHistory, TenantRequest};
use crate::services::TenantService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tenants).post(create_tenant))
        .route("/:id", get(get_tenant).put(update_tenant).delete(delete_tenant))
        .route("/:id/history", get(get_tenant_history))
}

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/", get(list_history))
}

/// Заселение арендатора.
///
/// Помечает юнит (или объект, если юнит не указан) занятым и записывает
/// событие `moved_in` в журнал, если указан объект.
#[utoipa::path(
    post,
    path = "/api/v1/tenants",
    tag = "tenants",
    security(("bearer_auth" = [])),
    request_body = TenantRequest,
    responses(
        (status = 200, description = "Арендатор создан", body = Tenant),
        (status = 401, description = "Не авторизован"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn create_tenant(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(payload): Json<TenantRequest>,
) -> AppResult<Json<Tenant>> {
    let tenant = TenantService::create(state.store(), payload).await?;
    Ok(Json(tenant))
}

/// Список арендаторов
#[utoipa::path(
    get,
    path = "/api/v1/tenants",
    tag = "tenants",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Список арендаторов", body = Vec<Tenant>),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn list_tenants(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<Tenant>>> {
    let tenants = TenantService::list(state.store()).await?;
    Ok(Json(tenants))
}

/// Арендатор по ID
#[utoipa::path(
    get,
    path = "/api/v1/tenants/{id}",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID арендатора")
    ),
    responses(
        (status = 200, description = "Арендатор", body = Tenant),
        (status = 404, description = "Арендатор не найден")
    )
)]
pub async fn get_tenant(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Tenant>> {
    let tenant = TenantService::get(state.store(), id).await?;
    Ok(Json(tenant))
}

/// Обновление арендатора (счётчик оплаченных месяцев не меняется)
#[utoipa::path(
    put,
    path = "/api/v1/tenants/{id}",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID арендатора")
    ),
    request_body = TenantRequest,
    responses(
        (status = 200, description = "Арендатор обновлён", body = Tenant),
        (status = 404, description = "Арендатор не найден"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn update_tenant(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TenantRequest>,
) -> AppResult<Json<Tenant>> {
    let tenant = TenantService::update(state.store(), id, payload).await?;
    Ok(Json(tenant))
}

/// Удаление арендатора
#[utoipa::path(
    delete,
    path = "/api/v1/tenants/{id}",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID арендатора")
    ),
    responses(
        (status = 200, description = "Арендатор удалён", body = MessageResponse),
        (status = 404, description = "Арендатор не найден")
    )
)]
pub async fn delete_tenant(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    TenantService::delete(state.store(), id).await?;
    Ok(Json(MessageResponse::ok("Tenant deleted")))
}

/// Журнал заселения арендатора, новые записи первыми
#[utoipa::path(
    get,
    path = "/api/v1/tenants/{id}/history",
    tag = "tenants",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID арендатора")
    ),
    responses(
        (status = 200, description = "Журнал арендатора", body = Vec<TenantHistory>),
        (status = 404, description = "Арендатор не найден")
    )
)]
pub async fn get_tenant_history(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<TenantHistory>>> {
    let history = TenantService::history(state.store(), id).await?;
    Ok(Json(history))
}

/// Полный журнал заселения
#[utoipa::path(
    get,
    path = "/api/v1/history",
    tag = "tenants",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Журнал", body = Vec<TenantHistory>),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn list_history(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<TenantHistory>>> {
    let history = TenantService::all_history(state.store()).await?;
    Ok(Json(history))
}
