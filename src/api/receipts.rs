use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use super::MessageResponse;
use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::{CreateReceiptRequest, Receipt};
use crate::services::ReceiptService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_receipts).post(create_receipt))
        .route("/tenant/:tenant_id", get(list_tenant_receipts))
        .route("/:id", get(get_receipt).delete(delete_receipt))
}

/// Выпуск квитанции по платежу.
///
/// Квитанция хранит снимок данных арендатора, объекта и платежа на момент
/// выпуска и получает номер вида `REC-YYYYMM-NNNN`.
#[utoipa::path(
    post,
    path = "/api/v1/receipts",
    tag = "receipts",
    security(("bearer_auth" = [])),
    request_body = CreateReceiptRequest,
    responses(
        (status = 200, description = "Квитанция выпущена", body = Receipt),
        (status = 404, description = "Арендатор, платёж или объект не найден"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn create_receipt(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(payload): Json<CreateReceiptRequest>,
) -> AppResult<Json<Receipt>> {
    let receipt = ReceiptService::create(state.store(), payload).await?;
    Ok(Json(receipt))
}

/// Все квитанции, новые первыми
#[utoipa::path(
    get,
    path = "/api/v1/receipts",
    tag = "receipts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Список квитанций", body = Vec<Receipt>),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn list_receipts(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<Receipt>>> {
    let receipts = ReceiptService::list(state.store()).await?;
    Ok(Json(receipts))
}

/// Квитанции арендатора
#[utoipa::path(
    get,
    path = "/api/v1/receipts/tenant/{tenant_id}",
    tag = "receipts",
    security(("bearer_auth" = [])),
    params(
        ("tenant_id" = Uuid, Path, description = "ID арендатора")
    ),
    responses(
        (status = 200, description = "Квитанции арендатора", body = Vec<Receipt>)
    )
)]
pub async fn list_tenant_receipts(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(tenant_id): Path<Uuid>,
) -> AppResult<Json<Vec<Receipt>>> {
    let receipts = ReceiptService::list_by_tenant(state.store(), tenant_id).await?;
    Ok(Json(receipts))
}

/// Квитанция по ID
#[utoipa::path(
    get,
    path = "/api/v1/receipts/{id}",
    tag = "receipts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID квитанции")
    ),
    responses(
        (status = 200, description = "Квитанция", body = Receipt),
        (status = 404, description = "Квитанция не найдена")
    )
)]
pub async fn get_receipt(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Receipt>> {
    let receipt = ReceiptService::get(state.store(), id).await?;
    Ok(Json(receipt))
}

/// Удаление квитанции (номер не переиспользуется)
#[utoipa::path(
    delete,
    path = "/api/v1/receipts/{id}",
    tag = "receipts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID квитанции")
    ),
    responses(
        (status = 200, description = "Квитанция удалена", body = MessageResponse),
        (status = 404, description = "Квитанция не найдена")
    )
)]
pub async fn delete_receipt(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    ReceiptService::delete(state.store(), id).await?;
    Ok(Json(MessageResponse::ok("Receipt deleted")))
}
