use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use super::MessageResponse;
use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::{Payment, PaymentRequest};
use crate::services::PaymentService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/tenant/:tenant_id", get(list_tenant_payments))
        .route("/:id", get(get_payment).put(update_payment).delete(delete_payment))
        .route("/:id/mark-paid", put(mark_paid))
}

/// Создание платежа
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Платёж создан", body = Payment),
        (status = 401, description = "Не авторизован"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn create_payment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentService::create(state.store(), payload).await?;
    Ok(Json(payment))
}

/// Все платежи
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Список платежей", body = Vec<Payment>),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = PaymentService::list(state.store()).await?;
    Ok(Json(payments))
}

/// Платежи арендатора
#[utoipa::path(
    get,
    path = "/api/v1/payments/tenant/{tenant_id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("tenant_id" = Uuid, Path, description = "ID арендатора")
    ),
    responses(
        (status = 200, description = "Платежи арендатора", body = Vec<Payment>)
    )
)]
pub async fn list_tenant_payments(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(tenant_id): Path<Uuid>,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = PaymentService::list_by_tenant(state.store(), tenant_id).await?;
    Ok(Json(payments))
}

/// Платёж по ID
#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID платежа")
    ),
    responses(
        (status = 200, description = "Платёж", body = Payment),
        (status = 404, description = "Платёж не найден")
    )
)]
pub async fn get_payment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentService::get(state.store(), id).await?;
    Ok(Json(payment))
}

/// Полное обновление платежа
#[utoipa::path(
    put,
    path = "/api/v1/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID платежа")
    ),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Платёж обновлён", body = Payment),
        (status = 404, description = "Платёж не найден"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn update_payment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentService::update(state.store(), id, payload).await?;
    Ok(Json(payment))
}

/// Отметить платёж оплаченным.
///
/// Ставит статус `paid` с сегодняшней датой и увеличивает счётчик
/// оплаченных месяцев арендатора. Повторный вызов увеличит счётчик снова.
#[utoipa::path(
    put,
    path = "/api/v1/payments/{id}/mark-paid",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID платежа")
    ),
    responses(
        (status = 200, description = "Платёж оплачен", body = Payment),
        (status = 404, description = "Платёж не найден")
    )
)]
pub async fn mark_paid(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentService::mark_paid(state.store(), id).await?;
    Ok(Json(payment))
}

/// Удаление платежа
#[utoipa::path(
    delete,
    path = "/api/v1/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "ID платежа")
    ),
    responses(
        (status = 200, description = "Платёж удалён", body = MessageResponse),
        (status = 404, description = "Платёж не найден")
    )
)]
pub async fn delete_payment(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    PaymentService::delete(state.store(), id).await?;
    Ok(Json(MessageResponse::ok("Payment deleted")))
}
