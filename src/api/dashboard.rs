use axum::{extract::State, routing::get, Json, Router};

use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::DashboardStats;
use crate::services::DashboardService;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

/// Сводка за текущий месяц
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Показатели", body = DashboardStats),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = DashboardService::compute(state.store()).await?;
    Ok(Json(stats))
}
