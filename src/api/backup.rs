use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::AppResult;
use crate::middleware::{AppState, AuthUser};
use crate::models::{BackupSnapshot, RestoreSummary};
use crate::services::BackupService;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/backup", get(export_backup))
        .route("/restore", post(restore_backup))
}

/// Выгрузка всех коллекций одним документом
#[utoipa::path(
    get,
    path = "/api/v1/backup",
    tag = "backup",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Резервная копия", body = BackupSnapshot),
        (status = 401, description = "Не авторизован")
    )
)]
pub async fn export_backup(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<BackupSnapshot>> {
    let snapshot = BackupService::export_all(state.store()).await?;
    tracing::info!("Backup exported by {}", auth_user.username);
    Ok(Json(snapshot))
}

/// Восстановление из резервной копии.
///
/// Добавляет только отсутствующие записи, ничего не удаляет и не
/// перезаписывает. Настройки заменяются целиком, если они есть в копии.
#[utoipa::path(
    post,
    path = "/api/v1/restore",
    tag = "backup",
    security(("bearer_auth" = [])),
    request_body = BackupSnapshot,
    responses(
        (status = 200, description = "Восстановление выполнено", body = RestoreSummary),
        (status = 401, description = "Не авторизован"),
        (status = 500, description = "Ошибка восстановления")
    )
)]
pub async fn restore_backup(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(snapshot): Json<BackupSnapshot>,
) -> AppResult<Json<RestoreSummary>> {
    let summary = BackupService::restore(state.store(), snapshot).await?;
    tracing::info!("Backup restored by {}", auth_user.username);
    Ok(Json(summary))
}
