pub mod auth;
pub mod backup;
pub mod dashboard;
pub mod payments;
pub mod properties;
pub mod receipts;
pub mod settings;
pub mod tenants;
pub mod units;

use crate::middleware::AppState;
use axum::Router;

/// Ответ на удаление и другие операции без тела
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes())
        .nest("/currencies", settings::currency_routes())
        .nest("/settings", settings::routes())
        .nest("/properties", properties::routes())
        .nest("/units", units::routes())
        .nest("/tenants", tenants::routes())
        .nest("/history", tenants::history_routes())
        .nest("/payments", payments::routes())
        .nest("/receipts", receipts::routes())
        .nest("/dashboard", dashboard::routes())
        .merge(backup::routes())
}
