use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Подставляется, если объект или юнит не найден при записи истории
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "history_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    MovedIn,
    // Пока никем не записываются
    MovedOut,
    RentUpdated,
}

/// Запись журнала заселения. Только добавляется, никогда не меняется.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, ToSchema)]
pub struct TenantHistory {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub property_id: Uuid,
    pub property_name: String,
    pub unit_id: Option<Uuid>,
    pub unit_number: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Decimal,
    pub total_paid: Decimal,
    pub months_paid: i32,
    pub action: HistoryAction,
    pub created_at: DateTime<Utc>,
}
