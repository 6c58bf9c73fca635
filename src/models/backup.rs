use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AppSettings, Payment, Property, Receipt, Tenant, TenantHistory, Unit};

pub const BACKUP_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct RecordCounts {
    pub properties: usize,
    #[serde(default)]
    pub units: usize,
    pub tenants: usize,
    pub payments: usize,
    pub receipts: usize,
    #[serde(default)]
    pub tenant_history: usize,
}

/// Полный структурный снимок данных приложения
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BackupSnapshot {
    pub backup_date: DateTime<Utc>,
    pub app_version: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
    #[serde(default)]
    pub tenant_history: Vec<TenantHistory>,
    pub settings: Option<AppSettings>,
    #[serde(default)]
    pub total_records: RecordCounts,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestoreSummary {
    pub message: String,
    /// Сколько записей реально добавлено (существующие id пропускаются)
    pub restored_records: RecordCounts,
    /// Восстановленные квитанции, чей номер уже был занят и выдан заново
    pub renumbered_receipts: usize,
    pub settings_restored: bool,
    pub restore_date: DateTime<Utc>,
}
