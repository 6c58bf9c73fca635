use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::Currency;

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct DashboardStats {
    pub total_properties: i64,
    pub total_tenants: i64,
    pub monthly_revenue: Decimal,
    pub pending_payments: i64,
    pub overdue_payments: i64,
    /// Процент, округлён до двух знаков
    pub occupancy_rate: Decimal,
    pub currency: Currency,
    pub currency_symbol: String,
}
