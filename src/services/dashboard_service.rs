use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use crate::error::AppResult;
use crate::models::{DashboardStats, PaymentStatus, PropertyStatus};
use crate::services::SettingsService;
use crate::store::Store;

pub struct DashboardService;

impl DashboardService {
    /// Сводка за текущий календарный месяц. Считается заново при каждом вызове.
    pub async fn compute(store: &dyn Store) -> AppResult<DashboardStats> {
        let settings = SettingsService::get(store).await?;

        let total_properties = store.count_properties(None).await?;
        let total_tenants = store.count_tenants().await?;
        let occupied_properties = store.count_properties(Some(PropertyStatus::Occupied)).await?;

        let now = Utc::now();
        let payments = store
            .list_payments_for_period(now.month() as i32, now.year(), None)
            .await?;

        let monthly_revenue: Decimal = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum();
        let pending_payments = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Pending)
            .count() as i64;
        let overdue_payments = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Overdue)
            .count() as i64;

        Ok(DashboardStats {
            total_properties,
            total_tenants,
            monthly_revenue,
            pending_payments,
            overdue_payments,
            occupancy_rate: occupancy_rate(occupied_properties, total_properties),
            currency: settings.currency,
            currency_symbol: settings.currency.symbol().to_string(),
        })
    }
}

/// Доля занятых объектов в процентах с двумя знаками; 0 при отсутствии объектов
pub fn occupancy_rate(occupied: i64, total: i64) -> Decimal {
    if total <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(occupied) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use crate::services::test_support::{payment_request, property_request, tenant_request};
    use crate::services::{PaymentService, PropertyService, TenantService};
    use crate::store::MemoryStore;

    #[test]
    fn test_occupancy_rate() {
        assert_eq!(occupancy_rate(0, 0), Decimal::ZERO);
        assert_eq!(occupancy_rate(1, 2), Decimal::from(50));
        assert_eq!(occupancy_rate(1, 3), Decimal::new(3333, 2));
        assert_eq!(occupancy_rate(2, 3), Decimal::new(6667, 2));
        assert_eq!(occupancy_rate(4, 4), Decimal::from(100));
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::new();
        let stats = DashboardService::compute(&store).await.unwrap();

        assert_eq!(stats.total_properties, 0);
        assert_eq!(stats.total_tenants, 0);
        assert_eq!(stats.monthly_revenue, Decimal::ZERO);
        assert_eq!(stats.occupancy_rate, Decimal::ZERO);
        assert_eq!(stats.currency, Currency::Xof);
        assert_eq!(stats.currency_symbol, "CFA");
        // Настройки по умолчанию создаются при первом обращении
        assert!(store.get_settings().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_current_month_rollup() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let (month, year) = (now.month() as i32, now.year());

        let occupied = PropertyService::create(&store, property_request(1200)).await.unwrap();
        PropertyService::create(&store, property_request(800)).await.unwrap();
        PropertyService::create(&store, property_request(600)).await.unwrap();
        let tenant = TenantService::create(&store, tenant_request(Some(occupied.id), None))
            .await
            .unwrap();

        let paid = PaymentService::create(&store, payment_request(tenant.id, occupied.id, month, year, 1200))
            .await
            .unwrap();
        PaymentService::mark_paid(&store, paid.id).await.unwrap();
        PaymentService::create(&store, payment_request(tenant.id, occupied.id, month, year, 300))
            .await
            .unwrap();
        let mut overdue = payment_request(tenant.id, occupied.id, month, year, 200);
        overdue.status = PaymentStatus::Overdue;
        PaymentService::create(&store, overdue).await.unwrap();

        // Другой период в сводку не попадает
        let other = PaymentService::create(&store, payment_request(tenant.id, occupied.id, month, year - 1, 5000))
            .await
            .unwrap();
        PaymentService::mark_paid(&store, other.id).await.unwrap();

        let stats = DashboardService::compute(&store).await.unwrap();
        assert_eq!(stats.total_properties, 3);
        assert_eq!(stats.total_tenants, 1);
        assert_eq!(stats.monthly_revenue, Decimal::from(1200));
        assert_eq!(stats.pending_payments, 1);
        assert_eq!(stats.overdue_payments, 1);
        assert_eq!(stats.occupancy_rate, Decimal::new(3333, 2));
    }
}
