use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Payment, PaymentRequest, PaymentStatus};
use crate::store::Store;

/// Журнал платежей: одна запись на арендатора и расчётный месяц.
/// Повторы (tenant_id, month, year) не отсекаются, это забота вызывающей стороны.
pub struct PaymentService;

impl PaymentService {
    pub async fn create(store: &dyn Store, request: PaymentRequest) -> AppResult<Payment> {
        request.validate()?;

        let payment = Payment::from_request(request);
        store.insert_payment(&payment).await?;

        Ok(payment)
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> AppResult<Payment> {
        store
            .get_payment(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))
    }

    pub async fn list(store: &dyn Store) -> AppResult<Vec<Payment>> {
        store.list_payments().await
    }

    /// Пустой список, если у арендатора нет платежей
    pub async fn list_by_tenant(store: &dyn Store, tenant_id: Uuid) -> AppResult<Vec<Payment>> {
        store.list_payments_by_tenant(tenant_id).await
    }

    /// Полная замена изменяемых полей. `months_paid` не затрагивается,
    /// даже если статус меняется на `paid`.
    pub async fn update(store: &dyn Store, id: Uuid, request: PaymentRequest) -> AppResult<Payment> {
        request.validate()?;

        let mut payment = Self::get(store, id).await?;
        payment.apply(request);

        if !store.update_payment(&payment).await? {
            return Err(AppError::NotFound("Payment not found".to_string()));
        }
        Ok(payment)
    }

    /// Отметка об оплате.
    ///
    /// Два отдельных атомарных шага: запись платежа (`paid` + сегодняшняя дата),
    /// затем `months_paid += 1` у арендатора. Если второй шаг завершился ошибкой
    /// хранилища, платёж возвращается в прежнее состояние.
    /// Если арендатора уже нет, платёж остаётся оплаченным, счётчик не меняется.
    ///
    /// Повторный вызов для уже оплаченного платежа снова увеличивает счётчик.
    pub async fn mark_paid(store: &dyn Store, id: Uuid) -> AppResult<Payment> {
        let previous = Self::get(store, id).await?;

        let mut payment = previous.clone();
        payment.status = PaymentStatus::Paid;
        payment.paid_date = Some(Utc::now().date_naive());

        if !store.update_payment(&payment).await? {
            return Err(AppError::NotFound("Payment not found".to_string()));
        }

        match store.increment_months_paid(payment.tenant_id).await {
            Ok(true) => {
                tracing::info!(
                    "Payment {} settled for tenant {} ({}/{})",
                    payment.id,
                    payment.tenant_id,
                    payment.month,
                    payment.year
                );
            }
            Ok(false) => {
                tracing::warn!(
                    "Payment {} settled but tenant {} no longer exists",
                    payment.id,
                    payment.tenant_id
                );
            }
            Err(e) => {
                tracing::error!("Failed to count settlement of payment {}: {}", payment.id, e);
                if let Err(rollback) = store.update_payment(&previous).await {
                    tracing::error!("Failed to roll back payment {}: {}", payment.id, rollback);
                }
                return Err(e);
            }
        }

        Ok(payment)
    }

    /// Удаление не уменьшает `months_paid` арендатора
    pub async fn delete(store: &dyn Store, id: Uuid) -> AppResult<()> {
        if !store.delete_payment(id).await? {
            return Err(AppError::NotFound("Payment not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{payment_request, property_request, tenant_request};
    use crate::services::{PropertyService, TenantService};
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;

    async fn setup(store: &MemoryStore) -> (Uuid, Uuid) {
        let property = PropertyService::create(store, property_request(1200)).await.unwrap();
        let tenant = TenantService::create(store, tenant_request(Some(property.id), None))
            .await
            .unwrap();
        (tenant.id, property.id)
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let store = MemoryStore::new();
        let (tenant_id, property_id) = setup(&store).await;

        let payment = PaymentService::create(&store, payment_request(tenant_id, property_id, 6, 2024, 1200))
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.paid_date, None);
        assert_eq!(payment.amount, Decimal::from(1200));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_month() {
        let store = MemoryStore::new();
        let mut request = payment_request(Uuid::new_v4(), Uuid::new_v4(), 6, 2024, 100);
        request.month = 13;

        let err = PaymentService::create(&store, request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_period_is_accepted() {
        let store = MemoryStore::new();
        let (tenant_id, property_id) = setup(&store).await;

        PaymentService::create(&store, payment_request(tenant_id, property_id, 3, 2024, 100))
            .await
            .unwrap();
        PaymentService::create(&store, payment_request(tenant_id, property_id, 3, 2024, 100))
            .await
            .unwrap();

        assert_eq!(PaymentService::list_by_tenant(&store, tenant_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mark_paid_sets_date_and_counts_month() {
        let store = MemoryStore::new();
        let (tenant_id, property_id) = setup(&store).await;
        let payment = PaymentService::create(&store, payment_request(tenant_id, property_id, 6, 2024, 1200))
            .await
            .unwrap();

        let paid = PaymentService::mark_paid(&store, payment.id).await.unwrap();

        assert_eq!(paid.status, PaymentStatus::Paid);
        assert_eq!(paid.paid_date, Some(Utc::now().date_naive()));
        assert_eq!(PaymentService::get(&store, payment.id).await.unwrap(), paid);
        assert_eq!(TenantService::get(&store, tenant_id).await.unwrap().months_paid, 1);
    }

    #[tokio::test]
    async fn test_mark_paid_twice_counts_twice() {
        // Повторная отметка идемпотентна по статусу, но счётчик растёт снова
        let store = MemoryStore::new();
        let (tenant_id, property_id) = setup(&store).await;
        let payment = PaymentService::create(&store, payment_request(tenant_id, property_id, 6, 2024, 1200))
            .await
            .unwrap();

        PaymentService::mark_paid(&store, payment.id).await.unwrap();
        let again = PaymentService::mark_paid(&store, payment.id).await.unwrap();

        assert_eq!(again.status, PaymentStatus::Paid);
        assert_eq!(TenantService::get(&store, tenant_id).await.unwrap().months_paid, 2);
    }

    #[tokio::test]
    async fn test_mark_paid_missing_payment() {
        let store = MemoryStore::new();
        let err = PaymentService::mark_paid(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Payment not found"));
    }

    #[tokio::test]
    async fn test_mark_paid_with_deleted_tenant_keeps_payment_paid() {
        let store = MemoryStore::new();
        let (tenant_id, property_id) = setup(&store).await;
        let payment = PaymentService::create(&store, payment_request(tenant_id, property_id, 1, 2025, 800))
            .await
            .unwrap();
        TenantService::delete(&store, tenant_id).await.unwrap();

        let paid = PaymentService::mark_paid(&store, payment.id).await.unwrap();
        assert_eq!(paid.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_delete_does_not_reverse_months_paid() {
        let store = MemoryStore::new();
        let (tenant_id, property_id) = setup(&store).await;
        let payment = PaymentService::create(&store, payment_request(tenant_id, property_id, 6, 2024, 1200))
            .await
            .unwrap();
        PaymentService::mark_paid(&store, payment.id).await.unwrap();

        PaymentService::delete(&store, payment.id).await.unwrap();

        assert!(PaymentService::list_by_tenant(&store, tenant_id).await.unwrap().is_empty());
        assert_eq!(TenantService::get(&store, tenant_id).await.unwrap().months_paid, 1);
        assert!(matches!(
            PaymentService::delete(&store, payment.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_without_counting() {
        let store = MemoryStore::new();
        let (tenant_id, property_id) = setup(&store).await;
        let payment = PaymentService::create(&store, payment_request(tenant_id, property_id, 6, 2024, 1200))
            .await
            .unwrap();

        let mut request = payment_request(tenant_id, property_id, 7, 2024, 1300);
        request.status = PaymentStatus::Overdue;
        let updated = PaymentService::update(&store, payment.id, request).await.unwrap();

        assert_eq!(updated.id, payment.id);
        assert_eq!(updated.month, 7);
        assert_eq!(updated.amount, Decimal::from(1300));
        assert_eq!(updated.status, PaymentStatus::Overdue);
        assert_eq!(TenantService::get(&store, tenant_id).await.unwrap().months_paid, 0);
    }

    #[tokio::test]
    async fn test_list_by_tenant_without_payments_is_empty() {
        let store = MemoryStore::new();
        let payments = PaymentService::list_by_tenant(&store, Uuid::new_v4()).await.unwrap();
        assert!(payments.is_empty());
    }

    #[tokio::test]
    async fn test_mark_paid_rolls_back_when_counter_update_fails() {
        let store = MemoryStore::new();
        let (tenant_id, property_id) = setup(&store).await;
        let payment = PaymentService::create(&store, payment_request(tenant_id, property_id, 6, 2024, 1200))
            .await
            .unwrap();

        store.fail_months_paid_increments();
        let result = PaymentService::mark_paid(&store, payment.id).await;
        assert!(matches!(result, Err(AppError::Internal(_))));

        let stored = PaymentService::get(&store, payment.id).await.unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
        assert_eq!(stored.paid_date, None);
        assert_eq!(stored, payment);
        assert_eq!(TenantService::get(&store, tenant_id).await.unwrap().months_paid, 0);
    }
}
