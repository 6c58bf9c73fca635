use chrono::{Datelike, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{format_receipt_number, CreateReceiptRequest, Receipt};
use crate::services::SettingsService;
use crate::store::Store;

pub struct ReceiptService;

impl ReceiptService {
    /// Выдача квитанции по платежу.
    ///
    /// Платёж, арендатор и объект обязательны: если хоть один не найден,
    /// квитанция не создаётся и номер не резервируется. Юнит необязателен.
    /// Все данные копируются в квитанцию и дальше от источников не зависят.
    pub async fn create(store: &dyn Store, request: CreateReceiptRequest) -> AppResult<Receipt> {
        request.validate()?;

        let payment = store
            .get_payment(request.payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

        let tenant = store
            .get_tenant(request.tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))?;

        let property = store
            .get_property(payment.property_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

        let unit = match payment.unit_id {
            Some(unit_id) => store.get_unit(unit_id).await?,
            None => None,
        };

        let currency = SettingsService::current_currency(store).await?;

        let now = Utc::now();
        let sequence = store.next_receipt_sequence().await?;
        let receipt_number = format_receipt_number(now.year(), now.month(), sequence);

        let receipt = Receipt {
            id: Uuid::new_v4(),
            receipt_number,
            tenant_id: tenant.id,
            tenant_name: tenant.name,
            tenant_phone: tenant.phone,
            property_id: property.id,
            property_name: property.address,
            unit_id: payment.unit_id,
            unit_number: unit.map(|u| u.unit_number),
            payment_id: payment.id,
            amount: payment.amount,
            currency,
            currency_symbol: currency.symbol().to_string(),
            payment_date: payment.paid_date.unwrap_or_else(|| now.date_naive()),
            due_date: payment.due_date,
            period_month: payment.month,
            period_year: payment.year,
            payment_method: request.payment_method.unwrap_or(payment.payment_method),
            months_paid_total: tenant.months_paid,
            notes: request.notes,
            created_at: now,
        };
        store.insert_receipt(&receipt).await?;

        tracing::info!(
            "Receipt {} issued for payment {}",
            receipt.receipt_number,
            receipt.payment_id
        );
        Ok(receipt)
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> AppResult<Receipt> {
        store
            .get_receipt(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Receipt not found".to_string()))
    }

    /// Новые квитанции первыми
    pub async fn list(store: &dyn Store) -> AppResult<Vec<Receipt>> {
        store.list_receipts(None).await
    }

    pub async fn list_by_tenant(store: &dyn Store, tenant_id: Uuid) -> AppResult<Vec<Receipt>> {
        store.list_receipts(Some(tenant_id)).await
    }

    pub async fn delete(store: &dyn Store, id: Uuid) -> AppResult<()> {
        if !store.delete_receipt(id).await? {
            return Err(AppError::NotFound("Receipt not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, PaymentMethod, UpdateSettingsRequest};
    use crate::services::test_support::{
        payment_request, property_request, tenant_request, unit_request,
    };
    use crate::services::{PaymentService, PropertyService, TenantService, UnitService};
    use crate::store::MemoryStore;
    use regex::Regex;
    use rust_decimal::Decimal;

    fn receipt_request(tenant_id: Uuid, payment_id: Uuid) -> CreateReceiptRequest {
        CreateReceiptRequest {
            tenant_id,
            payment_id,
            payment_method: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_scenario_settle_and_issue_receipt() {
        let store = MemoryStore::new();
        let property = PropertyService::create(&store, property_request(1200)).await.unwrap();
        let tenant = TenantService::create(&store, tenant_request(Some(property.id), None))
            .await
            .unwrap();
        assert_eq!(
            PropertyService::get(&store, property.id).await.unwrap().status,
            crate::models::PropertyStatus::Occupied
        );

        let payment =
            PaymentService::create(&store, payment_request(tenant.id, property.id, 6, 2024, 1200))
                .await
                .unwrap();
        let paid = PaymentService::mark_paid(&store, payment.id).await.unwrap();

        let receipt = ReceiptService::create(&store, receipt_request(tenant.id, payment.id))
            .await
            .unwrap();

        let pattern = Regex::new(r"^REC-\d{6}-\d{4}$").unwrap();
        assert!(pattern.is_match(&receipt.receipt_number), "{}", receipt.receipt_number);
        let now = Utc::now();
        assert!(receipt
            .receipt_number
            .starts_with(&format!("REC-{}{:02}-", now.year(), now.month())));
        assert!(receipt.receipt_number.ends_with("-0001"));

        assert_eq!(receipt.amount, Decimal::from(1200));
        assert_eq!(receipt.months_paid_total, 1);
        assert_eq!(receipt.tenant_name, tenant.name);
        assert_eq!(receipt.tenant_phone, tenant.phone);
        assert_eq!(receipt.property_name, property.address);
        assert_eq!(receipt.payment_date, paid.paid_date.unwrap());
        assert_eq!(receipt.period_month, 6);
        assert_eq!(receipt.period_year, 2024);
        assert_eq!(receipt.currency, Currency::Xof);
        assert_eq!(receipt.currency_symbol, "CFA");
        assert_eq!(receipt.payment_method, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn test_receipt_is_a_snapshot() {
        let store = MemoryStore::new();
        let property = PropertyService::create(&store, property_request(1200)).await.unwrap();
        let tenant = TenantService::create(&store, tenant_request(Some(property.id), None))
            .await
            .unwrap();
        let payment =
            PaymentService::create(&store, payment_request(tenant.id, property.id, 6, 2024, 1200))
                .await
                .unwrap();

        let receipt = ReceiptService::create(&store, receipt_request(tenant.id, payment.id))
            .await
            .unwrap();

        PaymentService::update(
            &store,
            payment.id,
            payment_request(tenant.id, property.id, 6, 2024, 9999),
        )
        .await
        .unwrap();
        let mut renamed = tenant_request(Some(property.id), None);
        renamed.name = "Someone Else".to_string();
        TenantService::update(&store, tenant.id, renamed).await.unwrap();

        let stored = ReceiptService::get(&store, receipt.id).await.unwrap();
        assert_eq!(stored, receipt);
        assert_eq!(stored.amount, Decimal::from(1200));
        assert_eq!(stored.tenant_name, "Awa Diop");
    }

    #[tokio::test]
    async fn test_unpaid_payment_uses_issue_date() {
        let store = MemoryStore::new();
        let property = PropertyService::create(&store, property_request(700)).await.unwrap();
        let tenant = TenantService::create(&store, tenant_request(Some(property.id), None))
            .await
            .unwrap();
        let payment =
            PaymentService::create(&store, payment_request(tenant.id, property.id, 2, 2024, 700))
                .await
                .unwrap();

        let receipt = ReceiptService::create(
            &store,
            CreateReceiptRequest {
                tenant_id: tenant.id,
                payment_id: payment.id,
                payment_method: Some(PaymentMethod::MobileMoney),
                notes: Some("Remis en main propre".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(receipt.payment_date, Utc::now().date_naive());
        assert_eq!(receipt.months_paid_total, 0);
        assert_eq!(receipt.payment_method, PaymentMethod::MobileMoney);
        assert_eq!(receipt.notes.as_deref(), Some("Remis en main propre"));
    }

    #[tokio::test]
    async fn test_unit_and_currency_snapshot() {
        let store = MemoryStore::new();
        SettingsService::update(
            &store,
            UpdateSettingsRequest {
                currency: Currency::Eur,
                app_name: None,
            },
        )
        .await
        .unwrap();
        let property = PropertyService::create(&store, property_request(2000)).await.unwrap();
        let unit = UnitService::create(&store, unit_request(property.id, "3B")).await.unwrap();
        let tenant = TenantService::create(&store, tenant_request(Some(property.id), Some(unit.id)))
            .await
            .unwrap();
        let mut request = payment_request(tenant.id, property.id, 4, 2025, 500);
        request.unit_id = Some(unit.id);
        let payment = PaymentService::create(&store, request).await.unwrap();

        let receipt = ReceiptService::create(&store, receipt_request(tenant.id, payment.id))
            .await
            .unwrap();

        assert_eq!(receipt.unit_id, Some(unit.id));
        assert_eq!(receipt.unit_number.as_deref(), Some("3B"));
        assert_eq!(receipt.currency, Currency::Eur);
        assert_eq!(receipt.currency_symbol, "€");

        // Смена валюты не влияет на выданные квитанции
        SettingsService::update(
            &store,
            UpdateSettingsRequest {
                currency: Currency::Usd,
                app_name: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(ReceiptService::get(&store, receipt.id).await.unwrap().currency, Currency::Eur);
    }

    #[tokio::test]
    async fn test_missing_entities_abort_without_receipt() {
        let store = MemoryStore::new();
        let property = PropertyService::create(&store, property_request(1200)).await.unwrap();
        let tenant = TenantService::create(&store, tenant_request(Some(property.id), None))
            .await
            .unwrap();

        let err = ReceiptService::create(&store, receipt_request(tenant.id, Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Payment not found"));

        let payment =
            PaymentService::create(&store, payment_request(tenant.id, property.id, 6, 2024, 1200))
                .await
                .unwrap();
        let err = ReceiptService::create(&store, receipt_request(Uuid::new_v4(), payment.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Tenant not found"));

        let orphan =
            PaymentService::create(&store, payment_request(tenant.id, Uuid::new_v4(), 6, 2024, 1200))
                .await
                .unwrap();
        let err = ReceiptService::create(&store, receipt_request(tenant.id, orphan.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Property not found"));

        assert!(ReceiptService::list(&store).await.unwrap().is_empty());

        // Неудачные попытки не расходуют номера
        let receipt = ReceiptService::create(&store, receipt_request(tenant.id, payment.id))
            .await
            .unwrap();
        assert!(receipt.receipt_number.ends_with("-0001"));
    }

    #[tokio::test]
    async fn test_numbers_increase_and_survive_deletion() {
        let store = MemoryStore::new();
        let property = PropertyService::create(&store, property_request(1200)).await.unwrap();
        let tenant = TenantService::create(&store, tenant_request(Some(property.id), None))
            .await
            .unwrap();
        let payment =
            PaymentService::create(&store, payment_request(tenant.id, property.id, 6, 2024, 1200))
                .await
                .unwrap();

        let first = ReceiptService::create(&store, receipt_request(tenant.id, payment.id))
            .await
            .unwrap();
        let second = ReceiptService::create(&store, receipt_request(tenant.id, payment.id))
            .await
            .unwrap();
        assert!(second.receipt_number.ends_with("-0002"));

        ReceiptService::delete(&store, first.id).await.unwrap();
        let third = ReceiptService::create(&store, receipt_request(tenant.id, payment.id))
            .await
            .unwrap();
        assert!(third.receipt_number.ends_with("-0003"));

        let listed = ReceiptService::list_by_tenant(&store, tenant.id).await.unwrap();
        let numbers: Vec<&str> = listed.iter().map(|r| r.receipt_number.as_str()).collect();
        assert_eq!(numbers, vec![third.receipt_number.as_str(), second.receipt_number.as_str()]);

        assert!(ReceiptService::list_by_tenant(&store, Uuid::new_v4())
            .await
            .unwrap()
            .is_empty());
        assert!(matches!(
            ReceiptService::delete(&store, first.id).await,
            Err(AppError::NotFound(msg)) if msg == "Receipt not found"
        ));
    }
}
