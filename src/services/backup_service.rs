use std::collections::HashSet;

use chrono::{Datelike, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{
    format_receipt_number, parse_receipt_sequence, BackupSnapshot, RecordCounts, RestoreSummary,
    BACKUP_FORMAT_VERSION,
};
use crate::store::Store;

/// Экспорт и восстановление всех данных в JSON.
/// Восстановление только добавляет отсутствующие записи и никогда ничего не удаляет.
pub struct BackupService;

impl BackupService {
    pub async fn export_all(store: &dyn Store) -> AppResult<BackupSnapshot> {
        Self::collect(store)
            .await
            .map_err(|e| AppError::backup_failed("Backup", e))
    }

    async fn collect(store: &dyn Store) -> AppResult<BackupSnapshot> {
        let properties = store.list_properties().await?;
        let units = store.list_units(None).await?;
        let tenants = store.list_tenants().await?;
        let payments = store.list_payments().await?;
        let receipts = store.list_receipts(None).await?;
        let tenant_history = store.list_history(None).await?;
        let settings = store.get_settings().await?;

        let total_records = RecordCounts {
            properties: properties.len(),
            units: units.len(),
            tenants: tenants.len(),
            payments: payments.len(),
            receipts: receipts.len(),
            tenant_history: tenant_history.len(),
        };

        Ok(BackupSnapshot {
            backup_date: Utc::now(),
            app_version: BACKUP_FORMAT_VERSION.to_string(),
            properties,
            units,
            tenants,
            payments,
            receipts,
            tenant_history,
            settings,
            total_records,
        })
    }

    pub async fn restore(store: &dyn Store, snapshot: BackupSnapshot) -> AppResult<RestoreSummary> {
        let summary = Self::apply(store, snapshot)
            .await
            .map_err(|e| AppError::backup_failed("Restore", e))?;

        tracing::info!(
            "Restore completed: {} properties, {} units, {} tenants, {} payments, {} receipts, {} history entries",
            summary.restored_records.properties,
            summary.restored_records.units,
            summary.restored_records.tenants,
            summary.restored_records.payments,
            summary.restored_records.receipts,
            summary.restored_records.tenant_history
        );
        Ok(summary)
    }

    async fn apply(store: &dyn Store, snapshot: BackupSnapshot) -> AppResult<RestoreSummary> {
        let mut restored = RecordCounts::default();

        for property in &snapshot.properties {
            if store.get_property(property.id).await?.is_none() {
                store.insert_property(property).await?;
                restored.properties += 1;
            }
        }

        for unit in &snapshot.units {
            if store.get_unit(unit.id).await?.is_none() {
                store.insert_unit(unit).await?;
                restored.units += 1;
            }
        }

        for tenant in &snapshot.tenants {
            if store.get_tenant(tenant.id).await?.is_none() {
                store.insert_tenant(tenant).await?;
                restored.tenants += 1;
            }
        }

        for payment in &snapshot.payments {
            if store.get_payment(payment.id).await?.is_none() {
                store.insert_payment(payment).await?;
                restored.payments += 1;
            }
        }

        // Счётчик поднимается до восстановления, чтобы новые номера
        // не совпали с номерами из копии
        let highest_sequence = snapshot
            .receipts
            .iter()
            .filter_map(|r| parse_receipt_sequence(&r.receipt_number))
            .max();
        if let Some(sequence) = highest_sequence {
            store.advance_receipt_sequence(sequence).await?;
        }

        let mut taken_numbers: HashSet<String> = store
            .list_receipts(None)
            .await?
            .into_iter()
            .map(|r| r.receipt_number)
            .collect();
        let mut renumbered_receipts = 0;

        for receipt in &snapshot.receipts {
            if store.get_receipt(receipt.id).await?.is_some() {
                continue;
            }

            let mut receipt = receipt.clone();
            if taken_numbers.contains(&receipt.receipt_number) {
                let sequence = store.next_receipt_sequence().await?;
                let number = format_receipt_number(
                    receipt.created_at.year(),
                    receipt.created_at.month(),
                    sequence,
                );
                tracing::warn!(
                    "Receipt number {} already taken, restored receipt {} gets {}",
                    receipt.receipt_number,
                    receipt.id,
                    number
                );
                receipt.receipt_number = number;
                renumbered_receipts += 1;
            }

            store.insert_receipt(&receipt).await?;
            taken_numbers.insert(receipt.receipt_number);
            restored.receipts += 1;
        }

        for entry in &snapshot.tenant_history {
            if store.get_history(entry.id).await?.is_none() {
                store.insert_history(entry).await?;
                restored.tenant_history += 1;
            }
        }

        let settings_restored = match &snapshot.settings {
            Some(settings) => {
                store.upsert_settings(settings).await?;
                true
            }
            None => false,
        };

        Ok(RestoreSummary {
            message: "Data restored successfully".to_string(),
            restored_records: restored,
            renumbered_receipts,
            settings_restored,
            restore_date: Utc::now(),
        })
    }
}
