use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::AppResult;
use crate::models::{
    AppSettings, Payment, PaymentStatus, Property, PropertyStatus, Receipt, Tenant, TenantHistory,
    Unit, User,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    properties: Vec<Property>,
    units: Vec<Unit>,
    tenants: Vec<Tenant>,
    history: Vec<TenantHistory>,
    payments: Vec<Payment>,
    receipts: Vec<Receipt>,
    receipt_sequence: Option<i64>,
    settings: Option<AppSettings>,
}

/// Хранилище в памяти процесса. Коллекции хранятся в порядке вставки.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
    #[cfg(test)]
    fail_increments: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Все последующие `increment_months_paid` завершаются ошибкой хранилища
    #[cfg(test)]
    pub(crate) fn fail_months_paid_increments(&self) {
        self.fail_increments
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

fn replace<T: Clone>(items: &mut [T], record: &T, id_of: impl Fn(&T) -> Uuid) -> bool {
    let id = id_of(record);
    match items.iter_mut().find(|item| id_of(item) == id) {
        Some(slot) => {
            *slot = record.clone();
            true
        }
        None => false,
    }
}

fn remove<T>(items: &mut Vec<T>, id: Uuid, id_of: impl Fn(&T) -> Uuid) -> bool {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    items.len() != before
}

#[axum::async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> AppResult<()> {
        self.data.write().await.users.push(user.clone());
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let data = self.data.read().await;
        Ok(data
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_property(&self, property: &Property) -> AppResult<()> {
        self.data.write().await.properties.push(property.clone());
        Ok(())
    }

    async fn get_property(&self, id: Uuid) -> AppResult<Option<Property>> {
        let data = self.data.read().await;
        Ok(data.properties.iter().find(|p| p.id == id).cloned())
    }

    async fn list_properties(&self) -> AppResult<Vec<Property>> {
        Ok(self.data.read().await.properties.clone())
    }

    async fn update_property(&self, property: &Property) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(replace(&mut data.properties, property, |p| p.id))
    }

    async fn set_property_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool> {
        let mut data = self.data.write().await;
        match data.properties.iter_mut().find(|p| p.id == id) {
            Some(property) => {
                property.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_property(&self, id: Uuid) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(remove(&mut data.properties, id, |p| p.id))
    }

    async fn count_properties(&self, status: Option<PropertyStatus>) -> AppResult<i64> {
        let data = self.data.read().await;
        let count = data
            .properties
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .count();
        Ok(count as i64)
    }

    async fn insert_unit(&self, unit: &Unit) -> AppResult<()> {
        self.data.write().await.units.push(unit.clone());
        Ok(())
    }

    async fn get_unit(&self, id: Uuid) -> AppResult<Option<Unit>> {
        let data = self.data.read().await;
        Ok(data.units.iter().find(|u| u.id == id).cloned())
    }

    async fn list_units(&self, property_id: Option<Uuid>) -> AppResult<Vec<Unit>> {
        let data = self.data.read().await;
        Ok(data
            .units
            .iter()
            .filter(|u| property_id.map_or(true, |id| u.property_id == id))
            .cloned()
            .collect())
    }

    async fn update_unit(&self, unit: &Unit) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(replace(&mut data.units, unit, |u| u.id))
    }

    async fn set_unit_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool> {
        let mut data = self.data.write().await;
        match data.units.iter_mut().find(|u| u.id == id) {
            Some(unit) => {
                unit.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_unit(&self, id: Uuid) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(remove(&mut data.units, id, |u| u.id))
    }

    async fn insert_tenant(&self, tenant: &Tenant) -> AppResult<()> {
        self.data.write().await.tenants.push(tenant.clone());
        Ok(())
    }

    async fn get_tenant(&self, id: Uuid) -> AppResult<Option<Tenant>> {
        let data = self.data.read().await;
        Ok(data.tenants.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tenants(&self) -> AppResult<Vec<Tenant>> {
        Ok(self.data.read().await.tenants.clone())
    }

    async fn update_tenant(&self, tenant: &Tenant) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(replace(&mut data.tenants, tenant, |t| t.id))
    }

    async fn delete_tenant(&self, id: Uuid) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(remove(&mut data.tenants, id, |t| t.id))
    }

    async fn count_tenants(&self) -> AppResult<i64> {
        Ok(self.data.read().await.tenants.len() as i64)
    }

    async fn increment_months_paid(&self, tenant_id: Uuid) -> AppResult<bool> {
        #[cfg(test)]
        if self.fail_increments.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(crate::error::AppError::Internal(
                "months_paid update rejected".to_string(),
            ));
        }

        let mut data = self.data.write().await;
        match data.tenants.iter_mut().find(|t| t.id == tenant_id) {
            Some(tenant) => {
                tenant.months_paid += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_history(&self, entry: &TenantHistory) -> AppResult<()> {
        self.data.write().await.history.push(entry.clone());
        Ok(())
    }

    async fn get_history(&self, id: Uuid) -> AppResult<Option<TenantHistory>> {
        let data = self.data.read().await;
        Ok(data.history.iter().find(|h| h.id == id).cloned())
    }

    async fn list_history(&self, tenant_id: Option<Uuid>) -> AppResult<Vec<TenantHistory>> {
        let data = self.data.read().await;
        let mut entries: Vec<TenantHistory> = data
            .history
            .iter()
            .filter(|h| tenant_id.map_or(true, |id| h.tenant_id == id))
            .cloned()
            .collect();
        // Стабильная сортировка: при равной дате новые записи идут первыми
        entries.reverse();
        entries.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(entries)
    }

    async fn insert_payment(&self, payment: &Payment) -> AppResult<()> {
        self.data.write().await.payments.push(payment.clone());
        Ok(())
    }

    async fn get_payment(&self, id: Uuid) -> AppResult<Option<Payment>> {
        let data = self.data.read().await;
        Ok(data.payments.iter().find(|p| p.id == id).cloned())
    }

    async fn list_payments(&self) -> AppResult<Vec<Payment>> {
        Ok(self.data.read().await.payments.clone())
    }

    async fn list_payments_by_tenant(&self, tenant_id: Uuid) -> AppResult<Vec<Payment>> {
        let data = self.data.read().await;
        Ok(data
            .payments
            .iter()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn list_payments_for_period(
        &self,
        month: i32,
        year: i32,
        status: Option<PaymentStatus>,
    ) -> AppResult<Vec<Payment>> {
        let data = self.data.read().await;
        Ok(data
            .payments
            .iter()
            .filter(|p| p.month == month && p.year == year)
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect())
    }

    async fn update_payment(&self, payment: &Payment) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(replace(&mut data.payments, payment, |p| p.id))
    }

    async fn delete_payment(&self, id: Uuid) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(remove(&mut data.payments, id, |p| p.id))
    }

    async fn insert_receipt(&self, receipt: &Receipt) -> AppResult<()> {
        self.data.write().await.receipts.push(receipt.clone());
        Ok(())
    }

    async fn get_receipt(&self, id: Uuid) -> AppResult<Option<Receipt>> {
        let data = self.data.read().await;
        Ok(data.receipts.iter().find(|r| r.id == id).cloned())
    }

    async fn list_receipts(&self, tenant_id: Option<Uuid>) -> AppResult<Vec<Receipt>> {
        let data = self.data.read().await;
        let mut receipts: Vec<Receipt> = data
            .receipts
            .iter()
            .filter(|r| tenant_id.map_or(true, |id| r.tenant_id == id))
            .cloned()
            .collect();
        receipts.reverse();
        receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(receipts)
    }

    async fn delete_receipt(&self, id: Uuid) -> AppResult<bool> {
        let mut data = self.data.write().await;
        Ok(remove(&mut data.receipts, id, |r| r.id))
    }

    async fn next_receipt_sequence(&self) -> AppResult<i64> {
        let mut data = self.data.write().await;
        let by_count = data.receipts.len() as i64 + 1;
        let next = match data.receipt_sequence {
            Some(current) => (current + 1).max(by_count),
            None => by_count,
        };
        data.receipt_sequence = Some(next);
        Ok(next)
    }

    async fn advance_receipt_sequence(&self, floor: i64) -> AppResult<()> {
        let mut data = self.data.write().await;
        let current = data
            .receipt_sequence
            .unwrap_or(data.receipts.len() as i64);
        data.receipt_sequence = Some(current.max(floor));
        Ok(())
    }

    async fn get_settings(&self) -> AppResult<Option<AppSettings>> {
        Ok(self.data.read().await.settings.clone())
    }

    async fn insert_settings_if_absent(&self, settings: &AppSettings) -> AppResult<AppSettings> {
        let mut data = self.data.write().await;
        Ok(data.settings.get_or_insert_with(|| settings.clone()).clone())
    }

    async fn upsert_settings(&self, settings: &AppSettings) -> AppResult<AppSettings> {
        let mut data = self.data.write().await;
        let stored = match data.settings.take() {
            Some(existing) => AppSettings {
                id: existing.id,
                created_at: existing.created_at,
                currency: settings.currency,
                app_name: settings.app_name.clone(),
                updated_at: settings.updated_at,
            },
            None => settings.clone(),
        };
        data.settings = Some(stored.clone());
        Ok(stored)
    }
}
