use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    HistoryAction, PropertyStatus, Tenant, TenantHistory, TenantRequest, UNKNOWN_LABEL,
};
use crate::store::Store;
use crate::utils::validators::sanitize_string;

/// Арендаторы и журнал заселения
pub struct TenantService;

impl TenantService {
    /// Создание арендатора с побочными эффектами заселения.
    ///
    /// Шаги выполняются последовательно и не образуют транзакцию:
    /// 1. запись арендатора;
    /// 2. статус `occupied` для юнита, а если юнит не указан, то для объекта;
    /// 3. запись `moved_in` в журнал, если указан объект.
    pub async fn create(store: &dyn Store, request: TenantRequest) -> AppResult<Tenant> {
        request.validate()?;

        let mut tenant = Tenant::from_request(request);
        tenant.name = sanitize_string(&tenant.name);
        store.insert_tenant(&tenant).await?;

        if let Some(unit_id) = tenant.unit_id {
            if store.set_unit_status(unit_id, PropertyStatus::Occupied).await? {
                tracing::info!("Unit {} marked occupied by tenant {}", unit_id, tenant.id);
            } else {
                tracing::warn!("Unit {} not found while moving in tenant {}", unit_id, tenant.id);
            }
        } else if let Some(property_id) = tenant.property_id {
            if store
                .set_property_status(property_id, PropertyStatus::Occupied)
                .await?
            {
                tracing::info!("Property {} marked occupied by tenant {}", property_id, tenant.id);
            } else {
                tracing::warn!(
                    "Property {} not found while moving in tenant {}",
                    property_id,
                    tenant.id
                );
            }
        }

        if let Some(property_id) = tenant.property_id {
            Self::record_move_in(store, &tenant, property_id).await?;
        }

        Ok(tenant)
    }

    async fn record_move_in(
        store: &dyn Store,
        tenant: &Tenant,
        property_id: Uuid,
    ) -> AppResult<TenantHistory> {
        let property_name = match store.get_property(property_id).await? {
            Some(property) => property.address,
            None => UNKNOWN_LABEL.to_string(),
        };

        let unit_number = match tenant.unit_id {
            Some(unit_id) => Some(
                store
                    .get_unit(unit_id)
                    .await?
                    .map(|unit| unit.unit_number)
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            ),
            None => None,
        };

        let entry = TenantHistory {
            id: Uuid::new_v4(),
            tenant_id: tenant.id,
            tenant_name: tenant.name.clone(),
            property_id,
            property_name,
            unit_id: tenant.unit_id,
            unit_number,
            start_date: tenant
                .start_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            end_date: None,
            monthly_rent: tenant.monthly_rent.unwrap_or(Decimal::ZERO),
            total_paid: Decimal::ZERO,
            months_paid: 0,
            action: HistoryAction::MovedIn,
            created_at: Utc::now(),
        };
        store.insert_history(&entry).await?;

        Ok(entry)
    }

    pub async fn get(store: &dyn Store, id: Uuid) -> AppResult<Tenant> {
        store
            .get_tenant(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tenant not found".to_string()))
    }

    pub async fn list(store: &dyn Store) -> AppResult<Vec<Tenant>> {
        store.list_tenants().await
    }

    /// Полная замена изменяемых полей. Статусы занятости и журнал не меняются.
    pub async fn update(store: &dyn Store, id: Uuid, request: TenantRequest) -> AppResult<Tenant> {
        request.validate()?;

        let mut tenant = Self::get(store, id).await?;
        tenant.apply(request);
        tenant.name = sanitize_string(&tenant.name);

        if !store.update_tenant(&tenant).await? {
            return Err(AppError::NotFound("Tenant not found".to_string()));
        }
        // Счётчик мог измениться параллельной оплатой, возвращаем актуальную запись
        Self::get(store, id).await
    }

    pub async fn delete(store: &dyn Store, id: Uuid) -> AppResult<()> {
        if !store.delete_tenant(id).await? {
            return Err(AppError::NotFound("Tenant not found".to_string()));
        }
        Ok(())
    }

    pub async fn history(store: &dyn Store, tenant_id: Uuid) -> AppResult<Vec<TenantHistory>> {
        Self::get(store, tenant_id).await?;
        store.list_history(Some(tenant_id)).await
    }

    pub async fn all_history(store: &dyn Store) -> AppResult<Vec<TenantHistory>> {
        store.list_history(None).await
    }
}
