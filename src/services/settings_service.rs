use chrono::Utc;

use crate::error::AppResult;
use crate::models::{AppSettings, Currency, UpdateSettingsRequest, DEFAULT_APP_NAME};
use crate::store::Store;

/// Единственная запись настроек приложения.
/// Инвариант "не более одной записи" держит хранилище, а не вызывающий код.
pub struct SettingsService;

impl SettingsService {
    /// Возвращает настройки, создавая запись по умолчанию при первом обращении
    pub async fn get(store: &dyn Store) -> AppResult<AppSettings> {
        if let Some(settings) = store.get_settings().await? {
            return Ok(settings);
        }

        let settings = store
            .insert_settings_if_absent(&AppSettings::default())
            .await?;
        tracing::info!("Created default settings with currency {}", settings.currency.code());
        Ok(settings)
    }

    /// Валюта без создания записи: если настроек нет, используется XOF
    pub async fn current_currency(store: &dyn Store) -> AppResult<Currency> {
        Ok(store
            .get_settings()
            .await?
            .map(|s| s.currency)
            .unwrap_or_default())
    }

    pub async fn update(store: &dyn Store, request: UpdateSettingsRequest) -> AppResult<AppSettings> {
        let current = store.get_settings().await?;
        let now = Utc::now();

        let app_name = request
            .app_name
            .or_else(|| current.as_ref().map(|s| s.app_name.clone()))
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let settings = AppSettings {
            id: current.as_ref().map(|s| s.id).unwrap_or_else(uuid::Uuid::new_v4),
            currency: request.currency,
            app_name,
            created_at: current.as_ref().map(|s| s.created_at).unwrap_or(now),
            updated_at: now,
        };

        let stored = store.upsert_settings(&settings).await?;
        tracing::info!("Settings updated: currency {}", stored.currency.code());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_get_creates_default_once() {
        let store = MemoryStore::new();
        assert!(store.get_settings().await.unwrap().is_none());

        let first = SettingsService::get(&store).await.unwrap();
        assert_eq!(first.currency, Currency::Xof);
        assert_eq!(first.app_name, DEFAULT_APP_NAME);

        let second = SettingsService::get(&store).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_current_currency_does_not_create_record() {
        let store = MemoryStore::new();
        let currency = SettingsService::current_currency(&store).await.unwrap();
        assert_eq!(currency, Currency::Xof);
        assert!(store.get_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_upserts_single_record() {
        let store = MemoryStore::new();

        let created = SettingsService::update(
            &store,
            UpdateSettingsRequest {
                currency: Currency::Eur,
                app_name: Some("Gestion Locative".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(created.currency, Currency::Eur);

        let updated = SettingsService::update(
            &store,
            UpdateSettingsRequest {
                currency: Currency::Mad,
                app_name: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.currency, Currency::Mad);
        assert_eq!(updated.app_name, "Gestion Locative");
        assert_eq!(SettingsService::get(&store).await.unwrap(), updated);
    }
}
