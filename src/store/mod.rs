//! Хранилище коллекций, с которым работает ядро.
//!
//! Каждая операция атомарна только в пределах одной записи.
//! Межзаписных транзакций нет: многошаговые сценарии (отметка оплаты,
//! выдача квитанции, заселение) собираются в сервисах из отдельных шагов.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    AppSettings, Payment, PaymentStatus, Property, PropertyStatus, Receipt, Tenant, TenantHistory,
    Unit, User,
};

#[axum::async_trait]
pub trait Store: Send + Sync {
    // Пользователи
    async fn insert_user(&self, user: &User) -> AppResult<()>;
    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    // Объекты
    async fn insert_property(&self, property: &Property) -> AppResult<()>;
    async fn get_property(&self, id: Uuid) -> AppResult<Option<Property>>;
    async fn list_properties(&self) -> AppResult<Vec<Property>>;
    /// Возвращает `false`, если записи с таким id нет
    async fn update_property(&self, property: &Property) -> AppResult<bool>;
    async fn set_property_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool>;
    async fn delete_property(&self, id: Uuid) -> AppResult<bool>;
    async fn count_properties(&self, status: Option<PropertyStatus>) -> AppResult<i64>;

    // Юниты
    async fn insert_unit(&self, unit: &Unit) -> AppResult<()>;
    async fn get_unit(&self, id: Uuid) -> AppResult<Option<Unit>>;
    async fn list_units(&self, property_id: Option<Uuid>) -> AppResult<Vec<Unit>>;
    async fn update_unit(&self, unit: &Unit) -> AppResult<bool>;
    async fn set_unit_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool>;
    async fn delete_unit(&self, id: Uuid) -> AppResult<bool>;

    // Арендаторы
    async fn insert_tenant(&self, tenant: &Tenant) -> AppResult<()>;
    async fn get_tenant(&self, id: Uuid) -> AppResult<Option<Tenant>>;
    async fn list_tenants(&self) -> AppResult<Vec<Tenant>>;
    async fn update_tenant(&self, tenant: &Tenant) -> AppResult<bool>;
    async fn delete_tenant(&self, id: Uuid) -> AppResult<bool>;
    async fn count_tenants(&self) -> AppResult<i64>;
    /// Атомарно увеличивает `months_paid` на единицу
    async fn increment_months_paid(&self, tenant_id: Uuid) -> AppResult<bool>;

    // Журнал заселения
    async fn insert_history(&self, entry: &TenantHistory) -> AppResult<()>;
    async fn get_history(&self, id: Uuid) -> AppResult<Option<TenantHistory>>;
    async fn list_history(&self, tenant_id: Option<Uuid>) -> AppResult<Vec<TenantHistory>>;

    // Платежи
    async fn insert_payment(&self, payment: &Payment) -> AppResult<()>;
    async fn get_payment(&self, id: Uuid) -> AppResult<Option<Payment>>;
    async fn list_payments(&self) -> AppResult<Vec<Payment>>;
    async fn list_payments_by_tenant(&self, tenant_id: Uuid) -> AppResult<Vec<Payment>>;
    async fn list_payments_for_period(
        &self,
        month: i32,
        year: i32,
        status: Option<PaymentStatus>,
    ) -> AppResult<Vec<Payment>>;
    async fn update_payment(&self, payment: &Payment) -> AppResult<bool>;
    async fn delete_payment(&self, id: Uuid) -> AppResult<bool>;

    // Квитанции: списки отсортированы по времени создания, новые первыми
    async fn insert_receipt(&self, receipt: &Receipt) -> AppResult<()>;
    async fn get_receipt(&self, id: Uuid) -> AppResult<Option<Receipt>>;
    async fn list_receipts(&self, tenant_id: Option<Uuid>) -> AppResult<Vec<Receipt>>;
    async fn delete_receipt(&self, id: Uuid) -> AppResult<bool>;
    /// Атомарно резервирует следующий порядковый номер квитанции.
    /// Первый вызов продолжает нумерацию с количества уже существующих квитанций.
    async fn next_receipt_sequence(&self) -> AppResult<i64>;
    /// Поднимает счётчик номеров не ниже `floor`; меньшие значения игнорируются
    async fn advance_receipt_sequence(&self, floor: i64) -> AppResult<()>;

    // Настройки: не более одной записи
    async fn get_settings(&self) -> AppResult<Option<AppSettings>>;
    /// Вставляет запись, если её нет; иначе возвращает уже существующую
    async fn insert_settings_if_absent(&self, settings: &AppSettings) -> AppResult<AppSettings>;
    /// Создаёт или полностью заменяет единственную запись
    async fn upsert_settings(&self, settings: &AppSettings) -> AppResult<AppSettings>;
}
