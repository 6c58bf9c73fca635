use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::error::AppResult;
use crate::models::{
    AppSettings, Payment, PaymentStatus, Property, PropertyStatus, Receipt, Tenant, TenantHistory,
    Unit, User,
};

const RECEIPT_COUNTER: &str = "receipt_number";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[axum::async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, full_name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_property(&self, property: &Property) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO properties (id, address, monthly_rent, description, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(property.id)
        .bind(&property.address)
        .bind(property.monthly_rent)
        .bind(&property.description)
        .bind(property.status)
        .bind(property.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_property(&self, id: Uuid) -> AppResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(property)
    }

    async fn list_properties(&self) -> AppResult<Vec<Property>> {
        let properties =
            sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(properties)
    }

    async fn update_property(&self, property: &Property) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET address = $2, monthly_rent = $3, description = $4, status = $5
            WHERE id = $1
            "#,
        )
        .bind(property.id)
        .bind(&property.address)
        .bind(property.monthly_rent)
        .bind(&property.description)
        .bind(property.status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_property_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE properties SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_property(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_properties(&self, status: Option<PropertyStatus>) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM properties WHERE ($1::occupancy_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn insert_unit(&self, unit: &Unit) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO units
                (id, property_id, unit_number, unit_type, monthly_rent, bedrooms,
                 bathrooms, surface_area, description, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(unit.id)
        .bind(unit.property_id)
        .bind(&unit.unit_number)
        .bind(unit.unit_type)
        .bind(unit.monthly_rent)
        .bind(unit.bedrooms)
        .bind(unit.bathrooms)
        .bind(unit.surface_area)
        .bind(&unit.description)
        .bind(unit.status)
        .bind(unit.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_unit(&self, id: Uuid) -> AppResult<Option<Unit>> {
        let unit = sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(unit)
    }

    async fn list_units(&self, property_id: Option<Uuid>) -> AppResult<Vec<Unit>> {
        let units = sqlx::query_as::<_, Unit>(
            r#"
            SELECT * FROM units
            WHERE ($1::uuid IS NULL OR property_id = $1)
            ORDER BY created_at
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(units)
    }

    async fn update_unit(&self, unit: &Unit) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE units
            SET property_id = $2, unit_number = $3, unit_type = $4, monthly_rent = $5,
                bedrooms = $6, bathrooms = $7, surface_area = $8, description = $9, status = $10
            WHERE id = $1
            "#,
        )
        .bind(unit.id)
        .bind(unit.property_id)
        .bind(&unit.unit_number)
        .bind(unit.unit_type)
        .bind(unit.monthly_rent)
        .bind(unit.bedrooms)
        .bind(unit.bathrooms)
        .bind(unit.surface_area)
        .bind(&unit.description)
        .bind(unit.status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_unit_status(&self, id: Uuid, status: PropertyStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE units SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_unit(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_tenant(&self, tenant: &Tenant) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tenants
                (id, name, phone, email, property_id, unit_id, start_date, end_date,
                 monthly_rent, deposit_amount, months_paid, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(&tenant.phone)
        .bind(&tenant.email)
        .bind(tenant.property_id)
        .bind(tenant.unit_id)
        .bind(tenant.start_date)
        .bind(tenant.end_date)
        .bind(tenant.monthly_rent)
        .bind(tenant.deposit_amount)
        .bind(tenant.months_paid)
        .bind(tenant.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_tenant(&self, id: Uuid) -> AppResult<Option<Tenant>> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    async fn list_tenants(&self) -> AppResult<Vec<Tenant>> {
        let tenants = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(tenants)
    }

    async fn update_tenant(&self, tenant: &Tenant) -> AppResult<bool> {
        // months_paid здесь не трогаем: его меняет только increment_months_paid
        let result = sqlx::query(
            r#"
            UPDATE tenants
            SET name = $2, phone = $3, email = $4, property_id = $5, unit_id = $6,
                start_date = $7, end_date = $8, monthly_rent = $9, deposit_amount = $10
            WHERE id = $1
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(&tenant.phone)
        .bind(&tenant.email)
        .bind(tenant.property_id)
        .bind(tenant.unit_id)
        .bind(tenant.start_date)
        .bind(tenant.end_date)
        .bind(tenant.monthly_rent)
        .bind(tenant.deposit_amount)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_tenant(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_tenants(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tenants")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn increment_months_paid(&self, tenant_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE tenants SET months_paid = months_paid + 1 WHERE id = $1")
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_history(&self, entry: &TenantHistory) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tenant_history
                (id, tenant_id, tenant_name, property_id, property_name, unit_id, unit_number,
                 start_date, end_date, monthly_rent, total_paid, months_paid, action, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(entry.id)
        .bind(entry.tenant_id)
        .bind(&entry.tenant_name)
        .bind(entry.property_id)
        .bind(&entry.property_name)
        .bind(entry.unit_id)
        .bind(&entry.unit_number)
        .bind(entry.start_date)
        .bind(entry.end_date)
        .bind(entry.monthly_rent)
        .bind(entry.total_paid)
        .bind(entry.months_paid)
        .bind(entry.action)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_history(&self, id: Uuid) -> AppResult<Option<TenantHistory>> {
        let entry = sqlx::query_as::<_, TenantHistory>("SELECT * FROM tenant_history WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn list_history(&self, tenant_id: Option<Uuid>) -> AppResult<Vec<TenantHistory>> {
        let entries = sqlx::query_as::<_, TenantHistory>(
            r#"
            SELECT * FROM tenant_history
            WHERE ($1::uuid IS NULL OR tenant_id = $1)
            ORDER BY start_date DESC, created_at DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn insert_payment(&self, payment: &Payment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments
                (id, tenant_id, property_id, unit_id, month, year, amount, due_date,
                 status, paid_date, payment_method, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(payment.id)
        .bind(payment.tenant_id)
        .bind(payment.property_id)
        .bind(payment.unit_id)
        .bind(payment.month)
        .bind(payment.year)
        .bind(payment.amount)
        .bind(payment.due_date)
        .bind(payment.status)
        .bind(payment.paid_date)
        .bind(payment.payment_method)
        .bind(&payment.notes)
        .bind(payment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_payment(&self, id: Uuid) -> AppResult<Option<Payment>> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(payment)
    }

    async fn list_payments(&self) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(payments)
    }

    async fn list_payments_by_tenant(&self, tenant_id: Uuid) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(payments)
    }

    async fn list_payments_for_period(
        &self,
        month: i32,
        year: i32,
        status: Option<PaymentStatus>,
    ) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE month = $1 AND year = $2
              AND ($3::payment_status IS NULL OR status = $3)
            "#,
        )
        .bind(month)
        .bind(year)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    async fn update_payment(&self, payment: &Payment) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET tenant_id = $2, property_id = $3, unit_id = $4, month = $5, year = $6,
                amount = $7, due_date = $8, status = $9, paid_date = $10,
                payment_method = $11, notes = $12
            WHERE id = $1
            "#,
        )
        .bind(payment.id)
        .bind(payment.tenant_id)
        .bind(payment.property_id)
        .bind(payment.unit_id)
        .bind(payment.month)
        .bind(payment.year)
        .bind(payment.amount)
        .bind(payment.due_date)
        .bind(payment.status)
        .bind(payment.paid_date)
        .bind(payment.payment_method)
        .bind(&payment.notes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_payment(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_receipt(&self, receipt: &Receipt) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO receipts
                (id, receipt_number, tenant_id, tenant_name, tenant_phone, property_id,
                 property_name, unit_id, unit_number, payment_id, amount, currency,
                 currency_symbol, payment_date, due_date, period_month, period_year,
                 payment_method, months_paid_total, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21)
            "#,
        )
        .bind(receipt.id)
        .bind(&receipt.receipt_number)
        .bind(receipt.tenant_id)
        .bind(&receipt.tenant_name)
        .bind(&receipt.tenant_phone)
        .bind(receipt.property_id)
        .bind(&receipt.property_name)
        .bind(receipt.unit_id)
        .bind(&receipt.unit_number)
        .bind(receipt.payment_id)
        .bind(receipt.amount)
        .bind(receipt.currency)
        .bind(&receipt.currency_symbol)
        .bind(receipt.payment_date)
        .bind(receipt.due_date)
        .bind(receipt.period_month)
        .bind(receipt.period_year)
        .bind(receipt.payment_method)
        .bind(receipt.months_paid_total)
        .bind(&receipt.notes)
        .bind(receipt.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_receipt(&self, id: Uuid) -> AppResult<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>("SELECT * FROM receipts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(receipt)
    }

    async fn list_receipts(&self, tenant_id: Option<Uuid>) -> AppResult<Vec<Receipt>> {
        let receipts = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT * FROM receipts
            WHERE ($1::uuid IS NULL OR tenant_id = $1)
            ORDER BY created_at DESC, receipt_number DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(receipts)
    }

    async fn delete_receipt(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM receipts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn next_receipt_sequence(&self) -> AppResult<i64> {
        // Одна инструкция: резервирование номера атомарно и без гонки count-then-insert
        let (value,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO counters (name, value)
            VALUES ($1, (SELECT COUNT(*) FROM receipts) + 1)
            ON CONFLICT (name) DO UPDATE
            SET value = GREATEST(counters.value + 1, (SELECT COUNT(*) FROM receipts) + 1)
            RETURNING value
            "#,
        )
        .bind(RECEIPT_COUNTER)
        .fetch_one(&self.pool)
        .await?;
        Ok(value)
    }

    async fn advance_receipt_sequence(&self, floor: i64) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO counters (name, value)
            VALUES ($1, GREATEST($2, (SELECT COUNT(*) FROM receipts)))
            ON CONFLICT (name) DO UPDATE SET value = GREATEST(counters.value, $2)
            "#,
        )
        .bind(RECEIPT_COUNTER)
        .bind(floor)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_settings(&self) -> AppResult<Option<AppSettings>> {
        let settings = sqlx::query_as::<_, AppSettings>("SELECT * FROM app_settings LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(settings)
    }

    async fn insert_settings_if_absent(&self, settings: &AppSettings) -> AppResult<AppSettings> {
        sqlx::query(
            r#"
            INSERT INTO app_settings (id, currency, app_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (singleton) DO NOTHING
            "#,
        )
        .bind(settings.id)
        .bind(settings.currency)
        .bind(&settings.app_name)
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await?;

        let stored = sqlx::query_as::<_, AppSettings>("SELECT * FROM app_settings LIMIT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn upsert_settings(&self, settings: &AppSettings) -> AppResult<AppSettings> {
        let stored = sqlx::query_as::<_, AppSettings>(
            r#"
            INSERT INTO app_settings (id, currency, app_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (singleton) DO UPDATE
            SET currency = EXCLUDED.currency,
                app_name = EXCLUDED.app_name,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(settings.id)
        .bind(settings.currency)
        .bind(&settings.app_name)
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }
}
