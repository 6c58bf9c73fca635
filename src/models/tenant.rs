use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validators::validate_phone_field;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, ToSchema)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub property_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    /// Растёт только при отметке платежа как оплаченного
    #[serde(default)]
    pub months_paid: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TenantRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_phone_field"))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub property_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monthly_rent: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
}

impl Tenant {
    pub fn from_request(request: TenantRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            phone: request.phone,
            email: request.email,
            property_id: request.property_id,
            unit_id: request.unit_id,
            start_date: request.start_date,
            end_date: request.end_date,
            monthly_rent: request.monthly_rent,
            deposit_amount: request.deposit_amount,
            months_paid: 0,
            created_at: Utc::now(),
        }
    }

    /// Полная замена изменяемых полей; счётчик оплаченных месяцев сохраняется.
    pub fn apply(&mut self, request: TenantRequest) {
        self.name = request.name;
        self.phone = request.phone;
        self.email = request.email;
        self.property_id = request.property_id;
        self.unit_id = request.unit_id;
        self.start_date = request.start_date;
        self.end_date = request.end_date;
        self.monthly_rent = request.monthly_rent;
        self.deposit_amount = request.deposit_amount;
    }
}
