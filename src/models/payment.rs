use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validators::validate_non_negative;

/// Статус платежа.
///
/// `pending -> paid` выполняется только через отметку об оплате.
/// `overdue` выставляет внешний вызывающий код, автоматического перехода по сроку нет.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema,
)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    MobileMoney,
    Check,
    Card,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Cash
    }
}

/// Одна обязанность арендатора за расчётный месяц
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub unit_id: Option<Uuid>,
    pub month: i32,
    pub year: i32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub paid_date: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PaymentRequest {
    pub tenant_id: Uuid,
    pub property_id: Uuid,
    pub unit_id: Option<Uuid>,
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub month: i32,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(custom(function = "validate_non_negative"))]
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: PaymentStatus,
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

impl Payment {
    pub fn from_request(request: PaymentRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: request.tenant_id,
            property_id: request.property_id,
            unit_id: request.unit_id,
            month: request.month,
            year: request.year,
            amount: request.amount,
            due_date: request.due_date,
            status: request.status,
            paid_date: request.paid_date,
            payment_method: request.payment_method,
            notes: request.notes,
            created_at: Utc::now(),
        }
    }

    /// Полная замена изменяемых полей
    pub fn apply(&mut self, request: PaymentRequest) {
        self.tenant_id = request.tenant_id;
        self.property_id = request.property_id;
        self.unit_id = request.unit_id;
        self.month = request.month;
        self.year = request.year;
        self.amount = request.amount;
        self.due_date = request.due_date;
        self.status = request.status;
        self.paid_date = request.paid_date;
        self.payment_method = request.payment_method;
        self.notes = request.notes;
    }
}
