use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{Currency, PaymentMethod};

/// Квитанция: неизменяемый снимок платежа, арендатора, объекта и валюты
/// на момент выдачи.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, ToSchema)]
pub struct Receipt {
    pub id: Uuid,
    pub receipt_number: String,
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub tenant_phone: String,
    pub property_id: Uuid,
    pub property_name: String,
    pub unit_id: Option<Uuid>,
    pub unit_number: Option<String>,
    pub payment_id: Uuid,
    pub amount: Decimal,
    pub currency: Currency,
    pub currency_symbol: String,
    pub payment_date: NaiveDate,
    pub due_date: NaiveDate,
    pub period_month: i32,
    pub period_year: i32,
    pub payment_method: PaymentMethod,
    pub months_paid_total: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReceiptRequest {
    pub tenant_id: Uuid,
    pub payment_id: Uuid,
    pub payment_method: Option<PaymentMethod>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Номер квитанции: `REC-{год}{месяц:02}-{порядковый:04}`.
/// Год и месяц берутся из даты выдачи, не из расчётного периода.
pub fn format_receipt_number(year: i32, month: u32, sequence: i64) -> String {
    format!("REC-{}{:02}-{:04}", year, month, sequence)
}

/// Порядковый номер из номера квитанции (часть после последнего дефиса)
pub fn parse_receipt_sequence(receipt_number: &str) -> Option<i64> {
    receipt_number
        .rsplit_once('-')
        .and_then(|(_, sequence)| sequence.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_receipt_number() {
        assert_eq!(format_receipt_number(2024, 6, 1), "REC-202406-0001");
        assert_eq!(format_receipt_number(2025, 12, 42), "REC-202512-0042");
        assert_eq!(format_receipt_number(2025, 1, 12345), "REC-202501-12345");
    }

    #[test]
    fn test_parse_receipt_sequence() {
        assert_eq!(parse_receipt_sequence("REC-202406-0042"), Some(42));
        assert_eq!(parse_receipt_sequence("REC-202501-12345"), Some(12345));
        assert_eq!(parse_receipt_sequence("manual"), None);
        assert_eq!(parse_receipt_sequence("REC-202406-"), None);
    }
}
