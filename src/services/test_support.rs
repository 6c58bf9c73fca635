//! Общие заготовки запросов для тестов сервисов

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    PaymentMethod, PaymentRequest, PaymentStatus, PropertyRequest, PropertyStatus, TenantRequest,
    UnitRequest, UnitType,
};

pub fn property_request(rent: i64) -> PropertyRequest {
    PropertyRequest {
        address: "12 Rue de la Paix, Dakar".to_string(),
        monthly_rent: Decimal::from(rent),
        description: None,
        status: PropertyStatus::Available,
    }
}

pub fn unit_request(property_id: Uuid, number: &str) -> UnitRequest {
    UnitRequest {
        property_id,
        unit_number: number.to_string(),
        unit_type: UnitType::Apartment,
        monthly_rent: Decimal::from(500),
        bedrooms: Some(2),
        bathrooms: Some(1),
        surface_area: None,
        description: None,
        status: PropertyStatus::Available,
    }
}

pub fn tenant_request(property_id: Option<Uuid>, unit_id: Option<Uuid>) -> TenantRequest {
    TenantRequest {
        name: "Awa Diop".to_string(),
        phone: "+221771234567".to_string(),
        email: Some("awa@example.com".to_string()),
        property_id,
        unit_id,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
        end_date: None,
        monthly_rent: Some(Decimal::from(1200)),
        deposit_amount: None,
    }
}

pub fn payment_request(
    tenant_id: Uuid,
    property_id: Uuid,
    month: i32,
    year: i32,
    amount: i64,
) -> PaymentRequest {
    PaymentRequest {
        tenant_id,
        property_id,
        unit_id: None,
        month,
        year,
        amount: Decimal::from(amount),
        due_date: NaiveDate::from_ymd_opt(year, month as u32, 5).unwrap(),
        status: PaymentStatus::Pending,
        paid_date: None,
        payment_method: PaymentMethod::Cash,
        notes: None,
    }
}
