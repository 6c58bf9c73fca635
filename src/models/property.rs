use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validators::validate_non_negative;

/// Статус занятости объекта или юнита
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema,
)]
#[sqlx(type_name = "occupancy_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    Occupied,
    Maintenance,
}

impl Default for PropertyStatus {
    fn default() -> Self {
        Self::Available
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, ToSchema)]
pub struct Property {
    pub id: Uuid,
    pub address: String,
    pub monthly_rent: Decimal,
    pub description: Option<String>,
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,
}

/// Используется и для создания, и для полной замены полей
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PropertyRequest {
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(custom(function = "validate_non_negative"))]
    pub monthly_rent: Decimal,
    pub description: Option<String>,
    #[serde(default)]
    pub status: PropertyStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "unit_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Apartment,
    Studio,
    House,
    Commercial,
}

impl Default for UnitType {
    fn default() -> Self {
        Self::Apartment
    }
}

/// Юнит внутри объекта; статус ведётся независимо от статуса объекта
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, ToSchema)]
pub struct Unit {
    pub id: Uuid,
    pub property_id: Uuid,
    pub unit_number: String,
    pub unit_type: UnitType,
    pub monthly_rent: Decimal,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub surface_area: Option<Decimal>,
    pub description: Option<String>,
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UnitRequest {
    pub property_id: Uuid,
    #[validate(length(min = 1, message = "unit_number is required"))]
    pub unit_number: String,
    #[serde(default)]
    pub unit_type: UnitType,
    #[validate(custom(function = "validate_non_negative"))]
    pub monthly_rent: Decimal,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,
    pub surface_area: Option<Decimal>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: PropertyStatus,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnitsQuery {
    /// Только юниты этого объекта
    pub property_id: Option<Uuid>,
}
