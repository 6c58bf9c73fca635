use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::Currency;

pub const DEFAULT_APP_NAME: &str = "RentFlow";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, ToSchema)]
pub struct AppSettings {
    pub id: Uuid,
    pub currency: Currency,
    pub app_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for AppSettings {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            currency: Currency::default(),
            app_name: DEFAULT_APP_NAME.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSettingsRequest {
    pub currency: Currency,
    #[validate(length(min = 1, max = 120))]
    pub app_name: Option<String>,
}
