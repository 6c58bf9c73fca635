pub mod auth_service;
pub mod backup_service;
pub mod dashboard_service;
pub mod payment_service;
pub mod property_service;
pub mod receipt_service;
pub mod settings_service;
pub mod tenant_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::AuthService;
pub use backup_service::BackupService;
pub use dashboard_service::DashboardService;
pub use payment_service::PaymentService;
pub use property_service::{PropertyService, UnitService};
pub use receipt_service::ReceiptService;
pub use settings_service::SettingsService;
pub use tenant_service::TenantService;
