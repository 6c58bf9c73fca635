use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RentFlow API",
        version = "1.0.0",
        description = "Backend API для RentFlow - учёт аренды: объекты, арендаторы, платежи и квитанции",
        contact(
            name = "RentFlow Team",
            email = "support@rentflow.app"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "auth", description = "Аутентификация и авторизация"),
        (name = "settings", description = "Настройки приложения и валюты"),
        (name = "properties", description = "Объекты недвижимости"),
        (name = "units", description = "Юниты внутри объектов"),
        (name = "tenants", description = "Арендаторы и журнал заселения"),
        (name = "payments", description = "Платежи по аренде"),
        (name = "receipts", description = "Квитанции об оплате"),
        (name = "dashboard", description = "Сводные показатели"),
        (name = "backup", description = "Резервное копирование и восстановление")
    ),
    paths(
        // Auth
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::me,
        // Settings
        crate::api::settings::get_settings,
        crate::api::settings::update_settings,
        crate::api::settings::list_currencies,
        // Properties
        crate::api::properties::create_property,
        crate::api::properties::list_properties,
        crate::api::properties::get_property,
        crate::api::properties::update_property,
        crate::api::properties::delete_property,
        crate::api::properties::list_property_units,
        // Units
        crate::api::units::create_unit,
        crate::api::units::list_units,
        crate::api::units::get_unit,
        crate::api::units::update_unit,
        crate::api::units::delete_unit,
        // Tenants
        crate::api::tenants::create_tenant,
        crate::api::tenants::list_tenants,
        crate::api::tenants::get_tenant,
        crate::api::tenants::update_tenant,
        crate::api::tenants::delete_tenant,
        crate::api::tenants::get_tenant_history,
        crate::api::tenants::list_history,
        // Payments
        crate::api::payments::create_payment,
        crate::api::payments::list_payments,
        crate::api::payments::list_tenant_payments,
        crate::api::payments::get_payment,
        crate::api::payments::update_payment,
        crate::api::payments::mark_paid,
        crate::api::payments::delete_payment,
        // Receipts
        crate::api::receipts::create_receipt,
        crate::api::receipts::list_receipts,
        crate::api::receipts::list_tenant_receipts,
        crate::api::receipts::get_receipt,
        crate::api::receipts::delete_receipt,
        // Dashboard
        crate::api::dashboard::get_dashboard,
        // Backup
        crate::api::backup::export_backup,
        crate::api::backup::restore_backup,
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            // Auth
            crate::models::UserPublic,
            crate::models::RegisterRequest,
            crate::models::LoginRequest,
            crate::models::AuthResponse,
            // Settings
            crate::models::Currency,
            crate::models::CurrencyInfo,
            crate::models::CurrencyListResponse,
            crate::models::AppSettings,
            crate::models::UpdateSettingsRequest,
            // Properties
            crate::models::PropertyStatus,
            crate::models::Property,
            crate::models::PropertyRequest,
            crate::models::UnitType,
            crate::models::Unit,
            crate::models::UnitRequest,
            // Tenants
            crate::models::Tenant,
            crate::models::TenantRequest,
            crate::models::HistoryAction,
            crate::models::TenantHistory,
            // Payments
            crate::models::PaymentStatus,
            crate::models::PaymentMethod,
            crate::models::Payment,
            crate::models::PaymentRequest,
            // Receipts
            crate::models::Receipt,
            crate::models::CreateReceiptRequest,
            // Dashboard
            crate::models::DashboardStats,
            // Backup
            crate::models::RecordCounts,
            crate::models::BackupSnapshot,
            crate::models::RestoreSummary,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
    }
}
