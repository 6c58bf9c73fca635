use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware as axum_middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::middleware::{auth_middleware, AppState};
use crate::openapi::ApiDoc;

// Резервные копии приходят одним JSON-документом
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Собирает полный роутер приложения
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", api::routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": "RentFlow API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Backend API for RentFlow - rental property management"
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{Datelike, Utc};
    use regex::Regex;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::services::auth_service::test_config;
    use crate::store::MemoryStore;

    fn test_app() -> Router {
        build_router(AppState::new(Arc::new(MemoryStore::new()), test_config()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn register(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "landlord",
                "email": "landlord@example.com",
                "password": "secret-password"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    fn decimal(value: &Value) -> Decimal {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        tokio_test::assert_ok!(text.parse::<Decimal>())
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_currencies_are_public() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/api/v1/currencies", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let currencies = body["currencies"].as_array().unwrap();
        assert_eq!(currencies.len(), 8);
        assert!(currencies
            .iter()
            .any(|c| c["code"] == "XOF" && c["symbol"] == "CFA"));
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/api/v1/tenants", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, _) =
            send(&app, Method::GET, "/api/v1/dashboard", Some("not-a-token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_payment_returns_not_found() {
        let app = test_app();
        let token = register(&app).await;
        let uri = format!("/api/v1/payments/{}/mark-paid", uuid::Uuid::new_v4());

        let (status, body) = send(&app, Method::PUT, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Payment not found");
    }

    #[tokio::test]
    async fn test_tenant_without_phone_is_rejected() {
        let app = test_app();
        let token = register(&app).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/tenants",
            Some(&token),
            Some(json!({ "name": "No Phone", "phone": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_rent_collection_flow() {
        let app = test_app();
        let token = register(&app).await;
        let today = Utc::now().date_naive();

        let (status, property) = send(
            &app,
            Method::POST,
            "/api/v1/properties",
            Some(&token),
            Some(json!({ "address": "12 Rue Carnot, Dakar", "monthly_rent": "1200" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(property["status"], "available");
        let property_id = property["id"].as_str().unwrap().to_string();

        let (status, tenant) = send(
            &app,
            Method::POST,
            "/api/v1/tenants",
            Some(&token),
            Some(json!({
                "name": "Awa Diop",
                "phone": "+221771234567",
                "property_id": property_id,
                "start_date": "2024-01-01",
                "monthly_rent": "1200"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tenant["months_paid"], 0);
        let tenant_id = tenant["id"].as_str().unwrap().to_string();

        let (_, property) = send(
            &app,
            Method::GET,
            &format!("/api/v1/properties/{property_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(property["status"], "occupied");

        let (status, history) = send(
            &app,
            Method::GET,
            &format!("/api/v1/tenants/{tenant_id}/history"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["action"], "moved_in");

        let (status, payment) = send(
            &app,
            Method::POST,
            "/api/v1/payments",
            Some(&token),
            Some(json!({
                "tenant_id": tenant_id,
                "property_id": property_id,
                "month": today.month(),
                "year": today.year(),
                "amount": "1200",
                "due_date": today.to_string()
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payment["status"], "pending");
        let payment_id = payment["id"].as_str().unwrap().to_string();

        let (_, dashboard) = send(&app, Method::GET, "/api/v1/dashboard", Some(&token), None).await;
        assert_eq!(dashboard["pending_payments"], 1);
        assert_eq!(decimal(&dashboard["monthly_revenue"]), Decimal::ZERO);

        let (status, paid) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/payments/{payment_id}/mark-paid"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(paid["status"], "paid");
        assert_eq!(paid["paid_date"], today.to_string());

        let (status, receipt) = send(
            &app,
            Method::POST,
            "/api/v1/receipts",
            Some(&token),
            Some(json!({ "tenant_id": tenant_id, "payment_id": payment_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let number = receipt["receipt_number"].as_str().unwrap();
        assert!(Regex::new(r"^REC-\d{6}-\d{4}$").unwrap().is_match(number));
        assert!(number.ends_with("-0001"));
        assert_eq!(decimal(&receipt["amount"]), Decimal::new(1200, 0));
        assert_eq!(receipt["months_paid_total"], 1);
        assert_eq!(receipt["currency"], "XOF");
        assert_eq!(receipt["currency_symbol"], "CFA");
        assert_eq!(receipt["tenant_name"], "Awa Diop");

        let (_, dashboard) = send(&app, Method::GET, "/api/v1/dashboard", Some(&token), None).await;
        assert_eq!(dashboard["total_properties"], 1);
        assert_eq!(dashboard["total_tenants"], 1);
        assert_eq!(dashboard["pending_payments"], 0);
        assert_eq!(decimal(&dashboard["monthly_revenue"]), Decimal::new(1200, 0));
        assert_eq!(decimal(&dashboard["occupancy_rate"]), Decimal::ONE_HUNDRED);
        assert_eq!(dashboard["currency"], "XOF");

        let (_, receipts) = send(
            &app,
            Method::GET,
            &format!("/api/v1/receipts/tenant/{tenant_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(receipts.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_backup_restores_into_fresh_instance() {
        let source = test_app();
        let token = register(&source).await;
        send(
            &source,
            Method::POST,
            "/api/v1/properties",
            Some(&token),
            Some(json!({ "address": "5 Avenue Bourguiba", "monthly_rent": "800" })),
        )
        .await;
        send(
            &source,
            Method::PUT,
            "/api/v1/settings",
            Some(&token),
            Some(json!({ "currency": "EUR" })),
        )
        .await;

        let (status, snapshot) = send(&source, Method::GET, "/api/v1/backup", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["total_records"]["properties"], 1);

        let target = test_app();
        let token = register(&target).await;
        let (status, summary) = send(
            &target,
            Method::POST,
            "/api/v1/restore",
            Some(&token),
            Some(snapshot.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["restored_records"]["properties"], 1);
        assert_eq!(summary["settings_restored"], true);

        // Повторное восстановление ничего не дублирует
        let (_, summary) =
            send(&target, Method::POST, "/api/v1/restore", Some(&token), Some(snapshot)).await;
        assert_eq!(summary["restored_records"]["properties"], 0);

        let (_, properties) = send(&target, Method::GET, "/api/v1/properties", Some(&token), None).await;
        assert_eq!(properties.as_array().unwrap().len(), 1);
        let (_, settings) = send(&target, Method::GET, "/api/v1/settings", Some(&token), None).await;
        assert_eq!(settings["currency"], "EUR");
    }
}
