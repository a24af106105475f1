//! Service banner endpoint.

use axum::Json;
use serde::Serialize;

/// Response for the service root.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
}

/// GET / - Service banner, intentionally unauthenticated.
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "satchel",
        version: env!("CARGO_PKG_VERSION"),
    })
}
