//! Tenant identity extraction
//!
//! Authentication happens upstream: the platform gateway validates the
//! caller and forwards the resolved tenant (and optionally user) in
//! headers. The engine never relies on ambient tenant state; every
//! handler receives the identity explicitly and passes `tenant_id`
//! down as a parameter.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use shared::error::AppError;

/// Resolved tenant identity for one request
#[derive(Debug, Clone)]
pub struct TenantIdentity {
    pub tenant_id: String,
    pub user_id: Option<String>,
}

/// Require the gateway-set tenant header and expose it as an extension
pub async fn tenant_middleware(mut request: Request, next: Next) -> Result<Response, AppError> {
    let tenant_id = request
        .headers()
        .get("x-tenant-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(AppError::not_authenticated)?;

    let user_id = request
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    request
        .extensions_mut()
        .insert(TenantIdentity { tenant_id, user_id });

    Ok(next.run(request).await)
}
