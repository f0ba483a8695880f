// rest/allowlist.rs — static address allow-list middleware.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::AppContext;

/// Reject requests from peers outside `allowed_ips` with 403.
///
/// This is a deployment guard, not authentication — the list is static,
/// read from config at startup.
pub async fn require_allowlist(
    State(ctx): State<Arc<AppContext>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let ip = addr.ip().to_string();
    if ctx.config.allowed_ips.iter().any(|allowed| *allowed == ip) {
        debug!(%ip, path = %request.uri().path(), "allow-list check passed");
        return next.run(request).await;
    }

    warn!(%ip, path = %request.uri().path(), "blocked request from non-allow-listed address");
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "Access denied",
            "message": format!("address {ip} is not authorized to access this resource"),
            "your_ip": ip,
        })),
    )
        .into_response()
}
