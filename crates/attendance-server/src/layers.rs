use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use attendance_core::StudentStore;

use crate::dto::{ErrorDetail, ServerErrorResponse};
use crate::error::ServerFault;
use crate::state::AppState;

/// Largest JSON body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Middleware that decides how much of a server error the client sees.
///
/// In production the generic body written by [`crate::error::ApiError`] is
/// kept; otherwise it is replaced by the message and error kind.
pub async fn render_server_errors<S: StudentStore>(
    State(state): State<Arc<AppState<S>>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(fault) = response.extensions_mut().remove::<ServerFault>() else {
        return response;
    };

    if state.environment.is_production() {
        return response;
    }

    let body = ServerErrorResponse {
        message: fault.message,
        error: ErrorDetail {
            kind: fault.kind.to_string(),
        },
    };
    (response.status(), axum::Json(body)).into_response()
}

/// Wrap the router in the transport-level layers: access logging, CORS,
/// body size limit, and security headers.
pub fn harden(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)))
}
