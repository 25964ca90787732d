//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router whose fallback answers every path from the route table
//! - Wire up middleware (request ID, tracing, cross-origin safety net)
//! - Serve on a bound listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::http::request::{raw_path, X_REQUEST_ID};
use crate::http::response::unsupported_method;
use crate::observability::metrics;
use crate::routing::RouteTable;

/// HTTP front for the route table.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server answering from `table`.
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            router: Self::build_router(table),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(table: Arc<RouteTable>) -> Router {
        Router::new()
            .fallback(stub_handler)
            .with_state(table)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::debug_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }),
            )
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
    }

    /// The fully layered router, for serving or in-process calls.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires (or its sender is dropped).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::debug!("Shutdown signal received");
            })
            .await?;

        tracing::info!(address = %addr, "HTTP server stopped");
        Ok(())
    }
}

/// Answer any request from the route table.
async fn stub_handler(
    State(table): State<Arc<RouteTable>>,
    method: Method,
    uri: Uri,
) -> Response {
    let start_time = Instant::now();
    let path = raw_path(&uri);

    let answer = if method == Method::GET || method == Method::HEAD {
        table.handle(path)
    } else {
        tracing::warn!(method = %method, path = %path, "Unsupported method");
        unsupported_method()
    };

    tracing::debug!(
        method = %method,
        path = %path,
        status = answer.status.as_u16(),
        matched = answer.matched,
        "Request answered"
    );
    metrics::record_request(&method, answer.status, answer.matched, start_time);

    answer.into_response()
}
