//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the radix router from the route table
//! - Create the Axum app: one fallback handler, every path goes through the
//!   radix tree
//! - Wire up middleware (tracing, timeout, request ID, security headers)
//! - Serve until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request},
    response::Response,
    Router as AxumRouter,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{RouteConfig, SecurityHeadersConfig, ServerConfig};
use crate::http::request::{request_id, UuidRequestId};
use crate::http::response::{self, InvalidResponse, RouteHandler};
use crate::observability::metrics;
use crate::routing::{HttpMethod, Router, SharedRouter};

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<SharedRouter<RouteHandler>>,
}

/// Registers every route of the table, in order, and freezes the tree.
pub fn build_router(routes: &[RouteConfig]) -> Result<Router<RouteHandler>, InvalidResponse> {
    let mut builder = Router::builder();
    for route in routes {
        builder.add_route(route.method, &route.path, RouteHandler::try_from(route)?);
    }
    Ok(builder.build())
}

/// HTTP front end for a shared radix router.
pub struct HttpServer {
    app: AxumRouter,
}

impl HttpServer {
    pub fn new(config: &ServerConfig, router: Arc<SharedRouter<RouteHandler>>) -> Self {
        let state = AppState { router };
        Self {
            app: Self::build_app(config, state),
        }
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, state: AppState) -> AxumRouter {
        let app = AxumRouter::new().fallback(dispatch).with_state(state);

        security_headers(&config.security_headers)
            .into_iter()
            .fold(app, |app, (name, value)| {
                app.layer(SetResponseHeaderLayer::if_not_present(name, value))
            })
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The app as a tower service, for embedding or in-process tests.
    pub fn app(&self) -> AxumRouter {
        self.app.clone()
    }

    /// Serve connections from `listener` until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Typed security headers. Values rejected by validation are skipped.
fn security_headers(config: &SecurityHeadersConfig) -> Vec<(HeaderName, HeaderValue)> {
    config
        .headers()
        .into_iter()
        .filter_map(|(name, value)| match HeaderValue::from_str(value) {
            Ok(value) => Some((HeaderName::from_static(name), value)),
            Err(_) => {
                tracing::warn!(header = name, value, "Skipping invalid security header");
                None
            }
        })
        .collect()
}

/// Resolves every request through the radix tree.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let path = request.uri().path();
    let request_id = request_id(&request);

    let method = match HttpMethod::try_from(request.method()) {
        Ok(method) => method,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected request method");
            metrics::record_request(request.method().as_str(), "none", 405, start_time);
            return response::method_not_allowed();
        }
    };

    let router = state.router.load();
    // HEAD falls back to the GET route, answered without a body.
    let found = match router.find_route(method, path) {
        None if method == HttpMethod::Head => router.find_route(HttpMethod::Get, path),
        found => found,
    };
    match found {
        Some(found) => {
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                route = %found.pattern,
                params = ?found.params,
                "Route matched"
            );
            let mut response = found.handler.render(&found.params);
            if method == HttpMethod::Head {
                *response.body_mut() = Body::empty();
            }
            metrics::record_request(method.as_str(), found.pattern, response.status().as_u16(), start_time);
            response
        }
        None => {
            tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
            metrics::record_request(method.as_str(), "none", 404, start_time);
            response::not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_router_keeps_table_order() {
        let routes = vec![
            RouteConfig::new(HttpMethod::Get, "/users/new", "form"),
            RouteConfig::new(HttpMethod::Get, "/users/:id", "user {id}"),
        ];
        let router = build_router(&routes).unwrap();

        let found = router.find_route(HttpMethod::Get, "/users/new").unwrap();
        assert_eq!(found.handler.body(), "form");
        let found = router.find_route(HttpMethod::Get, "/users/7").unwrap();
        assert_eq!(found.pattern, "/users/:id");
    }

    #[test]
    fn test_build_router_rejects_bad_status() {
        let mut route = RouteConfig::new(HttpMethod::Get, "/", "");
        route.status = 5;
        assert_eq!(build_router(&[route]).unwrap_err(), InvalidResponse::Status(5));
    }
}
