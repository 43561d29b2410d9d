//! Shared utilities for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use tower::ServiceExt;

use radix_router::config::{RouteConfig, ServerConfig};
use radix_router::http::{build_router, HttpServer, RouteHandler};
use radix_router::routing::{HttpMethod, SharedRouter};

/// A shared router built from `routes`, as the server binary would build it.
pub fn shared_router(routes: &[RouteConfig]) -> Arc<SharedRouter<RouteHandler>> {
    Arc::new(SharedRouter::new(build_router(routes).unwrap()))
}

pub fn server(router: Arc<SharedRouter<RouteHandler>>) -> HttpServer {
    HttpServer::new(&ServerConfig::default(), router)
}

pub fn route(method: HttpMethod, path: &str, body: &str) -> RouteConfig {
    RouteConfig::new(method, path, body)
}

/// Sends one request through the app in-process.
pub async fn send(server: &HttpServer, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    server.app().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
