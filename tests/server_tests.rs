//! HTTP host tests: the axum app dispatching through the radix router.

use std::time::Duration;

use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use radix_router::config::{RouteConfig, ServerConfig};
use radix_router::http::{build_router, HttpServer};
use radix_router::routing::HttpMethod;

mod common;

#[tokio::test]
async fn test_matched_route_renders_params() {
    let router = common::shared_router(&[
        common::route(HttpMethod::Get, "/users/:id", "user {id}"),
        common::route(HttpMethod::Get, "/files/*path", "file {path}"),
    ]);
    let server = common::server(router);

    let res = common::send(&server, "GET", "/users/42").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
    assert_eq!(common::body_text(res).await, "user 42");

    let res = common::send(&server, "GET", "/files/docs/readme.md").await;
    assert_eq!(common::body_text(res).await, "file docs/readme.md");
}

#[tokio::test]
async fn test_captured_values_are_not_substituted_twice() {
    let server = common::server(common::shared_router(&[common::route(
        HttpMethod::Get,
        "/a/:x/:y",
        "{x}|{y}",
    )]));

    let res = common::send(&server, "GET", "/a/{y}/zzz").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::body_text(res).await, "{y}|zzz");

    let res = common::send(&server, "GET", "/a/%7By%7D/zzz").await;
    assert_eq!(common::body_text(res).await, "{y}|zzz");
}

#[tokio::test]
async fn test_configured_status_and_content_type() {
    let mut created = RouteConfig::new(HttpMethod::Post, "/users", r#"{"created":true}"#);
    created.status = 201;
    created.content_type = "application/json".into();
    let server = common::server(common::shared_router(&[created]));

    let res = common::send(&server, "POST", "/users").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/json");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = common::server(common::shared_router(&[common::route(
        HttpMethod::Get,
        "/users/:id",
        "",
    )]));

    assert_eq!(common::send(&server, "GET", "/users").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::send(&server, "GET", "/other").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::send(&server, "DELETE", "/users/1").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let server = common::server(common::shared_router(&[common::route(HttpMethod::Get, "/", "home")]));
    let res = common::send(&server, "TRACE", "/").await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_head_falls_back_to_get_route() {
    let server = common::server(common::shared_router(&[
        common::route(HttpMethod::Get, "/page", "content"),
        common::route(HttpMethod::Head, "/status", "ignored"),
        common::route(HttpMethod::Post, "/form", ""),
    ]));

    let res = common::send(&server, "HEAD", "/page").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
    assert!(common::body_text(res).await.is_empty());

    let res = common::send(&server, "HEAD", "/status").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(common::body_text(res).await.is_empty());

    assert_eq!(common::send(&server, "HEAD", "/form").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_default_security_headers() {
    let server = common::server(common::shared_router(&[common::route(HttpMethod::Get, "/", "home")]));

    for path in ["/", "/missing"] {
        let res = common::send(&server, "GET", path).await;
        let headers = res.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-download-options"], "noopen");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert_eq!(headers["cross-origin-opener-policy"], "same-origin");
        assert_eq!(headers["cross-origin-resource-policy"], "same-site");
        assert_eq!(headers["strict-transport-security"], "max-age=31536000; includeSubDomains");
        assert!(!headers.contains_key("content-security-policy"));
        assert!(!headers.contains_key("cross-origin-embedder-policy"));
    }
}

#[tokio::test]
async fn test_configured_security_headers() {
    let router = common::shared_router(&[common::route(HttpMethod::Get, "/", "home")]);

    let mut config = ServerConfig::default();
    config.security_headers.content_security_policy = "default-src 'self'; report-to endpoint-5".into();
    config.security_headers.cross_origin_embedder_policy = "require-corp".into();
    config.security_headers.x_download_options = String::new();
    let server = HttpServer::new(&config, router.clone());

    let res = common::send(&server, "GET", "/").await;
    assert_eq!(res.headers()["content-security-policy"], "default-src 'self'; report-to endpoint-5");
    assert_eq!(res.headers()["cross-origin-embedder-policy"], "require-corp");
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert!(!res.headers().contains_key("x-download-options"));

    let mut config = ServerConfig::default();
    config.security_headers.enabled = false;
    let server = HttpServer::new(&config, router);

    let res = common::send(&server, "GET", "/").await;
    assert!(!res.headers().contains_key("x-content-type-options"));
    assert!(!res.headers().contains_key("strict-transport-security"));
}

#[tokio::test]
async fn test_query_string_is_not_part_of_the_path() {
    let server = common::server(common::shared_router(&[common::route(HttpMethod::Get, "/search", "ok")]));
    let res = common::send(&server, "GET", "/search?q=radix").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let server = common::server(common::shared_router(&[common::route(HttpMethod::Get, "/", "home")]));

    let res = common::send(&server, "GET", "/").await;
    let generated = res.headers()["x-request-id"].to_str().unwrap().to_string();
    assert_eq!(generated.len(), 36);

    let request = axum::http::Request::builder()
        .uri("/")
        .header("x-request-id", "client-id-1")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = tower::ServiceExt::oneshot(server.app(), request).await.unwrap();
    assert_eq!(res.headers()["x-request-id"], "client-id-1");
}

#[tokio::test]
async fn test_replaced_router_serves_new_routes() {
    let shared = common::shared_router(&[common::route(HttpMethod::Get, "/v1", "one")]);
    let server = common::server(shared.clone());

    assert_eq!(common::send(&server, "GET", "/v1").await.status(), StatusCode::OK);

    shared.replace(build_router(&[common::route(HttpMethod::Get, "/v2", "two")]).unwrap());

    assert_eq!(common::send(&server, "GET", "/v1").await.status(), StatusCode::NOT_FOUND);
    let res = common::send(&server, "GET", "/v2").await;
    assert_eq!(common::body_text(res).await, "two");
}

#[tokio::test]
async fn test_serves_over_tcp_until_shutdown() {
    let server = common::server(common::shared_router(&[common::route(HttpMethod::Get, "/ping", "pong")]));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run(listener, async move {
        let _ = stop_rx.await;
    }));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /ping HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200 OK"), "unexpected response: {}", raw);
    assert!(raw.ends_with("pong"));

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
    assert!(result.expect("server did not shut down").unwrap().is_ok());
}
