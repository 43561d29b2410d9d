//! Response rendering for matched and unmatched requests.
//!
//! # Responsibilities
//! - Turn a route's configured status, content type and body into a response
//! - Substitute captured path parameters into the body
//! - Produce the 404 / 405 fallbacks
//!
//! # Design Decisions
//! - Handlers are validated once, when the router is built, so rendering
//!   cannot fail per request

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::RouteConfig;
use crate::routing::Params;

/// Rejected while converting a `RouteConfig` into a handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidResponse {
    #[error("{0} is not a valid status code")]
    Status(u16),
    #[error("{0:?} is not a valid content type")]
    ContentType(String),
}

/// The handler type stored in the radix tree: a static response template.
#[derive(Debug, Clone)]
pub struct RouteHandler {
    status: StatusCode,
    content_type: HeaderValue,
    body: String,
}

impl RouteHandler {
    pub fn new(status: StatusCode, content_type: HeaderValue, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn render(&self, params: &Params) -> Response {
        let body = render_template(&self.body, params);
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type.clone())],
            Body::from(body),
        )
            .into_response()
    }
}

impl TryFrom<&RouteConfig> for RouteHandler {
    type Error = InvalidResponse;

    fn try_from(route: &RouteConfig) -> Result<Self, Self::Error> {
        let status = StatusCode::from_u16(route.status).map_err(|_| InvalidResponse::Status(route.status))?;
        let content_type = HeaderValue::from_str(&route.content_type)
            .map_err(|_| InvalidResponse::ContentType(route.content_type.clone()))?;
        Ok(Self::new(status, content_type, route.body.clone()))
    }
}

/// Replaces each `{name}` in `template` with the captured value.
///
/// Single pass over the template: substituted values are never rescanned.
/// Placeholders naming no capture are kept verbatim.
pub fn render_template(template: &str, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };
        let name = &after[..close];
        match params.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "No matching route found").into_response()
}

pub fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not supported").into_response()
}
