//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route patterns are well formed
//! - Validate value ranges (status codes, timeouts, addresses)
//! - Detect duplicate routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::http::{HeaderValue, StatusCode};

use crate::config::schema::RouterConfig;
use crate::routing::node::{parse_path, Segment, WILDCARD_MARKER};
use crate::routing::HttpMethod;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("route {index}: path {path:?} must start with '/'")]
    PathNotAbsolute { index: usize, path: String },

    #[error("route {index}: path {path:?} has a parameter without a name")]
    EmptyParameterName { index: usize, path: String },

    #[error("route {index}: path {path:?} has '*' inside a segment")]
    MisplacedWildcard { index: usize, path: String },

    #[error("route {index}: {status} is not a valid status code")]
    InvalidStatus { index: usize, status: u16 },

    #[error("route {index}: {content_type:?} is not a valid content type")]
    InvalidContentType { index: usize, content_type: String },

    #[error("route {index}: {method} {path} duplicates route {first}")]
    DuplicateRoute {
        index: usize,
        first: usize,
        method: HttpMethod,
        path: String,
    },

    #[error("{field}: {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("server.security_headers: {value:?} is not a valid {header} value")]
    InvalidHeaderValue { header: &'static str, value: String },
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    for (header, value) in config.server.security_headers.headers() {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidHeaderValue { header, value: value.to_string() });
        }
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen: HashMap<(HttpMethod, String), usize> = HashMap::new();
    for (index, route) in config.routes.iter().enumerate() {
        let path = &route.path;

        if !path.starts_with('/') {
            errors.push(ValidationError::PathNotAbsolute { index, path: path.clone() });
        }
        if path
            .split('/')
            .any(|raw| raw.chars().skip(1).any(|c| c == WILDCARD_MARKER))
        {
            errors.push(ValidationError::MisplacedWildcard { index, path: path.clone() });
        }

        let segments = parse_path(path);
        if segments.iter().any(|s| matches!(s, Segment::Parameter(name) if name.is_empty())) {
            errors.push(ValidationError::EmptyParameterName { index, path: path.clone() });
        }

        if StatusCode::from_u16(route.status).is_err() {
            errors.push(ValidationError::InvalidStatus { index, status: route.status });
        }
        if HeaderValue::from_str(&route.content_type).is_err() {
            errors.push(ValidationError::InvalidContentType {
                index,
                content_type: route.content_type.clone(),
            });
        }

        let shape = segments.iter().map(ToString::to_string).collect::<Vec<_>>().join("/");
        if let Some(&first) = seen.get(&(route.method, shape.clone())) {
            errors.push(ValidationError::DuplicateRoute {
                index,
                first,
                method: route.method,
                path: path.clone(),
            });
        } else {
            seen.insert((route.method, shape), index);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
