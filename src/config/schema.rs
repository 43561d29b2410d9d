//! Configuration schema definitions.
//!
//! This module defines the route table file format. All types derive Serde
//! traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::routing::HttpMethod;

/// Root configuration: server settings plus the route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Routes, in registration (and therefore precedence) order.
    pub routes: Vec<RouteConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Security headers added to every response.
    pub security_headers: SecurityHeadersConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            security_headers: SecurityHeadersConfig::default(),
        }
    }
}

/// Response security headers.
///
/// Each value is sent only when the response does not already carry the
/// header. An empty value omits the header.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityHeadersConfig {
    /// Disable to send none of the headers below.
    pub enabled: bool,

    pub content_security_policy: String,
    pub cross_origin_embedder_policy: String,
    pub cross_origin_opener_policy: String,
    pub cross_origin_resource_policy: String,
    pub referrer_policy: String,
    pub strict_transport_security: String,
    pub x_content_type_options: String,
    pub x_download_options: String,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            content_security_policy: String::new(),
            cross_origin_embedder_policy: String::new(),
            cross_origin_opener_policy: "same-origin".to_string(),
            cross_origin_resource_policy: "same-site".to_string(),
            referrer_policy: "no-referrer".to_string(),
            strict_transport_security: "max-age=31536000; includeSubDomains".to_string(),
            x_content_type_options: "nosniff".to_string(),
            x_download_options: "noopen".to_string(),
        }
    }
}

impl SecurityHeadersConfig {
    /// `(header name, value)` pairs to send, in a fixed order. Empty when
    /// disabled.
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        if !self.enabled {
            return Vec::new();
        }
        [
            ("content-security-policy", &self.content_security_policy),
            ("cross-origin-embedder-policy", &self.cross_origin_embedder_policy),
            ("cross-origin-opener-policy", &self.cross_origin_opener_policy),
            ("cross-origin-resource-policy", &self.cross_origin_resource_policy),
            ("referrer-policy", &self.referrer_policy),
            ("strict-transport-security", &self.strict_transport_security),
            ("x-content-type-options", &self.x_content_type_options),
            ("x-download-options", &self.x_download_options),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (name, value.as_str()))
        .collect()
    }
}

/// Log output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Prometheus endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// One route and the static response it serves.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    pub method: HttpMethod,

    /// Route pattern, e.g. `/users/:id` or `/static/*path`.
    pub path: String,

    /// Response status code.
    #[serde(default = "default_status")]
    pub status: u16,

    /// Response body; `{name}` is replaced by the captured parameter.
    #[serde(default)]
    pub body: String,

    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_status() -> u16 {
    200
}

fn default_content_type() -> String {
    "text/plain; charset=utf-8".to_string()
}

impl RouteConfig {
    pub fn new(method: HttpMethod, path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            status: default_status(),
            body: body.into(),
            content_type: default_content_type(),
        }
    }
}
