//! Radix tree HTTP router.
//!
//! Routes are registered as `(method, path, handler)` triples, compacted
//! once, and then resolved per request in time proportional to the path
//! length. Paths support literal segments, `:name` parameters and trailing
//! `*` / `*name` wildcards; overlapping registrations resolve by
//! registration order.
//!
//! ```
//! use radix_router::routing::{HttpMethod, Router};
//!
//! let router = Router::builder()
//!     .get("/users/new", "new-user form")
//!     .get("/users/:id", "user page")
//!     .get("/files/*", "file server")
//!     .build();
//!
//! let found = router.find_route(HttpMethod::Get, "/users/42").unwrap();
//! assert_eq!(*found.handler, "user page");
//! assert_eq!(found.params.get("id"), Some("42"));
//!
//! assert!(router.find_route(HttpMethod::Post, "/users/42").is_none());
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use routing::{HttpMethod, RadixTree, Router, SharedRouter};
