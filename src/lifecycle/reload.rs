//! Route table hot reload.
//!
//! # Responsibilities
//! - Rebuild the radix router for every validated route table
//! - Publish it through the shared router
//!
//! # Design Decisions
//! - The live tree is never mutated; a new one is built aside and swapped
//! - A table that fails to build leaves the current router in place

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::RouterConfig;
use crate::http::{build_router, RouteHandler};
use crate::observability::metrics;
use crate::routing::SharedRouter;

/// Applies updates until the sending side is dropped.
pub async fn apply_route_updates(
    mut updates: mpsc::UnboundedReceiver<RouterConfig>,
    router: Arc<SharedRouter<RouteHandler>>,
) {
    while let Some(config) = updates.recv().await {
        match build_router(&config.routes) {
            Ok(rebuilt) => {
                metrics::set_routes_loaded(rebuilt.len());
                router.replace(rebuilt);
            }
            Err(e) => {
                tracing::error!(error = %e, "Rejected route table, keeping current routes");
            }
        }
    }
    tracing::debug!("Route update channel closed");
}
