//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Collect registrations during setup
//! - Freeze the optimized tree for lookups
//! - Publish rebuilt routers to concurrent readers
//!
//! # Design Decisions
//! - `RouterBuilder` is the only type that can register routes
//! - `Router` has no mutating methods (thread-safe without locks)
//! - Reload builds a new `Router` aside and swaps it in atomically
//! - Explicit `None` for no match rather than a silent default

use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};

use crate::routing::matcher::RouteMatch;
use crate::routing::method::HttpMethod;
use crate::routing::node::Binding;
use crate::routing::tree::RadixTree;

/// Setup-phase handle: register routes, then `build`.
#[derive(Debug)]
pub struct RouterBuilder<H> {
    tree: RadixTree<H>,
    registered: usize,
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouterBuilder<H> {
    pub fn new() -> Self {
        Self {
            tree: RadixTree::new(),
            registered: 0,
        }
    }

    pub fn route(mut self, method: HttpMethod, path: &str, handler: H) -> Self {
        self.add_route(method, path, handler);
        self
    }

    pub fn add_route(&mut self, method: HttpMethod, path: &str, handler: H) -> &mut Self {
        self.tree.add_route(method, path, handler);
        self.registered += 1;
        self
    }

    pub fn get(self, path: &str, handler: H) -> Self {
        self.route(HttpMethod::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: H) -> Self {
        self.route(HttpMethod::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: H) -> Self {
        self.route(HttpMethod::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: H) -> Self {
        self.route(HttpMethod::Delete, path, handler)
    }

    pub fn patch(self, path: &str, handler: H) -> Self {
        self.route(HttpMethod::Patch, path, handler)
    }

    /// Optimizes the tree and freezes it.
    pub fn build(mut self) -> Router<H> {
        self.tree.optimize_tree();
        let router = Router { tree: self.tree };
        tracing::info!(
            registered = self.registered,
            routes = router.len(),
            nodes = router.tree.node_count(),
            "Router built"
        );
        router
    }
}

/// An optimized, read-only route tree.
#[derive(Debug, Clone)]
pub struct Router<H> {
    tree: RadixTree<H>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        RouterBuilder::new().build()
    }
}

impl<H> Router<H> {
    pub fn builder() -> RouterBuilder<H> {
        RouterBuilder::new()
    }

    pub fn find_route<'t>(&'t self, method: HttpMethod, path: &str) -> Option<RouteMatch<'t, H>> {
        self.tree.find_route(method, path)
    }

    pub fn routes(&self) -> Vec<&Binding<H>> {
        self.tree.routes()
    }

    /// Distinct routes, after duplicate registrations collapsed.
    pub fn len(&self) -> usize {
        self.tree.routes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tree(&self) -> &RadixTree<H> {
        &self.tree
    }
}

/// A `Router` that can be replaced while requests are being served.
///
/// Readers `load` a snapshot and keep it for the whole lookup; `replace`
/// never disturbs a snapshot already handed out.
#[derive(Debug)]
pub struct SharedRouter<H> {
    current: ArcSwap<Router<H>>,
}

impl<H> SharedRouter<H> {
    pub fn new(router: Router<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    pub fn load(&self) -> Guard<Arc<Router<H>>> {
        self.current.load()
    }

    pub fn snapshot(&self) -> Arc<Router<H>> {
        self.current.load_full()
    }

    pub fn replace(&self, router: Router<H>) {
        let routes = router.len();
        self.current.store(Arc::new(router));
        tracing::info!(routes, "Router replaced");
    }
}
