//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     (method, path, handler)*
//!     → tree.rs add_route (grow tree, share prefixes)
//!     → tree.rs optimize_tree (merge branchless chains)
//!     → router.rs (freeze as immutable Router)
//!
//! Incoming Request (method, path)
//!     → router.rs (snapshot of current Router)
//!     → matcher.rs (segment walk, first viable branch wins)
//!     → Return: RouteMatch { handler, params } or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Lookup cost follows path length, not route count
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod matcher;
pub mod method;
pub mod node;
pub mod params;
pub mod router;
pub mod tree;

pub use matcher::{first_match, RouteMatch};
pub use method::{HttpMethod, UnknownMethod};
pub use node::{Binding, Node, Segment};
pub use params::Params;
pub use router::{Router, RouterBuilder, SharedRouter};
pub use tree::RadixTree;
