//! Route tree construction and compaction.
//!
//! # Responsibilities
//! - Grow the tree as routes are registered, sharing prefixes
//! - Compact branchless chains once registration is finished
//! - Delegate lookups to the matcher
//!
//! # Design Decisions
//! - Registration reuses a child when its label matches and it is either
//!   unbound or bound to the same method
//! - Re-registering an existing `(method, path)` overwrites its handler
//! - Compaction consumes the old subtree and rebuilds merged nodes
//! - Compaction never merges a bound node, or the root

use std::fmt;

use crate::routing::matcher::{self, RouteMatch};
use crate::routing::method::HttpMethod;
use crate::routing::node::{parse_path, Binding, Node, Segment};

/// A compressed prefix tree of routes.
#[derive(Debug, Clone)]
pub struct RadixTree<H> {
    root: Node<H>,
}

impl<H> Default for RadixTree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RadixTree<H> {
    pub fn new() -> Self {
        Self { root: Node::root() }
    }

    pub fn root(&self) -> &Node<H> {
        &self.root
    }

    /// Registers `handler` for `method` on `path`.
    ///
    /// Empty segments are discarded, so `/a//b/` registers `/a/b`. The bare
    /// path `/` is stored in a zero-segment child of the root, one per
    /// method.
    pub fn add_route(&mut self, method: HttpMethod, path: &str, handler: H) {
        let mut labels: Vec<Vec<Segment>> = parse_path(path)
            .into_iter()
            .map(|segment| vec![segment])
            .collect();
        if labels.is_empty() {
            labels.push(Vec::new());
        }

        let binding = Binding {
            method,
            handler,
            pattern: path.to_string(),
        };

        if let Some(existing) = self.registered_node_mut(&labels, method) {
            tracing::debug!(method = %method, path = %path, "Route re-registered, handler replaced");
            existing.binding = Some(binding);
            return;
        }

        let mut current = &mut self.root;
        for label in labels {
            current = child_for(current, label, method);
        }
        current.binding = Some(binding);

        tracing::debug!(method = %method, path = %path, "Route registered");
    }

    /// Collapses every unbound node that has exactly one child into that
    /// child, shortening lookups without changing what they return.
    pub fn optimize_tree(&mut self) {
        let nodes_before = self.root.count();
        let children = std::mem::take(&mut self.root.children);
        self.root.children = children.into_iter().map(compact).collect();

        tracing::debug!(
            nodes_before,
            nodes_after = self.root.count(),
            "Route tree optimized"
        );
    }

    /// Resolves `path` for `method`, or `None` when nothing matches.
    pub fn find_route<'t>(&'t self, method: HttpMethod, path: &str) -> Option<RouteMatch<'t, H>> {
        matcher::find(&self.root, method, path)
    }

    /// Every binding in the tree, depth first in matching order.
    pub fn routes(&self) -> Vec<&Binding<H>> {
        let mut out = Vec::new();
        collect_bindings(&self.root, &mut out);
        out
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Finds the node already holding `method` on exactly this label path,
    /// searching in matching order.
    fn registered_node_mut(&mut self, labels: &[Vec<Segment>], method: HttpMethod) -> Option<&mut Node<H>> {
        let mut trail = Vec::with_capacity(labels.len());
        if !locate(&self.root, labels, method, &mut trail) {
            return None;
        }
        let mut current = &mut self.root;
        for index in trail {
            current = &mut current.children[index];
        }
        Some(current)
    }
}

fn child_for<H>(parent: &mut Node<H>, label: Vec<Segment>, method: HttpMethod) -> &mut Node<H> {
    let existing = parent
        .children
        .iter()
        .position(|child| child.segments == label && child.accepts_method(method));

    let index = match existing {
        Some(index) => index,
        None => {
            parent.children.push(Node::with_segments(label));
            parent.children.len() - 1
        }
    };
    &mut parent.children[index]
}

fn locate<H>(node: &Node<H>, labels: &[Vec<Segment>], method: HttpMethod, trail: &mut Vec<usize>) -> bool {
    let Some((label, rest)) = labels.split_first() else {
        return node.method() == Some(method);
    };
    for (index, child) in node.children.iter().enumerate() {
        if child.segments != *label {
            continue;
        }
        trail.push(index);
        if locate(child, rest, method, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

fn can_absorb_child<H>(node: &Node<H>) -> bool {
    node.binding.is_none() && node.children.len() == 1 && !node.segments.is_empty()
}

fn compact<H>(mut node: Node<H>) -> Node<H> {
    while can_absorb_child(&node) {
        let Some(child) = node.children.pop() else {
            break;
        };
        node.segments.extend(child.segments);
        node.children = child.children;
        node.binding = child.binding;
    }
    node.children = node.children.into_iter().map(compact).collect();
    node
}

fn collect_bindings<'t, H>(node: &'t Node<H>, out: &mut Vec<&'t Binding<H>>) {
    if let Some(binding) = node.binding() {
        out.push(binding);
    }
    for child in node.children() {
        collect_bindings(child, out);
    }
}

fn write_node<H>(f: &mut fmt::Formatter<'_>, node: &Node<H>, depth: usize) -> fmt::Result {
    write!(f, "{}{}", "  ".repeat(depth), node.label())?;
    if let Some(method) = node.method() {
        write!(f, " [{}]", method)?;
    }
    writeln!(f)?;
    for child in node.children() {
        write_node(f, child, depth + 1)?;
    }
    Ok(())
}

impl<H> fmt::Display for RadixTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, &self.root, 0)
    }
}
