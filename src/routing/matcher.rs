//! Route matching logic.
//!
//! # Responsibilities
//! - Walk the tree over the request path's segments
//! - Capture parameter and wildcard values along the way
//! - Pick the first viable branch in registration order
//!
//! # Design Decisions
//! - Dispatch on `Segment` kind, never on label text
//! - The method is checked only at the terminal node; prefixes are shared
//! - A failed branch drops everything it captured before the next sibling
//!   is tried
//! - Request paths drop empty segments, same as registered paths
//! - Literals compare against the raw segment; captured values are
//!   percent-decoded

use crate::routing::method::HttpMethod;
use crate::routing::node::{Node, Segment};
use crate::routing::params::Params;

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'t, H> {
    pub handler: &'t H,
    pub method: HttpMethod,
    /// The path the matched route was registered with.
    pub pattern: &'t str,
    pub params: Params,
}

/// Tries `candidates` in order and returns the first success.
///
/// This is the whole precedence policy: earliest registration wins, no
/// specificity scoring.
pub fn first_match<'t, T, R>(
    candidates: &'t [T],
    attempt: impl FnMut(&'t T) -> Option<R>,
) -> Option<R> {
    candidates.iter().find_map(attempt)
}

pub(crate) fn find<'t, H>(root: &'t Node<H>, method: HttpMethod, path: &str) -> Option<RouteMatch<'t, H>> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut params = Params::new();

    let node = match_node(root, &segments, method, &mut params)?;
    let binding = node.binding()?;

    Some(RouteMatch {
        handler: &binding.handler,
        method,
        pattern: &binding.pattern,
        params,
    })
}

fn match_node<'t, H>(
    node: &'t Node<H>,
    path: &[&str],
    method: HttpMethod,
    params: &mut Params,
) -> Option<&'t Node<H>> {
    let mark = params.len();
    let found = descend(node, path, method, params);
    if found.is_none() {
        params.truncate(mark);
    }
    found
}

fn descend<'t, H>(
    node: &'t Node<H>,
    path: &[&str],
    method: HttpMethod,
    params: &mut Params,
) -> Option<&'t Node<H>> {
    let mut rest = path;
    let last = node.segments.len().saturating_sub(1);

    for (index, segment) in node.segments.iter().enumerate() {
        match segment {
            Segment::Wildcard(name) if index == last => {
                return match_trailing_wildcard(node, name, rest, method, params);
            }
            Segment::Literal(text) => {
                let (head, tail) = rest.split_first()?;
                if *head != text.as_str() {
                    return None;
                }
                rest = tail;
            }
            // A wildcard followed by more label is bounded to one segment.
            Segment::Parameter(name) | Segment::Wildcard(name) => {
                let (head, tail) = rest.split_first()?;
                params.push(name, head);
                rest = tail;
            }
        }
    }

    if rest.is_empty() && is_bound_to(node, method) {
        return Some(node);
    }
    first_match(&node.children, |child| match_node(child, rest, method, params))
}

fn match_trailing_wildcard<'t, H>(
    node: &'t Node<H>,
    name: &str,
    rest: &[&str],
    method: HttpMethod,
    params: &mut Params,
) -> Option<&'t Node<H>> {
    if let Some((head, tail)) = rest.split_first() {
        if !node.children.is_empty() {
            let mark = params.len();
            params.push(name, head);
            let found = first_match(&node.children, |child| match_node(child, tail, method, params));
            if found.is_some() {
                return found;
            }
            params.truncate(mark);
        }
    }

    if is_bound_to(node, method) {
        params.push(name, &rest.join("/"));
        return Some(node);
    }
    None
}

fn is_bound_to<H>(node: &Node<H>, method: HttpMethod) -> bool {
    node.method() == Some(method)
}
