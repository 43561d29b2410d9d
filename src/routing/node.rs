//! Vertices of the route tree.
//!
//! # Responsibilities
//! - Classify raw path segments into literal, parameter and wildcard kinds
//! - Hold a node's label, ordered children and optional handler binding
//!
//! # Design Decisions
//! - A label is a list of typed segments, not a string. A compacted node
//!   simply holds more than one segment.
//! - Children are a `Vec`: insertion order is matching precedence.
//! - At most one binding per node; other methods on the same shape live in
//!   sibling nodes.

use std::fmt;

use crate::routing::method::HttpMethod;

pub const PARAMETER_MARKER: char = ':';
pub const WILDCARD_MARKER: char = '*';

/// Capture name used for an anonymous `*` wildcard.
pub const WILDCARD_NAME: &str = "*";

/// One `/`-delimited piece of a route label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matched by exact text equality.
    Literal(String),
    /// Binds any single non-empty segment under the given name.
    Parameter(String),
    /// Binds the rest of the path, or one segment when more label follows.
    Wildcard(String),
}

impl Segment {
    /// Classifies a raw, non-empty segment from a registered path.
    pub fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix(PARAMETER_MARKER) {
            Segment::Parameter(name.to_string())
        } else if let Some(name) = raw.strip_prefix(WILDCARD_MARKER) {
            let name = if name.is_empty() { WILDCARD_NAME } else { name };
            Segment::Wildcard(name.to_string())
        } else {
            Segment::Literal(raw.to_string())
        }
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Segment::Parameter(_))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Parameter(name) => write!(f, "{}{}", PARAMETER_MARKER, name),
            Segment::Wildcard(name) if name == WILDCARD_NAME => f.write_str(WILDCARD_NAME),
            Segment::Wildcard(name) => write!(f, "{}{}", WILDCARD_MARKER, name),
        }
    }
}

/// Splits a path into classified segments, dropping empty pieces so that
/// `//a///b/` and `/a/b` register the same shape.
pub fn parse_path(path: &str) -> Vec<Segment> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(Segment::parse)
        .collect()
}

/// A handler bound to a node for one method.
#[derive(Debug, Clone)]
pub struct Binding<H> {
    pub method: HttpMethod,
    pub handler: H,
    /// The path string the route was registered with.
    pub pattern: String,
}

/// A vertex in the route tree.
#[derive(Debug, Clone)]
pub struct Node<H> {
    pub(crate) segments: Vec<Segment>,
    pub(crate) children: Vec<Node<H>>,
    pub(crate) binding: Option<Binding<H>>,
}

impl<H> Node<H> {
    pub(crate) fn root() -> Self {
        Self::with_segments(Vec::new())
    }

    pub(crate) fn with_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            children: Vec::new(),
            binding: None,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn children(&self) -> &[Node<H>] {
        &self.children
    }

    pub fn binding(&self) -> Option<&Binding<H>> {
        self.binding.as_ref()
    }

    pub fn method(&self) -> Option<HttpMethod> {
        self.binding.as_ref().map(|b| b.method)
    }

    pub fn handler(&self) -> Option<&H> {
        self.binding.as_ref().map(|b| &b.handler)
    }

    /// True when the node's label starts with a parameter segment.
    pub fn is_parameter_node(&self) -> bool {
        self.segments.first().is_some_and(Segment::is_parameter)
    }

    /// The label as text: segments joined by `/`, or `/` for an empty label.
    pub fn label(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Whether this node may be reused by a registration of `method`.
    pub(crate) fn accepts_method(&self, method: HttpMethod) -> bool {
        self.method().map_or(true, |bound| bound == method)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}
