//! Behavioural tests for the radix tree: registration, compaction and
//! lookup observed through the public API only.

use std::collections::HashMap;

use proptest::prelude::*;

use radix_router::routing::{HttpMethod, Params, RadixTree, Router};

fn lookup(tree: &RadixTree<&'static str>, method: HttpMethod, path: &str) -> Option<&'static str> {
    tree.find_route(method, path).map(|m| *m.handler)
}

fn optimized(routes: &[(HttpMethod, &str, &'static str)]) -> RadixTree<&'static str> {
    let mut tree = RadixTree::new();
    for (method, path, handler) in routes {
        tree.add_route(*method, path, *handler);
    }
    tree.optimize_tree();
    tree
}

#[test]
fn sibling_literals_are_independent() {
    let tree = optimized(&[
        (HttpMethod::Get, "/a/b", "ab"),
        (HttpMethod::Get, "/a/c", "ac"),
    ]);

    assert_eq!(lookup(&tree, HttpMethod::Get, "/a/b"), Some("ab"));
    assert_eq!(lookup(&tree, HttpMethod::Get, "/a/c"), Some("ac"));
    assert_eq!(lookup(&tree, HttpMethod::Get, "/a/x"), None);
}

#[test]
fn parameter_route_needs_its_segment() {
    let tree = optimized(&[(HttpMethod::Get, "/users/:id", "user")]);

    let found = tree.find_route(HttpMethod::Get, "/users/42").unwrap();
    assert_eq!(*found.handler, "user");
    assert_eq!(found.params.get("id"), Some("42"));
    assert_eq!(lookup(&tree, HttpMethod::Get, "/users"), None);
}

#[test]
fn wildcard_absorbs_all_remaining_segments() {
    let tree = optimized(&[(HttpMethod::Get, "/files/*", "files")]);

    let found = tree.find_route(HttpMethod::Get, "/files/a/b/c").unwrap();
    assert_eq!(*found.handler, "files");
    assert_eq!(found.params.get("*"), Some("a/b/c"));
}

#[test]
fn methods_on_same_path_do_not_overwrite() {
    let tree = optimized(&[
        (HttpMethod::Get, "/a", "get"),
        (HttpMethod::Post, "/a", "post"),
    ]);

    assert_eq!(lookup(&tree, HttpMethod::Get, "/a"), Some("get"));
    assert_eq!(lookup(&tree, HttpMethod::Post, "/a"), Some("post"));
}

#[test]
fn last_registration_wins() {
    let tree = optimized(&[
        (HttpMethod::Get, "/a", "first"),
        (HttpMethod::Get, "/a", "second"),
    ]);

    assert_eq!(lookup(&tree, HttpMethod::Get, "/a"), Some("second"));
}

#[test]
fn overlapping_shapes_resolve_by_registration_order() {
    let literal_first = optimized(&[
        (HttpMethod::Get, "/users/new", "new"),
        (HttpMethod::Get, "/users/:id", "show"),
    ]);
    assert_eq!(lookup(&literal_first, HttpMethod::Get, "/users/new"), Some("new"));
    assert_eq!(lookup(&literal_first, HttpMethod::Get, "/users/7"), Some("show"));

    let parameter_first = optimized(&[
        (HttpMethod::Get, "/users/:id", "show"),
        (HttpMethod::Get, "/users/new", "new"),
    ]);
    assert_eq!(lookup(&parameter_first, HttpMethod::Get, "/users/new"), Some("show"));
}

#[test]
fn compaction_shrinks_the_tree() {
    let mut tree = RadixTree::new();
    tree.add_route(HttpMethod::Get, "/api/v1/accounts/:id/settings", "settings");
    tree.add_route(HttpMethod::Get, "/api/v1/health", "health");
    let before = tree.node_count();

    tree.optimize_tree();

    assert!(tree.node_count() < before);
    assert_eq!(lookup(&tree, HttpMethod::Get, "/api/v1/accounts/9/settings"), Some("settings"));
    assert_eq!(lookup(&tree, HttpMethod::Get, "/api/v1/health"), Some("health"));
}

#[test]
fn router_facade_matches_tree_behaviour() {
    let router = Router::builder()
        .get("/", "home")
        .post("/", "submit")
        .put("/items/:id", "replace")
        .patch("/items/:id", "update")
        .delete("/items/:id", "remove")
        .build();

    let expected = [
        (HttpMethod::Get, "/", "home"),
        (HttpMethod::Post, "/", "submit"),
        (HttpMethod::Put, "/items/1", "replace"),
        (HttpMethod::Patch, "/items/1", "update"),
        (HttpMethod::Delete, "/items/1", "remove"),
    ];
    for (method, path, handler) in expected {
        assert_eq!(router.find_route(method, path).map(|m| *m.handler), Some(handler));
    }
    assert!(router.find_route(HttpMethod::Get, "/items/1").is_none());
}

fn method() -> impl Strategy<Value = HttpMethod> {
    prop_oneof![Just(HttpMethod::Get), Just(HttpMethod::Post)]
}

fn path_from(segments: Vec<&'static str>) -> String {
    format!("/{}", segments.join("/"))
}

fn literal_path() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 0..4).prop_map(path_from)
}

fn pattern_path() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", ":x", ":y", "*", "*rest"]), 0..4)
        .prop_map(path_from)
}

fn request_path() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "9"]), 0..5).prop_map(path_from)
}

fn outcome(tree: &RadixTree<usize>, method: HttpMethod, path: &str) -> Option<(usize, Params)> {
    tree.find_route(method, path).map(|m| (*m.handler, m.params))
}

proptest! {
    #[test]
    fn registered_literal_routes_are_found(routes in prop::collection::vec((method(), literal_path()), 1..12)) {
        let mut tree = RadixTree::new();
        let mut expected = HashMap::new();
        for (index, (method, path)) in routes.iter().enumerate() {
            tree.add_route(*method, path, index);
            expected.insert((*method, path.clone()), index);
        }
        tree.optimize_tree();

        for ((method, path), index) in expected {
            prop_assert_eq!(tree.find_route(method, &path).map(|m| *m.handler), Some(index));
        }
    }

    #[test]
    fn compaction_preserves_lookups(
        routes in prop::collection::vec((method(), pattern_path()), 1..10),
        requests in prop::collection::vec((method(), request_path()), 1..20),
    ) {
        let mut tree = RadixTree::new();
        for (index, (method, path)) in routes.iter().enumerate() {
            tree.add_route(*method, path, index);
        }
        let mut compacted = tree.clone();
        compacted.optimize_tree();

        for (method, path) in &requests {
            prop_assert_eq!(outcome(&tree, *method, path), outcome(&compacted, *method, path));
        }
    }
}
