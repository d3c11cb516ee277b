//! Integration tests exercising the public facade/store surface end to end: the nine
//! testable invariants and concrete scenarios A-F.

use quadforest::{
    DefaultTermFactory, GraphName, NamedNode, Pattern, Quad, SharedIdListDataset, StoreFacade,
    Term,
};

const EX: &str = "http://example.org/";

fn iri(local: &str) -> String {
    format!("{EX}{local}")
}

fn nn(local: &str) -> Term {
    Term::NamedNode(NamedNode::new_unchecked(iri(local)))
}

fn quad(s: &str, p: &str, o: &str) -> Quad {
    Quad::new(
        NamedNode::new_unchecked(iri(s)),
        NamedNode::new_unchecked(iri(p)),
        Term::NamedNode(NamedNode::new_unchecked(iri(o))),
        GraphName::DefaultGraph,
    )
}

fn quad_in_graph(s: &str, p: &str, o: &str, g: &str) -> Quad {
    Quad::new(
        NamedNode::new_unchecked(iri(s)),
        NamedNode::new_unchecked(iri(p)),
        Term::NamedNode(NamedNode::new_unchecked(iri(o))),
        GraphName::NamedNode(NamedNode::new_unchecked(iri(g))),
    )
}

// Invariant 1: interner monotonicity, exercised through repeated inserts of the same
// term via the public facade.
#[test]
fn invariant_interning_is_stable_under_repeated_insertion() {
    let mut ds = SharedIdListDataset::new(DefaultTermFactory);
    let q = quad("alice", "knows", "bob");
    assert!(ds.add(q.clone()));
    assert!(!ds.add(q.clone())); // already present: no new insertion
    assert_eq!(ds.size(), 1);
}

// Invariant 3 + Scenario A: shared-subject quads round-trip and are matched together.
#[test]
fn scenario_a_shared_subject_quads_match_together() {
    let mut ds = SharedIdListDataset::new(DefaultTermFactory);
    ds.add(quad("alice", "knows", "bob"));
    ds.add(quad("alice", "knows", "carol"));
    ds.add(quad("dave", "knows", "carol"));

    let pattern = Pattern {
        subject: Some(nn("alice")),
        ..Default::default()
    };
    let matched = ds.match_quads(&pattern);
    assert_eq!(matched.to_array().len(), 2);
    for q in matched.to_array() {
        assert_eq!(q.subject.to_string(), format!("<{}>", iri("alice")));
    }
}

// Scenario B: delete_matches by predicate removes exactly the matching quads.
#[test]
fn scenario_b_delete_matches_by_predicate() {
    let mut ds = SharedIdListDataset::new(DefaultTermFactory);
    ds.add(quad("alice", "knows", "bob"));
    ds.add(quad("alice", "likes", "chocolate"));
    ds.add(quad("dave", "knows", "carol"));

    let pattern = Pattern {
        predicate: Some(nn("knows")),
        ..Default::default()
    };
    let removed = ds.delete_matches(&pattern);
    assert_eq!(removed, 2);
    assert_eq!(ds.size(), 1);
}

// Scenario C: the default graph is isolated from named graphs under a graph-bound pattern.
#[test]
fn scenario_c_default_graph_is_isolated_from_named_graphs() {
    let mut ds = SharedIdListDataset::new(DefaultTermFactory);
    ds.add(quad("alice", "knows", "bob"));
    ds.add(quad_in_graph("alice", "knows", "bob", "graph1"));

    let default_pattern = Pattern {
        graph: Some(Term::DefaultGraph),
        ..Default::default()
    };
    assert_eq!(ds.match_quads(&default_pattern).to_array().len(), 1);

    let named_pattern = Pattern {
        graph: Some(nn("graph1")),
        ..Default::default()
    };
    assert_eq!(ds.match_quads(&named_pattern).to_array().len(), 1);
    assert_eq!(ds.size(), 2);
}

// Scenario D: intersection does not mutate either operand.
#[test]
fn scenario_d_intersection_does_not_mutate_operands() {
    let mut a = SharedIdListDataset::new(DefaultTermFactory);
    a.add(quad("alice", "knows", "bob"));
    a.add(quad("alice", "knows", "carol"));

    let mut b = a.match_quads(&Pattern {
        object: Some(nn("bob")),
        ..Default::default()
    });
    // `b` shares `a`'s interner (the Shared variant), so this is a SAME_INTERNER
    // intersection.
    b.add(quad("dave", "knows", "erin"));

    let result = a.intersection(&b);
    assert_eq!(result.to_array().len(), 1);
    assert_eq!(a.size(), 2);
    assert_eq!(b.size(), 2);
}

// Scenario E: equality does not depend on insertion order.
#[test]
fn scenario_e_equals_is_insertion_order_independent() {
    let mut a = SharedIdListDataset::new(DefaultTermFactory);
    a.add(quad("alice", "knows", "bob"));
    a.add(quad("dave", "knows", "carol"));

    let mut b = SharedIdListDataset::new(DefaultTermFactory);
    b.add(quad("dave", "knows", "carol"));
    b.add(quad("alice", "knows", "bob"));

    assert!(a.equals(&b));

    b.add(quad("erin", "knows", "frank"));
    assert!(!a.equals(&b));
}

// Scenario F: a store's stream import count agrees with the resulting store size, and
// match_stream agrees with that count for an all-wildcard pattern.
#[test]
fn scenario_f_stream_import_count_agrees_with_store_size() {
    let mut store = StoreFacade::new(DefaultTermFactory);
    let quads: Vec<Result<Quad, quadforest::StreamError>> = vec![
        Ok(quad("alice", "knows", "bob")),
        Ok(quad("alice", "knows", "carol")),
        Ok(quad("dave", "knows", "carol")),
    ];
    let imported = store.import(quads).unwrap();
    assert_eq!(imported, 3);
    assert_eq!(store.size(), imported);

    let all = Pattern::default();
    assert_eq!(store.match_stream(&all).count(), imported);
}

// Invariant 7: an unsatisfiable pattern (bound term unknown to the interner) yields an
// empty, zero-sized result rather than an error.
#[test]
fn invariant_unsatisfiable_pattern_yields_empty_result() {
    let mut ds = SharedIdListDataset::new(DefaultTermFactory);
    ds.add(quad("alice", "knows", "bob"));

    let pattern = Pattern {
        subject: Some(nn("never-interned")),
        ..Default::default()
    };
    let matched = ds.match_quads(&pattern);
    assert_eq!(matched.size(), 0);
    assert_eq!(ds.count_quads(&pattern), 0);
    assert_eq!(ds.delete_matches(&pattern), 0);
}

// Invariant 8: filter preserves exactly the matching subset as a multiset.
#[test]
fn invariant_filter_matches_predicate_over_to_array() {
    let mut ds = SharedIdListDataset::new(DefaultTermFactory);
    ds.add(quad("alice", "knows", "bob"));
    ds.add(quad("alice", "likes", "chocolate"));
    ds.add(quad("dave", "knows", "carol"));

    let filtered = ds.filter(|q| q.predicate.as_str() == iri("knows"));
    let mut expected: Vec<_> = ds
        .to_array()
        .into_iter()
        .filter(|q| q.predicate.as_str() == iri("knows"))
        .collect();
    let mut actual = filtered.to_array();
    expected.sort_by_key(std::string::ToString::to_string);
    actual.sort_by_key(std::string::ToString::to_string);
    assert_eq!(expected, actual);
}

// Invariant 9: free() is idempotent and the facade is reusable afterwards.
#[test]
fn invariant_free_is_idempotent_and_reusable() {
    let mut ds = SharedIdListDataset::new(DefaultTermFactory);
    ds.add(quad("alice", "knows", "bob"));
    ds.free();
    ds.free();
    assert_eq!(ds.size(), 0);
    assert!(ds.add(quad("alice", "knows", "bob")));
    assert!(ds.has(&quad("alice", "knows", "bob")));
}
