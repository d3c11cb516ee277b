//! [`Dataset`] and its four variant type aliases (§4.4): `Shared`/`Isolated` interner
//! ownership crossed with `IdList`/`ForestOnly` result-caching, expressed as two `bool`
//! const generic parameters on one generic engine rather than four hand-duplicated
//! structs — each combination is still a distinct monomorphized type, so downstream code
//! can implement `DatasetFacadeOps` once and have it apply uniformly (§9, "polymorphism
//! over facades").

use crate::error::TermFactoryError;
use crate::factory::TermFactory;
use crate::forest::QuadForest;
use crate::interner::{IdPattern, TermId, TermInterner};
use crate::term::{GraphName, Quad, Term};
use std::cell::RefCell;
use std::rc::Rc;

type IdQuad = (TermId, TermId, TermId, TermId);

/// A quad pattern over terms: each position either bound or a wildcard.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    pub subject: Option<Term>,
    pub predicate: Option<Term>,
    pub object: Option<Term>,
    pub graph: Option<Term>,
}

/// Shared operation surface across all four variants (§9 "polymorphism over facades"):
/// generic code written against `F: DatasetFacadeOps` applies uniformly to whichever
/// concrete alias it is handed. Each method forwards to the identically-named inherent
/// method on [`Dataset`]; direct callers keep calling the inherent methods as before,
/// since inherent methods take priority over trait methods during resolution.
pub trait DatasetFacadeOps {
    fn add(&mut self, quad: Quad) -> bool;
    fn delete(&mut self, quad: &Quad) -> bool;
    fn has(&mut self, quad: &Quad) -> bool;
    fn match_quads(&mut self, pattern: &Pattern) -> Self
    where
        Self: Sized;
    fn size(&mut self) -> usize;
    fn iterator(&self) -> impl Iterator<Item = Quad>;
    fn free(&mut self);
}

enum State {
    Empty,
    Sequence(Vec<IdQuad>),
    Forest(QuadForest),
    Both(QuadForest, Vec<IdQuad>),
}

/// The indexed in-memory dataset facade (§4.4).
///
/// `CACHE_SEQUENCE`: derived facades (from `match`, set algebra) keep their result as a
/// flat identifier sequence rather than promoting it into a tree (the `IdList` variants);
/// when `false`, every read path eagerly builds a forest (`ForestOnly` variants).
///
/// `ISOLATE`: derived facades clone the subset of the interner they actually reach
/// (`Isolated` variants) instead of sharing the parent's interner by `Rc` (`Shared`
/// variants, the default and cheaper choice per §3 Ownership).
pub struct Dataset<F: TermFactory, const CACHE_SEQUENCE: bool, const ISOLATE: bool> {
    interner: Rc<RefCell<TermInterner<F>>>,
    state: State,
}

/// Shares its interner with every facade derived from it; caches match results as a flat
/// identifier sequence until a mutation forces a tree.
pub type SharedIdListDataset<F> = Dataset<F, true, false>;
/// Shares its interner with every facade derived from it; always promotes match results
/// into a tree immediately.
pub type SharedForestDataset<F> = Dataset<F, false, false>;
/// Clones the reachable subset of its interner into every derived facade; caches match
/// results as a flat identifier sequence until a mutation forces a tree.
pub type IsolatedIdListDataset<F> = Dataset<F, true, true>;
/// Clones the reachable subset of its interner into every derived facade; always promotes
/// match results into a tree immediately.
pub type IsolatedForestDataset<F> = Dataset<F, false, true>;

impl<F: TermFactory + Clone, const CACHE_SEQUENCE: bool, const ISOLATE: bool>
    Dataset<F, CACHE_SEQUENCE, ISOLATE>
{
    pub fn new(factory: F) -> Self {
        Self {
            interner: Rc::new(RefCell::new(TermInterner::new(factory))),
            state: State::Empty,
        }
    }

    fn with_interner(interner: Rc<RefCell<TermInterner<F>>>, state: State) -> Self {
        Self { interner, state }
    }

    /// Read path (§4.4): may materialize a forest (and lazily cache further permutations
    /// inside it), but never discards a cached identifier sequence.
    fn ensure_forest_readonly(&mut self) -> &mut QuadForest {
        self.state = match std::mem::replace(&mut self.state, State::Empty) {
            State::Empty => State::Forest(QuadForest::new()),
            State::Sequence(seq) => {
                let mut forest = QuadForest::new();
                forest.bulk_load(seq.iter().copied());
                State::Both(forest, seq)
            }
            already @ (State::Forest(_) | State::Both(_, _)) => already,
        };
        match &mut self.state {
            State::Forest(forest) | State::Both(forest, _) => forest,
            State::Empty | State::Sequence(_) => unreachable!("just normalized above"),
        }
    }

    /// Mutating path (§4.4): forces a modifiable forest and drops any cached sequence,
    /// since it is now stale.
    fn ensure_modifiable_forest(&mut self) -> &mut QuadForest {
        self.state = match std::mem::replace(&mut self.state, State::Empty) {
            State::Empty => State::Forest(QuadForest::new()),
            State::Sequence(seq) => {
                let mut forest = QuadForest::new();
                forest.bulk_load(seq);
                State::Forest(forest)
            }
            State::Forest(forest) => State::Forest(forest),
            State::Both(forest, _) => State::Forest(forest),
        };
        match &mut self.state {
            State::Forest(forest) => forest,
            State::Empty | State::Sequence(_) | State::Both(_, _) => {
                unreachable!("just normalized above")
            }
        }
    }

    fn current_ids(&self) -> Vec<IdQuad> {
        match &self.state {
            State::Empty => Vec::new(),
            State::Sequence(seq) => seq.clone(),
            State::Forest(forest) | State::Both(forest, _) => forest.iter().collect(),
        }
    }

    /// Builds a derived facade from a raw identifier sequence, honoring `CACHE_SEQUENCE`
    /// and `ISOLATE`.
    fn derive(&self, ids: Vec<IdQuad>) -> Self {
        let interner = if ISOLATE {
            let reachable = ids.iter().flat_map(|q| [q.0, q.1, q.2, q.3]);
            Rc::new(RefCell::new(self.interner.borrow().clone_subset(reachable)))
        } else {
            Rc::clone(&self.interner)
        };
        let state = if CACHE_SEQUENCE {
            State::Sequence(ids)
        } else {
            let mut forest = QuadForest::new();
            forest.bulk_load(ids);
            State::Forest(forest)
        };
        Self::with_interner(interner, state)
    }

    fn pattern_to_ids(&self, pattern: &Pattern) -> Option<IdPattern> {
        self.interner.borrow().match_ids(
            pattern.subject.as_ref(),
            pattern.predicate.as_ref(),
            pattern.object.as_ref(),
            pattern.graph.as_ref(),
        )
    }

    pub fn add(&mut self, quad: Quad) -> bool {
        let ids = self.interner.borrow_mut().intern_or_add_quad(quad);
        self.ensure_modifiable_forest().insert(ids)
    }

    pub fn add_all(&mut self, quads: impl IntoIterator<Item = Quad>) -> usize {
        quads.into_iter().filter(|q| self.add(q.clone())).count()
    }

    pub fn delete(&mut self, quad: &Quad) -> bool {
        let Some(ids) = self.interner.borrow().try_intern_quad(quad) else {
            return false; // PatternUnsatisfiable: an unknown term cannot be present
        };
        self.ensure_modifiable_forest().remove(ids)
    }

    pub fn has(&mut self, quad: &Quad) -> bool {
        let Some(ids) = self.interner.borrow().try_intern_quad(quad) else {
            return false;
        };
        // Resolved Open Question (§9): `has` always forces a forest, even on an
        // `IdList`-only facade, keeping every read path's behavior uniform.
        self.ensure_forest_readonly().contains(ids)
    }

    pub fn size(&mut self) -> usize {
        match &self.state {
            State::Sequence(seq) => seq.len(),
            _ => self.ensure_forest_readonly().size(),
        }
    }

    pub fn count_quads(&mut self, pattern: &Pattern) -> usize {
        let Some(ids) = self.pattern_to_ids(pattern) else {
            return 0;
        };
        self.ensure_forest_readonly().matching_count(&ids)
    }

    /// Routes `pattern` to the cheapest permutation and returns the result as a new
    /// facade of the same variant, holding only the matched identifiers and (per
    /// `CACHE_SEQUENCE`) no forest. A read path: `self`'s cached sequence, if any, survives.
    pub fn match_quads(&mut self, pattern: &Pattern) -> Self {
        let Some(ids) = self.pattern_to_ids(pattern) else {
            return self.derive(Vec::new());
        };
        let matched = self.ensure_forest_readonly().matching(&ids);
        self.derive(matched)
    }

    pub fn delete_matches(&mut self, pattern: &Pattern) -> usize {
        let Some(ids) = self.pattern_to_ids(pattern) else {
            return 0;
        };
        self.ensure_modifiable_forest().delete_matches(&ids)
    }

    pub fn ensure_index_for(&mut self, pattern: &Pattern) {
        if let Some(ids) = self.pattern_to_ids(pattern) {
            self.ensure_forest_readonly().ensure_index(&ids);
        }
    }

    pub fn to_array(&self) -> Vec<Quad> {
        let interner = self.interner.borrow();
        self.current_ids()
            .into_iter()
            .filter_map(|ids| interner.decode_quad(ids).ok())
            .collect()
    }

    pub fn iterator(&self) -> impl Iterator<Item = Quad> {
        self.to_array().into_iter()
    }

    pub fn as_identifier_sequence(&self) -> Vec<(u32, u32, u32, u32)> {
        self.current_ids()
            .into_iter()
            .map(|(s, p, o, g)| (s.get(), p.get(), o.get(), g.get()))
            .collect()
    }

    pub fn filter(&self, predicate: impl Fn(&Quad) -> bool) -> Self {
        let interner = self.interner.borrow();
        let kept: Vec<_> = self
            .current_ids()
            .into_iter()
            .filter(|ids| {
                interner
                    .decode_quad(*ids)
                    .is_ok_and(|quad| predicate(&quad))
            })
            .collect();
        drop(interner);
        self.derive(kept)
    }

    /// Transforms every quad; since the result may contain duplicates or terms new to
    /// this dataset, the new facade always builds a forest to dedupe, regardless of
    /// `CACHE_SEQUENCE` (§4.4).
    pub fn map(&self, transform: impl Fn(&Quad) -> Quad) -> Self {
        let source_interner = self.interner.borrow();
        let transformed: Vec<_> = self
            .current_ids()
            .into_iter()
            .filter_map(|ids| source_interner.decode_quad(ids).ok())
            .map(|quad| transform(&quad))
            .collect();
        drop(source_interner);
        let interner = if ISOLATE {
            Rc::new(RefCell::new(TermInterner::new(self.interner.borrow().factory().clone())))
        } else {
            Rc::clone(&self.interner)
        };
        let ids: Vec<_> = transformed
            .into_iter()
            .map(|quad| interner.borrow_mut().intern_or_add_quad(quad))
            .collect();
        let mut forest = QuadForest::new();
        forest.bulk_load(ids);
        Self::with_interner(interner, State::Forest(forest))
    }

    pub fn every(&self, predicate: impl Fn(&Quad) -> bool) -> bool {
        self.to_array().iter().all(|q| predicate(q))
    }

    pub fn some(&self, predicate: impl Fn(&Quad) -> bool) -> bool {
        self.to_array().iter().any(|q| predicate(q))
    }

    pub fn for_each(&self, mut action: impl FnMut(&Quad)) {
        for quad in self.to_array() {
            action(&quad);
        }
    }

    pub fn reduce<A>(&self, init: A, mut combine: impl FnMut(A, &Quad) -> A) -> A {
        let mut acc = init;
        for quad in self.to_array() {
            acc = combine(acc, &quad);
        }
        acc
    }

    fn shares_interner_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.interner, &other.interner)
    }

    /// Set union (§4.4 similarity levels). `SAME_INTERNER`: pure integer-set union via
    /// the forest. Otherwise: each of `other`'s quads is re-interned with
    /// `intern_or_add_quad`, admitting new terms.
    pub fn union(&mut self, other: &Self) {
        if self.shares_interner_with(other) {
            let ids = other.current_ids();
            self.ensure_modifiable_forest().union(ids);
        } else {
            let quads = other.to_array();
            for quad in quads {
                self.add(quad);
            }
        }
    }

    /// Set intersection. `SAME_INTERNER`: integer-set intersection. Otherwise: each of
    /// `other`'s quads is re-interned with `try_intern_quad`; an unknown term means that
    /// quad cannot match and is skipped.
    pub fn intersection(&self, other: &Self) -> Self {
        if self.shares_interner_with(other) {
            let other_ids: std::collections::HashSet<_> = other.current_ids().into_iter().collect();
            let kept = self
                .current_ids()
                .into_iter()
                .filter(|ids| other_ids.contains(ids))
                .collect();
            self.derive(kept)
        } else {
            let other_quads: std::collections::HashSet<_> = other.to_array().into_iter().collect();
            self.filter(|q| other_quads.contains(q))
        }
    }

    /// Set difference, with the same similarity-level split as [`Self::intersection`];
    /// under `SAME_CLASS`/`NONE`, an unknown term in `other` is treated as simply absent.
    pub fn difference(&self, other: &Self) -> Self {
        if self.shares_interner_with(other) {
            let other_ids: std::collections::HashSet<_> = other.current_ids().into_iter().collect();
            let kept = self
                .current_ids()
                .into_iter()
                .filter(|ids| !other_ids.contains(ids))
                .collect();
            self.derive(kept)
        } else {
            let other_quads: std::collections::HashSet<_> = other.to_array().into_iter().collect();
            self.filter(|q| !other_quads.contains(q))
        }
    }

    pub fn contains_dataset(&self, other: &Self) -> bool {
        if self.shares_interner_with(other) {
            let self_ids: std::collections::HashSet<_> = self.current_ids().into_iter().collect();
            other.current_ids().into_iter().all(|ids| self_ids.contains(&ids))
        } else {
            other.to_array().into_iter().all(|quad| {
                self.interner
                    .borrow()
                    .try_intern_quad(&quad)
                    .is_some_and(|ids| self.has_cached(ids))
            })
        }
    }

    fn has_cached(&self, ids: IdQuad) -> bool {
        match &self.state {
            State::Sequence(seq) => seq.contains(&ids),
            State::Forest(forest) | State::Both(forest, _) => forest.contains(ids),
            State::Empty => false,
        }
    }

    pub fn equals(&self, other: &Self) -> bool {
        self.current_ids().len() == other.current_ids().len() && self.contains_dataset(other)
    }

    pub fn free(&mut self) {
        self.state = State::Empty;
    }
}

impl<F: TermFactory + Clone, const CACHE_SEQUENCE: bool, const ISOLATE: bool> DatasetFacadeOps
    for Dataset<F, CACHE_SEQUENCE, ISOLATE>
{
    fn add(&mut self, quad: Quad) -> bool {
        Self::add(self, quad)
    }

    fn delete(&mut self, quad: &Quad) -> bool {
        Self::delete(self, quad)
    }

    fn has(&mut self, quad: &Quad) -> bool {
        Self::has(self, quad)
    }

    fn match_quads(&mut self, pattern: &Pattern) -> Self {
        Self::match_quads(self, pattern)
    }

    fn size(&mut self) -> usize {
        Self::size(self)
    }

    fn iterator(&self) -> impl Iterator<Item = Quad> {
        Self::iterator(self)
    }

    fn free(&mut self) {
        Self::free(self)
    }
}

impl<F: TermFactory + Clone, const CACHE_SEQUENCE: bool, const ISOLATE: bool> Dataset<F, CACHE_SEQUENCE, ISOLATE> {
    /// Wraps a plain string graph name as a named node, the way `delete_graph` does
    /// (§4.5, §9 Open Question): literal or blank-node graph-name strings are not
    /// supported by this path.
    pub fn graph_name_from_str(&self, iri: &str) -> Result<GraphName, TermFactoryError> {
        match self.interner.borrow().factory().named_node(iri)? {
            Term::NamedNode(n) => Ok(GraphName::NamedNode(n)),
            _ => unreachable!("TermFactory::named_node always returns a NamedNode term"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultTermFactory;
    use crate::term::{BlankNode, Literal, NamedNode, NamedOrBlankNode};

    fn nn(iri: &str) -> Term {
        Term::NamedNode(NamedNode::new_unchecked(iri))
    }

    fn quad(s: &str, p: &str, o: &str) -> Quad {
        Quad::new(
            NamedNode::new_unchecked(s),
            NamedNode::new_unchecked(p),
            Term::NamedNode(NamedNode::new_unchecked(o)),
            GraphName::DefaultGraph,
        )
    }

    #[test]
    fn add_and_has_round_trip() {
        let mut ds = SharedIdListDataset::new(DefaultTermFactory);
        let q = quad("http://ex/s", "http://ex/p", "http://ex/o");
        assert!(ds.add(q.clone()));
        assert!(ds.has(&q));
        assert_eq!(ds.size(), 1);
    }

    #[test]
    fn match_on_shared_predicate() {
        let mut ds = SharedIdListDataset::new(DefaultTermFactory);
        ds.add(quad("http://ex/a", "http://ex/p", "http://ex/x"));
        ds.add(quad("http://ex/b", "http://ex/p", "http://ex/y"));
        ds.add(quad("http://ex/c", "http://ex/other", "http://ex/z"));
        let pattern = Pattern {
            predicate: Some(nn("http://ex/p")),
            ..Default::default()
        };
        let matched = ds.match_quads(&pattern);
        assert_eq!(matched.to_array().len(), 2);
    }

    #[test]
    fn delete_matches_by_predicate() {
        let mut ds = SharedIdListDataset::new(DefaultTermFactory);
        ds.add(quad("http://ex/a", "http://ex/p", "http://ex/x"));
        ds.add(quad("http://ex/b", "http://ex/p", "http://ex/y"));
        let pattern = Pattern {
            predicate: Some(nn("http://ex/p")),
            ..Default::default()
        };
        assert_eq!(ds.delete_matches(&pattern), 2);
        assert_eq!(ds.size(), 0);
    }

    #[test]
    fn default_graph_isolates_from_named_graph() {
        let mut ds = SharedIdListDataset::new(DefaultTermFactory);
        ds.add(quad("http://ex/a", "http://ex/p", "http://ex/x"));
        ds.add(Quad::new(
            NamedNode::new_unchecked("http://ex/a"),
            NamedNode::new_unchecked("http://ex/p"),
            Term::NamedNode(NamedNode::new_unchecked("http://ex/x")),
            GraphName::NamedNode(NamedNode::new_unchecked("http://ex/g")),
        ));
        let pattern = Pattern {
            graph: Some(Term::DefaultGraph),
            ..Default::default()
        };
        assert_eq!(ds.match_quads(&pattern).to_array().len(), 1);
    }

    #[test]
    fn intersection_does_not_mutate_operands() {
        let mut a = SharedIdListDataset::new(DefaultTermFactory);
        a.add(quad("http://ex/a", "http://ex/p", "http://ex/x"));
        a.add(quad("http://ex/b", "http://ex/p", "http://ex/y"));
        let mut b = SharedIdListDataset::new(a.interner.borrow().factory().clone());
        // give b the same interner so this is a SAME_INTERNER fast-path intersection
        b.interner = Rc::clone(&a.interner);
        b.add(quad("http://ex/a", "http://ex/p", "http://ex/x"));
        let result = a.intersection(&b);
        assert_eq!(result.to_array().len(), 1);
        assert_eq!(a.size(), 2);
        assert_eq!(b.size(), 1);
    }

    #[test]
    fn equals_is_order_independent() {
        let mut a = SharedIdListDataset::new(DefaultTermFactory);
        a.add(quad("http://ex/a", "http://ex/p", "http://ex/x"));
        a.add(quad("http://ex/b", "http://ex/p", "http://ex/y"));
        let mut b = SharedIdListDataset::new(DefaultTermFactory);
        b.add(quad("http://ex/b", "http://ex/p", "http://ex/y"));
        b.add(quad("http://ex/a", "http://ex/p", "http://ex/x"));
        assert!(a.equals(&b));
    }

    #[test]
    fn blank_node_and_literal_terms_round_trip() {
        let mut ds = SharedIdListDataset::new(DefaultTermFactory);
        let q = Quad::new(
            NamedOrBlankNode::BlankNode(BlankNode::new_unchecked("b1")),
            NamedNode::new_unchecked("http://ex/p"),
            Term::Literal(Literal::new_simple_literal("hello")),
            GraphName::DefaultGraph,
        );
        ds.add(q.clone());
        assert!(ds.has(&q));
    }

    fn add_via_trait<D: DatasetFacadeOps>(ds: &mut D, q: Quad) -> bool {
        ds.add(q)
    }

    #[test]
    fn facade_ops_trait_applies_uniformly_across_variants() {
        let mut shared = SharedIdListDataset::new(DefaultTermFactory);
        let mut isolated = IsolatedForestDataset::new(DefaultTermFactory);
        let q = quad("http://ex/a", "http://ex/p", "http://ex/x");
        assert!(add_via_trait(&mut shared, q.clone()));
        assert!(add_via_trait(&mut isolated, q.clone()));
        assert!(DatasetFacadeOps::has(&mut shared, &q));
        assert_eq!(DatasetFacadeOps::size(&mut isolated), 1);
    }

    #[test]
    fn isolated_variant_clones_only_reachable_subset() {
        let mut ds = IsolatedIdListDataset::new(DefaultTermFactory);
        ds.add(quad("http://ex/a", "http://ex/p", "http://ex/x"));
        ds.add(quad("http://ex/b", "http://ex/other", "http://ex/y"));
        let pattern = Pattern {
            predicate: Some(nn("http://ex/p")),
            ..Default::default()
        };
        let matched = ds.match_quads(&pattern);
        assert!(!Rc::ptr_eq(&ds.interner, &matched.interner));
        assert_eq!(matched.to_array().len(), 1);
    }
}
