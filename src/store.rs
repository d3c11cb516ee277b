//! [`StoreFacade`] and [`QuadStream`]: the stream-shaped dataset boundary (§4.5).
//!
//! The distilled contract describes an observer-style API (`data`/`end`/`error` events,
//! a deferred `remove_matches` that fires `end` on a later event-loop turn) written for a
//! host with an event loop. A synchronous Rust library has no event loop to yield to, so
//! every operation here runs to completion on the calling thread and returns its result
//! directly — the Rust-native rendering of the same contract (recorded as a resolved
//! Open Question in `DESIGN.md`).

use crate::error::{StreamError, TermFactoryError};
use crate::facade::{Pattern, SharedForestDataset};
use crate::factory::TermFactory;
use crate::term::{GraphName, Quad, Term};

/// A lazy iterator over a store's matched quads, in the anchor permutation's order.
pub struct QuadStream {
    quads: std::vec::IntoIter<Quad>,
}

impl Iterator for QuadStream {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        self.quads.next()
    }
}

/// An in-memory quad store with an iterator/stream-shaped surface suited to a
/// synchronous library (§4.5).
pub struct StoreFacade<F: TermFactory + Clone> {
    dataset: SharedForestDataset<F>,
}

impl<F: TermFactory + Clone> StoreFacade<F> {
    pub fn new(factory: F) -> Self {
        Self {
            dataset: SharedForestDataset::new(factory),
        }
    }

    pub fn add(&mut self, quad: Quad) -> bool {
        self.dataset.add(quad)
    }

    /// Alias kept for parity with the distilled `add_quad` operation name.
    pub fn add_quad(&mut self, quad: Quad) -> bool {
        self.add(quad)
    }

    pub fn size(&mut self) -> usize {
        self.dataset.size()
    }

    pub fn has(&mut self, quad: &Quad) -> bool {
        self.dataset.has(quad)
    }

    /// Consumes `quads`, interning and inserting each as it arrives. Stops at the first
    /// `StreamError`, forwarding it; otherwise returns the count imported.
    pub fn import(
        &mut self,
        quads: impl IntoIterator<Item = Result<Quad, StreamError>>,
    ) -> Result<usize, StreamError> {
        let mut imported = 0;
        for quad in quads {
            self.dataset.add(quad?);
            imported += 1;
        }
        Ok(imported)
    }

    /// Convenience constructor: builds a store and imports `quads` into it, for callers
    /// that already have an infallible source of quads.
    pub fn from_quads(factory: F, quads: impl IntoIterator<Item = Quad>) -> Self {
        let mut store = Self::new(factory);
        for quad in quads {
            store.add(quad);
        }
        store
    }

    /// Consumes `quads`, removing each as it arrives if present. A quad whose terms are
    /// simply unknown to the interner is silently skipped (it cannot be present); a
    /// `StreamError` item aborts with that error.
    pub fn remove(
        &mut self,
        quads: impl IntoIterator<Item = Result<Quad, StreamError>>,
    ) -> Result<usize, StreamError> {
        let mut removed = 0;
        for quad in quads {
            if self.dataset.delete(&quad?) {
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn match_stream(&mut self, pattern: &Pattern) -> QuadStream {
        QuadStream {
            quads: self.dataset.match_quads(pattern).to_array().into_iter(),
        }
    }

    /// Performs the deletion eagerly and returns the removed count; a no-op (returning 0)
    /// when the pattern is unsatisfiable.
    pub fn remove_matches(&mut self, pattern: &Pattern) -> usize {
        self.dataset.delete_matches(pattern)
    }

    /// Wraps `graph` as a named node and deletes every quad in that graph. Preserves the
    /// source restriction that a plain string only ever addresses a named-node graph, not
    /// a blank-node or literal one.
    pub fn delete_graph(&mut self, graph: impl Into<GraphNameLike>) -> Result<usize, TermFactoryError> {
        let graph_name = match graph.into() {
            GraphNameLike::Name(name) => name,
            GraphNameLike::Iri(iri) => self.dataset.graph_name_from_str(&iri)?,
        };
        let pattern = Pattern {
            graph: Some(Term::from(graph_name)),
            ..Default::default()
        };
        Ok(self.dataset.delete_matches(&pattern))
    }
}

/// Either a concrete [`GraphName`] or a plain IRI string to be parsed into one, the input
/// shapes `delete_graph` accepts.
pub enum GraphNameLike {
    Name(GraphName),
    Iri(String),
}

impl From<GraphName> for GraphNameLike {
    fn from(name: GraphName) -> Self {
        Self::Name(name)
    }
}

impl From<&str> for GraphNameLike {
    fn from(iri: &str) -> Self {
        Self::Iri(iri.to_owned())
    }
}

impl From<String> for GraphNameLike {
    fn from(iri: String) -> Self {
        Self::Iri(iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultTermFactory;
    use crate::term::NamedNode;

    fn quad(s: &str, p: &str, o: &str, g: Option<&str>) -> Quad {
        Quad::new(
            NamedNode::new_unchecked(s),
            NamedNode::new_unchecked(p),
            Term::NamedNode(NamedNode::new_unchecked(o)),
            g.map_or(GraphName::DefaultGraph, |g| {
                GraphName::NamedNode(NamedNode::new_unchecked(g))
            }),
        )
    }

    #[test]
    fn import_reports_count_and_stops_at_first_error() {
        let mut store = StoreFacade::new(DefaultTermFactory);
        let quads: Vec<Result<Quad, StreamError>> = vec![
            Ok(quad("http://ex/a", "http://ex/p", "http://ex/1", None)),
            Ok(quad("http://ex/b", "http://ex/p", "http://ex/2", None)),
        ];
        assert_eq!(store.import(quads).unwrap(), 2);
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn match_stream_agrees_with_import_count() {
        let mut store = StoreFacade::new(DefaultTermFactory);
        for i in 0..5 {
            store.add(quad(
                "http://ex/s",
                "http://ex/p",
                &format!("http://ex/{i}"),
                None,
            ));
        }
        let pattern = Pattern {
            subject: Some(Term::NamedNode(NamedNode::new_unchecked("http://ex/s"))),
            ..Default::default()
        };
        assert_eq!(store.match_stream(&pattern).count(), 5);
    }

    #[test]
    fn delete_graph_only_removes_that_graph() {
        let mut store = StoreFacade::new(DefaultTermFactory);
        store.add(quad("http://ex/a", "http://ex/p", "http://ex/1", Some("http://ex/g")));
        store.add(quad("http://ex/b", "http://ex/p", "http://ex/2", None));
        let removed = store.delete_graph("http://ex/g").unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn remove_matches_on_unsatisfiable_pattern_is_a_no_op() {
        let mut store = StoreFacade::new(DefaultTermFactory);
        store.add(quad("http://ex/a", "http://ex/p", "http://ex/1", None));
        let pattern = Pattern {
            subject: Some(Term::NamedNode(NamedNode::new_unchecked("http://ex/never-seen"))),
            ..Default::default()
        };
        assert_eq!(store.remove_matches(&pattern), 0);
        assert_eq!(store.size(), 1);
    }
}
