//! [`TermInterner`]: a bidirectional term↔identifier map (§3, §4.1).
//!
//! Identifiers are minted monotonically from 1; identifier `0` is reserved for the
//! default graph, pre-assigned by every fresh interner. The forward map is a `Vec<Term>`
//! and the reverse map is a `HashMap` keyed by the term's canonical key, the same
//! `id2str`/`str2id` shape `oxigraph`'s historical `numeric_encoder::BytesStore`
//! implementations use, generalized from byte-strings to whole [`Term`]s since this
//! store never needs a secondary decode pass through an `Encoder`.

use crate::error::StaleIdentifierError;
use crate::factory::TermFactory;
use crate::term::{GraphName, NamedOrBlankNode, Quad, Term};
use std::collections::HashMap;

/// An identifier minted by a [`TermInterner`]. Valid only within the interner that
/// produced it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TermId(pub u32);

impl TermId {
    pub const DEFAULT_GRAPH: Self = Self(0);

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

/// A bound-or-wildcard pattern over identifiers, the identifier-space counterpart of a
/// quad pattern over terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdPattern {
    pub subject: Option<TermId>,
    pub predicate: Option<TermId>,
    pub object: Option<TermId>,
    pub graph: Option<TermId>,
}

/// A bidirectional term↔identifier map, owning a [`TermFactory`] used to canonicalize and
/// reconstruct terms.
#[derive(Debug)]
pub struct TermInterner<F: TermFactory> {
    factory: F,
    id_to_term: Vec<Term>,
    key_to_id: HashMap<String, TermId>,
}

impl<F: TermFactory + Default> Default for TermInterner<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: TermFactory> TermInterner<F> {
    /// Creates an interner pre-seeded with the default graph at identifier 0.
    pub fn new(factory: F) -> Self {
        let default_graph = factory.default_graph();
        let key = factory.key(&default_graph);
        let mut key_to_id = HashMap::new();
        key_to_id.insert(key, TermId::DEFAULT_GRAPH);
        Self {
            factory,
            id_to_term: vec![default_graph],
            key_to_id,
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn len(&self) -> usize {
        self.id_to_term.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the default graph is always present
    }

    /// Returns `term`'s identifier, allocating a new one if it is not yet known.
    /// Allocation is monotonic; no identifier is ever reused.
    pub fn intern_or_add(&mut self, term: Term) -> TermId {
        let term = self.factory.from_term(term);
        let key = self.factory.key(&term);
        if let Some(id) = self.key_to_id.get(&key) {
            return *id;
        }
        let id = TermId(u32::try_from(self.id_to_term.len()).expect("identifier space exhausted"));
        self.id_to_term.push(term);
        self.key_to_id.insert(key, id);
        id
    }

    /// Returns `term`'s identifier without mutating the interner.
    pub fn try_intern(&self, term: &Term) -> Option<TermId> {
        self.key_to_id.get(&self.factory.key(term)).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.id_to_term.get(id.0 as usize)
    }

    pub fn intern_or_add_quad(&mut self, quad: Quad) -> (TermId, TermId, TermId, TermId) {
        let s = self.intern_or_add(Term::from(quad.subject));
        let p = self.intern_or_add(Term::NamedNode(quad.predicate));
        let o = self.intern_or_add(quad.object);
        let g = self.intern_or_add(Term::from(quad.graph_name));
        (s, p, o, g)
    }

    pub fn try_intern_quad(&self, quad: &Quad) -> Option<(TermId, TermId, TermId, TermId)> {
        let s = self.try_intern(&Term::from(quad.subject.clone()))?;
        let p = self.try_intern(&Term::NamedNode(quad.predicate.clone()))?;
        let o = self.try_intern(&quad.object)?;
        let g = self.try_intern(&Term::from(quad.graph_name.clone()))?;
        Some((s, p, o, g))
    }

    /// Reconstructs a [`Quad`] from an identifier tuple, failing if any identifier is
    /// unknown to this interner (`StaleIdentifierError`, §7).
    pub fn decode_quad(
        &self,
        ids: (TermId, TermId, TermId, TermId),
    ) -> Result<Quad, StaleIdentifierError> {
        let subject = self.decode_named_or_blank(ids.0)?;
        let predicate = match self.term(ids.1).ok_or(StaleIdentifierError(ids.1.0))? {
            Term::NamedNode(n) => n.clone(),
            _ => return Err(StaleIdentifierError(ids.1.0)),
        };
        let object = self.term(ids.2).ok_or(StaleIdentifierError(ids.2.0))?.clone();
        let graph_name = match self.term(ids.3).ok_or(StaleIdentifierError(ids.3.0))? {
            Term::DefaultGraph => GraphName::DefaultGraph,
            Term::NamedNode(n) => GraphName::NamedNode(n.clone()),
            Term::BlankNode(n) => GraphName::BlankNode(n.clone()),
            Term::Literal(_) => return Err(StaleIdentifierError(ids.3.0)),
        };
        Ok(Quad {
            subject,
            predicate,
            object,
            graph_name,
        })
    }

    fn decode_named_or_blank(&self, id: TermId) -> Result<NamedOrBlankNode, StaleIdentifierError> {
        match self.term(id).ok_or(StaleIdentifierError(id.0))? {
            Term::NamedNode(n) => Ok(NamedOrBlankNode::NamedNode(n.clone())),
            Term::BlankNode(n) => Ok(NamedOrBlankNode::BlankNode(n.clone())),
            _ => Err(StaleIdentifierError(id.0)),
        }
    }

    /// Lifts a term-level pattern to an identifier-level pattern. Returns `None` (§7,
    /// `PatternUnsatisfiable`) if any bound term is unknown to this interner — no quad
    /// can possibly match such a pattern.
    pub fn match_ids(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
        graph: Option<&Term>,
    ) -> Option<IdPattern> {
        Some(IdPattern {
            subject: lift(self, subject)?,
            predicate: lift(self, predicate)?,
            object: lift(self, object)?,
            graph: lift(self, graph)?,
        })
    }

    /// Builds a new interner containing exactly the identifiers in `ids`, preserving
    /// identifier values and remapping nothing — used by the `Isolated` facade variants to
    /// clone a reachable subset of a shared interner (§3 Ownership).
    pub fn clone_subset(&self, ids: impl IntoIterator<Item = TermId>) -> Self
    where
        F: Clone,
    {
        let mut out = Self::new(self.factory.clone());
        for id in ids {
            if id == TermId::DEFAULT_GRAPH {
                continue;
            }
            if let Some(term) = self.term(id) {
                let new_id = out.intern_or_add(term.clone());
                debug_assert_eq!(
                    new_id, id,
                    "clone_subset must preserve the source interner's identifier values"
                );
            }
        }
        out
    }
}

fn lift<F: TermFactory>(
    interner: &TermInterner<F>,
    term: Option<&Term>,
) -> Option<Option<TermId>> {
    match term {
        None => Some(None),
        Some(term) => interner.try_intern(term).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DefaultTermFactory;
    use crate::term::NamedNode;

    fn nn(iri: &str) -> Term {
        Term::NamedNode(NamedNode::new_unchecked(iri))
    }

    #[test]
    fn default_graph_is_zero() {
        let interner = TermInterner::<DefaultTermFactory>::default();
        assert_eq!(interner.try_intern(&Term::DefaultGraph), Some(TermId::DEFAULT_GRAPH));
    }

    #[test]
    fn interning_is_monotonic_and_stable() {
        let mut interner = TermInterner::<DefaultTermFactory>::default();
        let a = interner.intern_or_add(nn("http://example.org/a"));
        let b = interner.intern_or_add(nn("http://example.org/b"));
        let a_again = interner.intern_or_add(nn("http://example.org/a"));
        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }

    #[test]
    fn try_intern_does_not_mutate() {
        let interner = TermInterner::<DefaultTermFactory>::default();
        assert_eq!(interner.try_intern(&nn("http://example.org/unknown")), None);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn match_ids_signals_unsatisfiable_on_unknown_bound_term() {
        let mut interner = TermInterner::<DefaultTermFactory>::default();
        interner.intern_or_add(nn("http://example.org/a"));
        let known = nn("http://example.org/a");
        let unknown = nn("http://example.org/never-interned");
        assert!(interner.match_ids(Some(&known), None, None, None).is_some());
        assert!(interner.match_ids(Some(&unknown), None, None, None).is_none());
    }
}
