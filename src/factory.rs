//! The [`TermFactory`] contract (§6): the seam between this crate's interning/indexing
//! machinery and a concrete term model. [`DefaultTermFactory`] wires it up to
//! [`crate::term`].

use crate::error::TermFactoryError;
use crate::term::{GraphName, NamedNode, Quad, Term};

/// Produces and canonicalizes terms for a [`crate::interner::TermInterner`].
///
/// A conforming factory must guarantee that [`TermFactory::key`] returns equal strings
/// iff its inputs are semantically equal terms, for every term kind the factory supports.
pub trait TermFactory {
    /// The distinguished graph name every dataset implicitly holds.
    fn default_graph(&self) -> Term;

    /// Builds a named node from an IRI string, validating it.
    fn named_node(&self, iri: &str) -> Result<Term, TermFactoryError>;

    /// Normalizes an externally-constructed term into this factory's representation.
    ///
    /// For [`DefaultTermFactory`] this is the identity: the crate has exactly one term type.
    fn from_term(&self, term: Term) -> Term {
        term
    }

    /// Assembles a quad from four terms, checking that each fits the RDF shape its
    /// position requires (e.g. the predicate must be a named node).
    fn quad(
        &self,
        subject: Term,
        predicate: Term,
        object: Term,
        graph: Term,
    ) -> Result<Quad, TermFactoryError>;

    /// The canonical string key for a term: two terms are semantically equal iff their keys
    /// are equal. Mirrors the N-Triples-shaped `Display` output of [`crate::term`] types.
    fn key(&self, term: &Term) -> String;
}

/// The thinnest [`TermFactory`] able to drive the rest of the crate, concretized against
/// [`crate::term`]'s owned types.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTermFactory;

impl TermFactory for DefaultTermFactory {
    fn default_graph(&self) -> Term {
        Term::DefaultGraph
    }

    fn named_node(&self, iri: &str) -> Result<Term, TermFactoryError> {
        Ok(Term::NamedNode(NamedNode::new(iri)?))
    }

    fn quad(
        &self,
        subject: Term,
        predicate: Term,
        object: Term,
        graph: Term,
    ) -> Result<Quad, TermFactoryError> {
        Ok(Quad::new(
            term_to_subject(subject)?,
            term_to_predicate(predicate)?,
            object,
            term_to_graph_name(graph)?,
        ))
    }

    fn key(&self, term: &Term) -> String {
        term.to_string()
    }
}

fn term_to_subject(term: Term) -> Result<crate::term::NamedOrBlankNode, TermFactoryError> {
    match term {
        Term::NamedNode(n) => Ok(crate::term::NamedOrBlankNode::NamedNode(n)),
        Term::BlankNode(n) => Ok(crate::term::NamedOrBlankNode::BlankNode(n)),
        _ => Err(TermFactoryError::InvalidTermPosition(
            "a quad's subject position must be a named or blank node",
        )),
    }
}

fn term_to_predicate(term: Term) -> Result<NamedNode, TermFactoryError> {
    match term {
        Term::NamedNode(n) => Ok(n),
        _ => Err(TermFactoryError::InvalidTermPosition(
            "a quad's predicate position must be a named node",
        )),
    }
}

fn term_to_graph_name(term: Term) -> Result<GraphName, TermFactoryError> {
    match term {
        Term::DefaultGraph => Ok(GraphName::DefaultGraph),
        Term::NamedNode(n) => Ok(GraphName::NamedNode(n)),
        Term::BlankNode(n) => Ok(GraphName::BlankNode(n)),
        Term::Literal(_) => Err(TermFactoryError::InvalidTermPosition(
            "a quad's graph name position cannot be a literal",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_stable_and_distinguishes_kinds() {
        let f = DefaultTermFactory;
        let a = f.named_node("http://example.org/a").unwrap();
        let b = f.named_node("http://example.org/a").unwrap();
        assert_eq!(f.key(&a), f.key(&b));
        assert_eq!(f.key(&f.default_graph()), "DEFAULT");
    }

    #[test]
    fn quad_assembles_well_typed_positions() {
        let f = DefaultTermFactory;
        let s = f.named_node("http://example.org/s").unwrap();
        let p = f.named_node("http://example.org/p").unwrap();
        let o = f.named_node("http://example.org/o").unwrap();
        let g = f.default_graph();
        assert!(f.quad(s, p, o, g).is_ok());
    }

    #[test]
    fn quad_rejects_a_literal_predicate_instead_of_panicking() {
        let f = DefaultTermFactory;
        let s = f.named_node("http://example.org/s").unwrap();
        let p = Term::Literal(crate::term::Literal::new_simple_literal("not a predicate"));
        let o = f.named_node("http://example.org/o").unwrap();
        let g = f.default_graph();
        assert!(matches!(
            f.quad(s, p, o, g),
            Err(TermFactoryError::InvalidTermPosition(_))
        ));
    }
}
