//! The concrete RDF term model used by this crate: [`NamedNode`], [`BlankNode`], [`Literal`],
//! [`GraphName`], [`Term`] and [`Quad`].
//!
//! This is intentionally the thinnest term model that satisfies the canonical-key contract
//! consumed by the rest of the crate (see [`crate::factory::TermFactory`]): no zero-copy
//! borrowed `*Ref` twins, no RDF-star, no blank-node canonicalization. Parsing and
//! serialization of a concrete RDF syntax are out of scope.

use oxiri::{Iri, IriParseError};
use rand::random;
use std::fmt;

/// An RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri).
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct NamedNode {
    iri: String,
}

impl NamedNode {
    /// Builds and validates an IRI.
    pub fn new(iri: impl Into<String>) -> Result<Self, IriParseError> {
        let iri = iri.into();
        Iri::parse(iri.as_str())?;
        Ok(Self { iri })
    }

    /// Builds an IRI from a string without validation.
    ///
    /// It is the caller's responsibility to ensure `iri` is a valid absolute IRI.
    #[inline]
    pub fn new_unchecked(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.iri
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.iri
    }
}

impl fmt::Display for NamedNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// [`BlankNode::default`] mints a fresh, unique identifier; [`BlankNode::new`] validates a
/// caller-supplied label.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct BlankNode {
    id: String,
}

impl BlankNode {
    pub fn new(id: impl Into<String>) -> Result<Self, BlankNodeIdParseError> {
        let id = id.into();
        if id.is_empty() {
            return Err(BlankNodeIdParseError);
        }
        Ok(Self { id })
    }

    #[inline]
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.id
    }
}

impl Default for BlankNode {
    /// Mints a blank node with a fresh random identifier, following `oxrdf`'s convention of
    /// using randomly-generated ids that are unlikely to collide with caller-supplied labels.
    fn default() -> Self {
        Self::new_unchecked(format!("{:032x}", random::<u128>()))
    }
}

impl fmt::Display for BlankNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}

/// A blank node identifier was empty, which N-Triples/Turtle/SPARQL grammars forbid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("blank node identifiers must not be empty")]
pub struct BlankNodeIdParseError;

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
enum LiteralContent {
    String(String),
    LanguageTaggedString { value: String, language: String },
    TypedLiteral { value: String, datatype: NamedNode },
}

#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct Literal(LiteralContent);

impl Literal {
    #[inline]
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(LiteralContent::String(value.into()))
    }

    /// Builds a typed literal, normalizing the `xsd:string` datatype to a simple literal the
    /// same way `oxrdf::Literal::new_typed_literal` does.
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        let value = value.into();
        Self(if datatype.as_str() == XSD_STRING {
            LiteralContent::String(value)
        } else {
            LiteralContent::TypedLiteral { value, datatype }
        })
    }

    /// Builds a language-tagged string, lower-casing and validating the tag via `oxilangtag`.
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, oxilangtag::LanguageTagParseError> {
        let mut language = language.into();
        language.make_ascii_lowercase();
        let language = oxilangtag::LanguageTag::parse(language)?.into_inner();
        Ok(Self(LiteralContent::LanguageTaggedString {
            value: value.into(),
            language,
        }))
    }

    pub fn value(&self) -> &str {
        match &self.0 {
            LiteralContent::String(value)
            | LiteralContent::LanguageTaggedString { value, .. }
            | LiteralContent::TypedLiteral { value, .. } => value,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.0 {
            LiteralContent::LanguageTaggedString { language, .. } => Some(language),
            _ => None,
        }
    }

    pub fn datatype(&self) -> NamedNode {
        match &self.0 {
            LiteralContent::String(_) => NamedNode::new_unchecked(XSD_STRING),
            LiteralContent::LanguageTaggedString { .. } => {
                NamedNode::new_unchecked(RDF_LANG_STRING)
            }
            LiteralContent::TypedLiteral { datatype, .. } => datatype.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value().replace('\\', "\\\\").replace('"', "\\\""))?;
        match &self.0 {
            LiteralContent::String(_) => Ok(()),
            LiteralContent::LanguageTaggedString { language, .. } => write!(f, "@{language}"),
            LiteralContent::TypedLiteral { datatype, .. } => write!(f, "^^{datatype}"),
        }
    }
}

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// The union of named nodes and blank nodes, usable as a subject.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub enum NamedOrBlankNode {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl fmt::Display for NamedOrBlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(n) => n.fmt(f),
            Self::BlankNode(n) => n.fmt(f),
        }
    }
}

impl From<NamedNode> for NamedOrBlankNode {
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for NamedOrBlankNode {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

/// The graph name position of a quad: either a named or blank node, or the default graph.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd, Default)]
pub enum GraphName {
    #[default]
    DefaultGraph,
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultGraph => f.write_str("DEFAULT"),
            Self::NamedNode(n) => n.fmt(f),
            Self::BlankNode(n) => n.fmt(f),
        }
    }
}

impl From<NamedNode> for GraphName {
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for GraphName {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<NamedOrBlankNode> for GraphName {
    fn from(node: NamedOrBlankNode) -> Self {
        match node {
            NamedOrBlankNode::NamedNode(n) => Self::NamedNode(n),
            NamedOrBlankNode::BlankNode(n) => Self::BlankNode(n),
        }
    }
}

/// An RDF term: the union of named nodes, blank nodes, and literals, plus the default graph
/// marker so a single `Term` type can represent any of a quad's four positions.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub enum Term {
    DefaultGraph,
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl Term {
    pub fn is_named_node(&self) -> bool {
        matches!(self, Self::NamedNode(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    pub fn is_default_graph(&self) -> bool {
        matches!(self, Self::DefaultGraph)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultGraph => f.write_str("DEFAULT"),
            Self::NamedNode(n) => n.fmt(f),
            Self::BlankNode(n) => n.fmt(f),
            Self::Literal(l) => l.fmt(f),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<NamedOrBlankNode> for Term {
    fn from(node: NamedOrBlankNode) -> Self {
        match node {
            NamedOrBlankNode::NamedNode(n) => Self::NamedNode(n),
            NamedOrBlankNode::BlankNode(n) => Self::BlankNode(n),
        }
    }
}

impl From<GraphName> for Term {
    fn from(name: GraphName) -> Self {
        match name {
            GraphName::DefaultGraph => Self::DefaultGraph,
            GraphName::NamedNode(n) => Self::NamedNode(n),
            GraphName::BlankNode(n) => Self::BlankNode(n),
        }
    }
}

/// An owned RDF quad: `(subject, predicate, object, graph_name)`.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Quad {
    pub subject: NamedOrBlankNode,
    pub predicate: NamedNode,
    pub object: Term,
    pub graph_name: GraphName,
}

impl Quad {
    pub fn new(
        subject: impl Into<NamedOrBlankNode>,
        predicate: impl Into<NamedNode>,
        object: impl Into<Term>,
        graph_name: impl Into<GraphName>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph_name: graph_name.into(),
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if !matches!(self.graph_name, GraphName::DefaultGraph) {
            write!(f, " {}", self.graph_name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_node_display() {
        let n = NamedNode::new("http://example.org/s").unwrap();
        assert_eq!(n.to_string(), "<http://example.org/s>");
    }

    #[test]
    fn literal_normalizes_xsd_string() {
        let l = Literal::new_typed_literal("foo", NamedNode::new_unchecked(XSD_STRING));
        assert_eq!(l.datatype().as_str(), XSD_STRING);
        assert_eq!(l, Literal::new_simple_literal("foo"));
    }

    #[test]
    fn language_tag_is_lowercased() {
        let l = Literal::new_language_tagged_literal("chat", "EN").unwrap();
        assert_eq!(l.language(), Some("en"));
    }

    #[test]
    fn blank_node_default_is_unique() {
        assert_ne!(BlankNode::default(), BlankNode::default());
    }
}
