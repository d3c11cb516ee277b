//! An in-memory, indexed store of [RDF](https://www.w3.org/TR/rdf11-concepts/) quads.
//!
//! The store is built from two layers: a [`TermInterner`](interner::TermInterner) that
//! reduces RDF terms to small integer identifiers, and a [`QuadForest`](forest::QuadForest)
//! of lazily-materialized ordered indexes over those identifiers, one per useful sort
//! order, so any bound/wildcard pattern reduces to a single contiguous range scan.
//!
//! [`Dataset`](facade::Dataset) and its four variant aliases expose the indexed store as
//! an RDF dataset with pattern matching and set algebra; [`StoreFacade`](store::StoreFacade)
//! exposes the same store through an iterator-based bulk import/export surface.
//!
//! This crate does not parse or serialize any RDF syntax, and does not implement
//! blank-node isomorphism: equality and set algebra compare term identifiers, not
//! isomorphism classes.

pub mod error;
pub mod facade;
pub mod factory;
pub mod forest;
pub mod interner;
pub mod ordered_set;
pub mod permutation;
pub mod store;
pub mod term;

pub use error::{StaleIdentifierError, StreamError, TermFactoryError};
pub use facade::{
    Dataset, DatasetFacadeOps, IsolatedForestDataset, IsolatedIdListDataset, Pattern,
    SharedForestDataset, SharedIdListDataset,
};
pub use factory::{DefaultTermFactory, TermFactory};
pub use store::{QuadStream, StoreFacade};
pub use term::{BlankNode, GraphName, Literal, NamedNode, NamedOrBlankNode, Quad, Term};
