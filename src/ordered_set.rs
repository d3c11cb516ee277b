//! [`OrderedQuadSet`]: a set of identifier quads sorted under one [`Permutation`] (§4.2).
//!
//! Generalizes `oxrdf::Dataset`'s six parallel `BTreeSet<(…)>` fields (`gspo`, `gpos`,
//! `gosp`, `spog`, `posg`, `ospg`) into one type parameterized by a runtime [`Permutation`]
//! value, so a [`crate::forest::QuadForest`] can hold all six in a homogeneous array.

use crate::interner::{IdPattern, TermId};
use crate::permutation::Permutation;
use std::collections::BTreeSet;
use std::ops::Bound;

/// A set of identifier quads, sorted under `permutation`.
#[derive(Debug, Clone)]
pub struct OrderedQuadSet {
    permutation: Permutation,
    entries: BTreeSet<[TermId; 4]>,
}

impl OrderedQuadSet {
    pub fn new(permutation: Permutation) -> Self {
        Self {
            permutation,
            entries: BTreeSet::new(),
        }
    }

    /// Builds a set under `permutation` containing the same elements as `quads`, the way
    /// [`crate::forest::QuadForest::ensure_index`] re-keys the anchor under a new order.
    pub fn from_quads(
        permutation: Permutation,
        quads: impl IntoIterator<Item = (TermId, TermId, TermId, TermId)>,
    ) -> Self {
        Self {
            permutation,
            entries: quads.into_iter().map(|q| permutation.permute(q)).collect(),
        }
    }

    pub fn permutation(self) -> Permutation {
        self.permutation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a quad given in canonical `(s, p, o, g)` order. Returns `true` if newly
    /// inserted.
    pub fn insert(&mut self, quad: (TermId, TermId, TermId, TermId)) -> bool {
        self.entries.insert(self.permutation.permute(quad))
    }

    pub fn remove(&mut self, quad: (TermId, TermId, TermId, TermId)) -> bool {
        self.entries.remove(&self.permutation.permute(quad))
    }

    pub fn contains(&self, quad: (TermId, TermId, TermId, TermId)) -> bool {
        self.entries.contains(&self.permutation.permute(quad))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, TermId, TermId, TermId)> + '_ {
        self.entries.iter().map(|key| self.permutation.unpermute(*key))
    }

    /// Scans `pattern` as a single contiguous range, assuming `pattern`'s bound positions
    /// form a prefix of this set's permutation (callers route through
    /// [`Permutation::select`] to guarantee this). Falls back to a full scan with a
    /// post-hoc filter if `pattern` is not a valid prefix for this order.
    pub fn matching(
        &self,
        pattern: &IdPattern,
    ) -> Box<dyn Iterator<Item = (TermId, TermId, TermId, TermId)> + '_> {
        let Some(bounds) = self.permutation.prefix_bounds(pattern) else {
            let permutation = self.permutation;
            return Box::new(self.iter().filter(move |quad| {
                matches(permutation, *quad, pattern)
            }));
        };
        let bound_len = bounds.iter().take_while(|b| b.is_some()).count();
        if bound_len == 0 {
            return Box::new(self.iter());
        }
        let mut low = [TermId(u32::MIN); 4];
        for (i, bound) in bounds.iter().enumerate().take(bound_len) {
            low[i] = bound.expect("prefix bounds are Some up to bound_len");
        }
        // Upper bound: the fixed prefix treated as a base-(u32::MAX + 1) number, incremented
        // by one with carry. A carry that runs off the front of the prefix means every
        // component in it is already u32::MAX, so nothing sorts above `low` and the range is
        // unbounded above rather than wrapping back to an empty `low..low`.
        let upper = increment_prefix(&low, bound_len).map_or(Bound::Unbounded, Bound::Excluded);
        let permutation = self.permutation;
        Box::new(
            self.entries
                .range((Bound::Included(low), upper))
                .map(move |key| permutation.unpermute(*key)),
        )
    }

    pub fn matching_count(&self, pattern: &IdPattern) -> usize {
        self.matching(pattern).count()
    }
}

/// Increments the `bound_len`-wide prefix of `low` by one, carrying across components
/// that are already `u32::MAX`. Returns `None` if the carry runs off the front, meaning
/// every bound component is maximal and there is no successor prefix to bound the range.
fn increment_prefix(low: &[TermId; 4], bound_len: usize) -> Option<[TermId; 4]> {
    let mut high = [TermId(u32::MIN); 4];
    high[..bound_len].copy_from_slice(&low[..bound_len]);
    for i in (0..bound_len).rev() {
        if high[i].get() == u32::MAX {
            high[i] = TermId(u32::MIN);
        } else {
            high[i] = TermId(high[i].get() + 1);
            return Some(high);
        }
    }
    None
}

fn matches(
    permutation: Permutation,
    quad: (TermId, TermId, TermId, TermId),
    pattern: &IdPattern,
) -> bool {
    let _ = permutation;
    pattern.subject.is_none_or(|v| v == quad.0)
        && pattern.predicate.is_none_or(|v| v == quad.1)
        && pattern.object.is_none_or(|v| v == quad.2)
        && pattern.graph.is_none_or(|v| v == quad.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> TermId {
        TermId(n)
    }

    #[test]
    fn range_scan_matches_full_scan() {
        let mut set = OrderedQuadSet::new(Permutation::Spog);
        for i in 1..6 {
            set.insert((id(1), id(i), id(1), id(0)));
        }
        set.insert((id(2), id(1), id(1), id(0)));
        let pattern = IdPattern {
            subject: Some(id(1)),
            predicate: None,
            object: None,
            graph: None,
        };
        let matched: Vec<_> = set.matching(&pattern).collect();
        assert_eq!(matched.len(), 5);
        assert!(matched.iter().all(|q| q.0 == id(1)));
    }

    #[test]
    fn matching_finds_quads_with_maximal_bound_component() {
        let mut set = OrderedQuadSet::new(Permutation::Spog);
        set.insert((id(u32::MAX), id(1), id(1), id(0)));
        set.insert((id(1), id(1), id(1), id(0)));
        let pattern = IdPattern {
            subject: Some(id(u32::MAX)),
            ..Default::default()
        };
        let matched: Vec<_> = set.matching(&pattern).collect();
        assert_eq!(matched, vec![(id(u32::MAX), id(1), id(1), id(0))]);
    }

    #[test]
    fn matching_finds_quads_with_all_maximal_bound_components() {
        let mut set = OrderedQuadSet::new(Permutation::Spog);
        let max_quad = (id(u32::MAX), id(u32::MAX), id(u32::MAX), id(u32::MAX));
        set.insert(max_quad);
        set.insert((id(1), id(1), id(1), id(0)));
        let pattern = IdPattern {
            subject: Some(id(u32::MAX)),
            predicate: Some(id(u32::MAX)),
            object: Some(id(u32::MAX)),
            graph: Some(id(u32::MAX)),
        };
        let matched: Vec<_> = set.matching(&pattern).collect();
        assert_eq!(matched, vec![max_quad]);
    }
}
