//! [`QuadForest`]: a collection of [`OrderedQuadSet`]s keyed by [`Permutation`], with
//! pattern routing and set algebra (§4.3).
//!
//! Unlike `oxrdf::Dataset`, which eagerly maintains all six orders on every insert,
//! `QuadForest` keeps only the anchor eagerly and lazily builds the other five on first
//! use of a pattern that needs them — the one structural generalization this crate's
//! design requires beyond what the teacher's `Dataset` already does.

use crate::interner::{IdPattern, TermId};
use crate::ordered_set::OrderedQuadSet;
use crate::permutation::Permutation;

type IdQuad = (TermId, TermId, TermId, TermId);

/// A lazily-multiplexed set of equivalent [`OrderedQuadSet`]s, one per materialized
/// [`Permutation`], all holding the same elements.
#[derive(Debug, Default)]
pub struct QuadForest {
    sets: [Option<OrderedQuadSet>; 6],
    anchor: Option<usize>,
}

impl QuadForest {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_anchor(&mut self) -> usize {
        if let Some(anchor) = self.anchor {
            return anchor;
        }
        let index = Permutation::Spog.index();
        self.sets[index] = Some(OrderedQuadSet::new(Permutation::Spog));
        self.anchor = Some(index);
        index
    }

    fn materialized_mask(&self) -> [bool; 6] {
        let mut mask = [false; 6];
        for (i, set) in self.sets.iter().enumerate() {
            mask[i] = set.is_some();
        }
        mask
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn size(&self) -> usize {
        self.anchor.map_or(0, |a| {
            self.sets[a].as_ref().expect("anchor index always holds a set").len()
        })
    }

    pub fn materialized_count(&self) -> usize {
        self.sets.iter().filter(|s| s.is_some()).count()
    }

    pub fn insert(&mut self, quad: IdQuad) -> bool {
        let anchor = self.ensure_anchor();
        let newly_inserted = self.sets[anchor]
            .as_mut()
            .expect("anchor index always holds a set")
            .insert(quad);
        if newly_inserted {
            for (i, set) in self.sets.iter_mut().enumerate() {
                if i != anchor {
                    if let Some(set) = set {
                        set.insert(quad);
                    }
                }
            }
        }
        newly_inserted
    }

    pub fn remove(&mut self, quad: IdQuad) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let removed = self.sets[anchor]
            .as_mut()
            .expect("anchor index always holds a set")
            .remove(quad);
        if removed {
            for (i, set) in self.sets.iter_mut().enumerate() {
                if i != anchor {
                    if let Some(set) = set {
                        set.remove(quad);
                    }
                }
            }
        }
        removed
    }

    pub fn contains(&self, quad: IdQuad) -> bool {
        self.anchor
            .is_some_and(|a| self.sets[a].as_ref().expect("anchor holds a set").contains(quad))
    }

    pub fn bulk_load(&mut self, quads: impl IntoIterator<Item = IdQuad>) {
        let anchor = self.ensure_anchor();
        for quad in quads {
            let newly_inserted = self.sets[anchor]
                .as_mut()
                .expect("anchor index always holds a set")
                .insert(quad);
            if newly_inserted {
                for (i, set) in self.sets.iter_mut().enumerate() {
                    if i != anchor {
                        if let Some(set) = set {
                            set.insert(quad);
                        }
                    }
                }
            }
        }
    }

    /// Materializes an order whose prefix matches `pattern`'s bound positions if none is
    /// materialized yet, copying the anchor's elements under the new comparator.
    pub fn ensure_index(&mut self, pattern: &IdPattern) {
        let anchor = self.ensure_anchor();
        let permutation = Permutation::select(pattern, self.materialized_mask());
        let index = permutation.index();
        if self.sets[index].is_none() {
            let elements: Vec<_> = self.sets[anchor]
                .as_ref()
                .expect("anchor index always holds a set")
                .iter()
                .collect();
            self.sets[index] = Some(OrderedQuadSet::from_quads(permutation, elements));
        }
    }

    pub fn ensure_index_for_permutation(&mut self, permutation: Permutation) {
        let anchor = self.ensure_anchor();
        let index = permutation.index();
        if self.sets[index].is_none() {
            let elements: Vec<_> = self.sets[anchor]
                .as_ref()
                .expect("anchor index always holds a set")
                .iter()
                .collect();
            self.sets[index] = Some(OrderedQuadSet::from_quads(permutation, elements));
        }
    }

    pub fn matching(&mut self, pattern: &IdPattern) -> Vec<IdQuad> {
        if self.anchor.is_none() {
            return Vec::new();
        }
        self.ensure_index(pattern);
        let permutation = Permutation::select(pattern, self.materialized_mask());
        self.sets[permutation.index()]
            .as_ref()
            .expect("ensure_index just materialized this order")
            .matching(pattern)
            .collect()
    }

    pub fn matching_count(&mut self, pattern: &IdPattern) -> usize {
        if self.anchor.is_none() {
            return 0;
        }
        self.ensure_index(pattern);
        let permutation = Permutation::select(pattern, self.materialized_mask());
        self.sets[permutation.index()]
            .as_ref()
            .expect("ensure_index just materialized this order")
            .matching_count(pattern)
    }

    /// Computes the match set once, then removes it from every materialized order.
    pub fn delete_matches(&mut self, pattern: &IdPattern) -> usize {
        let matches = self.matching(pattern);
        for quad in &matches {
            self.remove(*quad);
        }
        matches.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = IdQuad> + '_ {
        self.anchor
            .into_iter()
            .flat_map(|a| self.sets[a].as_ref().expect("anchor holds a set").iter())
    }

    pub fn union(&mut self, other: impl IntoIterator<Item = IdQuad>) {
        for quad in other {
            self.insert(quad);
        }
    }

    pub fn intersection(&self, other: impl Fn(IdQuad) -> bool) -> Vec<IdQuad> {
        self.iter().filter(|q| other(*q)).collect()
    }

    pub fn difference(&self, other: impl Fn(IdQuad) -> bool) -> Vec<IdQuad> {
        self.iter().filter(|q| !other(*q)).collect()
    }

    pub fn contains_all(&self, other: impl IntoIterator<Item = IdQuad>) -> bool {
        other.into_iter().all(|q| self.contains(q))
    }

    pub fn free(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> TermId {
        TermId(n)
    }

    fn q(s: u32, p: u32, o: u32, g: u32) -> IdQuad {
        (id(s), id(p), id(o), id(g))
    }

    #[test]
    fn insert_is_visible_across_materialized_orders() {
        let mut forest = QuadForest::new();
        forest.insert(q(1, 2, 3, 0));
        let subject_pattern = IdPattern {
            subject: Some(id(1)),
            ..Default::default()
        };
        assert_eq!(forest.matching(&subject_pattern).len(), 1);
        let object_pattern = IdPattern {
            object: Some(id(3)),
            ..Default::default()
        };
        assert_eq!(forest.matching(&object_pattern).len(), 1);
        assert_eq!(forest.materialized_count(), 2);
    }

    #[test]
    fn delete_matches_removes_from_every_materialized_order() {
        let mut forest = QuadForest::new();
        forest.insert(q(1, 2, 3, 0));
        forest.insert(q(1, 2, 4, 0));
        let object_pattern = IdPattern {
            object: Some(id(3)),
            ..Default::default()
        };
        forest.matching(&object_pattern); // materialize an order keyed by object
        let predicate_pattern = IdPattern {
            predicate: Some(id(2)),
            ..Default::default()
        };
        let removed = forest.delete_matches(&predicate_pattern);
        assert_eq!(removed, 2);
        assert_eq!(forest.size(), 0);
    }

    #[test]
    fn empty_forest_edge_cases() {
        let mut forest = QuadForest::new();
        assert_eq!(forest.matching(&IdPattern::default()).len(), 0);
        assert_eq!(forest.matching_count(&IdPattern::default()), 0);
        assert!(forest.contains_all(Vec::new()));
    }
}
