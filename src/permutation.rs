//! The six orderings used to sort identifier quads (§4.2): `SPOG, POGS, OGSP, GSPO, GPOS,
//! OSPG`. Every one of the sixteen possible pattern shapes (each of subject, predicate,
//! object, graph bound or wildcard) has at least one of these six orders whose prefix is a
//! permutation of its bound positions, so any pattern reduces to a single contiguous range
//! scan once the right order is materialized.

use crate::interner::{IdPattern, TermId};

/// A quad position.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Component {
    Subject,
    Predicate,
    Object,
    Graph,
}

impl Component {
    fn get(self, quad: (TermId, TermId, TermId, TermId)) -> TermId {
        match self {
            Self::Subject => quad.0,
            Self::Predicate => quad.1,
            Self::Object => quad.2,
            Self::Graph => quad.3,
        }
    }

    fn bound_in(self, pattern: &IdPattern) -> Option<TermId> {
        match self {
            Self::Subject => pattern.subject,
            Self::Predicate => pattern.predicate,
            Self::Object => pattern.object,
            Self::Graph => pattern.graph,
        }
    }
}

/// One of the six orderings a [`crate::forest::QuadForest`] can materialize an
/// [`crate::ordered_set::OrderedQuadSet`] under.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Permutation {
    Spog,
    Pogs,
    Ogsp,
    Gspo,
    Gpos,
    Ospg,
}

impl Permutation {
    pub const ALL: [Self; 6] = [
        Self::Spog,
        Self::Pogs,
        Self::Ogsp,
        Self::Gspo,
        Self::Gpos,
        Self::Ospg,
    ];

    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).expect("exhaustive ALL")
    }

    /// The four quad positions, in this permutation's sort priority order.
    pub fn components(self) -> [Component; 4] {
        use Component::{Graph, Object, Predicate, Subject};
        match self {
            Self::Spog => [Subject, Predicate, Object, Graph],
            Self::Pogs => [Predicate, Object, Graph, Subject],
            Self::Ogsp => [Object, Graph, Subject, Predicate],
            Self::Gspo => [Graph, Subject, Predicate, Object],
            Self::Gpos => [Graph, Predicate, Object, Subject],
            Self::Ospg => [Object, Subject, Predicate, Graph],
        }
    }

    /// Rearranges a canonical `(s, p, o, g)` tuple into this permutation's sort-key order.
    pub fn permute(self, quad: (TermId, TermId, TermId, TermId)) -> [TermId; 4] {
        self.components().map(|c| c.get(quad))
    }

    /// The inverse of [`Self::permute`].
    pub fn unpermute(self, key: [TermId; 4]) -> (TermId, TermId, TermId, TermId) {
        let mut out = [TermId::DEFAULT_GRAPH; 4];
        for (component, value) in self.components().into_iter().zip(key) {
            let slot = match component {
                Component::Subject => 0,
                Component::Predicate => 1,
                Component::Object => 2,
                Component::Graph => 3,
            };
            out[slot] = value;
        }
        (out[0], out[1], out[2], out[3])
    }

    /// If this permutation's prefix is exactly the bound positions of `pattern` (in any
    /// order), returns the bound values in this permutation's sort-key order followed by
    /// `None` for the wildcard suffix. Otherwise returns `None`: the pattern cannot be
    /// answered by a single contiguous range scan on this permutation.
    pub fn prefix_bounds(self, pattern: &IdPattern) -> Option<Vec<Option<TermId>>> {
        let components = self.components();
        let mut seen_wildcard = false;
        let mut bounds = Vec::with_capacity(4);
        for component in components {
            match component.bound_in(pattern) {
                Some(value) if !seen_wildcard => bounds.push(Some(value)),
                Some(_) => return None, // a bound position follows a wildcard: not a prefix
                None => {
                    seen_wildcard = true;
                    bounds.push(None);
                }
            }
        }
        Some(bounds)
    }

    /// Selects the permutation whose prefix matches `pattern`'s bound positions, preferring
    /// an already-materialized one (§4.2 selection rule), falling back to the lowest index.
    pub fn select(pattern: &IdPattern, materialized: [bool; 6]) -> Self {
        let mut fallback = None;
        for permutation in Self::ALL {
            if permutation.prefix_bounds(pattern).is_some() {
                if materialized[permutation.index()] {
                    return permutation;
                }
                if fallback.is_none() {
                    fallback = Some(permutation);
                }
            }
        }
        fallback.expect("every pattern shape is covered by at least one of the six permutations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> TermId {
        TermId(n)
    }

    #[test]
    fn permute_unpermute_round_trips() {
        let quad = (id(1), id(2), id(3), id(4));
        for permutation in Permutation::ALL {
            let permuted = permutation.permute(quad);
            assert_eq!(permutation.unpermute(permuted), quad);
        }
    }

    #[test]
    fn every_pattern_shape_is_covered() {
        for s in [None, Some(id(1))] {
            for p in [None, Some(id(2))] {
                for o in [None, Some(id(3))] {
                    for g in [None, Some(id(4))] {
                        let pattern = IdPattern {
                            subject: s,
                            predicate: p,
                            object: o,
                            graph: g,
                        };
                        let selected = Permutation::select(&pattern, [false; 6]);
                        assert!(selected.prefix_bounds(&pattern).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn selection_prefers_materialized() {
        let pattern = IdPattern {
            subject: Some(id(1)),
            predicate: None,
            object: None,
            graph: None,
        };
        // Pogs also qualifies for {subject} only if its prefix matched, which it doesn't;
        // Spog is the only prefix match for a subject-only pattern, so it must be chosen
        // regardless of the materialized mask.
        let selected = Permutation::select(&pattern, [false; 6]);
        assert_eq!(selected, Permutation::Spog);
    }
}
