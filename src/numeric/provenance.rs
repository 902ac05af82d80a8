// ============================================================================
// Provenance
// Identity tags and the set of root quantities a value was derived from
// ============================================================================

use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide source of identity tags. Only ever incremented.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identity of a constructed quantity.
///
/// Tags are never reused within a process, so two quantities with equal
/// nominal value and deviation still carry distinct identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuantityId(u64);

impl QuantityId {
    /// Allocate the next identity tag.
    #[inline]
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for QuantityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sorted, deduplicated set of identity tags.
///
/// Most values are derived from a handful of roots, so the set stays inline
/// until it outgrows four members.
///
/// Tags are never removed. Every derived value adds its own tag on top of its
/// parents', so a left fold over `n` quantities (as `Sum` does) ends with
/// about `2n` tags and does `O(n²)` merge work overall. Dropping an
/// intermediate value does not shrink the sets of values derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Provenance {
    ids: SmallVec<[QuantityId; 4]>,
}

impl Provenance {
    /// Provenance of a root quantity: exactly itself.
    pub(crate) fn root(id: QuantityId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(id);
        Self { ids }
    }

    /// `self ∪ other ∪ {id}`, built fresh.
    pub(crate) fn derive(id: QuantityId, parents: &[&Provenance]) -> Self {
        let mut merged = Self::root(id);
        for parent in parents {
            merged = merged.union(parent);
        }
        merged
    }

    /// Linear merge of two sorted tag lists.
    fn union(&self, other: &Provenance) -> Self {
        let mut ids = SmallVec::with_capacity(self.ids.len() + other.ids.len());
        let (mut i, mut j) = (0, 0);

        while i < self.ids.len() && j < other.ids.len() {
            let (left, right) = (self.ids[i], other.ids[j]);
            if left < right {
                ids.push(left);
                i += 1;
            } else if right < left {
                ids.push(right);
                j += 1;
            } else {
                ids.push(left);
                i += 1;
                j += 1;
            }
        }
        ids.extend_from_slice(&self.ids[i..]);
        ids.extend_from_slice(&other.ids[j..]);

        Self { ids }
    }

    #[inline]
    pub fn contains(&self, id: QuantityId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = QuantityId> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = QuantityId::next();
        let b = QuantityId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_root_contains_itself() {
        let id = QuantityId::next();
        let p = Provenance::root(id);
        assert!(p.contains(id));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_derive_unions_parents() {
        let a = QuantityId::next();
        let b = QuantityId::next();
        let c = QuantityId::next();
        let pa = Provenance::root(a);
        let pb = Provenance::root(b);
        let ab = Provenance::derive(c, &[&pa, &pb]);

        assert_eq!(ab.iter().collect::<Vec<_>>(), vec![a, b, c]);

        // Shared members are not duplicated
        let d = QuantityId::next();
        let again = Provenance::derive(d, &[&ab, &pa]);
        assert_eq!(again.len(), 4);
        assert!(again.contains(a) && again.contains(d));
    }

    #[test]
    fn test_union_spills_past_inline_capacity() {
        let parents: Vec<Provenance> = (0..6).map(|_| Provenance::root(QuantityId::next())).collect();
        let refs: Vec<&Provenance> = parents.iter().collect();
        let merged = Provenance::derive(QuantityId::next(), &refs);

        assert_eq!(merged.len(), 7);
        let ids: Vec<_> = merged.iter().collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
