use crate::errors::MatroidError;
use hashbrown::HashMap;
use itertools::Itertools;
use std::fmt::{Debug, Error, Formatter};
use std::hash::Hash;
use std::ops::Index;

/// Position of an atom in the ground set of a matroid.
///
/// Positions are dense, start at 0 and follow the order in which atoms were given.
/// They are only used for ordering the enumerations and are never required from the client.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Debug)]
pub struct AtomId(u32);

impl AtomId {
    pub const fn to_u32(self) -> u32 {
        self.0
    }
    pub const fn from_u32(u: u32) -> Self {
        AtomId(u)
    }
}
impl From<usize> for AtomId {
    fn from(u: usize) -> Self {
        debug_assert!(u <= u32::MAX as usize, "atom position overflow: {u}");
        Self::from_u32(u as u32)
    }
}
impl From<AtomId> for usize {
    fn from(v: AtomId) -> Self {
        v.0 as usize
    }
}

/// The ground set `E` of a matroid: an ordered sequence of distinct atoms.
///
/// The set keeps a reverse index from atoms to their position so that client-supplied subsets can be
/// mapped to positions without ever mutating the atoms themselves.
#[derive(Clone)]
pub struct GroundSet<A> {
    atoms: Vec<A>,
    positions: HashMap<A, AtomId>,
}

impl<A: Debug> Debug for GroundSet<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{{{:?}}}", self.atoms.iter().format(", "))
    }
}

impl<A: Clone + Eq + Hash> GroundSet<A> {
    /// Indexes the given atoms, in order.
    ///
    /// Returns an error if an atom appears twice.
    pub fn new(atoms: impl IntoIterator<Item = A>) -> Result<Self, MatroidError> {
        let atoms: Vec<A> = atoms.into_iter().collect();
        let mut positions = HashMap::with_capacity(atoms.len());
        for (position, atom) in atoms.iter().enumerate() {
            if positions.insert(atom.clone(), AtomId::from(position)).is_some() {
                return Err(MatroidError::DuplicateAtom { position });
            }
        }
        Ok(GroundSet { atoms, positions })
    }

    /// Returns the position of the atom, or `None` if it is not part of the ground set.
    pub fn position(&self, atom: &A) -> Option<AtomId> {
        self.positions.get(atom).copied()
    }

    /// Maps a subset of atoms to their positions, sorted in the order of the ground set.
    /// Repeated atoms are only kept once.
    pub fn resolve(&self, subset: &[A]) -> Result<Vec<AtomId>, MatroidError> {
        let mut ids = Vec::with_capacity(subset.len());
        for (index, atom) in subset.iter().enumerate() {
            match self.position(atom) {
                Some(id) => ids.push(id),
                None => return Err(MatroidError::UnknownAtom { index }),
            }
        }
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// Writes the atoms at the given positions into `out`, replacing its previous content.
    pub fn fill(&self, ids: impl IntoIterator<Item = AtomId>, out: &mut Vec<A>) {
        out.clear();
        out.extend(ids.into_iter().map(|id| self.atoms[usize::from(id)].clone()));
    }

    pub fn atoms_of(&self, ids: impl IntoIterator<Item = AtomId>) -> Vec<A> {
        let mut out = Vec::new();
        self.fill(ids, &mut out);
        out
    }
}

impl<A> GroundSet<A> {
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[A] {
        &self.atoms
    }

    pub fn ids(&self) -> impl Iterator<Item = AtomId> {
        (0..self.len()).map(AtomId::from)
    }

    pub fn get(&self, id: AtomId) -> &A {
        &self.atoms[usize::from(id)]
    }
}

impl<A> Index<AtomId> for GroundSet<A> {
    type Output = A;

    fn index(&self, index: AtomId) -> &Self::Output {
        self.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_follow_insertion_order() {
        let ground = GroundSet::new(["d", "b", "a"]).unwrap();
        assert_eq!(ground.len(), 3);
        assert_eq!(ground.position(&"d"), Some(AtomId::from(0usize)));
        assert_eq!(ground.position(&"a"), Some(AtomId::from(2usize)));
        assert_eq!(ground.position(&"z"), None);
        assert_eq!(ground[AtomId::from(1usize)], "b");
    }

    #[test]
    #[cfg(all(debug_assertions, target_pointer_width = "64"))]
    #[should_panic(expected = "atom position overflow")]
    fn positions_fit_in_32_bits() {
        let _ = AtomId::from(u32::MAX as usize + 1);
    }

    #[test]
    fn duplicates_are_rejected() {
        let res = GroundSet::new([1, 2, 3, 2]);
        assert_eq!(res.unwrap_err(), MatroidError::DuplicateAtom { position: 3 });
    }

    #[test]
    fn resolve_sorts_and_dedups() {
        let ground = GroundSet::new(['a', 'b', 'c', 'd']).unwrap();
        let ids = ground.resolve(&['c', 'a', 'c']).unwrap();
        assert_eq!(ground.atoms_of(ids), vec!['a', 'c']);
        assert_eq!(ground.resolve(&['a', 'x']), Err(MatroidError::UnknownAtom { index: 1 }));
    }
}
