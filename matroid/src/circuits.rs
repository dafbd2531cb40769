use crate::combinations::Combinations;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Debug, Formatter};
use streaming_iterator::StreamingIterator;

/// A small circuit, as increasing positions of the enumerated set.
pub type Circuit = SmallVec<[usize; 4]>;

/// A collection of small circuits, used to discard combinations without querying the oracle.
///
/// Any combination containing a known circuit is dependent, and so is any other combination sharing
/// the prefix that covers the circuit. [`KnownCircuits::blocking_slot`] identifies this prefix so that
/// the enumeration can skip all of them at once.
///
/// The cache is local to a single search: it is tied to the positions of the set being enumerated
/// and must be rebuilt whenever this set changes.
#[derive(Clone, Default)]
pub struct KnownCircuits {
    circuits: Vec<Circuit>,
    /// All combinations of at most this size were decided during population.
    settled: usize,
}

impl Debug for KnownCircuits {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}]", self.circuits.iter().format(", "))
    }
}

impl KnownCircuits {
    pub fn new() -> Self {
        KnownCircuits::default()
    }

    /// Records all circuits of at most `max_size` elements among `n` positions.
    ///
    /// Candidates are enumerated by increasing size and `is_dependent` is invoked once on every
    /// candidate that does not already contain a recorded circuit. Hence, only minimal dependent sets are recorded.
    pub fn populate(n: usize, max_size: usize, mut is_dependent: impl FnMut(&[usize]) -> bool) -> Self {
        let mut known = KnownCircuits::new();
        known.settled = max_size.min(n);
        for size in 1..=known.settled {
            let mut combs = Combinations::new(n, size);
            while let Some(comb) = combs.next() {
                if let Some(slot) = known.blocking_slot(comb) {
                    combs.skip_from(slot);
                } else if is_dependent(comb) {
                    known.circuits.push(comb.iter().copied().collect());
                }
            }
        }
        known
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    /// Largest size of the combinations decided by the population: a combination of at most this size
    /// is independent iff it contains no known circuit, and the oracle needs not be queried again.
    pub fn settled_size(&self) -> usize {
        self.settled
    }

    /// Removes all circuits with more than `size` elements, that can no longer be part of a combination of this size.
    pub fn retain_fitting(&mut self, size: usize) {
        self.circuits.retain(|c| c.len() <= size);
    }

    /// If the (increasing) combination contains a known circuit, returns the smallest slot `i` such that
    /// `combination[0..=i]` contains a known circuit.
    ///
    /// All combinations starting with `combination[0..=i]` are dependent.
    pub fn blocking_slot(&self, combination: &[usize]) -> Option<usize> {
        self.circuits
            .iter()
            .filter(|c| c.len() <= combination.len())
            .filter_map(|c| last_matching_slot(c, combination))
            .min()
    }
}

/// If all elements of `circuit` appear in `combination`, returns the slot of `combination` holding the last one.
/// Both sequences must be increasing.
fn last_matching_slot(circuit: &[usize], combination: &[usize]) -> Option<usize> {
    let mut slot = 0;
    let mut last = None;
    for &elem in circuit {
        while slot < combination.len() && combination[slot] < elem {
            slot += 1;
        }
        if slot == combination.len() || combination[slot] != elem {
            return None;
        }
        last = Some(slot);
        slot += 1;
    }
    last
}
