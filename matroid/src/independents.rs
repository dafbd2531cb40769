//! Enumeration of all independent subsets.
//!
//! Candidates are always processed by increasing size. Once an independent candidate of size `r` was found,
//! a candidate of size `r + 2` or more can only be independent if some candidate of size `r + 1` is,
//! so the scan stops as soon as it reaches such a candidate.

use crate::errors::MatroidError;
use crate::ground::{AtomId, GroundSet};
use crate::oracle::Oracle;
use crate::stats::SearchStats;
use itertools::Itertools;
use std::hash::Hash;

/// Returns all independent subsets among the candidates, by increasing size.
///
/// The candidates are expected to be closed under inclusion (as the subsets of a ground set are): the scan
/// stops at the first size exceeding the largest independent candidate found so far by more than one.
/// Empty candidates are independent and never submitted to the oracle.
///
/// ```
/// use matroid::filter_independents;
/// let candidates = vec![vec![1, 2], vec![1], vec![], vec![2], vec![1, 2, 3]];
/// let independents = filter_independents(candidates, &|s: &[u32]| s.len() > 1);
/// assert_eq!(independents, vec![vec![], vec![1], vec![2]]);
/// ```
pub fn filter_independents<A, O>(candidates: Vec<Vec<A>>, oracle: &O) -> Vec<Vec<A>>
where
    O: Oracle<A> + ?Sized,
{
    let mut stats = SearchStats::new();
    let independents = filter_by_size(candidates, |c| c.len(), |c| {
        stats.add_oracle_call();
        oracle.has_circuit(c)
    });
    tracing::debug!(num_independents = independents.len(), oracle_calls = stats.oracle_calls, "filtered independents");
    independents
}

/// Returns all independent subsets of the atoms, by increasing size, starting with the empty set.
///
/// The subsets are built by extending independent subsets one atom at a time, so that the power set
/// is never materialized. Each subset is in the order of `atoms`.
///
/// ```
/// use matroid::find_independents;
/// let independents = find_independents(&['a', 'b', 'c', 'd'], &|_: &[char]| false).unwrap();
/// assert_eq!(independents.len(), 16);
/// assert_eq!(independents.last().unwrap(), &vec!['a', 'b', 'c', 'd']);
/// ```
pub fn find_independents<A, O>(atoms: &[A], oracle: &O) -> Result<Vec<Vec<A>>, MatroidError>
where
    A: Clone + Eq + Hash,
    O: Oracle<A> + ?Sized,
{
    let ground = GroundSet::new(atoms.iter().cloned())?;
    let mut stats = SearchStats::new();
    let independents = independent_ids(&ground, oracle, &mut stats);
    Ok(independents.into_iter().map(|s| ground.atoms_of(s)).collect_vec())
}

/// Returns all independent subsets of the ground set as sorted positions, by increasing size.
pub(crate) fn independent_ids<A, O>(ground: &GroundSet<A>, oracle: &O, stats: &mut SearchStats) -> Vec<Vec<AtomId>>
where
    A: Clone + Eq + Hash,
    O: Oracle<A> + ?Sized,
{
    let _span = tracing::trace_span!("independents", n = ground.len()).entered();
    let n = ground.len();
    let mut buffer = Vec::new();
    let mut all: Vec<Vec<AtomId>> = vec![Vec::new()];
    let mut generation: Vec<Vec<AtomId>> = ground.ids().map(|id| vec![id]).collect();

    while !generation.is_empty() {
        let size = generation[0].len();
        let independents = filter_by_size(generation, |c| c.len(), |c| {
            ground.fill(c.iter().copied(), &mut buffer);
            stats.add_oracle_call();
            oracle.has_circuit(&buffer)
        });
        tracing::trace!(size, num_independents = independents.len());

        // extend each independent set with the atoms after its last one, which generates each candidate once
        generation = independents
            .iter()
            .flat_map(|set| {
                let after_last = set.last().map_or(0, |&id| usize::from(id) + 1);
                (after_last..n).map(move |next| {
                    let mut extended = Vec::with_capacity(set.len() + 1);
                    extended.extend_from_slice(set);
                    extended.push(AtomId::from(next));
                    extended
                })
            })
            .collect();
        all.extend(independents);
    }
    tracing::debug!(
        num_independents = all.len(),
        rank = all.last().map_or(0, |s| s.len()),
        oracle_calls = stats.oracle_calls,
        "independents"
    );
    all
}

/// Sorts the candidates by increasing size and keeps the independent ones, stopping as soon as
/// no larger independent candidate can exist.
fn filter_by_size<S>(
    mut candidates: Vec<S>,
    size: impl Fn(&S) -> usize,
    mut is_dependent: impl FnMut(&S) -> bool,
) -> Vec<S> {
    candidates.sort_by_key(&size);
    let mut rank: Option<usize> = None;
    let mut independents = Vec::new();
    for candidate in candidates {
        let len = size(&candidate);
        if rank.is_some_and(|r| len > r + 1) {
            break;
        }
        if len == 0 || !is_dependent(&candidate) {
            rank = Some(len);
            independents.push(candidate);
        }
    }
    independents
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn free_matroid() {
        let atoms = ['a', 'b', 'c', 'd'];
        let independents = find_independents(&atoms, &|_: &[char]| false).unwrap();
        assert_eq!(independents.len(), 16);
        assert_eq!(independents[0], Vec::<char>::new());
        assert_eq!(independents[15], atoms.to_vec());
        assert!(independents.windows(2).all(|w| w[0].len() <= w[1].len()));
        assert_eq!(independents.iter().unique().count(), 16);
    }

    #[test]
    fn fully_dependent() {
        let calls = Cell::new(0);
        let oracle = |_: &[char]| {
            calls.set(calls.get() + 1);
            true
        };
        let independents = find_independents(&['a', 'b', 'c'], &oracle).unwrap();
        assert_eq!(independents, vec![Vec::<char>::new()]);
        // only singletons are submitted
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn uniform_matroid() {
        // U(2, 4): any set of at most 2 elements is independent
        let independents = find_independents(&[1, 2, 3, 4], &|s: &[i32]| s.len() > 2).unwrap();
        assert_eq!(independents.len(), 1 + 4 + 6);
        assert!(independents.iter().all(|s| s.len() <= 2));
        assert!(independents.iter().all(|s| s.windows(2).all(|w| w[0] < w[1])));
    }

    #[test]
    fn filtering_stops_early() {
        let calls = Cell::new(0);
        let oracle = |s: &[u32]| {
            calls.set(calls.get() + 1);
            s.len() > 1
        };
        let candidates = vec![vec![1, 2, 3], vec![1], vec![1, 2], vec![2, 3], vec![1, 2, 3, 4]];
        let independents = filter_independents(candidates, &oracle);
        assert_eq!(independents, vec![vec![1]]);
        // [1], [1, 2] and [2, 3] are checked, then [1, 2, 3] is more than one element above the rank
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn filtering_without_singletons() {
        // no independent candidate found yet, larger candidates must still be checked
        let candidates = vec![vec!['x', 'y', 'z'], vec!['a', 'b']];
        let independents = filter_independents(candidates, &|s: &[char]| s.contains(&'a'));
        assert_eq!(independents, vec![vec!['x', 'y', 'z']]);
    }
}
