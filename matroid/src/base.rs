//! Search for maximum independent subsets (bases).
//!
//! The search tries combinations of decreasing sizes, starting from the size of the enumerated set
//! (or from a known upper bound on the rank). The first size at which an independent combination
//! exists is the rank: by the exchange property of matroids, all bases have this size.
//!
//! When enabled in the [`SearchConfig`], small circuits are computed first and used to skip
//! whole ranges of combinations that are known to be dependent. Combinations small enough to have been
//! decided while computing these circuits are never submitted to the oracle again, and no search
//! submits the same combination twice.

use crate::circuits::KnownCircuits;
use crate::combinations::Combinations;
use crate::config::SearchConfig;
use crate::errors::MatroidError;
use crate::ground::{AtomId, GroundSet};
use crate::oracle::Oracle;
use crate::stats::SearchStats;
use hashbrown::HashMap;
use itertools::Itertools;
use std::hash::Hash;
use streaming_iterator::StreamingIterator;

/// Returns some base of the atoms, using the default [`SearchConfig`].
///
/// ```
/// use matroid::find_base;
/// let base = find_base(&['a', 'b', 'c', 'd'], &|s: &[char]| s.contains(&'a') && s.contains(&'b')).unwrap();
/// assert_eq!(base.len(), 3);
/// ```
pub fn find_base<A, O>(atoms: &[A], oracle: &O) -> Result<Vec<A>, MatroidError>
where
    A: Clone + Eq + Hash,
    O: Oracle<A> + ?Sized,
{
    find_base_with(atoms, oracle, SearchConfig::default())
}

/// Returns some base of the atoms.
pub fn find_base_with<A, O>(atoms: &[A], oracle: &O, config: SearchConfig) -> Result<Vec<A>, MatroidError>
where
    A: Clone + Eq + Hash,
    O: Oracle<A> + ?Sized,
{
    let ground = GroundSet::new(atoms.iter().cloned())?;
    Ok(BaseSearch::new(&ground, oracle, config).find_base())
}

/// Returns all bases of the atoms, using the default [`SearchConfig`].
///
/// When every atom is a loop, the result is the single empty base `[[]]` rather than no base at all.
pub fn find_all_bases<A, O>(atoms: &[A], oracle: &O) -> Result<Vec<Vec<A>>, MatroidError>
where
    A: Clone + Eq + Hash,
    O: Oracle<A> + ?Sized,
{
    let ground = GroundSet::new(atoms.iter().cloned())?;
    Ok(BaseSearch::new(&ground, oracle, SearchConfig::default()).find_all_bases())
}

/// Searches for bases of a subset (the scope) of a ground set.
///
/// The search keeps its known circuits across calls, which are only valid for its scope.
/// A `BaseSearch` is meant to be used for a single query (or a few queries on the same scope) and then dropped.
pub struct BaseSearch<'a, A, O: ?Sized> {
    ground: &'a GroundSet<A>,
    /// Atoms being enumerated, in the order of the ground set.
    /// Combinations are made of indices into this vector.
    scope: Vec<AtomId>,
    oracle: &'a O,
    config: SearchConfig,
    known: Option<KnownCircuits>,
    queries: Queries<A>,
}

impl<'a, A, O> BaseSearch<'a, A, O>
where
    A: Clone + Eq + Hash,
    O: Oracle<A> + ?Sized,
{
    /// A search over the entire ground set.
    pub fn new(ground: &'a GroundSet<A>, oracle: &'a O, config: SearchConfig) -> Self {
        Self::within(ground, ground.ids().collect(), oracle, config)
    }

    /// A search restricted to the given atoms of the ground set, that then act as the ground set of the search.
    /// The scope is expected to be sorted and without duplicates, as returned by [`GroundSet::resolve`].
    pub fn within(ground: &'a GroundSet<A>, scope: Vec<AtomId>, oracle: &'a O, config: SearchConfig) -> Self {
        debug_assert!(scope.windows(2).all(|w| w[0] < w[1]));
        BaseSearch {
            ground,
            scope,
            oracle,
            config,
            known: None,
            queries: Queries::new(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.queries.stats
    }

    /// Returns a maximum independent subset of the scope, in the order of the ground set.
    pub fn find_base(&mut self) -> Vec<A> {
        let base = self.find_base_ids();
        self.ground.atoms_of(base)
    }

    /// Same as [`BaseSearch::find_base`] but only considers subsets of at most `bound` elements.
    /// If `bound` is at least the rank of the scope, the result is a base.
    pub fn find_base_bounded(&mut self, bound: usize) -> Vec<A> {
        let base = self.find_base_ids_bounded(bound);
        self.ground.atoms_of(base)
    }

    /// Size of the bases of the scope.
    pub fn rank(&mut self) -> usize {
        self.find_base_ids().len()
    }

    /// Returns all maximum independent subsets of the scope.
    ///
    /// When the rank is 0, the only base is the empty set: the result is `[[]]`, never an empty list.
    pub fn find_all_bases(&mut self) -> Vec<Vec<A>> {
        let rank = self.rank();
        self.find_all_bases_of_rank(rank)
    }

    /// Returns all independent subsets of the scope with exactly `rank` elements.
    /// If `rank` is the rank of the scope, these are all its bases.
    pub fn find_all_bases_of_rank(&mut self, rank: usize) -> Vec<Vec<A>> {
        let _span = tracing::trace_span!("all bases", n = self.scope.len(), rank).entered();
        let bases = if rank == 0 {
            vec![Vec::new()]
        } else {
            self.populate_known_circuits();
            self.independent_combinations(rank, false)
        };
        tracing::debug!(rank, num_bases = bases.len(), oracle_calls = self.stats().oracle_calls, "all bases");
        bases
            .into_iter()
            .map(|comb| self.ground.atoms_of(comb.iter().map(|&i| self.scope[i])))
            .collect_vec()
    }

    pub(crate) fn find_base_ids(&mut self) -> Vec<AtomId> {
        self.find_base_ids_bounded(self.scope.len())
    }

    pub(crate) fn find_base_ids_bounded(&mut self, bound: usize) -> Vec<AtomId> {
        let _span = tracing::trace_span!("base", n = self.scope.len(), bound).entered();
        let upper = bound.min(self.scope.len());
        self.populate_known_circuits();
        let mut base = Vec::new();
        for size in (1..=upper).rev() {
            tracing::trace!(size, "looking for an independent combination");
            if let Some(comb) = self.independent_combinations(size, true).pop() {
                base = comb.iter().map(|&i| self.scope[i]).collect_vec();
                break;
            }
        }
        tracing::debug!(
            rank = base.len(),
            oracle_calls = self.stats().oracle_calls,
            pruned = self.stats().pruned,
            "base found"
        );
        base
    }

    /// Records the circuits of the scope of at most the configured size, if enabled and not done yet.
    fn populate_known_circuits(&mut self) {
        let bound = self.config.circuit_bound();
        if bound == 0 || self.known.is_some() {
            return;
        }
        let (ground, scope, oracle) = (self.ground, &self.scope, self.oracle);
        let queries = &mut self.queries;
        let known = KnownCircuits::populate(scope.len(), bound, |comb| {
            queries.is_dependent(ground, scope, oracle, comb)
        });
        tracing::trace!(num = known.len(), circuits = ?known, "known circuits");
        self.queries.stats.known_circuits = known.len() as u64;
        self.known = Some(known);
    }

    /// Enumerates the combinations of `size` elements of the scope, and returns the independent ones.
    /// If `first_only` is set, the enumeration stops at the first independent combination.
    fn independent_combinations(&mut self, size: usize, first_only: bool) -> Vec<Vec<usize>> {
        if let Some(known) = &mut self.known {
            known.retain_fitting(size);
        }
        // up to the settled size, containing no known circuit is enough to be independent
        let settled = self.known.as_ref().is_some_and(|k| size <= k.settled_size());
        let mut found = Vec::new();
        let mut combs = Combinations::new(self.scope.len(), size);
        while let Some(comb) = combs.next() {
            self.queries.stats.add_visit();
            if let Some(slot) = self.known.as_ref().and_then(|k| k.blocking_slot(comb)) {
                self.queries.stats.add_pruned();
                combs.skip_from(slot);
                continue;
            }
            if settled || !self.queries.is_dependent(self.ground, &self.scope, self.oracle, comb) {
                found.push(comb.to_vec());
                if first_only {
                    break;
                }
            }
        }
        found
    }
}

/// Answers of the oracle within a single search, so that each combination is submitted at most once.
struct Queries<A> {
    answers: HashMap<Vec<usize>, bool>,
    stats: SearchStats,
    /// Reusable buffer for the atoms passed to the oracle.
    buffer: Vec<A>,
}

impl<A: Clone + Eq + Hash> Queries<A> {
    fn new() -> Self {
        Queries {
            answers: HashMap::new(),
            stats: SearchStats::new(),
            buffer: Vec::new(),
        }
    }

    /// Decides whether the atoms designated by `comb`, as indices into `scope`, contain a circuit.
    fn is_dependent<O: Oracle<A> + ?Sized>(
        &mut self,
        ground: &GroundSet<A>,
        scope: &[AtomId],
        oracle: &O,
        comb: &[usize],
    ) -> bool {
        if let Some(&dependent) = self.answers.get(comb) {
            return dependent;
        }
        ground.fill(comb.iter().map(|&i| scope[i]), &mut self.buffer);
        self.stats.add_oracle_call();
        let dependent = oracle.has_circuit(&self.buffer);
        self.answers.insert(comb.to_vec(), dependent);
        dependent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// A graph on 4 vertices: a triangle 0-1-2 plus a pendant edge 2-3, and a parallel edge to 0-1.
    /// Its graphic matroid has rank 3.
    const EDGES: [(u32, u32); 5] = [(0, 1), (1, 2), (0, 2), (2, 3), (0, 1)];

    /// A set of edges has a circuit if it contains a cycle.
    fn has_cycle(edges: &[usize]) -> bool {
        let mut parent: Vec<u32> = (0..4).collect();
        fn find(parent: &[u32], x: u32) -> u32 {
            let mut x = x;
            while parent[x as usize] != x {
                x = parent[x as usize];
            }
            x
        }
        for &e in edges {
            let (a, b) = EDGES[e];
            let (ra, rb) = (find(&parent, a), find(&parent, b));
            if ra == rb {
                return true;
            }
            parent[ra as usize] = rb;
        }
        false
    }

    fn ground() -> GroundSet<usize> {
        GroundSet::new(0..EDGES.len()).unwrap()
    }

    #[test]
    fn base_of_graphic_matroid() {
        let ground = ground();
        for config in [SearchConfig::exhaustive(), SearchConfig::with_known_circuits(3)] {
            let mut search = BaseSearch::new(&ground, &has_cycle, config);
            let base = search.find_base();
            assert_eq!(base.len(), 3);
            assert!(!has_cycle(&base));
        }
    }

    #[test]
    fn all_bases_of_graphic_matroid() {
        let ground = ground();
        let mut exhaustive = BaseSearch::new(&ground, &has_cycle, SearchConfig::exhaustive());
        let mut pruned = BaseSearch::new(&ground, &has_cycle, SearchConfig::with_known_circuits(2));
        let bases = exhaustive.find_all_bases();
        // spanning trees: edge 3 plus two edges of the triangle, with edge 4 substituting edge 0: 3 + 2
        assert_eq!(bases.len(), 5);
        assert!(bases.iter().all(|b| b.len() == 3 && b.contains(&3) && !has_cycle(b)));
        assert_eq!(pruned.find_all_bases(), bases);
        assert!(pruned.stats().pruned > 0);
        assert_eq!(pruned.stats().known_circuits, 1);
    }

    #[test]
    fn combinations_are_submitted_once() {
        let ground = ground();
        let configs = [
            SearchConfig::exhaustive(),
            SearchConfig::with_known_circuits(2),
            SearchConfig::with_known_circuits(3),
        ];
        for config in configs {
            let queried = RefCell::new(Vec::new());
            let oracle = |edges: &[usize]| {
                queried.borrow_mut().push(edges.to_vec());
                has_cycle(edges)
            };
            let calls = {
                let mut search = BaseSearch::new(&ground, &oracle, config);
                assert_eq!(search.rank(), 3);
                assert_eq!(search.find_all_bases().len(), 5);
                search.stats().oracle_calls
            };
            let mut queried = queried.into_inner();
            let total = queried.len();
            assert_eq!(calls, total as u64);
            queried.sort();
            queried.dedup();
            assert_eq!(queried.len(), total, "{config:?}");
        }
    }

    #[test]
    fn search_within_scope() {
        let ground = ground();
        let scope = ground.resolve(&[0, 1, 2, 4]).unwrap();
        let mut search = BaseSearch::within(&ground, scope, &has_cycle, SearchConfig::default());
        assert_eq!(search.rank(), 2);
        let scope = ground.resolve(&[0, 4]).unwrap();
        let mut search = BaseSearch::within(&ground, scope, &has_cycle, SearchConfig::default());
        assert_eq!(search.find_all_bases(), vec![vec![0], vec![4]]);
    }

    #[test]
    fn bounded_search() {
        let ground = ground();
        let mut search = BaseSearch::new(&ground, &has_cycle, SearchConfig::exhaustive());
        assert_eq!(search.find_base_bounded(2).len(), 2);
        assert_eq!(search.find_base_bounded(10).len(), 3);
    }

    #[test]
    fn empty_ground_set() {
        let ground: GroundSet<usize> = GroundSet::new([]).unwrap();
        let calls = Cell::new(0);
        let oracle = |_: &[usize]| {
            calls.set(calls.get() + 1);
            true
        };
        let mut search = BaseSearch::new(&ground, &oracle, SearchConfig::default());
        assert!(search.find_base().is_empty());
        assert_eq!(search.find_all_bases(), vec![Vec::<usize>::new()]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn free_function_entry_points() {
        let parallel = |s: &[char]| s.contains(&'a') && s.contains(&'b');
        let bases = find_all_bases(&['a', 'b', 'c'], &parallel).unwrap();
        assert_eq!(bases, vec![vec!['a', 'c'], vec!['b', 'c']]);
        assert_eq!(
            find_base(&['a', 'b', 'a'], &parallel),
            Err(MatroidError::DuplicateAtom { position: 2 })
        );
    }
}
