use crate::base::BaseSearch;
use crate::config::SearchConfig;
use crate::errors::MatroidError;
use crate::ground::{AtomId, GroundSet};
use crate::independents::independent_ids;
use crate::oracle::Oracle;
use crate::stats::SearchStats;
use fixedbitset::FixedBitSet;
use std::fmt::{Debug, Formatter};
use std::hash::Hash;

/// A matroid, defined by a ground set of atoms and a dependency oracle.
///
/// The matroid may hold a collection of independent subsets of its ground set, computed at construction
/// ([`Matroid::new`]) or supplied by the caller ([`Matroid::from_parts`]). When present, it is used to answer
/// queries on the whole ground set without searching. No query ever modifies the matroid.
///
/// All subsets returned are in the order of the ground set.
pub struct Matroid<A, O> {
    ground: GroundSet<A>,
    oracle: O,
    /// Independent subsets of the ground set, as sorted positions. May be empty if unknown.
    independents: Vec<Vec<AtomId>>,
    config: SearchConfig,
}

impl<A: Debug, O> Debug for Matroid<A, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matroid")
            .field("ground", &self.ground)
            .field("num_independents", &self.independents.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<A, O> Matroid<A, O>
where
    A: Clone + Eq + Hash,
    O: Oracle<A>,
{
    /// Creates the matroid and eagerly computes all its independent subsets.
    ///
    /// This requires a number of oracle calls that is exponential in the rank of the matroid.
    /// See [`Matroid::lazy`] to skip this step.
    pub fn new(atoms: impl IntoIterator<Item = A>, oracle: O) -> Result<Self, MatroidError> {
        let mut matroid = Self::lazy(atoms, oracle)?;
        matroid.compute_independents();
        Ok(matroid)
    }

    /// Creates the matroid without computing its independent subsets. Queries on the whole ground set
    /// will search for a base instead.
    pub fn lazy(atoms: impl IntoIterator<Item = A>, oracle: O) -> Result<Self, MatroidError> {
        Ok(Matroid {
            ground: GroundSet::new(atoms)?,
            oracle,
            independents: Vec::new(),
            config: SearchConfig::default(),
        })
    }

    /// Creates a matroid from a ground set and a known collection of its independent subsets.
    ///
    /// No search is performed: the caller asserts that the subsets are independent. They are only checked
    /// to be made of atoms of the ground set.
    pub fn from_parts(
        atoms: impl IntoIterator<Item = A>,
        independents: impl IntoIterator<Item = Vec<A>>,
        oracle: O,
    ) -> Result<Self, MatroidError> {
        let mut matroid = Self::lazy(atoms, oracle)?;
        matroid.independents = independents
            .into_iter()
            .map(|subset| matroid.ground.resolve(&subset))
            .collect::<Result<_, _>>()?;
        Ok(matroid)
    }

    /// Sets the configuration of all later searches.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Replaces the ground set. The independent subsets of the previous ground set are discarded and
    /// are not recomputed: see [`Matroid::compute_independents`].
    pub fn set_ground(&mut self, atoms: impl IntoIterator<Item = A>) -> Result<(), MatroidError> {
        self.ground = GroundSet::new(atoms)?;
        self.independents.clear();
        Ok(())
    }

    /// Computes and stores all independent subsets of the ground set.
    pub fn compute_independents(&mut self) {
        let mut stats = SearchStats::new();
        self.independents = independent_ids(&self.ground, &self.oracle, &mut stats);
    }

    pub fn ground(&self) -> &[A] {
        self.ground.atoms()
    }

    pub fn ground_set(&self) -> &GroundSet<A> {
        &self.ground
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Returns the stored independent subsets. This is empty if they were never computed.
    pub fn independents(&self) -> impl Iterator<Item = Vec<A>> + '_ {
        self.independents.iter().map(|s| self.ground.atoms_of(s.iter().copied()))
    }

    pub fn num_independents(&self) -> usize {
        self.independents.len()
    }

    /// Returns true if the subset contains a circuit, as decided by the oracle.
    pub fn has_circuit(&self, subset: &[A]) -> bool {
        self.oracle.has_circuit(subset)
    }

    pub fn is_independent(&self, subset: &[A]) -> bool {
        subset.is_empty() || !self.has_circuit(subset)
    }

    /// Returns a base of the matroid: the largest stored independent subset if any,
    /// or the result of a search otherwise.
    pub fn base(&self) -> Vec<A> {
        let base = self.base_ids();
        self.ground.atoms_of(base)
    }

    /// Rank of the whole ground set.
    pub fn rank(&self) -> usize {
        match self.stored_rank() {
            Some(rank) => rank,
            None => self.search(self.ground.ids().collect()).rank(),
        }
    }

    /// Returns all bases of the matroid. If the rank is 0, the empty set is the only base.
    pub fn bases(&self) -> Vec<Vec<A>> {
        let mut search = self.search(self.ground.ids().collect());
        match self.stored_rank() {
            Some(rank) => search.find_all_bases_of_rank(rank),
            None => search.find_all_bases(),
        }
    }

    /// Rank of a subset of the ground set, that is the size of its largest independent subsets.
    pub fn rank_of(&self, subset: &[A]) -> Result<usize, MatroidError> {
        let scope = self.ground.resolve(subset)?;
        Ok(self.search(scope).rank())
    }

    /// Returns the closure of the subset: the subset together with all atoms whose addition does not increase its rank.
    ///
    /// For a base `B` of the subset, an atom `x` outside the subset is in the closure iff `B ∪ {x}` is dependent.
    /// Hence, after finding `B`, a single oracle call is made per atom outside the subset.
    pub fn closure(&self, subset: &[A]) -> Result<Vec<A>, MatroidError> {
        let scope = self.ground.resolve(subset)?;
        let mut members = FixedBitSet::with_capacity(self.ground.len());
        for &id in &scope {
            members.insert(usize::from(id));
        }
        let mut search = self.search(scope);
        let base = search.find_base_ids();
        let mut stats = SearchStats::new();

        let mut candidate = Vec::with_capacity(base.len() + 1);
        let mut buffer = Vec::with_capacity(base.len() + 1);
        for x in self.ground.ids() {
            if members.contains(usize::from(x)) {
                continue;
            }
            candidate.clear();
            candidate.extend(base.iter().copied().filter(|&b| b < x));
            candidate.push(x);
            candidate.extend(base.iter().copied().filter(|&b| b > x));
            self.ground.fill(candidate.iter().copied(), &mut buffer);
            stats.add_oracle_call();
            if self.oracle.has_circuit(&buffer) {
                // adding `x` does not increase the rank
                members.insert(usize::from(x));
            }
        }
        stats += *search.stats();
        tracing::debug!(
            rank = base.len(),
            size = members.count_ones(..),
            oracle_calls = stats.oracle_calls,
            "closure"
        );
        Ok(self.ground.atoms_of(members.ones().map(AtomId::from)))
    }

    /// Returns true if the closure of the subset is the entire ground set, i.e., if it contains a base.
    pub fn is_spanning(&self, subset: &[A]) -> Result<bool, MatroidError> {
        Ok(self.rank_of(subset)? == self.rank())
    }

    fn stored_rank(&self) -> Option<usize> {
        self.independents.iter().map(|s| s.len()).max()
    }

    fn base_ids(&self) -> Vec<AtomId> {
        match self.independents.iter().max_by_key(|s| s.len()) {
            Some(largest) => largest.clone(),
            None => self.search(self.ground.ids().collect()).find_base_ids(),
        }
    }

    fn search(&self, scope: Vec<AtomId>) -> BaseSearch<'_, A, O> {
        BaseSearch::within(&self.ground, scope, &self.oracle, self.config)
    }
}
