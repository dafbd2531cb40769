use std::fmt::{Display, Error, Formatter};
use std::ops::AddAssign;

/// Statistics of a search. Oracle calls are the dominant cost of all searches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Number of invocations of the dependency oracle, including the ones made to populate the known circuits.
    pub oracle_calls: u64,
    /// Number of combinations considered by the main enumeration.
    pub visited: u64,
    /// Number of combinations of the main enumeration discarded by a known circuit, without querying the oracle.
    /// A single pruning step may skip many combinations that are never visited: only the step is counted.
    pub pruned: u64,
    /// Number of circuits recorded before the main enumeration.
    pub known_circuits: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_oracle_call(&mut self) {
        self.oracle_calls += 1;
    }

    pub(crate) fn add_visit(&mut self) {
        self.visited += 1;
    }

    pub(crate) fn add_pruned(&mut self) {
        self.pruned += 1;
    }
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.oracle_calls += rhs.oracle_calls;
        self.visited += rhs.visited;
        self.pruned += rhs.pruned;
        self.known_circuits += rhs.known_circuits;
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        fn line(f: &mut Formatter<'_>, label: &str, value: u64) -> Result<(), Error> {
            writeln!(f, "{label:<20}: {value:<12}")
        }
        line(f, "oracle calls", self.oracle_calls)?;
        line(f, "visited", self.visited)?;
        line(f, "pruned", self.pruned)?;
        line(f, "known circuits", self.known_circuits)
    }
}
