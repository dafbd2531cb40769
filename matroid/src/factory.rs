use crate::config::SearchConfig;
use crate::errors::MatroidError;
use crate::matroid::Matroid;
use crate::oracle::Oracle;
use std::hash::Hash;

/// A domain whose dependency semantics can be turned into matroids over any ground set of its atoms.
///
/// ```
/// use matroid::prelude::*;
///
/// /// Lines of text, dependent when two of them start with the same letter.
/// struct Initials;
///
/// impl MatroidFactory<&'static str> for Initials {
///     type Oracle = fn(&[&'static str]) -> bool;
///
///     fn oracle(&self) -> Self::Oracle {
///         |lines: &[&'static str]| {
///             let mut initials: Vec<_> = lines.iter().filter_map(|l| l.chars().next()).collect();
///             initials.sort_unstable();
///             initials.windows(2).any(|w| w[0] == w[1])
///         }
///     }
/// }
///
/// let m = Initials.create_matroid(["apple", "avocado", "banana", "cherry"]).unwrap();
/// assert_eq!(m.rank(), 3);
/// ```
pub trait MatroidFactory<A: Clone + Eq + Hash> {
    type Oracle: Oracle<A>;

    /// Returns the dependency oracle of the domain.
    fn oracle(&self) -> Self::Oracle;

    /// Configuration of the searches made by the created matroids.
    fn config(&self) -> SearchConfig {
        SearchConfig::default()
    }

    /// Creates the matroid over the given ground set and computes all its independent sets.
    fn create_matroid(&self, ground: impl IntoIterator<Item = A>) -> Result<Matroid<A, Self::Oracle>, MatroidError> {
        Ok(Matroid::new(ground, self.oracle())?.with_config(self.config()))
    }

    /// Creates the matroid over the given ground set, without computing its independent sets.
    fn create_lazy(&self, ground: impl IntoIterator<Item = A>) -> Result<Matroid<A, Self::Oracle>, MatroidError> {
        Ok(Matroid::lazy(ground, self.oracle())?.with_config(self.config()))
    }
}
