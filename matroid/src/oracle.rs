/// A dependency oracle: decides whether a subset of atoms contains a circuit (a minimal dependent set).
///
/// Implementations must be monotone: if `has_circuit(s)` is false then it must be false for
/// every subset of `s`. The oracle is expected to be pure and is the dominant cost of all searches,
/// which are designed to minimize the number of invocations.
///
/// The subset is always given in the order of the ground set and is never empty.
///
/// Any closure `Fn(&[A]) -> bool` is an oracle:
/// ```
/// use matroid::Oracle;
/// let at_most_two = |s: &[u32]| s.len() > 2;
/// assert!(!at_most_two.has_circuit(&[1, 2]));
/// assert!(at_most_two.has_circuit(&[1, 2, 3]));
/// assert!(at_most_two.is_independent(&[]));
/// ```
pub trait Oracle<A> {
    fn has_circuit(&self, subset: &[A]) -> bool;

    /// The empty set is independent and is not submitted to the oracle.
    fn is_independent(&self, subset: &[A]) -> bool {
        subset.is_empty() || !self.has_circuit(subset)
    }
}

impl<A, F> Oracle<A> for F
where
    F: Fn(&[A]) -> bool,
{
    fn has_circuit(&self, subset: &[A]) -> bool {
        self(subset)
    }
}
