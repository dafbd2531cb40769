use thiserror::Error;

/// Errors raised when client-supplied atoms do not match the ground set of a matroid.
///
/// Degenerate oracles (always dependent, never dependent) and empty ground sets are valid inputs
/// and never result in an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatroidError {
    /// The atom at `position` of the ground set was already present at an earlier position.
    #[error("duplicated atom at position {position} of the ground set")]
    DuplicateAtom { position: usize },
    /// The atom at `index` of a subset does not belong to the ground set.
    #[error("atom at index {index} of the subset is not part of the ground set")]
    UnknownAtom { index: usize },
}
