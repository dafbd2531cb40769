//! Rank, closure and base computations over matroids.
//!
//! A matroid is given by a finite ground set of atoms and a dependency [`Oracle`] deciding whether a
//! subset of the atoms contains a circuit. The oracle is assumed to be monotone under inclusion:
//! any subset of an independent set must be independent. This is never checked.
//!
//! ```
//! use matroid::prelude::*;
//!
//! // `a` and `b` cannot be selected together
//! let oracle = |s: &[char]| s.contains(&'a') && s.contains(&'b');
//! let m = Matroid::new(vec!['a', 'b', 'c', 'd'], oracle).unwrap();
//! assert_eq!(m.rank(), 3);
//! assert_eq!(m.closure(&['c', 'd']).unwrap(), vec!['c', 'd']);
//! assert_eq!(m.closure(&['a', 'c', 'd']).unwrap(), vec!['a', 'b', 'c', 'd']);
//! ```

pub mod base;
pub mod circuits;
pub mod combinations;
pub mod config;
pub mod errors;
pub mod factory;
pub mod ground;
pub mod independents;
pub mod matroid;
pub mod oracle;
pub mod prelude;
pub mod stats;

pub use base::{find_all_bases, find_base, find_base_with, BaseSearch};
pub use config::SearchConfig;
pub use errors::MatroidError;
pub use independents::{filter_independents, find_independents};
pub use matroid::Matroid;
pub use oracle::Oracle;
