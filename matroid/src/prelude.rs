//! Module that re-export most commonly used types and traits to ease import.

pub use crate::config::SearchConfig;
pub use crate::errors::MatroidError;
pub use crate::factory::MatroidFactory;
pub use crate::matroid::Matroid;
pub use crate::oracle::Oracle;
