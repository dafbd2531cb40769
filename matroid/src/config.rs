//! Parameters of the base and independent-set searches.
//!
//! Default values can be overridden with environment variables, read once on first access:
//!
//!  - `MATROID_KNOWN_CIRCUITS` (`true`): precompute small circuits to prune the enumeration.
//!  - `MATROID_MAX_CIRCUIT_SIZE` (`3`): largest circuit recorded by the precomputation.
//!
//! A configuration is always passed explicitly to a search, so that two searches running concurrently
//! never observe each other's settings.

use once_cell::sync::Lazy;
use std::fmt::Display;
use std::str::FromStr;

static KNOWN_CIRCUITS: Lazy<bool> = Lazy::new(|| read_param("MATROID_KNOWN_CIRCUITS", true));
static MAX_CIRCUIT_SIZE: Lazy<usize> = Lazy::new(|| read_param("MATROID_MAX_CIRCUIT_SIZE", 3));

/// Reads a parameter from the environment variable `env`, falling back to `default` if it is unset or invalid.
fn read_param<T: FromStr + Display>(env: &'static str, default: T) -> T {
    match std::env::var(env) {
        Ok(value) => match T::from_str(&value) {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("could not parse \"{value}\" for {env}, using default: {default}");
                default
            }
        },
        Err(std::env::VarError::NotPresent) => default,
        Err(err) => {
            tracing::warn!("{env}: {err}, using default: {default}");
            default
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    /// If true, all circuits of at most `max_circuit_size` elements are computed before
    /// the main enumeration and used to skip combinations that contain them.
    /// This only affects the number of oracle calls, never the result.
    pub known_circuits: bool,
    /// Size of the largest circuits recorded when `known_circuits` is set.
    pub max_circuit_size: usize,
}

impl SearchConfig {
    /// A configuration that enumerates every combination, with no pruning.
    pub fn exhaustive() -> Self {
        SearchConfig {
            known_circuits: false,
            max_circuit_size: 0,
        }
    }

    /// A configuration recording all circuits up to the given size.
    pub fn with_known_circuits(max_circuit_size: usize) -> Self {
        SearchConfig {
            known_circuits: true,
            max_circuit_size,
        }
    }

    /// Maximum size of recorded circuits, 0 if pruning is disabled.
    pub(crate) fn circuit_bound(&self) -> usize {
        if self.known_circuits {
            self.max_circuit_size
        } else {
            0
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            known_circuits: *KNOWN_CIRCUITS,
            max_circuit_size: *MAX_CIRCUIT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_from_environment() {
        std::env::set_var("MATROID_TEST_PARAM_VALID", "7");
        std::env::set_var("MATROID_TEST_PARAM_INVALID", "seven");
        assert_eq!(read_param::<usize>("MATROID_TEST_PARAM_VALID", 3), 7);
        assert_eq!(read_param::<usize>("MATROID_TEST_PARAM_INVALID", 3), 3);
        assert!(read_param("MATROID_TEST_PARAM_UNSET", true));
    }

    #[test]
    fn pruning_bound() {
        assert_eq!(SearchConfig::exhaustive().circuit_bound(), 0);
        assert_eq!(SearchConfig::with_known_circuits(2).circuit_bound(), 2);
        let disabled = SearchConfig {
            known_circuits: false,
            max_circuit_size: 3,
        };
        assert_eq!(disabled.circuit_bound(), 0);
    }
}
