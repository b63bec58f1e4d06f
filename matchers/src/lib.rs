mod automaton;
mod kmp;
mod positions;
mod rabin_karp;

pub use automaton::{Automaton, TransitionTable, automaton_find_all, build_transition_table};
pub use kmp::{Kmp, KmpState, build_failure_table, kmp_find_all};
pub use positions::Positions;
pub use rabin_karp::{RabinKarp, RkConfig, RkParams, RkState, rk_find_all, rk_hash};

use thiserror::Error;

/// Input problems rejected before any table construction or scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("pattern must not be empty")]
    EmptyPattern,
    #[error("pattern length {pattern_len} exceeds text length {text_len}")]
    PatternTooLong { pattern_len: usize, text_len: usize },
    #[error("hash parameters base={base} modulus={modulus} are out of range")]
    InvalidHashParams { base: u64, modulus: u64 },
}

/// An exact substring matcher that can report every (possibly
/// overlapping) occurrence of one fixed pattern.
///
/// `build` turns a pattern into whatever per-pattern state the
/// algorithm needs (a transition table, a failure table, a hash), so
/// one pattern can be scanned against many texts.
pub trait PatternSearch {
    type Config;
    type State;

    fn build(config: Self::Config) -> Result<Self::State, SearchError>;
    fn find_all_bytes(state: &Self::State, text: &[u8]) -> Result<Positions, SearchError>;
    fn find_all(state: &Self::State, text: &str) -> Result<Positions, SearchError> {
        Self::find_all_bytes(state, text.as_bytes())
    }
}

pub(crate) fn check_pattern(pattern: &[u8]) -> Result<(), SearchError> {
    if pattern.is_empty() {
        return Err(SearchError::EmptyPattern);
    }
    Ok(())
}

pub(crate) fn check_inputs(text: &[u8], pattern: &[u8]) -> Result<(), SearchError> {
    check_pattern(pattern)?;
    if pattern.len() > text.len() {
        return Err(SearchError::PatternTooLong {
            pattern_len: pattern.len(),
            text_len: text.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(check_inputs(b"abc", b""), Err(SearchError::EmptyPattern));
    }

    #[test]
    fn oversized_pattern_is_rejected() {
        assert_eq!(
            check_inputs(b"ab", b"abc"),
            Err(SearchError::PatternTooLong {
                pattern_len: 3,
                text_len: 2
            })
        );
    }

    #[test]
    fn pattern_as_long_as_text_is_fine() {
        assert_eq!(check_inputs(b"abc", b"abc"), Ok(()));
    }
}
