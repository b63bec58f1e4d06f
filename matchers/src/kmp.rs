use crate::{PatternSearch, Positions, SearchError, check_inputs, check_pattern};

pub struct Kmp;

/// Pattern plus its failure table, reusable across texts.
#[derive(Debug, Clone)]
pub struct KmpState {
    pattern: Vec<u8>,
    failure: Vec<isize>,
}

impl KmpState {
    pub fn failure(&self) -> &[isize] {
        &self.failure
    }
}

impl PatternSearch for Kmp {
    type Config = Vec<u8>;
    type State = KmpState;

    fn build(config: Self::Config) -> Result<Self::State, SearchError> {
        check_pattern(&config)?;
        let failure = build_failure_table(&config);
        Ok(KmpState {
            pattern: config,
            failure,
        })
    }

    fn find_all_bytes(state: &Self::State, text: &[u8]) -> Result<Positions, SearchError> {
        check_inputs(text, &state.pattern)?;
        Ok(scan(text, &state.pattern, &state.failure))
    }
}

/// Build the failure table: entry i is the length of the longest
/// proper suffix of pattern[..i] that is also a prefix. Entry 0 is
/// the sentinel -1, meaning "no fallback, advance both cursors".
///
/// The table carries one extra entry at index pattern_len so that a
/// full match falls back the same way a mismatch does; that fallback
/// is what keeps overlapping matches from being skipped.
pub fn build_failure_table(pattern: &[u8]) -> Vec<isize> {
    let m = pattern.len();
    let mut table = vec![0isize; m + 1];
    table[0] = -1;

    let mut pos = 2;
    let mut cnd = 0usize;

    while pos <= m {
        if pattern[pos - 1] == pattern[cnd] {
            cnd += 1;
            table[pos] = cnd as isize;
            pos += 1;
        } else if cnd > 0 {
            // entries below cnd are already final and non-negative
            cnd = table[cnd] as usize;
        } else {
            table[pos] = 0;
            pos += 1;
        }
    }

    table
}

fn scan(text: &[u8], pattern: &[u8], failure: &[isize]) -> Positions {
    let n = text.len();
    let m = pattern.len();
    let mut positions = Positions::new();

    let mut win = 0usize; // window start in text
    let mut i = 0usize; // offset within the window

    while win + i < n {
        if pattern[i] == text[win + i] {
            i += 1;
            if i == m {
                positions.push(win);
                // failure[m] >= 0 whenever m >= 1
                let f = failure[m] as usize;
                win += i - f;
                i = f;
            }
        } else if failure[i] > -1 {
            let f = failure[i] as usize;
            win += i - f;
            i = f;
        } else {
            i = 0;
            win += 1;
        }
    }

    positions
}

/// Find all (possibly overlapping) occurrences of `pattern` in `text`
/// using Knuth-Morris-Pratt.
pub fn kmp_find_all(text: &[u8], pattern: &[u8]) -> Result<Positions, SearchError> {
    check_inputs(text, pattern)?;
    let failure = build_failure_table(pattern);
    Ok(scan(text, pattern, &failure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_table_for_repeating_prefixes() {
        assert_eq!(build_failure_table(b"abab"), vec![-1, 0, 0, 1, 2]);
        assert_eq!(build_failure_table(b"aaaa"), vec![-1, 0, 1, 2, 3]);
        assert_eq!(build_failure_table(b"a"), vec![-1, 0]);
    }

    #[test]
    fn failure_table_without_self_overlap() {
        assert_eq!(build_failure_table(b"abcd"), vec![-1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_kmp_basic() {
        let hay = b"ababcabcabababd";
        let pat = b"ababd";
        assert_eq!(kmp_find_all(hay, pat).unwrap().as_slice(), &[10]);
    }

    #[test]
    fn test_kmp_not_found() {
        let hay = b"hello world";
        let pat = b"rust";
        assert!(kmp_find_all(hay, pat).unwrap().is_empty());
    }

    #[test]
    fn test_kmp_find_all_overlapping() {
        let hay = b"aaaa";
        let pat = b"aa";
        assert_eq!(kmp_find_all(hay, pat).unwrap().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_kmp_single_byte_pattern() {
        let hay = b"aaaaa";
        let pat = b"a";
        assert_eq!(
            kmp_find_all(hay, pat).unwrap().as_slice(),
            &[0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn test_kmp_empty_pattern_rejected() {
        assert_eq!(kmp_find_all(b"abc", b""), Err(SearchError::EmptyPattern));
    }

    #[test]
    fn test_kmp_utf8() {
        let hay = "🌍hello🌍hello".as_bytes();
        let pat = "🌍hello".as_bytes();

        assert_eq!("🌍hello".len(), 9);
        assert_eq!(
            kmp_find_all(hay, pat).unwrap().as_slice(),
            &[0, "🌍hello".len()]
        );
    }

    #[test]
    fn prebuilt_state_scans_many_texts() {
        let state = Kmp::build(b"aa".to_vec()).unwrap();

        assert_eq!(
            Kmp::find_all_bytes(&state, b"aabaa").unwrap().as_slice(),
            &[0, 3]
        );
        assert_eq!(
            Kmp::find_all_bytes(&state, b"aaaa").unwrap().as_slice(),
            &[0, 1, 2]
        );
    }
}
