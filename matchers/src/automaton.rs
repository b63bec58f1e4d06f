use crate::{PatternSearch, Positions, SearchError, check_inputs, check_pattern};

pub struct Automaton;

/// Next-state table over (state, input byte), built once per pattern.
///
/// States run 0..=pattern_len; `pattern_len` is the single accepting
/// state. The table covers all 256 byte values even when the pattern
/// uses a narrow sub-alphabet.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    table: Vec<[usize; 256]>,
    pattern_len: usize,
}

impl TransitionTable {
    pub fn pattern_len(&self) -> usize {
        self.pattern_len
    }

    #[inline]
    pub fn next(&self, state: usize, byte: u8) -> usize {
        self.table[state][byte as usize]
    }
}

impl PatternSearch for Automaton {
    type Config = Vec<u8>;
    type State = TransitionTable;

    fn build(config: Self::Config) -> Result<Self::State, SearchError> {
        check_pattern(&config)?;
        Ok(TransitionTable {
            pattern_len: config.len(),
            table: build_transition_table(&config),
        })
    }

    fn find_all_bytes(state: &Self::State, text: &[u8]) -> Result<Positions, SearchError> {
        if state.pattern_len > text.len() {
            return Err(SearchError::PatternTooLong {
                pattern_len: state.pattern_len,
                text_len: text.len(),
            });
        }
        Ok(scan(text, state))
    }
}

/// Length of the longest suffix of (pattern[..state] + byte) that is
/// also a prefix of the pattern.
fn next_state(pattern: &[u8], state: usize, byte: u8) -> usize {
    if state < pattern.len() && byte == pattern[state] {
        return state + 1;
    }

    // Shorter candidate prefixes, longest first.
    for ns in (1..=state).rev() {
        if pattern[ns - 1] == byte && pattern[..ns - 1] == pattern[state + 1 - ns..state] {
            return ns;
        }
    }

    0
}

/// Build the full (pattern_len + 1) x 256 transition table.
pub fn build_transition_table(pattern: &[u8]) -> Vec<[usize; 256]> {
    let mut table = vec![[0usize; 256]; pattern.len() + 1];

    for (state, row) in table.iter_mut().enumerate() {
        for byte in 0..=255u8 {
            row[byte as usize] = next_state(pattern, state, byte);
        }
    }

    table
}

fn scan(text: &[u8], table: &TransitionTable) -> Positions {
    let m = table.pattern_len;
    let mut positions = Positions::new();
    let mut state = 0usize;

    for (i, &byte) in text.iter().enumerate() {
        state = table.next(state, byte);
        if state == m {
            // State is never reset, so overlapping matches fall out
            // of the same pass.
            positions.push(i + 1 - m);
        }
    }

    positions
}

/// Find all (possibly overlapping) occurrences of `pattern` in `text`
/// using a precomputed finite automaton. One table build, one pass.
pub fn automaton_find_all(text: &[u8], pattern: &[u8]) -> Result<Positions, SearchError> {
    check_inputs(text, pattern)?;
    let table = TransitionTable {
        pattern_len: pattern.len(),
        table: build_transition_table(pattern),
    };
    Ok(scan(text, &table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automaton_basic() {
        let hay = b"ababcabcabababd";
        let pat = b"ababd";
        assert_eq!(automaton_find_all(hay, pat).unwrap().as_slice(), &[10]);
    }

    #[test]
    fn test_automaton_not_found() {
        let hay = b"hello world";
        let pat = b"rust";
        assert!(automaton_find_all(hay, pat).unwrap().is_empty());
    }

    #[test]
    fn test_automaton_find_all_overlapping() {
        let hay = b"aaaa";
        let pat = b"aa";
        assert_eq!(automaton_find_all(hay, pat).unwrap().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_automaton_empty_pattern_rejected() {
        assert_eq!(
            automaton_find_all(b"abc", b""),
            Err(SearchError::EmptyPattern)
        );
    }

    #[test]
    fn table_transitions_stay_in_bounds() {
        let pat = b"abab";
        let table = build_transition_table(pat);

        assert_eq!(table.len(), pat.len() + 1);
        for row in &table {
            for &next in row.iter() {
                assert!(next <= pat.len());
            }
        }
    }

    #[test]
    fn table_follows_prefix_structure() {
        let pat = b"ab";
        let table = build_transition_table(pat);

        assert_eq!(table[0][b'a' as usize], 1);
        assert_eq!(table[0][b'b' as usize], 0);
        assert_eq!(table[1][b'b' as usize], 2);
        // 'a' restarts a prefix rather than dropping to 0
        assert_eq!(table[1][b'a' as usize], 1);
        assert_eq!(table[2][b'a' as usize], 1);
        assert_eq!(table[2][b'b' as usize], 0);
    }

    #[test]
    fn test_automaton_full_byte_range() {
        let hay = &[0x00, 0xff, 0x7f, 0xff, 0x7f, 0x00][..];
        let pat = &[0xff, 0x7f][..];
        assert_eq!(automaton_find_all(hay, pat).unwrap().as_slice(), &[1, 3]);
    }

    #[test]
    fn prebuilt_state_scans_many_texts() {
        let state = Automaton::build(b"ab".to_vec()).unwrap();

        let first = Automaton::find_all_bytes(&state, b"abxab").unwrap();
        let second = Automaton::find_all_bytes(&state, b"zzab").unwrap();

        assert_eq!(first.as_slice(), &[0, 3]);
        assert_eq!(second.as_slice(), &[2]);
    }

    #[test]
    fn prebuilt_state_rejects_short_text() {
        let state = Automaton::build(b"abc".to_vec()).unwrap();
        assert_eq!(
            Automaton::find_all_bytes(&state, b"ab"),
            Err(SearchError::PatternTooLong {
                pattern_len: 3,
                text_len: 2
            })
        );
    }
}
