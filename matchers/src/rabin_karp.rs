use crate::{PatternSearch, Positions, SearchError, check_inputs, check_pattern};

pub struct RabinKarp;

/// Hash parameters, explicit so callers (and tests) can pick them.
/// Checked before any hashing starts; any modulus in 2..2^32 with a
/// small base passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RkParams {
    pub base: u64,
    pub modulus: u64,
}

impl RkParams {
    /// Reject parameters whose hash arithmetic would leave u64.
    ///
    /// Every residue is below `modulus`, so `modulus * base` and
    /// `modulus * 255` fitting in a u64 bounds both the window shift
    /// and the outgoing-byte product. A modulus below 2 hashes
    /// everything to the same value (and 0 would divide by zero).
    pub fn check(&self) -> Result<(), SearchError> {
        let overflows = self.modulus.checked_mul(self.base).is_none()
            || self.modulus.checked_mul(255).is_none();

        if self.modulus < 2 || overflows {
            return Err(SearchError::InvalidHashParams {
                base: self.base,
                modulus: self.modulus,
            });
        }

        Ok(())
    }
}

impl Default for RkParams {
    fn default() -> Self {
        Self {
            base: 33,
            modulus: 1_000_000_007,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RkConfig {
    pub pattern: Vec<u8>,
    pub params: RkParams,
}

/// Pattern hash plus the outgoing byte's weight, reusable across
/// texts.
#[derive(Debug, Clone)]
pub struct RkState {
    pattern: Vec<u8>,
    params: RkParams,
    pattern_hash: u64,
    // base^(pattern_len - 1) mod modulus
    lead_power: u64,
}

impl PatternSearch for RabinKarp {
    type Config = RkConfig;
    type State = RkState;

    fn build(config: Self::Config) -> Result<Self::State, SearchError> {
        check_pattern(&config.pattern)?;
        config.params.check()?;
        Ok(build_state(config.pattern, config.params))
    }

    fn find_all_bytes(state: &Self::State, text: &[u8]) -> Result<Positions, SearchError> {
        check_inputs(text, &state.pattern)?;
        Ok(scan(text, state))
    }
}

fn build_state(pattern: Vec<u8>, params: RkParams) -> RkState {
    let pattern_hash = rk_hash(&pattern, params);

    let mut lead_power = 1u64;
    for _ in 1..pattern.len() {
        lead_power = lead_power * params.base % params.modulus;
    }

    RkState {
        pattern,
        params,
        pattern_hash,
        lead_power,
    }
}

/// hash(b) = sum of b[k] * base^(len-1-k), mod modulus.
pub fn rk_hash(bytes: &[u8], params: RkParams) -> u64 {
    let mut h = 0u64;
    for &byte in bytes {
        h = (h * params.base + byte as u64) % params.modulus;
    }
    h
}

fn scan(text: &[u8], state: &RkState) -> Positions {
    let n = text.len();
    let m = state.pattern.len();
    let RkParams { base, modulus } = state.params;
    let mut positions = Positions::new();

    let mut window_hash = rk_hash(&text[..m], state.params);
    let mut i = 0usize;

    loop {
        if window_hash == state.pattern_hash {
            // A hash hit is necessary, not sufficient.
            if text[i..i + m] == state.pattern[..] {
                positions.push(i);
            } else {
                log::debug!("rk: hash collision at offset {i} rejected");
            }
        }

        if i + m == n {
            break;
        }

        // Slide the window: drop the outgoing byte's weighted
        // contribution, shift, append the incoming byte.
        let outgoing = text[i] as u64 * state.lead_power % modulus;
        window_hash = (window_hash + modulus - outgoing) % modulus;
        window_hash = (window_hash * base + text[i + m] as u64) % modulus;
        i += 1;
    }

    positions
}

/// Find all (possibly overlapping) occurrences of `pattern` in `text`
/// with a rolling hash, verifying every hash hit byte-for-byte.
pub fn rk_find_all(text: &[u8], pattern: &[u8], params: RkParams) -> Result<Positions, SearchError> {
    check_inputs(text, pattern)?;
    params.check()?;
    let state = build_state(pattern.to_vec(), params);
    Ok(scan(text, &state))
}
