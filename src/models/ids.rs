//! Short random ids (`cr-k3x9`, `hf-0q2m`) and prefix matching.

use rand::Rng;
use std::collections::HashSet;

pub const MEMORY_ID_PREFIX: &str = "cr";
pub const HANDOFF_ID_PREFIX: &str = "hf";

/// Legacy separator forms still accepted when resolving ids
pub const LEGACY_MEMORY_ID_PREFIX: &str = "c_";

const INITIAL_LEN: usize = 4;
const MAX_RETRIES_PER_LEN: usize = 64;
const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate an id of the form `{prefix}-{base36}` that is not in `existing`.
///
/// Starts with a 4 character suffix and grows it when collisions pile up.
pub fn next_short_id<'a, I>(existing: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let used: HashSet<String> = existing
        .into_iter()
        .map(|id| id.to_ascii_lowercase())
        .collect();

    let mut rng = rand::thread_rng();
    let mut len = INITIAL_LEN;
    loop {
        for _ in 0..MAX_RETRIES_PER_LEN {
            let candidate = format!("{prefix}-{}", random_base36(&mut rng, len));
            if !used.contains(&candidate) {
                return candidate;
            }
        }
        len += 1;
    }
}

fn random_base36(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| DIGITS[rng.gen_range(0..DIGITS.len())] as char)
        .collect()
}

/// Lowercased prefixes an id may start with to match user input.
///
/// A bare suffix like `k3x` also matches `cr-k3x…` and the legacy `c_k3x…`.
pub fn prefix_candidates(input: &str, canonical: &str, legacy: &str) -> Vec<String> {
    let mut candidates = vec![input.to_ascii_lowercase()];
    if !input.contains('-') && !input.contains('_') {
        candidates.push(format!("{canonical}-{input}").to_ascii_lowercase());
        candidates.push(format!("{legacy}{input}").to_ascii_lowercase());
    }
    candidates
}

pub fn matches_any_prefix(id: &str, candidates: &[String]) -> bool {
    let id_lower = id.to_ascii_lowercase();
    candidates.iter().any(|p| id_lower.starts_with(p))
}
