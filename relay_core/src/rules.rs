//! Volleyball set rules: set-number derivation and set-win evaluation.

use regex::Regex;

/// Sets 1-4 play to 25 points.
const REGULAR_SET_TARGET: u32 = 25;
/// The deciding 5th set plays to 15.
const DECIDING_SET_TARGET: u32 = 15;
const DECIDING_SET: u32 = 5;
/// A set is only won with a two-point margin, regardless of the target.
const WIN_MARGIN: u32 = 2;

/// Extract the set number from noisy console text ("2nd" -> 2, "Set 3" -> 3).
///
/// The first contiguous digit run wins; anything without digits is treated
/// as set 1.
pub fn derive_set_number(raw: &str) -> u32 {
    Regex::new(r"\d+")
        .ok()
        .and_then(|re| re.find(raw).and_then(|m| m.as_str().parse().ok()))
        .unwrap_or(1)
}

/// Target score for a given set number.
pub fn set_target(set_number: u32) -> u32 {
    if set_number < DECIDING_SET {
        REGULAR_SET_TARGET
    } else {
        DECIDING_SET_TARGET
    }
}

/// Whether a side with `score` points has won the set against `opponent`.
pub fn wins_set(score: u32, opponent: u32, set_number: u32) -> bool {
    score >= set_target(set_number) && score.saturating_sub(opponent) >= WIN_MARGIN
}

/// Parse a displayed score for rule evaluation; unparseable text scores 0.
pub fn coerce_score(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}
