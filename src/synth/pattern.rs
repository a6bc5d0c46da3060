//! Pattern → literal string, for a fixed vocabulary of regex fragments.
//!
//! The pattern is rewritten in one pass per token, in table order:
//! - `\`             removed
//! - `[0-9]+`        integer in the default range
//! - `[a-z]+`        1–5 lowercase letters
//! - `[0-9a-zA-Z]+`  1–5 mixed-case letters
//!
//! A pass draws once and substitutes that draw for every occurrence of its token,
//! so `[a-z]+/[a-z]+` yields the same word twice. Each pass sees the previous
//! pass's output: `[0-9]\+` turns into a number once the escape is removed.
//!
//! Anything outside that vocabulary (anchors, quantifier groups, other classes,
//! alternation) survives verbatim, so the output generally won't match such a pattern.
use std::ops::RangeInclusive;

use rand::Rng;
use regex::Regex;

use super::num::{random_int, RANGE_MAX, RANGE_MIN};
use super::str::random_word;

/// Length range for letter-run fragments.
pub const FRAGMENT_LEN: RangeInclusive<usize> = 1..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Escape,
    Digits,
    Lowercase,
    Alphanumeric,
}

/// Passes in application order.
pub const TOKENS: [(&str, Fragment); 4] = [
    ("\\", Fragment::Escape),
    ("[0-9]+", Fragment::Digits),
    ("[a-z]+", Fragment::Lowercase),
    ("[0-9a-zA-Z]+", Fragment::Alphanumeric),
];

impl Fragment {
    fn draw<R: Rng>(self, rng: &mut R) -> String {
        match self {
            Fragment::Escape => String::new(),
            Fragment::Digits => random_int(rng, RANGE_MAX, RANGE_MIN).to_string(),
            Fragment::Lowercase => random_word(rng, FRAGMENT_LEN, false),
            Fragment::Alphanumeric => random_word(rng, FRAGMENT_LEN, true),
        }
    }
}

/// Expand `pattern` into one literal string.
pub fn synthesize<R: Rng>(rng: &mut R, pattern: &str) -> String {
    let mut out = pattern.to_owned();
    for (token, fragment) in TOKENS {
        if out.contains(token) {
            let replacement = fragment.draw(rng);
            out = out.replace(token, &replacement);
        }
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        report_mismatch(pattern, &out);
    }
    out
}

fn report_mismatch(pattern: &str, output: &str) {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(rx) if !rx.is_match(output) => {
            tracing::debug!(pattern, output, "synthesized string does not match its pattern");
        }
        Ok(_) => {}
        Err(error) => {
            tracing::debug!(pattern, %error, "pattern does not compile, output left unchecked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn full_match(rx: &str, s: &str) -> bool {
        Regex::new(rx).unwrap().is_match(s)
    }

    #[test]
    fn single_fragment_patterns_round_trip() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..200 {
            assert!(full_match("^[0-9]+$", &synthesize(&mut rng, "[0-9]+")));
            assert!(full_match("^[a-z]+$", &synthesize(&mut rng, "[a-z]+")));
            assert!(full_match("^[0-9a-zA-Z]+$", &synthesize(&mut rng, "[0-9a-zA-Z]+")));
        }
    }

    #[test]
    fn fragment_lengths_are_bounded() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let s = synthesize(&mut rng, "[a-z]+");
            assert!(FRAGMENT_LEN.contains(&s.len()), "{s:?}");
            let n: i64 = synthesize(&mut rng, "[0-9]+").parse().unwrap();
            assert!((0..=100).contains(&n));
        }
    }

    #[test]
    fn literals_around_fragments_survive() {
        let mut rng = StdRng::seed_from_u64(4);
        let s = synthesize(&mut rng, "ü[a-z]+é");
        let word = s.strip_prefix('ü').and_then(|s| s.strip_suffix('é')).unwrap();
        assert!(FRAGMENT_LEN.contains(&word.len()));
        assert!(word.bytes().all(|b| b.is_ascii_lowercase()));
    }

    #[test]
    fn escaped_url_pattern_matches_itself() {
        let pattern = r"https:\/\/[a-z]+\.corezoid\.com\/api\/1\/json\/public\/[0-9]+\/[0-9a-zA-Z]+";
        let anchored = format!("^(?:{pattern})$");
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..50 {
            let s = synthesize(&mut rng, pattern);
            assert!(s.starts_with("https://"));
            assert!(!s.contains('\\'));
            assert!(full_match(&anchored, &s), "{s}");
        }
    }

    #[test]
    fn removing_escapes_can_form_a_token() {
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..50 {
            let s = synthesize(&mut rng, r"id-[0-9]\+");
            let digits = s.strip_prefix("id-").unwrap();
            assert!(digits.parse::<u8>().is_ok_and(|n| n <= 100), "{s:?}");

            let s = synthesize(&mut rng, r"[a-z\]+");
            assert!(FRAGMENT_LEN.contains(&s.len()), "{s:?}");
            assert!(s.bytes().all(|b| b.is_ascii_lowercase()), "{s:?}");
        }
    }

    #[test]
    fn repeated_fragments_share_one_draw() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let s = synthesize(&mut rng, "[a-z]+/[a-z]+/[0-9]+/[0-9]+/[0-9a-zA-Z]+/[0-9a-zA-Z]+");
            let parts: Vec<&str> = s.split('/').collect();
            assert_eq!(parts.len(), 6, "{s:?}");
            assert_eq!(parts[0], parts[1]);
            assert_eq!(parts[2], parts[3]);
            assert_eq!(parts[4], parts[5]);
        }
    }

    #[test]
    fn unsupported_syntax_is_left_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(synthesize(&mut rng, "^(foo|bar){2}$"), "^(foo|bar){2}$");
        assert_eq!(synthesize(&mut rng, "[A-F]+"), "[A-F]+");
        assert_eq!(synthesize(&mut rng, ""), "");
    }
}
