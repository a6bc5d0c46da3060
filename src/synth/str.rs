use std::ops::RangeInclusive;

use rand::Rng;

use super::num::{random_bool, random_int};

/// Length range for strings without a usable pattern.
pub const RANDOM_STRING_LEN: RangeInclusive<usize> = 5..=10;

const LOWER: RangeInclusive<u8> = b'a'..=b'z';
const UPPER: RangeInclusive<u8> = b'A'..=b'Z';

/// Exactly `length` Latin letters. With `allow_uppercase`, each char flips a fair coin for case.
pub fn random_string<R: Rng>(rng: &mut R, length: usize, allow_uppercase: bool) -> String {
    let mut out = String::with_capacity(length);
    while out.len() < length {
        let letters = if allow_uppercase && random_bool(rng) { UPPER } else { LOWER };
        let code = random_int(rng, *letters.end() as f64, *letters.start() as f64);
        out.push(char::from(code as u8));
    }
    out
}

/// Random lowercase string with a length drawn from `len`.
pub fn random_word<R: Rng>(rng: &mut R, len: RangeInclusive<usize>, allow_uppercase: bool) -> String {
    let length = random_int(rng, *len.end() as f64, *len.start() as f64) as usize;
    random_string(rng, length, allow_uppercase)
}
