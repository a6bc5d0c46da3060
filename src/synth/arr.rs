use rand::Rng;

use super::num::random_int;

/// Uniformly chosen element; `None` for an empty slice.
pub fn random_element<'a, T, R: Rng>(rng: &mut R, xs: &'a [T]) -> Option<&'a T> {
    if xs.is_empty() {
        return None;
    }
    let last = (xs.len() - 1) as f64;
    xs.get(random_int(rng, last, 0.0) as usize)
}
