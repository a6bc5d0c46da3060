use rand::Rng;

/// Default bounds for unconstrained integers.
pub const RANGE_MIN: f64 = 0.0;
pub const RANGE_MAX: f64 = 100.0;

/// Uniform integer in `[ceil(min), floor(max)]`, inclusive on both ends.
///
/// Inverted bounds are a caller error; the lower bound comes back instead of a panic.
pub fn random_int<R: Rng>(rng: &mut R, max: f64, min: f64) -> i64 {
    // `as` saturates on overflow and maps NaN to 0
    let hi = max.floor() as i64;
    let lo = min.ceil() as i64;
    if hi < lo {
        tracing::warn!(min, max, "integer bounds are inverted, using the lower bound");
        return lo;
    }
    rng.gen_range(lo..=hi)
}

pub fn random_bool<R: Rng>(rng: &mut R) -> bool {
    random_int(rng, 1.0, 0.0) == 0
}
