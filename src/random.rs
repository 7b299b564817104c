//! Identifiers and pseudo-random integers.
//!
//! None of this is suitable for cryptography.

use rand::Rng;
use uuid::Uuid;

/// A version 4 UUID.
///
/// With `nodash` the 32 hex digits come back without separators, otherwise
/// in the usual 8-4-4-4-12 layout.
pub fn get_uuid(nodash: bool) -> String {
    let id = Uuid::new_v4();
    if nodash {
        id.simple().to_string()
    } else {
        id.hyphenated().to_string()
    }
}

/// Random integer in `[ceil(min), floor(max))`.
///
/// Returns `ceil(min)` when the range is empty.
pub fn get_random_int(min: f64, max: f64) -> i64 {
    let (min, max) = bounds(min, max);
    if max <= min {
        return min;
    }
    rand::rng().random_range(min..max)
}

/// Random integer in `[ceil(min), floor(max)]`.
///
/// Returns `ceil(min)` when the range is empty.
pub fn get_random_int_inclusive(min: f64, max: f64) -> i64 {
    let (min, max) = bounds(min, max);
    if max < min {
        return min;
    }
    rand::rng().random_range(min..=max)
}

fn bounds(min: f64, max: f64) -> (i64, i64) {
    (min.ceil() as i64, max.floor() as i64)
}
