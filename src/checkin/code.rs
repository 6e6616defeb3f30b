//! Temporary authentication codes.

use rand::Rng;

/// Range of generated codes: always four digits.
pub const CODE_RANGE: std::ops::RangeInclusive<u16> = 1000..=9999;

/// Draw a fresh four-digit code.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    rng.random_range(CODE_RANGE).to_string()
}
