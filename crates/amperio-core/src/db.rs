//! Decibel conversion helpers.

use libm::{log10f, powf};

/// Floor used when converting a zero or negative linear gain to dB.
pub const DB_FLOOR: f32 = -120.0;

/// Convert a gain in decibels to a linear amplitude factor.
///
/// # Example
///
/// ```rust
/// use amperio_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
/// assert!((db_to_linear(-6.0) - 0.5012).abs() < 1e-3);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    powf(10.0, db / 20.0)
}

/// Convert a linear amplitude factor to decibels.
///
/// Non-positive input returns [`DB_FLOOR`] instead of `-inf`/NaN.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        DB_FLOOR
    } else {
        20.0 * log10f(linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_round_trip() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
        assert!(linear_to_db(1.0).abs() < 1e-6);
    }

    #[test]
    fn doubling_is_about_six_db() {
        assert!((linear_to_db(2.0) - 6.0206).abs() < 1e-3);
    }

    #[test]
    fn zero_gain_hits_floor() {
        assert_eq!(linear_to_db(0.0), DB_FLOOR);
        assert_eq!(linear_to_db(-1.0), DB_FLOOR);
    }

    #[test]
    fn round_trip_preserves_value() {
        for &db in &[-60.0, -12.0, -3.0, 0.0, 6.0, 12.0] {
            let rt = linear_to_db(db_to_linear(db));
            assert!((rt - db).abs() < 1e-3, "round trip failed for {db}: {rt}");
        }
    }
}
