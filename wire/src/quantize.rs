//! Numeric quantization shared by every protocol version.
//!
//! These conversions are load-bearing: the client reconstructs positions and
//! rotations from exactly these encodings, so any drift here shows up as a
//! visibly misplaced entity.

/// Fixed-point scale used by protocols that send coordinates as integers.
pub const FIXED_POINT_SCALE: f64 = 32.0;

/// Number of discrete steps in a full turn for byte-encoded angles.
pub const ANGLE_STEPS: f64 = 256.0;

/// Quantizes an angle in degrees to a protocol angle byte.
///
/// Computes `round(degrees * 256 / 360)` and wraps it onto the circle, so
/// negative angles and angles of a full turn or more map to the same byte as
/// their equivalent in `[0, 360)`. Non-finite input encodes as `0`.
#[must_use]
pub fn angle_to_byte(degrees: f32) -> u8 {
    let steps = (f64::from(degrees) * ANGLE_STEPS / 360.0).round();
    if !steps.is_finite() {
        return 0;
    }
    // rem_euclid yields a value in [0, 256), so the cast cannot truncate.
    steps.rem_euclid(ANGLE_STEPS) as u8
}

/// Expands a protocol angle byte back to degrees in `[0, 360)`.
#[must_use]
pub fn byte_to_angle(byte: u8) -> f32 {
    (f64::from(byte) * 360.0 / ANGLE_STEPS) as f32
}

/// Converts a block coordinate to the 32x fixed-point representation.
///
/// Uses `floor`, matching the server's own conversion, so negative
/// coordinates round towards negative infinity. Out-of-range values saturate.
#[must_use]
pub fn to_fixed_point(coord: f64) -> i32 {
    (coord * FIXED_POINT_SCALE).floor() as i32
}

/// Converts a 32x fixed-point coordinate back to blocks.
#[must_use]
pub fn from_fixed_point(raw: i32) -> f64 {
    f64::from(raw) / FIXED_POINT_SCALE
}
