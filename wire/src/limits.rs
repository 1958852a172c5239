//! Configurable limits for bounded decoding.

/// Wire-level limits for packet decoding.
///
/// These limits are enforced before any length-driven allocation so that a
/// hostile or corrupted capture cannot force unbounded memory use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum frame size in bytes, excluding the length prefix.
    pub max_frame_bytes: usize,

    /// Maximum element count of a length-prefixed array.
    pub max_array_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Largest length a 3-byte VarInt prefix can express.
            max_frame_bytes: 2_097_151,
            max_array_len: 4096,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 1024,
            max_array_len: 16,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
            max_array_len: usize::MAX,
        }
    }
}
