//! Error types for wire format operations.

use std::fmt;

use thiserror::Error;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors that can occur while reading protocol primitives or frames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Attempted to read past the end of the buffer.
    #[error("attempted to read {requested} bytes but only {available} bytes available")]
    UnexpectedEof { requested: usize, available: usize },

    /// A VarInt ran longer than five bytes.
    #[error("invalid varint: more than 5 bytes")]
    InvalidVarInt,

    /// A boolean byte other than 0 or 1.
    #[error("invalid boolean byte: 0x{value:02X}")]
    InvalidBool { value: u8 },

    /// A length or count prefix was negative.
    #[error("negative length prefix: {value}")]
    NegativeLength { value: i32 },

    /// The frame length prefix disagrees with the bytes that follow it.
    #[error("frame length mismatch: prefix declares {declared} bytes but {available} available")]
    FrameLengthMismatch { declared: usize, available: usize },

    /// Limits exceeded.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    FrameBytes,
    ArrayLength,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FrameBytes => "frame bytes",
            Self::ArrayLength => "array length",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unexpected_eof() {
        let err = DecodeError::UnexpectedEof {
            requested: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("8 bytes"), "should mention requested bytes");
        assert!(msg.contains("3 bytes"), "should mention available bytes");
    }

    #[test]
    fn error_display_invalid_bool() {
        let err = DecodeError::InvalidBool { value: 0xAB };
        assert!(err.to_string().contains("0xAB"));
    }

    #[test]
    fn error_display_limits_exceeded() {
        let err = DecodeError::LimitsExceeded {
            kind: LimitKind::ArrayLength,
            limit: 4,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("array length"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn error_display_frame_mismatch() {
        let err = DecodeError::FrameLengthMismatch {
            declared: 12,
            available: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains('4'));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<DecodeError>();
    }
}
