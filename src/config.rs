//! Settings shared by the [`Encoder`](crate::encoding::Encoder) and the
//! [`Decoder`](crate::encoding::Decoder).
//!
//! # Example
//!
//! ```
//! use binarypack::prelude::*;
//!
//! let config = Config::default()
//!     .max_depth(16)
//!     .reserved_tags(ReservedTags::Reject);
//!
//! assert!(decode_with(&[0xc1], &config).is_err());
//! ```

/// Default limit on the nesting depth of arrays and maps.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// What the decoder does with the tags that carry no value: the reserved `0xc1` and
/// `0xd4..=0xd7`, and the unassigned `0xc4..=0xc9`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReservedTags {
    /// Decode them as [`Value::Absent`](crate::Value::Absent).
    Absent,
    /// Fail with [`DecodeError::ReservedTag`](crate::errors::DecodeError::ReservedTag).
    Reject,
}

impl Default for ReservedTags {
    fn default() -> Self { ReservedTags::Absent }
}

/// Codec configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of arrays and maps nested inside one another. Zero allows scalars only.
    pub max_depth: usize,
    /// Handling of reserved tags when decoding.
    pub reserved_tags: ReservedTags,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            reserved_tags: ReservedTags::default(),
        }
    }
}

impl Config {
    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the reserved tag policy.
    pub fn reserved_tags(mut self, reserved_tags: ReservedTags) -> Self {
        self.reserved_tags = reserved_tags;
        self
    }
}
