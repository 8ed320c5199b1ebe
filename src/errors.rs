use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
/// An error encountered when encoding fails.
pub enum EncodeError {
    /// A string, bytestring, array or map is longer than `0xFFFF_FFFF`.
    InvalidLength(usize),
    /// An integral number outside of `[-2^63, 2^64 - 1]`.
    InvalidInteger(f64),
    /// A fractional number with no binary64 layout, i.e. `NaN`.
    InvalidFloat(f64),
    /// The input has no wire representation. Carries the name of the offending kind.
    UnsupportedType(String),
    /// The value is nested deeper than the configured limit.
    DepthLimitExceeded(usize),
    /// A message raised by a [`serde::Serialize`] implementation.
    Custom(String),
}

impl Error for EncodeError {}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use EncodeError::*;
        match self {
            InvalidLength(len) => write!(f, "Invalid length: {} exceeds 0xffffffff", len),
            InvalidInteger(n) => write!(f, "Invalid integer: {}", n),
            InvalidFloat(n) => write!(f, "Invalid float: {}", n),
            UnsupportedType(kind) => write!(f, "Type \"{}\" not yet supported", kind),
            DepthLimitExceeded(max) => write!(f, "Nesting depth exceeds the limit of {}", max),
            Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl serde::ser::Error for EncodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self { EncodeError::Custom(msg.to_string()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// An error encountered when decoding fails.
pub enum DecodeError {
    /// Decoding needed `wanted` bytes at `index`, but the input is only `length` bytes long.
    OutOfRange {
        /// Cursor position of the failed read.
        index: usize,
        /// Number of bytes the read required.
        wanted: usize,
        /// Total length of the input.
        length: usize,
    },
    /// A reserved tag was found while [`ReservedTags::Reject`](crate::config::ReservedTags)
    /// is configured.
    ReservedTag(u8),
    /// A map key decoded to a value with no text form (bytes, array, map or date).
    /// Carries the kind that was found.
    InvalidKey(&'static str),
    /// The input is nested deeper than the configured limit.
    DepthLimitExceeded(usize),
}

impl Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DecodeError::*;
        match self {
            OutOfRange {
                index,
                wanted,
                length,
            } => {
                write!(
                    f,
                    "Index is out of range: tried to read {wanted} bytes at {index} from \
                     a buffer of size {length}",
                    wanted = wanted,
                    index = index,
                    length = length,
                )
            }
            ReservedTag(tag) => write!(f, "Found reserved tag: {:#04x}", tag),
            InvalidKey(kind) => write!(f, "Map keys must be text or scalars, found {}", kind),
            DepthLimitExceeded(max) => write!(f, "Nesting depth exceeds the limit of {}", max),
        }
    }
}
