//! # Binary encoder and decoder
//!
//! Encode and decode functions for [`Value`]s.
//!
//! # Example
//!
//! ```
//! use binarypack::prelude::*;
//!
//! let mut map = Map::new();
//! map.insert("id".to_string(), Value::from(7));
//! map.insert("tags".to_string(), Value::from(vec!["a", "b"]));
//! let value = Value::from(map);
//!
//! // encode into a fresh buffer
//! let enc = encode(&value).unwrap();
//!
//! // or append to an existing one
//! let out = &mut vec![0xc0];
//! encode_into(&value, out).unwrap();
//!
//! // they are equivalent
//! assert_eq!(out[1..], enc[..]);
//!
//! // Note: decoding returns a `Result`
//! let dec = decode(&enc).unwrap();
//!
//! // success!
//! assert_eq!(dec, value);
//! ```

use crate::{
    config::Config,
    errors::{DecodeError, EncodeError},
    Map, Value,
};
use bytes::{Bytes, BytesMut};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
use constants::*;

/// Encodes a [`Value`] into a new buffer with the default [`Config`].
///
/// # Example
///
/// ```
/// use binarypack::prelude::*;
///
/// assert_eq!(encode(&Value::from(5)).unwrap()[..], [0x05]);
/// assert_eq!(encode(&Value::from(-1)).unwrap()[..], [0xff]);
/// assert_eq!(encode(&Value::from("")).unwrap()[..], [0xb0]);
/// ```
pub fn encode(v: &Value) -> Result<Bytes, EncodeError> { encode_with(v, &Config::default()) }

/// Encodes a [`Value`] into a new buffer.
pub fn encode_with(v: &Value, config: &Config) -> Result<Bytes, EncodeError> {
    let mut enc = Encoder::new(BytesMut::new(), *config);
    enc.write(v)?;
    Ok(enc.finalize())
}

/// Appends the encoding of a [`Value`] to `out`.
///
/// If encoding fails `out` is left as it was.
///
/// # Example
///
/// ```
/// use binarypack::prelude::*;
///
/// let out = &mut vec![0x01];
///
/// assert!(encode_into(&Value::from(vec![Value::from(2), Value::from(f64::NAN)]), out).is_err());
/// assert_eq!(*out, vec![0x01]);
///
/// encode_into(&Value::from(2), out).unwrap();
/// assert_eq!(*out, vec![0x01, 0x02]);
/// ```
pub fn encode_into(v: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let start = out.len();
    let mut enc = Encoder::new(std::mem::take(out), Config::default());
    let res = enc.write(v);
    *out = enc.finalize();
    if res.is_err() {
        out.truncate(start);
    }
    res
}

/// Decodes the first [`Value`] in `data` with the default [`Config`]. Bytes after it are
/// ignored.
///
/// # Example
///
/// ```
/// use binarypack::prelude::*;
///
/// assert_eq!(decode(&[0xc3]).unwrap(), Value::from(true));
///
/// // truncated input
/// assert!(decode(&[0xcd, 0x01]).is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> { decode_with(data, &Config::default()) }

/// Decodes the first [`Value`] in `data`.
pub fn decode_with(data: &[u8], config: &Config) -> Result<Value, DecodeError> {
    Decoder::with_config(data, *config).decode_next()
}
