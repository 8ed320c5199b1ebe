//! # binarypack
//!
//! binarypack is a compact, tagged binary serialization format from the MessagePack
//! family. It carries nulls, booleans, numbers, text, bytestrings, arrays and
//! string-keyed maps, and it keeps a handful of quirks that existing producers and
//! consumers of the format rely on.
//!
//! # Usage
//!
//! Values are built as [`Value`]s, usually through `From`:
//!
//! ```
//! use binarypack::prelude::*;
//!
//! let mut map = Map::new();
//! map.insert("name".to_string(), Value::from("binarypack"));
//! map.insert("tags".to_string(), Value::from(vec![1, 2, 3]));
//!
//! let value = Value::from(map);
//!
//! // encode
//! let encoded = encode(&value).unwrap();
//!
//! // and then immediately decode
//! let decoded = decode(&encoded).unwrap();
//!
//! assert_eq!(value, decoded);
//! ```
//!
//! Anything implementing [`serde::Serialize`] can be packed directly:
//!
//! ```
//! use binarypack::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point {
//!     x: i32,
//!     y: f64,
//! }
//!
//! let encoded = pack(&Point { x: 1, y: 0.5 }).unwrap();
//! let decoded = decode(&encoded).unwrap();
//!
//! assert_eq!(decoded.to_map().unwrap()["x"], Value::from(1));
//! ```
//!
//! # An overview of the value model
//!
//! ## Numbers
//!
//! There is a single number type, [`f64`]. A number with no fractional part is written
//! as an integer, using the first integer encoding whose range holds it; anything else
//! is written as a double.
//!
//! Integers are composed and decomposed with floating-point arithmetic, so integers
//! above `2^53` come back as the nearest double. `2^63 - 1` is the sharpest case: it
//! rounds to `2^63` before it is written, which lands on the bit pattern of `-2^63`.
//!
//! ```
//! use binarypack::prelude::*;
//!
//! let big = Value::from(i64::MAX);
//! let back = decode(&encode(&big).unwrap()).unwrap();
//!
//! assert_eq!(back, Value::from(i64::MIN));
//! ```
//!
//! ## Null and absent
//!
//! [`Value::Absent`] stands for "no value" and is distinct from [`Value::Null`] in
//! memory, but both are written as `null`. Decoding never produces `Absent` from a
//! `null` tag.
//!
//! ## Text and bytestrings
//!
//! Text is UTF-8 on the wire. [`Value::from_utf16`] accepts raw UTF-16 code units and
//! replaces unpaired surrogates with U+FFFD. Bytestrings are [`Bytes`]; a
//! [`Bytes::slice`] of a larger buffer writes only its own window, and so does
//! [`Value::from_view`] for slices of primitive numbers.
//!
//! ## Dates
//!
//! [`Value::Date`] is accepted by the encoder and written as text, so it comes back as
//! [`Value::Text`].
//!
//! # Wire format
//!
//! Every value starts with a *tag* byte. Multi-byte integers are big-endian.
//!
//! | Tag           | Meaning                                          |
//! | ---           | ---                                              |
//! | `0x00..=0x7f` | positive fixint, the tag is the value            |
//! | `0x80..=0x8f` | fixmap, the low nibble is the number of pairs    |
//! | `0x90..=0x9f` | fixarray, the low nibble is the number of items  |
//! | `0xa0..=0xaf` | fixbin, the low nibble is the length in bytes    |
//! | `0xb0..=0xbf` | fixstr, the low nibble is the length in bytes    |
//! | `0xc0`        | null                                             |
//! | `0xc1`        | reserved                                         |
//! | `0xc2`        | false                                            |
//! | `0xc3`        | true                                             |
//! | `0xc4..=0xc9` | unassigned, handled like the reserved tags       |
//! | `0xca`        | float32, 4 bytes                                 |
//! | `0xcb`        | float64, 8 bytes                                 |
//! | `0xcc..=0xcf` | uint8, uint16, uint32, uint64                    |
//! | `0xd0..=0xd3` | int8, int16, int32, int64                        |
//! | `0xd4..=0xd7` | reserved                                         |
//! | `0xd8`/`0xd9` | str16/str32, length then UTF-8 bytes             |
//! | `0xda`/`0xdb` | bin16/bin32, length then bytes                   |
//! | `0xdc`/`0xdd` | array16/array32, length then items               |
//! | `0xde`/`0xdf` | map16/map32, length then key-value pairs         |
//! | `0xe0..=0xff` | negative fixint, the value is `tag - 0x100`      |
//!
//! Maps, arrays, strings and bytestrings use the fixed form up to 15 entries, the 16-bit
//! form up to `0xffff` and the 32-bit form up to `0xffff_ffff`. Longer values cannot be
//! encoded.
//!
//! Integers use the first matching encoding from: fixint `[-32, 127]`, uint8, int8,
//! uint16, int16, uint32, int32, int64, uint64.
//!
//! Reserved tags are never written. By default they decode to [`Value::Absent`]; see
//! [`config::ReservedTags`].

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

#[macro_use]
mod util;

pub mod config;
pub mod encoding;
pub mod errors;
pub mod float;
pub mod inum;
pub mod prelude;
pub mod rep;
pub mod text;

use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use failure::{bail, Error};
use indexmap::IndexMap;
use std::{collections::HashMap, hash::BuildHasher, time::SystemTime};

/// An insertion-ordered map with text keys.
pub type Map = IndexMap<String, Value>;

#[derive(Clone, Debug, PartialEq)]
/// [`Value`] and its variants.
///
/// # Example
///
/// ```
/// use binarypack::prelude::*;
///
/// let b = Value::Bool(true);
///
/// let val = match b {
///     Value::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// Null. Corresponds to [`None`].
    Null,
    /// No value. Written as null, so it never survives a round trip through `0xc0`.
    Absent,
    /// Boolean.
    Bool(bool),
    /// Number. Integral values are written as integers, the rest as doubles.
    Number(f64),
    /// Text.
    ///
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// let text = Value::from("hello world");
    /// ```
    Text(String),
    /// Bytestring.
    ///
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// let buf = Bytes::from_static(&[0, 1, 2, 3, 4, 5, 6, 7]);
    ///
    /// // only the last four bytes are written
    /// let view = Value::Bytes(buf.slice(4..));
    /// ```
    Bytes(Bytes),
    /// Array.
    ///
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// let array = Value::from(vec![1, 2, 3, 4]);
    /// ```
    Array(Vec<Value>),
    /// Map.
    ///
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// let mut map = Map::new();
    /// map.insert("hello world".to_string(), Value::from(1));
    ///
    /// let map = Value::Map(map);
    /// ```
    Map(Map),
    /// Date. Written as text and never produced by the decoder.
    Date(DateTime<FixedOffset>),
}

impl Value {
    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Absent => "absent",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Date(_) => "date",
        }
    }

    /// Converts a bytestring literal to a [`Value`].
    ///
    /// # Example
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// let foo = Value::from_static(b"this is an example");
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value { Value::Bytes(Bytes::from_static(bytes)) }

    /// Builds text from UTF-16 code units, replacing unpaired surrogates with U+FFFD.
    ///
    /// # Example
    ///
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// let v = Value::from_utf16(&[0x68, 0x69, 0xdc00]);
    ///
    /// assert_eq!(v, Value::from("hi\u{fffd}"));
    /// ```
    pub fn from_utf16(units: &[u16]) -> Value {
        let mut buf = Vec::with_capacity(units.len());
        text::encode_utf16(units, &mut buf);
        Value::Text(text::decode_utf8(&buf))
    }

    /// Captures the bytes of a slice of primitive numbers, in native byte order.
    ///
    /// # Example
    ///
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// let v = Value::from_view(&[1u16, 2]);
    ///
    /// assert_eq!(v.to_bytes().unwrap().len(), 4);
    /// ```
    pub fn from_view<T: rep::BinaryView>(view: &[T]) -> Value {
        let mut buf = Vec::with_capacity(view.len() * T::WIDTH);
        for t in view {
            t.put_ne_bytes(&mut buf);
        }
        Value::Bytes(Bytes::from(buf))
    }

    /// Indicates whether a value is [`Value::Null`] or [`Value::Absent`].
    ///
    /// # Example
    ///
    /// ```
    /// use binarypack::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(Value::Absent.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null | Value::Absent => true,
            _ => false,
        }
    }

    /// Tries to read a number.
    /// This will return an [`Error`] if the value is not a [`Value::Number`].
    ///
    /// # Example
    ///
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// assert_eq!(Value::from(3).as_f64().unwrap(), 3.0);
    /// ```
    pub fn as_f64(&self) -> Result<f64, Error> {
        match self {
            Value::Number(n) => Ok(*n),
            v => bail!("Value is `{}`, not `number`", v.kind()),
        }
    }

    /// Tries to convert a value to a [`bool`].
    /// This will return an [`Error`] if the value is not a [`Value::Bool`].
    pub fn to_bool(&self) -> Result<bool, Error> {
        match self {
            Value::Bool(b) => Ok(*b),
            v => bail!("Value is `{}`, not `boolean`", v.kind()),
        }
    }

    /// Tries to borrow the text of a value.
    /// This will return an [`Error`] if the value is not [`Value::Text`].
    pub fn to_str(&self) -> Result<&str, Error> {
        match self {
            Value::Text(s) => Ok(s),
            v => bail!("Value is `{}`, not `text`", v.kind()),
        }
    }

    /// Tries to borrow the bytes of a value.
    /// This will return an [`Error`] if the value is not [`Value::Bytes`].
    pub fn to_bytes(&self) -> Result<&Bytes, Error> {
        match self {
            Value::Bytes(b) => Ok(b),
            v => bail!("Value is `{}`, not `bytes`", v.kind()),
        }
    }

    /// Converts a [`Value`] to a slice of values.
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    ///
    /// # Example
    ///
    /// ```
    /// use binarypack::prelude::*;
    ///
    /// let v = Value::from(vec![1, 2, 3]);
    ///
    /// assert_eq!(v.to_vec().unwrap().len(), 3);
    /// ```
    pub fn to_vec(&self) -> Result<&Vec<Value>, Error> {
        match self {
            Value::Array(a) => Ok(a),
            v => bail!("Value is `{}`, not `array`", v.kind()),
        }
    }

    /// Consumes a [`Value`], converting it into a vector of values.
    /// This will return an [`Error`] if the value is not a [`Value::Array`].
    pub fn into_vec(self) -> Result<Vec<Value>, Error> {
        match self {
            Value::Array(a) => Ok(a),
            v => bail!("Value is `{}`, not `array`", v.kind()),
        }
    }

    /// Borrows the [`Map`] of a value.
    /// This will return an [`Error`] if the value is not a [`Value::Map`].
    pub fn to_map(&self) -> Result<&Map, Error> {
        match self {
            Value::Map(m) => Ok(m),
            v => bail!("Value is `{}`, not `map`", v.kind()),
        }
    }

    /// Consumes a [`Value`], converting it into a [`Map`].
    /// This will return an [`Error`] if the value is not a [`Value::Map`].
    pub fn into_map(self) -> Result<Map, Error> {
        match self {
            Value::Map(m) => Ok(m),
            v => bail!("Value is `{}`, not `map`", v.kind()),
        }
    }
}

/// The textual form of a date: weekday, month, day, year, time and UTC offset, e.g.
/// `Thu Feb 01 2001 01:01:01 GMT+0000`. No zone name follows the offset.
pub fn date_to_text(date: &DateTime<FixedOffset>) -> String {
    date.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

fn fmt_bytes(bytes: &Bytes) -> String {
    let mut bytes_string: String = "b\"".to_owned();
    bytes
        .iter()
        .for_each(|c| bytes_string.push_str(&format!("{:02x}", c)));
    bytes_string.push('"');

    bytes_string
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn fmt_map(m: &Map, indent: usize) -> String {
            let mut map_string: String = "{".to_owned();
            for (i, (k, v)) in m.iter().enumerate() {
                if i == 0 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    map_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                let value = fmt_helper(v, indent + 2);
                map_string.push_str(&format!("{key:?}: {value}", key = k, value = value));

                // check if we're at last element
                if i == m.len() - 1 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            map_string.push('}');

            map_string
        }

        fn fmt_helper(v: &Value, indent: usize) -> String {
            match v {
                Value::Null => "null".to_owned(),
                Value::Absent => "undefined".to_owned(),
                Value::Bool(b) => format!("{}", b),
                Value::Number(n) => format!("{}", n),
                Value::Text(s) => format!("{:?}", s),
                Value::Bytes(bytes) => fmt_bytes(bytes),
                Value::Date(d) => format!("{:?}", date_to_text(d)),
                Value::Array(a) => {
                    let mut arr_string: String = "[".to_owned();
                    for (i, v) in a.iter().enumerate() {
                        if i != 0 {
                            arr_string.push_str(", ");
                        }
                        arr_string.push_str(&fmt_helper(v, indent));
                    }
                    arr_string.push(']');

                    arr_string
                }
                Value::Map(m) => fmt_map(m, indent),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

impl Default for Value {
    fn default() -> Self { Value::Null }
}

// bool -> Value
from_fn!(Value, bool, Value::Bool);

// numbers -> Value
from_fn!(Value, f64, Value::Number);
from_prims!(Value);

// text -> Value
from_fn!(Value, String, Value::Text);
compose_from!(Value, String, &str);
compose_from!(Value, String, char);

// Bytes -> Value
from_fn!(Value, Bytes, Value::Bytes);

// Map -> Value
from_fn!(Value, Map, Value::Map);

// unit -> Value
from_fn!(Value, (), |_| Value::Null);

// dates -> Value
from_fn!(Value, SystemTime, |t| Value::from(DateTime::<Utc>::from(t)));

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(d: DateTime<Tz>) -> Value {
        let offset = d.offset().fix();
        Value::Date(d.with_timezone(&offset))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Value::Array(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Value { o.map_or(Value::Null, T::into) }
}

impl<T: Into<Value>, S: BuildHasher> From<HashMap<String, T, S>> for Value {
    fn from(m: HashMap<String, T, S>) -> Value {
        Value::Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl std::iter::FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Value {
        Value::Array(iter.into_iter().collect())
    }
}

impl std::iter::FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Value {
        Value::Map(iter.into_iter().collect())
    }
}
