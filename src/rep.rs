//! Conversions between Rust types and [`Value`].
//!
//! Any [`serde::Serialize`] type can be turned into a [`Value`] with [`to_value`], or
//! straight into bytes with [`pack`].
//!
//! # Example
//!
//! ```
//! use binarypack::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct SomeData {
//!     x: usize,
//!     y: Option<i32>,
//! }
//!
//! let v = to_value(&SomeData { x: 1, y: None }).unwrap();
//!
//! assert_eq!(v.to_map().unwrap()["x"], Value::from(1));
//! assert_eq!(v.to_map().unwrap()["y"], Value::Null);
//! ```

use crate::{date_to_text, encoding::encode, errors::EncodeError, Map, Value};
use bytes::Bytes;
use serde::ser::{self, Impossible, Serialize};

/// Elements of a typed array, copied into [`Value::Bytes`] by
/// [`Value::from_view`](crate::Value::from_view).
pub trait BinaryView: Copy {
    /// Size of one element in bytes.
    const WIDTH: usize;
    /// Appends the in-memory representation of the element.
    fn put_ne_bytes(&self, out: &mut Vec<u8>);
}

macro_rules! binary_view {
    ($($t:ty),*) => {
        $(
            impl BinaryView for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                fn put_ne_bytes(&self, out: &mut Vec<u8>) { out.extend_from_slice(&self.to_ne_bytes()) }
            }
        )*
    };
}

binary_view!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Converts any [`Serialize`] type into a [`Value`].
///
/// Unit variants become text. Newtype, tuple and struct variants become a map with a
/// single entry named after the variant.
///
/// # Errors
///
/// [`EncodeError::UnsupportedType`] for map keys that are not strings, chars, integers or
/// unit variants.
pub fn to_value<T: Serialize + ?Sized>(t: &T) -> Result<Value, EncodeError> {
    t.serialize(ValueSerializer)
}

/// Converts any [`Serialize`] type into a [`Value`] and encodes it.
///
/// # Example
///
/// ```
/// use binarypack::prelude::*;
///
/// assert_eq!(pack(&(1, "a")).unwrap()[..], [0x92, 0x01, 0xb1, b'a']);
/// ```
pub fn pack<T: Serialize + ?Sized>(t: &T) -> Result<Bytes, EncodeError> { encode(&to_value(t)?) }

impl Serialize for Value {
    fn serialize<S: ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use ser::{SerializeMap as _, SerializeSeq as _};
        match self {
            Value::Null => s.serialize_unit(),
            Value::Absent => s.serialize_none(),
            Value::Bool(b) => s.serialize_bool(*b),
            Value::Number(n) => s.serialize_f64(*n),
            Value::Text(t) => s.serialize_str(t),
            Value::Bytes(b) => s.serialize_bytes(b),
            Value::Array(a) => {
                let mut seq = s.serialize_seq(Some(a.len()))?;
                for item in a {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(m) => {
                let mut map = s.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Date(d) => s.serialize_str(&date_to_text(d)),
        }
    }
}

/// Serializer producing a [`Value`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ValueSerializer;

fn one_entry(name: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(name.to_string(), value);
    Value::Map(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = EncodeError;
    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_i8(self, v: i8) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_i16(self, v: i16) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_i32(self, v: i32) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_i64(self, v: i64) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_i128(self, v: i128) -> Result<Value, EncodeError> { Ok(Value::Number(v as f64)) }

    fn serialize_u8(self, v: u8) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_u16(self, v: u16) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_u32(self, v: u32) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_u64(self, v: u64) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_u128(self, v: u128) -> Result<Value, EncodeError> { Ok(Value::Number(v as f64)) }

    fn serialize_f32(self, v: f32) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_f64(self, v: f64) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_char(self, v: char) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_str(self, v: &str) -> Result<Value, EncodeError> { Ok(Value::from(v)) }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, EncodeError> {
        Ok(Value::Bytes(Bytes::copy_from_slice(v)))
    }

    fn serialize_none(self) -> Result<Value, EncodeError> { Ok(Value::Null) }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, EncodeError> { Ok(Value::Null) }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, EncodeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, EncodeError> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, EncodeError> {
        Ok(one_entry(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, EncodeError> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, EncodeError> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap, EncodeError> {
        Ok(SerializeMap {
            map: Map::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap, EncodeError> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, EncodeError> {
        Ok(SerializeStructVariant {
            variant,
            map: Map::with_capacity(len),
        })
    }
}

#[doc(hidden)]
#[derive(Debug)]
pub struct SerializeVec {
    items: Vec<Value>,
}

#[doc(hidden)]
#[derive(Debug)]
pub struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Value>,
}

#[doc(hidden)]
#[derive(Debug)]
pub struct SerializeMap {
    map: Map,
    next_key: Option<String>,
}

#[doc(hidden)]
#[derive(Debug)]
pub struct SerializeStructVariant {
    variant: &'static str,
    map: Map,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> { Ok(Value::Array(self.items)) }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, EncodeError> { ser::SerializeSeq::end(self) }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, EncodeError> { ser::SerializeSeq::end(self) }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(one_entry(self.variant, Value::Array(self.items)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), EncodeError> {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), EncodeError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| EncodeError::Custom("map value without a key".to_string()))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> { Ok(Value::Map(self.map)) }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> { Ok(Value::Map(self.map)) }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = EncodeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, EncodeError> {
        Ok(one_entry(self.variant, Value::Map(self.map)))
    }
}

/// Map keys are text on the wire. Integers and chars are written out, everything else is
/// rejected.
#[derive(Copy, Clone, Debug)]
struct MapKeySerializer;

fn bad_key(kind: &str) -> EncodeError {
    log::debug!("[to_value] rejected {} map key", kind);
    EncodeError::UnsupportedType(format!("{} map key", kind))
}

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = EncodeError;
    type SerializeSeq = Impossible<String, EncodeError>;
    type SerializeTuple = Impossible<String, EncodeError>;
    type SerializeTupleStruct = Impossible<String, EncodeError>;
    type SerializeTupleVariant = Impossible<String, EncodeError>;
    type SerializeMap = Impossible<String, EncodeError>;
    type SerializeStruct = Impossible<String, EncodeError>;
    type SerializeStructVariant = Impossible<String, EncodeError>;

    fn serialize_bool(self, _v: bool) -> Result<String, EncodeError> { Err(bad_key("boolean")) }

    fn serialize_i8(self, v: i8) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_i16(self, v: i16) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_i32(self, v: i32) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_i64(self, v: i64) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_u8(self, v: u8) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_u16(self, v: u16) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_u32(self, v: u32) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_u64(self, v: u64) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_f32(self, _v: f32) -> Result<String, EncodeError> { Err(bad_key("float")) }

    fn serialize_f64(self, _v: f64) -> Result<String, EncodeError> { Err(bad_key("float")) }

    fn serialize_char(self, v: char) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_str(self, v: &str) -> Result<String, EncodeError> { Ok(v.to_string()) }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, EncodeError> { Err(bad_key("bytes")) }

    fn serialize_none(self) -> Result<String, EncodeError> { Err(bad_key("null")) }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<String, EncodeError> {
        Err(bad_key("optional"))
    }

    fn serialize_unit(self) -> Result<String, EncodeError> { Err(bad_key("null")) }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, EncodeError> {
        Err(bad_key("null"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, EncodeError> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, EncodeError> {
        Err(bad_key("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
        Err(bad_key("array"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, EncodeError> {
        Err(bad_key("array"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodeError> {
        Err(bad_key("array"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodeError> {
        Err(bad_key("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
        Err(bad_key("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, EncodeError> {
        Err(bad_key("map"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, EncodeError> {
        Err(bad_key("enum"))
    }
}
