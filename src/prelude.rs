//! Commonly used items, for glob import.

pub use crate::{
    config::{Config, ReservedTags},
    encoding::{
        decode, decode_with, encode, encode_into, encode_with, Decoder, Encoder, Serializer,
        SerializerExt,
    },
    errors::{DecodeError, EncodeError},
    rep::{pack, to_value, BinaryView},
    Map, Value,
};
pub use bytes::Bytes;
