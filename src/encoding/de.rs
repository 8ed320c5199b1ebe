use super::*;
use crate::{
    config::{Config, ReservedTags},
    errors::DecodeError,
    float::{f32_from_be, f64_from_be},
    inum,
    text::decode_utf8,
};

/// Reads [`Value`]s from a byte slice.
///
/// The cursor only moves forward. Each read checks that enough bytes remain before
/// advancing, so a truncated input fails with [`DecodeError::OutOfRange`].
///
/// # Example
///
/// ```
/// use binarypack::prelude::*;
///
/// let mut dec = Decoder::new(&[0x05, 0xff, 0xb0]);
///
/// assert_eq!(dec.decode_next().unwrap(), Value::from(5));
/// assert_eq!(dec.decode_next().unwrap(), Value::from(-1));
/// assert_eq!(dec.position(), 2);
/// assert_eq!(dec.decode_next().unwrap(), Value::from(""));
/// assert_eq!(dec.remaining(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    index: usize,
    depth: usize,
    config: Config,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder with the default [`Config`].
    pub fn new(data: &'a [u8]) -> Self { Self::with_config(data, Config::default()) }

    /// Creates a decoder.
    pub fn with_config(data: &'a [u8], config: Config) -> Self {
        Decoder {
            data,
            index: 0,
            depth: 0,
            config,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize { self.index }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize { self.data.len() - self.index }

    /// Decodes the next value.
    ///
    /// On failure the cursor is left at the start of the value, so nothing from a
    /// partially decoded value is consumed.
    pub fn decode_next(&mut self) -> Result<Value, DecodeError> {
        let start = self.index;
        self.depth = 0;
        let res = self.read_value();
        if res.is_err() {
            self.index = start;
        }
        res
    }

    #[inline]
    fn read_many(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::OutOfRange {
                index: self.index,
                wanted: len,
                length: self.data.len(),
            });
        }
        let out = &self.data[self.index..self.index + len];
        self.index += len;
        Ok(out)
    }

    #[inline]
    fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_many(N)?);
        Ok(out)
    }

    #[inline]
    fn take_byte(&mut self) -> Result<u8, DecodeError> { Ok(self.read_many(1)?[0]) }

    #[inline]
    fn read_len16(&mut self) -> Result<usize, DecodeError> {
        Ok(inum::u16_from_be(self.read_fixed()?) as usize)
    }

    #[inline]
    fn read_len32(&mut self) -> Result<usize, DecodeError> {
        Ok(inum::u32_from_be(self.read_fixed()?) as usize)
    }

    fn read_value(&mut self) -> Result<Value, DecodeError> {
        let tag = self.take_byte()?;

        if tag <= POS_FIXINT_MAX {
            return Ok(Value::Number(tag as f64));
        }
        if tag >= NEG_FIXINT_MIN {
            return Ok(Value::Number(inum::i8_from_be([tag])));
        }

        let len = (tag & MASK_FIX_LEN) as usize;
        match tag & MASK_FIX_TYPE {
            FIXMAP => return self.read_map(len),
            FIXARRAY => return self.read_array(len),
            FIXBIN => return self.read_bin(len),
            FIXSTR => return self.read_str(len),
            _ => {}
        }

        let num = |n: f64| Ok(Value::Number(n));
        match tag {
            CON_NULL => Ok(Value::Null),
            CON_FALSE => Ok(Value::Bool(false)),
            CON_TRUE => Ok(Value::Bool(true)),
            FLOAT32 => num(f32_from_be(self.read_fixed()?) as f64),
            FLOAT64 => num(f64_from_be(self.read_fixed()?)),
            UINT8 => num(inum::u8_from_be(self.read_fixed()?)),
            UINT16 => num(inum::u16_from_be(self.read_fixed()?)),
            UINT32 => num(inum::u32_from_be(self.read_fixed()?)),
            UINT64 => num(inum::u64_from_be(self.read_fixed()?)),
            INT8 => num(inum::i8_from_be(self.read_fixed()?)),
            INT16 => num(inum::i16_from_be(self.read_fixed()?)),
            INT32 => num(inum::i32_from_be(self.read_fixed()?)),
            INT64 => num(inum::i64_from_be(self.read_fixed()?)),
            STR16 => {
                let len = self.read_len16()?;
                self.read_str(len)
            }
            STR32 => {
                let len = self.read_len32()?;
                self.read_str(len)
            }
            BIN16 => {
                let len = self.read_len16()?;
                self.read_bin(len)
            }
            BIN32 => {
                let len = self.read_len32()?;
                self.read_bin(len)
            }
            ARRAY16 => {
                let len = self.read_len16()?;
                self.read_array(len)
            }
            ARRAY32 => {
                let len = self.read_len32()?;
                self.read_array(len)
            }
            MAP16 => {
                let len = self.read_len16()?;
                self.read_map(len)
            }
            MAP32 => {
                let len = self.read_len32()?;
                self.read_map(len)
            }
            CON_RESERVED | RESERVED_MIN..=RESERVED_MAX => self.reserved(tag),
            // unassigned, 0xc4..=0xc9
            _ => self.reserved(tag),
        }
    }

    fn reserved(&self, tag: u8) -> Result<Value, DecodeError> {
        match self.config.reserved_tags {
            ReservedTags::Absent => {
                log::debug!("[decode] tag {:#04x} at {} has no value", tag, self.index - 1);
                Ok(Value::Absent)
            }
            ReservedTags::Reject => Err(DecodeError::ReservedTag(tag)),
        }
    }

    fn read_str(&mut self, len: usize) -> Result<Value, DecodeError> {
        let bytes = self.read_many(len)?;
        Ok(Value::Text(decode_utf8(bytes)))
    }

    fn read_bin(&mut self, len: usize) -> Result<Value, DecodeError> {
        let bytes = self.read_many(len)?;
        Ok(Value::Bytes(Bytes::copy_from_slice(bytes)))
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.config.max_depth {
            return Err(DecodeError::DepthLimitExceeded(self.config.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn read_array(&mut self, len: usize) -> Result<Value, DecodeError> {
        self.enter()?;
        // every element takes at least one byte
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            items.push(self.read_value()?);
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn read_map(&mut self, len: usize) -> Result<Value, DecodeError> {
        self.enter()?;
        let mut map = Map::with_capacity(len.min(self.remaining() / 2));
        for _ in 0..len {
            let key = map_key(self.read_value()?)?;
            let value = self.read_value()?;
            if map.insert(key, value).is_some() {
                log::debug!("[decode] duplicate map key before {}, keeping the last value", self.index);
            }
        }
        self.depth -= 1;
        Ok(Value::Map(map))
    }
}

fn number_key(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}

/// Scalar keys take their text form. Container, byte and date keys have none.
fn map_key(key: Value) -> Result<String, DecodeError> {
    match key {
        Value::Text(key) => Ok(key),
        Value::Number(n) => Ok(number_key(n)),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Absent => Ok("undefined".to_string()),
        other => {
            log::debug!("[decode] rejected {} map key", other.kind());
            Err(DecodeError::InvalidKey(other.kind()))
        }
    }
}
