use super::*;
use crate::{
    config::Config,
    date_to_text,
    errors::EncodeError,
    float::f64_to_be,
    inum::{self, IntForm},
    text::encode_utf16,
};
use bytes::BytesMut;
use smallvec::SmallVec;

/// A byte sink the encoder writes into.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self }
}

impl Serializer for BytesMut {
    type Out = Bytes;

    fn put_u8(&mut self, u: u8) { self.extend_from_slice(&[u]) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn finalize(self) -> Self::Out { self.freeze() }
}

/// Convenience methods for [`Serializer`], one per wire type.
pub trait SerializerExt: Serializer {
    /// Add `null`.
    fn put_null(&mut self);

    /// Add a [`bool`].
    fn put_bool(&mut self, b: bool);

    /// Add a number, as an integer if it has no fractional part and as a double
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidInteger`] for integral numbers outside `[-2^63, 2^64 - 1]`,
    /// including infinities, and [`EncodeError::InvalidFloat`] for `NaN`.
    fn put_number(&mut self, n: f64) -> Result<(), EncodeError>;

    /// Add an integral number using the first integer encoding whose range holds it.
    fn put_integer(&mut self, n: f64) -> Result<(), EncodeError>;

    /// Add a float64.
    fn put_double(&mut self, n: f64) -> Result<(), EncodeError>;

    /// Add text.
    fn put_str(&mut self, s: &str) -> Result<(), EncodeError>;

    /// Add text given as UTF-16 code units. Unpaired surrogates become U+FFFD.
    fn put_utf16(&mut self, units: &[u16]) -> Result<(), EncodeError>;

    /// Add a bytestring.
    fn put_bin(&mut self, b: &[u8]) -> Result<(), EncodeError>;

    /// Add an array header. The caller adds `len` values after it.
    fn put_array_header(&mut self, len: usize) -> Result<(), EncodeError>;

    /// Add a map header. The caller adds `len` key-value pairs after it.
    fn put_map_header(&mut self, len: usize) -> Result<(), EncodeError>;
}

/// Tag and length prefix for `len` entries of `family`.
fn header(family: Family, len: usize) -> Result<SmallVec<[u8; 5]>, EncodeError> {
    let (fix, tag16, tag32) = family.tags();
    let mut out = SmallVec::new();
    match SizeClass::of(len) {
        Some(SizeClass::Fix(l)) => out.push(fix | l),
        Some(SizeClass::Len16(l)) => {
            out.push(tag16);
            out.extend_from_slice(&inum::u16_to_be(l as f64));
        }
        Some(SizeClass::Len32(l)) => {
            out.push(tag32);
            out.extend_from_slice(&inum::u32_to_be(l as f64));
        }
        None => return Err(EncodeError::InvalidLength(len)),
    }
    Ok(out)
}

impl<S: Serializer> SerializerExt for S {
    fn put_null(&mut self) { self.put_u8(CON_NULL) }

    fn put_bool(&mut self, b: bool) {
        if b {
            self.put_u8(CON_TRUE)
        } else {
            self.put_u8(CON_FALSE)
        }
    }

    #[inline]
    fn put_number(&mut self, n: f64) -> Result<(), EncodeError> {
        if n.floor() == n {
            self.put_integer(n)
        } else {
            self.put_double(n)
        }
    }

    fn put_integer(&mut self, n: f64) -> Result<(), EncodeError> {
        let form = match IntForm::select(n) {
            Some(form) => form,
            None => {
                log::debug!("[encode] integer {} is out of range", n);
                return Err(EncodeError::InvalidInteger(n));
            }
        };

        match form {
            IntForm::Fix => self.put_slice(&inum::i8_to_be(n)),
            IntForm::U8 => {
                self.put_u8(UINT8);
                self.put_slice(&inum::u8_to_be(n));
            }
            IntForm::I8 => {
                self.put_u8(INT8);
                self.put_slice(&inum::i8_to_be(n));
            }
            IntForm::U16 => {
                self.put_u8(UINT16);
                self.put_slice(&inum::u16_to_be(n));
            }
            IntForm::I16 => {
                self.put_u8(INT16);
                self.put_slice(&inum::i16_to_be(n));
            }
            IntForm::U32 => {
                self.put_u8(UINT32);
                self.put_slice(&inum::u32_to_be(n));
            }
            IntForm::I32 => {
                self.put_u8(INT32);
                self.put_slice(&inum::i32_to_be(n));
            }
            IntForm::I64 => {
                self.put_u8(INT64);
                self.put_slice(&inum::i64_to_be(n));
            }
            IntForm::U64 => {
                self.put_u8(UINT64);
                self.put_slice(&inum::u64_to_be(n));
            }
        }
        Ok(())
    }

    fn put_double(&mut self, n: f64) -> Result<(), EncodeError> {
        match f64_to_be(n) {
            Some(bytes) => {
                self.put_u8(FLOAT64);
                self.put_slice(&bytes);
                Ok(())
            }
            None => {
                log::debug!("[encode] {} has no binary64 layout", n);
                Err(EncodeError::InvalidFloat(n))
            }
        }
    }

    fn put_str(&mut self, s: &str) -> Result<(), EncodeError> {
        let bytes = s.as_bytes();
        self.put_slice(&header(Family::Str, bytes.len())?);
        self.put_slice(bytes);
        Ok(())
    }

    fn put_utf16(&mut self, units: &[u16]) -> Result<(), EncodeError> {
        let mut bytes = Vec::with_capacity(units.len());
        encode_utf16(units, &mut bytes);
        self.put_slice(&header(Family::Str, bytes.len())?);
        self.put_slice(&bytes);
        Ok(())
    }

    fn put_bin(&mut self, b: &[u8]) -> Result<(), EncodeError> {
        self.put_slice(&header(Family::Bin, b.len())?);
        self.put_slice(b);
        Ok(())
    }

    fn put_array_header(&mut self, len: usize) -> Result<(), EncodeError> {
        self.put_slice(&header(Family::Array, len)?);
        Ok(())
    }

    fn put_map_header(&mut self, len: usize) -> Result<(), EncodeError> {
        self.put_slice(&header(Family::Map, len)?);
        Ok(())
    }
}

/// Writes [`Value`]s into a [`Serializer`].
///
/// # Example
///
/// ```
/// use binarypack::prelude::*;
///
/// let mut enc = Encoder::new(Vec::new(), Config::default());
///
/// enc.write(&Value::from(5)).unwrap();
/// enc.write(&Value::from(-1)).unwrap();
///
/// assert_eq!(enc.finalize(), vec![0x05, 0xff]);
/// ```
#[derive(Debug)]
pub struct Encoder<S: Serializer> {
    out: S,
    config: Config,
    depth: usize,
}

impl<S: Serializer> Encoder<S> {
    /// Creates an encoder writing into `out`.
    pub fn new(out: S, config: Config) -> Self {
        Encoder {
            out,
            config,
            depth: 0,
        }
    }

    /// Encodes one value.
    ///
    /// Nulls and absent values are both written as `null`. Dates are written as text.
    pub fn write(&mut self, v: &Value) -> Result<(), EncodeError> {
        match v {
            Value::Text(s) => self.out.put_str(s),
            Value::Number(n) => self.out.put_number(*n),
            Value::Bool(b) => {
                self.out.put_bool(*b);
                Ok(())
            }
            Value::Absent | Value::Null => {
                self.out.put_null();
                Ok(())
            }
            Value::Bytes(b) => self.out.put_bin(b),
            Value::Array(a) => {
                self.enter()?;
                let res = self.write_array(a);
                self.depth -= 1;
                res
            }
            Value::Map(m) => {
                self.enter()?;
                let res = self.write_map(m);
                self.depth -= 1;
                res
            }
            Value::Date(d) => self.out.put_str(&date_to_text(d)),
        }
    }

    fn write_array(&mut self, a: &[Value]) -> Result<(), EncodeError> {
        self.out.put_array_header(a.len())?;
        for item in a {
            self.write(item)?;
        }
        Ok(())
    }

    fn write_map(&mut self, m: &Map) -> Result<(), EncodeError> {
        self.out.put_map_header(m.len())?;
        for (k, v) in m {
            self.out.put_str(k)?;
            self.write(v)?;
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<(), EncodeError> {
        if self.depth >= self.config.max_depth {
            return Err(EncodeError::DepthLimitExceeded(self.config.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Returns the output written so far.
    pub fn finalize(self) -> S::Out { self.out.finalize() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(v: &Value) -> Vec<u8> {
        let mut e = Encoder::new(Vec::new(), Config::default());
        e.write(v).unwrap();
        e.finalize()
    }

    #[test]
    fn constants() {
        assert_eq!(enc(&Value::Null), vec![CON_NULL]);
        assert_eq!(enc(&Value::Absent), vec![CON_NULL]);
        assert_eq!(enc(&Value::from(true)), vec![CON_TRUE]);
        assert_eq!(enc(&Value::from(false)), vec![CON_FALSE]);
    }

    #[test]
    fn fixints() {
        assert_eq!(enc(&Value::from(0)), vec![0x00]);
        assert_eq!(enc(&Value::from(5)), vec![0x05]);
        assert_eq!(enc(&Value::from(127)), vec![0x7f]);
        assert_eq!(enc(&Value::from(-1)), vec![0xff]);
        assert_eq!(enc(&Value::from(-32)), vec![0xe0]);
        assert_eq!(enc(&Value::from(-0.0)), vec![0x00]);
    }

    #[test]
    fn integer_widths() {
        assert_eq!(enc(&Value::from(128)), vec![UINT8, 0x80]);
        assert_eq!(enc(&Value::from(-33)), vec![INT8, 0xdf]);
        assert_eq!(enc(&Value::from(256)), vec![UINT16, 0x01, 0x00]);
        assert_eq!(enc(&Value::from(-129)), vec![INT16, 0xff, 0x7f]);
        assert_eq!(enc(&Value::from(65_536)), vec![UINT32, 0, 1, 0, 0]);
        assert_eq!(enc(&Value::from(-32_769)), vec![INT32, 0xff, 0xff, 0x7f, 0xff]);
        assert_eq!(
            enc(&Value::from(4_294_967_296u64)),
            vec![INT64, 0, 0, 0, 1, 0, 0, 0, 0]
        );
        assert_eq!(
            enc(&Value::from(i64::MAX)),
            vec![INT64, 0x80, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            enc(&Value::from(u64::MAX - (1 << 20))),
            vec![UINT64, 0xff, 0xff, 0xff, 0xff, 0xff, 0xf0, 0, 0]
        );
    }

    #[test]
    fn bad_numbers() {
        let out = &mut Vec::new();
        assert_eq!(
            out.put_number(f64::INFINITY),
            Err(EncodeError::InvalidInteger(f64::INFINITY))
        );
        assert_eq!(
            out.put_number(-1.0e20),
            Err(EncodeError::InvalidInteger(-1.0e20))
        );
        assert!(match out.put_number(f64::NAN) {
            Err(EncodeError::InvalidFloat(n)) => n.is_nan(),
            _ => false,
        });
        assert!(out.is_empty());
    }

    #[test]
    fn doubles() {
        let out = enc(&Value::from(1.5));
        assert_eq!(out[0], FLOAT64);
        assert_eq!(out[1..], 1.5f64.to_bits().to_be_bytes());

        let out = enc(&Value::from(-std::f64::consts::PI));
        assert_eq!(out[0], FLOAT64);
        assert_eq!(out[1..], (-std::f64::consts::PI).to_bits().to_be_bytes());
    }

    #[test]
    fn small_string() {
        assert_eq!(enc(&Value::from("")), vec![FIXSTR]);
        assert_eq!(enc(&Value::from("w")), vec![0b1011_0001, b'w']);
        // byte length, not code points
        assert_eq!(enc(&Value::from("é"))[0], FIXSTR | 2);
    }

    #[test]
    fn large_string() {
        let s = "w".repeat(140);
        let out = enc(&Value::from(s.as_str()));
        assert_eq!(out[..3], [STR16, 0, 140]);
        assert_eq!(out[3..].to_vec(), vec![b'w'; 140]);
    }

    #[test]
    fn utf16() {
        let out = &mut Vec::new();
        out.put_utf16(&[0x61, 0xd83d]).unwrap();
        assert_eq!(out.as_slice(), &[FIXSTR | 4, b'a', 0xef, 0xbf, 0xbd][..]);
    }

    #[test]
    fn bytes() {
        let out = enc(&Value::from_static(b"ab"));
        assert_eq!(out, vec![FIXBIN | 2, b'a', b'b']);

        let buf = Bytes::from_static(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let out = enc(&Value::Bytes(buf.slice(4..)));
        assert_eq!(out, vec![FIXBIN | 4, 4, 5, 6, 7]);

        let out = enc(&Value::Bytes(Bytes::from(vec![9u8; 16])));
        assert_eq!(out[..3], [BIN16, 0, 16]);
    }

    #[test]
    fn small_array() {
        let out = enc(&Value::from(vec![0]));
        assert_eq!(out, vec![FIXARRAY | 1, 0]);
    }

    #[test]
    fn large_array() {
        let out = enc(&Value::from(vec![0; 140]));
        assert_eq!(out[..3], [ARRAY16, 0, 140]);
        assert_eq!(out[3..].to_vec(), vec![0; 140]);
    }

    #[test]
    fn small_map() {
        let mut m = Map::new();
        m.insert("b".to_string(), Value::from("c"));
        m.insert("a".to_string(), Value::Null);

        let out = enc(&Value::from(m));
        // insertion order, not key order
        assert_eq!(
            out,
            vec![FIXMAP | 2, FIXSTR | 1, b'b', FIXSTR | 1, b'c', FIXSTR | 1, b'a', CON_NULL]
        );
    }

    #[test]
    fn large_map() {
        let m: Map = (0..140u8)
            .map(|x| (((b'a' + x % 26) as char).to_string().repeat(1 + x as usize / 26), Value::from(x)))
            .collect();
        let out = enc(&Value::from(m));
        assert_eq!(out[..3], [MAP16, 0, 140]);
    }

    #[test]
    fn headers() {
        assert_eq!(header(Family::Array, 15).unwrap().as_slice(), &[0x9f]);
        assert_eq!(header(Family::Array, 16).unwrap().as_slice(), &[ARRAY16, 0, 16]);
        assert_eq!(
            header(Family::Map, 65_535).unwrap().as_slice(),
            &[MAP16, 0xff, 0xff]
        );
        assert_eq!(
            header(Family::Map, 65_536).unwrap().as_slice(),
            &[MAP32, 0, 1, 0, 0]
        );
        assert_eq!(
            header(Family::Bin, 0xffff_ffff).unwrap().as_slice(),
            &[BIN32, 0xff, 0xff, 0xff, 0xff]
        );
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            header(Family::Str, 0x1_0000_0000),
            Err(EncodeError::InvalidLength(0x1_0000_0000))
        );
    }

    #[test]
    fn depth_limit() {
        let nested = Value::from(vec![Value::from(vec![Value::from(vec![1])])]);
        let mut e = Encoder::new(Vec::new(), Config::default().max_depth(2));
        assert_eq!(e.write(&nested), Err(EncodeError::DepthLimitExceeded(2)));

        let mut e = Encoder::new(Vec::new(), Config::default().max_depth(3));
        assert!(e.write(&nested).is_ok());
    }

    #[test]
    fn reuse_after_error() {
        let mut e = Encoder::new(Vec::new(), Config::default().max_depth(2));
        let bad = Value::from(vec![Value::from(f64::NAN)]);
        assert!(matches!(e.write(&bad), Err(EncodeError::InvalidFloat(_))));

        let mut m = Map::new();
        m.insert("x".to_string(), Value::from(f64::INFINITY));
        let bad = Value::from(vec![Value::from(m)]);
        assert_eq!(e.write(&bad), Err(EncodeError::InvalidInteger(f64::INFINITY)));

        let nested = Value::from(vec![Value::from(vec![1])]);
        assert_eq!(e.write(&nested), Ok(()));
        assert_eq!(e.depth, 0);
    }
}
