//! Big-endian integer codec.
//!
//! Numbers in the value model are `f64`s, so the integer codec works on `f64`s too. The
//! encoders take the low bits of the truncated value, the way a 32-bit bitwise `and`
//! does, and the decoders compose the result with floating-point arithmetic. Above `2^53`
//! both directions round to the nearest double; the wire format depends on this.
//!
//! # Example
//!
//! ```
//! use binarypack::inum::*;
//!
//! assert_eq!(u16_to_be(0x1234 as f64), [0x12, 0x34]);
//! assert_eq!(i16_from_be([0xff, 0xfe]), -2.0);
//! ```

/// `2^32`
const B32: f64 = 4_294_967_296.0;
/// `2^63`
const B63: f64 = 9_223_372_036_854_775_808.0;
/// `2^64`
const B64: f64 = 18_446_744_073_709_551_616.0;

/// Low 32 bits of the truncated value, as two's complement.
#[inline]
fn word(x: f64) -> u32 {
    if x.is_finite() {
        (x.trunc() as i128) as u32
    } else {
        0
    }
}

#[inline]
fn compose(bytes: &[u8]) -> f64 { bytes.iter().fold(0.0, |acc, b| acc * 256.0 + *b as f64) }

/// Encodes the low 8 bits of `num`.
pub fn u8_to_be(num: f64) -> [u8; 1] { [word(num) as u8] }

/// Encodes the low 16 bits of `num`.
pub fn u16_to_be(num: f64) -> [u8; 2] {
    let w = word(num);
    [(w >> 8) as u8, w as u8]
}

/// Encodes the low 32 bits of `num`.
pub fn u32_to_be(num: f64) -> [u8; 4] { word(num).to_be_bytes() }

/// Encodes a non-negative `num` as two 32-bit words. The high word is `num / 2^32`,
/// truncated, so `2^64` wraps around to zero.
pub fn u64_to_be(num: f64) -> [u8; 8] {
    let high = word(num / B32);
    let low = word(num % B32);
    join(high, low)
}

/// Same bits as [`u8_to_be`].
pub fn i8_to_be(num: f64) -> [u8; 1] { u8_to_be(num) }

/// Same bits as [`u16_to_be`].
pub fn i16_to_be(num: f64) -> [u8; 2] { u16_to_be(num) }

/// Same bits as [`u32_to_be`].
pub fn i32_to_be(num: f64) -> [u8; 4] { u32_to_be(num) }

/// Encodes `num` as a floored high word and a signed remainder.
pub fn i64_to_be(num: f64) -> [u8; 8] {
    let high = word((num / B32).floor());
    let low = word(num % B32);
    join(high, low)
}

fn join(high: u32, low: u32) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&high.to_be_bytes());
    out[4..].copy_from_slice(&low.to_be_bytes());
    out
}

/// Decodes an unsigned byte.
pub fn u8_from_be(bytes: [u8; 1]) -> f64 { bytes[0] as f64 }

/// Decodes a big-endian `u16`.
pub fn u16_from_be(bytes: [u8; 2]) -> f64 { compose(&bytes) }

/// Decodes a big-endian `u32`.
pub fn u32_from_be(bytes: [u8; 4]) -> f64 { compose(&bytes) }

/// Decodes a big-endian `u64`. Rounds to the nearest double above `2^53`.
pub fn u64_from_be(bytes: [u8; 8]) -> f64 { compose(&bytes) }

/// Decodes a two's complement byte.
pub fn i8_from_be(bytes: [u8; 1]) -> f64 {
    let u = u8_from_be(bytes);
    if u < 128.0 {
        u
    } else {
        u - 256.0
    }
}

/// Decodes a big-endian two's complement `i16`.
pub fn i16_from_be(bytes: [u8; 2]) -> f64 {
    let u = u16_from_be(bytes);
    if u < 32_768.0 {
        u
    } else {
        u - 65_536.0
    }
}

/// Decodes a big-endian two's complement `i32`.
pub fn i32_from_be(bytes: [u8; 4]) -> f64 {
    let u = u32_from_be(bytes);
    if u < 2_147_483_648.0 {
        u
    } else {
        u - B32
    }
}

/// Decodes a big-endian two's complement `i64`. The unsigned value is composed first, so
/// negative numbers lose precision as soon as the unsigned value exceeds `2^53`.
pub fn i64_from_be(bytes: [u8; 8]) -> f64 {
    let u = u64_from_be(bytes);
    if u < B63 {
        u
    } else {
        u - B64
    }
}

/// The integer encodings, in the order they are tried.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntForm {
    /// `[-32, 127]`, stored in the tag byte itself.
    Fix,
    /// `[0, 255]`
    U8,
    /// `[-128, 127]`
    I8,
    /// `[0, 65535]`
    U16,
    /// `[-32768, 32767]`
    I16,
    /// `[0, 2^32 - 1]`
    U32,
    /// `[-2^31, 2^31 - 1]`
    I32,
    /// `[-2^63, 2^63 - 1]`, where the upper bound rounds to `2^63`.
    I64,
    /// `[0, 2^64 - 1]`, where the upper bound rounds to `2^64`.
    U64,
}

const FORMS: [(IntForm, f64, f64); 9] = [
    (IntForm::Fix, -32.0, 127.0),
    (IntForm::U8, 0.0, 255.0),
    (IntForm::I8, -128.0, 127.0),
    (IntForm::U16, 0.0, 65_535.0),
    (IntForm::I16, -32_768.0, 32_767.0),
    (IntForm::U32, 0.0, 4_294_967_295.0),
    (IntForm::I32, -2_147_483_648.0, 2_147_483_647.0),
    (IntForm::I64, -B63, 9_223_372_036_854_775_807u64 as f64),
    (IntForm::U64, 0.0, 18_446_744_073_709_551_615u64 as f64),
];

impl IntForm {
    /// The first form whose range contains `num`, if any.
    ///
    /// ```
    /// use binarypack::inum::IntForm;
    ///
    /// assert_eq!(IntForm::select(-1.0), Some(IntForm::Fix));
    /// assert_eq!(IntForm::select(200.0), Some(IntForm::U8));
    /// assert_eq!(IntForm::select(-100.0), Some(IntForm::I8));
    /// assert_eq!(IntForm::select(f64::INFINITY), None);
    /// ```
    pub fn select(num: f64) -> Option<IntForm> {
        FORMS
            .iter()
            .find(|(_, lo, hi)| *lo <= num && num <= *hi)
            .map(|(form, _, _)| *form)
    }
}
