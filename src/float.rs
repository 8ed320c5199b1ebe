//! IEEE-754 codec built from sign, exponent and mantissa arithmetic.
//!
//! The exponent comes from a base-2 logarithm and the mantissa from dividing by the
//! matching power of two. For every finite input the result has the same bits as the
//! native layout.
//!
//! # Example
//!
//! ```
//! use binarypack::float::*;
//!
//! let bytes = f64_to_be(std::f64::consts::PI).unwrap();
//! assert_eq!(bytes, std::f64::consts::PI.to_bits().to_be_bytes());
//! assert_eq!(f64_from_be(bytes), std::f64::consts::PI);
//!
//! assert!(f64_to_be(f64::NAN).is_none());
//! ```

use crate::inum::{u32_from_be, u32_to_be};

/// Smallest positive normal `f64`, `2^-1022`.
const MIN_NORMAL_F64: f64 = 2.2250738585072014e-308;
/// Smallest positive normal `f32`, `2^-126`.
const MIN_NORMAL_F32: f32 = 1.1754944e-38;

/// `x * 2^e`, in steps small enough that no power of two over- or underflows.
fn scale(mut x: f64, mut e: i32) -> f64 {
    while e > 1000 {
        x *= 2f64.powi(1000);
        e -= 1000;
    }
    while e < -1000 {
        x *= 2f64.powi(-1000);
        e += 1000;
    }
    x * 2f64.powi(e)
}

/// Splits a positive normal `num` into an unbiased exponent and a fraction in `[0, 1)`.
fn split(num: f64) -> (i32, f64) {
    let mut exp = num.log2().floor() as i32;
    let mut frac = num / scale(1.0, exp) - 1.0;
    // the logarithm can land one off next to a power of two
    if frac < 0.0 {
        exp -= 1;
        frac = num / scale(1.0, exp) - 1.0;
    } else if frac >= 1.0 {
        exp += 1;
        frac = num / scale(1.0, exp) - 1.0;
    }
    (exp, frac)
}

/// Encodes `num` as a big-endian binary64. Returns `None` for `NaN` and infinities.
pub fn f64_to_be(num: f64) -> Option<[u8; 8]> {
    if !num.is_finite() {
        return None;
    }

    let sign: u64 = if num.is_sign_negative() { 1 } else { 0 };
    let num = num.abs();

    let (exp_bits, mantissa) = if num == 0.0 {
        (0, 0)
    } else if num < MIN_NORMAL_F64 {
        (0, scale(num, 1074) as u64)
    } else {
        let (exp, frac) = split(num);
        ((exp + 1023) as u64, (frac * scale(1.0, 52)).floor() as u64)
    };

    let h32 = (sign << 31) | (exp_bits << 20) | ((mantissa >> 32) & 0x000f_ffff);
    let l32 = mantissa & 0xffff_ffff;

    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&u32_to_be(h32 as f64));
    out[4..].copy_from_slice(&u32_to_be(l32 as f64));
    Some(out)
}

/// Decodes a big-endian binary64.
pub fn f64_from_be(bytes: [u8; 8]) -> f64 {
    let h32 = u32_from_be([bytes[0], bytes[1], bytes[2], bytes[3]]) as u32;
    let l32 = u32_from_be([bytes[4], bytes[5], bytes[6], bytes[7]]);

    let sign = if h32 >> 31 == 0 { 1.0 } else { -1.0 };
    let exp_bits = ((h32 >> 20) & 0x7ff) as i32;
    let hfrac = (h32 & 0x000f_ffff) as f64;

    match exp_bits {
        0x7ff => {
            if hfrac == 0.0 && l32 == 0.0 {
                sign * f64::INFINITY
            } else {
                f64::NAN
            }
        }
        0 => sign * (scale(hfrac, -1022 - 20) + scale(l32, -1022 - 52)),
        _ => {
            let exp = exp_bits - 1023;
            let hfrac = hfrac + 1_048_576.0;
            sign * (scale(hfrac, exp - 20) + scale(l32, exp - 52))
        }
    }
}

/// Encodes `num` as a big-endian binary32. Returns `None` for `NaN` and infinities.
pub fn f32_to_be(num: f32) -> Option<[u8; 4]> {
    if !num.is_finite() {
        return None;
    }

    let sign: u32 = if num.is_sign_negative() { 1 } else { 0 };
    let abs = num.abs();
    let wide = abs as f64;

    let (exp_bits, mantissa) = if abs == 0.0 {
        (0, 0)
    } else if abs < MIN_NORMAL_F32 {
        (0, scale(wide, 149) as u32)
    } else {
        let (exp, frac) = split(wide);
        ((exp + 127) as u32, (frac * scale(1.0, 23)).floor() as u32)
    };

    let bits = (sign << 31) | (exp_bits << 23) | (mantissa & 0x007f_ffff);
    Some(u32_to_be(bits as f64))
}

/// Decodes a big-endian binary32.
pub fn f32_from_be(bytes: [u8; 4]) -> f32 {
    let bits = u32_from_be(bytes) as u32;

    let sign = if bits >> 31 == 0 { 1.0 } else { -1.0 };
    let exp_bits = ((bits >> 23) & 0xff) as i32;
    let frac = (bits & 0x007f_ffff) as f64;

    let value = match exp_bits {
        0xff => {
            if frac == 0.0 {
                sign * f64::INFINITY
            } else {
                f64::NAN
            }
        }
        0 => sign * scale(frac, -126 - 23),
        _ => sign * scale(frac + 8_388_608.0, exp_bits - 127 - 23),
    };
    value as f32
}
