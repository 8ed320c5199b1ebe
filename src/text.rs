//! UTF-8 text codec.
//!
//! Encoding works from UTF-16 code units so that unpaired surrogate halves, which a
//! `str` cannot hold, are replaced with U+FFFD. Decoding walks the bytes by hand,
//! taking the sequence length from the leading byte and nothing else.

use std::char::{decode_utf16, REPLACEMENT_CHARACTER};

/// Appends the UTF-8 encoding of a code point.
fn put_code_point(out: &mut Vec<u8>, code: u32) {
    if code < 0x80 {
        out.push(code as u8);
    } else if code < 0x800 {
        out.push(0xc0 | (code >> 6) as u8);
        out.push(0x80 | (code & 0x3f) as u8);
    } else if code < 0x1_0000 {
        out.push(0xe0 | (code >> 12) as u8);
        out.push(0x80 | ((code >> 6) & 0x3f) as u8);
        out.push(0x80 | (code & 0x3f) as u8);
    } else {
        out.push(0xf0 | (code >> 18) as u8);
        out.push(0x80 | ((code >> 12) & 0x3f) as u8);
        out.push(0x80 | ((code >> 6) & 0x3f) as u8);
        out.push(0x80 | (code & 0x3f) as u8);
    }
}

/// Appends the UTF-8 encoding of a sequence of UTF-16 code units to `out`.
///
/// # Example
///
/// ```
/// use binarypack::text::encode_utf16;
///
/// let units: Vec<u16> = "café".encode_utf16().collect();
/// let out = &mut Vec::new();
/// encode_utf16(&units, out);
///
/// assert_eq!(out.as_slice(), "café".as_bytes());
///
/// // an unpaired high surrogate
/// let out = &mut Vec::new();
/// encode_utf16(&[0x61, 0xd800], out);
///
/// assert_eq!(out.as_slice(), "a\u{fffd}".as_bytes());
/// ```
pub fn encode_utf16(units: &[u16], out: &mut Vec<u8>) {
    out.reserve(units.len());
    for c in decode_utf16(units.iter().cloned()) {
        put_code_point(out, c.unwrap_or(REPLACEMENT_CHARACTER) as u32);
    }
}

/// Decodes UTF-8 bytes into a `String`.
///
/// A byte below `0xa0` is a code point on its own, `0xc0..=0xdf` starts a two byte
/// sequence, `0xe0..=0xef` a three byte one and anything else a four byte one. Missing
/// continuation bytes read as zero. Sequences that do not land on a Unicode scalar value
/// become U+FFFD.
///
/// # Example
///
/// ```
/// use binarypack::text::decode_utf8;
///
/// assert_eq!(decode_utf8("中文".as_bytes()), "中文");
/// ```
pub fn decode_utf8(bytes: &[u8]) -> String {
    let at = |i: usize| bytes.get(i).map_or(0, |b| (*b & 0x3f) as u32);

    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as u32;
        let (code, width) = if c < 0xa0 {
            (c, 1)
        } else if (c ^ 0xc0) < 0x20 {
            (((c & 0x1f) << 6) | at(i + 1), 2)
        } else if (c ^ 0xe0) < 0x10 {
            (((c & 0x0f) << 12) | (at(i + 1) << 6) | at(i + 2), 3)
        } else {
            (
                ((c & 0x07) << 18) | (at(i + 1) << 12) | (at(i + 2) << 6) | at(i + 3),
                4,
            )
        };
        out.push(std::char::from_u32(code).unwrap_or(REPLACEMENT_CHARACTER));
        i += width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8_of(s: &str) -> Vec<u8> {
        let units: Vec<u16> = s.encode_utf16().collect();
        let mut out = Vec::new();
        encode_utf16(&units, &mut out);
        out
    }

    #[test]
    fn matches_std() {
        for s in [
            "",
            "hello",
            "café",
            "中文",
            "broccoli🥦līp𨋢grin😃ok",
            "\u{10ffff}",
            "\u{7f}\u{80}\u{7ff}\u{800}\u{ffff}\u{10000}",
        ]
        .iter()
        {
            assert_eq!(utf8_of(s), s.as_bytes());
            assert_eq!(decode_utf8(s.as_bytes()), *s);
        }
    }

    #[test]
    fn unpaired_surrogates() {
        let units = [
            0x75, 0x6e, 0xd800, 0x70, 0x61, 0x69, 0x72, 0x65, 0x64, 0xdfff, 0x73,
        ];
        let mut out = Vec::new();
        encode_utf16(&units, &mut out);
        assert_eq!(decode_utf8(&out), "un\u{fffd}paired\u{fffd}s");
        assert_eq!(decode_utf8(&out), String::from_utf16_lossy(&units));
    }

    #[test]
    fn lenient_decoding() {
        // a lone continuation byte is taken as a code point of its own
        assert_eq!(decode_utf8(&[0x85]), "\u{85}");
        // a truncated sequence reads zeros for the missing bytes
        assert_eq!(decode_utf8(&[0xc3]), "\u{c0}");
        // an encoded surrogate is not a scalar value
        assert_eq!(decode_utf8(&[0xed, 0xa0, 0x80]), "\u{fffd}");
    }
}
