/// Largest positive fixint, 0x7f
pub(crate) const POS_FIXINT_MAX: u8 = 0x7f;
/// Smallest negative fixint tag, 0xe0
pub(crate) const NEG_FIXINT_MIN: u8 = 0xe0;

/// Fixmap, 0x80 | pair count
pub(crate) const FIXMAP: u8 = 0x80;
/// Fixarray, 0x90 | element count
pub(crate) const FIXARRAY: u8 = 0x90;
/// Fixbin, 0xa0 | byte length
pub(crate) const FIXBIN: u8 = 0xa0;
/// Fixstr, 0xb0 | byte length
pub(crate) const FIXSTR: u8 = 0xb0;
/// Mask for the count embedded in a fixed-size tag, 0x0f
pub(crate) const MASK_FIX_LEN: u8 = 0b0000_1111;
/// Mask for the family of a fixed-size tag, 0xf0
pub(crate) const MASK_FIX_TYPE: u8 = 0b1111_0000;

/// `Null` constant.
pub(crate) const CON_NULL: u8 = 0xc0;
/// Reserved, never written.
pub(crate) const CON_RESERVED: u8 = 0xc1;
/// `False` constant.
pub(crate) const CON_FALSE: u8 = 0xc2;
/// `True` constant.
pub(crate) const CON_TRUE: u8 = 0xc3;

/// Single-precision tag
pub(crate) const FLOAT32: u8 = 0xca;
/// Double-precision tag
pub(crate) const FLOAT64: u8 = 0xcb;

pub(crate) const UINT8: u8 = 0xcc;
pub(crate) const UINT16: u8 = 0xcd;
pub(crate) const UINT32: u8 = 0xce;
pub(crate) const UINT64: u8 = 0xcf;
pub(crate) const INT8: u8 = 0xd0;
pub(crate) const INT16: u8 = 0xd1;
pub(crate) const INT32: u8 = 0xd2;
pub(crate) const INT64: u8 = 0xd3;

/// First of the reserved tags `0xd4..=0xd7`.
pub(crate) const RESERVED_MIN: u8 = 0xd4;
/// Last of the reserved tags `0xd4..=0xd7`.
pub(crate) const RESERVED_MAX: u8 = 0xd7;

pub(crate) const STR16: u8 = 0xd8;
pub(crate) const STR32: u8 = 0xd9;
pub(crate) const BIN16: u8 = 0xda;
pub(crate) const BIN32: u8 = 0xdb;
pub(crate) const ARRAY16: u8 = 0xdc;
pub(crate) const ARRAY32: u8 = 0xdd;
pub(crate) const MAP16: u8 = 0xde;
pub(crate) const MAP32: u8 = 0xdf;

/// Length-prefixed families and their three tags.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Family {
    Map,
    Array,
    Bin,
    Str,
}

impl Family {
    /// `(fixed, 16-bit, 32-bit)` tags.
    pub(crate) fn tags(self) -> (u8, u8, u8) {
        match self {
            Family::Map => (FIXMAP, MAP16, MAP32),
            Family::Array => (FIXARRAY, ARRAY16, ARRAY32),
            Family::Bin => (FIXBIN, BIN16, BIN32),
            Family::Str => (FIXSTR, STR16, STR32),
        }
    }
}

/// Length classes shared by all families.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SizeClass {
    /// Embedded in the low nibble of the tag.
    Fix(u8),
    /// 16-bit length prefix.
    Len16(u16),
    /// 32-bit length prefix.
    Len32(u32),
}

impl SizeClass {
    /// The smallest class holding `len`, or `None` past `0xffff_ffff`.
    pub(crate) fn of(len: usize) -> Option<SizeClass> {
        if len <= MASK_FIX_LEN as usize {
            Some(SizeClass::Fix(len as u8))
        } else if len <= u16::MAX as usize {
            Some(SizeClass::Len16(len as u16))
        } else if len as u64 <= u32::MAX as u64 {
            Some(SizeClass::Len32(len as u32))
        } else {
            None
        }
    }
}
