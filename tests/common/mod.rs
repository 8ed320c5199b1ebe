#![allow(dead_code)]

use binarypack::prelude::*;
use proptest::prelude::*;

/// `2^31`
const B31: f64 = 2_147_483_648.0;
/// `2^63`, which wraps around to `-2^63`
const B63: f64 = 9_223_372_036_854_775_808.0;
/// Largest double below `2^64` that is not rounded up to it
const U64_TOP: f64 = 18_446_744_073_709_547_520.0;

/// arbitrary Bytes for use with proptest
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..40).prop_map(Bytes::from)
}

/// arbitrary number that survives a round trip unchanged
///
/// Negative integers below `-2^31` and integers at the top of the unsigned range come back
/// rounded, so they are left out.
pub fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i8>().prop_map(f64::from),
        any::<u8>().prop_map(f64::from),
        any::<i16>().prop_map(f64::from),
        any::<u16>().prop_map(f64::from),
        any::<i32>().prop_map(f64::from),
        any::<u32>().prop_map(f64::from),
        (0u64..(1 << 62)).prop_map(|n| n as f64),
        ((1u64 << 63)..(u64::MAX - 4096)).prop_map(|n| n as f64),
        any::<f32>().prop_map(f64::from),
        any::<f64>(),
    ]
    .prop_filter("no wire form or rounds on the way back", |n| {
        n.is_finite() && (n.fract() != 0.0 || (*n >= -B31 && *n < U64_TOP && *n != B63))
    })
}

/// arbitrary Value for use with proptest, without `Absent` and dates
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<String>().prop_map(Value::from),
        any::<char>().prop_map(Value::from),
        arb_number().prop_map(Value::Number),
        arb_bs().prop_map(Value::Bytes),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        20, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..20).prop_map(Value::from),
                prop::collection::btree_map(any::<String>(), inner, 0..20)
                    .prop_map(|m| Value::Map(m.into_iter().collect()))
            ]
        },
    )
}
