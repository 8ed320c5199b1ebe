mod common;

use binarypack::prelude::*;
use common::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(v in arb_value()) {
        let enc = encode(&v).unwrap();
        let mut dec = Decoder::new(&enc);
        prop_assert_eq!(dec.decode_next().unwrap(), v);
        prop_assert_eq!(dec.position(), enc.len());
    }

    #[test]
    fn encode_into_appends(v in arb_value(), prefix in arb_bs()) {
        let out = &mut prefix.to_vec();
        encode_into(&v, out).unwrap();
        prop_assert_eq!(&out[..prefix.len()], &prefix[..]);
        prop_assert_eq!(&out[prefix.len()..], &encode(&v).unwrap()[..]);
    }

    #[test]
    fn truncated_input_is_out_of_range(v in arb_value(), cut in any::<prop::sample::Index>()) {
        let enc = encode(&v).unwrap();
        let len = cut.index(enc.len());
        match decode(&enc[..len]) {
            Err(DecodeError::OutOfRange { .. }) => {}
            other => prop_assert!(false, "decoded a strict prefix: {:?}", other),
        }
    }

    #[test]
    fn streams(vs in prop::collection::vec(arb_value(), 0..8)) {
        let out = &mut Vec::new();
        for v in &vs {
            encode_into(v, out).unwrap();
        }

        let mut dec = Decoder::new(out);
        for v in &vs {
            prop_assert_eq!(&dec.decode_next().unwrap(), v);
        }
        prop_assert_eq!(dec.remaining(), 0);
    }

    #[test]
    fn arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut dec = Decoder::new(&data);
        while dec.remaining() > 0 {
            let before = dec.position();
            if dec.decode_next().is_err() {
                prop_assert_eq!(dec.position(), before);
                break;
            }
            prop_assert!(dec.position() > before);
        }
    }

    #[test]
    fn utf16_matches_lossy(units in prop::collection::vec(any::<u16>(), 0..64)) {
        let v = Value::from_utf16(&units);
        prop_assert_eq!(v.clone(), Value::from(String::from_utf16_lossy(&units)));
        prop_assert_eq!(decode(&encode(&v).unwrap()).unwrap(), v);
    }
}
