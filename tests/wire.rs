use binarypack::prelude::*;

fn enc(v: impl Into<Value>) -> Vec<u8> { encode(&v.into()).unwrap().to_vec() }

fn round_trip(v: impl Into<Value>) -> Value { decode(&encode(&v.into()).unwrap()).unwrap() }

#[test]
fn integer_boundaries() {
    let cases: &[(f64, u8, usize)] = &[
        (127.0, 0x7f, 1),
        (128.0, 0xcc, 2),
        (-32.0, 0xe0, 1),
        (-33.0, 0xd0, 2),
        (255.0, 0xcc, 2),
        (256.0, 0xcd, 3),
        (-128.0, 0xd0, 2),
        (-129.0, 0xd1, 3),
        (32_767.0, 0xcd, 3),
        (32_768.0, 0xcd, 3),
        (65_535.0, 0xcd, 3),
        (65_536.0, 0xce, 5),
        (-32_768.0, 0xd1, 3),
        (-32_769.0, 0xd2, 5),
        (2_147_483_647.0, 0xce, 5),
        (2_147_483_648.0, 0xce, 5),
        (4_294_967_295.0, 0xce, 5),
        (4_294_967_296.0, 0xd3, 9),
        (-2_147_483_648.0, 0xd2, 5),
        (-2_147_483_649.0, 0xd3, 9),
        (9_223_372_036_854_775_808.0, 0xd3, 9),
        (9_223_372_036_854_777_856.0, 0xcf, 9),
    ];
    for (n, tag, len) in cases {
        let out = enc(*n);
        assert_eq!(out[0], *tag, "tag of {}", n);
        assert_eq!(out.len(), *len, "length of {}", n);
    }
}

#[test]
fn integers_round_trip() {
    for n in [
        0i64,
        1,
        -1,
        42,
        -42,
        1_000,
        -1_000,
        1_000_000,
        -1_000_000,
        i32::MAX as i64,
        i32::MIN as i64,
        u32::MAX as i64,
        1 << 40,
        (1 << 53) - 1,
    ]
    .iter()
    {
        assert_eq!(round_trip(*n), Value::from(*n), "{}", n);
    }
}

#[test]
fn wrapping_int64() {
    assert_eq!(round_trip(i64::MAX), Value::from(i64::MIN));
    assert_eq!(
        enc(i64::MAX),
        vec![0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn out_of_range_integers() {
    for n in [1.0e20, -1.0e19, f64::INFINITY, f64::NEG_INFINITY].iter() {
        assert_eq!(
            encode(&Value::from(*n)),
            Err(EncodeError::InvalidInteger(*n))
        );
    }
}

#[test]
fn strings() {
    for s in [
        "",
        "a",
        "fifteen bytes!!",
        "sixteen bytes!!!",
        "中文",
        "broccoli🥦līp𨋢grin😃ok",
        "\u{0}\u{7f}\u{80}\u{7ff}\u{800}\u{ffff}\u{10000}\u{10ffff}",
    ]
    .iter()
    {
        assert_eq!(round_trip(*s), Value::from(*s));
    }
    assert_eq!(enc("fifteen bytes!!")[0], 0xbf);
    assert_eq!(enc("sixteen bytes!!!")[..3], [0xd8, 0, 16]);
}

#[test]
fn unpaired_surrogates() {
    let v = Value::from_utf16(&[0xd800, 0x61, 0xdc00]);
    assert_eq!(round_trip(v), Value::from("\u{fffd}a\u{fffd}"));
}

#[test]
fn null_and_absent() {
    assert_eq!(enc(Value::Null), vec![0xc0]);
    assert_eq!(enc(Value::Absent), vec![0xc0]);
    assert_eq!(round_trip(Value::Absent), Value::Null);
    assert_eq!(round_trip(()), Value::Null);
    assert_eq!(round_trip(None::<i32>), Value::Null);
}

#[test]
fn length_classes() {
    let headers: &[(usize, &[u8])] = &[
        (0, &[0x90]),
        (15, &[0x9f]),
        (16, &[0xdc, 0x00, 0x10]),
        (65_535, &[0xdc, 0xff, 0xff]),
        (65_536, &[0xdd, 0x00, 0x01, 0x00, 0x00]),
    ];
    for (len, header) in headers {
        let v = Value::from(vec![Value::Null; *len]);
        let out = enc(v.clone());
        assert_eq!(&out[..header.len()], *header);
        assert_eq!(out.len(), header.len() + len);
        assert_eq!(decode(&out).unwrap(), v);
    }
}

#[test]
fn byte_windows() {
    let buf = Bytes::from((0u8..32).collect::<Vec<_>>());
    let window = buf.slice(8..12);
    assert_eq!(enc(window.clone()), vec![0xa4, 8, 9, 10, 11]);
    assert_eq!(round_trip(window.clone()), Value::Bytes(window));

    let view = Value::from_view(&[0x0102_0304i32, -1]);
    let out = enc(view.clone());
    assert_eq!(out[0], 0xa8);
    assert_eq!(out[1..5], 0x0102_0304i32.to_ne_bytes());
    assert_eq!(out[5..], [0xff; 4]);
    assert_eq!(round_trip(view.clone()), view);
}

#[test]
fn reserved_tags() {
    let _ = env_logger::builder().is_test(true).try_init();

    assert_eq!(decode(&[0xc1]), Ok(Value::Absent));
    assert_eq!(decode(&[0xd6]), Ok(Value::Absent));

    let strict = Config::default().reserved_tags(ReservedTags::Reject);
    assert_eq!(
        decode_with(&[0xd6], &strict),
        Err(DecodeError::ReservedTag(0xd6))
    );
}

#[test]
fn truncated() {
    assert_eq!(
        decode(&[0xcb, 0, 0]),
        Err(DecodeError::OutOfRange {
            index: 1,
            wanted: 8,
            length: 3
        })
    );
    assert_eq!(
        decode(&[0x92, 0x01]),
        Err(DecodeError::OutOfRange {
            index: 2,
            wanted: 1,
            length: 2
        })
    );
}

#[test]
fn maps_keep_insertion_order() {
    let m: Map = vec![("z", 1), ("a", 2), ("m", 3)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .collect();
    let back = round_trip(m).into_map().unwrap();
    let keys: Vec<&str> = back.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}
