use cartext::{Data, DataError, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const KEY1: &str = "key1";
const KEY2: &str = "key2";

#[test]
fn size_no_arguments() {
    let data = Data::builder().build().unwrap();
    assert_eq!(data.size(), 0);
}

#[test]
fn size_has_arguments() {
    let data = Data::builder().put_bool(KEY1, true).build().unwrap();
    assert_eq!(data.size(), 1);
}

#[test]
fn serialize_empty() {
    let data = Data::EMPTY;

    let bytes = data.to_bytes().unwrap();
    let restored = Data::from_bytes(&bytes).unwrap();

    assert_eq!(restored, data);
}

#[test]
fn serialize_string() {
    let data = Data::builder()
        .put_string(KEY1, Some("value1"))
        .put_string(KEY2, Some("value2"))
        .build()
        .unwrap();

    let bytes = data.to_bytes().unwrap();
    let restored = Data::from_bytes(&bytes).unwrap();

    assert_eq!(restored, data);
}

#[test]
fn serialize_int_array() {
    let expected1 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let expected2 = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
    let data = Data::builder()
        .put_int_array(KEY1, &expected1)
        .put_int_array(KEY2, &expected2)
        .build()
        .unwrap();

    let bytes = data.to_bytes().unwrap();
    let restored = Data::from_bytes(&bytes).unwrap();

    assert_eq!(restored.size(), 2);
    assert_eq!(restored.get_int_array(KEY1), Some(&expected1[..]));
    assert_eq!(restored.get_int_array(KEY2), Some(&expected2[..]));
}

#[test]
fn serialize_every_value_type() {
    let data = Data::builder()
        .put_null("null")
        .put_bool("bool", false)
        .put_byte("byte", -7)
        .put_int("int", i32::MIN)
        .put_long("long", i64::MAX)
        .put_float("float", f32::NAN)
        .put_double("double", -0.0)
        .put_string("string", Some("héllo"))
        .put_bool_array("bools", &[true, false])
        .put_byte_array("bytes", &[i8::MIN, 0, i8::MAX])
        .put_long_array("longs", &[])
        .put_float_array("floats", &[1.5, f32::INFINITY])
        .put_double_array("doubles", &[f64::MIN_POSITIVE])
        .put_string_array("strings", &[Some(""), None, Some("x")])
        .build()
        .unwrap();

    let restored = Data::from_bytes(&data.to_bytes().unwrap()).unwrap();

    assert_eq!(restored, data);
    assert_eq!(restored.size(), 14);
    assert!(restored.get_float("float", 0.0).is_nan());
    assert!(restored.get_double("double", 1.0).is_sign_negative());
    assert_eq!(restored.get_string("string"), Some("héllo"));
}

#[test]
fn raised_limit_still_round_trips() {
    let fits = Data::builder()
        .max_bytes(64 * 1024)
        .put_byte_array(KEY1, &[1; 8 * 1024])
        .build()
        .unwrap();
    let restored = Data::from_bytes(&fits.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, fits);

    let err = Data::builder()
        .max_bytes(64 * 1024)
        .put_byte_array(KEY1, &[1; 20 * 1024])
        .build()
        .unwrap_err();
    assert!(matches!(err, DataError::TooLarge { .. }));
}

#[test]
fn corrupt_bytes_are_an_error() {
    let bytes = Data::builder()
        .put_string(KEY1, Some("value1"))
        .build()
        .unwrap()
        .to_bytes()
        .unwrap();

    let err = Data::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(err, DataError::Truncated { .. }));

    assert!(Data::from_bytes(&[]).is_err());
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i8>().prop_map(Value::Byte),
        any::<i32>().prop_map(Value::Int),
        any::<i64>().prop_map(Value::Long),
        any::<f32>().prop_map(Value::Float),
        any::<f64>().prop_map(Value::Double),
        ".{0,12}".prop_map(Value::String),
        prop::collection::vec(any::<i32>(), 0..16).prop_map(Value::IntArray),
        prop::collection::vec(any::<f64>(), 0..8).prop_map(Value::DoubleArray),
        prop::collection::vec(prop::option::of(".{0,6}"), 0..6).prop_map(Value::StringArray),
    ]
}

proptest! {
    #[test]
    fn bytes_round_trip(entries in prop::collection::btree_map("[a-z]{1,8}", value_strategy(), 0..12)) {
        let data = Data::builder().put_all_values(entries.clone()).build().unwrap();
        prop_assert_eq!(data.size(), entries.len());

        let restored = Data::from_bytes(&data.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn decoding_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = Data::from_bytes(&bytes);
    }
}
