// SPDX-License-Identifier: Apache-2.0
//! Executes the wire format directly against the real, compiled primitives
//! in `sdp_codegen::targets::rust::runtime_source` (§8). Generated
//! per-schema struct code is never compiled in this workspace's own test
//! suite, so these tests hand-assemble each scenario's fields in the exact
//! order `codegen::encode_fn_item`/`decode_fn_item` would emit them and
//! check the result against spec.md's literal byte sequences — the same
//! wire primitives a generated package's encoder/decoder calls, exercised
//! without ever generating or compiling that package.

use proptest::prelude::*;
use sdp_codegen::targets::rust::runtime_source::*;

fn hex_bytes(s: &str) -> Vec<u8> {
    hex::decode(s).expect("valid hex fixture")
}

// ---------------------------------------------------------------------
// Scenario A — AllPrimitives round-trip.
// ---------------------------------------------------------------------

#[test]
fn scenario_a_all_primitives_round_trip_byte_exact_and_size() {
    let (u8_field, u16_field, u32_field, u64_field) = (255u8, 65535u16, 4_294_967_295u32, 18_446_744_073_709_551_615u64);
    let (i8_field, i16_field, i32_field, i64_field) = (-128i8, -32768i16, -2_147_483_648i32, -9_223_372_036_854_775_808i64);
    let (f32_field, f64_field) = (3.14159f32, 2.718_281_828_459_045f64);
    let bool_field = true;
    let str_field = "hello";

    let mut buf = Vec::new();
    write_u8(&mut buf, u8_field);
    write_u16(&mut buf, u16_field);
    write_u32(&mut buf, u32_field);
    write_u64(&mut buf, u64_field);
    write_i8(&mut buf, i8_field);
    write_i16(&mut buf, i16_field);
    write_i32(&mut buf, i32_field);
    write_i64(&mut buf, i64_field);
    write_f32(&mut buf, f32_field);
    write_f64(&mut buf, f64_field);
    write_bool(&mut buf, bool_field);
    write_str(&mut buf, str_field);

    let expected_size = 1 + 2 + 4 + 8 + 1 + 2 + 4 + 8 + 4 + 8 + 1 + (4 + str_field.len());
    assert_eq!(expected_size, 52);
    assert_eq!(buf.len(), expected_size, "size(v) == len(encode(v))");
    assert_eq!(buf[0], 0xff);
    assert_eq!(&buf[buf.len() - 5..], b"hello");

    let mut ctx = DecodeContext::new();
    assert_eq!(read_u8(&buf, &mut ctx).unwrap(), u8_field);
    assert_eq!(read_u16(&buf, &mut ctx).unwrap(), u16_field);
    assert_eq!(read_u32(&buf, &mut ctx).unwrap(), u32_field);
    assert_eq!(read_u64(&buf, &mut ctx).unwrap(), u64_field);
    assert_eq!(read_i8(&buf, &mut ctx).unwrap(), i8_field);
    assert_eq!(read_i16(&buf, &mut ctx).unwrap(), i16_field);
    assert_eq!(read_i32(&buf, &mut ctx).unwrap(), i32_field);
    assert_eq!(read_i64(&buf, &mut ctx).unwrap(), i64_field);
    assert_eq!(read_f32(&buf, &mut ctx).unwrap(), f32_field);
    assert_eq!(read_f64(&buf, &mut ctx).unwrap(), f64_field);
    assert_eq!(read_bool(&buf, &mut ctx).unwrap(), bool_field);
    assert_eq!(read_str(&buf, &mut ctx).unwrap(), str_field);
    assert_eq!(ctx.offset, buf.len(), "decode consumed exactly the encoded bytes");
}

// ---------------------------------------------------------------------
// Scenario B — array bulk copy.
// ---------------------------------------------------------------------

#[test]
fn scenario_b_array_bulk_copy_round_trip_and_byte_exact() {
    let values: Vec<u32> = vec![100, 200, 300, 4_294_967_295];

    let mut buf = Vec::new();
    write_array_len(&mut buf, values.len() as u32);
    for v in &values {
        write_u32(&mut buf, *v);
    }

    let expected = hex_bytes("04000000" "64000000" "c8000000" "2c010000" "ffffffff");
    assert_eq!(buf, expected);
    assert_eq!(buf.len(), 20);

    let mut ctx = DecodeContext::new();
    let count = read_array_len(&buf, &mut ctx).unwrap();
    let decoded: Vec<u32> = (0..count).map(|_| read_u32(&buf, &mut ctx).unwrap()).collect();
    assert_eq!(decoded, values);
    assert_eq!(ctx.offset, buf.len());
}

// ---------------------------------------------------------------------
// Scenario C — optional present and absent.
// ---------------------------------------------------------------------

#[test]
fn scenario_c_optional_absent_and_present_round_trip_and_size() {
    let request_id = 7u32;
    let body = "ping";

    // Absent: request_id, body, then a single presence byte.
    let mut absent = Vec::new();
    write_u32(&mut absent, request_id);
    write_str(&mut absent, body);
    write_presence(&mut absent, false);
    let absent_size = 4 + (4 + body.len()) + 1;
    assert_eq!(absent.len(), absent_size);

    let mut ctx = DecodeContext::new();
    assert_eq!(read_u32(&absent, &mut ctx).unwrap(), request_id);
    assert_eq!(read_str(&absent, &mut ctx).unwrap(), body);
    assert!(!read_presence(&absent, &mut ctx).unwrap());
    assert_eq!(ctx.offset, absent.len());

    // Present: same prefix, then presence=1 followed by the Metadata payload.
    let (user_id, username) = (12345u32, "u");
    let mut present = Vec::new();
    write_u32(&mut present, request_id);
    write_str(&mut present, body);
    write_presence(&mut present, true);
    write_u32(&mut present, user_id);
    write_str(&mut present, username);

    let metadata_size = 4 + (4 + username.len());
    assert_eq!(present.len(), absent_size + 1 + metadata_size - 1);

    let mut ctx = DecodeContext::new();
    assert_eq!(read_u32(&present, &mut ctx).unwrap(), request_id);
    assert_eq!(read_str(&present, &mut ctx).unwrap(), body);
    assert!(read_presence(&present, &mut ctx).unwrap());
    assert_eq!(read_u32(&present, &mut ctx).unwrap(), user_id);
    assert_eq!(read_str(&present, &mut ctx).unwrap(), username);
    assert_eq!(ctx.offset, present.len());
}

// ---------------------------------------------------------------------
// Scenario D — message round-trip and dispatch.
// ---------------------------------------------------------------------

const POINT_TYPE_ID: u16 = 1;
const RECTANGLE_TYPE_ID: u16 = 2;

fn encode_point(x: f64, y: f64) -> Vec<u8> {
    let mut payload = Vec::new();
    write_f64(&mut payload, x);
    write_f64(&mut payload, y);
    let mut buf = Vec::new();
    write_message_header(&mut buf, POINT_TYPE_ID, payload.len() as u32);
    buf.extend_from_slice(&payload);
    buf
}

fn encode_rectangle(top_left: (f64, f64), width: f64, height: f64) -> Vec<u8> {
    let mut payload = Vec::new();
    write_f64(&mut payload, top_left.0);
    write_f64(&mut payload, top_left.1);
    write_f64(&mut payload, width);
    write_f64(&mut payload, height);
    let mut buf = Vec::new();
    write_message_header(&mut buf, RECTANGLE_TYPE_ID, payload.len() as u32);
    buf.extend_from_slice(&payload);
    buf
}

enum SchemaMessage {
    Point { x: f64, y: f64 },
    Rectangle { top_left: (f64, f64), width: f64, height: f64 },
}

fn decode_message(bytes: &[u8]) -> Result<SchemaMessage, MessageError> {
    check_input_size(bytes)?;
    let header = read_message_header(bytes)?;
    let payload = &bytes[MESSAGE_HEADER_SIZE..];
    let mut ctx = DecodeContext::new();
    match header.type_id {
        POINT_TYPE_ID => {
            let x = read_f64(payload, &mut ctx)?;
            let y = read_f64(payload, &mut ctx)?;
            Ok(SchemaMessage::Point { x, y })
        }
        RECTANGLE_TYPE_ID => {
            let top_left = (read_f64(payload, &mut ctx)?, read_f64(payload, &mut ctx)?);
            let width = read_f64(payload, &mut ctx)?;
            let height = read_f64(payload, &mut ctx)?;
            Ok(SchemaMessage::Rectangle { top_left, width, height })
        }
        other => Err(MessageError::UnknownMessageType { id: other }),
    }
}

#[test]
fn scenario_d_message_round_trip_byte_exact_and_dispatch() {
    let point_bytes = encode_point(3.14, 2.71);
    assert_eq!(point_bytes.len(), 26);
    assert_eq!(&point_bytes[..10], hex_bytes("53445032" "0100" "10000000").as_slice());

    match decode_message(&point_bytes).unwrap() {
        SchemaMessage::Point { x, y } => {
            assert_eq!(x, 3.14);
            assert_eq!(y, 2.71);
        }
        SchemaMessage::Rectangle { .. } => panic!("expected Point variant"),
    }

    let rect_bytes = encode_rectangle((0.0, 0.0), 5.0, 10.0);
    match decode_message(&rect_bytes).unwrap() {
        SchemaMessage::Rectangle { top_left, width, height } => {
            assert_eq!(top_left, (0.0, 0.0));
            assert_eq!(width, 5.0);
            assert_eq!(height, 10.0);
        }
        SchemaMessage::Point { .. } => panic!("expected Rectangle variant"),
    }

    let mut unknown = Vec::new();
    write_message_header(&mut unknown, 99, 0);
    match decode_message(&unknown).unwrap_err() {
        MessageError::UnknownMessageType { id } => assert_eq!(id, 99),
        other => panic!("expected UnknownMessageType, got {other:?}"),
    }
}

// ---------------------------------------------------------------------
// Scenario E — reject malformed input.
// ---------------------------------------------------------------------

#[test]
fn scenario_e_buffer_shorter_than_header_is_rejected() {
    let bytes = vec![0u8; 9];
    assert_eq!(read_message_header(&bytes).unwrap_err(), MessageError::MessageTooShort);
}

#[test]
fn scenario_e_wrong_magic_is_rejected() {
    let mut bytes = vec![b'S', b'D', b'X', MESSAGE_VERSION];
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(read_message_header(&bytes).unwrap_err(), MessageError::InvalidMagic);
}

#[test]
fn scenario_e_wrong_version_is_rejected() {
    let mut bytes = MESSAGE_MAGIC.to_vec();
    bytes.push(0x31);
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(read_message_header(&bytes).unwrap_err(), MessageError::InvalidVersion { byte: 0x31 });
}

#[test]
fn scenario_e_payload_size_mismatch_is_rejected() {
    let mut bytes = MESSAGE_MAGIC.to_vec();
    bytes.push(MESSAGE_VERSION);
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&(1024 * 1024u32).to_le_bytes());
    bytes.extend(std::iter::repeat(0u8).take(100));
    assert_eq!(
        read_message_header(&bytes).unwrap_err(),
        MessageError::PayloadSizeMismatch { declared: 1024 * 1024, actual: 100 }
    );
}

#[test]
fn scenario_e_array_count_above_limit_is_rejected() {
    let mut bytes = Vec::new();
    write_array_len(&mut bytes, 2_000_000);
    let mut ctx = DecodeContext::new();
    assert_eq!(
        read_array_len(&bytes, &mut ctx).unwrap_err(),
        DecodeError::ArrayTooLarge { count: 2_000_000, max: MAX_ARRAY_ELEMENTS }
    );
}

#[test]
fn scenario_e_data_too_large_is_rejected() {
    let bytes = vec![0u8; (MAX_SERIALIZED_SIZE + 1) as usize];
    assert_eq!(
        check_input_size(&bytes).unwrap_err(),
        DecodeError::DataTooLarge { len: bytes.len(), max: MAX_SERIALIZED_SIZE }
    );
}

#[test]
fn scenario_e_invalid_bool_byte_is_rejected() {
    let bytes = vec![7u8];
    let mut ctx = DecodeContext::new();
    assert_eq!(
        read_bool(&bytes, &mut ctx).unwrap_err(),
        DecodeError::InvalidBool { byte: 7, offset: 0 }
    );
}

#[test]
fn scenario_e_invalid_presence_byte_is_rejected() {
    let bytes = vec![2u8];
    let mut ctx = DecodeContext::new();
    assert_eq!(
        read_presence(&bytes, &mut ctx).unwrap_err(),
        DecodeError::InvalidPresence { byte: 2, offset: 0 }
    );
}

#[test]
fn scenario_e_invalid_utf8_str_payload_is_rejected() {
    let mut bytes = Vec::new();
    write_len_prefixed(&mut bytes, &[0xff, 0xfe, 0xfd]);
    let mut ctx = DecodeContext::new();
    assert_eq!(read_str(&bytes, &mut ctx).unwrap_err(), DecodeError::InvalidUtf8 { offset: 0 });
}

#[test]
fn scenario_e_nesting_too_deep_is_rejected() {
    let mut ctx = DecodeContext::new();
    for _ in 0..MAX_NESTING_DEPTH {
        ctx.enter_nesting().unwrap();
    }
    assert_eq!(
        ctx.enter_nesting().unwrap_err(),
        DecodeError::NestingTooDeep { depth: MAX_NESTING_DEPTH + 1, max: MAX_NESTING_DEPTH }
    );
}

#[test]
fn scenario_e_cumulative_element_count_above_limit_is_rejected() {
    let mut ctx = DecodeContext::new();
    assert_eq!(
        ctx.add_elements(MAX_TOTAL_ELEMENTS + 1).unwrap_err(),
        DecodeError::TooManyElements { cumulative: MAX_TOTAL_ELEMENTS + 1, max: MAX_TOTAL_ELEMENTS }
    );
}

// ---------------------------------------------------------------------
// Property-based round-trips over every fixed-width primitive.
// ---------------------------------------------------------------------

macro_rules! primitive_round_trip_proptest {
    ($name:ident, $write:ident, $read:ident, $ty:ty) => {
        proptest! {
            #[test]
            fn $name(value: $ty) {
                let mut buf = Vec::new();
                $write(&mut buf, value);
                let mut ctx = DecodeContext::new();
                let decoded = $read(&buf, &mut ctx).unwrap();
                prop_assert_eq!(decoded, value);
                prop_assert_eq!(ctx.offset, buf.len());
            }
        }
    };
}

primitive_round_trip_proptest!(prop_u8_round_trips, write_u8, read_u8, u8);
primitive_round_trip_proptest!(prop_u16_round_trips, write_u16, read_u16, u16);
primitive_round_trip_proptest!(prop_u32_round_trips, write_u32, read_u32, u32);
primitive_round_trip_proptest!(prop_u64_round_trips, write_u64, read_u64, u64);
primitive_round_trip_proptest!(prop_i8_round_trips, write_i8, read_i8, i8);
primitive_round_trip_proptest!(prop_i16_round_trips, write_i16, read_i16, i16);
primitive_round_trip_proptest!(prop_i32_round_trips, write_i32, read_i32, i32);
primitive_round_trip_proptest!(prop_i64_round_trips, write_i64, read_i64, i64);
primitive_round_trip_proptest!(prop_bool_round_trips, write_bool, read_bool, bool);

proptest! {
    #[test]
    fn prop_u32_round_trips_through_len_prefixed_bytes(value: Vec<u8>) {
        let mut buf = Vec::new();
        write_bytes(&mut buf, &value);
        let mut ctx = DecodeContext::new();
        let decoded = read_bytes(&buf, &mut ctx).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(ctx.offset, buf.len());
    }

    #[test]
    fn prop_str_round_trips(value: String) {
        let mut buf = Vec::new();
        write_str(&mut buf, &value);
        let mut ctx = DecodeContext::new();
        let decoded = read_str(&buf, &mut ctx).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(ctx.offset, buf.len());
    }
}
