#![no_main]

use arbitrary::Arbitrary;
use commonware_wire::{
    delimited, fixed, sink::mocks::Recorder, tag, varint, Config, Encoder, Error, Int32Encoding,
    WireType,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Value {
    Varint32(u32),
    Varint64(u64),
    Int32(i32),
    Int64(i64),
    Fixed32(u32),
    Fixed64(u64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    legacy: bool,
    fail_at: Option<u8>,
    fields: Vec<(u16, Value)>,
}

fn wire_type(value: &Value) -> WireType {
    match value {
        Value::Varint32(_) | Value::Varint64(_) | Value::Int32(_) | Value::Int64(_) => {
            WireType::Varint
        }
        Value::Fixed32(_) | Value::Float(_) => WireType::Fixed32,
        Value::Fixed64(_) | Value::Double(_) => WireType::Fixed64,
        Value::Bytes(_) => WireType::LengthDelimited,
    }
}

fn write(encoder: &mut Encoder<'_, Recorder>, field: u32, value: &Value) -> Result<(), Error> {
    encoder.write_tag(field, wire_type(value))?;
    match value {
        Value::Varint32(v) => encoder.write_uint32(*v),
        Value::Varint64(v) => encoder.write_uint64(*v),
        Value::Int32(v) => encoder.write_int32(*v),
        Value::Int64(v) => encoder.write_int64(*v),
        Value::Fixed32(v) => encoder.write_fixed32(*v),
        Value::Fixed64(v) => encoder.write_fixed64(*v),
        Value::Float(v) => encoder.write_float(*v),
        Value::Double(v) => encoder.write_double(*v),
        Value::Bytes(v) => encoder.write_bytes(v),
    }
}

fn check(mut buf: &[u8], field: u32, value: &Value, legacy: bool) {
    let tag = tag::read(&mut buf).expect("failed to read tag");
    assert_eq!(tag.field(), field);
    assert_eq!(tag.wire_type(), wire_type(value));
    match value {
        Value::Varint32(v) => assert_eq!(varint::read::<u32>(&mut buf).unwrap(), *v),
        Value::Varint64(v) => assert_eq!(varint::read::<u64>(&mut buf).unwrap(), *v),
        Value::Int32(v) if legacy => {
            assert_eq!(varint::read::<u32>(&mut buf).unwrap(), *v as u32)
        }
        Value::Int32(v) => assert_eq!(varint::read::<u64>(&mut buf).unwrap() as i64, *v as i64),
        Value::Int64(v) => assert_eq!(varint::read::<u64>(&mut buf).unwrap() as i64, *v),
        Value::Fixed32(v) => assert_eq!(fixed::read32(&mut buf).unwrap(), *v),
        Value::Fixed64(v) => assert_eq!(fixed::read64(&mut buf).unwrap(), *v),
        Value::Float(v) => assert_eq!(fixed::read_float(&mut buf).unwrap().to_bits(), v.to_bits()),
        Value::Double(v) => {
            assert_eq!(fixed::read_double(&mut buf).unwrap().to_bits(), v.to_bits())
        }
        Value::Bytes(v) => assert_eq!(delimited::read(&mut buf).unwrap(), v[..]),
    }
    assert!(buf.is_empty(), "trailing bytes after field {field}");
}

fn fuzz(input: FuzzInput) {
    let cfg = Config {
        int32: if input.legacy {
            Int32Encoding::Legacy
        } else {
            Int32Encoding::SignExtended
        },
    };

    for (field, value) in &input.fields {
        let field = *field as u32;

        // Every value must decode back exactly.
        let mut sink = Recorder::new();
        write(&mut Encoder::with_config(&mut sink, cfg), field, value).unwrap();
        check(&sink.bytes(), field, value, input.legacy);

        // A failing sink must stop the write at the rejected chunk.
        if let Some(fail_at) = input.fail_at {
            let fail_at = fail_at as usize;
            let expected = sink.chunks().to_vec();
            let mut failing = Recorder::failing_at(fail_at);
            let result = write(&mut Encoder::with_config(&mut failing, cfg), field, value);
            if fail_at < expected.len() {
                assert!(result.is_err());
                assert_eq!(failing.attempts(), fail_at + 1);
                assert_eq!(failing.chunks(), &expected[..fail_at]);
            } else {
                assert!(result.is_ok());
                assert_eq!(failing.chunks(), &expected[..]);
            }
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
