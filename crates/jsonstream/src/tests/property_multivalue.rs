use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use std::dbg;

use quickcheck::{QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

use super::arbitrary::JsonNumber;
use crate::{Buffer, Decoder, Value};

fn test_count() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Render `values` the way a producer would: one chunk per value, with a
/// newline after a number only when the next value is also a number.
fn chunks_for(values: &[Value]) -> Vec<String> {
    let mut chunks: Vec<String> = values.iter().map(ToString::to_string).collect();
    for i in 1..values.len() {
        if values[i - 1].is_number() && values[i].is_number() {
            chunks[i - 1].push('\n');
        }
    }
    chunks
}

fn decode_chunks(chunks: &[String]) -> Result<Vec<Value>, crate::ParseError> {
    let mut buf = Buffer::new();
    for chunk in chunks {
        buf.write(chunk.as_bytes()).expect("unlimited buffer");
    }
    buf.decoder().collect()
}

/// Property: any sequence of values written back to back (numbers separated
/// by a newline) decodes to the same sequence, in order.
#[test]
fn multi_value_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(values: Vec<Value>) -> TestResult {
        let chunks = chunks_for(&values);
        match decode_chunks(&chunks) {
            Ok(decoded) if decoded == values => TestResult::passed(),
            Ok(decoded) => {
                dbg!(&chunks, &values, &decoded);
                TestResult::failed()
            }
            Err(err) => {
                dbg!(&chunks, &err);
                TestResult::failed()
            }
        }
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<Value>) -> TestResult);
}

/// Property: strings, arrays, and objects need no separator at all.
#[quickcheck]
fn self_delimiting_values_concatenate(values: Vec<Value>) -> bool {
    let values: Vec<Value> = values
        .into_iter()
        .map(|v| match v {
            Value::String(_) | Value::Array(_) | Value::Object(_) => v,
            other => Value::Array(alloc::vec![other]),
        })
        .collect();
    let payload: String = values.iter().map(ToString::to_string).collect();
    Decoder::new(payload.as_bytes()).collect::<Result<Vec<_>, _>>() == Ok(values)
}

/// Property: newline-terminated numbers decode to their parsed values.
#[quickcheck]
fn newline_separated_numbers(numbers: Vec<JsonNumber>) -> bool {
    let payload: String = numbers.iter().map(|n| alloc::format!("{}\n", n.0)).collect();
    let decoded: Vec<f64> = Decoder::new(payload.as_bytes())
        .map(|v| v.ok().and_then(|v| v.as_f64()).unwrap_or(f64::NAN))
        .collect();
    decoded.len() == numbers.len()
        && decoded
            .iter()
            .zip(&numbers)
            .all(|(d, n)| d.to_bits() == n.0.to_bits() || *d == n.0)
}

/// Property: rendering a decoded value and decoding it again is lossless.
#[quickcheck]
fn render_and_redecode(value: Value) -> bool {
    let rendered = value.to_string();
    let Ok(Some(first)) = Decoder::new(rendered.as_bytes()).decode_next() else {
        return false;
    };
    let again = first.to_string();
    let mut decoder = Decoder::new(again.as_bytes());
    decoder.decode_next() == Ok(Some(first.clone())) && first == value && !decoder.more()
}

#[test]
fn numbers_next_to_numbers_get_a_newline() {
    let values = [
        Value::Number(1.0),
        Value::Number(2.0),
        Value::from("s"),
        Value::Number(3.0),
    ];
    assert_eq!(chunks_for(&values), ["1\n", "2", "\"s\"", "3"]);
}
