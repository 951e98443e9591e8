#![no_main]

use jsonstream::{Buffer, Decoder, DecoderOptions};
use libfuzzer_sys::fuzz_target;

/// Split `data` into chunks whose sizes are derived from `seed`. Every chunk
/// is at least one byte; UTF-8 boundaries are deliberately ignored.
fn split_into_chunks(data: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let size = (seed as usize % rest.len()) + 1;
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
    }
    chunks
}

fn decode(data: &[u8]) {
    if data.len() < 5 {
        return;
    }

    let flags = data[0];
    let seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let data = &data[5..];

    // Every write appends the whole chunk, in order.
    let mut buf = Buffer::new();
    for chunk in split_into_chunks(data, seed) {
        assert_eq!(buf.write(chunk), Ok(chunk.len()));
    }
    assert_eq!(buf.as_bytes(), data);

    // Unbounded nesting recurses without limit, so always cap it here.
    let options = DecoderOptions {
        max_depth: Some(usize::from(flags)),
    };

    let mut decoder = buf.decoder_with_options(options);
    let decoded: Vec<_> = decoder.by_ref().collect();

    // An error ends the stream and is reported again on every later call.
    match decoded.last() {
        Some(Err(err)) => {
            assert!(decoded[..decoded.len() - 1].iter().all(Result::is_ok));
            assert_eq!(decoder.decode_next().as_ref(), Err(err));
        }
        _ => {
            assert!(!decoder.more());
            assert_eq!(decoder.decode_next(), Ok(None));
        }
    }

    for value in decoded.into_iter().flatten() {
        let rendered = value.to_string();
        let again = Decoder::new(rendered.as_bytes()).next();
        assert_eq!(again, Some(Ok(value)));
    }
}

fuzz_target!(|data: &[u8]| decode(data));
