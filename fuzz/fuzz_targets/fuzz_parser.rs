#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sparse::{OwnedEvent, ParserError, ParserOptions, Recorder, StreamingParser};

#[derive(Debug, Arbitrary)]
struct Input {
    flags: u8,
    initial_capacity: u8,
    splits: Vec<u16>,
    data: Vec<u8>,
}

fn options(input: &Input) -> ParserOptions {
    ParserOptions {
        consume_repeated_whitespace: input.flags & 1 != 0,
        trim_trailing_spaces: input.flags & 2 != 0,
        allow_nameless_root_nodes: input.flags & 4 != 0,
        initial_capacity: usize::from(input.initial_capacity),
    }
}

fn run(options: ParserOptions, chunks: &[&[u8]]) -> (Vec<OwnedEvent>, Option<ParserError>) {
    let mut parser = StreamingParser::new(options, Recorder::default()).unwrap();
    let mut error = None;
    for chunk in chunks {
        if let Err(err) = parser.feed(*chunk) {
            error = Some(err);
            break;
        }
    }
    if error.is_none() {
        error = parser.finish().err();
    }
    (parser.into_handler().into_events(), error)
}

/// Cut `data` at the offsets derived from `splits`. Chunks may be empty.
fn split<'a>(data: &'a [u8], splits: &[u16]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    for &s in splits {
        let (head, tail) = rest.split_at(usize::from(s) % (rest.len() + 1));
        chunks.push(head);
        rest = tail;
    }
    chunks.push(rest);
    chunks
}

fuzz_target!(|input: Input| {
    let options = options(&input);
    let whole = run(options, &[input.data.as_slice()]);
    let chunked = run(options, &split(&input.data, &input.splits));
    assert_eq!(whole, chunked, "chunking changed the event stream");

    // Nothing follows an error event.
    if let Some(pos) = whole.0.iter().position(|e| matches!(e, OwnedEvent::Error(_))) {
        assert_eq!(pos + 1, whole.0.len());
        assert!(whole.1.is_some());
    }
});
