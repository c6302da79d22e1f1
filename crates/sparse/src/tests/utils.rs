use alloc::vec::Vec;

use crate::{OwnedEvent, ParserError, ParserOptions, Recorder, StreamingParser};

/// Everything a parse produced: the events, plus the first error returned by
/// `feed` or `finish`.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub events: Vec<OwnedEvent>,
    pub error: Option<ParserError>,
}

/// Feeds `chunks` in order, stopping at the first error, then finishes.
pub fn parse_chunks<C: AsRef<[u8]>>(options: ParserOptions, chunks: &[C]) -> Outcome {
    let mut parser = StreamingParser::new(options, Recorder::default()).unwrap();
    let mut error = None;
    for chunk in chunks {
        if let Err(err) = parser.feed(chunk.as_ref()) {
            error = Some(err);
            break;
        }
    }
    if error.is_none() {
        error = parser.finish().err();
    }
    Outcome {
        events: parser.into_handler().into_events(),
        error,
    }
}

pub fn parse_with(options: ParserOptions, input: &str) -> Outcome {
    parse_chunks(options, &[input])
}

pub fn parse(input: &str) -> Outcome {
    parse_with(ParserOptions::default(), input)
}

/// Feeds `input` one byte per call.
pub fn parse_bytewise(options: ParserOptions, input: &[u8]) -> Outcome {
    let chunks: Vec<&[u8]> = input.chunks(1).collect();
    parse_chunks(options, &chunks)
}

pub fn name(text: &str) -> OwnedEvent {
    OwnedEvent::name(text)
}

pub fn value(text: &str) -> OwnedEvent {
    OwnedEvent::value(text)
}
