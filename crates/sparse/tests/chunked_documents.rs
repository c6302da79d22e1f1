#![expect(missing_docs)]

mod common;

use rstest::rstest;
use sparse::{ErrorKind, OwnedEvent, ParserOptions, Position};

use crate::common::{ORIGINAL, STREAM, options, parse_stream};

fn split_every(text: &str, size: usize) -> Vec<&str> {
    text.as_bytes()
        .chunks(size)
        .map(|c| std::str::from_utf8(c).expect("ascii input"))
        .collect()
}

#[test]
fn stream_matches_whole_document() {
    let whole = parse_stream(options(), &[ORIGINAL]);
    let streamed = parse_stream(options(), &STREAM);
    assert_eq!(whole, streamed);
    assert!(whole.1.is_ok());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(7)]
#[case(64)]
fn fixed_chunk_sizes(#[case] size: usize) {
    let whole = parse_stream(options(), &[ORIGINAL]);
    let chunks = split_every(ORIGINAL, size);
    assert_eq!(parse_stream(options(), &chunks), whole);
}

#[rstest]
#[case::named_and_nested("a { b 1 }", &[
    OwnedEvent::name("a"),
    OwnedEvent::BeginNode,
    OwnedEvent::name("b"),
    OwnedEvent::value("1"),
    OwnedEvent::EndNode,
])]
#[case::value_less("clamp_u\nclamp_v\n", &[
    OwnedEvent::name("clamp_u"),
    OwnedEvent::value(""),
    OwnedEvent::name("clamp_v"),
    OwnedEvent::value(""),
])]
#[case::semicolons("width 800; height 600\n", &[
    OwnedEvent::name("width"),
    OwnedEvent::value("800"),
    OwnedEvent::name("height"),
    OwnedEvent::value("600"),
])]
fn every_split_point(#[case] input: &str, #[case] expected: &[OwnedEvent]) {
    for at in 0..=input.len() {
        let (head, tail) = input.split_at(at);
        let (events, result) = parse_stream(ParserOptions::default(), &[head, tail]);
        assert!(result.is_ok(), "split at {at}");
        assert_eq!(events, expected, "split at {at}");
    }
}

#[test]
fn escape_split_after_backslash() {
    let (events, result) = parse_stream(ParserOptions::default(), &["text line\\", "nnext\n"]);
    result.unwrap();
    assert_eq!(
        events,
        vec![OwnedEvent::name("text"), OwnedEvent::value("line\nnext")]
    );
}

#[test]
fn unclosed_node_across_chunks() {
    let (events, result) = parse_stream(ParserOptions::default(), &["a {", " b", " 1"]);
    let unclosed = ErrorKind::IncompleteDocument {
        depth: 1,
        opened_at: Position {
            offset: 2,
            line: 1,
            column: 3,
        },
    };
    assert_eq!(result.unwrap_err().kind(), unclosed);
    assert_eq!(
        events,
        vec![
            OwnedEvent::name("a"),
            OwnedEvent::BeginNode,
            OwnedEvent::name("b"),
            OwnedEvent::value("1"),
            OwnedEvent::Error(unclosed),
        ]
    );
}

#[test]
fn nameless_root_requires_option() {
    let (events, result) = parse_stream(ParserOptions::default(), &STREAM);
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCharacter(b'{'));
    assert_eq!((err.line(), err.column()), (12, 1));
    assert_eq!(
        events.last(),
        Some(&OwnedEvent::Error(ErrorKind::InvalidCharacter(b'{')))
    );
}
