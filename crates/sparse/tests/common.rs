#![allow(missing_docs)]
#![allow(dead_code)]

use sparse::{OwnedEvent, ParserError, ParserOptions, Recorder, StreamingParser};

pub const ORIGINAL: &str = "\
# This is a named root node (technically just a field with a node value):
materials/base/fl_tile1 {
  0 {
    # Incidentally, #s begin comments
    map textures/base/fl_tile1.png # Field with a value
  }
  clamp_u # Value-less fields
  clamp_v
}

# And this is a nameless root node:
{
  reason_for_using none
}

# And you can just pop down stuff anywhere in the root, really
fullscreen
fov 100
title A\\ Sparse\\tDemo
window {
  width 800; height 600
}
";

// The same document cut at awkward seams: inside names, right after a
// backslash, inside comments and next to braces.
#[rustfmt::skip]
pub const STREAM: [&str; 14] = [
    "# This is a named root node (technically",                  // inside a comment
    " just a field with a node value):\nmaterials/ba",            // comment ends, name starts
    "se/fl_tile1 {\n  0 {\n    # Incidentally, #",                // comment cut after a '#'
    "s begin comments\n    map textures/base/fl_",                // value starts
    "tile1.png # Field with a value\n  }\n  clamp_u",             // bare name pending
    " # Value-less fields\n  clamp_v\n}",                         // node closed at seam
    "\n\n# And this is a nameless root node:\n",
    "{",                                                          // lone brace
    "\n  reason_for_using none\n}\n\n# And you can just pop",
    " down stuff anywhere in the root, really\nfullscreen\nfov",
    " 100\ntitle A\\",                                            // ends on a backslash
    " Sparse\\",                                                  // escaped space, then a backslash
    "tDemo\nwindow {\n  width 800; ",
    "height 600\n}\n",
];

pub fn options() -> ParserOptions {
    ParserOptions {
        allow_nameless_root_nodes: true,
        ..Default::default()
    }
}

pub fn parse_stream(
    options: ParserOptions,
    chunks: &[&str],
) -> (Vec<OwnedEvent>, Result<(), ParserError>) {
    let mut parser = StreamingParser::new(options, Recorder::default()).expect("parser");
    for chunk in chunks {
        if let Err(err) = parser.feed(*chunk) {
            return (parser.into_handler().into_events(), Err(err));
        }
    }
    let result = parser.finish();
    (parser.into_handler().into_events(), result)
}
