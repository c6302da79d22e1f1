//! An incremental, callback-driven tokenizer for the sparse field/node
//! format.
//!
//! A sparse document is a sequence of fields. A field is a name, optionally
//! followed by whitespace and a value, and ends at a newline, a `;` or a `#`
//! comment. A value position may instead open a nested node with `{`, closed
//! by `}`.
//!
//! ```text
//! # A named node holding fields.
//! materials/base/fl_tile1 {
//!   map textures/base/fl_tile1.png
//!   clamp_u     # a value-less field
//! }
//! width 800; height 600
//! ```
//!
//! [`StreamingParser`] scans such input in chunks of any size and reports
//! [`Event`]s to a [`Handler`] without building a tree. Building documents
//! from the events is left to the caller.
//!
//! ```rust
//! use sparse::{Event, ParserOptions, StreamingParser};
//!
//! let mut depth_changes = 0;
//! let mut parser = StreamingParser::new(ParserOptions::default(), |event: Event<'_>| {
//!     if matches!(event, Event::BeginNode(_) | Event::EndNode(_)) {
//!         depth_changes += 1;
//!     }
//! })
//! .unwrap();
//! parser.feed("a { b 1 }\n").unwrap();
//! parser.finish().unwrap();
//! drop(parser);
//! assert_eq!(depth_changes, 2);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod event;
mod options;
mod parser;
mod scratch;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, ParserError, Position};
pub use event::{Event, EventKind, Fragment, Handler, OwnedEvent, Recorder};
pub use options::{DEFAULT_INITIAL_CAPACITY, ParserOptions};
pub use parser::StreamingParser;
