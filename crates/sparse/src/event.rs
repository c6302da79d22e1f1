//! Events emitted by the tokenizer and the handlers that receive them.
//!
//! Every event carries a [`Fragment`] naming where its bytes live:
//!
//! - `BeginNode`, `EndNode` and `Error` for an invalid character borrow the
//!   chunk passed to the current [`feed`](crate::StreamingParser::feed) call.
//! - `Name` and `Value` borrow the parser's scratch buffer, which is reused
//!   as soon as the handler returns.
//! - Other errors carry a fixed diagnostic message.
//!
//! Either way the borrow ends with the handler call. Handlers that keep text
//! around copy it out, for example through [`OwnedEvent`].
//!
//! # Examples
//!
//! ```
//! use sparse::{OwnedEvent, ParserOptions, Recorder, StreamingParser};
//!
//! let mut parser = StreamingParser::new(ParserOptions::default(), Recorder::default()).unwrap();
//! parser.feed("fov 100\n").unwrap();
//! parser.finish().unwrap();
//! assert_eq!(
//!     parser.into_handler().into_events(),
//!     vec![OwnedEvent::name("fov"), OwnedEvent::value("100")]
//! );
//! ```
use alloc::vec::Vec;
use core::fmt;

use bstr::{BStr, BString, ByteSlice};

use crate::error::ErrorKind;

/// Where the bytes of an event come from.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Bytes of the chunk passed to the current `feed` call.
    Input {
        /// The bytes themselves.
        bytes: &'a [u8],
        /// Offset of the first byte from the start of the stream.
        offset: usize,
    },
    /// The token accumulated in the parser's scratch buffer. Valid only until
    /// the handler returns.
    Scratch(&'a [u8]),
    /// A fixed diagnostic message.
    Message(&'static str),
}

impl<'a> Fragment<'a> {
    /// The raw bytes of this fragment.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            Fragment::Input { bytes, .. } | Fragment::Scratch(bytes) => bytes,
            Fragment::Message(msg) => msg.as_bytes(),
        }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the fragment is empty, as for a value-less field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl fmt::Debug for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Input { bytes, offset } => f
                .debug_struct("Input")
                .field("bytes", &BStr::new(bytes))
                .field("offset", offset)
                .finish(),
            Fragment::Scratch(bytes) => f.debug_tuple("Scratch").field(&BStr::new(bytes)).finish(),
            Fragment::Message(msg) => f.debug_tuple("Message").field(msg).finish(),
        }
    }
}

/// The kind of an [`Event`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `{`
    BeginNode,
    /// `}`
    EndNode,
    /// A field or node name.
    Name,
    /// A field value.
    Value,
    /// A fatal error; nothing follows it.
    Error,
}

/// One unit of tokenizer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// A node opened. The fragment is the `{` byte.
    BeginNode(Fragment<'a>),
    /// A node closed. The fragment is the `}` byte.
    EndNode(Fragment<'a>),
    /// A field or node name. Empty only for a nameless root node.
    Name(Fragment<'a>),
    /// A field value; empty for value-less fields and before a `{`.
    Value(Fragment<'a>),
    /// A fatal error. The fragment is the offending byte for
    /// [`ErrorKind::InvalidCharacter`], otherwise a diagnostic message.
    Error {
        /// What went wrong.
        kind: ErrorKind,
        /// The offending input or a message.
        fragment: Fragment<'a>,
    },
}

impl<'a> Event<'a> {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::BeginNode(_) => EventKind::BeginNode,
            Event::EndNode(_) => EventKind::EndNode,
            Event::Name(_) => EventKind::Name,
            Event::Value(_) => EventKind::Value,
            Event::Error { .. } => EventKind::Error,
        }
    }

    /// The fragment carried by this event.
    #[must_use]
    pub fn fragment(&self) -> Fragment<'a> {
        match *self {
            Event::BeginNode(f)
            | Event::EndNode(f)
            | Event::Name(f)
            | Event::Value(f)
            | Event::Error { fragment: f, .. } => f,
        }
    }

    /// Copies the event out of the parser's buffers.
    #[must_use]
    pub fn to_owned_event(&self) -> OwnedEvent {
        match self {
            Event::BeginNode(_) => OwnedEvent::BeginNode,
            Event::EndNode(_) => OwnedEvent::EndNode,
            Event::Name(f) => OwnedEvent::Name(BString::from(f.as_bytes())),
            Event::Value(f) => OwnedEvent::Value(BString::from(f.as_bytes())),
            Event::Error { kind, .. } => OwnedEvent::Error(*kind),
        }
    }
}

/// Receives events from the tokenizer.
///
/// Any `FnMut(Event<'_>)` closure is a handler, so the closure's captures
/// play the role of a callback context.
pub trait Handler {
    /// Called synchronously, in input order, for every event.
    fn handle(&mut self, event: Event<'_>);
}

impl<F> Handler for F
where
    F: FnMut(Event<'_>),
{
    #[inline]
    fn handle(&mut self, event: Event<'_>) {
        self(event);
    }
}

#[cfg(any(test, feature = "serde"))]
fn serialize_lossy<S: serde::Serializer>(text: &BString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&text.to_str_lossy())
}

/// An event whose text has been copied out of the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[cfg_attr(any(test, feature = "serde"), serde(tag = "kind", content = "text"))]
pub enum OwnedEvent {
    /// `{`
    BeginNode,
    /// `}`
    EndNode,
    /// A field or node name.
    Name(
        #[cfg_attr(any(test, feature = "serde"), serde(serialize_with = "serialize_lossy"))]
        BString,
    ),
    /// A field value.
    Value(
        #[cfg_attr(any(test, feature = "serde"), serde(serialize_with = "serialize_lossy"))]
        BString,
    ),
    /// A fatal error.
    Error(ErrorKind),
}

impl OwnedEvent {
    /// A `Name` event with the given text.
    pub fn name(text: impl AsRef<[u8]>) -> Self {
        OwnedEvent::Name(BString::from(text.as_ref()))
    }

    /// A `Value` event with the given text.
    pub fn value(text: impl AsRef<[u8]>) -> Self {
        OwnedEvent::Value(BString::from(text.as_ref()))
    }
}

impl fmt::Display for OwnedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnedEvent::BeginNode => f.write_str("BeginNode"),
            OwnedEvent::EndNode => f.write_str("EndNode"),
            OwnedEvent::Name(text) => write!(f, "Name {:?}", text.as_bstr()),
            OwnedEvent::Value(text) => write!(f, "Value {:?}", text.as_bstr()),
            OwnedEvent::Error(kind) => write!(f, "Error {kind}"),
        }
    }
}

/// A handler that records every event as an [`OwnedEvent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    events: Vec<OwnedEvent>,
}

impl Recorder {
    /// The events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[OwnedEvent] {
        &self.events
    }

    /// Takes the events recorded so far, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<OwnedEvent> {
        core::mem::take(&mut self.events)
    }

    /// Consumes the recorder.
    #[must_use]
    pub fn into_events(self) -> Vec<OwnedEvent> {
        self.events
    }
}

impl Handler for Recorder {
    fn handle(&mut self, event: Event<'_>) {
        self.events.push(event.to_owned_event());
    }
}
