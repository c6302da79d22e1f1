//! The incremental tokenizer.
//!
//! [`StreamingParser`] consumes a byte stream in arbitrarily sized chunks and
//! reports names, values and node boundaries to a [`Handler`] as soon as
//! they are complete. All scanning state lives in the parser between calls,
//! so a chunk may end anywhere: inside a token, between a `\` and the byte
//! it escapes, or in the middle of a comment.
//!
//! # Examples
//!
//! ```rust
//! use sparse::{OwnedEvent, ParserOptions, Recorder, StreamingParser};
//!
//! let mut parser = StreamingParser::new(ParserOptions::default(), Recorder::default()).unwrap();
//! parser.feed("width 800; hei").unwrap();
//! parser.feed("ght 600\n").unwrap();
//! parser.finish().unwrap();
//! assert_eq!(
//!     parser.into_handler().into_events(),
//!     vec![
//!         OwnedEvent::name("width"),
//!         OwnedEvent::value("800"),
//!         OwnedEvent::name("height"),
//!         OwnedEvent::value("600"),
//!     ]
//! );
//! ```

use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::{
    error::{ErrorKind, ParserError, Position},
    event::{Event, Fragment, Handler},
    options::ParserOptions,
    scratch::Scratch,
};

/// What the tokenizer is currently looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    FindName,
    ReadName,
    FindValue,
    ReadValue,
    ReadComment,
}

/// Maps the byte following a `\` to the byte it stands for.
#[inline]
fn unescape(byte: u8) -> u8 {
    match byte {
        b'n' => b'\n',
        b'r' => b'\r',
        b'a' => 0x07,
        b'b' => 0x08,
        b'f' => 0x0c,
        b't' => b'\t',
        other => other,
    }
}

/// An incremental, callback-driven tokenizer.
///
/// Construct it with [`StreamingParser::new`], call
/// [`feed`](Self::feed) with each chunk of input in order, then call
/// [`finish`](Self::finish) once. Events reach the handler synchronously
/// from inside those calls.
///
/// Any error returned by `feed` or `finish` is final: the handler has
/// already received a matching [`Event::Error`], and every later call
/// returns [`ErrorKind::Poisoned`] without emitting anything.
#[derive(Debug)]
pub struct StreamingParser<H> {
    options: ParserOptions,
    mode: Mode,
    last_mode: Mode,
    /// Position of every `{` still open, outermost first.
    openings: Vec<Position>,
    scratch: Scratch,
    in_escape: bool,
    last_byte: u8,
    position: Position,
    error: Option<ParserError>,
    finished: bool,
    handler: H,
}

impl<H: Handler> StreamingParser<H> {
    /// Creates a parser that reports events to `handler`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OutOfMemory`] if the initial scratch buffer
    /// cannot be allocated.
    pub fn new(options: ParserOptions, handler: H) -> Result<Self, ParserError> {
        let capacity = options.effective_capacity();
        let scratch = Scratch::with_capacity(capacity)
            .map_err(|_| ParserError::new(ErrorKind::OutOfMemory, Position::default()))?;
        debug!(?options, capacity, "parser created");

        Ok(Self {
            options,
            mode: Mode::FindName,
            last_mode: Mode::FindName,
            openings: Vec::new(),
            scratch,
            in_escape: false,
            last_byte: 0,
            position: Position::default(),
            error: None,
            finished: false,
            handler,
        })
    }

    /// Scans the next chunk of input.
    ///
    /// The chunk continues the stream where the previous call left off.
    /// Accepts anything byte-like, such as `&str`, `&[u8]` or `Vec<u8>`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidCharacter`] when a `{` or `}` appears where the
    ///   grammar forbids it. Scanning stops at that byte.
    /// - [`ErrorKind::OutOfMemory`] when the scratch buffer cannot grow.
    /// - [`ErrorKind::AlreadyFinished`] after [`finish`](Self::finish).
    /// - [`ErrorKind::Poisoned`] after any earlier error.
    pub fn feed<T: AsRef<[u8]> + ?Sized>(&mut self, chunk: &T) -> Result<(), ParserError> {
        self.ensure_running()?;

        let chunk = chunk.as_ref();
        for index in 0..chunk.len() {
            if let Err(kind) = self.step(chunk, index) {
                let fragment = match kind {
                    ErrorKind::InvalidCharacter(_) => Fragment::Input {
                        bytes: &chunk[index..=index],
                        offset: self.position.offset,
                    },
                    _ => Fragment::Message(kind.message()),
                };
                return Err(self.fail(kind, fragment));
            }
            self.position.advance(chunk[index]);
        }
        Ok(())
    }

    /// Ends the input.
    ///
    /// Flushes a pending name or value (a trailing name gets an empty value)
    /// and releases the scratch buffer. A `\` left dangling at the very end
    /// of the stream is dropped.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::IncompleteDocument`] when nodes are still open. The
    ///   pending token is flushed first.
    /// - [`ErrorKind::AlreadyFinished`] on a second call.
    /// - [`ErrorKind::Poisoned`] after an earlier error; nothing is flushed.
    pub fn finish(&mut self) -> Result<(), ParserError> {
        if self.finished {
            return Err(ParserError::new(ErrorKind::AlreadyFinished, self.position));
        }
        self.finished = true;
        if self.error.is_some() {
            self.scratch.release();
            return Err(ParserError::new(ErrorKind::Poisoned, self.position));
        }

        if self.in_escape {
            debug!(offset = self.position.offset, "dropping dangling escape at end of input");
            self.in_escape = false;
        }

        match self.mode {
            Mode::ReadName => {
                self.emit_name();
                self.emit_empty_value();
            }
            Mode::ReadValue => self.emit_value(),
            Mode::FindName | Mode::FindValue | Mode::ReadComment => {}
        }

        let result = match self.openings.last() {
            None => Ok(()),
            Some(&opened_at) => {
                let kind = ErrorKind::IncompleteDocument {
                    depth: self.openings.len(),
                    opened_at,
                };
                Err(self.fail(kind, Fragment::Message(kind.message())))
            }
        };

        debug!(
            ok = result.is_ok(),
            offset = self.position.offset,
            scratch_capacity = self.scratch.capacity(),
            "parser finished"
        );
        self.scratch.release();
        result
    }

    /// Current nesting depth; 0 at the document root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.openings.len()
    }

    /// Position of the next byte to be scanned.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The fatal error that stopped this parser, if any. It stays available
    /// after `finish`.
    #[must_use]
    pub fn last_error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    /// Whether [`finish`](Self::finish) has been called.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The handler, mutably.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the parser and returns its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    fn ensure_running(&self) -> Result<(), ParserError> {
        if self.finished {
            Err(ParserError::new(ErrorKind::AlreadyFinished, self.position))
        } else if self.error.is_some() {
            Err(ParserError::new(ErrorKind::Poisoned, self.position))
        } else {
            Ok(())
        }
    }

    /// Records a fatal error and reports it to the handler.
    #[cold]
    fn fail(&mut self, kind: ErrorKind, fragment: Fragment<'_>) -> ParserError {
        let err = ParserError::new(kind, self.position);
        debug!(
            %kind,
            offset = self.position.offset,
            line = self.position.line,
            column = self.position.column,
            "tokenizer error"
        );
        self.handler.handle(Event::Error { kind, fragment });
        self.error = Some(err);
        err
    }

    /// Processes `chunk[index]`.
    #[inline]
    fn step(&mut self, chunk: &[u8], index: usize) -> Result<(), ErrorKind> {
        let byte = chunk[index];

        if self.mode == Mode::ReadComment {
            if byte == b'\n' {
                self.mode = self.last_mode;
            }
            self.last_byte = byte;
            return Ok(());
        }

        if self.in_escape {
            self.in_escape = false;
            let byte = unescape(byte);
            self.last_byte = byte;
            self.begin_token();
            return self.scratch.push_literal(byte).map_err(|_| ErrorKind::OutOfMemory);
        }

        // The backslash itself does not count as the previous byte.
        if byte == b'\\' {
            self.in_escape = true;
            return Ok(());
        }

        let last_byte = self.last_byte;
        self.last_byte = byte;

        match byte {
            b' ' | b'\t' => {
                if (self.options.consume_repeated_whitespace && last_byte == byte)
                    || matches!(self.mode, Mode::FindName | Mode::FindValue)
                {
                    return Ok(());
                }
                if self.mode == Mode::ReadName {
                    self.emit_name();
                    self.mode = Mode::FindValue;
                    return Ok(());
                }
                self.push_content(byte)
            }
            b'#' => {
                self.terminate_field();
                self.last_mode = Mode::FindName;
                self.mode = Mode::ReadComment;
                Ok(())
            }
            b'\n' | b';' => {
                self.terminate_field();
                Ok(())
            }
            b'{' => self.open_node(chunk, index),
            b'}' => self.close_node(chunk, index),
            _ => self.push_content(byte),
        }
    }

    /// Appends an ordinary content byte, starting a token if needed.
    #[inline]
    fn push_content(&mut self, byte: u8) -> Result<(), ErrorKind> {
        self.begin_token();
        self.scratch.push(byte).map_err(|_| ErrorKind::OutOfMemory)
    }

    #[inline]
    fn begin_token(&mut self) {
        match self.mode {
            Mode::FindName => self.mode = Mode::ReadName,
            Mode::FindValue => self.mode = Mode::ReadValue,
            Mode::ReadName | Mode::ReadValue | Mode::ReadComment => {}
        }
    }

    /// Ends the current field at a newline, `;` or `#`. A field that has a
    /// name but no value gets an empty value.
    fn terminate_field(&mut self) {
        match self.mode {
            Mode::ReadName => {
                self.emit_name();
                self.emit_empty_value();
            }
            Mode::FindValue => self.emit_empty_value(),
            Mode::ReadValue => self.emit_value(),
            Mode::FindName | Mode::ReadComment => return,
        }
        self.mode = Mode::FindName;
    }

    fn open_node(&mut self, chunk: &[u8], index: usize) -> Result<(), ErrorKind> {
        let nameless_root = self.mode == Mode::FindName
            && self.openings.is_empty()
            && self.options.allow_nameless_root_nodes;
        if self.mode != Mode::FindValue && !nameless_root {
            return Err(ErrorKind::InvalidCharacter(b'{'));
        }

        self.openings
            .try_reserve(1)
            .map_err(|_| ErrorKind::OutOfMemory)?;

        if nameless_root {
            self.handler.handle(Event::Name(Fragment::Scratch(&[])));
        }
        self.openings.push(self.position);
        self.mode = Mode::FindName;
        trace!(depth = self.openings.len(), offset = self.position.offset, "node opened");
        self.handler.handle(Event::BeginNode(Fragment::Input {
            bytes: &chunk[index..=index],
            offset: self.position.offset,
        }));
        Ok(())
    }

    fn close_node(&mut self, chunk: &[u8], index: usize) -> Result<(), ErrorKind> {
        match self.mode {
            Mode::ReadValue => self.emit_value(),
            Mode::FindName => {}
            Mode::ReadName | Mode::FindValue | Mode::ReadComment => {
                return Err(ErrorKind::InvalidCharacter(b'}'));
            }
        }
        if self.openings.pop().is_none() {
            return Err(ErrorKind::InvalidCharacter(b'}'));
        }

        self.mode = Mode::FindName;
        trace!(depth = self.openings.len(), offset = self.position.offset, "node closed");
        self.handler.handle(Event::EndNode(Fragment::Input {
            bytes: &chunk[index..=index],
            offset: self.position.offset,
        }));
        Ok(())
    }

    fn emit_name(&mut self) {
        let text = self.scratch.token(self.options.trim_trailing_spaces);
        self.handler.handle(Event::Name(Fragment::Scratch(text)));
        self.scratch.clear();
    }

    fn emit_value(&mut self) {
        let text = self.scratch.token(self.options.trim_trailing_spaces);
        self.handler.handle(Event::Value(Fragment::Scratch(text)));
        self.scratch.clear();
    }

    fn emit_empty_value(&mut self) {
        self.handler.handle(Event::Value(Fragment::Scratch(&[])));
    }
}
