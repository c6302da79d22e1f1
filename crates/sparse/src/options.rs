/// Scratch capacity used when [`ParserOptions::initial_capacity`] is zero.
pub const DEFAULT_INITIAL_CAPACITY: usize = 128;

/// Configuration options for the sparse tokenizer.
///
/// Options are fixed when the parser is constructed and cannot be changed
/// mid-stream. Every flag is independent of the others.
///
/// # Examples
///
/// ```rust
/// use sparse::{ParserOptions, StreamingParser};
///
/// let options = ParserOptions {
///     allow_nameless_root_nodes: true,
///     ..Default::default()
/// };
/// let parser = StreamingParser::new(options, |_event: sparse::Event<'_>| {}).unwrap();
/// assert_eq!(parser.depth(), 0);
/// ```
///
/// # Default
///
/// Trailing spaces are trimmed; every other flag is off and the scratch
/// buffer starts at [`DEFAULT_INITIAL_CAPACITY`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct ParserOptions {
    /// Whether to collapse runs of the same whitespace byte into one.
    ///
    /// A space that follows a space (or a tab that follows a tab) is dropped
    /// before it reaches a value, so `a   b` reads as the value `a b`. The
    /// comparison spans `feed` calls.
    ///
    /// # Default
    ///
    /// `false`
    pub consume_repeated_whitespace: bool,

    /// Whether to exclude a trailing run of ASCII spaces from names and
    /// values.
    ///
    /// Only `' '` is trimmed. Tabs and escaped spaces (`\ `) are kept.
    ///
    /// # Default
    ///
    /// `true`
    pub trim_trailing_spaces: bool,

    /// Whether a `{` may open a node at the document root without a name.
    ///
    /// When enabled, the parser synthesizes an empty `Name` event before the
    /// `BeginNode`.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_nameless_root_nodes: bool,

    /// Initial capacity of the scratch buffer, in bytes.
    ///
    /// This is a performance hint only. Zero selects
    /// [`DEFAULT_INITIAL_CAPACITY`].
    ///
    /// # Default
    ///
    /// `0`
    pub initial_capacity: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            consume_repeated_whitespace: false,
            trim_trailing_spaces: true,
            allow_nameless_root_nodes: false,
            initial_capacity: 0,
        }
    }
}

impl ParserOptions {
    /// The scratch capacity the parser will actually allocate.
    #[must_use]
    pub fn effective_capacity(&self) -> usize {
        if self.initial_capacity == 0 {
            DEFAULT_INITIAL_CAPACITY
        } else {
            self.initial_capacity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_selects_default() {
        assert_eq!(
            ParserOptions::default().effective_capacity(),
            DEFAULT_INITIAL_CAPACITY
        );
        let options = ParserOptions {
            initial_capacity: 7,
            ..Default::default()
        };
        assert_eq!(options.effective_capacity(), 7);
    }
}
