//! Configuration for opening a chunk stream.
//!
//! This module provides the mode descriptor consumed by [`open`](crate::open):
//!
//! - [`OpenOptions`] - Mode, encoding, error policy, newline policy and ownership
//! - [`Mode`] - Binary or text
//! - [`ErrorPolicy`] - What to do with undecodable input in text mode
//! - [`BinaryIteration`] - What iterating a binary reader yields
//!
//! # Example
//!
//! ```
//! use chunkio::{ErrorPolicy, Newline, OpenOptions};
//!
//! // Same rules as a conventional `open()` mode string
//! let options = OpenOptions::from_mode("rt")?
//!     .with_encoding("utf-8")
//!     .with_errors(ErrorPolicy::Replace)
//!     .with_newline(Newline::AsIs);
//! options.validate()?;
//!
//! // Binary mode rejects text settings
//! let options = OpenOptions::binary().with_encoding("utf-8");
//! assert!(options.validate().is_err());
//!
//! # Ok::<(), chunkio::IterError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use encoding_rs::Encoding;

use crate::decode;
use crate::error::{IterError, Result};
use crate::newline::Newline;

/// Default text encoding label.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Whether a stream delivers bytes or decoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Deliver raw bytes without decoding.
    Binary,

    /// Decode bytes to text and translate line endings.
    #[default]
    Text,
}

/// How undecodable input is handled in text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorPolicy {
    /// Fail the read with [`IterError::Decoding`].
    #[default]
    Strict,

    /// Substitute U+FFFD REPLACEMENT CHARACTER.
    Replace,

    /// Drop the malformed bytes and continue.
    Ignore,
}

impl ErrorPolicy {
    /// Returns the policy name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Strict => "strict",
            ErrorPolicy::Replace => "replace",
            ErrorPolicy::Ignore => "ignore",
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = IterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(ErrorPolicy::Strict),
            "replace" => Ok(ErrorPolicy::Replace),
            "ignore" => Ok(ErrorPolicy::Ignore),
            other => Err(IterError::invalid(format!("unknown error handler: '{other}'"))),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What iterating a binary stream yields.
///
/// Text streams always iterate by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BinaryIteration {
    /// `\n`-terminated lines, like repeated `read_line()`.
    #[default]
    Lines,

    /// Whatever is buffered, or the next chunk as the source delivered it.
    Chunks,
}

/// Options for opening a chunk stream.
///
/// Text settings (`encoding`, `errors`, `newline`) are only valid in text
/// mode; setting any of them on a binary stream fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    mode: Mode,
    encoding: Option<String>,
    errors: Option<ErrorPolicy>,
    newline: Option<Newline>,
    owns_source: bool,
    binary_iteration: BinaryIteration,
}

impl OpenOptions {
    /// Creates options for the given mode with every other setting at its default.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            encoding: None,
            errors: None,
            newline: None,
            owns_source: true,
            binary_iteration: BinaryIteration::default(),
        }
    }

    /// Options for a binary stream.
    pub fn binary() -> Self {
        Self::new(Mode::Binary)
    }

    /// Options for a text stream.
    pub fn text() -> Self {
        Self::new(Mode::Text)
    }

    /// Parses a conventional mode string.
    ///
    /// Accepted characters are `r` (read, required), `t` (text, the default)
    /// and `b` (binary), each at most once.
    ///
    /// # Errors
    ///
    /// Returns [`IterError::InvalidArgument`] for unknown or repeated
    /// characters, a missing `r`, or both `t` and `b`.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkio::{Mode, OpenOptions};
    ///
    /// assert_eq!(OpenOptions::from_mode("rb")?.mode(), Mode::Binary);
    /// assert_eq!(OpenOptions::from_mode("r")?.mode(), Mode::Text);
    /// assert!(OpenOptions::from_mode("rtb").is_err());
    /// # Ok::<(), chunkio::IterError>(())
    /// ```
    pub fn from_mode(mode: &str) -> Result<Self> {
        let mut reading = false;
        let mut text = false;
        let mut binary = false;

        for c in mode.chars() {
            let seen = match c {
                'r' => &mut reading,
                't' => &mut text,
                'b' => &mut binary,
                _ => return Err(IterError::invalid(format!("invalid mode: '{mode}'"))),
            };
            if *seen {
                return Err(IterError::invalid(format!("invalid mode: '{mode}'")));
            }
            *seen = true;
        }

        if !reading {
            return Err(IterError::invalid("must specify read mode"));
        }
        if text && binary {
            return Err(IterError::invalid("can't have text and binary mode at once"));
        }

        Ok(Self::new(if binary { Mode::Binary } else { Mode::Text }))
    }

    /// Sets the text encoding label (WHATWG labels, e.g. `"utf-8"`, `"latin1"`).
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Sets the decoding error policy.
    pub fn with_errors(mut self, errors: ErrorPolicy) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Sets the newline policy.
    pub fn with_newline(mut self, newline: Newline) -> Self {
        self.newline = Some(newline);
        self
    }

    /// Sets whether closing the reader also closes the source. Defaults to true.
    pub fn with_owns_source(mut self, owns_source: bool) -> Self {
        self.owns_source = owns_source;
        self
    }

    /// Sets what iterating a binary stream yields.
    pub fn with_binary_iteration(mut self, iteration: BinaryIteration) -> Self {
        self.binary_iteration = iteration;
        self
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the encoding label, falling back to [`DEFAULT_ENCODING`].
    pub fn encoding(&self) -> &str {
        self.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }

    /// Returns the error policy.
    pub fn errors(&self) -> ErrorPolicy {
        self.errors.unwrap_or_default()
    }

    /// Returns the newline policy.
    pub fn newline(&self) -> Newline {
        self.newline.unwrap_or_default()
    }

    /// Returns whether closing the reader closes the source.
    pub fn owns_source(&self) -> bool {
        self.owns_source
    }

    /// Returns what iterating a binary stream yields.
    pub fn binary_iteration(&self) -> BinaryIteration {
        self.binary_iteration
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`IterError::InvalidArgument`] if a text setting is given in
    /// binary mode or the encoding label is unknown.
    pub fn validate(&self) -> Result<()> {
        self.resolve_encoding().map(|_| ())
    }

    /// Validates the options and resolves the encoding (`None` in binary mode).
    pub(crate) fn resolve_encoding(&self) -> Result<Option<&'static Encoding>> {
        match self.mode {
            Mode::Binary => {
                if self.encoding.is_some() {
                    return Err(IterError::invalid(
                        "binary mode doesn't take an encoding argument",
                    ));
                }
                if self.errors.is_some() {
                    return Err(IterError::invalid("binary mode doesn't take an errors argument"));
                }
                if self.newline.is_some() {
                    return Err(IterError::invalid("binary mode doesn't take a newline argument"));
                }
                Ok(None)
            }
            Mode::Text => decode::lookup(self.encoding()).map(Some),
        }
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::text()
    }
}
