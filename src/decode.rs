//! Decoding of little-endian, root-unwrapped NBT into a [`Trace`].
//!
//! The input is treated as the body of a root compound that is never opened:
//! a run of named tags, each a tag byte, a length-prefixed name and a
//! payload, lasting until the input runs out. No events are produced for the
//! root itself.
//!
//! Compound and list payloads are decoded recursively. Each level of nesting
//! is counted, and input nested deeper than [`DecodeOpts::max_depth`] is
//! rejected rather than risking the stack.
//!
//! ```
//! use mcbe_nbt::{decode_with_opts, DecodeOpts, RootEnd};
//!
//! // A byte "x", then a stray end tag and some junk.
//! let input = [1u8, 1, 0, b'x', 7, 0, 0xff, 0xff];
//!
//! assert!(mcbe_nbt::decode(&input).is_err());
//!
//! let opts = DecodeOpts::new().root_end(RootEnd::Terminate);
//! let trace = decode_with_opts(&input, opts).unwrap();
//! assert_eq!(trace.len(), 1);
//! assert_eq!(trace.consumed(), 6);
//! ```

use log::{debug, trace};

use crate::{
    borrow::{ByteArray, IntArray, LongArray, Str},
    error::{Error, Result},
    input::Cursor,
    trace::{Event, Name, Payload, Trace},
    Tag,
};

/// What to do with an end tag found at the top level of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootEnd {
    /// Fail with [`ErrorKind::RootEnd`][`crate::error::ErrorKind::RootEnd`].
    Reject,
    /// Stop decoding successfully, ignoring anything after the end tag. The
    /// trace's `consumed()` shows where decoding stopped.
    Terminate,
}

/// Options for decoding.
///
/// ```
/// use mcbe_nbt::{DecodeOpts, RootEnd};
///
/// let opts = DecodeOpts::new().max_depth(64).root_end(RootEnd::Terminate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOpts {
    pub(crate) max_depth: usize,
    pub(crate) root_end: RootEnd,
}

impl DecodeOpts {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            root_end: RootEnd::Reject,
        }
    }

    /// Maximum number of compounds and lists that may enclose a value. The
    /// top-level entries are at depth zero.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// How to treat an end tag at the top level.
    pub fn root_end(mut self, root_end: RootEnd) -> Self {
        self.root_end = root_end;
        self
    }
}

impl Default for DecodeOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// A failed decode: the error, and the events decoded before it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial<'a> {
    trace: Trace<'a>,
    error: Error,
}

impl<'a> Partial<'a> {
    /// Events decoded before the failure. Containers open at the time of the
    /// failure have no close event. `consumed()` is the offset of the error.
    pub fn trace(&self) -> &Trace<'a> {
        &self.trace
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn into_parts(self) -> (Trace<'a>, Error) {
        (self.trace, self.error)
    }
}

impl<'a> std::fmt::Display for Partial<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (after {} events)",
            self.error,
            self.trace.len()
        )
    }
}

impl<'a> std::error::Error for Partial<'a> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Decode the input with the default options.
pub fn decode(input: &[u8]) -> std::result::Result<Trace<'_>, Partial<'_>> {
    decode_with_opts(input, DecodeOpts::default())
}

/// Decode the input with the given options.
pub fn decode_with_opts(
    input: &[u8],
    opts: DecodeOpts,
) -> std::result::Result<Trace<'_>, Partial<'_>> {
    let mut events = Vec::new();

    match Decoder::with_opts(input, opts).decode_into(&mut events) {
        Ok(consumed) => Ok(Trace::new(events, consumed)),
        Err(error) => {
            debug!(
                "decode failed after {} events: {}",
                events.len(),
                error
            );
            let trace = Trace::new(events, error.offset());
            Err(Partial { trace, error })
        }
    }
}

/// Decoder over a single input. Prefer [`decode`] unless you want to reuse
/// an event buffer.
pub struct Decoder<'a> {
    input: Cursor<'a>,
    opts: DecodeOpts,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_opts(input, DecodeOpts::default())
    }

    pub fn with_opts(input: &'a [u8], opts: DecodeOpts) -> Self {
        Self {
            input: Cursor::new(input),
            opts,
            depth: 0,
        }
    }

    /// Decode the whole input, appending events to `out`. Returns the number
    /// of bytes consumed. On failure the events appended so far are left in
    /// `out`.
    pub fn decode_into(mut self, out: &mut Vec<Event<'a>>) -> Result<usize> {
        while !self.input.is_empty() {
            let offset = self.input.position();
            let tag = self.input.consume_tag()?;

            if tag == Tag::End {
                match self.opts.root_end {
                    RootEnd::Reject => return Err(Error::root_end(offset)),
                    RootEnd::Terminate => {
                        debug!(
                            "end tag at top level, ignoring {} trailing bytes",
                            self.input.remaining()
                        );
                        break;
                    }
                }
            }

            let name = Str::new(self.input.consume_str()?);
            self.read_value(tag, Some(name), out)?;
        }

        Ok(self.input.position())
    }

    fn read_value(&mut self, tag: Tag, name: Name<'a>, out: &mut Vec<Event<'a>>) -> Result<()> {
        let payload = match tag {
            Tag::Byte => Payload::Byte(self.input.consume_i8()?),
            Tag::Short => Payload::Short(self.input.consume_i16()?),
            Tag::Int => Payload::Int(self.input.consume_i32()?),
            Tag::Long => Payload::Long(self.input.consume_i64()?),
            Tag::Float => Payload::Float(self.input.consume_f32()?),
            Tag::Double => Payload::Double(self.input.consume_f64()?),
            Tag::ByteArray => Payload::ByteArray(ByteArray::from_bytes(self.read_array(tag)?)),
            Tag::String => Payload::String(Str::new(self.input.consume_str()?)),
            Tag::IntArray => Payload::IntArray(IntArray::from_bytes(self.read_array(tag)?)),
            Tag::LongArray => Payload::LongArray(LongArray::from_bytes(self.read_array(tag)?)),
            Tag::List => return self.read_list(name, out),
            Tag::Compound => return self.read_compound(name, out),
            // End has no payload. Compounds consume their own end tag and
            // lists of end are rejected at the header.
            Tag::End => return Err(Error::unexpected_end(self.input.position())),
        };

        out.push(Event { name, payload });
        Ok(())
    }

    fn read_array(&mut self, tag: Tag) -> Result<&'a [u8]> {
        match tag.element_width() {
            Some(width) => self.input.consume_array(width),
            None => Err(Error::invalid_tag(tag.into(), self.input.position())),
        }
    }

    /// Read a list header and its elements.
    ///
    /// The element tag is checked before the count is read. An unknown
    /// element code fails with `InvalidTag` even when the count is zero, since
    /// [`Payload::List`] can only name a known [`Tag`]. An END element type
    /// always fails, whatever the count, as there is no END payload to read.
    fn read_list(&mut self, name: Name<'a>, out: &mut Vec<Event<'a>>) -> Result<()> {
        let offset = self.input.position();
        let element = self.input.consume_tag()?;
        if element == Tag::End {
            return Err(Error::unexpected_end(offset));
        }

        let count_offset = self.input.position();
        let count = self.input.consume_i32()?;
        if count < 0 {
            return Err(Error::invalid_count(count, count_offset));
        }

        self.enter(offset)?;
        trace!("list of {} {:?} at offset {}", count, element, offset);

        out.push(Event {
            name,
            payload: Payload::List { element, count },
        });

        for _ in 0..count {
            self.read_value(element, None, out)?;
        }

        out.push(Event::unnamed(Payload::ListEnd));
        self.depth -= 1;
        Ok(())
    }

    fn read_compound(&mut self, name: Name<'a>, out: &mut Vec<Event<'a>>) -> Result<()> {
        let offset = self.input.position();
        self.enter(offset)?;
        trace!("compound at offset {}", offset);

        out.push(Event {
            name,
            payload: Payload::Compound,
        });

        loop {
            let tag = self.input.consume_tag()?;
            if tag == Tag::End {
                out.push(Event::unnamed(Payload::End));
                break;
            }

            let name = Str::new(self.input.consume_str()?);
            self.read_value(tag, Some(name), out)?;
        }

        self.depth -= 1;
        Ok(())
    }

    fn enter(&mut self, offset: usize) -> Result<()> {
        if self.depth >= self.opts.max_depth {
            return Err(Error::depth_limit(self.opts.max_depth, offset));
        }
        self.depth += 1;
        Ok(())
    }
}
