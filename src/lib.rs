//! mcbe-nbt decodes the NBT records stored in *Minecraft: Bedrock Edition*
//! worlds. Bedrock writes NBT little-endian, and the values stored in its
//! world database are the *body* of a root compound: there is no leading tag
//! or name and no trailing end tag.
//!
//! Rather than building a tree, decoding produces a flat [`Trace`] of
//! [`Event`]s in the order they appear in the input. Opening a compound or a
//! list produces an event, as does closing it, so the nesting can be
//! recovered by replaying the trace with a stack.
//!
//! Strings and arrays are never copied. Their payloads are views into the
//! input buffer (see [`borrow`]), so a trace cannot outlive the buffer it was
//! decoded from. Use [`Event::into_owned`] to keep data around longer.
//!
//! # Example
//!
//! ```
//! use mcbe_nbt::{decode, Payload, Tag};
//!
//! // A byte called "x" with the value 7.
//! let input = [1u8, 1, 0, b'x', 7];
//! let trace = decode(&input).unwrap();
//!
//! assert_eq!(trace.len(), 1);
//! let event = &trace.events()[0];
//! assert_eq!(event.name.unwrap().as_bytes(), b"x");
//! assert_eq!(event.payload, Payload::Byte(7));
//! assert_eq!(event.payload.tag(), Tag::Byte);
//! ```
//!
//! # Failures
//!
//! Malformed input is reported as a [`Partial`], which carries the events
//! decoded before the problem was found alongside the [`Error`]. This makes
//! it possible to see how far into a corrupt record decoding got.
//!
//! ```
//! use mcbe_nbt::{decode, error::ErrorKind};
//!
//! // An int called "x" with only two of its four bytes.
//! let input = [3u8, 1, 0, b'x', 1, 2];
//! let partial = decode(&input).unwrap_err();
//!
//! assert!(partial.trace().is_empty());
//! assert_eq!(partial.error().kind(), &ErrorKind::UnexpectedEof);
//! ```

use num_enum::TryFromPrimitive;
use serde::Serialize;

pub mod borrow;
pub mod decode;
pub mod error;
pub mod input;
pub mod trace;

pub use decode::{decode, decode_with_opts, DecodeOpts, Decoder, Partial, RootEnd};
pub use error::{Error, Result};
pub use trace::{Event, Name, OwnedEvent, OwnedPayload, Payload, Trace};

#[cfg(test)]
mod test;

/// An NBT tag. This does not carry the value or the name of the data. The
/// discriminants are the codes used in the binary format.
#[derive(Debug, TryFromPrimitive, Serialize, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Length prefixed bytes. Usually UTF-8, but this is not checked.
    String = 8,
    /// Represents a list of unnamed values that all share one tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

impl Tag {
    /// Size in bytes of one element of this tag's payload, for the tags that
    /// have a fixed width or are arrays of fixed width elements.
    pub fn element_width(self) -> Option<usize> {
        match self {
            Tag::Byte | Tag::ByteArray => Some(1),
            Tag::Short => Some(2),
            Tag::Int | Tag::Float | Tag::IntArray => Some(4),
            Tag::Long | Tag::Double | Tag::LongArray => Some(8),
            Tag::End | Tag::String | Tag::List | Tag::Compound => None,
        }
    }
}
