//! The output of decoding: a flat, ordered record of every tag in the input.
//!
//! Compounds and lists are bracketed by open and close events rather than
//! nested, so the trace is a pre-order walk of the NBT tree. For example a
//! compound called `c` holding a byte `b` decodes to
//!
//! ```text
//! Compound       (name "c")
//! Byte(1)        (name "b")
//! End
//! ```
//!
//! and a list of two strings to
//!
//! ```text
//! List { element: String, count: 2 }   (named)
//! String("first")
//! String("second")
//! ListEnd
//! ```

use serde::Serialize;

use crate::{
    borrow::{ByteArray, IntArray, LongArray, Str},
    Tag,
};

/// An optional name. Values inside lists have no name, and neither do the
/// events that close compounds and lists.
pub type Name<'a> = Option<Str<'a>>;

/// One tag boundary or value in the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Event<'a> {
    pub name: Name<'a>,
    pub payload: Payload<'a>,
}

/// What an event carries. Strings and arrays borrow from the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Payload<'a> {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(ByteArray<'a>),
    String(Str<'a>),
    IntArray(IntArray<'a>),
    LongArray(LongArray<'a>),
    /// Start of a compound. Its entries follow, closed by an `End`.
    Compound,
    /// Closes the most recently opened compound.
    End,
    /// Start of a list. Exactly `count` unnamed values of the `element` tag
    /// follow, closed by a `ListEnd`.
    List { element: Tag, count: i32 },
    /// Closes the most recently opened list.
    ListEnd,
}

impl<'a> Payload<'a> {
    /// The tag this payload was read as. `End` and `ListEnd` map to the tags
    /// of the containers they close.
    pub fn tag(&self) -> Tag {
        match self {
            Payload::Byte(_) => Tag::Byte,
            Payload::Short(_) => Tag::Short,
            Payload::Int(_) => Tag::Int,
            Payload::Long(_) => Tag::Long,
            Payload::Float(_) => Tag::Float,
            Payload::Double(_) => Tag::Double,
            Payload::ByteArray(_) => Tag::ByteArray,
            Payload::String(_) => Tag::String,
            Payload::IntArray(_) => Tag::IntArray,
            Payload::LongArray(_) => Tag::LongArray,
            Payload::Compound => Tag::Compound,
            Payload::End => Tag::End,
            Payload::List { .. } => Tag::List,
            Payload::ListEnd => Tag::List,
        }
    }

    /// True for the events that open a compound or list.
    pub fn is_open(&self) -> bool {
        matches!(self, Payload::Compound | Payload::List { .. })
    }

    /// True for the events that close a compound or list.
    pub fn is_close(&self) -> bool {
        matches!(self, Payload::End | Payload::ListEnd)
    }
}

impl<'a> Event<'a> {
    pub fn named(name: Str<'a>, payload: Payload<'a>) -> Self {
        Self {
            name: Some(name),
            payload,
        }
    }

    pub fn unnamed(payload: Payload<'a>) -> Self {
        Self {
            name: None,
            payload,
        }
    }

    /// Copy everything borrowed from the input, so the event can outlive it.
    pub fn into_owned(self) -> OwnedEvent {
        let payload = match self.payload {
            Payload::Byte(v) => OwnedPayload::Byte(v),
            Payload::Short(v) => OwnedPayload::Short(v),
            Payload::Int(v) => OwnedPayload::Int(v),
            Payload::Long(v) => OwnedPayload::Long(v),
            Payload::Float(v) => OwnedPayload::Float(v),
            Payload::Double(v) => OwnedPayload::Double(v),
            Payload::ByteArray(a) => OwnedPayload::ByteArray(a.to_vec()),
            Payload::String(s) => OwnedPayload::String(s.as_bytes().to_vec()),
            Payload::IntArray(a) => OwnedPayload::IntArray(a.to_vec()),
            Payload::LongArray(a) => OwnedPayload::LongArray(a.to_vec()),
            Payload::Compound => OwnedPayload::Compound,
            Payload::End => OwnedPayload::End,
            Payload::List { element, count } => OwnedPayload::List { element, count },
            Payload::ListEnd => OwnedPayload::ListEnd,
        };

        OwnedEvent {
            name: self.name.map(|n| n.as_bytes().to_vec()),
            payload,
        }
    }
}

/// An [`Event`] that owns its data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedEvent {
    pub name: Option<Vec<u8>>,
    pub payload: OwnedPayload,
}

/// A [`Payload`] that owns its data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OwnedPayload {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(Vec<u8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    Compound,
    End,
    List { element: Tag, count: i32 },
    ListEnd,
}

/// The events decoded from an input, in the order they were found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trace<'a> {
    events: Vec<Event<'a>>,
    consumed: usize,
}

/// Why a trace does not describe a well formed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestingError {
    /// A close event at `index` with nothing open, or closing the wrong kind
    /// of container.
    UnbalancedClose { index: usize },
    /// The list opened at `index` did not hold the number of values it
    /// declared.
    ListCount {
        index: usize,
        declared: i32,
        found: usize,
    },
    /// Containers were still open at the end of the trace.
    Unclosed { open: usize },
}

impl std::error::Error for NestingError {}

impl std::fmt::Display for NestingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NestingError::UnbalancedClose { index } => {
                write!(f, "event {} closes a container that is not open", index)
            }
            NestingError::ListCount {
                index,
                declared,
                found,
            } => write!(
                f,
                "list at event {} declares {} values but holds {}",
                index, declared, found
            ),
            NestingError::Unclosed { open } => write!(f, "{} containers left open", open),
        }
    }
}

enum Open {
    Compound,
    List { index: usize, declared: i32, found: usize },
}

impl<'a> Trace<'a> {
    pub(crate) fn new(events: Vec<Event<'a>>, consumed: usize) -> Self {
        Self { events, consumed }
    }

    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event<'a>> {
        self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event<'a>> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of input bytes read to produce this trace. Equal to the input
    /// length unless decoding stopped early at a top-level end tag.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Copy the whole trace so it no longer borrows the input.
    pub fn to_owned_events(&self) -> Vec<OwnedEvent> {
        self.events.iter().map(|e| e.into_owned()).collect()
    }

    /// Replay the open and close events with a stack, checking that every
    /// container is closed by the right kind of event and that every list
    /// holds as many values as it declares.
    pub fn check_nesting(&self) -> Result<(), NestingError> {
        let mut stack: Vec<Open> = Vec::new();

        for (index, event) in self.events.iter().enumerate() {
            // Count this event as a value of the enclosing list. Close events
            // belong to the container they close, not its parent.
            if !event.payload.is_close() {
                if let Some(Open::List { found, .. }) = stack.last_mut() {
                    *found += 1;
                }
            }

            match event.payload {
                Payload::Compound => stack.push(Open::Compound),
                Payload::List { count, .. } => stack.push(Open::List {
                    index,
                    declared: count,
                    found: 0,
                }),
                Payload::End => match stack.pop() {
                    Some(Open::Compound) => {}
                    _ => return Err(NestingError::UnbalancedClose { index }),
                },
                Payload::ListEnd => match stack.pop() {
                    Some(Open::List {
                        index,
                        declared,
                        found,
                    }) => {
                        if declared.max(0) as usize != found {
                            return Err(NestingError::ListCount {
                                index,
                                declared,
                                found,
                            });
                        }
                    }
                    _ => return Err(NestingError::UnbalancedClose { index }),
                },
                _ => {}
            }
        }

        if stack.is_empty() {
            Ok(())
        } else {
            Err(NestingError::Unclosed { open: stack.len() })
        }
    }

    /// Iterate the events along with how many containers enclose each one.
    /// Close events are reported at the depth of the event that opened them.
    pub fn with_depth(&self) -> WithDepth<'_, 'a> {
        WithDepth {
            events: self.events.iter(),
            depth: 0,
        }
    }

    /// Index of the first compound with the given name, searching inside
    /// other compounds and lists too.
    pub fn find_compound(&self, name: &str) -> Option<usize> {
        self.events.iter().position(|e| {
            e.payload == Payload::Compound && e.name.map_or(false, |n| n == name)
        })
    }

    /// Index and declared count of the first list with the given name,
    /// searching inside other compounds and lists too.
    pub fn find_list(&self, name: &str) -> Option<(usize, i32)> {
        self.events
            .iter()
            .enumerate()
            .find_map(|(i, e)| match e.payload {
                Payload::List { count, .. } if e.name.map_or(false, |n| n == name) => {
                    Some((i, count))
                }
                _ => None,
            })
    }

    /// Given the index of an open event, return the index just past the event
    /// that closes it. For any other event, the index just past it. `None` if
    /// `index` is out of range or the container is never closed.
    pub fn skip_container(&self, index: usize) -> Option<usize> {
        let first = self.events.get(index)?;
        if !first.payload.is_open() {
            return Some(index + 1);
        }

        let mut depth = 0usize;
        for (i, event) in self.events.iter().enumerate().skip(index) {
            if event.payload.is_open() {
                depth += 1;
            } else if event.payload.is_close() {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
        }
        None
    }
}

impl<'t, 'a> IntoIterator for &'t Trace<'a> {
    type Item = &'t Event<'a>;
    type IntoIter = std::slice::Iter<'t, Event<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

pub struct WithDepth<'t, 'a> {
    events: std::slice::Iter<'t, Event<'a>>,
    depth: usize,
}

impl<'t, 'a> Iterator for WithDepth<'t, 'a> {
    type Item = (usize, &'t Event<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.events.next()?;

        if event.payload.is_close() {
            self.depth = self.depth.saturating_sub(1);
        }
        let depth = self.depth;
        if event.payload.is_open() {
            self.depth += 1;
        }

        Some((depth, event))
    }
}
