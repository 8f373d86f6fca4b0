//! Views of string and array payloads that borrow from the input buffer.
//!
//! None of these types copy data out of the input. They retain a reference to
//! it instead, meaning the input has to live as long as they do. The
//! `iter()` methods read values on demand from the referenced bytes, so the
//! input needs no particular alignment.
//!
//! To keep the data beyond the life of the input, use `to_vec()`, or convert
//! whole events with [`Event::into_owned`][`crate::Event::into_owned`].

use std::{borrow::Cow, fmt, str::Utf8Error};

use byteorder::{LittleEndian, ReadBytesExt};
use serde::{Serialize, Serializer};

/// Length prefixed bytes, as used for tag names and string payloads. The
/// format does not enforce any encoding, and neither does decoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Str<'a> {
    data: &'a [u8],
}

impl<'a> Str<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// The raw bytes, without the length prefix.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Length in bytes, as declared by the length prefix.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The bytes as a `str`, if they are valid UTF-8.
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.data)
    }

    /// The bytes as text, replacing invalid UTF-8. Only allocates if there is
    /// something to replace.
    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.data)
    }
}

impl<'a> fmt::Debug for Str<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl<'a> fmt::Display for Str<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<'a> PartialEq<&str> for Str<'a> {
    fn eq(&self, other: &&str) -> bool {
        self.data == other.as_bytes()
    }
}

impl<'a> Serialize for Str<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// The payload of a ByteArray tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteArray<'a> {
    data: &'a [u8],
}

impl<'a> ByteArray<'a> {
    pub(crate) fn from_bytes(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Create an iterator over the bytes.
    pub fn iter(&self) -> ByteIter<'a> {
        ByteIter(*self)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn to_vec(&self) -> Vec<i8> {
        self.iter().collect()
    }
}

pub struct ByteIter<'a>(ByteArray<'a>);

impl<'a> Iterator for ByteIter<'a> {
    type Item = i8;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.data.read_i8().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.len();
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for ByteIter<'a> {}

/// The payload of an IntArray tag. The elements are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntArray<'a> {
    data: &'a [u8],
}

impl<'a> IntArray<'a> {
    pub(crate) fn from_bytes(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Create an iterator over the i32s
    pub fn iter(&self) -> IntIter<'a> {
        IntIter(*self)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len() / std::mem::size_of::<i32>()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}

pub struct IntIter<'a>(IntArray<'a>);

impl<'a> Iterator for IntIter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.data.read_i32::<LittleEndian>().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.len();
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for IntIter<'a> {}

/// The payload of a LongArray tag. The elements are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongArray<'a> {
    data: &'a [u8],
}

impl<'a> LongArray<'a> {
    pub(crate) fn from_bytes(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Create an iterator over the i64s
    pub fn iter(&self) -> LongIter<'a> {
        LongIter(*self)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len() / std::mem::size_of::<i64>()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

pub struct LongIter<'a>(LongArray<'a>);

impl<'a> Iterator for LongIter<'a> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.data.read_i64::<LittleEndian>().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.len();
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for LongIter<'a> {}

macro_rules! serialize_as_seq {
    ($($array:ident),*) => {
        $(
            impl<'a> Serialize for $array<'a> {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    serializer.collect_seq(self.iter())
                }
            }
        )*
    };
}

serialize_as_seq!(ByteArray, IntArray, LongArray);
