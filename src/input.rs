//! Bounds checked reading over the input buffer.

use byteorder::{ByteOrder, LittleEndian};

use crate::{
    error::{Error, Result},
    Tag,
};

/// A read position over a borrowed byte slice. Every read either returns the
/// value and moves past it, or fails and leaves the position untouched. The
/// position never moves past the end of the slice.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left before the end of the input.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `n` bytes as a slice of the original input.
    pub fn consume(&mut self, n: usize) -> Result<&'a [u8]> {
        if n <= self.remaining() {
            let ret = &self.data[self.pos..self.pos + n];
            self.pos += n;
            Ok(ret)
        } else {
            Err(Error::unexpected_eof(self.pos, n, self.remaining()))
        }
    }

    pub fn consume_u8(&mut self) -> Result<u8> {
        Ok(self.consume(1)?[0])
    }

    pub fn consume_i8(&mut self) -> Result<i8> {
        Ok(self.consume_u8()? as i8)
    }

    /// Read a tag byte. Bytes outside of the known tags are an error, and the
    /// position is left on the bad byte.
    pub fn consume_tag(&mut self) -> Result<Tag> {
        let offset = self.pos;
        let mut peek = *self;
        let tag = peek.consume_u8()?;
        let tag = Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag, offset))?;
        *self = peek;
        Ok(tag)
    }

    pub fn consume_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.consume(2)?))
    }

    pub fn consume_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.consume(2)?))
    }

    pub fn consume_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.consume(4)?))
    }

    pub fn consume_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.consume(8)?))
    }

    pub fn consume_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.consume(4)?))
    }

    pub fn consume_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.consume(8)?))
    }

    /// Read a 16-bit length prefix and that many bytes. Used for both names
    /// and string payloads.
    pub fn consume_str(&mut self) -> Result<&'a [u8]> {
        let mut peek = *self;
        let len = peek.consume_u16()? as usize;
        let bytes = peek.consume(len)?;
        *self = peek;
        Ok(bytes)
    }

    /// Read a 32-bit element count followed by `count * width` bytes. A
    /// negative count, or one that cannot be addressed, is an error. On
    /// success returns the payload bytes without the count.
    pub fn consume_array(&mut self, width: usize) -> Result<&'a [u8]> {
        let mut peek = *self;
        let offset = peek.position();
        let count = peek.consume_i32()?;
        let len = try_size(count, width).map_err(|_| Error::invalid_count(count, offset))?;
        let bytes = peek.consume(len)?;
        *self = peek;
        Ok(bytes)
    }
}

pub(crate) fn try_size(size: i32, multiplier: usize) -> std::result::Result<usize, ()> {
    let size = usize::try_from(size).map_err(|_| ())?;
    size.checked_mul(multiplier).ok_or(())
}
