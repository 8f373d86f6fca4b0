//! Contains the Error and Result type used by the decoder.

/// Something about the input that stopped it being decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
    offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Fewer bytes remained than a field, or a length read from the input,
    /// required. An unterminated compound also ends up here, since the input
    /// runs out when the next tag is expected.
    UnexpectedEof,

    /// A tag byte outside of the known tags, or an end tag where a value was
    /// expected. Contains the offending byte.
    InvalidTag(u8),

    /// An array or list length that was negative or too large to address.
    InvalidCount(i32),

    /// Compounds and lists were nested deeper than the configured limit.
    DepthLimit(usize),

    /// An end tag appeared at the top level, where there is no compound to
    /// close.
    RootEnd,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Offset into the input at which the problem was found.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether decoding failed only because the input ran out. Such input
    /// may decode once more bytes are available.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }

    pub(crate) fn unexpected_eof(offset: usize, needed: usize, remaining: usize) -> Self {
        Self {
            msg: format!(
                "eof: needed {} bytes at offset {}, only {} remain",
                needed, offset, remaining
            ),
            kind: ErrorKind::UnexpectedEof,
            offset,
        }
    }

    pub(crate) fn invalid_tag(tag: u8, offset: usize) -> Self {
        Self {
            msg: format!("invalid nbt tag value {} at offset {}", tag, offset),
            kind: ErrorKind::InvalidTag(tag),
            offset,
        }
    }

    pub(crate) fn unexpected_end(offset: usize) -> Self {
        Self {
            msg: format!("unexpected end tag at offset {}", offset),
            kind: ErrorKind::InvalidTag(0),
            offset,
        }
    }

    pub(crate) fn invalid_count(count: i32, offset: usize) -> Self {
        Self {
            msg: format!("invalid length {} at offset {}", count, offset),
            kind: ErrorKind::InvalidCount(count),
            offset,
        }
    }

    pub(crate) fn depth_limit(max: usize, offset: usize) -> Self {
        Self {
            msg: format!(
                "nesting deeper than the limit of {} at offset {}",
                max, offset
            ),
            kind: ErrorKind::DepthLimit(max),
            offset,
        }
    }

    pub(crate) fn root_end(offset: usize) -> Self {
        Self {
            msg: format!("end tag at the top level at offset {}", offset),
            kind: ErrorKind::RootEnd,
            offset,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;
