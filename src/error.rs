use crate::tag::Tag;
use std::fmt;

/// Every error this crate can produce. All are fatal to the call that
/// raised them: there is no retry and no partial result.
#[derive(Debug)]
pub enum CodecError {
    /// `autotag` was given a host value of a shape not enumerated by the
    /// auto-tagging policy.
    UnsupportedType { type_name: String },

    /// An integer exceeded INT64 range, or exceeded the preferred tag's
    /// range when that preference was explicit and not `Smallest`.
    TooWide { value: i128 },

    /// A binary decode encountered a tag byte outside the defined set.
    UnknownTag { found: u8 },

    /// A binary decode needed more bytes than remained in the buffer.
    Truncated { needed: usize, remaining: usize },

    /// A top-level binary decode left residual bytes after one object was
    /// parsed.
    TrailingBytes { remaining: usize },

    /// A top-level text decode left residual non-whitespace input.
    TrailingCharacters { remaining: String },

    /// A text decode could not match any grammar alternative at a
    /// position; `at` is a short excerpt of the unconsumed input.
    ParseError { at: String },

    /// A text decode found a comma with nothing parseable following it.
    TrailingComma { at: String },

    /// A LIST or DICTIONARY's declared `item_count` disagreed with the
    /// number of items actually decoded from its `byte_length` region.
    CountMismatch { expected: u32, found: u32 },

    /// A hex literal had odd length, or a length prefix exceeded the
    /// remaining buffer.
    BadLength { detail: String },

    /// A dictionary key's tag was not one of the text tags.
    InvalidDictKey { found: Tag },

    /// A LIST being serialized had children that disagreed on tag.
    InvalidList { expecting: Tag, found: Tag },

    /// An IO error bubbled up from the underlying `Write`/`Read`.
    Io { error: std::io::Error },
}

pub type CodecResult<T> = Result<T, CodecError>;

pub(crate) fn digest_io<T>(r: Result<T, std::io::Error>) -> CodecResult<T> {
    match r {
        Ok(v) => Ok(v),
        Err(error) => Err(CodecError::Io { error }),
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnsupportedType { type_name } => {
                write!(f, "value of shape '{}' cannot be auto-tagged", type_name)
            }
            CodecError::TooWide { value } => {
                write!(f, "integer {} is too wide to be tagged", value)
            }
            CodecError::UnknownTag { found } => {
                write!(f, "unknown tag byte 0x{:02X}", found)
            }
            CodecError::Truncated { needed, remaining } => write!(
                f,
                "truncated input: needed {} bytes but only {} remained",
                needed, remaining
            ),
            CodecError::TrailingBytes { remaining } => {
                write!(f, "{} trailing byte(s) after top-level object", remaining)
            }
            CodecError::TrailingCharacters { remaining } => {
                write!(f, "trailing characters: \"{}\"", remaining)
            }
            CodecError::ParseError { at } => write!(f, "unable to parse at: \"{}\"", at),
            CodecError::TrailingComma { at } => write!(f, "trailing comma before: \"{}\"", at),
            CodecError::CountMismatch { expected, found } => write!(
                f,
                "item count mismatch: declared {} but decoded {}",
                expected, found
            ),
            CodecError::BadLength { detail } => write!(f, "bad length: {}", detail),
            CodecError::InvalidDictKey { found } => {
                write!(f, "dictionary key must be a text tag, found {}", found)
            }
            CodecError::InvalidList { expecting, found } => write!(
                f,
                "invalid list: was expecting {} but found {}",
                expecting, found
            ),
            CodecError::Io { error } => write!(f, "an IO error occurred: {}", error),
        }
    }
}

impl std::error::Error for CodecError {}
