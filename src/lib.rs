//! # tagval
//!
//! `tagval` is a self-describing tagged-value codec with two interoperable
//! concrete syntaxes: a compact **binary** wire format and a human-readable
//! **text** grammar. A value produced by one encoding decodes to the same
//! logical value as the other, and a cross-encoding round trip
//! (`binary -> value -> text -> value -> binary`) preserves both the value
//! and its tag widths.
//!
//! ## Key features
//! - A fixed tag model (`Tag`) covering void, boolean, four integer widths,
//!   two floating widths, binary, three text encodings, and two container
//!   shapes (`List`, `Dictionary`).
//! - [`autotag`] infers a `TaggedObject` from a host [`Value`], honoring
//!   optional integer-width and string-encoding preferences.
//! - A [`binary`] codec: big-endian, length-prefixed, with list children
//!   eliding their own tag byte.
//! - A [`text`] codec: a suffix-typed literal grammar (`1i8`, `3.5d`,
//!   `"deadbeef"b`, `"hi"utf8`) that, unlike a JSON-like grammar, survives a
//!   round trip without losing tag width.
//! - A [`bridge`] module composing the two codecs losslessly in either
//!   direction.
//!
//! ## Quick start
//!
//! #### Values and tags
//! ```
//! use tagval::{TaggedObject, Value};
//!
//! // An already-tagged INT8 leaf.
//! let byte = TaggedObject::Int8(42);
//!
//! // A host value that auto-tagging will widen to the default INT32.
//! let value: Value = 42i32.into();
//! # let _ = (byte, value);
//! ```
//!
//! #### Binary
//! ```
//! use tagval::binary;
//!
//! let bytes = binary::serialize(1i32).unwrap();
//! assert_eq!(bytes, vec![0x12, 0x00, 0x00, 0x00, 0x01]);
//!
//! let object = binary::deserialize(&bytes).unwrap();
//! assert_eq!(object, tagval::TaggedObject::Int32(1));
//! ```
//!
//! #### Text
//! ```
//! use tagval::text;
//!
//! let rendered = text::serialize(1i32).unwrap();
//! assert_eq!(rendered, "1i32");
//!
//! let object = text::deserialize(&rendered).unwrap();
//! assert_eq!(object, tagval::TaggedObject::Int32(1));
//! ```
//!
//! #### Bridging encodings
//! ```
//! use tagval::{binary, bridge};
//!
//! let bytes = binary::serialize("hi").unwrap();
//! let text = bridge::binary_to_text(&bytes).unwrap();
//! assert_eq!(text, "\"hi\"utf8");
//! assert_eq!(bridge::text_to_binary(&text).unwrap(), bytes);
//! ```

mod autotag;
mod error;
mod object;
mod tag;
mod value;

pub mod binary;
pub mod bridge;
pub mod text;

pub use autotag::{autotag, autotag_default, PreferredIntTag, PreferredStringTag};
pub use error::{CodecError, CodecResult};
pub use object::TaggedObject;
pub use tag::{is_container_tag, is_floating_tag, is_integer_tag, is_string_tag, Tag};
pub use value::{dict, list, Value};
