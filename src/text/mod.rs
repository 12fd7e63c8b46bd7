//! The text codec (spec §4.4, §6): a suffix-typed literal grammar that
//! preserves tag widths across a text round trip.

mod decode;
mod encode;

pub use decode::{deserialize, parse_object};
pub use encode::{serialize, write_object};

use crate::error::CodecResult;
use crate::object::TaggedObject;

impl TaggedObject {
    /// Render this already-tagged object as text, bypassing
    /// [`crate::autotag`].
    pub fn to_text(&self) -> CodecResult<String> {
        let mut out = String::new();
        write_object(&mut out, self)?;
        Ok(out)
    }

    /// Parse a complete text object, failing on trailing non-whitespace
    /// characters.
    pub fn from_text(text: &str) -> CodecResult<TaggedObject> {
        deserialize(text)
    }
}
