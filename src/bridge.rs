//! The bridge (spec §4.5): composing one encoding's decode with the other's
//! encode, staying on `TaggedObject` throughout so tag widths survive the
//! trip (autotag is the identity on already-tagged input).

use crate::binary;
use crate::error::CodecResult;
use crate::text;

/// `text.serialize(binary.deserialize(bytes))`.
pub fn binary_to_text(bytes: &[u8]) -> CodecResult<String> {
    let object = binary::deserialize(bytes)?;
    object.to_text()
}

/// `binary.serialize(text.deserialize(string))`.
pub fn text_to_binary(text: &str) -> CodecResult<Vec<u8>> {
    let object = text::deserialize(text)?;
    object.to_binary()
}
