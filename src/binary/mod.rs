//! The binary wire codec (spec §4.3, §6): a tag byte followed by a payload
//! whose shape the tag fixes, with all multi-byte fields big-endian.

mod decode;
mod encode;

pub use decode::{decode_list_lazy, deserialize, read_object, ListItems};
pub use encode::{serialize, write_object};

use crate::error::CodecResult;
use crate::object::TaggedObject;

impl TaggedObject {
    /// Serialize this already-tagged object directly, bypassing
    /// [`crate::autotag`].
    pub fn to_binary(&self) -> CodecResult<Vec<u8>> {
        let mut buf = Vec::new();
        write_object(&mut buf, self)?;
        Ok(buf)
    }

    /// Parse a complete binary object, failing on trailing bytes.
    pub fn from_binary(bytes: &[u8]) -> CodecResult<TaggedObject> {
        deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::TaggedObject;
    use crate::tag::Tag;
    use crate::value::Value;

    #[test]
    fn void_true_false_round_trip() {
        for (obj, byte) in [
            (TaggedObject::Void, 0x00u8),
            (TaggedObject::True, 0x01),
            (TaggedObject::False, 0x02),
        ] {
            let bytes = obj.to_binary().unwrap();
            assert_eq!(bytes, vec![byte]);
            assert_eq!(deserialize(&bytes).unwrap(), obj);
        }
    }

    #[test]
    fn integers_round_trip_every_width() {
        for obj in [
            TaggedObject::Int8(-1),
            TaggedObject::Int16(-1),
            TaggedObject::Int32(-1),
            TaggedObject::Int64(-1),
        ] {
            let bytes = obj.to_binary().unwrap();
            assert_eq!(deserialize(&bytes).unwrap(), obj);
        }
    }

    #[test]
    fn list_round_trips_and_elides_item_tags() {
        let list = TaggedObject::List {
            item_tag: Tag::Int32,
            items: vec![
                TaggedObject::Int32(1),
                TaggedObject::Int32(2),
                TaggedObject::Int32(3),
            ],
        };
        let bytes = list.to_binary().unwrap();
        // tag + item_tag + byte_len(4) + item_count(4) + 3*4 bytes payload
        assert_eq!(bytes.len(), 1 + 1 + 4 + 4 + 12);
        assert_eq!(deserialize(&bytes).unwrap(), list);
    }

    #[test]
    fn dictionary_round_trips_preserving_order() {
        let dict = TaggedObject::Dictionary(vec![
            (TaggedObject::Utf8("foo".into()), TaggedObject::Int32(42)),
            (
                TaggedObject::Utf8("bar".into()),
                TaggedObject::Utf8("baz".into()),
            ),
        ]);
        let bytes = dict.to_binary().unwrap();
        let back = deserialize(&bytes).unwrap();
        assert_eq!(back, dict);
        match back {
            TaggedObject::Dictionary(pairs) => {
                assert_eq!(pairs[0].0, TaggedObject::Utf8("foo".into()));
                assert_eq!(pairs[1].0, TaggedObject::Utf8("bar".into()));
            }
            _ => panic!("expected a dictionary"),
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = TaggedObject::Void.to_binary().unwrap();
        bytes.push(0xFF);
        assert!(matches!(
            deserialize(&bytes),
            Err(crate::error::CodecError::TrailingBytes { .. })
        ));
    }

    #[test]
    fn unknown_tag_byte_is_rejected() {
        assert!(matches!(
            deserialize(&[0x99]),
            Err(crate::error::CodecError::UnknownTag { found: 0x99 })
        ));
    }

    #[test]
    fn truncated_input_is_rejected() {
        // INT32 tag with only 2 of 4 payload bytes.
        let bytes = vec![0x12, 0x00, 0x00];
        assert!(matches!(
            deserialize(&bytes),
            Err(crate::error::CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn serialize_top_level_autotags_host_values() {
        let bytes = serialize(Value::Int(1)).unwrap();
        assert_eq!(bytes, vec![0x12, 0x00, 0x00, 0x00, 0x01]);
    }
}
