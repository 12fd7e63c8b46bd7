use crate::autotag::autotag_default;
use crate::error::{digest_io, CodecError, CodecResult};
use crate::object::TaggedObject;
use crate::tag::Tag;
use crate::value::Value;

use byteorder::{BigEndian as BE, WriteBytesExt};
use std::io::Write;

/// Top-level entry point: `autotag` the value, then write tag byte +
/// payload. The counterpart of [`crate::binary::deserialize`].
pub fn serialize(value: impl Into<Value>) -> CodecResult<Vec<u8>> {
    let tagged = autotag_default(&value.into())?;
    let mut buf = Vec::new();
    write_object(&mut buf, &tagged)?;
    Ok(buf)
}

/// Write a fully-tagged object: its tag byte followed by its payload.
pub fn write_object<W: Write>(writer: &mut W, object: &TaggedObject) -> CodecResult<()> {
    digest_io(writer.write_u8(object.tag().byte()))?;
    write_payload(writer, object)
}

/// Write just the payload of `object`, eliding its tag byte. Used by LIST
/// encoding, which declares the common child tag once in its own header.
fn write_payload<W: Write>(writer: &mut W, object: &TaggedObject) -> CodecResult<()> {
    match object {
        TaggedObject::Void | TaggedObject::True | TaggedObject::False => Ok(()),

        TaggedObject::Int8(v) => digest_io(writer.write_i8(*v)),
        TaggedObject::Int16(v) => digest_io(writer.write_i16::<BE>(*v)),
        TaggedObject::Int32(v) => digest_io(writer.write_i32::<BE>(*v)),
        TaggedObject::Int64(v) => digest_io(writer.write_i64::<BE>(*v)),

        TaggedObject::Float(v) => digest_io(writer.write_f32::<BE>(*v)),
        TaggedObject::Double(v) => digest_io(writer.write_f64::<BE>(*v)),

        TaggedObject::Binary(bytes) => write_length_prefixed(writer, bytes),
        TaggedObject::Utf8(s) => write_length_prefixed(writer, s.as_bytes()),
        TaggedObject::Utf16(s) => write_length_prefixed(writer, &encode_utf16_be(s)),
        TaggedObject::Utf32(s) => write_length_prefixed(writer, &encode_utf32_be(s)),

        TaggedObject::List { item_tag, items } => write_list(writer, *item_tag, items),
        TaggedObject::Dictionary(pairs) => write_dictionary(writer, pairs),
    }
}

fn write_length_prefixed<W: Write>(writer: &mut W, bytes: &[u8]) -> CodecResult<()> {
    digest_io(writer.write_u32::<BE>(bytes.len() as u32))?;
    digest_io(writer.write_all(bytes))
}

/// Encode as UTF-16BE with a leading byte-order mark (spec §6: "encoder
/// output, BOM permitted").
fn encode_utf16_be(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + s.len() * 2);
    out.extend_from_slice(&0xFEFFu16.to_be_bytes());
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// Encode as UTF-32BE with a leading byte-order mark.
fn encode_utf32_be(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + s.chars().count() * 4);
    out.extend_from_slice(&0xFEFFu32.to_be_bytes());
    for ch in s.chars() {
        out.extend_from_slice(&(ch as u32).to_be_bytes());
    }
    out
}

fn write_list<W: Write>(writer: &mut W, item_tag: Tag, items: &[TaggedObject]) -> CodecResult<()> {
    ensure_list_integrity(item_tag, items)?;

    let mut payload = Vec::new();
    for item in items {
        write_payload(&mut payload, item)?;
    }

    digest_io(writer.write_u8(item_tag.byte()))?;
    digest_io(writer.write_u32::<BE>(payload.len() as u32))?;
    digest_io(writer.write_u32::<BE>(items.len() as u32))?;
    digest_io(writer.write_all(&payload))
}

/// Reject a LIST whose children disagree on tag (spec §3 invariant,
/// DESIGN NOTES §9). Mirrors the teacher's `ensure_list_integrity`.
fn ensure_list_integrity(declared: Tag, items: &[TaggedObject]) -> CodecResult<()> {
    for item in items {
        if item.tag() != declared {
            return Err(CodecError::InvalidList {
                expecting: declared,
                found: item.tag(),
            });
        }
    }
    Ok(())
}

fn write_dictionary<W: Write>(
    writer: &mut W,
    pairs: &[(TaggedObject, TaggedObject)],
) -> CodecResult<()> {
    let mut payload = Vec::new();
    for (key, value) in pairs {
        if !key.tag().is_string() {
            return Err(CodecError::InvalidDictKey { found: key.tag() });
        }
        write_object(&mut payload, key)?;
        write_object(&mut payload, value)?;
    }

    digest_io(writer.write_u32::<BE>(payload.len() as u32))?;
    digest_io(writer.write_u32::<BE>(pairs.len() as u32))?;
    digest_io(writer.write_all(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::TaggedObject;

    // Ground-truth fixtures S1-S6 from spec §8.

    #[test]
    fn s1_void_and_booleans() {
        assert_eq!(TaggedObject::Void.to_binary().unwrap(), vec![0x00]);
        assert_eq!(TaggedObject::True.to_binary().unwrap(), vec![0x01]);
        assert_eq!(TaggedObject::False.to_binary().unwrap(), vec![0x02]);
    }

    #[test]
    fn s2_default_int32_encoding() {
        assert_eq!(
            serialize(Value::Int(1)).unwrap(),
            vec![0x12, 0x00, 0x00, 0x00, 0x01]
        );
        assert_eq!(
            serialize(Value::Int(-1)).unwrap(),
            vec![0x12, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            serialize(Value::Int(-2147483648)).unwrap(),
            vec![0x12, 0x80, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn s3_doubles() {
        assert_eq!(
            TaggedObject::Double(1.0).to_binary().unwrap(),
            vec![0x21, 0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        let smallest_subnormal = 2.0f64.powi(-1074);
        assert_eq!(
            TaggedObject::Double(smallest_subnormal).to_binary().unwrap(),
            vec![0x21, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]
        );
    }

    #[test]
    fn s4_strings() {
        assert_eq!(
            serialize(Value::Text("Hello, world".into())).unwrap(),
            vec![
                0x31, 0x00, 0x00, 0x00, 0x0C, 0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x2C, 0x20, 0x77, 0x6F,
                0x72, 0x6C, 0x64
            ]
        );
        assert_eq!(
            serialize(Value::Text("世界".into())).unwrap(),
            vec![
                0x31, 0x00, 0x00, 0x00, 0x06, 0xE4, 0xB8, 0x96, 0xE7, 0x95, 0x8C
            ]
        );
    }

    #[test]
    fn s5_lists() {
        assert_eq!(
            TaggedObject::empty_list().to_binary().unwrap(),
            vec![0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            serialize(Value::List(vec![
                Value::Int(1),
                Value::Int(2),
                Value::Int(3)
            ]))
            .unwrap(),
            vec![
                0x40, 0x12, 0x00, 0x00, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00,
                0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x03
            ]
        );
    }

    #[test]
    fn s6_dictionaries() {
        assert_eq!(
            TaggedObject::Dictionary(vec![]).to_binary().unwrap(),
            vec![0x41, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );

        let dict = TaggedObject::Dictionary(vec![
            (TaggedObject::Utf8("foo".into()), TaggedObject::Int32(42)),
            (
                TaggedObject::Utf8("bar".into()),
                TaggedObject::Utf8("baz".into()),
            ),
        ]);
        assert_eq!(
            dict.to_binary().unwrap(),
            vec![
                0x41, 0x00, 0x00, 0x00, 0x1D, 0x00, 0x00, 0x00, 0x02, 0x31, 0x00, 0x00, 0x00,
                0x03, 0x66, 0x6F, 0x6F, 0x12, 0x00, 0x00, 0x00, 0x2A, 0x31, 0x00, 0x00, 0x00,
                0x03, 0x62, 0x61, 0x72, 0x31, 0x00, 0x00, 0x00, 0x03, 0x62, 0x61, 0x7A
            ]
        );
    }

    #[test]
    fn mismatched_list_tags_are_rejected_at_serialize_time() {
        let list = TaggedObject::List {
            item_tag: Tag::Int32,
            items: vec![TaggedObject::Int32(1), TaggedObject::Int8(2)],
        };
        assert!(matches!(
            list.to_binary(),
            Err(CodecError::InvalidList { .. })
        ));
    }

    #[test]
    fn non_text_dictionary_keys_are_rejected() {
        let dict = TaggedObject::Dictionary(vec![(TaggedObject::Int32(1), TaggedObject::Void)]);
        assert!(matches!(
            dict.to_binary(),
            Err(CodecError::InvalidDictKey { .. })
        ));
    }
}
