use crate::error::{digest_io, CodecError, CodecResult};
use crate::object::TaggedObject;
use crate::tag::Tag;

use byteorder::{BigEndian as BE, ReadBytesExt};
use std::io::{Cursor, Read};

fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    cursor.get_ref().len() - cursor.position() as usize
}

fn require(cursor: &Cursor<&[u8]>, needed: usize) -> CodecResult<()> {
    let have = remaining(cursor);
    if have < needed {
        Err(CodecError::Truncated {
            needed,
            remaining: have,
        })
    } else {
        Ok(())
    }
}

fn read_tag(cursor: &mut Cursor<&[u8]>) -> CodecResult<Tag> {
    require(cursor, 1)?;
    let byte = digest_io(cursor.read_u8())?;
    Tag::parse(byte).ok_or(CodecError::UnknownTag { found: byte })
}

/// Read a `len:u32 bytes[len]` field, returning the raw bytes. `len` is
/// validated against the remaining buffer before the slice is taken
/// (spec §7 `BadLength`: "length prefix exceeds buffer").
fn read_length_prefixed(cursor: &mut Cursor<&[u8]>) -> CodecResult<Vec<u8>> {
    require(cursor, 4)?;
    let len = digest_io(cursor.read_u32::<BE>())? as usize;
    if len > remaining(cursor) {
        return Err(CodecError::BadLength {
            detail: format!(
                "length prefix {} exceeds remaining buffer of {} byte(s)",
                len,
                remaining(cursor)
            ),
        });
    }
    let mut buf = vec![0u8; len];
    digest_io(cursor.read_exact(&mut buf))?;
    Ok(buf)
}

fn decode_utf16_be(bytes: &[u8]) -> CodecResult<String> {
    if bytes.len() % 2 != 0 {
        return Err(CodecError::BadLength {
            detail: "utf-16 payload has an odd number of bytes".into(),
        });
    }
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    if units.first() == Some(&0xFEFF) {
        units.remove(0);
    }
    std::char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| CodecError::BadLength {
            detail: "invalid utf-16 sequence".into(),
        })
}

fn decode_utf32_be(bytes: &[u8]) -> CodecResult<String> {
    if bytes.len() % 4 != 0 {
        return Err(CodecError::BadLength {
            detail: "utf-32 payload is not a multiple of 4 bytes".into(),
        });
    }
    let mut units: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    if units.first() == Some(&0xFEFF) {
        units.remove(0);
    }
    units
        .into_iter()
        .map(|u| char::from_u32(u).ok_or(CodecError::BadLength {
            detail: format!("invalid utf-32 code point 0x{:08X}", u),
        }))
        .collect()
}

/// Read a fully-tagged object: tag byte followed by its payload.
pub fn read_object(cursor: &mut Cursor<&[u8]>) -> CodecResult<TaggedObject> {
    let tag = read_tag(cursor)?;
    read_payload(cursor, tag)
}

/// Read just the payload for a known `tag`, without consuming a tag byte.
/// Used for LIST children, whose tag is declared once by the container.
fn read_payload(cursor: &mut Cursor<&[u8]>, tag: Tag) -> CodecResult<TaggedObject> {
    match tag {
        Tag::Void => Ok(TaggedObject::Void),
        Tag::True => Ok(TaggedObject::True),
        Tag::False => Ok(TaggedObject::False),

        Tag::Int8 | Tag::Int16 | Tag::Int32 | Tag::Int64 => {
            require(cursor, tag.integer_width().expect("tag is an integer tag"))?;
            Ok(match tag {
                Tag::Int8 => TaggedObject::Int8(digest_io(cursor.read_i8())?),
                Tag::Int16 => TaggedObject::Int16(digest_io(cursor.read_i16::<BE>())?),
                Tag::Int32 => TaggedObject::Int32(digest_io(cursor.read_i32::<BE>())?),
                Tag::Int64 => TaggedObject::Int64(digest_io(cursor.read_i64::<BE>())?),
                _ => unreachable!("matched only integer tags above"),
            })
        }

        Tag::Float => {
            require(cursor, 4)?;
            Ok(TaggedObject::Float(digest_io(cursor.read_f32::<BE>())?))
        }
        Tag::Double => {
            require(cursor, 8)?;
            Ok(TaggedObject::Double(digest_io(cursor.read_f64::<BE>())?))
        }

        Tag::Binary => Ok(TaggedObject::Binary(read_length_prefixed(cursor)?)),
        Tag::Utf8 => {
            let bytes = read_length_prefixed(cursor)?;
            let text = String::from_utf8(bytes).map_err(|e| CodecError::BadLength {
                detail: format!("invalid utf-8: {}", e),
            })?;
            Ok(TaggedObject::Utf8(text))
        }
        Tag::Utf16 => Ok(TaggedObject::Utf16(decode_utf16_be(
            &read_length_prefixed(cursor)?,
        )?)),
        Tag::Utf32 => Ok(TaggedObject::Utf32(decode_utf32_be(
            &read_length_prefixed(cursor)?,
        )?)),

        Tag::List => read_list(cursor),
        Tag::Dictionary => read_dictionary(cursor),
    }
}

fn read_child_region<'a>(cursor: &mut Cursor<&'a [u8]>) -> CodecResult<(Vec<u8>, u32)> {
    require(cursor, 8)?;
    let byte_length = digest_io(cursor.read_u32::<BE>())? as usize;
    let item_count = digest_io(cursor.read_u32::<BE>())?;
    if byte_length > remaining(cursor) {
        return Err(CodecError::BadLength {
            detail: format!(
                "byte_length {} exceeds remaining buffer of {} byte(s)",
                byte_length,
                remaining(cursor)
            ),
        });
    }
    let mut region = vec![0u8; byte_length];
    digest_io(cursor.read_exact(&mut region))?;
    Ok((region, item_count))
}

fn read_list(cursor: &mut Cursor<&[u8]>) -> CodecResult<TaggedObject> {
    let item_tag = read_tag(cursor)?;
    let (region, item_count) = read_child_region(cursor)?;

    let mut child_cursor = Cursor::new(region.as_slice());
    let mut items = Vec::new();
    while remaining(&child_cursor) > 0 {
        items.push(read_payload(&mut child_cursor, item_tag)?);
    }

    if items.len() as u32 != item_count {
        return Err(CodecError::CountMismatch {
            expected: item_count,
            found: items.len() as u32,
        });
    }

    Ok(TaggedObject::List { item_tag, items })
}

fn read_dictionary(cursor: &mut Cursor<&[u8]>) -> CodecResult<TaggedObject> {
    let (region, item_count) = read_child_region(cursor)?;

    let mut child_cursor = Cursor::new(region.as_slice());
    let mut pairs = Vec::new();
    while remaining(&child_cursor) > 0 {
        let key = read_object(&mut child_cursor)?;
        if !key.tag().is_string() {
            return Err(CodecError::InvalidDictKey { found: key.tag() });
        }
        let value = read_object(&mut child_cursor)?;
        pairs.push((key, value));
    }

    if pairs.len() as u32 != item_count {
        return Err(CodecError::CountMismatch {
            expected: item_count,
            found: pairs.len() as u32,
        });
    }

    Ok(TaggedObject::Dictionary(pairs))
}

/// Top-level entry point: parse exactly one object, failing if any bytes
/// remain afterward (spec §4.3 "fails if any trailing bytes remain").
pub fn deserialize(bytes: &[u8]) -> CodecResult<TaggedObject> {
    let mut cursor = Cursor::new(bytes);
    let object = read_object(&mut cursor)?;
    let left = remaining(&cursor);
    if left > 0 {
        return Err(CodecError::TrailingBytes { remaining: left });
    }
    Ok(object)
}

/// A one-pass, non-restartable cursor over a LIST's children, for callers
/// that want to avoid materializing large payloads up front (spec §5,
/// DESIGN NOTES §9). `item_count` is still verified, but only once the
/// sequence is fully drained — mirroring the original's generator-based
/// `item_iterator`.
pub struct ListItems<'a> {
    item_tag: Tag,
    cursor: Cursor<&'a [u8]>,
    expected: u32,
    seen: u32,
    miscounted: bool,
}

impl<'a> ListItems<'a> {
    pub fn item_tag(&self) -> Tag {
        self.item_tag
    }
}

impl<'a> Iterator for ListItems<'a> {
    type Item = CodecResult<TaggedObject>;

    fn next(&mut self) -> Option<Self::Item> {
        if remaining(&self.cursor) == 0 {
            if !self.miscounted && self.seen != self.expected {
                self.miscounted = true;
                return Some(Err(CodecError::CountMismatch {
                    expected: self.expected,
                    found: self.seen,
                }));
            }
            return None;
        }

        match read_payload(&mut self.cursor, self.item_tag) {
            Ok(item) => {
                self.seen += 1;
                Some(Ok(item))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Parse a LIST object lazily: the header (`item_tag`, `byte_length`,
/// `item_count`) is read eagerly, but children are decoded one at a time as
/// the returned iterator is driven.
pub fn decode_list_lazy(bytes: &[u8]) -> CodecResult<ListItems<'_>> {
    let mut cursor = Cursor::new(bytes);
    let tag = read_tag(&mut cursor)?;
    if tag != Tag::List {
        return Err(CodecError::UnknownTag { found: tag.byte() });
    }
    let item_tag = read_tag(&mut cursor)?;
    let (region, item_count) = read_child_region(&mut cursor)?;

    // `region` was copied out of `bytes` by `read_child_region`; re-slice
    // directly from the original buffer instead so the returned iterator
    // can borrow with `bytes`'s lifetime rather than an owned copy.
    let start = cursor.position() as usize - region.len();
    let child_slice = &bytes[start..start + region.len()];

    Ok(ListItems {
        item_tag,
        cursor: Cursor::new(child_slice),
        expected: item_count,
        seen: 0,
        miscounted: false,
    })
}
