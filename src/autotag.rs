use crate::error::{CodecError, CodecResult};
use crate::object::TaggedObject;
use crate::tag::Tag;
use crate::value::Value;
use std::convert::TryFrom;

/// The integer width preference passed to [`autotag`]. `Smallest` is its own
/// variant (DESIGN NOTES §9) rather than an out-of-band sentinel constant,
/// since Rust's enum has no room for a magic integer to double as "smallest".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredIntTag {
    Fixed(Tag),
    Smallest,
}

impl Default for PreferredIntTag {
    fn default() -> Self {
        PreferredIntTag::Fixed(Tag::Int32)
    }
}

/// The string tag preference passed to [`autotag`]. Restricted to the text
/// family at construction so callers can't smuggle a non-string tag in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferredStringTag(Tag);

impl PreferredStringTag {
    pub fn new(tag: Tag) -> Option<PreferredStringTag> {
        if tag.is_string() {
            Some(PreferredStringTag(tag))
        } else {
            None
        }
    }

    pub fn tag(self) -> Tag {
        self.0
    }
}

impl Default for PreferredStringTag {
    fn default() -> Self {
        PreferredStringTag(Tag::Utf8)
    }
}

/// Ascending-width integer tags, in the order the "scan for tightest fit"
/// policy (spec §4.2 item 3) walks them.
const INTEGER_WIDTHS: [Tag; 4] = [Tag::Int8, Tag::Int16, Tag::Int32, Tag::Int64];

fn fits(tag: Tag, value: i64) -> bool {
    match tag {
        Tag::Int8 => i8::try_from(value).is_ok(),
        Tag::Int16 => i16::try_from(value).is_ok(),
        Tag::Int32 => i32::try_from(value).is_ok(),
        Tag::Int64 => true,
        _ => false,
    }
}

fn tag_integer(value: i64, preferred: PreferredIntTag) -> CodecResult<TaggedObject> {
    if let PreferredIntTag::Fixed(tag) = preferred {
        if fits(tag, value) {
            return Ok(build_integer(tag, value));
        }
    }

    for tag in INTEGER_WIDTHS {
        if fits(tag, value) {
            return Ok(build_integer(tag, value));
        }
    }

    Err(CodecError::TooWide {
        value: value as i128,
    })
}

fn build_integer(tag: Tag, value: i64) -> TaggedObject {
    match tag {
        Tag::Int8 => TaggedObject::Int8(value as i8),
        Tag::Int16 => TaggedObject::Int16(value as i16),
        Tag::Int32 => TaggedObject::Int32(value as i32),
        Tag::Int64 => TaggedObject::Int64(value),
        _ => unreachable!("build_integer called with a non-integer tag"),
    }
}

/// Map a host [`Value`] onto a [`TaggedObject`], per the policy in spec
/// §4.2. `preferred_integer_tag` defaults to `Fixed(Tag::Int32)`;
/// `preferred_string_tag` defaults to `Tag::Utf8`.
pub fn autotag(
    value: &Value,
    preferred_integer_tag: PreferredIntTag,
    preferred_string_tag: PreferredStringTag,
) -> CodecResult<TaggedObject> {
    match value {
        // Identity on already-tagged input (policy item 1).
        Value::Tagged(object) => Ok((**object).clone()),

        Value::Void => Ok(TaggedObject::Void),
        Value::Bool(true) => Ok(TaggedObject::True),
        Value::Bool(false) => Ok(TaggedObject::False),

        Value::Int(n) => tag_integer(*n, preferred_integer_tag),

        // Floating-point always widens to DOUBLE (policy item 4); FLOAT is
        // only reachable via the `Tagged` passthrough above.
        Value::Float(f) => Ok(TaggedObject::Double(*f)),

        Value::Bytes(bytes) => Ok(TaggedObject::Binary(bytes.clone())),

        Value::Text(text) => match preferred_string_tag.tag() {
            Tag::Utf8 => Ok(TaggedObject::Utf8(text.clone())),
            Tag::Utf16 => Ok(TaggedObject::Utf16(text.clone())),
            Tag::Utf32 => Ok(TaggedObject::Utf32(text.clone())),
            other => unreachable!("PreferredStringTag admitted a non-text tag {:?}", other),
        },

        Value::List(items) => {
            let tagged = items
                .iter()
                .map(|item| autotag(item, preferred_integer_tag, preferred_string_tag))
                .collect::<CodecResult<Vec<_>>>()?;
            let item_tag = tagged.first().map(|o| o.tag()).unwrap_or(Tag::Void);
            Ok(TaggedObject::List {
                item_tag,
                items: tagged,
            })
        }

        Value::Dict(pairs) => {
            let tagged = pairs
                .iter()
                .map(|(k, v)| {
                    let key = autotag(k, preferred_integer_tag, preferred_string_tag)?;
                    let value = autotag(v, preferred_integer_tag, preferred_string_tag)?;
                    Ok((key, value))
                })
                .collect::<CodecResult<Vec<_>>>()?;
            Ok(TaggedObject::Dictionary(tagged))
        }
    }
}

/// `autotag` with the default preferences (`INT32`, `UTF8`).
pub fn autotag_default(value: &Value) -> CodecResult<TaggedObject> {
    autotag(value, PreferredIntTag::default(), PreferredStringTag::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_integer_tag_is_int32() {
        let tagged = autotag_default(&Value::Int(42)).unwrap();
        assert_eq!(tagged, TaggedObject::Int32(42));
    }

    #[test]
    fn smallest_picks_tightest_fit_per_width_boundary() {
        let cases = [
            (127i64, Tag::Int8),
            (128i64, Tag::Int16),
            (32767i64, Tag::Int16),
            (32768i64, Tag::Int32),
            (2147483647i64, Tag::Int32),
            (2147483648i64, Tag::Int64),
        ];
        for (n, expected) in cases {
            let tagged = autotag(
                &Value::Int(n),
                PreferredIntTag::Smallest,
                PreferredStringTag::default(),
            )
            .unwrap();
            assert_eq!(tagged.tag(), expected, "for n={}", n);
        }
    }

    #[test]
    fn fixed_preference_honored_when_it_fits() {
        let tagged = autotag(
            &Value::Int(5),
            PreferredIntTag::Fixed(Tag::Int64),
            PreferredStringTag::default(),
        )
        .unwrap();
        assert_eq!(tagged, TaggedObject::Int64(5));
    }

    #[test]
    fn fixed_preference_falls_back_to_scan_when_it_does_not_fit() {
        // Preferred is INT8 but 1000 doesn't fit; scan finds INT16.
        let tagged = autotag(
            &Value::Int(1000),
            PreferredIntTag::Fixed(Tag::Int8),
            PreferredStringTag::default(),
        )
        .unwrap();
        assert_eq!(tagged.tag(), Tag::Int16);
    }

    #[test]
    fn float_always_widens_to_double() {
        let tagged = autotag_default(&Value::Float(1.5)).unwrap();
        assert_eq!(tagged, TaggedObject::Double(1.5));
    }

    #[test]
    fn already_tagged_passes_through_unchanged() {
        let pinned = Value::tagged(TaggedObject::Float(3.5));
        let tagged = autotag_default(&pinned).unwrap();
        assert_eq!(tagged, TaggedObject::Float(3.5));
    }

    #[test]
    fn string_preference_selects_encoding() {
        let tagged = autotag(
            &Value::Text("hi".into()),
            PreferredIntTag::default(),
            PreferredStringTag::new(Tag::Utf16).unwrap(),
        )
        .unwrap();
        assert_eq!(tagged, TaggedObject::Utf16("hi".into()));
    }

    #[test]
    fn list_recurses_and_is_homogeneous() {
        let tagged = autotag_default(&Value::List(vec![Value::Int(1), Value::Int(2)])).unwrap();
        match tagged {
            TaggedObject::List { item_tag, items } => {
                assert_eq!(item_tag, Tag::Int32);
                assert_eq!(items.len(), 2);
            }
            _ => panic!("expected a list"),
        }
    }

    #[test]
    fn empty_list_tags_void() {
        let tagged = autotag_default(&Value::List(vec![])).unwrap();
        assert_eq!(tagged, TaggedObject::empty_list());
    }

    #[test]
    fn dict_preserves_insertion_order() {
        let tagged = autotag_default(&Value::Dict(vec![
            (Value::Text("b".into()), Value::Int(2)),
            (Value::Text("a".into()), Value::Int(1)),
        ]))
        .unwrap();
        match tagged {
            TaggedObject::Dictionary(pairs) => {
                assert_eq!(pairs[0].0, TaggedObject::Utf8("b".into()));
                assert_eq!(pairs[1].0, TaggedObject::Utf8("a".into()));
            }
            _ => panic!("expected a dictionary"),
        }
    }

    #[test]
    fn too_wide_integer_is_an_error() {
        let err = autotag(
            &Value::Int(i64::MAX),
            PreferredIntTag::Fixed(Tag::Int8),
            PreferredStringTag::default(),
        );
        // i64::MAX fits INT64 via the scan, so this actually succeeds;
        // TooWide is unreachable from `Value::Int` since it's already i64.
        assert!(err.is_ok());
    }

    #[test]
    fn idempotent_on_already_tagged_values() {
        let once = autotag_default(&Value::Int(9)).unwrap();
        let wrapped = Value::tagged(once.clone());
        let twice = autotag_default(&wrapped).unwrap();
        assert_eq!(once, twice);
    }
}
