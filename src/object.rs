use crate::tag::Tag;

/// An immutable `(tag, payload)` pair, the sole currency of this crate's
/// codecs. The payload shape is fixed by the tag: a decoder must never
/// construct a `TaggedObject` whose payload doesn't match its own variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedObject {
    Void,
    True,
    False,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Binary(Vec<u8>),
    Utf8(String),
    Utf16(String),
    Utf32(String),
    /// A homogeneous sequence. `item_tag` is `Tag::Void` for an empty list,
    /// otherwise the common tag of every element (enforced at serialize
    /// time by `binary::encode`/`text::encode`).
    List {
        item_tag: Tag,
        items: Vec<TaggedObject>,
    },
    /// An insertion-ordered sequence of key/value pairs. Keys must carry a
    /// text tag (UTF8/UTF16/UTF32); duplicate keys are preserved verbatim.
    Dictionary(Vec<(TaggedObject, TaggedObject)>),
}

impl TaggedObject {
    /// The tag identifying this object's wire representation.
    pub fn tag(&self) -> Tag {
        match self {
            TaggedObject::Void => Tag::Void,
            TaggedObject::True => Tag::True,
            TaggedObject::False => Tag::False,
            TaggedObject::Int8(_) => Tag::Int8,
            TaggedObject::Int16(_) => Tag::Int16,
            TaggedObject::Int32(_) => Tag::Int32,
            TaggedObject::Int64(_) => Tag::Int64,
            TaggedObject::Float(_) => Tag::Float,
            TaggedObject::Double(_) => Tag::Double,
            TaggedObject::Binary(_) => Tag::Binary,
            TaggedObject::Utf8(_) => Tag::Utf8,
            TaggedObject::Utf16(_) => Tag::Utf16,
            TaggedObject::Utf32(_) => Tag::Utf32,
            TaggedObject::List { .. } => Tag::List,
            TaggedObject::Dictionary(_) => Tag::Dictionary,
        }
    }

    /// Build an empty list (`item_tag` is `Tag::Void`, per spec).
    pub fn empty_list() -> TaggedObject {
        TaggedObject::List {
            item_tag: Tag::Void,
            items: Vec::new(),
        }
    }

    /// Build a list from already-tagged children, deriving `item_tag` from
    /// the first element (or `Tag::Void` if empty). Does not check that the
    /// remaining elements agree — callers that need that guarantee should
    /// go through `autotag` or `binary`/`text` serialization, both of which
    /// validate homogeneity.
    pub fn list(items: Vec<TaggedObject>) -> TaggedObject {
        let item_tag = items.first().map(|o| o.tag()).unwrap_or(Tag::Void);
        TaggedObject::List { item_tag, items }
    }

    /// `true` if every element of a LIST shares `item_tag` (vacuously true
    /// for an empty list).
    pub fn is_homogeneous(&self) -> bool {
        match self {
            TaggedObject::List { item_tag, items } => {
                items.iter().all(|item| item.tag() == *item_tag)
            }
            _ => true,
        }
    }
}
