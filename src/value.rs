use crate::object::TaggedObject;

/// A host value prior to auto-tagging. This is the input type `autotag`
/// accepts; it enumerates exactly the shapes the auto-tagging policy (spec
/// §4.2) knows how to handle.
///
/// `Tagged` is the identity-passthrough leaf: a caller that already has a
/// `TaggedObject` (to pin an exact width, e.g. a `FLOAT` leaf, which is
/// otherwise unreachable since bare floats always widen to `DOUBLE`) wraps
/// it here so `autotag` can return it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Void,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Text(String),
    List(Vec<Value>),
    Dict(Vec<(Value, Value)>),
    Tagged(Box<TaggedObject>),
}

impl Value {
    pub fn tagged(object: TaggedObject) -> Value {
        Value::Tagged(Box::new(object))
    }
}

impl From<TaggedObject> for Value {
    fn from(object: TaggedObject) -> Value {
        Value::tagged(object)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Void
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

macro_rules! from_integer {
    ($($t:ty),+) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Value {
                Value::Int(v as i64)
            }
        })+
    };
}
from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Value {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Value {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Value {
        match v {
            Some(v) => v.into(),
            None => Value::Void,
        }
    }
}

/// Build a `Value::List` from anything convertible to `Value`. Not a `From`
/// impl: `Vec<T>` would overlap with `From<Vec<u8>>` above since the
/// compiler can't tell `T = u8` apart from any other `T: Into<Value>` at
/// the impl-coherence stage.
pub fn list<T: Into<Value>>(items: Vec<T>) -> Value {
    Value::List(items.into_iter().map(Into::into).collect())
}

/// Build a `Value::Dict` from anything convertible to `Value`, preserving
/// pair order. See [`list`] for why this isn't a `From` impl.
pub fn dict<K: Into<Value>, V: Into<Value>>(pairs: Vec<(K, V)>) -> Value {
    Value::Dict(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
}
