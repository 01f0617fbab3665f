//! Dynamic view over the values a validator inspects.
//!
//! Every type that can appear in a record implements [`Checkable`], which
//! projects it onto a [`Value`]. Checkers only ever see `Value`s, so the
//! same `min:3` check applies to a `String`, a `Vec<u8>` or a `HashMap`.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{CheckError, Failure};
use crate::structured::Structured;

/// Maximum number of optional layers [`Value::resolve`] follows.
pub const MAX_DEREF_DEPTH: usize = 64;

/// A borrowed, type-erased view of a value.
#[derive(Clone)]
pub enum Value<'a> {
    /// An empty optional layer, or nothing at all.
    Absent,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(Cow<'a, str>),
    /// A collection; only its element count is observable.
    Seq { len: usize },
    /// A record with named fields.
    Struct(&'a dyn Structured),
    /// An optional layer that still has to be followed.
    Ref(Option<&'a dyn Checkable>),
}

/// The shape of a [`Value`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Absent,
    Bool,
    Int,
    Uint,
    Float,
    Char,
    Str,
    Seq,
    Struct,
    Ref,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Char => "char",
            Self::Str => "string",
            Self::Seq => "sequence",
            Self::Struct => "struct",
            Self::Ref => "reference",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> Value<'a> {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Absent => Kind::Absent,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Uint(_) => Kind::Uint,
            Self::Float(_) => Kind::Float,
            Self::Char(_) => Kind::Char,
            Self::Str(_) => Kind::Str,
            Self::Seq { .. } => Kind::Seq,
            Self::Struct(_) => Kind::Struct,
            Self::Ref(_) => Kind::Ref,
        }
    }

    /// Follow optional layers until a non-reference value is reached.
    ///
    /// An empty layer resolves to [`Value::Absent`]. Chains deeper than
    /// [`MAX_DEREF_DEPTH`] produce [`Failure::DerefLimit`].
    pub fn resolve(self) -> Result<Value<'a>, Failure> {
        let mut current = self;
        for _ in 0..MAX_DEREF_DEPTH {
            match current {
                Value::Ref(Some(inner)) => current = inner.value(),
                Value::Ref(None) => return Ok(Value::Absent),
                resolved => return Ok(resolved),
            }
        }
        match current {
            Value::Ref(_) => Err(Failure::DerefLimit {
                limit: MAX_DEREF_DEPTH,
            }),
            resolved => Ok(resolved),
        }
    }

    /// Whether this is the zero value of its kind.
    ///
    /// Records are zero when every field is zero. References are judged by
    /// what they resolve to.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Bool(b) => !b,
            Self::Int(n) => *n == 0,
            Self::Uint(n) => *n == 0,
            Self::Float(x) => x.to_bits() == 0,
            Self::Char(c) => *c == '\0',
            Self::Str(s) => s.is_empty(),
            Self::Seq { len } => *len == 0,
            Self::Struct(record) => record
                .fields()
                .iter()
                .all(|field| field.value().value().resolve().map_or(false, |v| v.is_zero())),
            Self::Ref(_) => self.clone().resolve().map_or(false, |v| v.is_zero()),
        }
    }

    /// Textual form of a scalar value.
    ///
    /// Absent values render as the empty string. Collections and records
    /// have no textual form.
    pub fn text(&self) -> Result<Cow<'_, str>, CheckError> {
        match self {
            Self::Absent => Ok(Cow::Borrowed("")),
            Self::Bool(b) => Ok(Cow::Owned(b.to_string())),
            Self::Int(n) => Ok(Cow::Owned(n.to_string())),
            Self::Uint(n) => Ok(Cow::Owned(n.to_string())),
            Self::Float(x) => Ok(Cow::Owned(x.to_string())),
            Self::Char(c) => Ok(Cow::Owned(c.to_string())),
            Self::Str(s) => Ok(Cow::Borrowed(s.as_ref())),
            other => Err(CheckError::UnsupportedKind(other.kind())),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Uint(n) => f.debug_tuple("Uint").field(n).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Seq { len } => f.debug_struct("Seq").field("len", len).finish(),
            Self::Struct(record) => f.debug_tuple("Struct").field(&record.type_name()).finish(),
            Self::Ref(Some(_)) => f.write_str("Ref(Some(..))"),
            Self::Ref(None) => f.write_str("Ref(None)"),
        }
    }
}

/// Types that can be inspected by a validator.
///
/// Implemented for primitives, strings, standard collections, smart
/// pointers and `Option`. Records get an implementation from
/// `#[derive(Structured)]`.
pub trait Checkable {
    fn value(&self) -> Value<'_>;
}

macro_rules! impl_checkable_signed {
    ($($ty:ty),*) => {
        $(
            impl Checkable for $ty {
                fn value(&self) -> Value<'_> {
                    Value::Int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! impl_checkable_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Checkable for $ty {
                fn value(&self) -> Value<'_> {
                    Value::Uint(*self as u64)
                }
            }
        )*
    };
}

impl_checkable_signed!(i8, i16, i32, i64, isize);
impl_checkable_unsigned!(u8, u16, u32, u64, usize);

impl Checkable for f32 {
    fn value(&self) -> Value<'_> {
        Value::Float(f64::from(*self))
    }
}

impl Checkable for f64 {
    fn value(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl Checkable for bool {
    fn value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Checkable for char {
    fn value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl Checkable for str {
    fn value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl Checkable for String {
    fn value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_str()))
    }
}

impl Checkable for Cow<'_, str> {
    fn value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_ref()))
    }
}

impl Checkable for () {
    fn value(&self) -> Value<'_> {
        Value::Absent
    }
}

impl<T: ?Sized> Checkable for PhantomData<T> {
    fn value(&self) -> Value<'_> {
        Value::Absent
    }
}

impl<T: Checkable> Checkable for Option<T> {
    fn value(&self) -> Value<'_> {
        Value::Ref(self.as_ref().map(|inner| inner as &dyn Checkable))
    }
}

impl<T: Checkable + ?Sized> Checkable for &T {
    fn value(&self) -> Value<'_> {
        (**self).value()
    }
}

impl<T: Checkable + ?Sized> Checkable for &mut T {
    fn value(&self) -> Value<'_> {
        (**self).value()
    }
}

impl<T: Checkable + ?Sized> Checkable for Box<T> {
    fn value(&self) -> Value<'_> {
        (**self).value()
    }
}

impl<T: Checkable + ?Sized> Checkable for Rc<T> {
    fn value(&self) -> Value<'_> {
        (**self).value()
    }
}

impl<T: Checkable + ?Sized> Checkable for Arc<T> {
    fn value(&self) -> Value<'_> {
        (**self).value()
    }
}

impl<T> Checkable for [T] {
    fn value(&self) -> Value<'_> {
        Value::Seq { len: self.len() }
    }
}

impl<T, const N: usize> Checkable for [T; N] {
    fn value(&self) -> Value<'_> {
        Value::Seq { len: N }
    }
}

macro_rules! impl_checkable_collection {
    ($($ty:ident<$($param:ident),*>),*) => {
        $(
            impl<$($param),*> Checkable for $ty<$($param),*> {
                fn value(&self) -> Value<'_> {
                    Value::Seq { len: self.len() }
                }
            }
        )*
    };
}

impl_checkable_collection!(
    Vec<T>,
    VecDeque<T>,
    LinkedList<T>,
    BTreeSet<T>,
    BTreeMap<K, V>,
    HashSet<T, S>,
    HashMap<K, V, S>
);

impl Checkable for serde_json::Value {
    fn value(&self) -> Value<'_> {
        match self {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(Cow::Borrowed(s.as_str())),
            serde_json::Value::Array(items) => Value::Seq { len: items.len() },
            serde_json::Value::Object(map) => Value::Seq { len: map.len() },
        }
    }
}
