// SPDX-License-Identifier: Apache-2.0

//! Dynamically typed value tree produced by extraction.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;

use crate::tags::Tag;

/// One JSON-model value. Each value owns its payload and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(JsonString),
    Array(Array),
    Object(Object),
}

/// A number together with the width and signedness it was stored with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    /// Float value (only available with float feature)
    #[cfg(feature = "float")]
    F32(f32),
    /// Double value (only available with float feature)
    #[cfg(feature = "float")]
    F64(f64),
}

/// Numeric sub-kind of a `Number`, independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Uint8,
    Int8,
    Uint16,
    Int16,
    Uint32,
    Int32,
    Uint64,
    Int64,
    Float32,
    Float64,
}

impl NumberKind {
    /// The schema tag that stores numbers of this kind.
    pub const fn tag(self) -> Tag {
        match self {
            NumberKind::Uint8 => Tag::Uint8,
            NumberKind::Int8 => Tag::Int8,
            NumberKind::Uint16 => Tag::Uint16,
            NumberKind::Int16 => Tag::Int16,
            NumberKind::Uint32 => Tag::Uint32,
            NumberKind::Int32 => Tag::Int32,
            NumberKind::Uint64 => Tag::Uint64,
            NumberKind::Int64 => Tag::Int64,
            NumberKind::Float32 => Tag::Float,
            NumberKind::Float64 => Tag::Double,
        }
    }
}

impl Number {
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::U8(_) => NumberKind::Uint8,
            Number::I8(_) => NumberKind::Int8,
            Number::U16(_) => NumberKind::Uint16,
            Number::I16(_) => NumberKind::Int16,
            Number::U32(_) => NumberKind::Uint32,
            Number::I32(_) => NumberKind::Int32,
            Number::U64(_) => NumberKind::Uint64,
            Number::I64(_) => NumberKind::Int64,
            #[cfg(feature = "float")]
            Number::F32(_) => NumberKind::Float32,
            #[cfg(feature = "float")]
            Number::F64(_) => NumberKind::Float64,
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self.kind(), NumberKind::Float32 | NumberKind::Float64)
    }

    /// Get the number as a u64 if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::U8(v) => Some(v.into()),
            Number::U16(v) => Some(v.into()),
            Number::U32(v) => Some(v.into()),
            Number::U64(v) => Some(v),
            Number::I8(v) => u64::try_from(v).ok(),
            Number::I16(v) => u64::try_from(v).ok(),
            Number::I32(v) => u64::try_from(v).ok(),
            Number::I64(v) => u64::try_from(v).ok(),
            #[cfg(feature = "float")]
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    /// Get the number as an i64 if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::U8(v) => Some(v.into()),
            Number::U16(v) => Some(v.into()),
            Number::U32(v) => Some(v.into()),
            Number::U64(v) => i64::try_from(v).ok(),
            Number::I8(v) => Some(v.into()),
            Number::I16(v) => Some(v.into()),
            Number::I32(v) => Some(v.into()),
            Number::I64(v) => Some(v),
            #[cfg(feature = "float")]
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    /// Get the number as an f64. 64-bit integers may lose precision.
    #[cfg(feature = "float")]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::U8(v) => v.into(),
            Number::U16(v) => v.into(),
            Number::U32(v) => v.into(),
            Number::U64(v) => v as f64,
            Number::I8(v) => v.into(),
            Number::I16(v) => v.into(),
            Number::I32(v) => v.into(),
            Number::I64(v) => v as f64,
            Number::F32(v) => v.into(),
            Number::F64(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::U8(v) => write!(f, "{v}"),
            Number::I8(v) => write!(f, "{v}"),
            Number::U16(v) => write!(f, "{v}"),
            Number::I16(v) => write!(f, "{v}"),
            Number::U32(v) => write!(f, "{v}"),
            Number::I32(v) => write!(f, "{v}"),
            Number::U64(v) => write!(f, "{v}"),
            Number::I64(v) => write!(f, "{v}"),
            #[cfg(feature = "float")]
            Number::F32(v) => write!(f, "{v}"),
            #[cfg(feature = "float")]
            Number::F64(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! number_from {
    ($($int_ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$int_ty> for Number {
                fn from(v: $int_ty) -> Self {
                    Number::$variant(v)
                }
            }

            impl From<$int_ty> for Value {
                fn from(v: $int_ty) -> Self {
                    Value::Number(Number::$variant(v))
                }
            }
        )*
    };
}

number_from!(
    u8 => U8, i8 => I8, u16 => U16, i16 => I16,
    u32 => U32, i32 => I32, u64 => U64, i64 => I64,
);
#[cfg(feature = "float")]
number_from!(f32 => F32, f64 => F64);

/// An owned, length-delimited byte string.
///
/// Wire strings are raw bytes; nothing checks them for UTF-8 until `as_str`
/// is called.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonString(Vec<u8>);

impl JsonString {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(&self.0)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => fmt::Debug::fmt(s, f),
            Err(_) => f.debug_tuple("JsonString").field(&self.0).finish(),
        }
    }
}

// Lets object lookups hash a plain byte slice; `Vec<u8>` and `[u8]` hash alike.
impl Borrow<[u8]> for JsonString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for JsonString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for JsonString {
    fn from(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }
}

impl From<&[u8]> for JsonString {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for JsonString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl PartialEq<str> for JsonString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for JsonString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

/// An ordered sequence of values.
#[derive(Clone, PartialEq, Default)]
pub struct Array(Vec<Value>);

impl Array {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Allocates room for exactly `capacity` elements up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Member storage: insertion-ordered with hashed lookup.
type Members = IndexMap<JsonString, Value, DefaultHashBuilder>;

/// String-keyed members, kept in insertion order.
#[derive(Clone, PartialEq, Default)]
pub struct Object(Members);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates room for exactly `capacity` members up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Members::with_capacity_and_hasher(
            capacity,
            DefaultHashBuilder::default(),
        ))
    }

    /// Inserts or replaces the member under `key`.
    ///
    /// A duplicate key overwrites the earlier value in place and the old value
    /// is returned; the member keeps its original position.
    pub fn set(&mut self, key: JsonString, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.0.get(key.as_ref())
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.0.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&JsonString, &Value)> {
        self.0.iter()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<JsonString>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (k, v) in iter {
            object.set(k.into(), v);
        }
        object
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&JsonString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The string payload, if this is a string holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_string().and_then(|s| s.as_str().ok())
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// The schema tag this value is encoded under.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Bool,
            Value::Number(n) => n.kind().tag(),
            Value::String(_) => Tag::String,
            Value::Array(_) => Tag::Array,
            Value::Object(_) => Tag::Object,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<JsonString> for Value {
    fn from(s: JsonString) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}
