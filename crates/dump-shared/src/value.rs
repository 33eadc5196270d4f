//! Normalized dump values.
//!
//! A `Dump` is what the normalizer hands back: a scalar that callers can use
//! directly, a `0x`-prefixed hex string, or a pre-encoded JSON document that
//! is embedded verbatim when the dump is itself serialized with `serde_json`.

use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

/// Integer scalar, width and signedness preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Int {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
}

impl Int {
    /// Value widened to `i128`, `None` for a `u128` above `i128::MAX`.
    pub fn to_i128(&self) -> Option<i128> {
        match *self {
            Int::I8(v) => Some(v as i128),
            Int::I16(v) => Some(v as i128),
            Int::I32(v) => Some(v as i128),
            Int::I64(v) => Some(v as i128),
            Int::I128(v) => Some(v),
            Int::Isize(v) => Some(v as i128),
            Int::U8(v) => Some(v as i128),
            Int::U16(v) => Some(v as i128),
            Int::U32(v) => Some(v as i128),
            Int::U64(v) => Some(v as i128),
            Int::U128(v) => i128::try_from(v).ok(),
            Int::Usize(v) => Some(v as i128),
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Int::I8(_) | Int::I16(_) | Int::I32(_) | Int::I64(_) | Int::I128(_) | Int::Isize(_)
        )
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Int::I8(v) => write!(f, "{}", v),
            Int::I16(v) => write!(f, "{}", v),
            Int::I32(v) => write!(f, "{}", v),
            Int::I64(v) => write!(f, "{}", v),
            Int::I128(v) => write!(f, "{}", v),
            Int::Isize(v) => write!(f, "{}", v),
            Int::U8(v) => write!(f, "{}", v),
            Int::U16(v) => write!(f, "{}", v),
            Int::U32(v) => write!(f, "{}", v),
            Int::U64(v) => write!(f, "{}", v),
            Int::U128(v) => write!(f, "{}", v),
            Int::Usize(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Int::I8(v) => serializer.serialize_i8(v),
            Int::I16(v) => serializer.serialize_i16(v),
            Int::I32(v) => serializer.serialize_i32(v),
            Int::I64(v) => serializer.serialize_i64(v),
            Int::I128(v) => serializer.serialize_i128(v),
            Int::Isize(v) => serializer.serialize_i64(v as i64),
            Int::U8(v) => serializer.serialize_u8(v),
            Int::U16(v) => serializer.serialize_u16(v),
            Int::U32(v) => serializer.serialize_u32(v),
            Int::U64(v) => serializer.serialize_u64(v),
            Int::U128(v) => serializer.serialize_u128(v),
            Int::Usize(v) => serializer.serialize_u64(v as u64),
        }
    }
}

/// Floating point scalar, width preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    pub fn is_finite(&self) -> bool {
        match *self {
            Float::F32(v) => v.is_finite(),
            Float::F64(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Float::F32(v) => write!(f, "{}", v),
            Float::F64(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // serde_json would silently write `null` for these
        if !self.is_finite() {
            return Err(S::Error::custom(format!("unsupported value: {}", self)));
        }
        match *self {
            Float::F32(v) => serializer.serialize_f32(v),
            Float::F64(v) => serializer.serialize_f64(v),
        }
    }
}

/// Valid, pre-serialized JSON text.
#[derive(Debug, Clone)]
pub struct Document(Box<RawValue>);

impl Document {
    /// Wrap JSON text, rejecting anything that does not parse.
    pub fn from_json(text: String) -> Result<Self, serde_json::Error> {
        RawValue::from_string(text).map(Self)
    }

    /// Encode any serializable value as a document.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::value::to_raw_value(value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    pub fn into_string(self) -> String {
        self.0.get().to_string()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized value.
#[derive(Debug, Clone, PartialEq)]
pub enum Dump {
    Null,
    Bool(bool),
    Int(Int),
    Float(Float),
    String(String),
    /// Lower-case hex with a `0x` prefix.
    Hex(String),
    Document(Document),
}

impl Dump {
    /// Hex form of a byte sequence, `0x` for an empty one.
    pub fn hex(bytes: &[u8]) -> Self {
        Dump::Hex(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Dump::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Text used when this value is a mapping key.
    pub fn to_key(&self) -> String {
        match self {
            Dump::String(s) | Dump::Hex(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Scalar for a JSON number literal. Integers that fit stay integers.
    pub fn from_number(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Dump::Int(Int::I64(i))
        } else if let Some(u) = n.as_u64() {
            Dump::Int(Int::U64(u))
        } else {
            match n.as_f64() {
                Some(x) => Dump::Float(Float::F64(x)),
                None => Dump::String(n.to_string()),
            }
        }
    }
}

impl Default for Dump {
    fn default() -> Self {
        Dump::Null
    }
}

impl fmt::Display for Dump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dump::Null => f.write_str("null"),
            Dump::Bool(b) => write!(f, "{}", b),
            Dump::Int(i) => write!(f, "{}", i),
            Dump::Float(x) => write!(f, "{}", x),
            Dump::String(s) | Dump::Hex(s) => f.write_str(s),
            Dump::Document(doc) => write!(f, "{}", doc),
        }
    }
}

impl Serialize for Dump {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dump::Null => serializer.serialize_unit(),
            Dump::Bool(b) => serializer.serialize_bool(*b),
            Dump::Int(i) => i.serialize(serializer),
            Dump::Float(x) => x.serialize(serializer),
            Dump::String(s) | Dump::Hex(s) => serializer.serialize_str(s),
            Dump::Document(doc) => doc.serialize(serializer),
        }
    }
}

macro_rules! dump_from_int {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Int {
                fn from(v: $ty) -> Self {
                    Int::$variant(v)
                }
            }

            impl From<$ty> for Dump {
                fn from(v: $ty) -> Self {
                    Dump::Int(Int::$variant(v))
                }
            }
        )*
    };
}

dump_from_int! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => Usize,
}

impl From<f32> for Dump {
    fn from(v: f32) -> Self {
        Dump::Float(Float::F32(v))
    }
}

impl From<f64> for Dump {
    fn from(v: f64) -> Self {
        Dump::Float(Float::F64(v))
    }
}

impl From<bool> for Dump {
    fn from(v: bool) -> Self {
        Dump::Bool(v)
    }
}

impl From<String> for Dump {
    fn from(v: String) -> Self {
        Dump::String(v)
    }
}

impl From<&str> for Dump {
    fn from(v: &str) -> Self {
        Dump::String(v.to_string())
    }
}

impl From<Document> for Dump {
    fn from(doc: Document) -> Self {
        Dump::Document(doc)
    }
}
