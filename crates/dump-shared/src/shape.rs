//! Registration of dumpable types.
//!
//! A type becomes normalizable by implementing [`Dumpable`]. The impl says two
//! things about a value: what it looks like structurally (its [`Shape`]) and
//! which capabilities it exposes (error message, display form, own JSON
//! encoding). The normalizer decides which of these wins; the order in which
//! an impl declares them does not matter.

use serde::Serialize;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use crate::value::{Float, Int};

/// Structural view of a value, one level deep.
pub enum Shape<'a> {
    /// Absent value: `None`, a null JSON value.
    Nil,
    Bool(bool),
    Int(Int),
    Float(Float),
    Str(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    /// One level of indirection.
    Ref(&'a dyn Dumpable),
    /// Named fields in declaration order.
    Record(Vec<(&'a str, &'a dyn Dumpable)>),
    Seq(Vec<&'a dyn Dumpable>),
    /// Key/value entries. Entry order carries no meaning.
    Map(Vec<(&'a dyn Dumpable, &'a dyn Dumpable)>),
    /// Generic string form for anything without a structure of its own.
    Opaque(String),
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Nil => f.write_str("Nil"),
            Shape::Bool(b) => write!(f, "Bool({})", b),
            Shape::Int(i) => write!(f, "Int({:?})", i),
            Shape::Float(x) => write!(f, "Float({:?})", x),
            Shape::Str(s) => write!(f, "Str({:?})", s),
            Shape::Bytes(b) => write!(f, "Bytes(len={})", b.len()),
            Shape::Ref(_) => f.write_str("Ref"),
            Shape::Record(fields) => {
                let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
                write!(f, "Record({:?})", names)
            }
            Shape::Seq(items) => write!(f, "Seq(len={})", items.len()),
            Shape::Map(entries) => write!(f, "Map(len={})", entries.len()),
            Shape::Opaque(s) => write!(f, "Opaque({:?})", s),
        }
    }
}

/// Produces a value's own JSON encoding.
///
/// Implemented for every `Serialize` type, so a `Dumpable` impl only has to
/// opt in through [`Capabilities::with_json`].
pub trait JsonEncodable {
    fn encode_json(&self) -> Result<Vec<u8>, serde_json::Error>;
}

impl<T: Serialize + ?Sized> JsonEncodable for T {
    fn encode_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Capabilities a value exposes. All empty by default.
#[derive(Default, Clone, Copy)]
pub struct Capabilities<'a> {
    pub error: Option<&'a dyn Error>,
    pub display: Option<&'a dyn fmt::Display>,
    pub json: Option<&'a dyn JsonEncodable>,
}

impl<'a> Capabilities<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, error: &'a dyn Error) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_display(mut self, display: &'a dyn fmt::Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_json(mut self, json: &'a dyn JsonEncodable) -> Self {
        self.json = Some(json);
        self
    }
}

impl fmt::Debug for Capabilities<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("error", &self.error.is_some())
            .field("display", &self.display.is_some())
            .field("json", &self.json.is_some())
            .finish()
    }
}

/// A value the normalizer knows how to take apart.
pub trait Dumpable {
    fn shape(&self) -> Shape<'_>;

    fn capabilities(&self) -> Capabilities<'_> {
        Capabilities::none()
    }

    /// The value as a byte, for `u8` only.
    fn as_byte(&self) -> Option<u8> {
        None
    }

    /// Whether slices of this type are byte sequences rather than sequences.
    fn is_byte_element() -> bool
    where
        Self: Sized,
    {
        false
    }
}
