//! `Dumpable` for primitives, std containers and foreign document types.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::shape::{Capabilities, Dumpable, Shape};
use crate::value::{Dump, Float, Int};

/// Register a named-field struct as a record.
///
/// Fields are listed in declaration order and every field type must itself be
/// `Dumpable`. Capabilities are opted into with a trailing `with [...]` list
/// of `error`, `display` and `json`; the type must implement
/// `std::error::Error`, `Display` or `Serialize` respectively.
///
/// ```
/// use dump_shared::{dump, dumpable_record};
///
/// struct Price {
///     wat: String,
///     val: f64,
/// }
///
/// dumpable_record!(Price { wat, val });
///
/// let price = Price { wat: "ETHUSD".into(), val: 1800.5 };
/// assert_eq!(dump(&price).to_string(), r#"{"wat":"ETHUSD","val":1800.5}"#);
/// ```
#[macro_export]
macro_rules! dumpable_record {
    (@cap $caps:ident, $this:expr, error) => {
        $caps = $caps.with_error($this);
    };
    (@cap $caps:ident, $this:expr, display) => {
        $caps = $caps.with_display($this);
    };
    (@cap $caps:ident, $this:expr, json) => {
        $caps = $caps.with_json($this);
    };
    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::dumpable_record!($ty { $($field),* } with []);
    };
    ($ty:ty { $($field:ident),* $(,)? } with [$($cap:ident),* $(,)?]) => {
        impl $crate::Dumpable for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(vec![
                    $((stringify!($field), &self.$field as &dyn $crate::Dumpable)),*
                ])
            }

            #[allow(unused_mut)]
            fn capabilities(&self) -> $crate::Capabilities<'_> {
                let mut caps = $crate::Capabilities::none();
                $($crate::dumpable_record!(@cap caps, self, $cap);)*
                caps
            }
        }
    };
}

macro_rules! dumpable_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Dumpable for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Int(Int::from(*self))
                }
            }
        )*
    };
}

dumpable_int!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);

impl Dumpable for u8 {
    fn shape(&self) -> Shape<'_> {
        Shape::Int(Int::U8(*self))
    }

    fn as_byte(&self) -> Option<u8> {
        Some(*self)
    }

    fn is_byte_element() -> bool {
        true
    }
}

impl Dumpable for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(Float::F32(*self))
    }
}

impl Dumpable for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(Float::F64(*self))
    }
}

impl Dumpable for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

impl Dumpable for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Borrowed(self))
    }
}

impl Dumpable for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Borrowed(self.as_str()))
    }
}

impl Dumpable for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Borrowed(&**self))
    }
}

impl Dumpable for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Owned(self.to_string()))
    }
}

impl Dumpable for Duration {
    fn shape(&self) -> Shape<'_> {
        Shape::Opaque(format!("{:?}", self))
    }
}

// Pointers carry their pointee's capabilities, the way a reference to a type
// can call that type's methods.
macro_rules! dumpable_pointer {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Dumpable + ?Sized> Dumpable for $ptr {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn capabilities(&self) -> Capabilities<'_> {
                    (**self).capabilities()
                }
            }
        )*
    };
}

dumpable_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: Dumpable> Dumpable for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => Shape::Ref(inner),
            None => Shape::Nil,
        }
    }

    fn capabilities(&self) -> Capabilities<'_> {
        match self {
            Some(inner) => inner.capabilities(),
            None => Capabilities::none(),
        }
    }
}

fn seq_shape<'a, T, I>(items: I) -> Shape<'a>
where
    T: Dumpable + 'a,
    I: Iterator<Item = &'a T>,
{
    if T::is_byte_element() {
        Shape::Bytes(Cow::Owned(items.filter_map(|b| b.as_byte()).collect()))
    } else {
        Shape::Seq(items.map(|item| item as &dyn Dumpable).collect())
    }
}

impl<T: Dumpable> Dumpable for [T] {
    fn shape(&self) -> Shape<'_> {
        seq_shape(self.iter())
    }
}

impl<T: Dumpable, const N: usize> Dumpable for [T; N] {
    fn shape(&self) -> Shape<'_> {
        seq_shape(self.iter())
    }
}

impl<T: Dumpable> Dumpable for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        seq_shape(self.iter())
    }
}

impl<T: Dumpable> Dumpable for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        seq_shape(self.iter())
    }
}

impl<K: Dumpable, V: Dumpable, S: BuildHasher> Dumpable for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(k, v)| (k as &dyn Dumpable, v as &dyn Dumpable))
                .collect(),
        )
    }
}

impl<K: Dumpable, V: Dumpable> Dumpable for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(k, v)| (k as &dyn Dumpable, v as &dyn Dumpable))
                .collect(),
        )
    }
}

// A dump normalizes to itself.
impl Dumpable for Dump {
    fn shape(&self) -> Shape<'_> {
        match self {
            Dump::Null => Shape::Nil,
            Dump::Bool(b) => Shape::Bool(*b),
            Dump::Int(i) => Shape::Int(*i),
            Dump::Float(x) => Shape::Float(*x),
            Dump::String(s) => Shape::Str(Cow::Borrowed(s.as_str())),
            Dump::Hex(s) => match hex::decode(s.strip_prefix("0x").unwrap_or(s)) {
                Ok(bytes) => Shape::Bytes(Cow::Owned(bytes)),
                Err(_) => Shape::Str(Cow::Borrowed(s.as_str())),
            },
            Dump::Document(doc) => Shape::Opaque(doc.to_string()),
        }
    }

    fn capabilities(&self) -> Capabilities<'_> {
        match self {
            Dump::Document(doc) => Capabilities::none().with_json(doc),
            _ => Capabilities::none(),
        }
    }
}

// JSON and TOML objects already have string keys in a fixed order, so they
// are taken apart as records rather than maps.

impl Dumpable for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        use serde_json::Value;

        match self {
            Value::Null => Shape::Nil,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Number(n) => match Dump::from_number(n) {
                Dump::Int(i) => Shape::Int(i),
                Dump::Float(x) => Shape::Float(x),
                other => Shape::Opaque(other.to_string()),
            },
            Value::String(s) => Shape::Str(Cow::Borrowed(s.as_str())),
            Value::Array(items) => Shape::Seq(items.iter().map(|v| v as &dyn Dumpable).collect()),
            Value::Object(map) => Shape::Record(
                map.iter()
                    .map(|(k, v)| (k.as_str(), v as &dyn Dumpable))
                    .collect(),
            ),
        }
    }
}

impl Dumpable for toml::Value {
    fn shape(&self) -> Shape<'_> {
        use toml::Value;

        match self {
            Value::String(s) => Shape::Str(Cow::Borrowed(s.as_str())),
            Value::Integer(i) => Shape::Int(Int::I64(*i)),
            Value::Float(x) => Shape::Float(Float::F64(*x)),
            Value::Boolean(b) => Shape::Bool(*b),
            Value::Datetime(dt) => Shape::Opaque(dt.to_string()),
            Value::Array(items) => Shape::Seq(items.iter().map(|v| v as &dyn Dumpable).collect()),
            Value::Table(table) => Shape::Record(
                table
                    .iter()
                    .map(|(k, v)| (k.as_str(), v as &dyn Dumpable))
                    .collect(),
            ),
        }
    }
}
