//! The value normalizer.
//!
//! Converts any [`Dumpable`] into a [`Dump`]. The first matching rule wins:
//!
//! 1. nil
//! 2. primitive scalar, returned as is
//! 3. byte sequence, as `0x`-prefixed lower-case hex
//! 4. error message
//! 5. display form
//! 6. own JSON encoding, decoded back to a scalar when it is one
//! 7. structure: pointers are followed, records/sequences/maps become JSON
//!    documents, anything else uses its generic string form
//!
//! Normalization never fails. A document that cannot be encoded, or a JSON
//! encoder that errors, is replaced by the error message as a string.
//!
//! Self-referential values are not detected. Without a depth limit they
//! recurse until the stack runs out.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use crate::config::NormalizerConfig;
use crate::error::DumpError;
use crate::shape::{Dumpable, JsonEncodable, Shape};
use crate::value::{Document, Dump};

/// Normalize with the default, unbounded normalizer.
pub fn dump(value: &dyn Dumpable) -> Dump {
    Normalizer::default().dump(value)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    max_depth: Option<usize>,
}

impl Normalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            max_depth: config.max_depth,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn dump(&self, value: &dyn Dumpable) -> Dump {
        match self.dump_at(value, 0) {
            Ok(dump) => dump,
            Err(err) => {
                debug!(error = %err, "dump abandoned");
                Dump::String(err.to_string())
            }
        }
    }

    fn dump_at(&self, value: &dyn Dumpable, depth: usize) -> Result<Dump, DumpError> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(DumpError::DepthExceeded { limit });
            }
        }

        let shape = value.shape();
        if let Some(dump) = scalar(&shape) {
            return Ok(dump);
        }

        // Nil was handled above, so capabilities only ever run on a present value.
        let caps = value.capabilities();
        if let Some(err) = caps.error {
            return Ok(Dump::String(err.to_string()));
        }
        if let Some(display) = caps.display {
            return Ok(Dump::String(display.to_string()));
        }
        if let Some(json) = caps.json {
            return Ok(decode_json(json));
        }

        self.structure(shape, depth)
    }

    fn structure(&self, shape: Shape<'_>, depth: usize) -> Result<Dump, DumpError> {
        match shape {
            Shape::Ref(inner) => self.dump_at(inner, depth + 1),
            Shape::Record(fields) => {
                let mut entries = Vec::with_capacity(fields.len());
                for (name, field) in fields {
                    entries.push((name.to_string(), self.dump_at(field, depth + 1)?));
                }
                Ok(encode_document(&Entries(&entries)))
            }
            Shape::Seq(items) => {
                let items = items
                    .into_iter()
                    .map(|item| self.dump_at(item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(encode_document(&items))
            }
            Shape::Map(map) => {
                // Distinct keys can share a string form, e.g. `None` and
                // `"null"`. The first occurrence keeps its slot, the last
                // value wins.
                let mut entries: Vec<(String, Dump)> = Vec::with_capacity(map.len());
                let mut slots: HashMap<String, usize> = HashMap::with_capacity(map.len());
                for (key, value) in map {
                    let key = self.dump_at(key, depth + 1)?.to_key();
                    let value = self.dump_at(value, depth + 1)?;
                    match slots.entry(key) {
                        Entry::Occupied(slot) => {
                            debug!(key = %slot.key(), "duplicate map key after normalization");
                            entries[*slot.get()].1 = value;
                        }
                        Entry::Vacant(slot) => {
                            entries.push((slot.key().clone(), value));
                            slot.insert(entries.len() - 1);
                        }
                    }
                }
                Ok(encode_document(&Entries(&entries)))
            }
            Shape::Opaque(text) => Ok(Dump::String(text)),
            leaf => Ok(scalar(&leaf).unwrap_or_default()),
        }
    }
}

fn scalar(shape: &Shape<'_>) -> Option<Dump> {
    match shape {
        Shape::Nil => Some(Dump::Null),
        Shape::Bool(b) => Some(Dump::Bool(*b)),
        Shape::Int(i) => Some(Dump::Int(*i)),
        Shape::Float(x) => Some(Dump::Float(*x)),
        Shape::Str(s) => Some(Dump::String(s.to_string())),
        Shape::Bytes(b) => Some(Dump::hex(b)),
        _ => None,
    }
}

/// Object entries serialized in the order given.
struct Entries<'a>(&'a [(String, Dump)]);

impl Serialize for Entries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn encode_document<T: Serialize + ?Sized>(value: &T) -> Dump {
    match Document::encode(value) {
        Ok(doc) => Dump::Document(doc),
        Err(err) => {
            warn!(error = %err, "failed to encode dump document");
            Dump::String(DumpError::from(err).to_string())
        }
    }
}

fn decode_json(json: &dyn JsonEncodable) -> Dump {
    let bytes = match json.encode_json() {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, "JSON encoder failed");
            return Dump::String(DumpError::from(err).to_string());
        }
    };

    match decode_json_bytes(bytes) {
        Ok(dump) => dump,
        Err(err) => {
            warn!(error = %err, "JSON encoder produced unusable output");
            Dump::String(err.to_string())
        }
    }
}

fn decode_json_bytes(bytes: Vec<u8>) -> Result<Dump, DumpError> {
    let text = String::from_utf8(bytes).map_err(|e| DumpError::InvalidJson(e.to_string()))?;
    let parsed: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| DumpError::InvalidJson(e.to_string()))?;

    Ok(match parsed {
        serde_json::Value::String(s) => Dump::String(s),
        serde_json::Value::Bool(b) => Dump::Bool(b),
        serde_json::Value::Number(n) => Dump::from_number(&n),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Dump::Document(Document::from_json(text)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Capabilities;
    use crate::value::{Float, Int};
    use std::fmt;

    struct Shouty;

    impl fmt::Display for Shouty {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("HELLO")
        }
    }

    impl Dumpable for Shouty {
        fn shape(&self) -> Shape<'_> {
            Shape::Opaque("shouty".to_string())
        }

        fn capabilities(&self) -> Capabilities<'_> {
            Capabilities::none().with_display(self)
        }
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(dump(&5u32), Dump::Int(Int::U32(5)));
        assert_eq!(dump(&-5i64), Dump::Int(Int::I64(-5)));
        assert_eq!(dump(&1.5f32), Dump::Float(Float::F32(1.5)));
        assert_eq!(dump(&"foo"), Dump::String("foo".into()));
    }

    #[test]
    fn test_display_beats_opaque() {
        assert_eq!(dump(&Shouty), Dump::String("HELLO".into()));
    }

    #[test]
    fn test_missing_display_value_is_null() {
        assert_eq!(dump(&None::<Shouty>), Dump::Null);
        assert_eq!(dump(&Some(Shouty)), Dump::String("HELLO".into()));
    }

    #[test]
    fn test_decode_json_bytes() {
        assert_eq!(decode_json_bytes(b"42".to_vec()).unwrap(), Dump::Int(Int::I64(42)));
        assert_eq!(decode_json_bytes(b"-1".to_vec()).unwrap(), Dump::Int(Int::I64(-1)));
        assert_eq!(
            decode_json_bytes(b" [1, 2] ".to_vec()).unwrap().to_string(),
            "[1, 2]"
        );
        assert_eq!(decode_json_bytes(b"null".to_vec()).unwrap().to_string(), "null");
        assert!(matches!(
            decode_json_bytes(b"{oops".to_vec()),
            Err(DumpError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let nested = vec![vec![vec![1u16]]];
        assert_eq!(
            Normalizer::with_max_depth(3).dump(&nested).to_string(),
            "[[[1]]]"
        );
        assert_eq!(
            Normalizer::with_max_depth(2).dump(&nested),
            Dump::String("maximum dump depth of 2 exceeded".into())
        );
    }
}
