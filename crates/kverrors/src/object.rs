//! Field-protocol marshaling for sinks richer than plain JSON.
//!
//! A sink that speaks a typed field protocol implements [`ObjectEncoder`];
//! anything that can describe itself as fields implements
//! [`ObjectMarshaler`].

use crate::kv::Attrs;
use crate::value::Value;

/// Receives fields from an [`ObjectMarshaler`].
pub trait ObjectEncoder {
    /// Add a plain attribute value.
    fn add_value(&mut self, key: &str, value: &Value);

    /// Add a nested object, keeping its structure.
    fn add_object(&mut self, key: &str, object: &dyn ObjectMarshaler);
}

/// Something that can emit itself as a set of fields.
pub trait ObjectMarshaler {
    /// Emit every field into `encoder`.
    fn marshal_log_object(&self, encoder: &mut dyn ObjectEncoder);
}

/// An [`ObjectEncoder`] that collects fields into an attribute map.
///
/// Nested objects become `Value::Map` entries.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapObjectEncoder {
    fields: Attrs,
}

impl MapObjectEncoder {
    /// An empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marshal `object` into a fresh map.
    pub fn encode(object: &dyn ObjectMarshaler) -> Attrs {
        let mut encoder = Self::new();
        object.marshal_log_object(&mut encoder);
        encoder.into_fields()
    }

    /// The collected fields.
    pub const fn fields(&self) -> &Attrs {
        &self.fields
    }

    /// Consume the encoder and return the collected fields.
    pub fn into_fields(self) -> Attrs {
        self.fields
    }
}

impl ObjectEncoder for MapObjectEncoder {
    fn add_value(&mut self, key: &str, value: &Value) {
        self.fields.insert(key.to_string(), value.clone());
    }

    fn add_object(&mut self, key: &str, object: &dyn ObjectMarshaler) {
        self.fields
            .insert(key.to_string(), Value::Map(Self::encode(object)));
    }
}
