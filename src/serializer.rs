//! Variant Bridge
//!
//! `AbiSerializer` ties a frozen [`TypeRegistry`] to the binary codec:
//! `binary_to_variant` and `variant_to_binary` convert between wire bytes
//! and the dynamic structured value by type name. A serializer is immutable
//! once built and safe to share across threads.
//!
//! Native record types plug in through [`StructuredRecord`], which takes an
//! explicit [`ShapeResolver`] capability instead of consulting any global
//! registry.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::abi::AbiDef;
use crate::codec::{self, CodecError, Deadline};
use crate::name::Name;
use crate::registry::{SchemaError, Shape, TypeError, TypeRegistry};
use crate::variant::Value;

/// Any failure from the bridge: schema build, type resolution or codec.
#[derive(Debug, Error)]
pub enum SerializerError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type SerializerResult<T> = Result<T, SerializerError>;

/// Capability to resolve a type name to its shape.
///
/// Passed explicitly to [`StructuredRecord`] conversions so record types
/// never depend on ambient state.
pub trait ShapeResolver {
    fn resolve_shape(&self, type_name: &str) -> Option<Shape>;
}

impl ShapeResolver for TypeRegistry {
    fn resolve_shape(&self, type_name: &str) -> Option<Shape> {
        self.resolve(type_name).ok()
    }
}

impl<F> ShapeResolver for F
where
    F: Fn(&str) -> Option<Shape>,
{
    fn resolve_shape(&self, type_name: &str) -> Option<Shape> {
        self(type_name)
    }
}

/// A native record type that converts to and from the structured form.
pub trait StructuredRecord: Sized {
    /// Structured (field-ordered) form of this record.
    fn to_structured(
        &self,
        resolver: &dyn ShapeResolver,
        deadline: Deadline,
    ) -> SerializerResult<Value>;

    /// Rebuilds the record from its structured form.
    fn from_structured(
        value: &Value,
        resolver: &dyn ShapeResolver,
        deadline: Deadline,
    ) -> SerializerResult<Self>;
}

/// Schema-driven converter between wire bytes and structured values.
#[derive(Debug)]
pub struct AbiSerializer {
    registry: TypeRegistry,
}

impl AbiSerializer {
    /// Builds a serializer from a parsed ABI document.
    pub fn from_abi(abi: &AbiDef) -> SerializerResult<Self> {
        let registry = TypeRegistry::build(abi)?;
        Ok(AbiSerializer { registry })
    }

    /// Builds a serializer from ABI JSON text.
    pub fn from_json(json: &str) -> SerializerResult<Self> {
        let abi = AbiDef::from_json(json).map_err(SchemaError::from)?;
        Self::from_abi(&abi)
    }

    /// Builds a serializer from an ABI JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SerializerResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(SchemaError::from)?;
        let serializer = Self::from_json(&text)?;
        debug!(path = %path.display(), version = serializer.registry.version(), "abi loaded");
        Ok(serializer)
    }

    /// The underlying frozen registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Resolves a possibly-decorated type name.
    pub fn resolve(&self, type_name: &str) -> SerializerResult<Shape> {
        Ok(self.registry.resolve(type_name)?)
    }

    /// Decodes wire bytes of the named type into a structured value.
    ///
    /// The input must be consumed exactly.
    pub fn binary_to_variant(
        &self,
        type_name: &str,
        bytes: &[u8],
        deadline: Deadline,
    ) -> SerializerResult<Value> {
        let shape = self.registry.resolve(type_name)?;
        Ok(codec::decode(&self.registry, &shape, bytes, deadline)?)
    }

    /// Encodes a structured value as the named type's wire form.
    pub fn variant_to_binary(
        &self,
        type_name: &str,
        value: &Value,
        deadline: Deadline,
    ) -> SerializerResult<Vec<u8>> {
        let shape = self.registry.resolve(type_name)?;
        Ok(codec::encode(&self.registry, &shape, value, deadline)?)
    }

    /// Argument type of a registered action.
    pub fn action_type(&self, action: Name) -> Option<&str> {
        self.registry.action_type(action)
    }

    /// Row type of a registered table.
    pub fn table_type(&self, table: Name) -> Option<&str> {
        self.registry.table_type(table)
    }
}

impl ShapeResolver for AbiSerializer {
    fn resolve_shape(&self, type_name: &str) -> Option<Shape> {
        self.registry.resolve(type_name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Primitive;

    const ABI: &str = r#"{
        "version": "eosio::abi/1.1",
        "types": [{"new_type_name": "account", "type": "name"}],
        "structs": [{
            "name": "transfer",
            "base": "",
            "fields": [
                {"name": "from", "type": "account"},
                {"name": "to", "type": "account"},
                {"name": "amount", "type": "uint64"}
            ]
        }],
        "actions": [{"name": "transfer", "type": "transfer", "ricardian_contract": ""}]
    }"#;

    #[test]
    fn test_from_json_builds_registry() {
        let serializer = AbiSerializer::from_json(ABI).unwrap();
        assert_eq!(serializer.registry().version(), "eosio::abi/1.1");
        assert_eq!(
            serializer.resolve("account").unwrap(),
            Shape::Primitive(Primitive::Name)
        );
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = AbiSerializer::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SerializerError::Schema(_)));
    }

    #[test]
    fn test_value_round_trip_by_type_name() {
        let serializer = AbiSerializer::from_json(ABI).unwrap();
        let value = Value::object(vec![
            ("from", Value::String("alice".into())),
            ("to", Value::String("bob".into())),
            ("amount", Value::Uint(100)),
        ]);

        let bytes = serializer
            .variant_to_binary("transfer", &value, Deadline::unlimited())
            .unwrap();
        assert_eq!(bytes.len(), 8 + 8 + 8);

        let decoded = serializer
            .binary_to_variant("transfer", &bytes, Deadline::unlimited())
            .unwrap();
        assert_eq!(decoded, value);

        let bytes2 = serializer
            .variant_to_binary("transfer", &decoded, Deadline::unlimited())
            .unwrap();
        assert_eq!(bytes, bytes2);
    }

    #[test]
    fn test_unknown_type_surfaces_type_error() {
        let serializer = AbiSerializer::from_json(ABI).unwrap();
        let err = serializer
            .binary_to_variant("ghost", &[], Deadline::unlimited())
            .unwrap_err();
        assert!(matches!(err, SerializerError::Type(TypeError::Unresolved(_))));
    }

    #[test]
    fn test_action_lookup() {
        let serializer = AbiSerializer::from_json(ABI).unwrap();
        let action: Name = "transfer".parse().unwrap();
        assert_eq!(serializer.action_type(action), Some("transfer"));
    }

    #[test]
    fn test_from_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abi.json");
        std::fs::write(&path, ABI).unwrap();

        let serializer = AbiSerializer::from_file(&path).unwrap();
        assert_eq!(serializer.registry().version(), "eosio::abi/1.1");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AbiSerializer::from_file("/nonexistent/abi.json").unwrap_err();
        let SerializerError::Schema(schema) = err else {
            panic!("expected schema error");
        };
        assert_eq!(schema.code(), "ABI_IO");
    }

    #[test]
    fn test_closure_resolver_capability() {
        let resolver = |name: &str| -> Option<Shape> {
            Primitive::lookup(name).map(Shape::Primitive)
        };
        assert_eq!(
            resolver.resolve_shape("uint32"),
            Some(Shape::Primitive(Primitive::Uint32))
        );
        assert_eq!(resolver.resolve_shape("ghost"), None);
    }
}
