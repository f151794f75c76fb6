//! ABI document model
//!
//! The schema document is a JSON object describing every named type, action
//! and table for one contract. Sequences are ordered and order is
//! significant: struct field order defines wire order, variant member order
//! defines tag values. Unknown top-level fields are tolerated so newer
//! documents remain loadable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Version prefix accepted by the registry.
pub const SUPPORTED_VERSION_PREFIX: &str = "eosio::abi/1.";

/// Returns whether a version string names a protocol revision this codec
/// understands.
pub fn is_supported_version(version: &str) -> bool {
    version.starts_with(SUPPORTED_VERSION_PREFIX)
}

/// Type alias: `new_type_name` becomes another spelling of `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub new_type_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One field of a struct definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Struct definition with optional single-inheritance base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl StructDef {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            base: String::new(),
            fields,
        }
    }

    pub fn with_base(name: impl Into<String>, base: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            fields,
        }
    }
}

/// Variant (tagged union) definition. Tag value = member position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDef {
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Binds an action name to the struct type of its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub ricardian_contract: String,
}

/// Legacy single-key table definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    #[serde(default)]
    pub index_type: String,
    #[serde(default)]
    pub key_names: Vec<String>,
    #[serde(default)]
    pub key_types: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Primary index of a key-value table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvPrimaryIndexDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A named secondary index of a key-value table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvSecondaryIndexDef {
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Key-value table: a row type addressed by one primary index and any
/// number of named secondary indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvTableDef {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub primary_index: KvPrimaryIndexDef,
    #[serde(default, deserialize_with = "unique_keys")]
    pub secondary_indices: BTreeMap<String, KvSecondaryIndexDef>,
}

/// Deserializes a JSON object into a map, rejecting repeated keys.
///
/// Name-keyed maps in the document define identifiers; a repeated key is a
/// conflicting definition, not an override, so it must not collapse
/// last-wins.
fn unique_keys<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: serde::Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueKeys<V>(std::marker::PhantomData<V>);

    impl<'de, V: Deserialize<'de>> serde::de::Visitor<'de> for UniqueKeys<V> {
        type Value = BTreeMap<String, V>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map with unique keys")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            let mut map = BTreeMap::new();
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                if map.insert(key.clone(), value).is_some() {
                    return Err(serde::de::Error::custom(format!("duplicate key '{key}'")));
                }
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueKeys(std::marker::PhantomData))
}

/// Ricardian clause attached to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClausePair {
    pub id: String,
    pub body: String,
}

/// Complete ABI document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiDef {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub structs: Vec<StructDef>,
    #[serde(default)]
    pub variants: Vec<VariantDef>,
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
    #[serde(default, deserialize_with = "unique_keys")]
    pub kv_tables: BTreeMap<String, KvTableDef>,
    #[serde(default)]
    pub ricardian_clauses: Vec<ClausePair>,
    /// Forward-compatible extension payloads: (tag, hex bytes) pairs.
    #[serde(default)]
    pub abi_extensions: Vec<(u16, String)>,
}

impl AbiDef {
    /// Parses an ABI document from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
