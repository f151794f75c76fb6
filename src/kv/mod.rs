//! Key-Value Table Schema
//!
//! A key-value table names a struct row type, exactly one primary index and
//! any number of named secondary indices. This module only validates the
//! declaration and exposes the resolved index shapes; reading and writing
//! rows belongs to whatever storage layer consumes them.
//!
//! # Invariants
//!
//! - Index names are unique within a table; no secondary shares the
//!   primary's name
//! - Every index type resolves to a legal key type
//! - The row type resolves to a struct

use std::collections::BTreeMap;

use tracing::trace;

use crate::abi::KvTableDef;
use crate::name::Name;
use crate::registry::{Primitive, SchemaError, SchemaResult, Shape, TypeError};

/// Resolver capability handed in by the registry build.
pub type ResolveFn<'a> = dyn Fn(&str) -> Result<Shape, TypeError> + 'a;

/// Whether a primitive has a canonical, totally-ordered key encoding.
///
/// Fixed-width integers, names, strings (byte-wise order, index use only)
/// and fixed-size digests qualify. Floats do not (NaN breaks total order),
/// nor do the 128-bit integers or any container shape.
pub fn is_legal_key_type(primitive: Primitive) -> bool {
    matches!(
        primitive,
        Primitive::Int8
            | Primitive::Int16
            | Primitive::Int32
            | Primitive::Int64
            | Primitive::Uint8
            | Primitive::Uint16
            | Primitive::Uint32
            | Primitive::Uint64
            | Primitive::Name
            | Primitive::String
            | Primitive::Checksum160
            | Primitive::Checksum256
            | Primitive::Checksum512
    )
}

/// One resolved index of a key-value table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvIndexShape {
    pub name: String,
    /// Key type as declared in the document
    pub type_name: String,
    pub key_type: Primitive,
}

/// Resolved declaration of one key-value table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvTableShape {
    pub name: Name,
    /// Row type as declared in the document
    pub row_type: String,
    /// Arena id of the resolved row struct
    pub row_struct: crate::registry::StructId,
    pub primary: KvIndexShape,
    /// Secondary indices ordered by name
    pub secondaries: BTreeMap<String, KvIndexShape>,
}

fn validate_index(
    resolve: &ResolveFn<'_>,
    table: &str,
    index_name: &str,
    type_name: &str,
) -> SchemaResult<KvIndexShape> {
    // Index names use the same identifier charset as table names.
    index_name.parse::<Name>()?;

    let illegal = || SchemaError::IllegalKeyType {
        table: table.to_string(),
        index: index_name.to_string(),
        type_name: type_name.to_string(),
    };

    let shape = resolve(type_name).map_err(|e| match e {
        TypeError::Unresolved(type_name) => SchemaError::UnknownType {
            type_name,
            context: format!("index '{}' of kv table '{}'", index_name, table),
        },
        TypeError::CyclicAlias(name) => SchemaError::CyclicAlias(name),
    })?;

    match shape {
        Shape::Primitive(primitive) if is_legal_key_type(primitive) => Ok(KvIndexShape {
            name: index_name.to_string(),
            type_name: type_name.to_string(),
            key_type: primitive,
        }),
        _ => Err(illegal()),
    }
}

/// Validates one key-value table declaration and returns its resolved shape.
pub fn validate_kv_table(
    resolve: &ResolveFn<'_>,
    table_name: &str,
    def: &KvTableDef,
) -> SchemaResult<KvTableShape> {
    let name: Name = table_name.parse()?;

    let primary = validate_index(resolve, table_name, &def.primary_index.name, &def.primary_index.type_name)?;

    let mut secondaries = BTreeMap::new();
    for (index_name, index) in &def.secondary_indices {
        if *index_name == primary.name {
            return Err(SchemaError::DuplicateName {
                kind: "index",
                name: format!("{}.{}", table_name, index_name),
            });
        }
        let shape = validate_index(resolve, table_name, index_name, &index.type_name)?;
        secondaries.insert(index_name.clone(), shape);
    }

    let row_struct = match resolve(&def.type_name) {
        Ok(Shape::Struct(id)) => id,
        Ok(_) => {
            return Err(SchemaError::UnknownType {
                type_name: def.type_name.clone(),
                context: format!("row type of kv table '{}' (must resolve to a struct)", table_name),
            })
        }
        Err(TypeError::CyclicAlias(alias)) => return Err(SchemaError::CyclicAlias(alias)),
        Err(TypeError::Unresolved(type_name)) => {
            return Err(SchemaError::UnknownType {
                type_name,
                context: format!("row type of kv table '{}'", table_name),
            })
        }
    };

    trace!(table = table_name, secondaries = secondaries.len(), "kv table validated");

    Ok(KvTableShape {
        name,
        row_type: def.type_name.clone(),
        row_struct,
        primary,
        secondaries,
    })
}
