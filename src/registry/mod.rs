//! Type Registry subsystem
//!
//! Builds a frozen registry from an ABI document: validates name uniqueness
//! per namespace, flattens struct inheritance chains, eagerly resolves every
//! referenced type to a shape, and registers actions, tables and key-value
//! tables. After `build` returns, the registry is read-only; concurrent
//! encode/decode calls share it freely.
//!
//! # Invariants
//!
//! - Every name is unique within its namespace
//! - Alias and inheritance chains are acyclic (checked with bounded walks)
//! - Every referenced type resolves at build time
//! - Key-value index types are drawn from the legal key-type set

mod errors;
mod resolve;
mod shape;

pub use errors::{SchemaError, SchemaResult, TypeError};
pub use shape::{FieldShape, Primitive, Shape, StructId, StructShape, VariantId, VariantShape};

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::abi::{self, AbiDef, FieldDef};
use crate::kv::{self, KvTableShape};
use crate::name::Name;
use resolve::ResolveCtx;

/// Frozen table of named types, records and key-value tables.
#[derive(Debug)]
pub struct TypeRegistry {
    version: String,
    aliases: HashMap<String, String>,
    struct_ids: HashMap<String, StructId>,
    variant_ids: HashMap<String, VariantId>,
    structs: Vec<StructShape>,
    variants: Vec<VariantShape>,
    actions: BTreeMap<Name, String>,
    tables: BTreeMap<Name, String>,
    kv_tables: BTreeMap<Name, KvTableShape>,
}

/// Maps a resolution failure to a build error, attaching the referencing
/// context to unknown-type failures.
fn lift(err: TypeError, context: impl FnOnce() -> String) -> SchemaError {
    match err {
        TypeError::Unresolved(type_name) => SchemaError::UnknownType {
            type_name,
            context: context(),
        },
        TypeError::CyclicAlias(name) => SchemaError::CyclicAlias(name),
    }
}

fn claim<'a>(
    seen: &mut HashSet<&'a str>,
    kind: &'static str,
    name: &'a str,
) -> SchemaResult<()> {
    if Primitive::lookup(name).is_some() || !seen.insert(name) {
        return Err(SchemaError::DuplicateName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

impl TypeRegistry {
    /// Builds a registry from a parsed ABI document.
    pub fn build(abi: &AbiDef) -> SchemaResult<Self> {
        if !abi::is_supported_version(&abi.version) {
            return Err(SchemaError::UnsupportedVersion(abi.version.clone()));
        }

        // Uniqueness within the type namespace (aliases, structs, variants
        // and primitives share it).
        let mut seen = HashSet::new();
        for alias in &abi.types {
            claim(&mut seen, "type alias", &alias.new_type_name)?;
        }
        for def in &abi.structs {
            claim(&mut seen, "struct", &def.name)?;
        }
        for def in &abi.variants {
            claim(&mut seen, "variant", &def.name)?;
        }

        let aliases: HashMap<String, String> = abi
            .types
            .iter()
            .map(|t| (t.new_type_name.clone(), t.type_name.clone()))
            .collect();
        let struct_ids: HashMap<String, StructId> = abi
            .structs
            .iter()
            .enumerate()
            .map(|(id, def)| (def.name.clone(), id))
            .collect();
        let variant_ids: HashMap<String, VariantId> = abi
            .variants
            .iter()
            .enumerate()
            .map(|(id, def)| (def.name.clone(), id))
            .collect();

        let ctx = ResolveCtx {
            aliases: &aliases,
            struct_ids: &struct_ids,
            variant_ids: &variant_ids,
        };

        // Every alias target must itself resolve; this also surfaces alias
        // cycles that no struct or variant references.
        for alias in &abi.types {
            ctx.resolve(&alias.type_name)
                .map_err(|e| lift(e, || format!("type alias '{}'", alias.new_type_name)))?;
        }

        // Flatten inheritance chains, then resolve each flattened field.
        let mut structs = Vec::with_capacity(abi.structs.len());
        for def in &abi.structs {
            let flattened = flatten_struct(abi, &ctx, def)?;

            let mut field_names = HashSet::new();
            let mut fields = Vec::with_capacity(flattened.len());
            for field in flattened {
                if !field_names.insert(field.name.clone()) {
                    return Err(SchemaError::DuplicateName {
                        kind: "field",
                        name: format!("{}.{}", def.name, field.name),
                    });
                }
                let shape = ctx.resolve(&field.type_name).map_err(|e| {
                    lift(e, || format!("field '{}' of struct '{}'", field.name, def.name))
                })?;
                fields.push(FieldShape {
                    name: field.name,
                    type_name: field.type_name,
                    shape,
                });
            }
            structs.push(StructShape {
                name: def.name.clone(),
                fields,
            });
        }

        let mut variants = Vec::with_capacity(abi.variants.len());
        for def in &abi.variants {
            let mut member_names = HashSet::new();
            let mut members = Vec::with_capacity(def.types.len());
            for member in &def.types {
                if !member_names.insert(member.as_str()) {
                    return Err(SchemaError::DuplicateName {
                        kind: "variant member",
                        name: format!("{}.{}", def.name, member),
                    });
                }
                let shape = ctx.resolve(member).map_err(|e| {
                    lift(e, || format!("member '{}' of variant '{}'", member, def.name))
                })?;
                members.push((member.clone(), shape));
            }
            variants.push(VariantShape {
                name: def.name.clone(),
                members,
            });
        }

        let mut actions = BTreeMap::new();
        for def in &abi.actions {
            let action_name: Name = def.name.parse()?;
            if actions.contains_key(&action_name) {
                return Err(SchemaError::DuplicateName {
                    kind: "action",
                    name: def.name.clone(),
                });
            }
            ctx.resolve(&def.type_name)
                .map_err(|e| lift(e, || format!("action '{}'", def.name)))?;
            actions.insert(action_name, def.type_name.clone());
        }

        let mut tables = BTreeMap::new();
        for def in &abi.tables {
            let table_name: Name = def.name.parse()?;
            if tables.contains_key(&table_name) {
                return Err(SchemaError::DuplicateName {
                    kind: "table",
                    name: def.name.clone(),
                });
            }
            ctx.resolve(&def.type_name)
                .map_err(|e| lift(e, || format!("table '{}'", def.name)))?;
            for key_type in &def.key_types {
                ctx.resolve(key_type)
                    .map_err(|e| lift(e, || format!("key of table '{}'", def.name)))?;
            }
            tables.insert(table_name, def.type_name.clone());
        }

        let mut kv_tables = BTreeMap::new();
        for (table_name, def) in &abi.kv_tables {
            let shape = kv::validate_kv_table(&|name| ctx.resolve(name), table_name, def)?;
            kv_tables.insert(shape.name, shape);
        }

        debug!(
            aliases = aliases.len(),
            structs = structs.len(),
            variants = variants.len(),
            actions = actions.len(),
            tables = tables.len(),
            kv_tables = kv_tables.len(),
            "type registry built"
        );

        Ok(TypeRegistry {
            version: abi.version.clone(),
            aliases,
            struct_ids,
            variant_ids,
            structs,
            variants,
            actions,
            tables,
            kv_tables,
        })
    }

    /// Document version this registry was built from.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Resolves a possibly-decorated type name. Pure read; safe to call
    /// concurrently.
    pub fn resolve(&self, type_name: &str) -> Result<Shape, TypeError> {
        let ctx = ResolveCtx {
            aliases: &self.aliases,
            struct_ids: &self.struct_ids,
            variant_ids: &self.variant_ids,
        };
        ctx.resolve(type_name)
    }

    /// Looks up a struct arena entry.
    pub fn struct_shape(&self, id: StructId) -> &StructShape {
        &self.structs[id]
    }

    /// Looks up a variant arena entry.
    pub fn variant_shape(&self, id: VariantId) -> &VariantShape {
        &self.variants[id]
    }

    /// Struct arena id for a bare struct name.
    pub fn struct_id(&self, name: &str) -> Option<StructId> {
        self.struct_ids.get(name).copied()
    }

    /// Argument type of a registered action.
    pub fn action_type(&self, action: Name) -> Option<&str> {
        self.actions.get(&action).map(String::as_str)
    }

    /// Row type of a registered (legacy) table.
    pub fn table_type(&self, table: Name) -> Option<&str> {
        self.tables.get(&table).map(String::as_str)
    }

    /// All registered key-value tables, ordered by table name.
    pub fn kv_tables(&self) -> &BTreeMap<Name, KvTableShape> {
        &self.kv_tables
    }

    /// One registered key-value table.
    pub fn kv_table(&self, table: Name) -> Option<&KvTableShape> {
        self.kv_tables.get(&table)
    }
}

/// Walks a struct's base chain and returns its flattened field list,
/// base fields first. Bounded by the struct count.
fn flatten_struct(
    abi: &AbiDef,
    ctx: &ResolveCtx<'_>,
    def: &abi::StructDef,
) -> SchemaResult<Vec<FieldDef>> {
    let mut chain = vec![def];
    let mut current = def;

    while !current.base.is_empty() {
        if chain.len() > abi.structs.len() {
            return Err(SchemaError::CyclicInheritance(def.name.clone()));
        }
        let base_id = ctx
            .resolve_struct_name(&current.base)
            .map_err(|_| SchemaError::CyclicAlias(current.base.clone()))?
            .ok_or_else(|| SchemaError::UnknownType {
                type_name: current.base.clone(),
                context: format!("base of struct '{}' (must name a struct)", current.name),
            })?;
        current = &abi.structs[base_id];
        chain.push(current);
    }

    Ok(chain
        .iter()
        .rev()
        .flat_map(|s| s.fields.iter().cloned())
        .collect())
}
