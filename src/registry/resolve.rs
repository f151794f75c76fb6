//! Type name resolution
//!
//! Grammar: a bare type name decorated with optional suffixes, composing
//! left-to-right: `[]` (sequence), `?` (optional), `$` (binary extension).
//! Suffixes are stripped right-to-left and reattached as wrappers around the
//! resolved base shape. Alias chains are followed transitively with an
//! iteration budget equal to the alias count, so resolution always
//! terminates even on a cyclic document.

use std::collections::HashMap;

use super::errors::TypeError;
use super::shape::{Primitive, Shape, StructId, VariantId};

/// Read-only view of the registry's name tables, used during both the
/// build pass and call-time resolution.
pub(crate) struct ResolveCtx<'a> {
    pub aliases: &'a HashMap<String, String>,
    pub struct_ids: &'a HashMap<String, StructId>,
    pub variant_ids: &'a HashMap<String, VariantId>,
}

impl ResolveCtx<'_> {
    /// Resolves a possibly-decorated type name to a shape.
    pub fn resolve(&self, type_name: &str) -> Result<Shape, TypeError> {
        // One extra step so a single alias to a concrete type resolves.
        self.resolve_bounded(type_name, self.aliases.len() + 1)
    }

    fn resolve_bounded(&self, type_name: &str, fuel: usize) -> Result<Shape, TypeError> {
        let type_name = type_name.trim();

        if let Some(rest) = type_name.strip_suffix('$') {
            return Ok(Shape::Extension(Box::new(self.resolve_bounded(rest, fuel)?)));
        }
        if let Some(rest) = type_name.strip_suffix("[]") {
            return Ok(Shape::Array(Box::new(self.resolve_bounded(rest, fuel)?)));
        }
        if let Some(rest) = type_name.strip_suffix('?') {
            return Ok(Shape::Optional(Box::new(self.resolve_bounded(rest, fuel)?)));
        }

        if let Some(primitive) = Primitive::lookup(type_name) {
            return Ok(Shape::Primitive(primitive));
        }
        if let Some(&id) = self.struct_ids.get(type_name) {
            return Ok(Shape::Struct(id));
        }
        if let Some(&id) = self.variant_ids.get(type_name) {
            return Ok(Shape::Variant(id));
        }
        if let Some(target) = self.aliases.get(type_name) {
            if fuel == 0 {
                return Err(TypeError::CyclicAlias(type_name.to_string()));
            }
            return self.resolve_bounded(target, fuel - 1);
        }

        Err(TypeError::Unresolved(type_name.to_string()))
    }

    /// Resolves a name to its bare form, following aliases but keeping
    /// decorations an error. Used for struct base lookups, where the target
    /// must be a plain struct name.
    pub fn resolve_struct_name(&self, type_name: &str) -> Result<Option<StructId>, TypeError> {
        let mut current = type_name.trim();
        for _ in 0..=self.aliases.len() {
            if let Some(&id) = self.struct_ids.get(current) {
                return Ok(Some(id));
            }
            match self.aliases.get(current) {
                Some(target) => current = target.trim(),
                None => return Ok(None),
            }
        }
        Err(TypeError::CyclicAlias(type_name.to_string()))
    }
}
