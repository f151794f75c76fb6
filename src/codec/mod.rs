//! Binary Codec subsystem
//!
//! Shape-driven conversion between structured values and the compact wire
//! format. All multi-byte scalars are little-endian; lengths and variant
//! tags are LEB128.
//!
//! ```text
//! +---------------------+--------------------------------------+
//! | primitive           | fixed width LE / LEB128 / len+bytes  |
//! | sequence  T[]       | varuint32 count, then elements       |
//! | optional  T?        | presence byte (0/1), then value      |
//! | extension T$        | as T; exhausted tail decodes default |
//! | struct              | base-first fields in declared order  |
//! | variant             | varuint32 tag, then member encoding  |
//! +---------------------+--------------------------------------+
//! ```
//!
//! # Invariants
//!
//! - Failures are typed and name the offending field path
//! - No partial output: a failed call returns nothing but the error
//! - Decoding consumes the input exactly; trailing bytes are an error
//! - Recursion depth and wall-clock budget are bounded

mod deadline;
mod errors;
mod varint;

pub use deadline::Deadline;
pub use errors::{CodecError, CodecResult};
pub use varint::{
    decode_varint32, decode_varuint32, encode_varint32, encode_varuint32, VarintFault,
};

use crate::checksum::{Checksum160, Checksum256, Checksum512};
use crate::name::Name;
use crate::registry::{Primitive, Shape, StructId, TypeRegistry, VariantId};
use crate::time::{TimePoint, TimePointSec};
use crate::variant::Value;

/// Maximum nesting of containers/structs/variants in one value.
pub const MAX_RECURSION_DEPTH: usize = 32;

/// Encodes a structured value into its wire form.
pub fn encode(
    registry: &TypeRegistry,
    shape: &Shape,
    value: &Value,
    deadline: Deadline,
) -> CodecResult<Vec<u8>> {
    let mut encoder = Encoder {
        registry,
        deadline,
        depth: 0,
        buf: Vec::new(),
    };
    encoder.encode_value(shape, value, "")?;
    Ok(encoder.buf)
}

/// Decodes a wire-form byte sequence into a structured value.
///
/// The input must contain exactly one value; leftover bytes fail with
/// `TrailingBytes`.
pub fn decode(
    registry: &TypeRegistry,
    shape: &Shape,
    bytes: &[u8],
    deadline: Deadline,
) -> CodecResult<Value> {
    let mut decoder = Decoder {
        registry,
        deadline,
        depth: 0,
        bytes,
        pos: 0,
    };
    let value = decoder.decode_value(shape, "")?;
    if decoder.pos != bytes.len() {
        return Err(CodecError::TrailingBytes {
            remaining: bytes.len() - decoder.pos,
        });
    }
    Ok(value)
}

fn child(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn element(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "$root"
    } else {
        path
    }
}

/// Integer coercion: numeric scalars plus decimal strings (64-bit values
/// are commonly carried as strings in JSON to avoid precision loss).
fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.parse().ok(),
        _ => value.as_i64(),
    }
}

fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        _ => value.as_u64(),
    }
}

fn coerce_i128(value: &Value) -> Option<i128> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Int(i) => Some(*i as i128),
        Value::Uint(u) => Some(*u as i128),
        _ => None,
    }
}

fn coerce_u128(value: &Value) -> Option<u128> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Uint(u) => Some(*u as u128),
        Value::Int(i) => u128::try_from(*i).ok(),
        _ => None,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.parse().ok(),
        _ => value.as_f64(),
    }
}

struct Encoder<'a> {
    registry: &'a TypeRegistry,
    deadline: Deadline,
    depth: usize,
    buf: Vec<u8>,
}

impl<'a> Encoder<'a> {
    fn encode_value(&mut self, shape: &Shape, value: &Value, path: &str) -> CodecResult<()> {
        if self.deadline.is_expired() {
            return Err(CodecError::DeadlineExceeded {
                path: display_path(path).to_string(),
            });
        }
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            self.depth -= 1;
            return Err(CodecError::RecursionDepthExceeded {
                path: display_path(path).to_string(),
                limit: MAX_RECURSION_DEPTH,
            });
        }
        let result = self.dispatch(shape, value, path);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, shape: &Shape, value: &Value, path: &str) -> CodecResult<()> {
        match shape {
            Shape::Primitive(primitive) => self.encode_primitive(*primitive, value, path),
            Shape::Extension(inner) => self.encode_value(inner, value, path),
            Shape::Optional(inner) => {
                if value.is_null() {
                    self.buf.push(0);
                    Ok(())
                } else {
                    self.buf.push(1);
                    self.encode_value(inner, value, path)
                }
            }
            Shape::Array(inner) => {
                let items = value.as_array().ok_or_else(|| {
                    CodecError::mismatch(display_path(path), "array", value.kind())
                })?;
                let count = u32::try_from(items.len()).map_err(|_| {
                    CodecError::mismatch(display_path(path), "at most 2^32-1 elements", "more")
                })?;
                encode_varuint32(&mut self.buf, count);
                for (index, item) in items.iter().enumerate() {
                    self.encode_value(inner, item, &element(path, index))?;
                }
                Ok(())
            }
            Shape::Struct(id) => self.encode_struct(*id, value, path),
            Shape::Variant(id) => self.encode_variant(*id, value, path),
        }
    }

    fn encode_struct(&mut self, id: StructId, value: &Value, path: &str) -> CodecResult<()> {
        let registry = self.registry;
        let shape = registry.struct_shape(id);

        let given = value.as_object().ok_or_else(|| {
            CodecError::mismatch(
                display_path(path),
                format!("object for struct '{}'", shape.name),
                value.kind(),
            )
        })?;

        for (name, _) in given {
            if !shape.fields.iter().any(|f| &f.name == name) {
                return Err(CodecError::mismatch(
                    display_path(path),
                    format!("declared fields of struct '{}'", shape.name),
                    format!("undeclared field '{}'", name),
                ));
            }
        }

        // Fields go out in flattened declaration order. A missing field is
        // only legal if it is a binary-extension field and everything after
        // it is omitted too.
        let mut omitted_extension = false;
        for field in &shape.fields {
            let field_path = child(path, &field.name);
            match value.get(&field.name) {
                Some(field_value) => {
                    if omitted_extension {
                        return Err(CodecError::mismatch(
                            &field_path,
                            "omitted binary-extension tail",
                            "field present after an omitted extension field",
                        ));
                    }
                    self.encode_value(&field.shape, field_value, &field_path)?;
                }
                None => {
                    if matches!(field.shape, Shape::Extension(_)) {
                        omitted_extension = true;
                    } else {
                        return Err(CodecError::mismatch(
                            &field_path,
                            format!("field '{}' of struct '{}'", field.name, shape.name),
                            "missing",
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn encode_variant(&mut self, id: VariantId, value: &Value, path: &str) -> CodecResult<()> {
        let registry = self.registry;
        let shape = registry.variant_shape(id);

        let items = value.as_array().filter(|items| items.len() == 2).ok_or_else(|| {
            CodecError::mismatch(
                display_path(path),
                format!("[member type, value] pair for variant '{}'", shape.name),
                value.kind(),
            )
        })?;
        let member_type = items[0].as_str().ok_or_else(|| {
            CodecError::mismatch(display_path(path), "member type name string", items[0].kind())
        })?;

        let tag = shape.tag_of(member_type).ok_or_else(|| CodecError::InvalidVariantTag {
            path: display_path(path).to_string(),
            tag: member_type.to_string(),
            members: shape.members.len(),
        })?;

        encode_varuint32(&mut self.buf, tag as u32);
        let (_, member_shape) = &shape.members[tag];
        self.encode_value(member_shape, &items[1], &child(path, member_type))
    }

    fn encode_primitive(&mut self, primitive: Primitive, value: &Value, path: &str) -> CodecResult<()> {
        let mismatch =
            |actual: &Value| CodecError::mismatch(display_path(path), primitive.name(), actual.kind());
        let out_of_range = || {
            CodecError::mismatch(display_path(path), primitive.name(), "out-of-range value")
        };

        match primitive {
            Primitive::Bool => {
                let v = value.as_bool().ok_or_else(|| mismatch(value))?;
                self.buf.push(v as u8);
            }
            Primitive::Int8 => {
                let v = coerce_i64(value).ok_or_else(|| mismatch(value))?;
                let v = i8::try_from(v).map_err(|_| out_of_range())?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::Int16 => {
                let v = coerce_i64(value).ok_or_else(|| mismatch(value))?;
                let v = i16::try_from(v).map_err(|_| out_of_range())?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::Int32 => {
                let v = coerce_i64(value).ok_or_else(|| mismatch(value))?;
                let v = i32::try_from(v).map_err(|_| out_of_range())?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::Int64 => {
                let v = coerce_i64(value).ok_or_else(|| mismatch(value))?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::Int128 => {
                let v = coerce_i128(value).ok_or_else(|| mismatch(value))?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::Uint8 => {
                let v = coerce_u64(value).ok_or_else(|| mismatch(value))?;
                let v = u8::try_from(v).map_err(|_| out_of_range())?;
                self.buf.push(v);
            }
            Primitive::Uint16 => {
                let v = coerce_u64(value).ok_or_else(|| mismatch(value))?;
                let v = u16::try_from(v).map_err(|_| out_of_range())?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::Uint32 => {
                let v = coerce_u64(value).ok_or_else(|| mismatch(value))?;
                let v = u32::try_from(v).map_err(|_| out_of_range())?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::Uint64 => {
                let v = coerce_u64(value).ok_or_else(|| mismatch(value))?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::Uint128 => {
                let v = coerce_u128(value).ok_or_else(|| mismatch(value))?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::VarInt32 => {
                let v = coerce_i64(value).ok_or_else(|| mismatch(value))?;
                let v = i32::try_from(v).map_err(|_| out_of_range())?;
                encode_varint32(&mut self.buf, v);
            }
            Primitive::VarUint32 => {
                let v = coerce_u64(value).ok_or_else(|| mismatch(value))?;
                let v = u32::try_from(v).map_err(|_| out_of_range())?;
                encode_varuint32(&mut self.buf, v);
            }
            Primitive::Float32 => {
                let v = coerce_f64(value).ok_or_else(|| mismatch(value))?;
                self.buf.extend_from_slice(&(v as f32).to_le_bytes());
            }
            Primitive::Float64 => {
                let v = coerce_f64(value).ok_or_else(|| mismatch(value))?;
                self.buf.extend_from_slice(&v.to_le_bytes());
            }
            Primitive::String => {
                let s = value.as_str().ok_or_else(|| mismatch(value))?;
                self.put_len_prefixed(s.as_bytes(), path)?;
            }
            Primitive::Bytes => match value {
                Value::Bytes(bytes) => {
                    let bytes = bytes.clone();
                    self.put_len_prefixed(&bytes, path)?;
                }
                Value::String(s) => {
                    let bytes = hex::decode(s).map_err(|_| {
                        CodecError::mismatch(display_path(path), "hex string", "malformed hex")
                    })?;
                    self.put_len_prefixed(&bytes, path)?;
                }
                other => return Err(mismatch(other)),
            },
            Primitive::Name => {
                let s = value.as_str().ok_or_else(|| mismatch(value))?;
                let name: Name = s.parse().map_err(|_| {
                    CodecError::mismatch(display_path(path), "name", format!("'{}'", s))
                })?;
                self.buf.extend_from_slice(&name.to_le_bytes());
            }
            Primitive::Checksum160 => {
                let s = value.as_str().ok_or_else(|| mismatch(value))?;
                let digest: Checksum160 = s.parse().map_err(|e: crate::checksum::ParseChecksumError| {
                    CodecError::mismatch(display_path(path), "checksum160", e.to_string())
                })?;
                self.buf.extend_from_slice(digest.as_bytes());
            }
            Primitive::Checksum256 => {
                let s = value.as_str().ok_or_else(|| mismatch(value))?;
                let digest: Checksum256 = s.parse().map_err(|e: crate::checksum::ParseChecksumError| {
                    CodecError::mismatch(display_path(path), "checksum256", e.to_string())
                })?;
                self.buf.extend_from_slice(digest.as_bytes());
            }
            Primitive::Checksum512 => {
                let s = value.as_str().ok_or_else(|| mismatch(value))?;
                let digest: Checksum512 = s.parse().map_err(|e: crate::checksum::ParseChecksumError| {
                    CodecError::mismatch(display_path(path), "checksum512", e.to_string())
                })?;
                self.buf.extend_from_slice(digest.as_bytes());
            }
            Primitive::TimePoint => {
                let micros = match value {
                    Value::String(s) => {
                        s.parse::<TimePoint>()
                            .map_err(|e| {
                                CodecError::mismatch(display_path(path), "time_point", e.to_string())
                            })?
                            .micros
                    }
                    other => coerce_i64(other).ok_or_else(|| mismatch(other))?,
                };
                self.buf.extend_from_slice(&micros.to_le_bytes());
            }
            Primitive::TimePointSec => {
                let secs = match value {
                    Value::String(s) => {
                        s.parse::<TimePointSec>()
                            .map_err(|e| {
                                CodecError::mismatch(display_path(path), "time_point_sec", e.to_string())
                            })?
                            .secs
                    }
                    other => {
                        let v = coerce_u64(other).ok_or_else(|| mismatch(other))?;
                        u32::try_from(v).map_err(|_| out_of_range())?
                    }
                };
                self.buf.extend_from_slice(&secs.to_le_bytes());
            }
        }
        Ok(())
    }

    fn put_len_prefixed(&mut self, bytes: &[u8], path: &str) -> CodecResult<()> {
        let len = u32::try_from(bytes.len()).map_err(|_| {
            CodecError::mismatch(display_path(path), "at most 2^32-1 bytes", "more")
        })?;
        encode_varuint32(&mut self.buf, len);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

struct Decoder<'a> {
    registry: &'a TypeRegistry,
    deadline: Deadline,
    depth: usize,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize, path: &str) -> CodecResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(CodecError::TruncatedInput {
                path: display_path(path).to_string(),
                needed: n - self.remaining(),
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Fixed-width read, for `from_le_bytes`-style conversions.
    fn take_array<const N: usize>(&mut self, path: &str) -> CodecResult<[u8; N]> {
        let slice = self.take(N, path)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_varuint32(&mut self, path: &str) -> CodecResult<u32> {
        match decode_varuint32(&self.bytes[self.pos..]) {
            Ok((value, consumed)) => {
                self.pos += consumed;
                Ok(value)
            }
            Err(VarintFault::Truncated) => Err(CodecError::TruncatedInput {
                path: display_path(path).to_string(),
                needed: 1,
                remaining: self.remaining(),
            }),
            Err(VarintFault::Overflow) | Err(VarintFault::Overlong) => {
                Err(CodecError::InvalidLengthPrefix {
                    path: display_path(path).to_string(),
                })
            }
        }
    }

    fn read_varint32(&mut self, path: &str) -> CodecResult<i32> {
        match decode_varint32(&self.bytes[self.pos..]) {
            Ok((value, consumed)) => {
                self.pos += consumed;
                Ok(value)
            }
            Err(VarintFault::Truncated) => Err(CodecError::TruncatedInput {
                path: display_path(path).to_string(),
                needed: 1,
                remaining: self.remaining(),
            }),
            Err(VarintFault::Overflow) | Err(VarintFault::Overlong) => {
                Err(CodecError::InvalidLengthPrefix {
                    path: display_path(path).to_string(),
                })
            }
        }
    }

    fn decode_value(&mut self, shape: &Shape, path: &str) -> CodecResult<Value> {
        if self.deadline.is_expired() {
            return Err(CodecError::DeadlineExceeded {
                path: display_path(path).to_string(),
            });
        }
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            self.depth -= 1;
            return Err(CodecError::RecursionDepthExceeded {
                path: display_path(path).to_string(),
                limit: MAX_RECURSION_DEPTH,
            });
        }
        let result = self.dispatch(shape, path);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, shape: &Shape, path: &str) -> CodecResult<Value> {
        match shape {
            Shape::Primitive(primitive) => self.decode_primitive(*primitive, path),
            Shape::Extension(inner) => self.decode_value(inner, path),
            Shape::Optional(inner) => {
                let flag = self.take(1, path)?[0];
                match flag {
                    0 => Ok(Value::Null),
                    1 => self.decode_value(inner, path),
                    other => Err(CodecError::mismatch(
                        display_path(path),
                        "presence flag (0 or 1)",
                        format!("{:#04x}", other),
                    )),
                }
            }
            Shape::Array(inner) => {
                let count = self.read_varuint32(path)?;
                let mut items = Vec::new();
                for index in 0..count {
                    items.push(self.decode_value(inner, &element(path, index as usize))?);
                }
                Ok(Value::Array(items))
            }
            Shape::Struct(id) => self.decode_struct(*id, path),
            Shape::Variant(id) => self.decode_variant(*id, path),
        }
    }

    fn decode_struct(&mut self, id: StructId, path: &str) -> CodecResult<Value> {
        let registry = self.registry;
        let shape = registry.struct_shape(id);

        let mut fields = Vec::with_capacity(shape.fields.len());
        let mut exhausted_tail = false;
        for field in &shape.fields {
            let field_path = child(path, &field.name);

            if !exhausted_tail
                && self.remaining() == 0
                && matches!(field.shape, Shape::Extension(_))
            {
                exhausted_tail = true;
            }

            if exhausted_tail {
                // The defaulting rule covers only a trailing run of
                // extension-marked fields.
                match &field.shape {
                    Shape::Extension(inner) => {
                        let default = self.default_value(inner, &field_path)?;
                        fields.push((field.name.clone(), default));
                    }
                    _ => {
                        return Err(CodecError::TruncatedInput {
                            path: field_path,
                            needed: 1,
                            remaining: 0,
                        })
                    }
                }
            } else {
                let value = self.decode_value(&field.shape, &field_path)?;
                fields.push((field.name.clone(), value));
            }
        }
        Ok(Value::Object(fields))
    }

    fn decode_variant(&mut self, id: VariantId, path: &str) -> CodecResult<Value> {
        let registry = self.registry;
        let shape = registry.variant_shape(id);

        let tag = self.read_varuint32(path)? as usize;
        let (member_type, member_shape) =
            shape.members.get(tag).ok_or_else(|| CodecError::InvalidVariantTag {
                path: display_path(path).to_string(),
                tag: tag.to_string(),
                members: shape.members.len(),
            })?;

        let inner = self.decode_value(member_shape, &child(path, member_type))?;
        Ok(Value::Array(vec![
            Value::String(member_type.clone()),
            inner,
        ]))
    }

    fn default_value(&mut self, shape: &Shape, path: &str) -> CodecResult<Value> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            self.depth -= 1;
            return Err(CodecError::RecursionDepthExceeded {
                path: display_path(path).to_string(),
                limit: MAX_RECURSION_DEPTH,
            });
        }
        let registry = self.registry;
        let result = match shape {
            Shape::Primitive(primitive) => Ok(default_primitive(*primitive)),
            Shape::Optional(_) => Ok(Value::Null),
            Shape::Array(_) => Ok(Value::Array(Vec::new())),
            Shape::Extension(inner) => self.default_value(inner, path),
            Shape::Struct(id) => {
                let struct_shape = registry.struct_shape(*id);
                let mut fields = Vec::with_capacity(struct_shape.fields.len());
                for field in &struct_shape.fields {
                    let default = self.default_value(&field.shape, &child(path, &field.name))?;
                    fields.push((field.name.clone(), default));
                }
                Ok(Value::Object(fields))
            }
            Shape::Variant(id) => {
                let variant_shape = registry.variant_shape(*id);
                match variant_shape.members.first() {
                    Some((member_type, member_shape)) => {
                        let default =
                            self.default_value(member_shape, &child(path, member_type))?;
                        Ok(Value::Array(vec![
                            Value::String(member_type.clone()),
                            default,
                        ]))
                    }
                    None => Err(CodecError::InvalidVariantTag {
                        path: display_path(path).to_string(),
                        tag: "0".to_string(),
                        members: 0,
                    }),
                }
            }
        };
        self.depth -= 1;
        result
    }

    fn decode_primitive(&mut self, primitive: Primitive, path: &str) -> CodecResult<Value> {
        let value = match primitive {
            Primitive::Bool => {
                let byte = self.take(1, path)?[0];
                match byte {
                    0 => Value::Bool(false),
                    1 => Value::Bool(true),
                    other => {
                        return Err(CodecError::mismatch(
                            display_path(path),
                            "bool byte (0 or 1)",
                            format!("{:#04x}", other),
                        ))
                    }
                }
            }
            Primitive::Int8 => Value::Int(i8::from_le_bytes(self.take_array(path)?) as i64),
            Primitive::Int16 => Value::Int(i16::from_le_bytes(self.take_array(path)?) as i64),
            Primitive::Int32 => Value::Int(i32::from_le_bytes(self.take_array(path)?) as i64),
            Primitive::Int64 => Value::Int(i64::from_le_bytes(self.take_array(path)?)),
            Primitive::Int128 => {
                Value::String(i128::from_le_bytes(self.take_array(path)?).to_string())
            }
            Primitive::Uint8 => Value::Uint(self.take(1, path)?[0] as u64),
            Primitive::Uint16 => Value::Uint(u16::from_le_bytes(self.take_array(path)?) as u64),
            Primitive::Uint32 => Value::Uint(u32::from_le_bytes(self.take_array(path)?) as u64),
            Primitive::Uint64 => Value::Uint(u64::from_le_bytes(self.take_array(path)?)),
            Primitive::Uint128 => {
                Value::String(u128::from_le_bytes(self.take_array(path)?).to_string())
            }
            Primitive::VarInt32 => Value::Int(self.read_varint32(path)? as i64),
            Primitive::VarUint32 => Value::Uint(self.read_varuint32(path)? as u64),
            Primitive::Float32 => Value::Float(f32::from_le_bytes(self.take_array(path)?) as f64),
            Primitive::Float64 => Value::Float(f64::from_le_bytes(self.take_array(path)?)),
            Primitive::String => {
                let len = self.read_varuint32(path)? as usize;
                let bytes = self.take(len, path)?;
                let text = std::str::from_utf8(bytes).map_err(|_| {
                    CodecError::mismatch(display_path(path), "UTF-8 string", "invalid UTF-8")
                })?;
                Value::String(text.to_string())
            }
            Primitive::Bytes => {
                let len = self.read_varuint32(path)? as usize;
                Value::Bytes(self.take(len, path)?.to_vec())
            }
            Primitive::Name => {
                Value::String(Name::from_le_bytes(self.take_array(path)?).to_string())
            }
            Primitive::Checksum160 => {
                Value::String(Checksum160(self.take_array(path)?).to_string())
            }
            Primitive::Checksum256 => {
                Value::String(Checksum256(self.take_array(path)?).to_string())
            }
            Primitive::Checksum512 => {
                Value::String(Checksum512(self.take_array(path)?).to_string())
            }
            Primitive::TimePoint => {
                let micros = i64::from_le_bytes(self.take_array(path)?);
                Value::String(TimePoint::from_micros(micros).to_string())
            }
            Primitive::TimePointSec => {
                let secs = u32::from_le_bytes(self.take_array(path)?);
                Value::String(TimePointSec::from_secs(secs).to_string())
            }
        };
        Ok(value)
    }
}

fn default_primitive(primitive: Primitive) -> Value {
    match primitive {
        Primitive::Bool => Value::Bool(false),
        Primitive::Int8 | Primitive::Int16 | Primitive::Int32 | Primitive::Int64 => Value::Int(0),
        Primitive::Uint8 | Primitive::Uint16 | Primitive::Uint32 | Primitive::Uint64 => {
            Value::Uint(0)
        }
        Primitive::Int128 | Primitive::Uint128 => Value::String("0".to_string()),
        Primitive::VarInt32 => Value::Int(0),
        Primitive::VarUint32 => Value::Uint(0),
        Primitive::Float32 | Primitive::Float64 => Value::Float(0.0),
        Primitive::String => Value::String(String::new()),
        Primitive::Bytes => Value::Bytes(Vec::new()),
        Primitive::Name => Value::String(String::new()),
        Primitive::Checksum160 => Value::String(Checksum160::default().to_string()),
        Primitive::Checksum256 => Value::String(Checksum256::default().to_string()),
        Primitive::Checksum512 => Value::String(Checksum512::default().to_string()),
        Primitive::TimePoint => Value::String(TimePoint::from_micros(0).to_string()),
        Primitive::TimePointSec => Value::String(TimePointSec::from_secs(0).to_string()),
    }
}
