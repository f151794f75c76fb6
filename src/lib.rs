//! abicodec - a strict, schema-driven binary codec
//!
//! Converts structured data between a compact binary wire format and a
//! dynamic, self-describing in-memory value, driven entirely by a
//! runtime-loaded ABI document rather than compiled type information.
//!
//! # Design Principles
//!
//! - Schema loaded once, resolved eagerly, frozen afterwards
//! - Deterministic: identical inputs always produce identical bytes
//! - Fail-fast: malformed schemas or payloads abort with typed errors
//! - Bounded: alias/inheritance chains, recursion depth and wall-clock
//!   budget are all explicitly limited

pub mod abi;
pub mod checksum;
pub mod cli;
pub mod codec;
pub mod kv;
pub mod name;
pub mod records;
pub mod registry;
pub mod serializer;
pub mod time;
pub mod variant;

pub use abi::AbiDef;
pub use codec::{CodecError, Deadline};
pub use name::Name;
pub use registry::{SchemaError, Shape, TypeError, TypeRegistry};
pub use serializer::{AbiSerializer, SerializerError, ShapeResolver, StructuredRecord};
pub use variant::Value;
