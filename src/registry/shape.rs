//! Resolved type shapes
//!
//! A `Shape` is the closed-form description of a type the codec dispatches
//! on: a primitive codec, an index into the flattened struct/variant arenas,
//! or a container wrapper. Shapes are built once per registry and never
//! mutated afterwards.

/// Index into the registry's struct arena.
pub type StructId = usize;

/// Index into the registry's variant arena.
pub type VariantId = usize;

/// Built-in primitive types with fixed codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    VarInt32,
    VarUint32,
    Float32,
    Float64,
    String,
    Bytes,
    Name,
    Checksum160,
    Checksum256,
    Checksum512,
    TimePoint,
    TimePointSec,
}

impl Primitive {
    /// Looks up a primitive by its type name.
    ///
    /// `sha256` is accepted as a spelling of `checksum256` (the key-value
    /// table fixtures use it).
    pub fn lookup(name: &str) -> Option<Primitive> {
        let p = match name {
            "bool" => Primitive::Bool,
            "int8" => Primitive::Int8,
            "int16" => Primitive::Int16,
            "int32" => Primitive::Int32,
            "int64" => Primitive::Int64,
            "int128" => Primitive::Int128,
            "uint8" => Primitive::Uint8,
            "uint16" => Primitive::Uint16,
            "uint32" => Primitive::Uint32,
            "uint64" => Primitive::Uint64,
            "uint128" => Primitive::Uint128,
            "varint32" => Primitive::VarInt32,
            "varuint32" => Primitive::VarUint32,
            "float32" => Primitive::Float32,
            "float64" => Primitive::Float64,
            "string" => Primitive::String,
            "bytes" => Primitive::Bytes,
            "name" => Primitive::Name,
            "checksum160" => Primitive::Checksum160,
            "checksum256" | "sha256" => Primitive::Checksum256,
            "checksum512" => Primitive::Checksum512,
            "time_point" => Primitive::TimePoint,
            "time_point_sec" => Primitive::TimePointSec,
            _ => return None,
        };
        Some(p)
    }

    /// Canonical type name.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::Int128 => "int128",
            Primitive::Uint8 => "uint8",
            Primitive::Uint16 => "uint16",
            Primitive::Uint32 => "uint32",
            Primitive::Uint64 => "uint64",
            Primitive::Uint128 => "uint128",
            Primitive::VarInt32 => "varint32",
            Primitive::VarUint32 => "varuint32",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::String => "string",
            Primitive::Bytes => "bytes",
            Primitive::Name => "name",
            Primitive::Checksum160 => "checksum160",
            Primitive::Checksum256 => "checksum256",
            Primitive::Checksum512 => "checksum512",
            Primitive::TimePoint => "time_point",
            Primitive::TimePointSec => "time_point_sec",
        }
    }
}

/// Closed-form type description used directly by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Built-in scalar with a fixed codec
    Primitive(Primitive),
    /// Flattened struct, by arena id
    Struct(StructId),
    /// Tagged union, by arena id
    Variant(VariantId),
    /// Ordered sequence (`T[]`)
    Array(Box<Shape>),
    /// Nullable (`T?`)
    Optional(Box<Shape>),
    /// Binary-extension tail field (`T$`)
    Extension(Box<Shape>),
}

/// One field of a flattened struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    pub name: String,
    /// Type name as written in the document (post-flattening)
    pub type_name: String,
    pub shape: Shape,
}

/// Struct with its inheritance chain flattened: base fields first, own
/// fields last, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructShape {
    pub name: String,
    pub fields: Vec<FieldShape>,
}

/// Tagged union; tag value = member position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantShape {
    pub name: String,
    /// (member type name as written, resolved shape)
    pub members: Vec<(String, Shape)>,
}

impl VariantShape {
    /// Finds a member's tag index by its declared type name.
    pub fn tag_of(&self, member_type: &str) -> Option<usize> {
        self.members.iter().position(|(name, _)| name == member_type)
    }
}
