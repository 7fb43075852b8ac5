use std::fmt::{Display, Formatter, Result};

/// Structural kind of a node in a pvData record tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    ScalarArray,
    Union,
    Structure,
    StructureArray,
}

impl FieldKind {
    /// Returns `true` for kinds that carry a scalar payload directly.
    pub fn is_leaf(&self) -> bool {
        matches!(self, FieldKind::Scalar | FieldKind::ScalarArray)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::ScalarArray => "scalarArray",
            FieldKind::Union => "union",
            FieldKind::Structure => "structure",
            FieldKind::StructureArray => "structureArray",
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// Scalar encodings a pvData leaf may declare.
///
/// This is the full provider enumeration, including the text encoding that
/// the decoder refuses. See [`ElementType`] for the decodable subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
}

impl ScalarType {
    /// pvData name of the encoding (`"int"`, `"ubyte"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarType::Bool => "boolean",
            ScalarType::I8 => "byte",
            ScalarType::I16 => "short",
            ScalarType::I32 => "int",
            ScalarType::I64 => "long",
            ScalarType::U8 => "ubyte",
            ScalarType::U16 => "ushort",
            ScalarType::U32 => "uint",
            ScalarType::U64 => "ulong",
            ScalarType::F32 => "float",
            ScalarType::F64 => "double",
            ScalarType::String => "string",
        }
    }

    /// The decodable element type, or `None` for the text encoding.
    pub fn element_type(&self) -> Option<ElementType> {
        Some(match self {
            ScalarType::Bool => ElementType::Bool,
            ScalarType::I8 => ElementType::I8,
            ScalarType::I16 => ElementType::I16,
            ScalarType::I32 => ElementType::I32,
            ScalarType::I64 => ElementType::I64,
            ScalarType::U8 => ElementType::U8,
            ScalarType::U16 => ElementType::U16,
            ScalarType::U32 => ElementType::U32,
            ScalarType::U64 => ElementType::U64,
            ScalarType::F32 => ElementType::F32,
            ScalarType::F64 => ElementType::F64,
            ScalarType::String => return None,
        })
    }
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// Fixed-width element encodings that can appear in a decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ElementType {
    pub const ALL: [ElementType; 11] = [
        ElementType::Bool,
        ElementType::I8,
        ElementType::I16,
        ElementType::I32,
        ElementType::I64,
        ElementType::U8,
        ElementType::U16,
        ElementType::U32,
        ElementType::U64,
        ElementType::F32,
        ElementType::F64,
    ];

    /// Canonical width in bytes of one element in a decoded buffer.
    ///
    /// `Bool` is written as a single byte holding 0 or 1.
    pub fn width(&self) -> usize {
        match self {
            ElementType::Bool | ElementType::I8 | ElementType::U8 => 1,
            ElementType::I16 | ElementType::U16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 => 8,
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ElementType::Bool => ScalarType::Bool,
            ElementType::I8 => ScalarType::I8,
            ElementType::I16 => ScalarType::I16,
            ElementType::I32 => ScalarType::I32,
            ElementType::I64 => ScalarType::I64,
            ElementType::U8 => ScalarType::U8,
            ElementType::U16 => ScalarType::U16,
            ElementType::U32 => ScalarType::U32,
            ElementType::U64 => ScalarType::U64,
            ElementType::F32 => ScalarType::F32,
            ElementType::F64 => ScalarType::F64,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.scalar_type().type_name()
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

impl TryFrom<ScalarType> for ElementType {
    type Error = ScalarType;

    fn try_from(value: ScalarType) -> std::result::Result<Self, Self::Error> {
        value.element_type().ok_or(value)
    }
}
