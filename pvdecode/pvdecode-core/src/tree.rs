//! Owned record tree implementing [`PvNode`].

use crate::{
    node::PvNode,
    types::FieldKind,
    value::{ArrayView, ScalarArray, ScalarValue},
};

/// Owned pvData field.
#[derive(Debug, Clone, PartialEq)]
pub enum PvField {
    Scalar(ScalarValue),
    ScalarArray(ScalarArray),
    Union(PvUnion),
    Structure(PvStructure),
    /// Every element is a [`PvField::Structure`].
    StructureArray(Vec<PvField>),
}

impl PvField {
    pub fn scalar(value: impl Into<ScalarValue>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn array(values: impl Into<ScalarArray>) -> Self {
        Self::ScalarArray(values.into())
    }

    pub fn structure_array(elements: impl IntoIterator<Item = PvStructure>) -> Self {
        Self::StructureArray(elements.into_iter().map(PvField::Structure).collect())
    }
}

impl From<PvStructure> for PvField {
    fn from(value: PvStructure) -> Self {
        Self::Structure(value)
    }
}

impl From<PvUnion> for PvField {
    fn from(value: PvUnion) -> Self {
        Self::Union(value)
    }
}

/// A named member of a structure or union.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedField {
    pub name: String,
    pub field: PvField,
}

impl NamedField {
    pub fn new(name: impl Into<String>, field: impl Into<PvField>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }
}

/// Structure node: ordered named fields plus an optional type id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PvStructure {
    id: String,
    fields: Vec<NamedField>,
}

impl PvStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Append a field. Lookups return the first field with a given name.
    pub fn field(mut self, name: impl Into<String>, field: impl Into<PvField>) -> Self {
        self.fields.push(NamedField::new(name, field));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&PvField> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.field)
    }
}

/// Union node holding the alternatives populated for this update.
///
/// A well-formed update has exactly one; the decoder rejects anything else
/// rather than picking one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PvUnion {
    variant: bool,
    populated: Vec<NamedField>,
}

impl PvUnion {
    /// Empty regular union.
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant (`any`) union holding `field`.
    pub fn variant(field: impl Into<PvField>) -> Self {
        Self {
            variant: true,
            populated: vec![NamedField::new("", field)],
        }
    }

    /// Regular union with alternative `name` selected.
    pub fn select(name: impl Into<String>, field: impl Into<PvField>) -> Self {
        Self::new().with(name, field)
    }

    pub fn with(mut self, name: impl Into<String>, field: impl Into<PvField>) -> Self {
        self.populated.push(NamedField::new(name, field));
        self
    }

    pub fn is_variant(&self) -> bool {
        self.variant
    }

    pub fn populated(&self) -> &[NamedField] {
        &self.populated
    }
}

impl PvNode for PvField {
    fn kind(&self) -> FieldKind {
        match self {
            PvField::Scalar(_) => FieldKind::Scalar,
            PvField::ScalarArray(_) => FieldKind::ScalarArray,
            PvField::Union(_) => FieldKind::Union,
            PvField::Structure(_) => FieldKind::Structure,
            PvField::StructureArray(_) => FieldKind::StructureArray,
        }
    }

    fn type_id(&self) -> &str {
        match self {
            PvField::Structure(s) => s.id(),
            _ => "",
        }
    }

    fn scalar(&self) -> Option<ScalarValue> {
        match self {
            PvField::Scalar(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn array(&self) -> Option<ArrayView<'_>> {
        match self {
            PvField::ScalarArray(v) => Some(v.view()),
            _ => None,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        match self {
            PvField::Structure(s) => s.fields.iter().map(|f| f.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    fn child(&self, name: &str) -> Option<&Self> {
        match self {
            PvField::Structure(s) => s.get(name),
            _ => None,
        }
    }

    fn elements(&self) -> Vec<&Self> {
        match self {
            PvField::StructureArray(elements) => elements.iter().collect(),
            _ => Vec::new(),
        }
    }

    fn union_selection(&self) -> Vec<(&str, &Self)> {
        match self {
            PvField::Union(u) => u
                .populated
                .iter()
                .map(|f| (f.name.as_str(), &f.field))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn is_variant_union(&self) -> bool {
        matches!(self, PvField::Union(u) if u.variant)
    }
}
