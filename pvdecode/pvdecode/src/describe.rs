//! Diagnostic walk over a record tree.
//!
//! The walker is observational: it never fails. Anything it cannot read is
//! recorded in [`StructureReport::problems`] and logged at `warn` level, and
//! the rest of the tree is still reported.

use std::fmt::{self, Display, Formatter, Write as _};

use pvdecode_core::{FieldKind, PvNode, ScalarType};

use crate::dimension::{DIMENSION_FIELD, axis_size};

/// Everything the walker found in a record tree.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureReport {
    /// Type id of the top-level structure.
    pub id: String,
    pub fields: Vec<FieldReport>,
    pub problems: Vec<String>,
}

/// One field of a structure.
///
/// `offset` is the pvData field offset relative to the enclosing top-level
/// structure, or to the enclosing structure-array element or union
/// alternative for fields found inside those.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    pub name: String,
    pub offset: usize,
    pub detail: FieldDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldDetail {
    Scalar {
        scalar_type: ScalarType,
    },
    ScalarArray {
        element_type: ScalarType,
        length: usize,
    },
    Union {
        variant: bool,
        populated: usize,
        /// Report of the alternative when exactly one is populated.
        selected: Option<Box<FieldReport>>,
    },
    Structure {
        id: String,
        fields: Vec<FieldReport>,
    },
    StructureArray {
        elements: Vec<Vec<FieldReport>>,
        /// Per-element `size` values, collected for `dimension` arrays only.
        sizes: Option<Vec<Option<u32>>>,
    },
}

impl FieldReport {
    pub fn kind(&self) -> FieldKind {
        match self.detail {
            FieldDetail::Scalar { .. } => FieldKind::Scalar,
            FieldDetail::ScalarArray { .. } => FieldKind::ScalarArray,
            FieldDetail::Union { .. } => FieldKind::Union,
            FieldDetail::Structure { .. } => FieldKind::Structure,
            FieldDetail::StructureArray { .. } => FieldKind::StructureArray,
        }
    }
}

impl StructureReport {
    /// Report for a simple or dotted path through nested structures.
    pub fn field(&self, path: &str) -> Option<&FieldReport> {
        let mut fields = self.fields.as_slice();
        let mut found = None;
        for name in path.split('.') {
            let report = fields.iter().find(|f| f.name == name)?;
            fields = match &report.detail {
                FieldDetail::Structure { fields, .. } => fields.as_slice(),
                _ => &[],
            };
            found = Some(report);
        }
        found
    }

    /// Axis sizes collected from the top-level `dimension` array, in source order.
    pub fn dimension_sizes(&self) -> Option<&[Option<u32>]> {
        match &self.field(DIMENSION_FIELD)?.detail {
            FieldDetail::StructureArray { sizes, .. } => sizes.as_deref(),
            _ => None,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Walk every field of `tree` and report kind, type and field offset.
pub fn describe<N: PvNode>(tree: &N) -> StructureReport {
    let mut walker = Walker::default();
    let fields = match tree.kind() {
        FieldKind::Structure => walker.structure_fields(tree, "", 0),
        actual => {
            walker.problem(format!("record root is a {actual}, expected structure"));
            Vec::new()
        }
    };
    for problem in &walker.problems {
        tracing::warn!(%problem, "record structure problem");
    }
    StructureReport {
        id: tree.type_id().to_string(),
        fields,
        problems: walker.problems,
    }
}

#[derive(Default)]
struct Walker {
    problems: Vec<String>,
}

impl Walker {
    fn problem(&mut self, message: String) {
        self.problems.push(message);
    }

    fn structure_fields<N: PvNode>(
        &mut self,
        node: &N,
        path: &str,
        base_offset: usize,
    ) -> Vec<FieldReport> {
        let mut offset = base_offset + 1;
        let mut out = Vec::new();
        for name in node.field_names() {
            let child_path = join_path(path, name);
            let Some(child) = node.child(name) else {
                self.problem(format!("field '{child_path}' is listed but cannot be read"));
                continue;
            };
            if let Some(report) = self.field(child, name, &child_path, offset) {
                out.push(report);
            }
            offset += child.number_fields();
        }
        out
    }

    fn field<N: PvNode>(
        &mut self,
        node: &N,
        name: &str,
        path: &str,
        offset: usize,
    ) -> Option<FieldReport> {
        let detail = match node.kind() {
            FieldKind::Scalar => {
                let Some(value) = node.scalar() else {
                    self.problem(format!("scalar '{path}' has no value"));
                    return None;
                };
                FieldDetail::Scalar {
                    scalar_type: value.scalar_type(),
                }
            }
            FieldKind::ScalarArray => {
                let Some(view) = node.array() else {
                    self.problem(format!("scalarArray '{path}' has no values"));
                    return None;
                };
                FieldDetail::ScalarArray {
                    element_type: view.scalar_type(),
                    length: view.len(),
                }
            }
            FieldKind::Union => {
                let selection = node.union_selection();
                let selected = match selection.as_slice() {
                    [(alternative_name, alternative)] => {
                        let label = if alternative_name.is_empty() {
                            "any"
                        } else {
                            *alternative_name
                        };
                        let alternative_path = format!("{path}<{label}>");
                        self.field(*alternative, label, &alternative_path, 0)
                            .map(Box::new)
                    }
                    other => {
                        self.problem(format!(
                            "union '{path}' has {} populated fields, expected 1",
                            other.len()
                        ));
                        None
                    }
                };
                FieldDetail::Union {
                    variant: node.is_variant_union(),
                    populated: selection.len(),
                    selected,
                }
            }
            FieldKind::Structure => FieldDetail::Structure {
                id: node.type_id().to_string(),
                fields: self.structure_fields(node, path, offset),
            },
            FieldKind::StructureArray => {
                let mut sizes = (name == DIMENSION_FIELD).then(Vec::new);
                let mut elements = Vec::new();
                for (index, element) in node.elements().into_iter().enumerate() {
                    let element_path = format!("{path}[{index}]");
                    elements.push(self.structure_fields(element, &element_path, 0));
                    if let Some(sizes) = sizes.as_mut() {
                        match axis_size(index, element) {
                            Ok(size) => sizes.push(Some(size)),
                            Err(err) => {
                                self.problem(format!("{element_path}: {err}"));
                                sizes.push(None);
                            }
                        }
                    }
                }
                FieldDetail::StructureArray { elements, sizes }
            }
        };
        Some(FieldReport {
            name: name.to_string(),
            offset,
            detail,
        })
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

impl Display for StructureReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for field in &self.fields {
            format_field(field, 0, &mut out)?;
        }
        if !self.problems.is_empty() {
            writeln!(out, "problems:")?;
            for problem in &self.problems {
                writeln!(out, "    - {problem}")?;
            }
        }
        f.write_str(&out)
    }
}

fn format_field(field: &FieldReport, indent: usize, out: &mut String) -> fmt::Result {
    let pad = " ".repeat(indent);
    let name = &field.name;
    let offset = field.offset;

    match &field.detail {
        FieldDetail::Scalar { scalar_type } => writeln!(
            out,
            "{pad}{name}: {{ kind: scalar, type: {scalar_type}, offset: {offset} }}"
        ),
        FieldDetail::ScalarArray {
            element_type,
            length,
        } => writeln!(
            out,
            "{pad}{name}: {{ kind: scalarArray, type: {element_type}, length: {length}, offset: {offset} }}"
        ),
        FieldDetail::Union {
            variant,
            populated,
            selected,
        } => {
            writeln!(out, "{pad}{name}:")?;
            writeln!(out, "{pad}    kind: union")?;
            writeln!(out, "{pad}    offset: {offset}")?;
            writeln!(out, "{pad}    variant: {variant}")?;
            writeln!(out, "{pad}    populated: {populated}")?;
            if let Some(selected) = selected {
                writeln!(out, "{pad}    selected:")?;
                format_field(selected, indent + 8, out)?;
            }
            Ok(())
        }
        FieldDetail::Structure { id, fields } => {
            writeln!(out, "{pad}{name}:")?;
            writeln!(out, "{pad}    kind: structure")?;
            if !id.is_empty() {
                writeln!(out, "{pad}    id: {id}")?;
            }
            writeln!(out, "{pad}    offset: {offset}")?;
            writeln!(out, "{pad}    fields:")?;
            for child in fields {
                format_field(child, indent + 8, out)?;
            }
            Ok(())
        }
        FieldDetail::StructureArray { elements, sizes } => {
            writeln!(out, "{pad}{name}:")?;
            writeln!(out, "{pad}    kind: structureArray")?;
            writeln!(out, "{pad}    offset: {offset}")?;
            writeln!(out, "{pad}    length: {}", elements.len())?;
            if let Some(sizes) = sizes {
                let rendered: Vec<String> = sizes
                    .iter()
                    .map(|s| s.map_or_else(|| "?".to_string(), |n| n.to_string()))
                    .collect();
                writeln!(out, "{pad}    sizes: [{}]", rendered.join(", "))?;
            }
            writeln!(out, "{pad}    elements:")?;
            for (index, element) in elements.iter().enumerate() {
                writeln!(out, "{pad}        [{index}]:")?;
                for child in element {
                    format_field(child, indent + 12, out)?;
                }
            }
            Ok(())
        }
    }
}
