//! Leaf selection shared by the resolver and the extractor.

use pvdecode_core::{ArrayView, DecodeError, FieldKind, PvNode, ScalarValue, Unsupported};

/// Payload of a decodable leaf, after unwrapping a union.
pub(crate) enum LeafPayload<'a> {
    Scalar(ScalarValue),
    Array(ArrayView<'a>),
}

impl LeafPayload<'_> {
    pub(crate) fn kind(&self) -> FieldKind {
        match self {
            LeafPayload::Scalar(_) => FieldKind::Scalar,
            LeafPayload::Array(_) => FieldKind::ScalarArray,
        }
    }

    pub(crate) fn view(&self) -> ArrayView<'_> {
        match self {
            LeafPayload::Scalar(value) => value.as_view(),
            LeafPayload::Array(view) => *view,
        }
    }
}

/// Return the scalar or scalar-array node that carries `node`'s value.
///
/// Errors carry an empty field name; callers that know the path attach it
/// with [`DecodeError::with_field`].
pub(crate) fn leaf_node<N: PvNode>(node: &N) -> Result<&N, DecodeError> {
    match node.kind() {
        FieldKind::Scalar | FieldKind::ScalarArray => Ok(node),
        FieldKind::Union => {
            let selection = node.union_selection();
            let [(_, alternative)] = selection.as_slice() else {
                return Err(DecodeError::unsupported(
                    "",
                    Unsupported::UnionSelection {
                        populated: selection.len(),
                    },
                ));
            };
            match alternative.kind() {
                FieldKind::Scalar | FieldKind::ScalarArray => Ok(*alternative),
                actual @ (FieldKind::Union | FieldKind::Structure | FieldKind::StructureArray) => {
                    Err(DecodeError::unsupported(
                        "",
                        Unsupported::UnionAlternative { actual },
                    ))
                }
            }
        }
        actual @ (FieldKind::Structure | FieldKind::StructureArray) => Err(
            DecodeError::unsupported("", Unsupported::LeafKind { actual }),
        ),
    }
}

pub(crate) fn leaf_payload<N: PvNode>(node: &N) -> Result<LeafPayload<'_>, DecodeError> {
    let leaf = leaf_node(node)?;
    let payload = match leaf.kind() {
        FieldKind::Scalar => leaf.scalar().map(LeafPayload::Scalar),
        _ => leaf.array().map(LeafPayload::Array),
    };
    payload.ok_or_else(|| {
        DecodeError::unsupported(
            "",
            Unsupported::LeafKind {
                actual: leaf.kind(),
            },
        )
    })
}

/// Read an integer scalar and narrow it to `T`, as pvData `getAs<T>` does
/// for integer fields.
pub(crate) fn integer_value<N, T>(node: &N) -> Result<T, Unsupported>
where
    N: PvNode,
    T: TryFrom<i64>,
{
    let value = node.scalar().ok_or(Unsupported::NotScalar {
        actual: node.kind(),
    })?;
    let wide = value.as_i64().ok_or_else(|| {
        if value.is_integer() {
            Unsupported::OutOfRange {
                target: std::any::type_name::<T>(),
            }
        } else {
            Unsupported::NotInteger {
                actual: value.scalar_type(),
            }
        }
    })?;
    T::try_from(wide).map_err(|_| Unsupported::OutOfRange {
        target: std::any::type_name::<T>(),
    })
}

/// Parent node of a dotted path, or `tree` itself for a simple name.
pub(crate) fn parent_of<'a, N: PvNode>(tree: &'a N, path: &str) -> Option<&'a N> {
    match path.rsplit_once('.') {
        Some((parent, _)) => tree.sub_field(parent),
        None => Some(tree),
    }
}
