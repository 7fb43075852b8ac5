use pvdecode_core::{DecodeError, FieldDescriptor, PvNode, Unsupported};

use crate::{
    dimension::declared_rank,
    leaf::{LeafPayload, leaf_payload, parent_of},
};

/// Resolve the element type, element count and rank of `field`.
///
/// Scalars (and unions holding a scalar) have rank 0. Arrays take their
/// rank from the sibling `dimension` field, defaulting to 1. Every call logs
/// the outcome; per-update decoding resolves without logging.
pub fn resolve<N: PvNode>(tree: &N, field: &str) -> Result<FieldDescriptor, DecodeError> {
    let result = resolve_field(tree, field);
    match &result {
        Ok(descriptor) => tracing::info!(
            field,
            kind = %descriptor.kind,
            element_type = %descriptor.element_type,
            element_count = descriptor.element_count,
            rank = descriptor.rank,
            "resolved field"
        ),
        Err(err) => tracing::error!(field, error = %err, "cannot resolve field"),
    }
    result
}

/// [`resolve`] without logging.
pub(crate) fn resolve_field<N: PvNode>(
    tree: &N,
    field: &str,
) -> Result<FieldDescriptor, DecodeError> {
    let node = tree
        .sub_field(field)
        .ok_or_else(|| DecodeError::missing(field))?;
    let payload = leaf_payload(node).map_err(|e| e.with_field(field))?;
    let view = payload.view();
    let element_type = view.scalar_type().element_type().ok_or_else(|| {
        DecodeError::unsupported(
            field,
            Unsupported::TextEncoding {
                kind: payload.kind(),
            },
        )
    })?;

    let (element_count, rank) = match &payload {
        LeafPayload::Scalar(_) => (1, 0),
        LeafPayload::Array(_) => {
            let rank = match parent_of(tree, field) {
                Some(parent) => declared_rank(parent)?.unwrap_or(1),
                None => 1,
            };
            (view.len(), rank)
        }
    };

    Ok(FieldDescriptor {
        kind: node.kind(),
        element_type,
        element_count,
        rank,
    })
}
