//! Read-only capability contract over a provider-owned record tree.

use crate::{
    types::FieldKind,
    value::{ArrayView, ScalarValue},
};

/// A node of a self-describing pvData record tree.
///
/// Providers implement this over whatever representation their client
/// library hands out; [`PvField`](crate::PvField) is the owned
/// implementation. Decoding only ever borrows nodes for the duration of a
/// call.
///
/// Field offsets follow pvData numbering: the node a lookup starts from is
/// offset 0, fields are numbered in depth-first pre-order, and a structure
/// spans `1 + sum(children)` offsets. Structure-array elements and union
/// alternatives are separate trees and are not numbered.
pub trait PvNode: Sized {
    fn kind(&self) -> FieldKind;

    /// Structure type id (`"epics:nt/NTScalar:1.0"`, `"time_t"`, ...).
    fn type_id(&self) -> &str {
        ""
    }

    /// Stored value of a `Scalar` node.
    fn scalar(&self) -> Option<ScalarValue>;

    /// Payload of a `ScalarArray` node.
    fn array(&self) -> Option<ArrayView<'_>>;

    /// Child names of a `Structure` node, in declaration order.
    fn field_names(&self) -> Vec<&str>;

    /// Direct child of a `Structure` node.
    fn child(&self, name: &str) -> Option<&Self>;

    /// Elements of a `StructureArray` node; each is a `Structure`.
    fn elements(&self) -> Vec<&Self>;

    /// Populated alternatives of a `Union` node, as `(name, value)` pairs.
    fn union_selection(&self) -> Vec<(&str, &Self)>;

    /// Whether a `Union` node is a variant union (any type may be stored).
    fn is_variant_union(&self) -> bool {
        false
    }

    /// Look up a simple or dotted (`"timeStamp.nanoseconds"`) path.
    fn sub_field(&self, path: &str) -> Option<&Self> {
        path.split('.').try_fold(self, |node, name| node.child(name))
    }

    /// Number of field offsets this node spans.
    fn number_fields(&self) -> usize {
        match self.kind() {
            FieldKind::Structure => {
                1 + self
                    .field_names()
                    .into_iter()
                    .filter_map(|name| self.child(name))
                    .map(|child| child.number_fields())
                    .sum::<usize>()
            }
            FieldKind::Scalar
            | FieldKind::ScalarArray
            | FieldKind::Union
            | FieldKind::StructureArray => 1,
        }
    }

    /// Random-access lookup by field offset relative to this node.
    fn field_at_offset(&self, offset: usize) -> Option<&Self> {
        if offset == 0 {
            return Some(self);
        }
        if self.kind() != FieldKind::Structure {
            return None;
        }
        let mut next = 1;
        for name in self.field_names() {
            let child = self.child(name)?;
            let span = child.number_fields();
            if offset < next + span {
                return child.field_at_offset(offset - next);
            }
            next += span;
        }
        None
    }

    /// Field offset of the node at `path`, relative to this node.
    fn field_offset_of(&self, path: &str) -> Option<usize> {
        let mut node = self;
        let mut offset = 0;
        for segment in path.split('.') {
            let mut next = offset + 1;
            let mut found = None;
            for name in node.field_names() {
                let child = node.child(name)?;
                if name == segment {
                    found = Some(child);
                    break;
                }
                next += child.number_fields();
            }
            node = found?;
            offset = next;
        }
        Some(offset)
    }
}
