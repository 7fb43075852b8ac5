//! Per-variable decoding facade.

use pvdecode_core::{
    DecodeError, DecodedPayload, EPICS_EPOCH_OFFSET, FieldDescriptor, PvNode, Shape, Timestamp,
};

use crate::{
    describe::{StructureReport, describe},
    dimension::dimensions,
    extract::extract_field,
    leaf::parent_of,
    resolve::{resolve, resolve_field},
    timestamp::timestamp_with_offset,
};

const DEFAULT_VALUE_FIELD: &str = "value";

/// Decodes the value field of each update delivered for one monitored variable.
///
/// Holds configuration only, so one decoder may be shared across threads.
#[derive(Debug, Clone)]
pub struct PvDecoder {
    value_field: String,
    epoch_offset: i64,
}

/// Builder for configuring [`PvDecoder`].
#[derive(Debug, Clone)]
pub struct PvDecoderBuilder {
    value_field: String,
    epoch_offset: i64,
}

impl PvDecoder {
    /// Create a builder for [`PvDecoder`].
    pub fn builder() -> PvDecoderBuilder {
        PvDecoderBuilder {
            value_field: DEFAULT_VALUE_FIELD.to_string(),
            epoch_offset: EPICS_EPOCH_OFFSET,
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    pub fn epoch_offset(&self) -> i64 {
        self.epoch_offset
    }

    /// Element type, count and rank of the value field, logged at `info`.
    pub fn params<N: PvNode>(&self, tree: &N) -> Result<FieldDescriptor, DecodeError> {
        resolve(tree, &self.value_field)
    }

    /// Bytes the next [`decode`](Self::decode) of `tree` will write.
    pub fn required_len<N: PvNode>(&self, tree: &N) -> Result<usize, DecodeError> {
        Ok(self.params(tree)?.byte_len())
    }

    /// Write the value field into `dest` and resolve its shape.
    ///
    /// Scalars get an empty shape. Arrays get the shape from the sibling
    /// `dimension` field, or `[element_count]` without one. `dest` is left
    /// untouched on error.
    pub fn decode<N: PvNode>(
        &self,
        tree: &N,
        dest: &mut [u8],
    ) -> Result<DecodedPayload, DecodeError> {
        let descriptor = resolve_field(tree, &self.value_field)?;
        let shape = if descriptor.rank == 0 {
            Shape::scalar()
        } else {
            let parent = parent_of(tree, &self.value_field)
                .ok_or_else(|| DecodeError::missing(&self.value_field))?;
            dimensions(parent, descriptor.element_count)?
        };
        let bytes_written = extract_field(tree, &self.value_field, dest)?;

        if descriptor.rank > 0 && shape.element_count() != descriptor.element_count as u64 {
            tracing::warn!(
                field = %self.value_field,
                %shape,
                element_count = descriptor.element_count,
                "shape does not cover the decoded element count"
            );
        }
        tracing::debug!(
            field = %self.value_field,
            element_type = %descriptor.element_type,
            bytes_written,
            %shape,
            "decoded update"
        );

        Ok(DecodedPayload {
            element_type: descriptor.element_type,
            element_count: descriptor.element_count,
            shape,
            bytes_written,
        })
    }

    /// [`decode`](Self::decode) into a freshly sized buffer.
    pub fn decode_to_vec<N: PvNode>(
        &self,
        tree: &N,
    ) -> Result<(Vec<u8>, DecodedPayload), DecodeError> {
        let descriptor = resolve_field(tree, &self.value_field)?;
        let mut buffer = vec![0; descriptor.byte_len()];
        let payload = self.decode(tree, &mut buffer)?;
        Ok((buffer, payload))
    }

    /// Update timestamp shifted by the configured epoch offset.
    pub fn timestamp<N: PvNode>(&self, tree: &N) -> Result<Timestamp, DecodeError> {
        timestamp_with_offset(tree, self.epoch_offset)
    }

    /// Decode payload and timestamp of one update for
    /// [`updates_to_record_batch`](pvdecode_arrow::updates_to_record_batch).
    #[cfg(feature = "arrow")]
    pub fn decode_update<N: PvNode>(
        &self,
        tree: &N,
    ) -> Result<pvdecode_arrow::DecodedUpdate, DecodeError> {
        let timestamp = self.timestamp(tree)?;
        let (bytes, payload) = self.decode_to_vec(tree)?;
        Ok(pvdecode_arrow::DecodedUpdate {
            timestamp,
            payload,
            bytes,
        })
    }

    /// Diagnostic listing of the whole record; never fails.
    pub fn describe<N: PvNode>(&self, tree: &N) -> StructureReport {
        describe(tree)
    }
}

impl Default for PvDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PvDecoderBuilder {
    /// Simple or dotted path of the field to decode. Defaults to `"value"`.
    pub fn value_field(mut self, field: impl Into<String>) -> Self {
        self.value_field = field.into();
        self
    }

    /// Seconds subtracted from `secondsPastEpoch`. Defaults to
    /// [`EPICS_EPOCH_OFFSET`].
    pub fn epoch_offset(mut self, seconds: i64) -> Self {
        self.epoch_offset = seconds;
        self
    }

    pub fn build(self) -> PvDecoder {
        PvDecoder {
            value_field: self.value_field,
            epoch_offset: self.epoch_offset,
        }
    }
}
