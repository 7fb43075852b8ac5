use pvdecode_core::{DecodeError, EPICS_EPOCH_OFFSET, PvNode, Timestamp, Unsupported};

use crate::leaf::integer_value;

/// Reserved structure holding the update time.
pub const TIMESTAMP_FIELD: &str = "timeStamp";

const SECONDS_PATH: &str = "timeStamp.secondsPastEpoch";
const NANOSECONDS_PATH: &str = "timeStamp.nanoseconds";

/// Update time relative to the EPICS epoch.
///
/// `secondsPastEpoch` is shifted by [`EPICS_EPOCH_OFFSET`]; nanoseconds are
/// returned unchanged.
pub fn timestamp<N: PvNode>(tree: &N) -> Result<Timestamp, DecodeError> {
    timestamp_with_offset(tree, EPICS_EPOCH_OFFSET)
}

/// [`timestamp`] with an explicit epoch offset in seconds.
pub fn timestamp_with_offset<N: PvNode>(
    tree: &N,
    epoch_offset: i64,
) -> Result<Timestamp, DecodeError> {
    let seconds: i64 = integer_field(tree, SECONDS_PATH)?;
    let nanoseconds: i32 = integer_field(tree, NANOSECONDS_PATH)?;
    let seconds = seconds.checked_sub(epoch_offset).ok_or_else(|| {
        DecodeError::unsupported(
            SECONDS_PATH,
            Unsupported::OutOfRange { target: "i64" },
        )
    })?;
    Ok(Timestamp::new(seconds, nanoseconds))
}

fn integer_field<N, T>(tree: &N, path: &str) -> Result<T, DecodeError>
where
    N: PvNode,
    T: TryFrom<i64>,
{
    let node = tree
        .sub_field(path)
        .ok_or_else(|| DecodeError::missing(path))?;
    integer_value(node).map_err(|reason| DecodeError::unsupported(path, reason))
}
