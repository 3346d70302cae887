//! Domain model for articles and their comments.
//!
//! # Responsibility
//! - Define the records exchanged between services, repositories and the
//!   HTTP boundary.
//! - Keep serialized field names stable; they are the external contract.
//!
//! # Invariants
//! - Ids are assigned by the store and never reused.
//! - An id of `0` means "absent", never a stored row.

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article;
pub mod comment;

/// Unix seconds of `0001-01-01T00:00:00Z`, the zero time clients send for an
/// unset timestamp.
const ZERO_TIME_UNIX_SECONDS: i64 = -62_135_596_800;

/// Returns whether `ts` is a zero value standing in for "not set".
///
/// Both `0001-01-01T00:00:00Z` and the Unix epoch count as zero.
pub fn is_zero_timestamp(ts: &DateTime<Utc>) -> bool {
    ts.timestamp_subsec_nanos() == 0
        && matches!(ts.timestamp(), 0 | ZERO_TIME_UNIX_SECONDS)
}

/// Replaces an absent or zero timestamp with `now`.
pub(crate) fn stamp_timestamp(slot: &mut Option<DateTime<Utc>>, now: DateTime<Utc>) {
    if slot.map_or(true, |ts| is_zero_timestamp(&ts)) {
        *slot = Some(now);
    }
}

/// Validation failure raised before a draft reaches SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelValidationError {
    /// The draft was not stamped before persistence.
    MissingCreationTimestamp,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCreationTimestamp => {
                write!(f, "creation_timestamp must be set before persistence")
            }
        }
    }
}

impl Error for ModelValidationError {}
