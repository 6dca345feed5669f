//! Read status codes and the recreate/abort verdict derived from them

use serde::Serialize;
use std::fmt;

/// Outcome of reading a flat file
///
/// These are status codes, not errors: every kind maps to a distinct
/// policy decision in the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    /// Verified and loaded
    Ok,
    /// File missing or cannot be opened
    FileError,
    /// I/O failure while reading body or checksum
    HashReadError,
    /// Stored checksum does not match the body
    IncorrectHash,
    /// Type tag does not match the expected one
    IncorrectMagicMessage,
    /// Network tag does not match the expected one
    IncorrectMagicNumber,
    /// Checksum ok but header or payload failed to parse
    IncorrectFormat,
}

impl ReadStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Policy verdict for this status
    pub fn verdict(&self) -> Verdict {
        Verdict::from(*self)
    }
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Ok => "ok",
            Self::FileError => "file missing or unreadable",
            Self::HashReadError => "failed to read data or checksum",
            Self::IncorrectHash => "checksum mismatch, data corrupted",
            Self::IncorrectMagicMessage => "invalid magic message",
            Self::IncorrectMagicNumber => "invalid network magic number",
            Self::IncorrectFormat => "magic is ok but data has invalid format",
        };
        write!(f, "{}", text)
    }
}

/// Policy state of a flat file
///
/// | State | Reached by | Caller action |
/// |-------|------------|---------------|
/// | Unverified | nothing read yet | - |
/// | Verified | `Ok` | proceed with loaded payload |
/// | Recreatable | any other non-`Ok` status | proceed as if absent |
/// | Unrecoverable | `HashReadError` | abort |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    #[default]
    Unverified,
    Verified,
    Recreatable,
    Unrecoverable,
}

impl Verdict {
    /// True only when the caller must stop
    pub fn should_abort(&self) -> bool {
        matches!(self, Self::Unrecoverable)
    }
}

impl From<ReadStatus> for Verdict {
    fn from(status: ReadStatus) -> Self {
        match status {
            ReadStatus::Ok => Self::Verified,
            ReadStatus::HashReadError => Self::Unrecoverable,
            ReadStatus::FileError
            | ReadStatus::IncorrectHash
            | ReadStatus::IncorrectMagicMessage
            | ReadStatus::IncorrectMagicNumber
            | ReadStatus::IncorrectFormat => Self::Recreatable,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
            Self::Recreatable => "recreatable",
            Self::Unrecoverable => "unrecoverable",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hash_read_error_aborts() {
        let all = [
            ReadStatus::Ok,
            ReadStatus::FileError,
            ReadStatus::HashReadError,
            ReadStatus::IncorrectHash,
            ReadStatus::IncorrectMagicMessage,
            ReadStatus::IncorrectMagicNumber,
            ReadStatus::IncorrectFormat,
        ];

        for status in all {
            assert_eq!(
                status.verdict().should_abort(),
                status == ReadStatus::HashReadError,
                "{status:?}"
            );
        }
    }

    #[test]
    fn verdict_mapping() {
        assert_eq!(Verdict::from(ReadStatus::Ok), Verdict::Verified);
        assert_eq!(Verdict::from(ReadStatus::FileError), Verdict::Recreatable);
        assert_eq!(
            Verdict::from(ReadStatus::IncorrectFormat),
            Verdict::Recreatable
        );
        assert_eq!(Verdict::default(), Verdict::Unverified);
    }

    #[test]
    fn status_display() {
        assert_eq!(
            ReadStatus::IncorrectHash.to_string(),
            "checksum mismatch, data corrupted"
        );
        assert_eq!(Verdict::Recreatable.to_string(), "recreatable");
    }
}
