//! Checksummed single-object flat files
//!
//! Persists one in-memory object as a self-describing blob and reloads it
//! with corruption and format-mismatch detection.
//!
//! # On-disk layout
//!
//! ```text
//! [type tag: compact size length + UTF-8]
//! [network tag: fixed N bytes]
//! [payload: opaque bytes]
//! [checksum: 32 bytes, double SHA-256 of everything before it]
//! ```
//!
//! # Read outcomes
//!
//! | Status | Verdict | Load / Save |
//! |--------|---------|-------------|
//! | Ok | Verified | proceed |
//! | FileError | Recreatable | proceed, file recreated on save |
//! | IncorrectHash | Recreatable | proceed, file recreated on save |
//! | IncorrectMagicMessage | Recreatable | proceed, file recreated on save |
//! | IncorrectMagicNumber | Recreatable | proceed, file recreated on save |
//! | IncorrectFormat | Recreatable | proceed with reset payload |
//! | HashReadError | Unrecoverable | abort, nothing written |

pub mod checksum;
pub mod encoding;
pub mod framer;
pub mod orchestrator;
pub mod payload;
pub mod report;
pub mod status;

pub use checksum::{Checksum, CHECKSUM_SIZE};
pub use encoding::{write_compact_size, write_string, ByteReader, CodecError};
pub use framer::{FlatFile, FrameHeader};
pub use orchestrator::FlatDb;
pub use payload::{FlatPayload, RawPayload};
pub use report::FileReport;
pub use status::{ReadStatus, Verdict};
