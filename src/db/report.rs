//! Diagnostic view of a flat file
//!
//! Unlike `FlatFile::read`, scanning never judges the file against expected
//! tags. It reports whatever it can decode so an operator can decide what
//! to do with a file the loader refused.

use super::checksum::{Checksum, CHECKSUM_SIZE};
use super::encoding::ByteReader;
use super::framer::FrameHeader;
use crate::config::{Network, NetworkTag};
use crate::error::{FlatDbError, FlatDbResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What a flat file contains, as far as it can be decoded
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub file_size: usize,
    pub stored_checksum: String,
    pub computed_checksum: String,
    pub checksum_ok: bool,
    pub type_tag: Option<String>,
    pub network_tag: Option<NetworkTag>,
    pub network: Option<Network>,
    pub payload_size: Option<usize>,
    pub header_error: Option<String>,
}

impl FileReport {
    /// Scan `path`, decoding a network tag of `network_tag_len` bytes
    pub fn scan(path: &Path, network_tag_len: usize) -> FlatDbResult<Self> {
        let bytes = fs::read(path)
            .map_err(|e| FlatDbError::io(format!("reading {}", path.display()), e))?;

        let body_len = bytes.len().saturating_sub(CHECKSUM_SIZE);
        let (body, tail) = bytes.split_at(body_len);
        let stored = Checksum::from_tail(tail);
        let computed = Checksum::compute(body);

        let mut report = Self {
            path: path.to_path_buf(),
            file_size: bytes.len(),
            stored_checksum: stored.to_string(),
            computed_checksum: computed.to_string(),
            checksum_ok: stored == computed,
            type_tag: None,
            network_tag: None,
            network: None,
            payload_size: None,
            header_error: None,
        };

        let mut reader = ByteReader::new(body);
        match FrameHeader::decode(&mut reader, network_tag_len) {
            Ok(header) => {
                report.network = Network::from_tag(&header.network_tag);
                report.type_tag = Some(header.type_tag);
                report.network_tag = Some(header.network_tag);
                report.payload_size = Some(reader.remaining());
            }
            Err(e) => report.header_error = Some(e.to_string()),
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::framer::FlatFile;
    use crate::db::payload::RawPayload;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[test]
    fn scan_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.dat");
        let file = FlatFile::new(&path, "RawCache", Network::Regtest.tag());
        file.write(&Mutex::new(RawPayload::with_bytes("raw.dat", vec![9; 10])))
            .unwrap();

        let report = FileReport::scan(&path, 4).unwrap();
        assert!(report.checksum_ok);
        assert_eq!(report.type_tag.as_deref(), Some("RawCache"));
        assert_eq!(report.network, Some(Network::Regtest));
        assert_eq!(report.payload_size, Some(10));
        assert_eq!(report.file_size, 1 + 8 + 4 + 10 + CHECKSUM_SIZE);
        assert!(report.header_error.is_none());
    }

    #[test]
    fn scan_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.dat");
        fs::write(&path, vec![0xff; 40]).unwrap();

        let report = FileReport::scan(&path, 4).unwrap();
        assert!(!report.checksum_ok);
        assert!(report.type_tag.is_none());
        assert!(report.header_error.is_some());
    }

    #[test]
    fn scan_missing() {
        let dir = TempDir::new().unwrap();
        assert!(FileReport::scan(&dir.path().join("nope.dat"), 4).is_err());
    }

    #[test]
    fn report_serializes_tag_as_hex() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.dat");
        FlatFile::new(&path, "RawCache", Network::Main.tag())
            .write(&Mutex::new(RawPayload::new("raw.dat")))
            .unwrap();

        let report = FileReport::scan(&path, 4).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["network_tag"], "bf0c6bbd");
        assert_eq!(json["network"], "main");
    }
}
