//! Flat file framing: header tags, payload and trailing checksum
//!
//! A single `FlatFile` knows where its file lives and which tags it expects.
//! Writing captures the payload under its lock and overwrites the file in
//! place; reading verifies the checksum before trusting any header byte.

use super::checksum::{Checksum, CHECKSUM_SIZE};
use super::encoding::{write_string, ByteReader, CodecError};
use super::payload::FlatPayload;
use super::report::FileReport;
use super::status::ReadStatus;
use crate::config::NetworkTag;
use crate::error::{FlatDbError, FlatDbResult};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, error, info};

/// Decoded header of a flat file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub type_tag: String,
    pub network_tag: NetworkTag,
}

impl FrameHeader {
    /// Decode the header, leaving `reader` positioned at the payload
    pub fn decode(reader: &mut ByteReader<'_>, network_tag_len: usize) -> Result<Self, CodecError> {
        let type_tag = reader.read_string()?;
        let network_tag = NetworkTag::new(reader.take(network_tag_len)?.to_vec());
        Ok(Self {
            type_tag,
            network_tag,
        })
    }

    pub fn encode(&self, buf: &mut Vec<u8>) -> Result<(), CodecError> {
        write_string(buf, &self.type_tag)?;
        buf.extend_from_slice(self.network_tag.as_bytes());
        Ok(())
    }
}

/// Handle on one flat file and the tags it must carry
#[derive(Debug, Clone)]
pub struct FlatFile {
    path: PathBuf,
    header: FrameHeader,
}

impl FlatFile {
    pub fn new(
        path: impl Into<PathBuf>,
        type_tag: impl Into<String>,
        network_tag: NetworkTag,
    ) -> Self {
        Self {
            path: path.into(),
            header: FrameHeader {
                type_tag: type_tag.into(),
                network_tag,
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn type_tag(&self) -> &str {
        &self.header.type_tag
    }

    pub fn network_tag(&self) -> &NetworkTag {
        &self.header.network_tag
    }

    /// Describe the file on disk without checking it against this file's tags
    pub fn inspect(&self) -> FlatDbResult<FileReport> {
        FileReport::scan(&self.path, self.header.network_tag.len())
    }

    /// Serialize `payload` with header and checksum, overwriting the file
    ///
    /// The payload lock is held only while its bytes are captured. There is
    /// no atomic rename: a crash mid-write leaves a file that the next read
    /// reports as corrupt.
    pub fn write<T: FlatPayload>(&self, payload: &Mutex<T>) -> FlatDbResult<()> {
        let start = Instant::now();

        let (mut buf, filename, description) = {
            let guard = payload
                .lock()
                .map_err(|_| FlatDbError::PayloadPoisoned(self.path.display().to_string()))?;

            let mut buf = Vec::new();
            self.header.encode(&mut buf)?;
            guard.serialize_into(&mut buf)?;
            (buf, guard.filename().to_string(), guard.describe())
        };

        let checksum = Checksum::compute(&buf);
        buf.extend_from_slice(checksum.as_bytes());

        let mut file = File::create(&self.path).map_err(|e| FlatDbError::FileWrite {
            path: self.path.clone(),
            source: e,
        })?;
        file.write_all(&buf)
            .map_err(|e| FlatDbError::io(format!("writing {}", self.path.display()), e))?;

        info!(
            "Written info to {}  {}ms",
            filename,
            start.elapsed().as_millis()
        );
        info!("     {}", description);
        debug!("{} bytes, checksum {}", buf.len(), checksum);
        Ok(())
    }

    /// Read and verify the file into `payload`
    ///
    /// Stops at the first failure. The type tag is compared before the
    /// network tag bytes are taken, so a foreign file too short to hold our
    /// network tag still reports a type tag mismatch. The payload is reset
    /// when the header or payload fails to parse. `maintain` runs only on a
    /// successful read with `dry_run` unset.
    ///
    /// The payload is not locked here: callers must not let this race a
    /// concurrent mutator.
    pub fn read<T: FlatPayload>(&self, payload: &mut T, dry_run: bool) -> ReadStatus {
        let start = Instant::now();
        let path = self.path.display();

        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                error!("Failed to open file {}: {}", path, e);
                return ReadStatus::FileError;
            }
        };

        let (body, stored) = match read_body_and_checksum(&mut file) {
            Ok(parts) => parts,
            Err(e) => {
                error!("Deserialize or I/O error reading {} - {}", path, e);
                return ReadStatus::HashReadError;
            }
        };
        drop(file);

        if Checksum::compute(&body) != stored {
            error!("Checksum mismatch in {}, data corrupted", path);
            return ReadStatus::IncorrectHash;
        }

        let mut reader = ByteReader::new(&body);
        let type_tag = match reader.read_string() {
            Ok(tag) => tag,
            Err(e) => {
                payload.clear();
                error!("Invalid header in {} - {}", path, e);
                return ReadStatus::IncorrectFormat;
            }
        };

        if type_tag != self.header.type_tag {
            error!(
                "Invalid magic message in {}: expected {:?}, found {:?}",
                path, self.header.type_tag, type_tag
            );
            return ReadStatus::IncorrectMagicMessage;
        }

        let network_tag = match reader.take(self.header.network_tag.len()) {
            Ok(bytes) => NetworkTag::new(bytes.to_vec()),
            Err(e) => {
                payload.clear();
                error!("Invalid header in {} - {}", path, e);
                return ReadStatus::IncorrectFormat;
            }
        };

        if network_tag != self.header.network_tag {
            error!(
                "Invalid network magic number in {}: expected {}, found {}",
                path, self.header.network_tag, network_tag
            );
            return ReadStatus::IncorrectMagicNumber;
        }

        if let Err(e) = payload.deserialize_from(reader.rest()) {
            payload.clear();
            error!("Deserialize error in {} - {}", path, e);
            return ReadStatus::IncorrectFormat;
        }

        info!(
            "Loaded info from {}  {}ms",
            payload.filename(),
            start.elapsed().as_millis()
        );
        info!("     {}", payload.describe());

        if !dry_run {
            info!("Cleaning {}...", payload.filename());
            payload.maintain();
            info!("     {}", payload.describe());
        }

        ReadStatus::Ok
    }
}

/// Split an open file into body and trailing checksum
///
/// A file shorter than a checksum has an empty body; its bytes are
/// zero-padded into the checksum.
fn read_body_and_checksum(file: &mut File) -> io::Result<(Vec<u8>, Checksum)> {
    let file_size = file.metadata()?.len();
    let body_len = usize::try_from(file_size.saturating_sub(CHECKSUM_SIZE as u64))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut body = vec![0u8; body_len];
    file.read_exact(&mut body)?;

    let mut tail = Vec::with_capacity(CHECKSUM_SIZE);
    file.take(CHECKSUM_SIZE as u64).read_to_end(&mut tail)?;

    Ok((body, Checksum::from_tail(&tail)))
}
