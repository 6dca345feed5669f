//! Load/save policy around a flat file
//!
//! Every read status is turned into a `Verdict`. Only an unreadable file
//! stops the caller; a missing, corrupt or foreign file is treated as
//! absent and gets replaced on the next save.

use super::framer::FlatFile;
use super::payload::FlatPayload;
use super::status::{ReadStatus, Verdict};
use crate::config::StoreConfig;
use crate::error::FlatDbResult;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{error, info, warn};

/// Flat database for one payload type
#[derive(Debug)]
pub struct FlatDb<T> {
    file: FlatFile,
    _payload: PhantomData<fn(&mut T)>,
}

impl<T: FlatPayload> FlatDb<T> {
    /// Bind `filename` under the configured data directory
    pub fn new(store: &StoreConfig, filename: &str, type_tag: &str) -> Self {
        Self::from_file(FlatFile::new(
            store.path_for(filename),
            type_tag,
            store.network_tag().clone(),
        ))
    }

    pub fn from_file(file: FlatFile) -> Self {
        Self {
            file,
            _payload: PhantomData,
        }
    }

    pub fn file(&self) -> &FlatFile {
        &self.file
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Load the file into `payload`
    ///
    /// On anything but `Verified` the payload keeps whatever state it had,
    /// except after a parse failure, which leaves it empty.
    pub fn load(&self, payload: &mut T) -> Verdict {
        info!("Reading info from {}...", payload.filename());
        let status = self.file.read(payload, false);
        report(payload.filename(), status)
    }

    /// Verify the existing file, then overwrite it with `payload`
    ///
    /// Verification reads into a scratch payload so `payload` is never
    /// touched by it. Nothing is written when the verdict is `Unrecoverable`.
    pub fn save(&self, payload: &Mutex<T>) -> FlatDbResult<Verdict>
    where
        T: Default,
    {
        let start = Instant::now();
        let name = self.file_name();
        let mut scratch = T::default();

        info!("Verifying {} format...", name);
        let status = self.file.read(&mut scratch, true);
        let verdict = report(&name, status);
        if verdict.should_abort() {
            return Ok(verdict);
        }

        info!("Writing info to {}...", name);
        self.file.write(payload)?;
        info!("{} dump finished  {}ms", name, start.elapsed().as_millis());

        Ok(verdict)
    }

    /// File name used in log lines; a default payload may not know its own
    fn file_name(&self) -> String {
        self.file
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.path().display().to_string())
    }
}

fn report(filename: &str, status: ReadStatus) -> Verdict {
    match status {
        ReadStatus::Ok => {}
        ReadStatus::FileError => {
            warn!("Missing file - {}, will try to recreate", filename)
        }
        ReadStatus::HashReadError => error!(
            "Error reading {}: file format is unknown or invalid, please fix it manually",
            filename
        ),
        other => warn!(
            "Error reading {}: {}, will try to recreate",
            filename, other
        ),
    }
    Verdict::from(status)
}
