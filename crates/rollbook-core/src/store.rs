//! File-backed collection of fixed-size records for one kind.
//!
//! Each backing file is a bare sequence of same-size blocks with no header,
//! no version tag, and no record count prefix; length is inferred from file
//! size. Update and delete are rewrite-on-change: callers compute the full
//! new record set in memory and call [`RecordFile::rewrite_all`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::encoding::Record;
use crate::error::StoreError;

/// One record kind's backing file. Generic over the codec so the three
/// stores share a single implementation.
pub struct RecordFile<R: Record> {
    path: PathBuf,
    _kind: PhantomData<R>,
}

impl<R: Record> RecordFile<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _kind: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode and append one record. Creates the file if absent; on success
    /// the file grows by exactly [`Record::SIZE`] bytes.
    pub fn append(&self, record: &R) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&record.encode())?;
        Ok(())
    }

    /// Read every record from the file in insertion order.
    ///
    /// A missing file yields an empty set. A short trailing chunk is ignored,
    /// and blocks that fail to decode are logged and skipped rather than
    /// aborting the scan.
    pub fn scan_all(&self) -> Result<Vec<R>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::with_capacity(data.len() / R::SIZE);
        for (i, block) in data.chunks_exact(R::SIZE).enumerate() {
            match R::decode(block) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        kind = R::KIND,
                        block = i,
                        path = %self.path.display(),
                        "skipping undecodable record: {e}"
                    );
                }
            }
        }
        let tail = data.len() % R::SIZE;
        if tail != 0 {
            warn!(
                kind = R::KIND,
                bytes = tail,
                path = %self.path.display(),
                "ignoring short trailing chunk"
            );
        }
        Ok(records)
    }

    /// Replace the file's contents with the given records, in order.
    ///
    /// Writes to a sibling temp file and renames it over the original so
    /// readers never observe a partially written file.
    pub fn rewrite_all(&self, records: &[R]) -> Result<(), StoreError> {
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut tmp = File::create(&tmp_path)?;
            for record in records {
                tmp.write_all(&record.encode())?;
            }
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        debug!(
            kind = R::KIND,
            count = records.len(),
            path = %self.path.display(),
            "rewrote record file"
        );
        Ok(())
    }

    /// Number of whole records currently in the file, from its size alone.
    pub fn record_count(&self) -> Result<u64, StoreError> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() / R::SIZE as u64),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}
