//! Data file load/save for the vehicle collection

use crate::core::{Result, ShellError};
use crate::storage::codec::{decode_header, decode_vehicle, encode_header, encode_vehicle};
use crate::storage::collection::VehicleCollection;
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

// ============================================================================
// Stream-level codec
// ============================================================================

/// Read a whole collection from `reader`.
///
/// The first line is the header timestamp; a missing or malformed header
/// falls back to the current time. Every following non-blank line must
/// decode into a vehicle that fits the collection, otherwise the load is
/// aborted with [`ShellError::Corrupted`] naming the line. The id counter is
/// advanced past every loaded id.
pub fn read_collection<R: BufRead>(reader: R) -> Result<VehicleCollection> {
    let mut lines = reader.lines();

    let init_date = match lines.next().transpose()? {
        Some(header) => decode_header(&header).unwrap_or_else(|| {
            warn!(header = %header, "malformed header, using current time as initialization date");
            Local::now().naive_local()
        }),
        None => {
            debug!("empty data file, using current time as initialization date");
            Local::now().naive_local()
        }
    };

    let mut collection = VehicleCollection::with_init_date(init_date);
    let mut max_id = 0;

    for (index, line) in lines.enumerate() {
        let line = line?;
        // header is line 1
        let line_no = index + 2;
        if line.trim().is_empty() {
            continue;
        }

        let vehicle = decode_vehicle(&line).map_err(|e| ShellError::Corrupted {
            line: line_no,
            reason: e.to_string(),
        })?;
        max_id = max_id.max(vehicle.id());
        collection.insert(vehicle).map_err(|e| ShellError::Corrupted {
            line: line_no,
            reason: e.to_string(),
        })?;
    }

    collection.restore_counter_from(max_id);
    Ok(collection)
}

/// Write the header followed by one line per vehicle in ascending order.
pub fn write_collection<W: Write>(mut writer: W, collection: &VehicleCollection) -> Result<()> {
    writeln!(writer, "{}", encode_header(collection.init_date()))?;
    for vehicle in collection {
        writeln!(writer, "{}", encode_vehicle(vehicle))?;
    }
    writer.flush()?;
    Ok(())
}

// ============================================================================
// Data file
// ============================================================================

/// The flat text file a session loads from and saves to.
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection. A missing file yields an empty collection.
    pub fn load(&self) -> Result<VehicleCollection> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "data file not found, starting with an empty collection");
                return Ok(VehicleCollection::new());
            }
            Err(e) => {
                return Err(ShellError::Io(format!(
                    "Failed to open '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let collection = read_collection(BufReader::new(file))?;
        info!(path = %self.path.display(), count = collection.len(), "collection loaded");
        Ok(collection)
    }

    /// Replace the file contents with `collection`.
    ///
    /// Data goes to a temp file in the same directory which is then renamed
    /// over the target, so a failed save leaves the previous file intact.
    pub fn save(&self, collection: &VehicleCollection) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| {
            ShellError::Io(format!("Failed to create directory '{}': {}", dir.display(), e))
        })?;

        let temp = NamedTempFile::new_in(&dir)
            .map_err(|e| ShellError::Io(format!("Failed to create temp file: {}", e)))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            write_collection(&mut writer, collection)?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| ShellError::Io(format!("Failed to sync data file: {}", e)))?;
        temp.persist(&self.path).map_err(|e| {
            ShellError::Io(format!(
                "Failed to replace '{}': {}",
                self.path.display(),
                e.error
            ))
        })?;

        info!(path = %self.path.display(), count = collection.len(), "collection saved");
        Ok(())
    }
}
