//! JSON-lines emitters: one serialized proposal per line
//!
//! A file written by `FileEmitter` can be loaded back with
//! `read_proposals`, which is how recorded runs are replayed or inspected.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{complete, new_message_id, EmitCallback, EmitError, Emitter};
use crate::mcp::MetadataChangeProposal;
use crate::Result;

/// Writes each proposal as a single JSON line to any writer
pub struct JsonLinesEmitter<W: Write + Send> {
    writer: Mutex<W>,
    path: Option<PathBuf>,
}

/// JSON-lines emitter backed by a buffered file
pub type FileEmitter = JsonLinesEmitter<BufWriter<File>>;

/// JSON-lines emitter writing to standard output
pub type ConsoleEmitter = JsonLinesEmitter<Stdout>;

impl<W: Write + Send> JsonLinesEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            path: None,
        }
    }

    /// File the emitter writes to, when it writes to one
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_line(&self, proposal: &MetadataChangeProposal) -> std::result::Result<(), EmitError> {
        let mut line = serde_json::to_vec(proposal)?;
        line.push(b'\n');
        self.writer.lock().write_all(&line)?;
        Ok(())
    }
}

impl FileEmitter {
    /// Create (or truncate) the file, creating parent directories as needed
    pub fn create(path: impl AsRef<Path>) -> std::result::Result<Self, EmitError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        log::debug!("Writing proposals to {:?}", path);
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open the file for appending, creating it if it does not exist
    pub fn append(path: impl AsRef<Path>) -> std::result::Result<Self, EmitError> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::debug!("Appending proposals to {:?}", path);
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: Some(path.to_path_buf()),
        })
    }
}

impl ConsoleEmitter {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Emitter for JsonLinesEmitter<W> {
    fn emit(
        &self,
        proposal: MetadataChangeProposal,
        callback: Option<&EmitCallback<'_>>,
    ) -> std::result::Result<(), EmitError> {
        complete(self.write_line(&proposal), &new_message_id(), callback)
    }

    fn flush(&self) -> std::result::Result<(), EmitError> {
        self.writer.lock().flush()?;
        Ok(())
    }
}

/// Load proposals from a JSON-lines file
///
/// Blank lines are ignored. Lines that do not parse are logged and skipped.
pub fn read_proposals(path: impl AsRef<Path>) -> Result<Vec<MetadataChangeProposal>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let mut proposals = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<MetadataChangeProposal>(line) {
            Ok(proposal) => proposals.push(proposal),
            Err(e) => {
                log::warn!("Skipping line {} of {:?}: {}", index + 1, path, e);
            }
        }
    }
    log::info!("Loaded {} proposals from {:?}", proposals.len(), path);
    Ok(proposals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssis_urn::DatasetUrn;

    fn proposal(urn: &str) -> MetadataChangeProposal {
        MetadataChangeProposal::dataset_present(&DatasetUrn::from(urn))
    }

    #[test]
    fn test_writes_one_line_per_proposal() {
        let emitter = JsonLinesEmitter::new(Vec::new());
        emitter.emit(proposal("ds:a"), None).unwrap();
        emitter.emit(proposal("ds:b"), None).unwrap();

        let output = String::from_utf8(emitter.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"entityUrn\":\"ds:a\""));
        assert!(lines[1].contains("\"entityUrn\":\"ds:b\""));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mcps.json");

        let emitter = FileEmitter::create(&path).unwrap();
        assert_eq!(emitter.path(), Some(path.as_path()));
        emitter.emit(proposal("ds:a"), None).unwrap();
        emitter.emit(proposal("ds:b"), None).unwrap();
        emitter.flush().unwrap();

        let proposals = read_proposals(&path).unwrap();
        assert_eq!(proposals, vec![proposal("ds:a"), proposal("ds:b")]);
    }

    #[test]
    fn test_append_keeps_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcps.json");

        let first = FileEmitter::create(&path).unwrap();
        first.emit(proposal("ds:a"), None).unwrap();
        first.flush().unwrap();
        drop(first);

        let second = FileEmitter::append(&path).unwrap();
        second.emit(proposal("ds:b"), None).unwrap();
        second.flush().unwrap();

        assert_eq!(read_proposals(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_read_skips_bad_lines() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcps.json");

        let good = serde_json::to_string(&proposal("ds:a")).unwrap();
        std::fs::write(&path, format!("{}\n\nnot json\n{}\n", good, good)).unwrap();

        let proposals = read_proposals(&path).unwrap();
        assert_eq!(proposals.len(), 2);
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_proposals(dir.path().join("missing.json")).is_err());
    }
}
