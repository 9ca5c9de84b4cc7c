//! JSON file event source.

use super::{EventSource, RawEventData, TimeRange};
use crate::utils::error::{ParseError, SourceError};
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Source that reads records from a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EventSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch(&self, _range: &TimeRange) -> Result<RawEventData, SourceError> {
        info!("Reading events from: {}", self.path.display());

        let file = File::open(&self.path)?;
        let raw: RawEventData = serde_json::from_reader(BufReader::new(file))
            .map_err(ParseError::JsonError)?;

        debug!("Loaded event payload from {}", self.path.display());

        Ok(raw)
    }
}
