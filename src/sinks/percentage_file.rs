//! Whole-percentage output to sysfs with a fallback file

use crate::config::PercentageFileConfig;
use ina219_battery_core::{PercentageSink, SinkError};
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Writes `"<percent>\n"` to the primary path, or to the fallback when the
/// primary is missing or not writable
#[derive(Debug, Clone)]
pub struct PercentageFile {
    path: PathBuf,
    fallback_path: Option<PathBuf>,
}

impl PercentageFile {
    pub fn new(path: impl Into<PathBuf>, fallback_path: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fallback_path,
        }
    }

    pub fn from_config(config: &PercentageFileConfig) -> Self {
        Self::new(config.path.clone(), config.fallback_path.clone())
    }

    fn write(path: &Path, percent: u8) -> Result<(), SinkError> {
        std::fs::write(path, format!("{}\n", percent)).map_err(|source| SinkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Updated battery percentage: {}% in {}", percent, path.display());
        Ok(())
    }
}

impl PercentageSink for PercentageFile {
    fn persist(&mut self, percent: u8) -> Result<(), SinkError> {
        let percent = percent.min(100);

        let err = match Self::write(&self.path, percent) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        let recoverable = matches!(
            &err,
            SinkError::Io { source, .. }
                if matches!(source.kind(), ErrorKind::PermissionDenied | ErrorKind::NotFound)
        );
        match &self.fallback_path {
            Some(fallback) if recoverable => {
                warn!("{}; falling back to {}", err, fallback.display());
                Self::write(fallback, percent)
            }
            _ => Err(err),
        }
    }
}
