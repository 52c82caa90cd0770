//! Continuation state for time card runs.
//!
//! A run in continuation mode sends the seven days after the period sent
//! last time. The end date of that period is kept as a single `YYYY-MM-DD`
//! line in a well-known file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads and overwrites the stored end date of the last period sent.
///
/// # Example
///
/// ```no_run
/// use timecard_engine::config::ContinuationStore;
/// use chrono::NaiveDate;
///
/// let store = ContinuationStore::new("./state/last_period_end");
/// store.record(NaiveDate::from_ymd_opt(2025, 12, 13).unwrap())?;
/// assert_eq!(store.last_end()?, NaiveDate::from_ymd_opt(2025, 12, 13));
/// # Ok::<(), timecard_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationStore {
    path: PathBuf,
}

impl ContinuationStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored end date, or `None` if nothing has been recorded yet.
    pub fn last_end(&self) -> EngineResult<Option<NaiveDate>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(EngineError::StateIo {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        let value = contents.trim();
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| EngineError::StateParse {
                path: self.path.display().to_string(),
                value: value.to_string(),
            })
    }

    /// Overwrites the stored end date.
    pub fn record(&self, end_date: NaiveDate) -> EngineResult<()> {
        let io_error = |source| EngineError::StateIo {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&self.path, format!("{}\n", end_date.format(DATE_FORMAT))).map_err(io_error)?;

        debug!(path = %self.path.display(), end_date = %end_date, "Recorded last period end");
        Ok(())
    }
}
