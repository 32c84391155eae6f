//! # File I/O Module
//!
//! Reading input records from disk and writing reports.
//!
//! Writes are atomic: the text goes to `<path>.tmp`, is synced, then renamed
//! over the target, so an interrupted run never leaves a half-written report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wallthick_core::file_io::{load_input, save_report};
//!
//! let data = load_input(Path::new("demos/aviat_8in.json"))?;
//! save_report("report text", Path::new("Aviat Results.txt"))?;
//! # Ok::<(), wallthick_core::errors::CalcError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::calculations::inputs::InputData;
use crate::errors::{CalcError, CalcResult};
use crate::input_file::{read_input_data, InputRecord};

/// `<path>.tmp` alongside the target
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to `path` atomically.
pub fn save_report(contents: &str, path: &Path) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(contents.as_bytes())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "report saved");
    Ok(())
}

/// Write an input record file for `data`.
pub fn save_input(data: &InputData, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(&InputRecord::from(data))?;
    save_report(&json, path)
}

/// Load and validate an input record file.
///
/// # Errors
/// * `CalcError::FileError` - the file cannot be opened or read
/// * `CalcError::SerializationError` - the file is not valid JSON
/// * any error from [`read_input_data`]
pub fn load_input(path: &Path) -> CalcResult<InputData> {
    let mut file =
        File::open(path).map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let value: Value = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    read_input_data(&value)
}
