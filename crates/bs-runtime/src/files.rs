use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use bs_core::{BsValue, ScriptError};
use regex::Regex;

pub const SCRIPT_FILES_SUFFIX: &str = "-files";

fn filename_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z\d_\-\. ]+$").expect("filename regex must compile")
    })
}

/// A single path component made of safe characters that is not only dots.
fn is_legal_name(name: &str) -> bool {
    filename_regex().is_match(name) && !name.trim_matches('.').is_empty()
}

/// Per-script file storage rooted in one sandbox directory.
#[derive(Debug, Clone, Default)]
pub struct ScriptFiles {
    root: Option<PathBuf>,
}

impl ScriptFiles {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn path_for(&self, script: &str, filename: &str) -> Result<PathBuf, ScriptError> {
        if !is_legal_name(script) {
            return Err(ScriptError::new(
                "FILE_ILLEGAL_NAME",
                format!("Illegal script name: {}", script),
            ));
        }
        if !is_legal_name(filename) {
            return Err(ScriptError::new(
                "FILE_ILLEGAL_NAME",
                format!("Illegal filename: {}", filename),
            ));
        }
        let Some(root) = &self.root else {
            return Err(ScriptError::new(
                "FILE_SANDBOX_MISSING",
                "No files directory is configured.",
            ));
        };
        Ok(root
            .join(format!("{}{}", script, SCRIPT_FILES_SUFFIX))
            .join(filename))
    }

    pub fn exists(&self, script: &str, filename: &str) -> Result<bool, ScriptError> {
        Ok(self.path_for(script, filename)?.is_file())
    }

    /// Returns `None` when the file does not exist yet.
    pub fn read(&self, script: &str, filename: &str) -> Result<Option<BsValue>, ScriptError> {
        let path = self.path_for(script, filename)?;
        if !path.is_file() {
            return Ok(None);
        }
        let source = fs::read_to_string(&path).map_err(|error| {
            ScriptError::new(
                "FILE_READ",
                format!("Failed to read {}: {}", path.display(), error),
            )
        })?;
        let value = serde_json::from_str(&source).map_err(|error| {
            ScriptError::new(
                "FILE_READ",
                format!("File {} is not a valid value: {}", path.display(), error),
            )
        })?;
        Ok(Some(value))
    }

    pub fn write(&self, script: &str, filename: &str, value: &BsValue) -> Result<(), ScriptError> {
        let path = self.path_for(script, filename)?;
        let write_error = |error: String| {
            ScriptError::new(
                "FILE_WRITE",
                format!("Failed to write {}: {}", path.display(), error),
            )
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| write_error(error.to_string()))?;
        }
        let content =
            serde_json::to_string(value).map_err(|error| write_error(error.to_string()))?;
        fs::write(&path, content).map_err(|error| write_error(error.to_string()))
    }
}
