use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bs_compiler::{compile_scripts_from_json_map, SCRIPT_FILE_SUFFIX};
use bs_core::{ActionShapeLookup, CompiledScript, ScriptError};
use tracing::debug;
use walkdir::WalkDir;

use crate::{map_cli_source_path, map_cli_source_read, map_cli_source_scan};

pub(crate) fn load_scripts_from_dir(
    scripts_dir: &str,
    lookup: &dyn ActionShapeLookup,
) -> Result<BTreeMap<String, CompiledScript>, ScriptError> {
    let scripts_root = resolve_scripts_dir(scripts_dir)?;
    let sources = read_script_sources_from_dir(&scripts_root)?;
    compile_scripts_from_json_map(&sources, lookup)
}

pub(crate) fn resolve_scripts_dir(scripts_dir: &str) -> Result<PathBuf, ScriptError> {
    let path = PathBuf::from(scripts_dir);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(map_cli_source_path)?
            .join(path)
    };

    if !absolute.exists() {
        return Err(ScriptError::new(
            "CLI_SOURCE_NOT_FOUND",
            format!("scripts-dir does not exist: {}", absolute.display()),
        ));
    }

    if !absolute.is_dir() {
        return Err(ScriptError::new(
            "CLI_SOURCE_NOT_DIR",
            format!("scripts-dir is not a directory: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

/// Relative path to source text for every script document under `scripts_dir`.
pub(crate) fn read_script_sources_from_dir(
    scripts_dir: &Path,
) -> Result<BTreeMap<String, String>, ScriptError> {
    let mut sources = BTreeMap::new();

    for entry in WalkDir::new(scripts_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !path.to_string_lossy().ends_with(SCRIPT_FILE_SUFFIX) {
            continue;
        }

        let relative = path
            .strip_prefix(scripts_dir)
            .map_err(map_cli_source_scan)?
            .to_string_lossy()
            .replace('\\', "/");

        let content = fs::read_to_string(path).map_err(map_cli_source_read)?;
        debug!(path = %relative, "read script source");
        sources.insert(relative, content);
    }

    if sources.is_empty() {
        return Err(ScriptError::new(
            "CLI_SOURCE_EMPTY",
            format!(
                "No {} script files under {}",
                SCRIPT_FILE_SUFFIX,
                scripts_dir.display()
            ),
        ));
    }

    Ok(sources)
}
