use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "urljump").context("Could not determine home directory")
}

/// Returns the path to the config file.
/// Location: `~/.config/urljump/config.toml` (XDG-compliant)
pub fn config_path() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Returns the path to the log file. The directory is created by
/// [`crate::logging::init_file`].
/// Location: `~/.local/share/urljump/urljump.log`
pub fn log_path() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    Ok(dirs.data_local_dir().join("urljump.log"))
}
