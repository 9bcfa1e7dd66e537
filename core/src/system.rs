//! Locating and vetting the probing executable.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use fastping_common::FastPingError;
use fastping_common::config::FPING_BINARY;
use tracing::debug;

/// Marker the version banner must contain for CSV output (`-V`) to exist.
const CSV_MARKER: &str = "csv";

/// What the probing executable reports about itself.
#[derive(Debug, Clone)]
pub struct ExecutableInfo {
    pub path: PathBuf,
    pub version: String,
    pub csv_support: bool,
}

/// Uses `explicit` when given, otherwise searches `PATH` for `fping`.
pub fn locate_fping(explicit: Option<&Path>) -> Result<PathBuf, FastPingError> {
    if let Some(path) = explicit {
        return if is_executable(path) {
            Ok(path.to_path_buf())
        } else {
            Err(FastPingError::Configuration(format!(
                "{} is not an executable file",
                path.display()
            )))
        };
    }

    let search_path = env::var_os("PATH").unwrap_or_default();
    env::split_paths(&search_path)
        .map(|dir| dir.join(FPING_BINARY))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| {
            FastPingError::Configuration(format!("executable {FPING_BINARY} not found on PATH"))
        })
}

/// Runs `<path> -v` and collects its version banner.
pub fn inspect(path: &Path) -> Result<ExecutableInfo, FastPingError> {
    let output = Command::new(path).arg("-v").output().map_err(|e| {
        FastPingError::Configuration(format!("could not run {}: {e}", path.display()))
    })?;

    // Older builds print the banner on stderr
    let mut version = String::from_utf8_lossy(&output.stdout).into_owned();
    version.push_str(&String::from_utf8_lossy(&output.stderr));
    let version = version.trim().to_string();
    debug!("{} reports: {version}", path.display());

    Ok(ExecutableInfo {
        path: path.to_path_buf(),
        csv_support: version.contains(CSV_MARKER),
        version,
    })
}

/// Locates the executable and fails unless it can emit CSV records.
pub fn verify_fping(explicit: Option<&Path>) -> Result<ExecutableInfo, FastPingError> {
    let path = locate_fping(explicit)?;
    let info = inspect(&path)?;
    if !info.csv_support {
        return Err(FastPingError::Configuration(format!(
            "{} does not support CSV output (version: {})",
            path.display(),
            info.version
        )));
    }
    Ok(info)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
