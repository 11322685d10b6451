use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable naming the fleet database file (or its directory).
pub const DATABASE_ENV: &str = "FLEETDESK_DB";

/// Default filename for the fleet database.
const DATABASE_FILENAME: &str = "fleetdesk.db";

/// Resolve the default database location using platform-specific project directories.
pub fn default_database_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "fleetdesk", "fleetdesk").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATABASE_FILENAME))
}

/// Resolve the database path used by front ends.
///
/// Resolution order:
/// 1. Explicit `target` (for example a `--db` flag).
/// 2. `FLEETDESK_DB` environment variable.
/// 3. Platform data directory from [`default_database_path`].
///
/// A path naming an existing directory resolves to `fleetdesk.db` inside it.
pub fn resolve_database_path(target: Option<&Path>) -> Result<PathBuf> {
    resolve_with(target, env::var_os(DATABASE_ENV))
}

fn resolve_with(target: Option<&Path>, env_value: Option<OsString>) -> Result<PathBuf> {
    let resolved = match (target, env_value) {
        (Some(explicit), _) => canonical_database_path(explicit),
        (None, Some(value)) if !value.is_empty() => canonical_database_path(Path::new(&value)),
        _ => default_database_path()?,
    };
    debug!(path = %resolved.display(), "resolved fleet database path");
    Ok(resolved)
}

fn canonical_database_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DATABASE_FILENAME)
    } else {
        path.to_path_buf()
    }
}
