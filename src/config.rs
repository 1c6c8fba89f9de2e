//! Key/value configuration from `.env`-style files.

use std::path::Path;

use crate::error::UtilsError;
use crate::logging::{LogContext, LogSink, Operation, log_errors};
use crate::types::StringMap;

/// File read by [`load_env_file`] when given an empty path.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Read `KEY=value` pairs from `path` without touching the process environment.
///
/// An empty path means [`DEFAULT_ENV_FILE`]. A missing, unreadable or malformed file yields an
/// empty map and one [`UtilsError::ConfigLoad`] reported to `sink`; no partial map is returned.
pub fn load_env_file(path: impl AsRef<Path>, sink: &dyn LogSink) -> StringMap {
    let path = path.as_ref();
    let path = if path.as_os_str().is_empty() {
        Path::new(DEFAULT_ENV_FILE)
    } else {
        path
    };

    match read_pairs(path) {
        Ok(map) => {
            tracing::debug!(path = %path.display(), entries = map.len(), "loaded config");
            map
        }
        Err(message) => {
            let err = UtilsError::ConfigLoad {
                path: path.to_path_buf(),
                message,
            };
            let ctx = LogContext::new(Operation::LoadConfig, path.display().to_string());
            log_errors(sink, &ctx, [Some(&err)]);
            StringMap::new()
        }
    }
}

fn read_pairs(path: &Path) -> Result<StringMap, String> {
    dotenvy::from_path_iter(path)
        .map_err(|e| e.to_string())?
        .map(|item| item.map_err(|e| e.to_string()))
        .collect()
}
