//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables. The `*_from_env_value`
//! helpers take the raw value as an argument; reading the environment is left to the binary.

use crate::constants::{
    ATTEMPTS_DIR_NAME, DEFAULT_DRILLS_CACHE_MAX_ENTRIES, DEFAULT_DRILLS_CACHE_TTL,
    DRILLS_DIR_NAME, USERS_DIR_NAME,
};
use crate::{DrillsError, DrillsResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    drills_cache_ttl: Duration,
    drills_cache_max_entries: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `DrillsError::InvalidInput` if `data_dir` is empty or `drills_cache_max_entries`
    /// is zero.
    pub fn new(
        data_dir: PathBuf,
        drills_cache_ttl: Duration,
        drills_cache_max_entries: usize,
    ) -> DrillsResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(DrillsError::InvalidInput("data_dir cannot be empty".into()));
        }
        if drills_cache_max_entries == 0 {
            return Err(DrillsError::InvalidInput(
                "drills_cache_max_entries must be at least 1".into(),
            ));
        }

        Ok(Self {
            data_dir,
            drills_cache_ttl,
            drills_cache_max_entries,
        })
    }

    /// Configuration with default cache settings.
    pub fn with_data_dir(data_dir: PathBuf) -> DrillsResult<Self> {
        Self::new(
            data_dir,
            DEFAULT_DRILLS_CACHE_TTL,
            DEFAULT_DRILLS_CACHE_MAX_ENTRIES,
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn drills_dir(&self) -> PathBuf {
        self.data_dir.join(DRILLS_DIR_NAME)
    }

    pub fn attempts_dir(&self) -> PathBuf {
        self.data_dir.join(ATTEMPTS_DIR_NAME)
    }

    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join(USERS_DIR_NAME)
    }

    pub fn drills_cache_ttl(&self) -> Duration {
        self.drills_cache_ttl
    }

    pub fn drills_cache_max_entries(&self) -> usize {
        self.drills_cache_max_entries
    }
}

/// Parse the drill-list cache TTL (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default TTL.
pub fn cache_ttl_from_env_value(value: Option<String>) -> DrillsResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_DRILLS_CACHE_TTL),
        Some(v) => v.parse::<u64>().map(Duration::from_secs).map_err(|_| {
            DrillsError::InvalidInput(format!(
                "cache TTL must be a whole number of seconds, got '{}'",
                v
            ))
        }),
    }
}

/// Parse a boolean flag (`true`/`false`, `1`/`0`, `yes`/`no`), defaulting to `false`.
pub fn flag_from_env_value(value: Option<String>) -> DrillsResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => Err(DrillsError::InvalidInput(format!(
            "expected a boolean flag, got '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_dirs_live_under_data_dir() {
        let cfg = CoreConfig::with_data_dir(PathBuf::from("/srv/drills")).unwrap();
        assert_eq!(cfg.drills_dir(), PathBuf::from("/srv/drills/drills"));
        assert_eq!(cfg.attempts_dir(), PathBuf::from("/srv/drills/attempts"));
        assert_eq!(cfg.users_dir(), PathBuf::from("/srv/drills/users"));
        assert_eq!(cfg.drills_cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn rejects_empty_data_dir_and_zero_capacity() {
        assert!(CoreConfig::with_data_dir(PathBuf::new()).is_err());
        assert!(CoreConfig::new(PathBuf::from("d"), Duration::from_secs(1), 0).is_err());
    }

    #[test]
    fn cache_ttl_defaults_and_parses() {
        assert_eq!(cache_ttl_from_env_value(None).unwrap(), Duration::from_secs(60));
        assert_eq!(
            cache_ttl_from_env_value(Some("  ".into())).unwrap(),
            Duration::from_secs(60)
        );
        assert_eq!(
            cache_ttl_from_env_value(Some("5".into())).unwrap(),
            Duration::from_secs(5)
        );
        assert!(matches!(
            cache_ttl_from_env_value(Some("soon".into())),
            Err(DrillsError::InvalidInput(msg)) if msg.contains("whole number")
        ));
    }

    #[test]
    fn flags_parse() {
        assert!(!flag_from_env_value(None).unwrap());
        assert!(flag_from_env_value(Some("TRUE".into())).unwrap());
        assert!(flag_from_env_value(Some("1".into())).unwrap());
        assert!(!flag_from_env_value(Some("no".into())).unwrap());
        assert!(flag_from_env_value(Some("maybe".into())).is_err());
    }
}
