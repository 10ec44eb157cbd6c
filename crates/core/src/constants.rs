//! Constants used throughout the drills core crate.
//!
//! Path, filename and limit constants live here to keep them consistent across the codebase.

use std::time::Duration;

/// Default directory for document storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "drill_data";

/// Directory name for drill documents.
pub const DRILLS_DIR_NAME: &str = "drills";

/// Directory name for attempt documents.
pub const ATTEMPTS_DIR_NAME: &str = "attempts";

/// Directory name for user documents.
pub const USERS_DIR_NAME: &str = "users";

/// Filename of a stored drill document.
pub const DRILL_FILENAME: &str = "drill.yaml";

/// Filename of a stored attempt document.
pub const ATTEMPT_FILENAME: &str = "attempt.yaml";

/// Filename of a stored user document.
pub const USER_FILENAME: &str = "user.yaml";

/// Every drill carries exactly this many questions.
pub const QUESTIONS_PER_DRILL: usize = 5;

/// Cache key (request signature) of the drill list.
pub const DRILLS_LIST_CACHE_KEY: &str = "drills-list";

/// How long a cached drill list stays fresh unless configured otherwise.
pub const DEFAULT_DRILLS_CACHE_TTL: Duration = Duration::from_secs(60);

/// Upper bound on cached drill-list entries.
pub const DEFAULT_DRILLS_CACHE_MAX_ENTRIES: usize = 16;

/// Attempt history length when the caller does not ask for one.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Largest attempt history a caller may request.
pub const MAX_HISTORY_LIMIT: usize = 100;
