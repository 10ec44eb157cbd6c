//! Document storage.
//!
//! [`DocumentStore`] is the persistence seam used by the services. Lookups return `Ok(None)`
//! when a document does not exist, so "not found" is never confused with an I/O failure.
//!
//! Two implementations are provided:
//! - [`FileStore`]: one YAML file per document in a sharded directory tree
//! - [`MemoryStore`]: in-process maps, for tests and throwaway runs

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::model::{Attempt, Drill, User};
use crate::DrillsResult;
use drills_types::EmailAddress;
use drills_uuid::ShardableUuid;

pub trait DocumentStore: Send + Sync {
    /// Stores a new drill. Fails with `AlreadyExists` if the id is taken.
    fn insert_drill(&self, drill: &Drill) -> DrillsResult<()>;

    fn get_drill(&self, id: &ShardableUuid) -> DrillsResult<Option<Drill>>;

    /// All drills, in no particular order.
    fn list_drills(&self) -> DrillsResult<Vec<Drill>>;

    /// Stores a new attempt. Fails with `AlreadyExists` if the id is taken.
    fn insert_attempt(&self, attempt: &Attempt) -> DrillsResult<()>;

    fn get_attempt(&self, id: &ShardableUuid) -> DrillsResult<Option<Attempt>>;

    /// Attempts owned by `user_id`, in no particular order.
    fn list_attempts_for_user(&self, user_id: &ShardableUuid) -> DrillsResult<Vec<Attempt>>;

    /// Creates or replaces a user document.
    fn upsert_user(&self, user: &User) -> DrillsResult<()>;

    fn get_user(&self, id: &ShardableUuid) -> DrillsResult<Option<User>>;

    fn find_user_by_email(&self, email: &EmailAddress) -> DrillsResult<Option<User>>;
}
