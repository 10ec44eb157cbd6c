//! File-backed document store.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//!   drills/<s1>/<s2>/<uuid>/drill.yaml
//!   attempts/<s1>/<s2>/<uuid>/attempt.yaml
//!   users/<s1>/<s2>/<uuid>/user.yaml
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the document id. Documents are
//! written to a temporary file and renamed into place, so readers never observe a partially
//! written document.

use super::DocumentStore;
use crate::config::CoreConfig;
use crate::constants::{ATTEMPT_FILENAME, DRILL_FILENAME, USER_FILENAME};
use crate::model::{Attempt, Drill, User};
use crate::{DrillsError, DrillsResult};
use drills_types::EmailAddress;
use drills_uuid::ShardableUuid;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct FileStore {
    cfg: Arc<CoreConfig>,
}

impl FileStore {
    /// Opens the store rooted at `cfg.data_dir()`, creating the collection directories if
    /// they are missing.
    ///
    /// # Errors
    ///
    /// Returns `DrillsError::StorageDirCreation` if a collection directory cannot be created.
    pub fn open(cfg: Arc<CoreConfig>) -> DrillsResult<Self> {
        for dir in [cfg.drills_dir(), cfg.attempts_dir(), cfg.users_dir()] {
            fs::create_dir_all(&dir).map_err(DrillsError::StorageDirCreation)?;
        }
        tracing::debug!("file store opened at {}", cfg.data_dir().display());
        Ok(Self { cfg })
    }

    pub fn data_dir(&self) -> &Path {
        self.cfg.data_dir()
    }

    /// Allocates the document directory for `id` and writes the document. Fails if the
    /// directory already exists.
    fn write_new<T: Serialize>(
        &self,
        base_dir: &Path,
        id: &ShardableUuid,
        filename: &str,
        doc: &T,
    ) -> DrillsResult<()> {
        let doc_dir = id.sharded_dir(base_dir);
        if let Some(parent) = doc_dir.parent() {
            fs::create_dir_all(parent).map_err(DrillsError::StorageDirCreation)?;
        }

        match fs::create_dir(&doc_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(DrillsError::AlreadyExists(id.to_string()));
            }
            Err(e) => return Err(DrillsError::StorageDirCreation(e)),
        }

        write_document(&doc_dir.join(filename), doc)
    }

    fn write_replace<T: Serialize>(
        &self,
        base_dir: &Path,
        id: &ShardableUuid,
        filename: &str,
        doc: &T,
    ) -> DrillsResult<()> {
        let doc_dir = id.sharded_dir(base_dir);
        fs::create_dir_all(&doc_dir).map_err(DrillsError::StorageDirCreation)?;
        write_document(&doc_dir.join(filename), doc)
    }

    fn read_one<T: DeserializeOwned>(
        &self,
        base_dir: &Path,
        id: &ShardableUuid,
        filename: &str,
    ) -> DrillsResult<Option<T>> {
        let path = id.sharded_dir(base_dir).join(filename);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DrillsError::FileRead(e)),
        };

        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(DrillsError::YamlDeserialization)
    }

    /// Reads every document in a collection. Documents that cannot be parsed are logged and
    /// skipped.
    fn read_all<T: DeserializeOwned>(&self, base_dir: &Path, filename: &str) -> Vec<T> {
        document_paths(base_dir, filename)
            .into_iter()
            .filter_map(|path| {
                let contents = match fs::read_to_string(&path) {
                    Ok(contents) => contents,
                    Err(e) => {
                        tracing::warn!("failed to read {}: {}", path.display(), e);
                        return None;
                    }
                };
                match serde_yaml::from_str(&contents) {
                    Ok(doc) => Some(doc),
                    Err(e) => {
                        tracing::warn!("failed to parse {}: {}", path.display(), e);
                        None
                    }
                }
            })
            .collect()
    }
}

impl DocumentStore for FileStore {
    fn insert_drill(&self, drill: &Drill) -> DrillsResult<()> {
        self.write_new(&self.cfg.drills_dir(), &drill.id, DRILL_FILENAME, drill)
    }

    fn get_drill(&self, id: &ShardableUuid) -> DrillsResult<Option<Drill>> {
        self.read_one(&self.cfg.drills_dir(), id, DRILL_FILENAME)
    }

    fn list_drills(&self) -> DrillsResult<Vec<Drill>> {
        Ok(self.read_all(&self.cfg.drills_dir(), DRILL_FILENAME))
    }

    fn insert_attempt(&self, attempt: &Attempt) -> DrillsResult<()> {
        self.write_new(
            &self.cfg.attempts_dir(),
            &attempt.id,
            ATTEMPT_FILENAME,
            attempt,
        )
    }

    fn get_attempt(&self, id: &ShardableUuid) -> DrillsResult<Option<Attempt>> {
        self.read_one(&self.cfg.attempts_dir(), id, ATTEMPT_FILENAME)
    }

    fn list_attempts_for_user(&self, user_id: &ShardableUuid) -> DrillsResult<Vec<Attempt>> {
        let attempts: Vec<Attempt> = self.read_all(&self.cfg.attempts_dir(), ATTEMPT_FILENAME);
        Ok(attempts
            .into_iter()
            .filter(|a| &a.user_id == user_id)
            .collect())
    }

    fn upsert_user(&self, user: &User) -> DrillsResult<()> {
        self.write_replace(&self.cfg.users_dir(), &user.id, USER_FILENAME, user)
    }

    fn get_user(&self, id: &ShardableUuid) -> DrillsResult<Option<User>> {
        self.read_one(&self.cfg.users_dir(), id, USER_FILENAME)
    }

    fn find_user_by_email(&self, email: &EmailAddress) -> DrillsResult<Option<User>> {
        let users: Vec<User> = self.read_all(&self.cfg.users_dir(), USER_FILENAME);
        Ok(users.into_iter().find(|u| &u.email == email))
    }
}

fn write_document<T: Serialize>(path: &Path, doc: &T) -> DrillsResult<()> {
    let yaml = serde_yaml::to_string(doc).map_err(DrillsError::YamlSerialization)?;
    let tmp = path.with_extension("yaml.tmp");
    fs::write(&tmp, yaml).map_err(DrillsError::FileWrite)?;
    if let Err(e) = fs::rename(&tmp, path) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            tracing::warn!("failed to remove {}: {}", tmp.display(), cleanup);
        }
        return Err(DrillsError::FileWrite(e));
    }
    Ok(())
}

/// Walks `<base>/<s1>/<s2>/<id>/<filename>` and returns every existing document path.
fn document_paths(base_dir: &Path, filename: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    let s1_iter = match fs::read_dir(base_dir) {
        Ok(it) => it,
        Err(_) => return paths,
    };
    for s1 in s1_iter.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(_) => continue,
        };
        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let id_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(_) => continue,
            };
            for id_ent in id_iter.flatten() {
                let doc_path = id_ent.path().join(filename);
                if doc_path.is_file() {
                    paths.push(doc_path);
                }
            }
        }
    }

    paths
}
