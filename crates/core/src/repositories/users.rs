//! User accounts.
//!
//! Users are keyed by a normalised email address. Registering an email that already exists
//! refreshes the profile and links any new provider instead of creating a second account.

use crate::error::{DrillsError, DrillsResult};
use crate::model::{Provider, User};
use crate::store::DocumentStore;
use chrono::Utc;
use drills_types::{EmailAddress, NonEmptyText};
use drills_uuid::ShardableUuid;
use std::sync::Arc;

/// Input for [`UserService::register`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub provider: Option<Provider>,
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn DocumentStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Creates the user, or updates the existing user with the same email.
    ///
    /// On update the name is replaced, the picture is replaced when one is given, and the
    /// provider is appended unless the same `(provider, provider_id)` pair is already linked.
    /// The id and creation time never change.
    ///
    /// # Errors
    ///
    /// Returns `DrillsError::InvalidText` if the email is malformed or the name is blank.
    pub fn register(&self, new: NewUser) -> DrillsResult<User> {
        let email = EmailAddress::parse(&new.email)?;
        let name = NonEmptyText::new(&new.name)?;
        let picture = new
            .picture
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let user = match self.store.find_user_by_email(&email)? {
            Some(mut existing) => {
                existing.name = name;
                if picture.is_some() {
                    existing.picture = picture;
                }
                if let Some(provider) = new.provider {
                    if !existing.providers.contains(&provider) {
                        existing.providers.push(provider);
                    }
                }
                tracing::debug!(user_id = %existing.id, "user updated");
                existing
            }
            None => {
                let user = User {
                    id: ShardableUuid::new(),
                    email,
                    name,
                    picture,
                    providers: new.provider.into_iter().collect(),
                    created_at: Utc::now(),
                };
                tracing::info!(user_id = %user.id, "user registered");
                user
            }
        };

        self.store.upsert_user(&user)?;
        Ok(user)
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns `DrillsError::UserNotFound` if no user has this id.
    pub fn get(&self, id: &ShardableUuid) -> DrillsResult<User> {
        self.store
            .get_user(id)?
            .ok_or_else(|| DrillsError::UserNotFound(id.to_string()))
    }
}
