//! Domain model for drills, attempts and users.
//!
//! Stored documents (`Drill`, `Attempt`, `User`) are serialised to YAML by the file store.
//! `NewDrill` and `NewQuestion` are the unvalidated input shapes; they only become a `Drill`
//! through [`crate::validation::validate_new_drill`].

use chrono::{DateTime, Utc};
use drills_types::{EmailAddress, NonEmptyText};
use drills_uuid::ShardableUuid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How hard a drill is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Wire/storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Case-sensitive: only the lowercase wire spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(other.to_string()),
        }
    }
}

/// One interview question and the keywords a good answer mentions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub keywords: Vec<String>,
}

/// A stored drill. Always holds exactly five questions when created through validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
    pub id: ShardableUuid,
    pub title: NonEmptyText,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl Drill {
    pub fn summary(&self) -> DrillSummary {
        DrillSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            difficulty: self.difficulty,
            tags: self.tags.clone(),
            created_at: self.created_at,
        }
    }
}

/// The listing projection of a drill (no questions).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillSummary {
    pub id: ShardableUuid,
    pub title: NonEmptyText,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated drill input, as read from a seed file or a `create-drill` document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDrill {
    pub title: String,
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A learner's free-text answer to one question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub qid: String,
    pub text: String,
}

impl Answer {
    pub fn new(qid: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            qid: qid.into(),
            text: text.into(),
        }
    }
}

/// One scored submission. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: ShardableUuid,
    pub user_id: ShardableUuid,
    pub drill_id: ShardableUuid,
    pub answers: Vec<Answer>,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

/// An identity provider link on a user account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub provider: String,
    pub provider_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: ShardableUuid,
    pub email: EmailAddress,
    pub name: NonEmptyText,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub providers: Vec<Provider>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_only_lowercase_spellings() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("medium".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Hard".parse::<Difficulty>(), Err("Hard".to_string()));
        assert_eq!("extreme".parse::<Difficulty>(), Err("extreme".to_string()));
    }
}
