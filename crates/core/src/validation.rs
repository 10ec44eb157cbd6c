//! Drill validation.
//!
//! A `NewDrill` must pass [`validate_new_drill`] before it can be stored. The function collects
//! every problem it finds rather than stopping at the first, so a broken seed file can be fixed
//! in one pass.

use crate::constants::QUESTIONS_PER_DRILL;
use crate::model::{Difficulty, Drill, NewDrill, Question};
use chrono::{DateTime, Utc};
use drills_types::NonEmptyText;
use drills_uuid::ShardableUuid;
use std::collections::HashSet;
use std::fmt;

/// A single reason a drill was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrillProblem {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("difficulty must be one of easy, medium, hard (got '{0}')")]
    InvalidDifficulty(String),
    #[error("each drill must have exactly {expected} questions (got {actual})")]
    WrongQuestionCount { expected: usize, actual: usize },
    #[error("question {index} is missing an id")]
    MissingQuestionId { index: usize },
    #[error("question '{id}' is missing a prompt")]
    MissingPrompt { id: String },
    #[error("question '{id}' must have at least one keyword")]
    NoKeywords { id: String },
    #[error("question '{id}' has an empty keyword")]
    EmptyKeyword { id: String },
    #[error("duplicate question id '{0}'")]
    DuplicateQuestionId(String),
}

/// All problems found in one drill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrillValidationError {
    pub problems: Vec<DrillProblem>,
}

impl fmt::Display for DrillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid drill: ")?;
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", problem)?;
        }
        Ok(())
    }
}

impl std::error::Error for DrillValidationError {}

/// A drill that passed validation but has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedDrill {
    title: NonEmptyText,
    difficulty: Difficulty,
    tags: Vec<String>,
    questions: Vec<Question>,
}

impl ValidatedDrill {
    pub fn title(&self) -> &NonEmptyText {
        &self.title
    }

    pub fn into_drill(self, id: ShardableUuid, created_at: DateTime<Utc>) -> Drill {
        Drill {
            id,
            title: self.title,
            difficulty: self.difficulty,
            tags: self.tags,
            questions: self.questions,
            created_at,
        }
    }
}

/// Checks a drill against the storage rules.
///
/// Title is trimmed; tags are trimmed, blank tags dropped and duplicates removed keeping the
/// first occurrence. Question ids and keywords are stored as given.
///
/// # Errors
///
/// Returns a [`DrillValidationError`] listing every [`DrillProblem`] found.
pub fn validate_new_drill(new: NewDrill) -> Result<ValidatedDrill, DrillValidationError> {
    let mut problems = Vec::new();

    let title = NonEmptyText::new(&new.title).ok();
    if title.is_none() {
        problems.push(DrillProblem::EmptyTitle);
    }

    let difficulty = match new.difficulty.parse::<Difficulty>() {
        Ok(d) => Some(d),
        Err(got) => {
            problems.push(DrillProblem::InvalidDifficulty(got));
            None
        }
    };

    if new.questions.len() != QUESTIONS_PER_DRILL {
        problems.push(DrillProblem::WrongQuestionCount {
            expected: QUESTIONS_PER_DRILL,
            actual: new.questions.len(),
        });
    }

    let mut seen_ids = HashSet::new();
    for (index, question) in new.questions.iter().enumerate() {
        if question.id.trim().is_empty() {
            problems.push(DrillProblem::MissingQuestionId { index });
            continue;
        }
        if !seen_ids.insert(question.id.as_str()) {
            problems.push(DrillProblem::DuplicateQuestionId(question.id.clone()));
        }
        if question.prompt.trim().is_empty() {
            problems.push(DrillProblem::MissingPrompt {
                id: question.id.clone(),
            });
        }
        if question.keywords.is_empty() {
            problems.push(DrillProblem::NoKeywords {
                id: question.id.clone(),
            });
        } else if question.keywords.iter().any(|k| k.trim().is_empty()) {
            problems.push(DrillProblem::EmptyKeyword {
                id: question.id.clone(),
            });
        }
    }

    let (Some(title), Some(difficulty)) = (title, difficulty) else {
        return Err(DrillValidationError { problems });
    };
    if !problems.is_empty() {
        return Err(DrillValidationError { problems });
    }

    let mut tags: Vec<String> = Vec::with_capacity(new.tags.len());
    for tag in new.tags {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    let questions = new
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            prompt: q.prompt,
            keywords: q.keywords,
        })
        .collect();

    Ok(ValidatedDrill {
        title,
        difficulty,
        tags,
        questions,
    })
}
