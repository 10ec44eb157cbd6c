//! JSON request and response bodies.
//!
//! Field names are camelCase on the wire. Identifiers are the canonical 32-hex strings and
//! timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use drills_core::{
    Answer, AttemptHistoryEntry, Difficulty, Drill, DrillRef, DrillSummary, Question,
    ScoreDetail, SubmittedAttempt, User,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyRes {
    Easy,
    Medium,
    Hard,
}

impl From<Difficulty> for DifficultyRes {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Easy => DifficultyRes::Easy,
            Difficulty::Medium => DifficultyRes::Medium,
            Difficulty::Hard => DifficultyRes::Hard,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrillSummaryRes {
    pub id: String,
    pub title: String,
    pub difficulty: DifficultyRes,
    pub tags: Vec<String>,
}

impl From<DrillSummary> for DrillSummaryRes {
    fn from(s: DrillSummary) -> Self {
        Self {
            id: s.id.to_string(),
            title: s.title.into_string(),
            difficulty: s.difficulty.into(),
            tags: s.tags,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListDrillsRes {
    pub drills: Vec<DrillSummaryRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionRes {
    pub id: String,
    pub prompt: String,
    pub keywords: Vec<String>,
}

impl From<Question> for QuestionRes {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt,
            keywords: q.keywords,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrillRes {
    pub id: String,
    pub title: String,
    pub difficulty: DifficultyRes,
    pub tags: Vec<String>,
    pub questions: Vec<QuestionRes>,
}

impl From<Drill> for DrillRes {
    fn from(d: Drill) -> Self {
        Self {
            id: d.id.to_string(),
            title: d.title.into_string(),
            difficulty: d.difficulty.into(),
            tags: d.tags,
            questions: d.questions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnswerReq {
    pub qid: String,
    pub text: String,
}

impl From<AnswerReq> for Answer {
    fn from(a: AnswerReq) -> Self {
        Answer::new(a.qid, a.text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptReq {
    pub drill_id: String,
    pub answers: Vec<AnswerReq>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreDetailRes {
    pub qid: String,
    /// Keywords matched in this answer.
    pub score: u32,
    /// Keywords of the question; 0 when the question does not exist.
    pub total: u32,
    pub details: String,
}

impl From<ScoreDetail> for ScoreDetailRes {
    fn from(d: ScoreDetail) -> Self {
        Self {
            qid: d.qid,
            score: d.score,
            total: d.total,
            details: d.details,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmitAttemptRes {
    pub id: String,
    /// Percentage of all keywords matched, 0 to 100.
    pub score: u8,
    pub details: Vec<ScoreDetailRes>,
}

impl From<SubmittedAttempt> for SubmitAttemptRes {
    fn from(s: SubmittedAttempt) -> Self {
        Self {
            id: s.attempt.id.to_string(),
            score: s.attempt.score,
            details: s.details.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttemptDrillRes {
    pub id: String,
    pub title: String,
    pub difficulty: DifficultyRes,
}

impl From<DrillRef> for AttemptDrillRes {
    fn from(d: DrillRef) -> Self {
        Self {
            id: d.id.to_string(),
            title: d.title.into_string(),
            difficulty: d.difficulty.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummaryRes {
    pub id: String,
    /// `null` when the drill no longer exists.
    pub drill: Option<AttemptDrillRes>,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

impl From<AttemptHistoryEntry> for AttemptSummaryRes {
    fn from(e: AttemptHistoryEntry) -> Self {
        Self {
            id: e.id.to_string(),
            drill: e.drill.map(Into::into),
            score: e.score,
            created_at: e.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListAttemptsRes {
    pub attempts: Vec<AttemptSummaryRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeRes {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for MeRes {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.as_str().to_string(),
            name: u.name.into_string(),
            picture: u.picture,
            created_at: u.created_at,
        }
    }
}
