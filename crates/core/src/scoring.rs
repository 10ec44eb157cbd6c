//! Attempt scoring.
//!
//! Each answer is matched against the keywords of the question it names. A keyword counts as
//! matched when the lowercased answer text contains the lowercased keyword as a substring; no
//! tokenisation or word boundaries are applied, so `"prescoped"` matches `"scope"`.
//!
//! The aggregate score is `round(100 * matched / total)` over all answered questions, rounded
//! half-up, or `0` when no keywords were scored. Answers naming an unknown question are
//! reported with a zero detail and left out of both sides of the ratio.
//!
//! Scoring is pure: no I/O, no shared state.

use crate::model::{Answer, Drill, Question};
use serde::{Deserialize, Serialize};

/// Detail text for an answer whose `qid` is not in the drill.
pub const QUESTION_NOT_FOUND: &str = "Question not found";

/// Per-answer match report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub qid: String,
    /// Matched keyword count.
    pub score: u32,
    /// Keyword count of the question, `0` when the question was not found.
    pub total: u32,
    pub details: String,
}

impl ScoreDetail {
    fn not_found(qid: &str) -> Self {
        Self {
            qid: qid.to_string(),
            score: 0,
            total: 0,
            details: QUESTION_NOT_FOUND.to_string(),
        }
    }

    fn matched(qid: &str, matched: u32, total: u32) -> Self {
        Self {
            qid: qid.to_string(),
            score: matched,
            total,
            details: format!("Matched {} of {} keywords", matched, total),
        }
    }
}

/// Result of scoring one submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Aggregate percentage in `0..=100`.
    pub score: u8,
    pub matched_keywords: u32,
    pub total_keywords: u32,
    /// One entry per answer, in submission order.
    pub details: Vec<ScoreDetail>,
}

/// Scores `answers` against the questions of `drill`.
pub fn score_attempt(drill: &Drill, answers: &[Answer]) -> ScoreReport {
    score_questions(&drill.questions, answers)
}

/// Scores `answers` against an arbitrary question set.
pub fn score_questions(questions: &[Question], answers: &[Answer]) -> ScoreReport {
    let mut matched_keywords: u32 = 0;
    let mut total_keywords: u32 = 0;

    let details = answers
        .iter()
        .map(|answer| {
            let Some(question) = questions.iter().find(|q| q.id == answer.qid) else {
                tracing::debug!(qid = %answer.qid, "answer references unknown question");
                return ScoreDetail::not_found(&answer.qid);
            };

            let text = answer.text.to_lowercase();
            let total = question.keywords.len() as u32;
            let matched = question
                .keywords
                .iter()
                .filter(|keyword| text.contains(&keyword.to_lowercase()))
                .count() as u32;

            total_keywords += total;
            matched_keywords += matched;

            ScoreDetail::matched(&answer.qid, matched, total)
        })
        .collect();

    ScoreReport {
        score: percentage(matched_keywords, total_keywords),
        matched_keywords,
        total_keywords,
        details,
    }
}

/// `round(100 * matched / total)` with halves rounded up, in integer arithmetic.
fn percentage(matched: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let matched = u64::from(matched.min(total));
    let total = u64::from(total);
    ((200 * matched + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use drills_types::NonEmptyText;
    use drills_uuid::ShardableUuid;

    fn question(id: &str, keywords: &[&str]) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Prompt for {id}"),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn scope_hoisting() -> Vec<Question> {
        vec![question("js1", &["scope", "hoisting"])]
    }

    #[test]
    fn scoping_matches_hoisting_but_not_scope() {
        // "scoping" does not contain "scope"; only "hoisting" is found.
        let report = score_questions(
            &scope_hoisting(),
            &[Answer::new("js1", "Scoping and Hoisting explained")],
        );

        assert_eq!(report.details[0].score, 1);
        assert_eq!(report.details[0].total, 2);
        assert_eq!(report.details[0].details, "Matched 1 of 2 keywords");
        assert_eq!(report.score, 50);
    }

    #[test]
    fn scope_and_hoisting_matches_both_keywords() {
        let report = score_questions(
            &scope_hoisting(),
            &[Answer::new("js1", "Scope and Hoisting explained")],
        );

        assert_eq!(report.details[0].details, "Matched 2 of 2 keywords");
        assert_eq!(report.score, 100);
    }

    #[test]
    fn unrelated_answer_scores_zero() {
        let report = score_questions(&scope_hoisting(), &[Answer::new("js1", "I don't know")]);

        assert_eq!(report.details[0].score, 0);
        assert_eq!(report.details[0].total, 2);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let report = score_questions(
            &[question("q1", &["scope"])],
            &[Answer::new("q1", "SCOPE")],
        );
        assert_eq!(report.details[0].score, 1);

        let report = score_questions(
            &[question("q1", &["HoIsTiNg"])],
            &[Answer::new("q1", "hoisting")],
        );
        assert_eq!(report.details[0].score, 1);
    }

    #[test]
    fn keyword_inside_unrelated_word_still_matches() {
        let report = score_questions(
            &[question("q1", &["scope"])],
            &[Answer::new("q1", "prescoped")],
        );

        assert_eq!(report.details[0].score, 1);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn empty_text_matches_nothing() {
        let report = score_questions(
            &[question("q1", &["scope", "hoisting", "closure"])],
            &[Answer::new("q1", "")],
        );

        assert_eq!(report.details[0].score, 0);
        assert_eq!(report.details[0].total, 3);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn concatenated_keywords_match_every_keyword() {
        let keywords = ["event", "loop", "asynchronous", "non-blocking"];
        let report = score_questions(
            &[question("node1", &keywords)],
            &[Answer::new("node1", keywords.concat())],
        );

        assert_eq!(report.details[0].score, report.details[0].total);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn unknown_question_is_excluded_from_aggregate() {
        let report = score_questions(
            &scope_hoisting(),
            &[
                Answer::new("js1", "scope only"),
                Answer::new("typo", "scope and hoisting"),
            ],
        );

        assert_eq!(
            report.details[1],
            ScoreDetail {
                qid: "typo".into(),
                score: 0,
                total: 0,
                details: QUESTION_NOT_FOUND.into(),
            }
        );
        assert_eq!(report.total_keywords, 2);
        assert_eq!(report.matched_keywords, 1);
        assert_eq!(report.score, 50);
    }

    #[test]
    fn only_unknown_questions_score_zero() {
        let report = score_questions(&scope_hoisting(), &[Answer::new("nope", "scope")]);
        assert_eq!(report.total_keywords, 0);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn empty_submission_scores_zero_with_no_details() {
        let report = score_questions(&scope_hoisting(), &[]);
        assert_eq!(report.score, 0);
        assert!(report.details.is_empty());
    }

    #[test]
    fn question_without_keywords_contributes_nothing() {
        let report = score_questions(
            &[question("empty", &[]), question("q2", &["scope"])],
            &[Answer::new("empty", "anything"), Answer::new("q2", "scope")],
        );

        assert_eq!(report.details[0].total, 0);
        assert_eq!(report.details[0].details, "Matched 0 of 0 keywords");
        assert_eq!(report.total_keywords, 1);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn aggregate_is_exact_when_ratio_is_whole() {
        // 1 of 3 plus 2 of 2 is 3 of 5.
        let report = score_questions(
            &[question("a", &["x", "y", "z"]), question("b", &["p", "q"])],
            &[Answer::new("a", "x"), Answer::new("b", "p q")],
        );

        assert_eq!(report.total_keywords, 5);
        assert_eq!(report.matched_keywords, 3);
        assert_eq!(report.score, 60);
    }

    #[test]
    fn aggregate_rounds_to_nearest() {
        let report = score_questions(
            &[question("a", &["x", "y", "z"])],
            &[Answer::new("a", "x")],
        );
        assert_eq!(report.score, 33);

        let report = score_questions(
            &[question("a", &["x", "y", "z"])],
            &[Answer::new("a", "x y")],
        );
        assert_eq!(report.score, 67);
    }

    #[test]
    fn aggregate_rounds_halves_up() {
        // 1 of 8 is 12.5%.
        let report = score_questions(
            &[question("a", &["k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8"])],
            &[Answer::new("a", "k1")],
        );
        assert_eq!(report.score, 13);
    }

    #[test]
    fn details_follow_submission_order() {
        let questions = vec![question("q1", &["a"]), question("q2", &["b"])];
        let report = score_questions(
            &questions,
            &[Answer::new("q2", "b"), Answer::new("q1", "-")],
        );

        let order: Vec<&str> = report.details.iter().map(|d| d.qid.as_str()).collect();
        assert_eq!(order, vec!["q2", "q1"]);
    }

    #[test]
    fn repeated_answers_are_each_counted() {
        let report = score_questions(
            &[question("q1", &["a", "b"])],
            &[Answer::new("q1", "a"), Answer::new("q1", "a b")],
        );

        assert_eq!(report.total_keywords, 4);
        assert_eq!(report.matched_keywords, 3);
        assert_eq!(report.score, 75);
    }

    #[test]
    fn bounds_hold_for_full_five_question_drill() {
        let drill = Drill {
            id: ShardableUuid::new(),
            title: NonEmptyText::new("JavaScript Fundamentals").unwrap(),
            difficulty: crate::model::Difficulty::Easy,
            tags: vec!["javascript".into()],
            questions: vec![
                question("js1", &["scope", "hoisting", "reassignment", "redeclaration"]),
                question("js2", &["closure", "function", "scope", "lexical"]),
                question("js3", &["this", "context", "binding", "arrow"]),
                question("js4", &["equality", "strict", "type", "coercion"]),
                question("js5", &["promise", "async", "await", "then", "catch"]),
            ],
            created_at: Utc::now(),
        };

        let answer_sets = [
            ["", "", "", "", ""],
            ["scope", "closure", "this", "equality", "promise"],
            [
                "scope hoisting reassignment redeclaration",
                "closure function scope lexical",
                "this context binding arrow",
                "equality strict type coercion",
                "promise async await then catch",
            ],
            ["SCOPE", "nothing", "Arrow functions", "TYPE", "then/catch"],
        ];

        for texts in answer_sets {
            let answers: Vec<Answer> = drill
                .questions
                .iter()
                .zip(texts)
                .map(|(q, t)| Answer::new(q.id.clone(), t))
                .collect();
            let report = score_attempt(&drill, &answers);

            assert!(report.matched_keywords <= report.total_keywords);
            assert!(report.score <= 100);
            for detail in &report.details {
                assert!(detail.score <= detail.total);
            }
        }
    }

    #[test]
    fn scoring_does_not_mutate_inputs() {
        let questions = scope_hoisting();
        let answers = vec![Answer::new("js1", "Scope")];
        let before = (questions.clone(), answers.clone());

        let first = score_questions(&questions, &answers);
        let second = score_questions(&questions, &answers);

        assert_eq!(first, second);
        assert_eq!((questions, answers), before);
    }
}
