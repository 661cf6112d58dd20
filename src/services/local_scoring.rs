//! 本地评分服务 - 业务能力层
//!
//! 离线模式下代替评分接口，按与服务端相同的规则计算成绩

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{AnswerMap, Question, QuestionId, ScoreResult};
use crate::services::ScoringService;

/// 本地评分服务
///
/// 职责：
/// - 持有一份题目（含正确答案）
/// - 比较作答与正确答案，两边都能解析为整数时按整数比较，否则按字符串比较
/// - 总分为题目数量，未知题目 ID 忽略
pub struct LocalScoringService {
    correct_answers: HashMap<QuestionId, JsonValue>,
}

impl LocalScoringService {
    pub fn new(questions: &[Question]) -> Self {
        Self {
            correct_answers: questions
                .iter()
                .map(|q| (q.id.clone(), q.correct_answer.clone()))
                .collect(),
        }
    }

    /// 计算成绩
    pub fn score(&self, answers: &AnswerMap) -> ScoreResult {
        let total = self.correct_answers.len() as u32;
        let score = answers
            .iter()
            .filter(|(id, choice)| {
                self.correct_answers
                    .get(*id)
                    .map_or(false, |correct| answer_matches(correct, choice))
            })
            .count() as u32;

        let percentage = if total > 0 {
            round2(score as f64 / total as f64 * 100.0)
        } else {
            0.0
        };

        ScoreResult {
            score,
            total,
            percentage: Some(percentage),
        }
    }
}

#[async_trait]
impl ScoringService for LocalScoringService {
    async fn submit(&self, answers: &AnswerMap) -> Result<ScoreResult, ApiError> {
        let result = self.score(answers);
        debug!("本地评分: {}", result);
        Ok(result)
    }
}

fn answer_matches(correct: &JsonValue, choice: &str) -> bool {
    let correct_num = match correct {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<i64>().ok().map(|v| v as f64),
        _ => None,
    };
    let choice_num = choice.trim().parse::<i64>().ok().map(|v| v as f64);

    match (correct_num, choice_num) {
        (Some(c), Some(u)) => c == u,
        _ => match correct {
            JsonValue::String(s) => s == choice,
            other => other.to_string() == choice,
        },
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawQuestion;
    use serde_json::json;

    fn questions() -> Vec<Question> {
        let raw: Vec<RawQuestion> = serde_json::from_value(json!([
            {"id": 1, "question": "Q1", "options": ["A", "B"], "correct_answer": "0"},
            {"id": 2, "question": "Q2", "type": "tf", "options": ["true", "false"], "correct_answer": 1},
            {"id": 3, "question": "Q3", "options": ["x", "y", "z"], "correct_answer": "y"}
        ]))
        .unwrap();
        raw.iter().enumerate().map(|(i, q)| q.validate(i).unwrap()).collect()
    }

    #[test]
    fn test_numeric_and_text_comparison() {
        assert!(answer_matches(&json!("0"), "0"));
        assert!(answer_matches(&json!(1), "1"));
        assert!(answer_matches(&json!(" 2 "), "2"));
        assert!(!answer_matches(&json!("0"), "1"));
        assert!(answer_matches(&json!("y"), "y"));
        assert!(!answer_matches(&json!("y"), "1"));
    }

    #[test]
    fn test_score_and_percentage() {
        let scorer = LocalScoringService::new(&questions());
        let answers: AnswerMap = [(1u64, "0"), (2u64, "0"), (99u64, "0")].into_iter().collect();
        let result = scorer.score(&answers);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 3);
        assert_eq!(result.percentage, Some(33.33));
    }

    #[test]
    fn test_empty_question_set() {
        let scorer = LocalScoringService::new(&[]);
        let result = scorer.score(&AnswerMap::new());
        assert_eq!(result.total, 0);
        assert_eq!(result.percentage, Some(0.0));
    }
}
