//! 题目来源 - 业务能力层
//!
//! 只负责"提供题目"能力，不关心流程

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clients::QuizApiClient;
use crate::error::ApiError;
use crate::models::{Question, RawQuestion};

/// 题目来源
///
/// 返回空列表与返回错误在控制器中同样视为"没有题目"。
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError>;
}

#[async_trait]
impl<T: QuestionSource + ?Sized> QuestionSource for Box<T> {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        (**self).fetch_questions().await
    }
}

#[async_trait]
impl<T: QuestionSource + ?Sized> QuestionSource for Arc<T> {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        (**self).fetch_questions().await
    }
}

/// 通过 HTTP 接口获取题目
pub struct HttpQuestionSource {
    client: QuizApiClient,
}

impl HttpQuestionSource {
    pub fn new(client: QuizApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        let raw = self.client.fetch_questions().await?;
        convert_fetched(self.client.questions_url().as_str(), &raw)
    }
}

/// 将接口返回的原始题目转换为强类型题目，任一题目不合法则整体失败
fn convert_fetched(endpoint: &str, raw: &[RawQuestion]) -> Result<Vec<Question>, ApiError> {
    raw.iter()
        .enumerate()
        .map(|(index, q)| {
            q.validate(index).map_err(|e| {
                warn!("题库返回的第 {} 道题目不合法: {}", index + 1, e);
                ApiError::InvalidPayload {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}

/// 内存中的固定题目来源
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionSource {
    questions: Vec<Question>,
}

impl StaticQuestionSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// 从原始题目构造，跳过不合法的题目
    pub fn from_raw(raw: &[RawQuestion]) -> Self {
        let questions = raw
            .iter()
            .enumerate()
            .filter_map(|(index, q)| match q.validate(index) {
                Ok(question) => Some(question),
                Err(e) => {
                    warn!("跳过不合法的题目: {}", e);
                    None
                }
            })
            .collect();
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        debug!("使用内置题目: {} 道", self.questions.len());
        Ok(self.questions.clone())
    }
}
