//! 评分服务 - 业务能力层
//!
//! 只负责"提交答案并取得成绩"能力，成绩以服务端计算为准

use async_trait::async_trait;
use std::sync::Arc;

use crate::clients::QuizApiClient;
use crate::error::ApiError;
use crate::models::{AnswerMap, ScoreResult};

/// 评分服务
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn submit(&self, answers: &AnswerMap) -> Result<ScoreResult, ApiError>;
}

#[async_trait]
impl<T: ScoringService + ?Sized> ScoringService for Box<T> {
    async fn submit(&self, answers: &AnswerMap) -> Result<ScoreResult, ApiError> {
        (**self).submit(answers).await
    }
}

#[async_trait]
impl<T: ScoringService + ?Sized> ScoringService for Arc<T> {
    async fn submit(&self, answers: &AnswerMap) -> Result<ScoreResult, ApiError> {
        (**self).submit(answers).await
    }
}

/// 通过 HTTP 接口评分
pub struct HttpScoringService {
    client: QuizApiClient,
}

impl HttpScoringService {
    pub fn new(client: QuizApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn submit(&self, answers: &AnswerMap) -> Result<ScoreResult, ApiError> {
        self.client.submit_answers(answers).await
    }
}
