/// 测验 API 客户端
///
/// 封装题库与评分接口的 HTTP 调用
use crate::config::Config;
use crate::error::{ApiError, ConfigError};
use crate::models::{AnswerMap, RawQuestion, ScoreResult, SubmitRequest};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// 测验 API 客户端
#[derive(Clone)]
pub struct QuizApiClient {
    http: Client,
    questions_url: Url,
    submit_url: Url,
}

impl QuizApiClient {
    /// 创建新的 API 客户端
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            http: Client::new(),
            questions_url: config.endpoint(&config.questions_path)?,
            submit_url: config.endpoint(&config.submit_path)?,
        })
    }

    pub fn questions_url(&self) -> &Url {
        &self.questions_url
    }

    pub fn submit_url(&self) -> &Url {
        &self.submit_url
    }

    /// 获取题目列表
    ///
    /// # 返回
    /// 返回原始题目数据，可能为空列表
    pub async fn fetch_questions(&self) -> Result<Vec<RawQuestion>, ApiError> {
        let endpoint = self.questions_url.as_str();
        debug!("GET {}", endpoint);

        let response = self
            .http
            .get(self.questions_url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let questions: Vec<RawQuestion> = Self::read_json(endpoint, response).await?;
        debug!("获取到 {} 道题目", questions.len());

        Ok(questions)
    }

    /// 提交答案
    ///
    /// # 参数
    /// - `answers`: 完整的作答记录
    ///
    /// # 返回
    /// 返回服务端计算的成绩
    pub async fn submit_answers(&self, answers: &AnswerMap) -> Result<ScoreResult, ApiError> {
        let endpoint = self.submit_url.as_str();
        let body = SubmitRequest { answers };

        debug!("POST {} ({} 个答案)", endpoint, answers.len());

        let response = self
            .http
            .post(self.submit_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let result: ScoreResult = Self::read_json(endpoint, response).await?;
        debug!("评分结果: {}", result);

        Ok(result)
    }

    /// 检查状态码并解析 JSON 响应体
    async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        if !status.is_success() {
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: Self::extract_error_message(&body),
            });
        }

        if body.is_empty() {
            return Err(ApiError::EmptyResponse {
                endpoint: endpoint.to_string(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::json_parse_failed(endpoint, e))
    }

    /// 提取错误响应中的 `{ "error": "..." }` 信息
    pub fn extract_error_message(body: &[u8]) -> Option<String> {
        let value: Value = serde_json::from_slice(body).ok()?;
        value
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}
