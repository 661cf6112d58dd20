use thiserror::Error;

use crate::models::QuestionId;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 预加载数据与题库都没有可用题目（本次会话终止，不自动重试）
    #[error("没有可用的题目，请检查题库配置")]
    NoQuestions,
    /// 拉取题目失败
    #[error("加载题目失败: {0}")]
    Fetch(#[source] ApiError),
    /// 提交答案失败（可重新提交）
    #[error("提交测验失败: {0}")]
    Submission(#[source] ApiError),
    /// 作答参数不合法
    #[error("作答无效: {0}")]
    Answer(#[from] AnswerError),
    /// 流程状态不允许此操作
    #[error("流程错误: {0}")]
    Flow(#[from] FlowError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非成功状态码
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// API 返回空结果
    #[error("API返回空结果: {endpoint}")]
    EmptyResponse { endpoint: String },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回的题目数据不符合格式
    #[error("题目数据格式错误 ({endpoint}): {reason}")]
    InvalidPayload { endpoint: String, reason: String },
}

/// 作答错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    /// 题目不存在
    #[error("题目 {0} 不存在")]
    UnknownQuestion(QuestionId),
    /// 选项不是合法的下标字符串
    #[error("题目 {question_id} 的选项 '{choice}' 无效 (可选范围 0..{option_count})")]
    InvalidChoice {
        question_id: QuestionId,
        choice: String,
        option_count: usize,
    },
}

/// 流程状态错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    /// 尚未完成所有题目就提交
    #[error("还有题目未完成 (当前 {current}/{total})，不能提交")]
    NotAtEnd { current: usize, total: usize },
    /// 测验已经结束或正在提交
    #[error("测验已结束，请先重新开始")]
    QuizFinished,
    /// 题目尚未加载
    #[error("题目尚未加载")]
    NotLoaded,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 地址无法解析
    #[error("无效的 API 地址 '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// 题目校验失败的原因
///
/// 只在控制器内部使用：预加载数据校验失败时回退到题库，不直接展示给用户。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("题目列表为空")]
    Empty,
    #[error("第 {index} 题缺少 id")]
    MissingId { index: usize },
    #[error("题目 {id} 缺少题干")]
    MissingText { id: String },
    #[error("题目 {id} 没有选项")]
    MissingOptions { id: String },
    #[error("题目 {id} 缺少正确答案")]
    MissingCorrectAnswer { id: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 是否可以通过重新提交恢复
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Submission(_))
    }
}

impl ApiError {
    /// 创建网络请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建 JSON 解析错误
    pub fn json_parse_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_submission_is_retryable() {
        let submission = AppError::Submission(ApiError::BadResponse {
            endpoint: "/api/submit".to_string(),
            status: 500,
            message: None,
        });
        assert!(submission.is_retryable());
        assert!(!AppError::NoQuestions.is_retryable());
        assert!(!AppError::Flow(FlowError::NotLoaded).is_retryable());
    }

    #[test]
    fn test_display_includes_endpoint_message() {
        let err = AppError::Fetch(ApiError::BadResponse {
            endpoint: "/api/questions".to_string(),
            status: 404,
            message: Some("没有题目".to_string()),
        });
        let text = err.to_string();
        assert!(text.contains("/api/questions"));
        assert!(text.contains("404"));
    }
}
