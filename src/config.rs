use std::time::Duration;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库与评分服务的地址
    pub api_base_url: String,
    /// 获取题目的路径
    pub questions_path: String,
    /// 提交答案的路径
    pub submit_path: String,
    /// 预置题目文件（TOML 或 JSON）
    pub preloaded_questions_file: Option<String>,
    /// 选择答案后自动跳到下一题的延迟（毫秒）
    pub auto_advance_delay_ms: u64,
    /// 使用本地评分，不连接评分服务
    pub offline_scoring: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 测验结果日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            questions_path: "/api/questions".to_string(),
            submit_path: "/api/submit".to_string(),
            preloaded_questions_file: None,
            auto_advance_delay_ms: 300,
            offline_scoring: false,
            verbose_logging: false,
            output_log_file: "quiz_results.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("QUIZ_API_BASE_URL").unwrap_or(default.api_base_url),
            questions_path: std::env::var("QUIZ_QUESTIONS_PATH").unwrap_or(default.questions_path),
            submit_path: std::env::var("QUIZ_SUBMIT_PATH").unwrap_or(default.submit_path),
            preloaded_questions_file: std::env::var("QUIZ_PRELOADED_FILE").ok().filter(|v| !v.is_empty()).or(default.preloaded_questions_file),
            auto_advance_delay_ms: std::env::var("QUIZ_AUTO_ADVANCE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.auto_advance_delay_ms),
            offline_scoring: std::env::var("QUIZ_OFFLINE_SCORING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.offline_scoring),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 自动跳题延迟
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    /// 拼接完整的接口地址：`{api_base_url}{path}`，保留基础地址中的路径前缀
    pub fn endpoint(&self, path: &str) -> Result<reqwest::Url, ConfigError> {
        let base = self.api_base_url.trim_end_matches('/');
        let url = format!("{}/{}", base, path.trim_start_matches('/'));
        reqwest::Url::parse(&url).map_err(|e| ConfigError::InvalidUrl {
            url,
            reason: e.to_string(),
        })
    }
}
