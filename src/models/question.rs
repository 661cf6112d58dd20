use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use tracing::warn;

use crate::error::ValidationError;

/// 判断题固定的两个选项，下标 0 为“正确”，1 为“错误”
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["true", "false"];

/// 题目 ID
///
/// 题库里的 id 可能是数字也可能是字符串，统一保存为字符串，
/// 与提交时 `answers` 对象的键保持一致。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 从原始 JSON 值解析 id，`null`、`0`、布尔值、空字符串均视为缺失
    ///
    /// 整数值的浮点数按整数保存（`1.0` → `"1"`），与提交时的键一致。
    fn from_raw(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(s) if !s.trim().is_empty() => Some(Self(s.clone())),
            JsonValue::Number(n) if n.as_f64() != Some(0.0) => {
                let id = match n.as_f64() {
                    Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => {
                        format!("{}", f as i64)
                    }
                    _ => n.to_string(),
                };
                Some(Self(id))
            }
            _ => None,
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 单选题
    #[default]
    Mcq,
    /// 判断题
    Tf,
}

impl QuestionType {
    /// 解析题目类型，未知类型只记录警告并按单选题处理
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            None | Some("mcq") => QuestionType::Mcq,
            Some("tf") => QuestionType::Tf,
            Some(other) => {
                warn!("⚠️ 未知的题目类型: {}，按单选题显示", other);
                QuestionType::Mcq
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "mcq",
            QuestionType::Tf => "tf",
        }
    }
}

/// 题库返回的原始题目数据
///
/// 所有字段都是可选的，只有通过 [`RawQuestion::validate`] 才能得到 [`Question`]。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub id: JsonValue,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub question_type: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answer: Option<JsonValue>,
}

impl RawQuestion {
    /// 校验单道题目并转换为强类型的 [`Question`]
    ///
    /// # 参数
    /// - `index`: 题目在列表中的位置（仅用于错误信息）
    pub fn validate(&self, index: usize) -> Result<Question, ValidationError> {
        let id = QuestionId::from_raw(&self.id).ok_or(ValidationError::MissingId { index })?;

        let text = match self.question.as_deref() {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(ValidationError::MissingText { id: id.0 }),
        };

        let options = match &self.options {
            Some(opts) if !opts.is_empty() => opts.clone(),
            _ => return Err(ValidationError::MissingOptions { id: id.0 }),
        };

        let correct_answer = match &self.correct_answer {
            Some(answer) if !answer.is_null() => answer.clone(),
            _ => return Err(ValidationError::MissingCorrectAnswer { id: id.0 }),
        };

        Ok(Question {
            id,
            question: text,
            category: self.category.clone().unwrap_or_default(),
            question_type: QuestionType::parse_lenient(self.question_type.as_deref()),
            options,
            correct_answer,
        })
    }
}

/// 已校验的题目，加载后不可变
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: JsonValue,
}

impl Question {
    /// 按题型返回可选项：判断题固定为 true/false，单选题为原始选项
    pub fn choices(&self) -> Vec<&str> {
        match self.question_type {
            QuestionType::Tf => TRUE_FALSE_OPTIONS.to_vec(),
            QuestionType::Mcq => self.options.iter().map(String::as_str).collect(),
        }
    }

    /// 可选项数量
    pub fn choice_count(&self) -> usize {
        match self.question_type {
            QuestionType::Tf => TRUE_FALSE_OPTIONS.len(),
            QuestionType::Mcq => self.options.len(),
        }
    }

    /// 检查选项是否为合法的下标字符串（"0".."n-1"，不接受前导零或符号）
    pub fn accepts_choice(&self, choice: &str) -> bool {
        choice
            .parse::<usize>()
            .ok()
            .filter(|i| i.to_string() == choice)
            .map_or(false, |i| i < self.choice_count())
    }
}
