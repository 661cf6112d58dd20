//! 预加载题目的校验
//!
//! 逐题检查必填字段，遇到第一道不合格的题目立即停止。

use tracing::error;

use crate::error::ValidationError;
use crate::models::{Question, RawQuestion};

/// 校验整份题目，返回强类型题目或第一个失败原因
///
/// 必填：非空 id、非空题干、至少一个选项、非 null 的正确答案。
/// 未知题型只记录警告，不算校验失败。
pub fn validate_questions(raw: &[RawQuestion]) -> Result<Vec<Question>, ValidationError> {
    if raw.is_empty() {
        error!("题目必须是非空数组");
        return Err(ValidationError::Empty);
    }

    raw.iter()
        .enumerate()
        .map(|(index, q)| {
            q.validate(index).map_err(|e| {
                error!("题目不合法: {}", e);
                e
            })
        })
        .collect()
}

/// 题目是否全部合法
pub fn validate(raw: &[RawQuestion]) -> bool {
    validate_questions(raw).is_ok()
}
