use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::question::QuestionId;

/// 用户作答记录：题目 ID → 选项下标（字符串形式）
///
/// 重复作答以最后一次为准；重新开始时整体清空。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionId, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录作答，返回被覆盖的旧答案
    pub fn record(&mut self, question_id: QuestionId, choice: impl Into<String>) -> Option<String> {
        self.0.insert(question_id, choice.into())
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.0.iter().map(|(id, choice)| (id, choice.as_str()))
    }
}

impl<I: Into<QuestionId>, C: Into<String>> FromIterator<(I, C)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (I, C)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, choice)| (id.into(), choice.into()))
                .collect(),
        )
    }
}

/// 提交接口的请求体 `{ "answers": {...} }`
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub answers: &'a AnswerMap,
}
