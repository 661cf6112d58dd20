//! 测验状态
//!
//! 只描述"现在到了哪一步"，所有修改都经过 `QuizController`。

use crate::models::{AnswerMap, Question, ScoreResult};
use crate::presentation::QuestionView;

/// 测验所处阶段
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QuizPhase {
    /// 尚未初始化
    #[default]
    Idle,
    /// 正在加载题目
    Loading,
    /// 答题中
    InProgress,
    /// 正在提交
    Submitting,
    /// 已出成绩
    Results(ScoreResult),
    /// 没有可用题目，本次会话结束
    Failed,
}

/// 测验状态
///
/// 不变量：`0 <= current_question_index <= questions.len()`，
/// 等于 `questions.len()` 时表示已到末尾并触发了提交。
#[derive(Debug, Clone, Default)]
pub struct QuizState {
    pub current_question_index: usize,
    pub questions: Vec<Question>,
    pub answers: AnswerMap,
    /// 仅在提交请求进行中为 true，防止重复提交
    pub is_submitting: bool,
    pub phase: QuizPhase,
    /// 每次初始化 / 重新开始递增，用于丢弃过期的提交结果
    pub(crate) session: u64,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前题目，已到末尾时为 `None`
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    /// 是否已越过最后一题
    pub fn is_at_end(&self) -> bool {
        !self.questions.is_empty() && self.current_question_index >= self.questions.len()
    }

    /// 是否已结束（提交中或已出成绩）
    pub fn is_finished(&self) -> bool {
        self.is_submitting || matches!(self.phase, QuizPhase::Results(_))
    }

    /// 清空作答并回到第一题，保留题目
    pub(crate) fn reset_progress(&mut self) {
        self.current_question_index = 0;
        self.answers.clear();
        self.is_submitting = false;
        self.phase = QuizPhase::InProgress;
        self.session += 1;
    }

    /// 当前题目的展示数据
    pub fn current_view(&self) -> Option<QuestionView> {
        self.current_question().map(|q| {
            QuestionView::new(
                q,
                self.current_question_index,
                self.questions.len(),
                self.answers.get(&q.id),
            )
        })
    }
}
