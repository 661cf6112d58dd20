//! 展示层
//!
//! 控制器只通过 [`QuizView`] 通知界面，界面实现可以随意替换：
//! - `ConsoleView` - 终端输出
//! - `HtmlView` - 生成 HTML 片段

pub mod console_view;
pub mod escape;
pub mod html_view;

pub use console_view::ConsoleView;
pub use escape::{escape_html, sanitize_terminal};
pub use html_view::HtmlView;

use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Question, RatingTier, ScoreResult};

/// 答题进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 当前题号（从 1 开始）
    pub current: usize,
    pub total: usize,
}

impl Progress {
    /// 已完成比例，用于进度条（0–100）
    pub fn completed_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current.saturating_sub(1)) as f64 / self.total as f64 * 100.0
        }
    }
}

/// 展示一道题所需的全部信息
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    pub question: Question,
    /// 按题型给出的选项（判断题固定为 true/false）
    pub choices: Vec<String>,
    pub progress: Progress,
    /// 之前选过的答案，用于高亮
    pub selected: Option<String>,
}

impl QuestionView {
    pub fn new(question: &Question, index: usize, total: usize, selected: Option<&str>) -> Self {
        Self {
            question: question.clone(),
            choices: question.choices().into_iter().map(str::to_string).collect(),
            progress: Progress {
                current: index + 1,
                total,
            },
            selected: selected.map(str::to_string),
        }
    }

    /// 某个选项是否是之前选中的
    pub fn is_selected(&self, choice_index: usize) -> bool {
        self.selected.as_deref() == Some(choice_index.to_string().as_str())
    }
}

/// 界面适配器
pub trait QuizView: Send + Sync {
    /// 显示题目
    fn show_question(&self, view: &QuestionView);

    /// 显示最终成绩
    fn show_results(&self, result: &ScoreResult, tier: RatingTier);

    /// 显示可关闭的错误提示
    fn show_error(&self, error: &AppError);
}

impl<T: QuizView + ?Sized> QuizView for Arc<T> {
    fn show_question(&self, view: &QuestionView) {
        (**self).show_question(view)
    }

    fn show_results(&self, result: &ScoreResult, tier: RatingTier) {
        (**self).show_results(result, tier)
    }

    fn show_error(&self, error: &AppError) {
        (**self).show_error(error)
    }
}
