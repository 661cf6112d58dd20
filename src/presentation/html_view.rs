use std::fmt::Write;
use std::sync::{Mutex, MutexGuard};

use super::escape::escape_html;
use super::{QuestionView, QuizView};
use crate::error::AppError;
use crate::models::{random_closing_message, QuestionType, RatingTier, ScoreResult};

/// 当前渲染出的页面片段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    pub question_card: String,
    pub options: String,
    /// 进度条宽度（百分比）
    pub progress_percent: f64,
    /// `当前题号 / 总数`
    pub progress_label: String,
    pub results: Option<String>,
    pub error: Option<String>,
}

/// 生成 HTML 片段的界面
///
/// 所有来自题库的文本都经过 HTML 转义。
#[derive(Debug, Default)]
pub struct HtmlView {
    page: Mutex<RenderedPage>,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前页面快照
    pub fn snapshot(&self) -> RenderedPage {
        self.page().clone()
    }

    fn page(&self) -> MutexGuard<'_, RenderedPage> {
        self.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render_question_card(view: &QuestionView) -> String {
        format!(
            r#"<div class="question-card"><h2>{}</h2><p class="category">分类: <span>{}</span></p></div>"#,
            escape_html(&view.question.question),
            escape_html(&view.question.category)
        )
    }

    fn render_options(view: &QuestionView) -> String {
        let mut html = String::new();
        let question_id = escape_html(view.question.id.as_str());

        match view.question.question_type {
            QuestionType::Tf => {
                html.push_str(r#"<div class="tf-options">"#);
                for (value, (label, class)) in [("✅ 正确", "true"), ("❌ 错误", "false")]
                    .iter()
                    .enumerate()
                {
                    let selected = if view.is_selected(value) { " selected" } else { "" };
                    let _ = write!(
                        html,
                        r#"<button type="button" class="option {}{}" data-question="{}" data-value="{}">{}</button>"#,
                        class, selected, question_id, value, label
                    );
                }
                html.push_str("</div>");
            }
            QuestionType::Mcq => {
                for (value, choice) in view.choices.iter().enumerate() {
                    let selected = if view.is_selected(value) { " selected" } else { "" };
                    let _ = write!(
                        html,
                        r#"<button type="button" class="option{}" data-question="{}" data-value="{}">{}</button>"#,
                        selected,
                        question_id,
                        value,
                        escape_html(choice)
                    );
                }
            }
        }

        html
    }

    fn render_results(result: &ScoreResult, tier: RatingTier) -> String {
        format!(
            r#"<div class="results tier-{}"><p class="emoji">{}</p><h2>{}</h2><div class="score">{} / {}</div><p class="percentage">{:.1}%</p><p class="closing-message">"{}"</p><button id="restartBtn">🔄 重新开始</button></div>"#,
            tier.level(),
            tier.emoji(),
            tier.label(),
            result.score,
            result.total,
            result.percentage_or_zero(),
            escape_html(random_closing_message())
        )
    }
}

impl QuizView for HtmlView {
    fn show_question(&self, view: &QuestionView) {
        let mut page = self.page();
        page.question_card = Self::render_question_card(view);
        page.options = Self::render_options(view);
        page.progress_percent = view.progress.completed_percent();
        page.progress_label = format!("{} / {}", view.progress.current, view.progress.total);
        page.results = None;
        page.error = None;
    }

    fn show_results(&self, result: &ScoreResult, tier: RatingTier) {
        let mut page = self.page();
        page.results = Some(Self::render_results(result, tier));
        page.error = None;
    }

    fn show_error(&self, error: &AppError) {
        self.page().error = Some(escape_html(&error.to_string()).into_owned());
    }
}
