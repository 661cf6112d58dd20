use tracing::error;

use super::escape::sanitize_terminal;
use super::{QuestionView, QuizView};
use crate::error::AppError;
use crate::models::{random_closing_message, QuestionType, RatingTier, ScoreResult};

/// 终端界面
#[derive(Debug, Default)]
pub struct ConsoleView;

impl ConsoleView {
    pub fn new() -> Self {
        Self
    }

    fn progress_bar(view: &QuestionView, width: usize) -> String {
        let filled = (view.progress.completed_percent() / 100.0 * width as f64).round() as usize;
        format!(
            "[{}{}]",
            "#".repeat(filled.min(width)),
            "-".repeat(width.saturating_sub(filled))
        )
    }
}

impl QuizView for ConsoleView {
    fn show_question(&self, view: &QuestionView) {
        let question = &view.question;

        println!("\n{}", "─".repeat(60));
        println!(
            "{} 第 {}/{} 题",
            Self::progress_bar(view, 20),
            view.progress.current,
            view.progress.total
        );
        println!("{}", sanitize_terminal(&question.question));
        if !question.category.is_empty() {
            println!("分类: {}", sanitize_terminal(&question.category));
        }
        println!();

        for (i, choice) in view.choices.iter().enumerate() {
            let marker = if view.is_selected(i) { "●" } else { "○" };
            let text = match question.question_type {
                QuestionType::Tf if i == 0 => "✅ 正确".to_string(),
                QuestionType::Tf => "❌ 错误".to_string(),
                QuestionType::Mcq => sanitize_terminal(choice).into_owned(),
            };
            println!("  {} {}. {}", marker, i, text);
        }

        println!("\n输入选项编号作答，p 上一题，n 下一题，q 退出");
    }

    fn show_results(&self, result: &ScoreResult, tier: RatingTier) {
        println!("\n{}", "=".repeat(60));
        println!("{} {}", tier.emoji(), tier.label());
        println!("你的成绩: {} / {}", result.score, result.total);
        println!("{:.1}%", result.percentage_or_zero());
        println!("\n\"{}\"", random_closing_message());
        println!("{}", "=".repeat(60));
        println!("输入 r 重新开始，q 退出");
    }

    fn show_error(&self, err: &AppError) {
        error!("{}", err);
        println!("\n❌ {}", sanitize_terminal(&err.to_string()));
        if err.is_retryable() {
            println!("输入 s 重新提交");
        }
    }
}
