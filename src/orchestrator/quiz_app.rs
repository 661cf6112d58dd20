//! 终端测验应用 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：加载预置题目、选择题库与评分服务、初始化成绩日志
//! 2. **事件循环**：逐行读取标准输入，转换成控制器操作
//! 3. **结果记录**：每次出成绩后追加写入成绩日志
//!
//! 本模块不做任何状态判断，全部委托给 `QuizController`。

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::clients::QuizApiClient;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_preloaded_questions, ScoreResult};
use crate::presentation::{ConsoleView, QuizView};
use crate::services::{
    HttpQuestionSource, HttpScoringService, LocalScoringService, QuestionSource, ResultWriter,
    ScoringService, StaticQuestionSource,
};
use crate::utils::logging::{log_startup, print_session_stats};
use crate::workflow::{Navigation, QuizController};

type ConsoleController = QuizController<Box<dyn QuestionSource>, Box<dyn ScoringService>, ConsoleView>;

/// 用户输入的指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 选择选项（下标字符串）
    Choose(String),
    Previous,
    Next,
    Submit,
    Restart,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        Some(match input.to_ascii_lowercase().as_str() {
            "p" | "prev" => Command::Previous,
            "n" | "next" => Command::Next,
            "s" | "submit" => Command::Submit,
            "r" | "restart" => Command::Restart,
            "q" | "quit" | "exit" => Command::Quit,
            _ if input.chars().all(|c| c.is_ascii_digit()) => Command::Choose(input.to_string()),
            _ => Command::Unknown(input.to_string()),
        })
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    controller: ConsoleController,
    result_writer: ResultWriter,
}

impl App {
    /// 初始化应用
    ///
    /// 没有可用题目时返回错误，本次运行结束。
    pub async fn initialize(config: Config) -> Result<Self> {
        let result_writer = ResultWriter::with_path(&config.output_log_file);
        result_writer.init().await?;

        log_startup(&config);

        let preloaded =
            load_preloaded_questions(config.preloaded_questions_file.as_deref()).await;

        let (source, scorer): (Box<dyn QuestionSource>, Box<dyn ScoringService>) =
            if config.offline_scoring {
                let static_source = StaticQuestionSource::from_raw(preloaded.as_deref().unwrap_or_default());
                let questions = static_source.fetch_questions().await?;
                (
                    Box::new(static_source),
                    Box::new(LocalScoringService::new(&questions)),
                )
            } else {
                let client = QuizApiClient::new(&config).context("无法创建 API 客户端")?;
                (
                    Box::new(HttpQuestionSource::new(client.clone())),
                    Box::new(HttpScoringService::new(client)),
                )
            };

        let controller = QuizController::new(source, scorer, ConsoleView::new())
            .with_auto_advance_delay(config.auto_advance_delay());

        controller.initialize(preloaded).await?;

        Ok(Self {
            config,
            controller,
            result_writer,
        })
    }

    /// 运行事件循环，直到输入 q 或标准输入结束
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut finished = 0usize;

        while let Some(line) = lines.next_line().await? {
            let Some(command) = Command::parse(&line) else {
                continue;
            };

            if command == Command::Quit {
                break;
            }

            match self.handle(command).await {
                Ok(Some(result)) => {
                    finished += 1;
                    self.record_result(&result).await;
                }
                Ok(None) => {}
                Err(e) => self.report(&e),
            }
        }

        print_session_stats(finished, self.result_writer.path());
        Ok(())
    }

    /// 执行一条指令，出成绩时返回成绩
    async fn handle(&self, command: Command) -> Result<Option<ScoreResult>, AppError> {
        let navigation = match command {
            Command::Choose(choice) => {
                let current = self
                    .controller
                    .snapshot()
                    .current_question()
                    .map(|q| q.id.clone());
                match current {
                    Some(id) => self.controller.select_answer(&id, &choice).await?,
                    None => {
                        println!("已经没有题目了，输入 s 重新提交或 r 重新开始");
                        return Ok(None);
                    }
                }
            }
            Command::Next => self.controller.advance().await?,
            Command::Previous => {
                if !self.controller.retreat() {
                    println!("已经是第一题了");
                }
                return Ok(None);
            }
            Command::Submit => return self.controller.submit().await,
            Command::Restart => {
                self.controller.restart()?;
                return Ok(None);
            }
            Command::Unknown(input) => {
                println!("无法识别的指令: {}", input);
                return Ok(None);
            }
            Command::Quit => return Ok(None),
        };

        Ok(match navigation {
            Navigation::Finished(result) => Some(result),
            Navigation::Question(_) | Navigation::Pending => None,
        })
    }

    /// 控制器已经展示过的错误不再重复展示
    fn report(&self, err: &AppError) {
        match err {
            AppError::NoQuestions | AppError::Fetch(_) | AppError::Submission(_) => {}
            other => self.controller.view().show_error(other),
        }
    }

    async fn record_result(&self, result: &ScoreResult) {
        let question_count = self.controller.snapshot().questions.len();
        info!("📝 记录成绩: {}", result);
        if let Err(e) = self.result_writer.append(question_count, result).await {
            warn!("⚠️ 写入成绩日志失败 ({}): {}", self.config.output_log_file, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  "), None);
        assert_eq!(Command::parse("0"), Some(Command::Choose("0".to_string())));
        assert_eq!(Command::parse("12"), Some(Command::Choose("12".to_string())));
        assert_eq!(Command::parse("P"), Some(Command::Previous));
        assert_eq!(Command::parse("next"), Some(Command::Next));
        assert_eq!(Command::parse("s"), Some(Command::Submit));
        assert_eq!(Command::parse("r"), Some(Command::Restart));
        assert_eq!(Command::parse("exit"), Some(Command::Quit));
        assert_eq!(Command::parse("-1"), Some(Command::Unknown("-1".to_string())));
    }
}
