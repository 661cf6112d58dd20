//! 成绩记录服务 - 业务能力层
//!
//! 只负责"把成绩追加写入日志文件"能力，不关心流程

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{AppError, AppResult, FileError};
use crate::models::ScoreResult;

/// 成绩记录服务
pub struct ResultWriter {
    file_path: String,
}

impl ResultWriter {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.file_path
    }

    /// 写入文件头（覆盖旧内容）
    pub async fn init(&self) -> AppResult<()> {
        let header = format!(
            "{}\n测验成绩日志 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        tokio::fs::write(&self.file_path, header)
            .await
            .map_err(|e| self.write_failed(e))
    }

    /// 追加一条成绩记录
    ///
    /// # 参数
    /// - `question_count`: 题目数量
    /// - `result`: 评分结果
    pub async fn append(&self, question_count: usize, result: &ScoreResult) -> AppResult<()> {
        let tier = result.tier();
        let line = format!(
            "{} | 题目 {} | 成绩 {} | 评级 {} {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            question_count,
            result,
            tier.level(),
            tier.label()
        );

        debug!("写入成绩: {}", line.trim_end());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .await
            .map_err(|e| self.write_failed(e))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.write_failed(e))?;

        Ok(())
    }

    fn write_failed(&self, source: std::io::Error) -> AppError {
        AppError::File(FileError::WriteFailed {
            path: self.file_path.clone(),
            source,
        })
    }
}
