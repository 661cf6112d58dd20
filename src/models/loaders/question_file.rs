use crate::models::question::RawQuestion;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 文件格式：`[[questions]]` 表数组
#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

/// JSON 文件既可以是题目数组，也可以是 `{ "questions": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonQuestionFile {
    List(Vec<RawQuestion>),
    Wrapped(QuestionFile),
}

/// 从 TOML 或 JSON 文件加载预置题目
///
/// 只做格式解析，不做题目校验；校验由控制器在初始化时完成。
pub async fn load_question_file(path: &Path) -> Result<Vec<RawQuestion>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取题目文件: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);

    let questions = match extension.as_deref() {
        Some("toml") => {
            let file: QuestionFile = toml::from_str(&content)
                .with_context(|| format!("无法解析TOML文件: {}", path.display()))?;
            file.questions
        }
        Some("json") => {
            let file: JsonQuestionFile = serde_json::from_str(&content)
                .with_context(|| format!("无法解析JSON文件: {}", path.display()))?;
            match file {
                JsonQuestionFile::List(list) => list,
                JsonQuestionFile::Wrapped(wrapped) => wrapped.questions,
            }
        }
        _ => anyhow::bail!("不支持的题目文件格式: {}", path.display()),
    };

    tracing::info!(
        "从 {} 加载了 {} 道预置题目",
        path.file_name().unwrap_or_default().to_string_lossy(),
        questions.len()
    );

    Ok(questions)
}

/// 加载配置中的预置题目文件
///
/// 未配置或加载失败时返回 `None`，控制器会改为从题库拉取。
pub async fn load_preloaded_questions(path: Option<&str>) -> Option<Vec<RawQuestion>> {
    let path = path?;

    match load_question_file(Path::new(path)).await {
        Ok(questions) => Some(questions),
        Err(e) => {
            tracing::warn!("加载预置题目失败，将从题库获取: {:#}", e);
            None
        }
    }
}
