//! # Quiz Client
//!
//! 测验客户端核心：逐题作答、一次性提交、展示成绩与评级
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models / Clients）
//! - `models/` - 题目、作答、成绩等数据类型，以及预置题目文件的加载
//! - `clients/` - `QuizApiClient`，负责题库与评分接口的 HTTP 请求
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `QuestionSource` - 获取题目（HTTP / 静态列表）
//! - `ScoringService` - 提交评分（HTTP / 本地）
//! - `ResultWriter` - 写成绩日志
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义一次测验的完整流程
//! - `QuizState` - 唯一的测验状态
//! - `QuizController` - 状态转换（初始化 → 作答 → 提交 → 成绩 → 重新开始）
//!
//! ### ④ 展示层（Presentation）
//! - `presentation/` - `QuizView` 边界，提供终端与 HTML 两种实现
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/` - 终端交互应用，把用户输入转换成控制器操作
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod presentation;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::QuizApiClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerMap, Question, QuestionId, QuestionType, RatingTier, RawQuestion, ScoreResult};
pub use orchestrator::App;
pub use presentation::{ConsoleView, HtmlView, QuestionView, QuizView};
pub use services::{
    HttpQuestionSource, HttpScoringService, LocalScoringService, QuestionSource, ScoringService,
    StaticQuestionSource,
};
pub use workflow::{Navigation, QuizController, QuizPhase, QuizState};
