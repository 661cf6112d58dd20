//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 管理应用生命周期（初始化、运行、统计），把终端输入调度给流程层。
//!
//! ## 层次关系
//!
//! ```text
//! quiz_app (终端事件循环)
//!     ↓
//! workflow::QuizController (状态转换)
//!     ↓
//! services (能力层：题目来源 / 评分 / 成绩日志)
//!     ↓
//! clients (HTTP：QuizApiClient)
//! ```

pub mod quiz_app;

// 重新导出主要类型
pub use quiz_app::{App, Command};
