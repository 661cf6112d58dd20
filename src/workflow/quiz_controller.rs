//! 测验流程控制 - 流程层
//!
//! 核心职责：持有唯一的测验状态，驱动状态转换
//!
//! 状态流转：
//! 1. Idle → Loading → InProgress（初始化）
//! 2. InProgress ⇄ InProgress（上一题 / 下一题）
//! 3. InProgress → Submitting → Results（越过最后一题时自动提交）
//! 4. Results → InProgress（重新开始）
//!
//! 状态锁只在同步步骤中持有，不会跨越网络等待；
//! `is_submitting` 是唯一的并发保护，保证同一时间最多只有一个提交请求。

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{AnswerError, AppError, AppResult, FlowError};
use crate::models::{Question, QuestionId, RawQuestion, ScoreResult};
use crate::presentation::QuizView;
use crate::services::{QuestionSource, ScoringService};
use crate::utils::logging::truncate_text;
use crate::workflow::quiz_state::{QuizPhase, QuizState};
use crate::workflow::validation::validate_questions;

/// 默认自动跳题延迟
pub const DEFAULT_AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(300);

/// 导航结果
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// 显示了指定下标的题目
    Question(usize),
    /// 已提交并取得成绩
    Finished(ScoreResult),
    /// 已有提交在进行中，本次未发起请求
    Pending,
}

/// 测验控制器
///
/// - 持有题目来源、评分服务和界面适配器
/// - 所有状态修改都通过这里的方法完成
/// - 不做本地评分，成绩完全以评分服务为准
pub struct QuizController<S, C, V> {
    source: S,
    scorer: C,
    view: V,
    state: Mutex<QuizState>,
    auto_advance_delay: Duration,
}

fn lock(state: &Mutex<QuizState>) -> MutexGuard<'_, QuizState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 提交进行中的标记，提交被中途取消时负责复位 `is_submitting`
struct InFlight<'a> {
    state: &'a Mutex<QuizState>,
    session: u64,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = lock(self.state);
        if state.session == self.session && state.is_submitting {
            warn!("⚠️ 提交被中断，已重置提交状态");
            state.is_submitting = false;
            state.phase = QuizPhase::InProgress;
        }
    }
}

impl<S, C, V> QuizController<S, C, V>
where
    S: QuestionSource,
    C: ScoringService,
    V: QuizView,
{
    /// 创建新的控制器，初始状态为 Idle
    pub fn new(source: S, scorer: C, view: V) -> Self {
        Self {
            source,
            scorer,
            view,
            state: Mutex::new(QuizState::new()),
            auto_advance_delay: DEFAULT_AUTO_ADVANCE_DELAY,
        }
    }

    /// 设置选择答案后的自动跳题延迟
    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance_delay = delay;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// 当前状态的副本
    pub fn snapshot(&self) -> QuizState {
        self.state().clone()
    }

    pub fn phase(&self) -> QuizPhase {
        self.state().phase.clone()
    }

    fn state(&self) -> MutexGuard<'_, QuizState> {
        lock(&self.state)
    }

    /// 初始化测验
    ///
    /// # 参数
    /// - `preloaded`: 预加载的题目，为空或校验失败时改为从题库获取
    ///
    /// # 返回
    /// 没有任何可用题目时返回 `AppError::NoQuestions`
    pub async fn initialize(&self, preloaded: Option<Vec<RawQuestion>>) -> AppResult<()> {
        self.state().phase = QuizPhase::Loading;

        let questions = match preloaded {
            Some(raw) if !raw.is_empty() => match validate_questions(&raw) {
                Ok(questions) => {
                    info!("✓ 使用预加载的题目: {} 道", questions.len());
                    questions
                }
                Err(e) => {
                    warn!("⚠️ 预加载的题目数据无效 ({})，从题库获取...", e);
                    self.fetch_questions().await
                }
            },
            _ => {
                info!("🔍 正在从题库获取题目...");
                self.fetch_questions().await
            }
        };

        if questions.is_empty() {
            self.state().phase = QuizPhase::Failed;
            let err = AppError::NoQuestions;
            self.view.show_error(&err);
            return Err(err);
        }

        let view = {
            let mut state = self.state();
            state.questions = questions;
            state.reset_progress();
            info!("✓ 测验已就绪，共 {} 道题", state.questions.len());
            state.current_view()
        };

        if let Some(view) = view {
            self.view.show_question(&view);
        }

        Ok(())
    }

    /// 从题库获取题目，失败时提示错误并返回空列表
    async fn fetch_questions(&self) -> Vec<Question> {
        match self.source.fetch_questions().await {
            Ok(questions) => {
                debug!("题库返回 {} 道题目", questions.len());
                questions
            }
            Err(e) => {
                let err = AppError::Fetch(e);
                warn!("❌ {}", err);
                self.view.show_error(&err);
                Vec::new()
            }
        }
    }

    /// 记录作答，重复作答以最后一次为准
    ///
    /// # 参数
    /// - `question_id`: 已加载题目的 ID
    /// - `choice`: 选项下标字符串，单选题为 `"0"..n-1`，判断题为 `"0"`（正确）或 `"1"`（错误）
    pub fn record_answer(&self, question_id: &QuestionId, choice: &str) -> AppResult<()> {
        let mut state = self.state();

        if state.is_finished() {
            return Err(FlowError::QuizFinished.into());
        }

        let question = state
            .questions
            .iter()
            .find(|q| &q.id == question_id)
            .ok_or_else(|| AnswerError::UnknownQuestion(question_id.clone()))?;

        if !question.accepts_choice(choice) {
            return Err(AnswerError::InvalidChoice {
                question_id: question_id.clone(),
                choice: choice.to_string(),
                option_count: question.choice_count(),
            }
            .into());
        }

        debug!(
            "题目 {} ({}) 作答: {}",
            question_id,
            truncate_text(&question.question, 30),
            choice
        );

        if let Some(previous) = state.answers.record(question_id.clone(), choice) {
            debug!("覆盖之前的答案: {}", previous);
        }

        Ok(())
    }

    /// 选择答案：记录后等待自动跳题延迟，再进入下一题
    pub async fn select_answer(&self, question_id: &QuestionId, choice: &str) -> AppResult<Navigation> {
        self.record_answer(question_id, choice)?;

        if !self.auto_advance_delay.is_zero() {
            sleep(self.auto_advance_delay).await;
        }

        self.advance().await
    }

    /// 下一题
    ///
    /// 越过最后一题时自动提交；提交失败后再次调用会重新提交。
    pub async fn advance(&self) -> AppResult<Navigation> {
        let next = {
            let mut state = self.state();

            if state.is_finished() {
                return Err(FlowError::QuizFinished.into());
            }
            if state.questions.is_empty() {
                return Err(FlowError::NotLoaded.into());
            }

            if state.current_question_index < state.questions.len() {
                state.current_question_index += 1;
            }

            let view = state.current_view();
            if let Some(view) = &view {
                debug!("前进到第 {}/{} 题", view.progress.current, view.progress.total);
            }
            view
        };

        match next {
            Some(view) => {
                let index = view.progress.current - 1;
                self.view.show_question(&view);
                Ok(Navigation::Question(index))
            }
            None => {
                info!("✓ 已完成全部题目，开始提交");
                Ok(match self.submit().await? {
                    Some(result) => Navigation::Finished(result),
                    None => Navigation::Pending,
                })
            }
        }
    }

    /// 上一题，已在第一题时不做任何事
    ///
    /// # 返回
    /// 是否发生了移动
    pub fn retreat(&self) -> bool {
        let view = {
            let mut state = self.state();

            if state.is_finished() || state.current_question_index == 0 {
                return false;
            }

            state.current_question_index -= 1;
            state.current_view()
        };

        if let Some(view) = view {
            self.view.show_question(&view);
        }

        true
    }

    /// 提交全部答案
    ///
    /// 已有提交在进行中时直接返回 `Ok(None)`，不会再次请求评分服务。
    /// 无论成功、失败还是被取消，`is_submitting` 都会复位；失败时作答记录保持不变，可以重新提交。
    pub async fn submit(&self) -> AppResult<Option<ScoreResult>> {
        let (answers, mut in_flight) = {
            let mut state = self.state();

            if state.is_submitting {
                debug!("⏳ 已有提交正在进行，忽略重复提交");
                return Ok(None);
            }
            if state.questions.is_empty() {
                return Err(FlowError::NotLoaded.into());
            }
            if matches!(state.phase, QuizPhase::Results(_)) {
                return Err(FlowError::QuizFinished.into());
            }
            if !state.is_at_end() {
                return Err(FlowError::NotAtEnd {
                    current: state.current_question_index + 1,
                    total: state.questions.len(),
                }
                .into());
            }

            state.is_submitting = true;
            state.phase = QuizPhase::Submitting;

            let in_flight = InFlight {
                state: &self.state,
                session: state.session,
                armed: true,
            };
            (state.answers.clone(), in_flight)
        };

        info!("📤 正在提交 {} 个答案...", answers.len());
        let outcome = self.scorer.submit(&answers).await;

        {
            let mut state = self.state();
            in_flight.armed = false;

            if state.session != in_flight.session {
                info!("测验已重新开始，丢弃过期的提交结果");
                return Ok(None);
            }

            state.is_submitting = false;
            state.phase = match &outcome {
                Ok(result) => QuizPhase::Results(result.clone()),
                Err(_) => QuizPhase::InProgress,
            };
        }

        match outcome {
            Ok(result) => {
                let tier = result.tier();
                info!("✅ 提交成功: {} (评级 {})", result, tier.level());
                self.view.show_results(&result, tier);
                Ok(Some(result))
            }
            Err(e) => {
                let err = AppError::Submission(e);
                warn!("❌ {}", err);
                self.view.show_error(&err);
                Err(err)
            }
        }
    }

    /// 重新开始：清空作答回到第一题，不重新获取题目
    pub fn restart(&self) -> AppResult<()> {
        let view = {
            let mut state = self.state();
            if state.questions.is_empty() {
                None
            } else {
                state.reset_progress();
                info!("🔄 重新开始测验");
                state.current_view()
            }
        };

        match view {
            Some(view) => {
                self.view.show_question(&view);
                Ok(())
            }
            None => {
                let err = AppError::NoQuestions;
                self.view.show_error(&err);
                Err(err)
            }
        }
    }
}
