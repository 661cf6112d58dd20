#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use quiz_client::error::{ApiError, AppError};
use quiz_client::models::{AnswerMap, Question, RatingTier, RawQuestion, ScoreResult};
use quiz_client::presentation::{QuestionView, QuizView};
use quiz_client::services::{QuestionSource, ScoringService};
use quiz_client::QuizController;

pub fn raw_questions(value: Value) -> Vec<RawQuestion> {
    serde_json::from_value(value).unwrap()
}

pub fn questions(value: Value) -> Vec<Question> {
    raw_questions(value)
        .iter()
        .enumerate()
        .map(|(i, q)| q.validate(i).unwrap())
        .collect()
}

/// 两道题：一道单选，一道判断
pub fn two_questions() -> Value {
    json!([
        {"id": 1, "question": "2 + 2 = ?", "category": "数学", "type": "mcq",
         "options": ["4", "5", "6"], "correct_answer": 0},
        {"id": 2, "question": "地球是平的", "type": "tf",
         "options": ["true", "false"], "correct_answer": "1"}
    ])
}

// ========== 题目来源 ==========

#[derive(Clone, Default)]
pub struct MockSource {
    questions: Vec<Question>,
    fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl MockSource {
    pub fn with(questions: Vec<Question>) -> Self {
        Self {
            questions,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ApiError::EmptyResponse {
                endpoint: "/api/questions".to_string(),
            });
        }
        Ok(self.questions.clone())
    }
}

// ========== 评分服务 ==========

#[derive(Clone)]
pub struct MockScorer {
    result: ScoreResult,
    pub fail: Arc<AtomicBool>,
    pub calls: Arc<AtomicUsize>,
    pub received: Arc<Mutex<Vec<AnswerMap>>>,
}

impl MockScorer {
    pub fn returning(score: u32, total: u32, percentage: f64) -> Self {
        Self {
            result: ScoreResult {
                score,
                total,
                percentage: Some(percentage),
            },
            fail: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_received(&self) -> Option<AnswerMap> {
        self.received.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ScoringService for MockScorer {
    async fn submit(&self, answers: &AnswerMap) -> Result<ScoreResult, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(answers.clone());
        tokio::task::yield_now().await;

        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::BadResponse {
                endpoint: "/api/submit".to_string(),
                status: 500,
                message: Some("boom".to_string()),
            });
        }
        Ok(self.result.clone())
    }
}

// ========== 界面 ==========

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Question { index: usize, selected: Option<String> },
    Results { score: u32, tier: RatingTier },
    Error(String),
}

#[derive(Clone, Default)]
pub struct RecordingView {
    pub events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<ViewEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn error_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ViewEvent::Error(_)))
            .count()
    }
}

impl QuizView for RecordingView {
    fn show_question(&self, view: &QuestionView) {
        self.events.lock().unwrap().push(ViewEvent::Question {
            index: view.progress.current - 1,
            selected: view.selected.clone(),
        });
    }

    fn show_results(&self, result: &ScoreResult, tier: RatingTier) {
        self.events.lock().unwrap().push(ViewEvent::Results {
            score: result.score,
            tier,
        });
    }

    fn show_error(&self, err: &AppError) {
        self.events
            .lock()
            .unwrap()
            .push(ViewEvent::Error(err.to_string()));
    }
}

pub type TestController = QuizController<MockSource, MockScorer, RecordingView>;

/// 构造无跳题延迟的控制器
pub fn controller(source: MockSource, scorer: MockScorer) -> (TestController, RecordingView) {
    let view = RecordingView::default();
    let controller = QuizController::new(source, scorer, view.clone())
        .with_auto_advance_delay(std::time::Duration::ZERO);
    (controller, view)
}

// ========== 本地 HTTP 服务 ==========

/// 依次用给定的响应回复请求，每个连接一个响应
///
/// 返回监听地址，以及收到的原始请求文本
pub async fn serve(responses: Vec<(u16, String)>) -> (SocketAddr, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);

            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
        requests
    });

    (addr, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            return String::from_utf8_lossy(&data).into_owned();
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }

    String::from_utf8_lossy(&data).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// 请求体（空行之后的部分）
pub fn request_body(request: &str) -> &str {
    request.split("\r\n\r\n").nth(1).unwrap_or("")
}

// ========== 日志捕获 ==========

/// 收集 tracing 输出的缓冲区
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// 在当前线程上安装 debug 级别的订阅者，guard 存活期间生效
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
