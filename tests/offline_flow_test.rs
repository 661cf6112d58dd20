mod common;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_test::assert_ok;

use common::*;
use quiz_client::models::{load_question_file, QuestionId, RatingTier};
use quiz_client::presentation::HtmlView;
use quiz_client::services::{LocalScoringService, QuestionSource, StaticQuestionSource};
use quiz_client::workflow::{Navigation, QuizController};

#[tokio::test]
async fn test_offline_quiz_renders_html() {
    let raw = raw_questions(json!([
        {"id": 1, "question": "<b>1 + 1</b>?", "category": "A & B", "type": "mcq",
         "options": ["2", "3"], "correct_answer": 0},
        {"id": 2, "question": "Rust 有垃圾回收", "type": "tf",
         "options": ["true", "false"], "correct_answer": "1"},
        {"id": 3, "question": "没有答案", "options": ["x"]}
    ]));

    let source = StaticQuestionSource::from_raw(&raw);
    let questions = assert_ok!(source.fetch_questions().await);
    assert_eq!(questions.len(), 2);

    let view = Arc::new(HtmlView::new());
    let controller = QuizController::new(source, LocalScoringService::new(&questions), view.clone())
        .with_auto_advance_delay(Duration::ZERO);
    assert_ok!(controller.initialize(None).await);

    let page = view.snapshot();
    assert!(page.question_card.contains("&lt;b&gt;1 + 1&lt;/b&gt;?"));
    assert!(page.question_card.contains("A &amp; B"));
    assert_eq!(page.progress_label, "1 / 2");

    assert_ok!(controller.select_answer(&QuestionId::from(1u64), "0").await);
    let page = view.snapshot();
    assert!(page.options.contains("option true"));
    assert!(page.options.contains("option false"));

    let nav = assert_ok!(controller.select_answer(&QuestionId::from(2u64), "0").await);
    let result = match nav {
        Navigation::Finished(result) => result,
        other => panic!("expected Finished, got {:?}", other),
    };

    assert_eq!(result.score, 1);
    assert_eq!(result.total, 2);
    assert_eq!(result.percentage, Some(50.0));
    assert_eq!(result.tier(), RatingTier::GoodAttempt);
    assert!(view.snapshot().results.is_some());
}

#[tokio::test]
async fn test_preloaded_file_feeds_controller() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        br#"
[[questions]]
id = "q1"
question = "Capital of France?"
category = "Geography"
type = "mcq"
options = ["Paris", "Rome"]
correct_answer = "0"
"#,
    )
    .unwrap();

    let raw = assert_ok!(load_question_file(file.path()).await);

    let source = MockSource::with(Vec::new());
    let (controller, view) = controller(source.clone(), MockScorer::returning(1, 1, 100.0));
    assert_ok!(controller.initialize(Some(raw)).await);

    assert_eq!(controller.snapshot().questions[0].id.as_str(), "q1");
    assert_eq!(source.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert_eq!(
        view.events(),
        vec![ViewEvent::Question { index: 0, selected: None }]
    );
}
