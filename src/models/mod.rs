pub mod answers;
pub mod loaders;
pub mod question;
pub mod score;

pub use answers::{AnswerMap, SubmitRequest};
pub use loaders::{load_preloaded_questions, load_question_file};
pub use question::{Question, QuestionId, QuestionType, RawQuestion, TRUE_FALSE_OPTIONS};
pub use score::{random_closing_message, RatingTier, ScoreResult, CLOSING_MESSAGES};
