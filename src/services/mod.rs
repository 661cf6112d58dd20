pub mod local_scoring;
pub mod question_source;
pub mod result_writer;
pub mod scoring_service;

pub use local_scoring::LocalScoringService;
pub use question_source::{HttpQuestionSource, QuestionSource, StaticQuestionSource};
pub use result_writer::ResultWriter;
pub use scoring_service::{HttpScoringService, ScoringService};
