pub mod question_file;

pub use question_file::{load_preloaded_questions, load_question_file};
