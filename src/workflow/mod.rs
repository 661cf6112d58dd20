pub mod quiz_controller;
pub mod quiz_state;
pub mod validation;

pub use quiz_controller::{Navigation, QuizController, DEFAULT_AUTO_ADVANCE_DELAY};
pub use quiz_state::{QuizPhase, QuizState};
pub use validation::{validate, validate_questions};
