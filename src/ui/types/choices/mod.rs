mod evaluator_choice;
mod learner_choice;
mod schema;
mod stream_choice;
mod task_choice;
mod ui_choice;

pub use evaluator_choice::*;
pub use learner_choice::*;
pub use schema::*;
pub use stream_choice::*;
pub use task_choice::*;
pub use ui_choice::{NoParams, UIChoice};
