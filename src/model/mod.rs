//! Document model.
//!
//! These are the types the parser produces and the serializer consumes.
//! They carry no formatting state, so a display layer or an editor can
//! read and mutate them freely before writing them back out.

mod document;
mod task;
mod team;

pub use document::Document;
pub use task::{Comment, Property, Task, TaskType};
pub use team::TeamMember;
