//! Domain model for task lifecycle management.
//!
//! The task domain models the three-state lifecycle, the time-based start
//! rule, and identifier decoding while keeping all infrastructure concerns
//! outside of the domain boundary.

mod draft;
mod error;
mod ids;
mod task;

pub use draft::{NewTask, TaskPatch};
pub use error::{InvalidTaskId, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use task::{Task, TaskStatus};
