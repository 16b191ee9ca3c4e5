//! Request boundary for task operations.
//!
//! A transport adapter (HTTP, CLI, RPC) deserializes wire payloads into the
//! request types here, calls [`TaskCommandHandler`], and maps
//! [`TaskCommandError`] onto its own error surface.

mod error;
mod handler;
mod request;
mod view;

pub use error::TaskCommandError;
pub use handler::{TaskCommandHandler, TaskCommandResult};
pub use request::{CreateTaskRequest, UpdateTaskRequest};
pub use view::TaskView;
