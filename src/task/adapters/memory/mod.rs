//! In-memory adapters for task lifecycle management.

mod clock;
mod task;

pub use clock::ManualClock;
pub use task::InMemoryTaskRepository;
