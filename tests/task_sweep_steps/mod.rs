//! Step definitions for task sweep behaviour tests.

pub mod then;
pub mod world;
