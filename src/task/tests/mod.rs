//! Unit tests for the task lifecycle module.

mod support;
