//! Tasklane: task lifecycle engine with time-driven state advancement.
//!
//! This crate tracks units of work through a three-state lifecycle and runs
//! a background advancer that starts tasks once they have been pending long
//! enough, while client-driven edits run concurrently against the same
//! records.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, periodic advancer and request boundary
//! - [`config`]: Environment-driven runtime configuration

pub mod config;
pub mod task;
