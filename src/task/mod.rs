//! Task lifecycle management.
//!
//! Tasks move `PENDING -> IN_PROGRESS -> COMPLETED`. The start edge is driven
//! only by a periodic sweep once a task has been pending long enough; the
//! completion edge only by an explicit request. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and the periodic advancer in [`services`]
//! - Request validation in [`validation`]
//! - The request boundary in [`commands`]

pub mod adapters;
pub mod commands;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
