//! Role-gated task workflow engine.
//!
//! Tasks progress through a fixed status workflow (created → in progress →
//! resolved → done). The engine validates transition legality against a
//! declarative table, enforces who may perform each transition (the task's
//! owner for forward progress, a manager for review outcomes), and records
//! an append-only audit trail of every status change. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
