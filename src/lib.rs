//! Taskcrew: role-gated employee/task workflow tracking.
//!
//! This crate provides the core of an employee task tracker: a status
//! workflow state machine with per-transition authorization and an
//! append-only audit trail.
//!
//! # Architecture
//!
//! Taskcrew follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`,
//!   SMTP)
//!
//! # Modules
//!
//! - [`workflow`]: Task status workflow, authorization, and audit history

pub mod workflow;
