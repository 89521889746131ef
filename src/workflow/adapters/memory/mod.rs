//! In-memory adapters for the workflow ports.

mod employee;
mod notifier;
mod store;

pub use employee::InMemoryEmployeeDirectory;
pub use notifier::RecordingNotifier;
pub use store::InMemoryWorkflowStore;
