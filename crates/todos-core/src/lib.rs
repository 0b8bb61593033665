//! todos-core library.
//!
//! The task list ([`manager::ListManager`]), its validation rules, and the
//! persistence contract ([`store::Store`]) it flushes through after every
//! mutation.

pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod id;
pub mod lock;
pub mod manager;
pub mod model;
pub mod store;
pub mod validate;

/// # Conventions
///
/// - **Errors**: [`error::TodoError`] for list operations, `anyhow::Result`
///   for configuration loading.
/// - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
pub use error::{Result, TodoError};
pub use manager::{ImportReport, ListManager};
pub use model::{Filter, Stats, TaskPatch, TaskRecord};
