pub mod filter;
pub mod task;

pub use filter::Filter;
pub use task::{Stats, TaskPatch, TaskRecord};
