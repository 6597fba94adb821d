// src/config/mod.rs

//! Task file model, loading and validation.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_task_file_path, load_and_validate, load_from_path};
pub use model::{RawTaskFile, SchedulerSection, TaskFile};
