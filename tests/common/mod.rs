#![allow(dead_code)]

use std::io::Write;

use qwix::task::Task;
use tempfile::NamedTempFile;

pub use qwix_test_utils::builders::{TaskBuilder, TaskFileBuilder};
pub use qwix_test_utils::{fixed_clock, fixed_now, init_tracing};

/// Ids of an ordered task list, for compact assertions.
pub fn ids(order: &[&Task]) -> Vec<String> {
    order.iter().map(|t| t.id.clone()).collect()
}

/// Write `contents` to a temporary `.toml` file that lives as long as the handle.
pub fn task_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}
