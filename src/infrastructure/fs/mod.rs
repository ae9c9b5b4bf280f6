//! File System Helpers
//!
//! Local disk access used by the on-disk adapters.

mod local;

pub use local::{expand_home, find_dir_containing, LocalFs};
