//! Hosting Source Implementations

mod local;

pub use local::LocalHostingSource;
