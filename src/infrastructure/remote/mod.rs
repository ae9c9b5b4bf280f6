//! Remote Client Implementations

mod fs;

pub use fs::FsRemoteClient;
