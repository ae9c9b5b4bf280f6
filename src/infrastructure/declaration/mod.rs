//! Declaration Store Implementations

mod directory;

pub use directory::{resolve_app_dir, DirectoryDeclarationStore, APP_FILE, INSTANCE_FILE};
