//! Value Objects
//!
//! Immutable types that represent domain concepts.

mod blob;
mod hash;
mod natural_key;
mod strategy;

pub use blob::Blob;
pub use hash::ContentHash;
pub use natural_key::{EntityPath, Keyed};
pub use strategy::ImportStrategy;
