//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ImportUseCase` - Resolves or creates the deployed app, diffs, confirms,
//!   applies configuration and hosting changes, then re-syncs the directory

pub mod import;

pub use import::{ImportOptions, ImportOutcome, ImportUseCase};
