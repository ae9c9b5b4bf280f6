//! Domain Layer
//!
//! The reconciliation core - pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Application graph, asset metadata, asset cache
//! - `value_objects/` - Immutable value types (ImportStrategy, ContentHash, Blob)
//! - `services/` - ConfigDiffer, AssetDiffer, apply_payload
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
