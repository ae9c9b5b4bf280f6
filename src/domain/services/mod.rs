//! Domain Services
//!
//! Stateless services that implement business logic.

mod apply;
mod asset_differ;
mod config_differ;
mod reconcile;

pub use apply::apply_payload;
pub use asset_differ::{AssetAction, AssetDiffer, AssetOperation, AssetPlan, SkipReason};
pub use config_differ::{
    ChangeDetail, ChangeKind, ConfigChange, ConfigDiff, ConfigDiffer, DiffRun,
};
pub use reconcile::Reconcile;
