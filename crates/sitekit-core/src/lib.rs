//! # SiteKit Core
//!
//! Geometry primitives and the equipment data model shared by the SiteKit
//! workspace. The catalog entity (`EquipmentItem`) defined here is the sole
//! hand-off type between the engine and any rendering collaborator.

pub mod equipment;
pub mod error;
pub mod geometry;

pub use equipment::{
    kind_counts, validate_catalog, Dimensions, EquipmentItem, EquipmentKind, GeoPoint,
    MaterialOverrides, Metadata,
};
pub use error::{CatalogError, PersistenceError, Result};
pub use geometry::{look_at_yaw, snap, Aabb, Ray, Vec3};
