//! # SiteKit
//!
//! A headless layout engine for fixed-footprint industrial equipment sites:
//! power units, transformers, container halls, roads, fencing and
//! surveillance, laid out and edited as one flat equipment catalog.
//!
//! ## Architecture
//!
//! SiteKit is organized as a workspace with multiple crates:
//!
//! 1. **sitekit-core** - Geometry primitives and the equipment data model
//! 2. **sitekit-designer** - Layout generator, spatial validator, undo/redo
//!    history, transform/placement controllers, persistence
//! 3. **sitekit** - Main binary exposing the engine on the command line
//!
//! ## Features
//!
//! - **Deterministic generation**: the factory layout is a pure function of
//!   a constant table and doubles as "reset to defaults"
//! - **Spatial validation**: pairwise overlap and clearance checks with
//!   aggregate statistics
//! - **Undo/redo**: generic history over the full catalog with gesture-aware
//!   granularity
//! - **Autosave**: debounced writes with a forced path for discrete edits

pub use sitekit_core::{
    kind_counts, look_at_yaw, snap, validate_catalog, Aabb, CatalogError, Dimensions,
    EquipmentItem, EquipmentKind, GeoPoint, MaterialOverrides, Metadata, PersistenceError, Ray,
    Result, Vec3,
};

pub use sitekit_designer::{
    generate, load_or_generate, validate_layout, validate_layout_with, AdaptiveQuality,
    AttachState, AutosaveManager, ConfirmedPlacement, EditorSession, FileLayoutStore, FrameStats,
    History, HysteresisQuality, LayoutReport, LayoutStore, PlacementController, QualityLevel,
    SaveStatus, SceneHandle, SceneResolver, TransformChange, TransformController, ValidatorConfig,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
