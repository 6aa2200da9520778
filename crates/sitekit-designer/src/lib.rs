//! Site layout designer: deterministic layout generation, spatial
//! validation, undo/redo history, transform and placement control, and
//! debounced persistence for an industrial equipment catalog.
//!
//! The crate is headless. Rendering collaborators receive the catalog as a
//! read-only slice and feed input back through [`session::EditorSession`],
//! the single mutation surface; the only capability they must provide in
//! return is id-to-scene-handle resolution ([`transform::SceneResolver`]).

pub mod generator;
pub mod history;
pub mod persistence;
pub mod placement;
pub mod quality;
pub mod session;
pub mod transform;
pub mod validator;

pub use generator::generate;
pub use history::History;
pub use persistence::{
    load_or_generate, AutosaveManager, FileLayoutStore, LayoutStore, SaveStatus,
    AUTOSAVE_DEBOUNCE, LAYOUT_FILE,
};
pub use placement::{ConfirmedPlacement, PlacementController, ARMING_DELAY};
pub use quality::{AdaptiveQuality, FrameStats, HysteresisQuality, QualityLevel};
pub use session::EditorSession;
pub use transform::{
    apply_move_to_same_kind, AttachState, SceneHandle, SceneResolver, TransformChange,
    TransformController,
};
pub use validator::{validate_layout, validate_layout_with, LayoutReport, ValidatorConfig};
