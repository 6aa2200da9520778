//! Live transform gestures and same-kind move propagation.
//!
//! A gesture runs between `begin_gesture` and `end_gesture`. Every change in
//! between is written straight through to the catalog (the session routes it
//! via `History::update`, so only the gesture boundaries are undo-worthy).
//! The moved item's displacement is tracked in its own local frame; on
//! gesture end it can be propagated to every other item of the same kind,
//! rotated into each target's yaw frame rather than applied as a uniform
//! world translation.

use tracing::debug;

use sitekit_core::{EquipmentItem, Vec3};

/// Displacement below this is treated as "did not move" while tracking a
/// gesture.
const MOVE_EPSILON: f64 = 0.0005;

/// Minimum gesture displacement that makes propagation worth offering.
const PROPAGATION_THRESHOLD: f64 = 0.01;

/// One change event from a transform gizmo.
#[derive(Debug, Clone, Copy)]
pub struct TransformChange {
    pub position: Vec3,
    pub yaw: f64,
    /// Gizmo scale factor; baked into dimensions, never stored.
    pub scale: Vec3,
}

/// Live handle to an external scene node, obtained by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandle {
    /// Identity token for the underlying node; changes when the external
    /// layer rebuilds the node for the same id.
    pub instance: u64,
    pub has_parent: bool,
}

/// The one capability required of the rendering layer: resolve an id to a
/// live handle with parent/liveness introspection.
pub trait SceneResolver {
    fn resolve(&self, id: &str) -> Option<SceneHandle>;
}

/// Result of the per-frame liveness poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachState {
    /// No usable handle; transform affordances must be hidden.
    Detached,
    Attached,
    /// The id now resolves to a different node; affordances were re-bound.
    Reattached,
}

#[derive(Debug, Clone, Copy)]
struct GestureBaseline {
    position: Vec3,
    yaw: f64,
}

/// Tracks the selection's scene attachment and at most one active gesture.
#[derive(Debug, Default)]
pub struct TransformController {
    attached: Option<(String, u64)>,
    baseline: Option<GestureBaseline>,
    local_delta: Vec3,
}

impl TransformController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds transform affordances to the item with the given id, if the
    /// rendering layer can currently resolve it.
    pub fn attach(&mut self, id: &str, resolver: &dyn SceneResolver) -> bool {
        match resolver.resolve(id) {
            Some(handle) if handle.has_parent => {
                self.attached = Some((id.to_string(), handle.instance));
                true
            }
            _ => {
                self.attached = None;
                false
            }
        }
    }

    pub fn detach(&mut self) {
        self.attached = None;
        self.baseline = None;
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Per-frame liveness poll. A vanished or orphaned handle detaches the
    /// affordances rather than mutating a disconnected node; an identity
    /// change re-binds to the new node.
    pub fn poll(&mut self, resolver: &dyn SceneResolver) -> AttachState {
        let Some((id, instance)) = self.attached.as_mut() else {
            return AttachState::Detached;
        };
        match resolver.resolve(id) {
            Some(handle) if handle.has_parent => {
                if handle.instance == *instance {
                    AttachState::Attached
                } else {
                    debug!(id = %id, "scene node rebuilt, re-attaching");
                    *instance = handle.instance;
                    AttachState::Reattached
                }
            }
            _ => {
                debug!(id = %id, "scene node orphaned, detaching");
                self.attached = None;
                self.baseline = None;
                AttachState::Detached
            }
        }
    }

    /// Records the gesture baseline from the item's current state. The
    /// session snapshots history at the same moment.
    pub fn begin_gesture(&mut self, item: &EquipmentItem) {
        self.baseline = Some(GestureBaseline {
            position: item.position,
            yaw: item.yaw(),
        });
        self.local_delta = Vec3::ZERO;
    }

    pub fn gesture_active(&self) -> bool {
        self.baseline.is_some()
    }

    /// Applies one change event to the item and re-derives the gesture's
    /// local-frame displacement. Non-identity scale is baked into the stored
    /// dimensions so size is always read from `dimensions`.
    pub fn apply_change(&mut self, item: &mut EquipmentItem, change: &TransformChange) {
        let Some(baseline) = self.baseline else {
            return;
        };

        item.position = change.position;
        item.rotation.y = change.yaw;

        let scale = change.scale;
        if (scale.x - 1.0).abs() > f64::EPSILON
            || (scale.y - 1.0).abs() > f64::EPSILON
            || (scale.z - 1.0).abs() > f64::EPSILON
        {
            let mut dims = item.effective_dimensions();
            dims.width *= scale.x;
            dims.height *= scale.y;
            dims.length *= scale.z;
            item.dimensions = Some(dims);
        }

        let world_delta = change.position.sub(baseline.position);
        let local_delta = world_delta.rotate_yaw(-baseline.yaw);
        if local_delta.length() > MOVE_EPSILON {
            self.local_delta = local_delta;
        }
    }

    /// Ends the gesture. Returns the local-frame displacement when it is
    /// large enough to offer "apply to all items of this kind", otherwise
    /// None. The session forces a persistence write either way.
    pub fn end_gesture(&mut self) -> Option<Vec3> {
        self.baseline = None;
        let delta = self.local_delta;
        self.local_delta = Vec3::ZERO;
        if delta.length() > PROPAGATION_THRESHOLD {
            Some(delta)
        } else {
            None
        }
    }
}

/// Applies a local-frame displacement to every other item of the source's
/// kind: the delta is rotated into each target's own yaw frame and added to
/// its position. The source item itself is left untouched. Returns the
/// number of items moved.
pub fn apply_move_to_same_kind(
    catalog: &mut [EquipmentItem],
    source_id: &str,
    local_delta: Vec3,
) -> usize {
    let Some(kind) = catalog
        .iter()
        .find(|item| item.id == source_id)
        .map(|item| item.kind)
    else {
        return 0;
    };

    let mut moved = 0;
    for item in catalog.iter_mut() {
        if item.kind != kind || item.id == source_id {
            continue;
        }
        let world_delta = local_delta.rotate_yaw(item.yaw());
        item.position = item.position.add(world_delta);
        moved += 1;
    }
    debug!(source = source_id, ?kind, moved, "propagated move to same kind");
    moved
}
