//! Ghost placement: a provisional item tracked under the pointer until it is
//! confirmed or cancelled.

use std::time::{Duration, Instant};

use tracing::debug;

use sitekit_core::{snap, EquipmentKind, Ray, Vec3};

/// Clicks inside this window after arming are ignored, so the click that
/// opened the placement UI cannot also confirm the ghost.
pub const ARMING_DELAY: Duration = Duration::from_millis(250);

/// Horizontal snap grid, meters.
pub const SNAP_STEP: f64 = 1.0;

pub const HEIGHT_STEP_COARSE: f64 = 1.0;
pub const HEIGHT_STEP_FINE: f64 = 0.1;

/// A confirmed ghost, ready to be added to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedPlacement {
    pub kind: EquipmentKind,
    pub position: Vec3,
}

#[derive(Debug)]
struct ActiveGhost {
    kind: EquipmentKind,
    armed_at: Instant,
    /// Snapped horizontal position; None until the first pointer event.
    anchor: Option<(f64, f64)>,
    /// Vertical offset, adjusted independently of the pointer and never
    /// snapped.
    height: f64,
}

/// Tracks at most one ghost at a time.
#[derive(Debug, Default)]
pub struct PlacementController {
    ghost: Option<ActiveGhost>,
}

impl PlacementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.ghost.is_some()
    }

    /// Starts placing an item of the given kind. Replaces any previous ghost.
    pub fn arm(&mut self, kind: EquipmentKind, now: Instant) {
        debug!(?kind, "placement armed");
        self.ghost = Some(ActiveGhost {
            kind,
            armed_at: now,
            anchor: None,
            height: 0.0,
        });
    }

    /// Projects the pointer ray onto the ground plane and snaps the hit to
    /// the placement grid. Returns the ghost's world position, or None when
    /// no ghost is armed or the ray misses the ground.
    pub fn pointer_moved(&mut self, ray: &Ray) -> Option<Vec3> {
        let ghost = self.ghost.as_mut()?;
        let hit = ray.intersect_ground(0.0)?;
        ghost.anchor = Some((snap(hit.x, SNAP_STEP), snap(hit.z, SNAP_STEP)));
        ghost_position(ghost)
    }

    /// Nudges the ghost height by one step in the given direction, clamped
    /// at ground level. Returns the updated position.
    pub fn adjust_height(&mut self, direction: f64, coarse: bool) -> Option<Vec3> {
        let ghost = self.ghost.as_mut()?;
        let step = if coarse {
            HEIGHT_STEP_COARSE
        } else {
            HEIGHT_STEP_FINE
        };
        ghost.height = (ghost.height + direction.signum() * step).max(0.0);
        ghost_position(ghost)
    }

    pub fn reset_height(&mut self) -> Option<Vec3> {
        let ghost = self.ghost.as_mut()?;
        ghost.height = 0.0;
        ghost_position(ghost)
    }

    /// Confirms the ghost at its current position and disarms. Clicks within
    /// the arming delay, or before any pointer event has anchored the ghost,
    /// are ignored and leave it armed.
    pub fn confirm(&mut self, now: Instant) -> Option<ConfirmedPlacement> {
        let ghost = self.ghost.as_ref()?;
        if now.duration_since(ghost.armed_at) < ARMING_DELAY {
            return None;
        }
        let position = ghost_position(ghost)?;
        let kind = ghost.kind;
        self.ghost = None;
        debug!(?kind, "placement confirmed");
        Some(ConfirmedPlacement { kind, position })
    }

    /// Drops the ghost without placing anything.
    pub fn cancel(&mut self) {
        if self.ghost.take().is_some() {
            debug!("placement cancelled");
        }
    }
}

fn ghost_position(ghost: &ActiveGhost) -> Option<Vec3> {
    let (x, z) = ghost.anchor?;
    Some(Vec3::new(x, ghost.height, z))
}
