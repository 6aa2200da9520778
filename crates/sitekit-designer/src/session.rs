//! Editor session: the single mutation surface over the equipment catalog.
//!
//! Owns the history engine, the autosave manager and the two controllers.
//! Every entry point runs synchronously on the caller's thread; the only
//! time-deferred effect is the autosave debounce, driven by `tick()`.

use std::time::Instant;

use tracing::info;
use uuid::Uuid;

use sitekit_core::{EquipmentItem, EquipmentKind, MaterialOverrides, Ray, Vec3};

use crate::generator;
use crate::history::History;
use crate::persistence::{load_or_generate, AutosaveManager, LayoutStore, SaveStatus};
use crate::placement::PlacementController;
use crate::transform::{
    apply_move_to_same_kind, SceneResolver, TransformChange, TransformController,
};
use crate::validator::{validate_layout, LayoutReport};

/// Offset applied to a duplicated item so it does not sit on its source.
const DUPLICATE_OFFSET: f64 = 5.0;

#[derive(Debug)]
pub struct EditorSession<S> {
    history: History<Vec<EquipmentItem>>,
    autosave: AutosaveManager<S>,
    placement: PlacementController,
    transform: TransformController,
    selection: Option<String>,
    /// Gesture displacement offered for same-kind propagation, with the
    /// item that produced it. Consumed by `apply_pending_move`.
    pending_move: Option<(String, Vec3)>,
}

impl<S: LayoutStore> EditorSession<S> {
    /// Bootstraps a session from the store, falling back to the generated
    /// factory layout when nothing usable is stored.
    pub fn new(store: S) -> Self {
        let catalog = load_or_generate(&store);
        info!(items = catalog.len(), "editor session started");
        Self {
            history: History::new(catalog),
            autosave: AutosaveManager::new(store),
            placement: PlacementController::new(),
            transform: TransformController::new(),
            selection: None,
            pending_move: None,
        }
    }

    pub fn catalog(&self) -> &[EquipmentItem] {
        self.history.current()
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn validate(&self) -> LayoutReport {
        validate_layout(self.catalog())
    }

    /// Per-frame tick: fires a due autosave and refreshes the transform
    /// attachment against the rendering layer.
    pub fn tick(&mut self, now: Instant, resolver: &dyn SceneResolver) {
        self.autosave.tick(now, self.history.current());
        self.transform.poll(resolver);
    }

    // ----- selection -------------------------------------------------------

    pub fn select(&mut self, id: &str, resolver: &dyn SceneResolver) -> bool {
        if !self.catalog().iter().any(|item| item.id == id) {
            return false;
        }
        self.selection = Some(id.to_string());
        self.transform.attach(id, resolver);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.transform.detach();
    }

    pub fn selected(&self) -> Option<&EquipmentItem> {
        let id = self.selection.as_deref()?;
        self.catalog().iter().find(|item| item.id == id)
    }

    // ----- discrete edits --------------------------------------------------

    /// Removes the selected item. Forced write: a completed delete must
    /// survive an immediately closed session.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.take() else {
            return false;
        };
        let mut next = self.history.current().clone();
        next.retain(|item| item.id != id);
        self.history.set(next);
        self.transform.detach();
        self.force_save();
        true
    }

    /// Clones the selected item five meters away on both horizontal axes,
    /// under a fresh id. Forced write.
    pub fn duplicate_selected(&mut self) -> Option<String> {
        let source = self.selected()?.clone();
        let suffix = Uuid::new_v4().simple().to_string();
        let copy_id = format!("{}_COPY_{}", source.id, &suffix[..8]);

        let mut copy = source;
        copy.id = copy_id.clone();
        copy.position.x += DUPLICATE_OFFSET;
        copy.position.z += DUPLICATE_OFFSET;

        let mut next = self.history.current().clone();
        next.push(copy);
        self.history.set(next);
        self.force_save();
        Some(copy_id)
    }

    /// Discrete position change (inspector field edit, not a drag).
    pub fn set_position(&mut self, id: &str, position: Vec3, now: Instant) -> bool {
        let mut next = self.history.current().clone();
        let Some(item) = next.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.position = position;
        self.history.set(next);
        self.autosave.mark_dirty(now);
        true
    }

    /// Regenerates the factory layout and clears the storage slot. The
    /// reset is undo-worthy like any discrete edit.
    pub fn reset_to_factory(&mut self) {
        if let Err(err) = self.autosave.store_mut().clear() {
            tracing::error!(error = %err, "failed to clear stored layout");
        }
        self.history.set(generator::generate());
        self.clear_selection();
        self.pending_move = None;
        info!("layout reset to factory state");
    }

    pub fn undo(&mut self, now: Instant) -> bool {
        let changed = self.history.undo();
        if changed {
            self.autosave.mark_dirty(now);
        }
        changed
    }

    pub fn redo(&mut self, now: Instant) -> bool {
        let changed = self.history.redo();
        if changed {
            self.autosave.mark_dirty(now);
        }
        changed
    }

    // ----- live transform gestures ----------------------------------------

    /// Starts a drag on the selection: one history snapshot marks the
    /// gesture boundary, then every change flows through `update()`.
    pub fn begin_drag(&mut self) -> bool {
        let Some(item) = self.selected().cloned() else {
            return false;
        };
        self.history.snapshot();
        self.transform.begin_gesture(&item);
        true
    }

    /// Applies one gizmo change event to the dragged item.
    pub fn drag_change(&mut self, change: TransformChange) {
        let Some(id) = self.selection.clone() else {
            return;
        };
        if !self.transform.gesture_active() {
            return;
        }
        let mut next = self.history.current().clone();
        if let Some(item) = next.iter_mut().find(|item| item.id == id) {
            self.transform.apply_change(item, &change);
        }
        self.history.update(next);
    }

    /// Ends the drag with a forced write. A large enough displacement is
    /// kept as a pending same-kind move offer.
    pub fn end_drag(&mut self) {
        let delta = self.transform.end_gesture();
        self.force_save();
        self.pending_move = self.selection.clone().zip(delta);
    }

    pub fn pending_move(&self) -> Option<Vec3> {
        self.pending_move.as_ref().map(|(_, delta)| *delta)
    }

    /// Consumes the pending offer: every other item of the source's kind
    /// receives the displacement rotated into its own yaw frame. Forced
    /// write.
    pub fn apply_pending_move(&mut self) -> usize {
        let Some((source_id, delta)) = self.pending_move.take() else {
            return 0;
        };
        let mut next = self.history.current().clone();
        let moved = apply_move_to_same_kind(&mut next, &source_id, delta);
        if moved > 0 {
            self.history.set(next);
            self.force_save();
        }
        moved
    }

    pub fn discard_pending_move(&mut self) {
        self.pending_move = None;
    }

    // ----- appearance ------------------------------------------------------

    /// Starts a continuous appearance edit (color picker drag and the like);
    /// pairs with `appearance_change` and `end_appearance_edit`.
    pub fn begin_appearance_edit(&mut self) {
        self.history.snapshot();
    }

    /// Applies a live appearance patch to the selected item without touching
    /// the undo stacks.
    pub fn appearance_change(&mut self, color: Option<&str>, material: Option<MaterialOverrides>) {
        let Some(id) = self.selection.clone() else {
            return;
        };
        let mut next = self.history.current().clone();
        if let Some(item) = next.iter_mut().find(|item| item.id == id) {
            apply_appearance(item, color, material.as_ref());
        }
        self.history.update(next);
    }

    pub fn end_appearance_edit(&mut self) {
        self.force_save();
    }

    /// Copies the selection's appearance to every other item of its kind.
    /// Discrete, undo-worthy, forced write.
    pub fn apply_appearance_to_kind(&mut self) -> usize {
        let Some(source) = self.selected().cloned() else {
            return 0;
        };
        let color = source
            .metadata
            .as_ref()
            .and_then(|meta| meta.color.clone());
        let material = source.metadata.as_ref().and_then(|meta| meta.material);

        let mut next = self.history.current().clone();
        let mut changed = 0;
        for item in next.iter_mut() {
            if item.kind != source.kind || item.id == source.id {
                continue;
            }
            apply_appearance(item, color.as_deref(), material.as_ref());
            changed += 1;
        }
        if changed > 0 {
            self.history.set(next);
            self.force_save();
        }
        changed
    }

    // ----- ghost placement -------------------------------------------------

    pub fn arm_placement(&mut self, kind: EquipmentKind, now: Instant) {
        self.placement.arm(kind, now);
    }

    pub fn placement_pointer(&mut self, ray: &Ray) -> Option<Vec3> {
        self.placement.pointer_moved(ray)
    }

    pub fn placement_height(&mut self, direction: f64, coarse: bool) -> Option<Vec3> {
        self.placement.adjust_height(direction, coarse)
    }

    pub fn cancel_placement(&mut self) {
        self.placement.cancel();
    }

    /// Confirms the ghost into the catalog under a fresh id. Forced write.
    pub fn confirm_placement(&mut self, now: Instant) -> Option<String> {
        let placed = self.placement.confirm(now)?;
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!("PLACED_{}", &suffix[..8]);

        let mut next = self.history.current().clone();
        next.push(EquipmentItem::new(id.clone(), placed.kind, placed.position));
        self.history.set(next);
        self.force_save();
        Some(id)
    }

    fn force_save(&mut self) {
        self.autosave.force_save(self.history.current());
    }
}

fn apply_appearance(
    item: &mut EquipmentItem,
    color: Option<&str>,
    material: Option<&MaterialOverrides>,
) {
    let meta = item.metadata.get_or_insert_with(Default::default);
    if let Some(color) = color {
        meta.color = Some(color.to_string());
    }
    if let Some(patch) = material {
        let merged = meta
            .material
            .as_ref()
            .map(|current| current.merged_with(patch))
            .unwrap_or(*patch);
        meta.material = Some(merged);
    }
}
