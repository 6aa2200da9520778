use std::f64::consts::FRAC_PI_2;
use std::time::{Duration, Instant};

use sitekit_core::{EquipmentKind, Ray, Vec3};
use sitekit_designer::persistence::LayoutStore;
use sitekit_designer::{
    EditorSession, FileLayoutStore, SaveStatus, SceneHandle, SceneResolver, TransformChange,
};

/// Resolver that always answers with a live, parented handle, standing in
/// for a healthy rendering layer.
struct LiveResolver;

impl SceneResolver for LiveResolver {
    fn resolve(&self, _id: &str) -> Option<SceneHandle> {
        Some(SceneHandle {
            instance: 1,
            has_parent: true,
        })
    }
}

fn session_in(dir: &std::path::Path) -> EditorSession<FileLayoutStore> {
    EditorSession::new(FileLayoutStore::new(dir))
}

#[test]
fn test_bootstrap_generates_factory_layout() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path());
    assert!(!session.catalog().is_empty());
    assert!(!session.can_undo());
    assert_eq!(session.save_status(), SaveStatus::Idle);
}

#[test]
fn test_delete_persists_and_is_undoable() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let before = session.catalog().len();

    assert!(session.select("SUBSTATION_MAIN", &LiveResolver));
    assert!(session.delete_selected());
    assert_eq!(session.catalog().len(), before - 1);
    assert_eq!(session.save_status(), SaveStatus::Saved);

    // The forced write hit the store immediately.
    let stored = FileLayoutStore::new(dir.path()).load().unwrap().unwrap();
    assert_eq!(stored.len(), before - 1);

    assert!(session.undo(Instant::now()));
    assert_eq!(session.catalog().len(), before);
    assert!(session
        .catalog()
        .iter()
        .any(|item| item.id == "SUBSTATION_MAIN"));
}

#[test]
fn test_duplicate_offsets_the_copy() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    assert!(session.select("PU1_TR1", &LiveResolver));
    let source = session.selected().unwrap().clone();
    let copy_id = session.duplicate_selected().expect("duplicate failed");

    let copy = session
        .catalog()
        .iter()
        .find(|item| item.id == copy_id)
        .unwrap();
    assert_eq!(copy.kind, source.kind);
    assert_eq!(copy.position.x, source.position.x + 5.0);
    assert_eq!(copy.position.z, source.position.z + 5.0);
    assert_ne!(copy.id, source.id);
}

#[test]
fn test_drag_gesture_offers_same_kind_propagation() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    // Containers are generated with a -90 degree yaw, so a +2 m local-X
    // move shows up as a +2 m world-Z move.
    assert!(session.select("PU1_TR1_CA", &LiveResolver));
    let source = session.selected().unwrap().clone();
    assert!((source.yaw() + FRAC_PI_2).abs() < 1e-9);

    let other_before = session
        .catalog()
        .iter()
        .find(|item| item.id == "PU2_TR5_CB")
        .unwrap()
        .position;

    assert!(session.begin_drag());
    session.drag_change(TransformChange {
        position: Vec3::new(source.position.x, source.position.y, source.position.z + 2.0),
        yaw: source.yaw(),
        scale: Vec3::new(1.0, 1.0, 1.0),
    });
    session.end_drag();

    let delta = session.pending_move().expect("no propagation offered");
    assert!((delta.x - 2.0).abs() < 1e-9);
    assert!(delta.z.abs() < 1e-9);

    let containers = session
        .catalog()
        .iter()
        .filter(|item| item.kind == EquipmentKind::Container)
        .count();
    let moved = session.apply_pending_move();
    assert_eq!(moved, containers - 1);

    // Every other container shares the same yaw, so each moved +2 m in
    // world Z; the dragged item was not moved again.
    let other_after = session
        .catalog()
        .iter()
        .find(|item| item.id == "PU2_TR5_CB")
        .unwrap()
        .position;
    assert!((other_after.z - other_before.z - 2.0).abs() < 1e-9);

    let dragged = session
        .catalog()
        .iter()
        .find(|item| item.id == "PU1_TR1_CA")
        .unwrap();
    assert!((dragged.position.z - source.position.z - 2.0).abs() < 1e-9);
}

#[test]
fn test_drag_updates_do_not_pollute_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    assert!(session.select("PU1_TR1", &LiveResolver));
    let source = session.selected().unwrap().clone();

    session.begin_drag();
    for step in 1..=20 {
        session.drag_change(TransformChange {
            position: Vec3::new(source.position.x + step as f64 * 0.1, 0.7, source.position.z),
            yaw: source.yaw(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        });
    }
    session.end_drag();

    // One undo steps over the whole gesture.
    assert!(session.undo(Instant::now()));
    let item = session
        .catalog()
        .iter()
        .find(|item| item.id == "PU1_TR1")
        .unwrap();
    assert_eq!(item.position, source.position);
    assert!(!session.can_undo());
}

#[test]
fn test_appearance_bulk_apply_copies_color_to_kind() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());

    assert!(session.select("PU1_TR1", &LiveResolver));
    session.begin_appearance_edit();
    session.appearance_change(Some("#ff8800"), None);
    session.end_appearance_edit();

    let changed = session.apply_appearance_to_kind();
    let transformers = session
        .catalog()
        .iter()
        .filter(|item| item.kind == EquipmentKind::Transformer)
        .count();
    assert_eq!(changed, transformers - 1);

    for item in session.catalog() {
        if item.kind == EquipmentKind::Transformer {
            let color = item
                .metadata
                .as_ref()
                .and_then(|meta| meta.color.as_deref());
            assert_eq!(color, Some("#ff8800"), "wrong color on {}", item.id);
        }
    }
    assert_eq!(session.save_status(), SaveStatus::Saved);
}

#[test]
fn test_ghost_placement_snaps_and_respects_arming_delay() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let before = session.catalog().len();
    let t0 = Instant::now();

    session.arm_placement(EquipmentKind::Barrier, t0);
    let ray = Ray::new(Vec3::new(12.37, 50.0, 7.84), Vec3::new(0.0, -1.0, 0.0));
    let ghost = session.placement_pointer(&ray).unwrap();
    assert_eq!(ghost.x, 12.0);
    assert_eq!(ghost.z, 8.0);

    // The click that opened the placement UI lands inside the delay.
    assert!(session.confirm_placement(t0 + Duration::from_millis(100)).is_none());
    assert_eq!(session.catalog().len(), before);

    let id = session
        .confirm_placement(t0 + Duration::from_millis(300))
        .expect("confirm failed");
    let placed = session.catalog().iter().find(|item| item.id == id).unwrap();
    assert_eq!(placed.kind, EquipmentKind::Barrier);
    assert_eq!(placed.position, Vec3::new(12.0, 0.0, 8.0));
    assert_eq!(session.save_status(), SaveStatus::Saved);
}

#[test]
fn test_escape_cancels_placement() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let t0 = Instant::now();

    session.arm_placement(EquipmentKind::Signage, t0);
    let ray = Ray::new(Vec3::new(3.0, 50.0, 3.0), Vec3::new(0.0, -1.0, 0.0));
    session.placement_pointer(&ray);
    session.cancel_placement();
    assert!(session.confirm_placement(t0 + Duration::from_secs(1)).is_none());
}

#[test]
fn test_autosave_debounce_through_tick() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let t0 = Instant::now();

    assert!(session.set_position("PU1_TR1", Vec3::new(1.0, 0.7, 2.0), t0));
    assert_eq!(session.save_status(), SaveStatus::Idle);

    session.tick(t0 + Duration::from_millis(500), &LiveResolver);
    assert_eq!(session.save_status(), SaveStatus::Idle);

    session.tick(t0 + Duration::from_millis(1100), &LiveResolver);
    assert_eq!(session.save_status(), SaveStatus::Saved);
    assert!(FileLayoutStore::new(dir.path()).load().unwrap().is_some());
}

#[test]
fn test_session_restores_stored_layout() {
    let dir = tempfile::tempdir().unwrap();
    let count_after_delete;
    {
        let mut session = session_in(dir.path());
        session.select("SUBSTATION_MAIN", &LiveResolver);
        session.delete_selected();
        count_after_delete = session.catalog().len();
    }

    let restored = session_in(dir.path());
    assert_eq!(restored.catalog().len(), count_after_delete);
    assert!(!restored
        .catalog()
        .iter()
        .any(|item| item.id == "SUBSTATION_MAIN"));
}

#[test]
fn test_reset_restores_factory_layout_and_clears_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(dir.path());
    let factory_count = session.catalog().len();

    session.select("SUBSTATION_MAIN", &LiveResolver);
    session.delete_selected();
    session.reset_to_factory();

    assert_eq!(session.catalog().len(), factory_count);
    assert!(FileLayoutStore::new(dir.path()).load().unwrap().is_none());
    // The reset itself can be undone like any discrete edit.
    assert!(session.can_undo());
}
