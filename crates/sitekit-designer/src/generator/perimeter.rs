//! Perimeter fence, entrance gate and guard post.

use sitekit_core::{EquipmentItem, EquipmentKind, Metadata, Vec3};

use super::constants::{
    entrance_z, site_bounds, DIM_FENCE_SEGMENT, DIM_GUARD_POST, GLOBAL_OFFSET_Z,
};
use super::{geo_at, to_world_z};

/// Walks the site rectangle in fixed-length fence segments. Segments that
/// fall in the gate band are skipped; the gate itself is a security barrier
/// plus a guard post building.
pub fn generate_perimeter(catalog: &mut Vec<EquipmentItem>) {
    let bounds = site_bounds();
    let gate_z = entrance_z();
    let step = DIM_FENCE_SEGMENT.length;

    let mut push_fence = |x: f64, z: f64, yaw: f64, suffix: String| {
        // Gate band: no fence within 10 m of the entrance axis on the south edge.
        if (z - gate_z).abs() < 10.0 && x.abs() < 10.0 && z > bounds.max_z - 20.0 {
            return;
        }
        let world_z = to_world_z(z);
        catalog.push(
            EquipmentItem::new(
                format!("FENCE_{suffix}"),
                EquipmentKind::Fence,
                Vec3::new(x, DIM_FENCE_SEGMENT.height / 2.0, world_z),
            )
            .with_rotation(Vec3::yaw(yaw))
            .with_dimensions(DIM_FENCE_SEGMENT)
            .with_metadata(Metadata {
                geo: Some(geo_at(x, world_z)),
                ..Metadata::default()
            }),
        );
    };

    // North and south edges walk X; east and west edges walk Z.
    let mut x = bounds.min_x;
    while x <= bounds.max_x {
        push_fence(x, bounds.min_z, 0.0, format!("N_{x:.0}"));
        push_fence(x, bounds.max_z, 0.0, format!("S_{x:.0}"));
        x += step;
    }
    let mut z = bounds.min_z;
    while z <= bounds.max_z {
        push_fence(bounds.min_x, z, std::f64::consts::FRAC_PI_2, format!("W_{z:.0}"));
        push_fence(bounds.max_x, z, std::f64::consts::FRAC_PI_2, format!("E_{z:.0}"));
        z += step;
    }

    let gate_world_z = to_world_z(gate_z);
    catalog.push(
        EquipmentItem::new(
            "ENTRANCE_GATE_MAIN",
            EquipmentKind::SecurityGate,
            Vec3::new(0.0, 0.0, gate_world_z),
        )
        .with_dimensions(EquipmentKind::SecurityGate.default_dimensions())
        .with_metadata(Metadata {
            geo: Some(geo_at(0.0, gate_world_z)),
            ..Metadata::default()
        }),
    );

    catalog.push(
        EquipmentItem::new(
            "GUARD_POST",
            EquipmentKind::Building,
            Vec3::new(6.0, DIM_GUARD_POST.height / 2.0, gate_world_z),
        )
        .with_rotation(Vec3::yaw(-0.5))
        .with_dimensions(DIM_GUARD_POST)
        .with_metadata(Metadata {
            building_type: Some("security".to_string()),
            geo: Some(geo_at(6.0, gate_world_z)),
            ..Metadata::default()
        }),
    );
}

/// Two site flags flanking the entrance road, a few meters inside the gate.
pub fn generate_entrance_flags(catalog: &mut Vec<EquipmentItem>) {
    let flag_z = entrance_z() + GLOBAL_OFFSET_Z - 10.0;
    for (suffix, x) in [("L", -10.0), ("R", 10.0)] {
        catalog.push(
            EquipmentItem::new(
                format!("SITE_FLAG_{suffix}"),
                EquipmentKind::Flag,
                Vec3::new(x, 0.0, flag_z),
            )
            .with_dimensions(sitekit_core::Dimensions::new(1.0, 1.0, 8.0))
            .with_metadata(Metadata {
                color: Some("#8a1538".to_string()),
                ..Metadata::default()
            }),
        );
    }
}
