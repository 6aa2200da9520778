//! Surveillance camera grid.

use sitekit_core::{look_at_yaw, EquipmentItem, EquipmentKind, Metadata, Vec3};

use super::constants::{site_bounds, DIM_CAMERA_POLE, GLOBAL_OFFSET_Z};
use super::geo_at;

/// Corner inset from the section boundary, keeps poles clear of the fence
/// line and roadways.
const CORNER_MARGIN: f64 = 15.0;

/// Places four camera poles per site quadrant, each at an inset corner and
/// aimed across the section at the diagonally opposite corner. The two north
/// (substation-side) sections get PTZ heads, the south sections fixed heads.
pub fn generate_cameras(catalog: &mut Vec<EquipmentItem>) {
    let bounds = site_bounds();
    let min_z = bounds.min_z + GLOBAL_OFFSET_Z;
    let max_z = bounds.max_z + GLOBAL_OFFSET_Z;
    let mid_z = (min_z + max_z) / 2.0;

    let sections = [
        ("NW", bounds.min_x, 0.0, min_z, mid_z, EquipmentKind::CameraPtz),
        ("NE", 0.0, bounds.max_x, min_z, mid_z, EquipmentKind::CameraPtz),
        ("SW", bounds.min_x, 0.0, mid_z, max_z, EquipmentKind::CameraFixed),
        ("SE", 0.0, bounds.max_x, mid_z, max_z, EquipmentKind::CameraFixed),
    ];

    for (name, x0, x1, z0, z1, kind) in sections {
        let corners = [
            (x0 + CORNER_MARGIN, z0 + CORNER_MARGIN),
            (x1 - CORNER_MARGIN, z0 + CORNER_MARGIN),
            (x1 - CORNER_MARGIN, z1 - CORNER_MARGIN),
            (x0 + CORNER_MARGIN, z1 - CORNER_MARGIN),
        ];
        for (i, &(x, z)) in corners.iter().enumerate() {
            // The diagonally opposite inset corner of the same section.
            let (tx, tz) = corners[(i + 2) % 4];
            let pos = Vec3::new(x, 0.0, z);
            let yaw = look_at_yaw(pos, Vec3::new(tx, 0.0, tz));
            let power = match kind {
                EquipmentKind::CameraPtz => "Surveillance PTZ",
                _ => "Surveillance",
            };
            catalog.push(
                EquipmentItem::new(format!("CAM_{name}_{}", i + 1), kind, pos)
                    .with_rotation(Vec3::yaw(yaw))
                    .with_dimensions(DIM_CAMERA_POLE)
                    .with_metadata(Metadata {
                        power: Some(power.to_string()),
                        geo: Some(geo_at(x, z)),
                        ..Metadata::default()
                    }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_cameras_split_between_ptz_and_fixed() {
        let mut catalog = Vec::new();
        generate_cameras(&mut catalog);
        assert_eq!(catalog.len(), 16);
        let ptz = catalog
            .iter()
            .filter(|e| e.kind == EquipmentKind::CameraPtz)
            .count();
        assert_eq!(ptz, 8);
    }

    #[test]
    fn cameras_face_into_their_section() {
        let mut catalog = Vec::new();
        generate_cameras(&mut catalog);
        // The first NW camera sits at the section's north-west inset corner
        // and looks south-east, so its yaw target lies at positive local
        // x/z offsets: atan2(dx, dz) with both deltas positive.
        let cam = catalog.iter().find(|e| e.id == "CAM_NW_1").unwrap();
        let yaw = cam.yaw();
        assert!(yaw > 0.0 && yaw < std::f64::consts::FRAC_PI_2);
    }
}
