//! Elevated cable tray routing between a container roof and a transformer head.
//!
//! A run is a 3-segment dogleg: flat plate at the start elevation, sloped
//! plate, flat plate at the end elevation, each spanning exactly one third of
//! the horizontal distance. Three conductor polylines ride on top of the
//! plates, fanned out laterally so they terminate on distinct heads.

use sitekit_core::{Dimensions, EquipmentItem, EquipmentKind, Metadata, Vec3};

const PLATE_WIDTH: f64 = 1.0;
const PLATE_THICKNESS: f64 = 0.05;
const CONDUCTOR_RADIUS: f64 = 0.06;
/// Lateral fan-out of the three conductors, meters along the horizontal
/// perpendicular of the run.
const CONDUCTOR_OFFSETS: [f64; 3] = [-0.4, 0.0, 0.4];

/// Synthesizes the tray plates and conductor paths for one run from `start`
/// to `end`. The two endpoints may differ in elevation; the slope takes the
/// whole height difference over the middle third.
pub fn route_cable_tray(id: &str, start: Vec3, end: Vec3, catalog: &mut Vec<EquipmentItem>) {
    let dx = end.x - start.x;
    let dz = end.z - start.z;
    let run = (dx * dx + dz * dz).sqrt();
    let section_len = run / 3.0;

    // Heading of the run, in the catalog's atan2(dx, dz) yaw convention.
    let heading = dx.atan2(dz);

    let plate = |suffix: &str, center: Vec3, dims: Dimensions, rotation: Vec3| {
        EquipmentItem::new(format!("{id}_{suffix}"), EquipmentKind::Road, center)
            .with_rotation(rotation)
            .with_dimensions(dims)
            .with_metadata(Metadata {
                color: Some("#bdc3c7".to_string()),
                ..Metadata::default()
            })
    };

    // High flat plate: centered at 1/6 of the run, start elevation.
    catalog.push(plate(
        "HIGH",
        Vec3::new(start.x + dx / 6.0, start.y, start.z + dz / 6.0),
        Dimensions::new(section_len, PLATE_WIDTH, PLATE_THICKNESS),
        Vec3::yaw(heading),
    ));

    // Low flat plate: centered at 5/6 of the run, end elevation.
    catalog.push(plate(
        "LOW",
        Vec3::new(start.x + dx * 5.0 / 6.0, end.y, start.z + dz * 5.0 / 6.0),
        Dimensions::new(section_len, PLATE_WIDTH, PLATE_THICKNESS),
        Vec3::yaw(heading),
    ));

    // Sloped plate bridging the middle third; its length is the hypotenuse of
    // the section and the height difference, its pitch the matching angle.
    let height_diff = start.y - end.y;
    let slope_len = (section_len * section_len + height_diff * height_diff).sqrt();
    let pitch = height_diff.atan2(section_len);
    let mut slope = plate(
        "SLOPE",
        Vec3::new(start.x + dx / 2.0, (start.y + end.y) / 2.0, start.z + dz / 2.0),
        Dimensions::new(slope_len, PLATE_WIDTH, PLATE_THICKNESS),
        Vec3::new(pitch, heading, 0.0),
    );
    if let Some(meta) = slope.metadata.as_mut() {
        meta.color = Some("#a0a0a0".to_string());
    }
    catalog.push(slope);

    if run <= 1e-3 {
        return;
    }

    // Conductors follow the plate centerline lifted just above the surface,
    // then drop to the terminal head at the end elevation. Each one is offset
    // along the horizontal perpendicular so the three never intersect.
    let dir_x = dx / run;
    let dir_z = dz / run;
    let perp_x = dir_z;
    let perp_z = -dir_x;
    let lift = PLATE_THICKNESS / 2.0 + CONDUCTOR_RADIUS + 0.01;

    let centerline = [
        Vec3::new(start.x, start.y + lift, start.z),
        Vec3::new(start.x + dx / 3.0, start.y + lift, start.z + dz / 3.0),
        Vec3::new(start.x + dx * 2.0 / 3.0, end.y + lift, start.z + dz * 2.0 / 3.0),
        Vec3::new(end.x, end.y + lift, end.z),
    ];

    for (i, offset) in CONDUCTOR_OFFSETS.iter().enumerate() {
        let shift = Vec3::new(perp_x * offset, 0.0, perp_z * offset);
        let mut path: Vec<Vec3> = centerline.iter().map(|p| p.add(shift)).collect();
        // Terminal head sits at the end elevation, not on the plate surface.
        path.push(Vec3::new(end.x + perp_x * offset, end.y, end.z + perp_z * offset));

        catalog.push(
            EquipmentItem::new(
                format!("{id}_WIRE_{}", i + 1),
                EquipmentKind::CablePath,
                path[0],
            )
            .with_metadata(Metadata {
                color: Some("#111827".to_string()),
                from: Some(start),
                to: Some(end),
                path: Some(path),
                ..Metadata::default()
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tray(start: Vec3, end: Vec3) -> Vec<EquipmentItem> {
        let mut out = Vec::new();
        route_cable_tray("T", start, end, &mut out);
        out
    }

    #[test]
    fn dogleg_has_three_plates_and_three_conductors() {
        let items = tray(Vec3::new(0.0, 5.4, 0.0), Vec3::new(0.0, 3.2, 18.0));
        let plates = items
            .iter()
            .filter(|i| i.kind == EquipmentKind::Road)
            .count();
        let wires = items
            .iter()
            .filter(|i| i.kind == EquipmentKind::CablePath)
            .count();
        assert_eq!(plates, 3);
        assert_eq!(wires, 3);
    }

    #[test]
    fn plate_segments_are_contiguous() {
        let start = Vec3::new(0.0, 5.4, 0.0);
        let end = Vec3::new(6.0, 3.2, 18.0);
        let items = tray(start, end);

        let find = |suffix: &str| items.iter().find(|i| i.id.ends_with(suffix)).unwrap();
        let high = find("_HIGH");
        let slope = find("_SLOPE");
        let low = find("_LOW");

        let section = ((end.x * end.x + end.z * end.z).sqrt()) / 3.0;
        // Horizontal half-span of each flat plate along the run direction.
        let dir = Vec3::new(end.x, 0.0, end.z).scale(1.0 / (section * 3.0));

        let high_end = Vec3::new(
            high.position.x + dir.x * section / 2.0,
            high.position.y,
            high.position.z + dir.z * section / 2.0,
        );
        let slope_start_xz = Vec3::new(
            slope.position.x - dir.x * section / 2.0,
            start.y,
            slope.position.z - dir.z * section / 2.0,
        );
        assert!(high_end.sub(slope_start_xz).horizontal_length() < 1e-6);

        let slope_end_xz = Vec3::new(
            slope.position.x + dir.x * section / 2.0,
            end.y,
            slope.position.z + dir.z * section / 2.0,
        );
        let low_start = Vec3::new(
            low.position.x - dir.x * section / 2.0,
            low.position.y,
            low.position.z - dir.z * section / 2.0,
        );
        assert!(slope_end_xz.sub(low_start).horizontal_length() < 1e-6);
        // Elevations: high plate at start.y, low plate at end.y.
        assert!((high.position.y - start.y).abs() < 1e-9);
        assert!((low.position.y - end.y).abs() < 1e-9);
    }

    #[test]
    fn conductors_have_five_point_paths_and_fan_out() {
        let items = tray(Vec3::new(0.0, 5.4, 0.0), Vec3::new(0.0, 3.2, 18.0));
        let wires: Vec<_> = items
            .iter()
            .filter(|i| i.kind == EquipmentKind::CablePath)
            .collect();
        let mut terminals = Vec::new();
        for wire in &wires {
            let path = wire.metadata.as_ref().unwrap().path.as_ref().unwrap();
            assert_eq!(path.len(), 5);
            terminals.push(*path.last().unwrap());
        }
        // Distinct terminal heads.
        assert!(terminals[0].distance_to(terminals[1]) > 0.3);
        assert!(terminals[1].distance_to(terminals[2]) > 0.3);
    }

    #[test]
    fn slope_pitch_matches_height_over_third_of_run() {
        let items = tray(Vec3::new(0.0, 5.4, 0.0), Vec3::new(0.0, 3.2, 18.0));
        let slope = items.iter().find(|i| i.id.ends_with("_SLOPE")).unwrap();
        let expected = (5.4f64 - 3.2).atan2(6.0);
        assert!((slope.rotation.x - expected).abs() < 1e-12);
    }
}
