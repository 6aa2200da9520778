//! Central spine road network.

use sitekit_core::{Dimensions, EquipmentItem, EquipmentKind, MaterialOverrides, Metadata, Vec3};

use super::constants::{
    entrance_z, life_quarter_z, rows_end_z, DIM_SUBSTATION, SPINE_ROAD_WIDTH, Z_SUBSTATION,
};
use super::{geo_at, to_world_z};

const ROAD_Y: f64 = 0.03;
const LANE_LINE_OFFSET_X: f64 = 4.6;

/// North-south spine in three segments: through the rows down to the
/// substation, across the gap to the staff quarter, and the short run from
/// the quarter to the entrance gate. The substation gets a widened asphalt
/// forecourt in front of its south face for vehicle turnaround.
pub fn generate_road_network(catalog: &mut Vec<EquipmentItem>) {
    let rows_end = to_world_z(rows_end_z());
    let life = to_world_z(life_quarter_z());
    let entrance = to_world_z(entrance_z());
    let substation = to_world_z(Z_SUBSTATION);

    push_spine_segment(catalog, "ROAD_TO_SUBSTATION", rows_end, substation);
    push_spine_segment(catalog, "MAIN_ROAD_NORTH", rows_end, life - 35.0);
    push_spine_segment(catalog, "MAIN_ROAD_SOUTH", life + 35.0, entrance);

    // Forecourt south of the substation: 26 m across the spine, 16 m deep,
    // centered half the long extent plus 8 m past the substation center.
    let forecourt_z = substation + DIM_SUBSTATION.length / 2.0 + 8.0;
    catalog.push(
        EquipmentItem::new(
            "SUBSTATION_FORECOURT",
            EquipmentKind::Road,
            Vec3::new(0.0, ROAD_Y, forecourt_z),
        )
        .with_dimensions(Dimensions::new(26.0, 16.0, 0.05))
        .with_metadata(Metadata {
            color: Some("#1a1a1a".to_string()),
            material: Some(MaterialOverrides {
                roughness: Some(0.9),
                metalness: Some(0.1),
                ..Default::default()
            }),
            ..Metadata::default()
        }),
    );
}

/// One asphalt strip with painted lane lines along both edges. Degenerate
/// segments (under half a meter) are dropped.
fn push_spine_segment(catalog: &mut Vec<EquipmentItem>, id: &str, z_a: f64, z_b: f64) {
    let length = (z_b - z_a).abs();
    if length < 0.5 {
        return;
    }
    let center_z = (z_a + z_b) / 2.0;

    catalog.push(
        EquipmentItem::new(id, EquipmentKind::Road, Vec3::new(0.0, ROAD_Y, center_z))
            .with_dimensions(Dimensions::new(SPINE_ROAD_WIDTH, length, 0.05))
            .with_metadata(Metadata {
                color: Some("#1a1a1a".to_string()),
                material: Some(MaterialOverrides {
                    roughness: Some(0.9),
                    metalness: Some(0.1),
                    ..Default::default()
                }),
                geo: Some(geo_at(0.0, center_z)),
                ..Metadata::default()
            }),
    );

    for (side, x) in [("L", -LANE_LINE_OFFSET_X), ("R", LANE_LINE_OFFSET_X)] {
        catalog.push(
            EquipmentItem::new(
                format!("{id}_LINE_{side}"),
                EquipmentKind::Road,
                Vec3::new(x, ROAD_Y + 0.01, center_z),
            )
            .with_dimensions(Dimensions::new(0.25, length, 0.005))
            .with_metadata(Metadata {
                color: Some("#ffffff".to_string()),
                material: Some(MaterialOverrides {
                    emissive_intensity: Some(0.5),
                    ..Default::default()
                }),
                ..Metadata::default()
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spine_segments_have_asphalt_and_two_lane_lines() {
        let mut catalog = Vec::new();
        generate_road_network(&mut catalog);
        // Three segments, each one strip plus two lines, plus the forecourt.
        assert_eq!(catalog.len(), 10);
        assert!(catalog.iter().all(|e| e.kind == EquipmentKind::Road));
        let lines = catalog.iter().filter(|e| e.id.contains("_LINE_")).count();
        assert_eq!(lines, 6);
    }

    #[test]
    fn substation_gets_a_forecourt() {
        let mut catalog = Vec::new();
        generate_road_network(&mut catalog);
        let forecourt = catalog
            .iter()
            .find(|e| e.id == "SUBSTATION_FORECOURT")
            .expect("missing forecourt");
        let dims = forecourt.effective_dimensions();
        assert_eq!((dims.length, dims.width), (26.0, 16.0));
        let expected_z = to_world_z(Z_SUBSTATION) + DIM_SUBSTATION.length / 2.0 + 8.0;
        assert_eq!(forecourt.position.x, 0.0);
        assert_eq!(forecourt.position.z, expected_z);
    }

    #[test]
    fn degenerate_segment_is_dropped() {
        let mut catalog = Vec::new();
        push_spine_segment(&mut catalog, "STUB", 10.0, 10.2);
        assert!(catalog.is_empty());
    }
}
