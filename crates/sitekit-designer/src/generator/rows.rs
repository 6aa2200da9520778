//! Row placement: power units, transformers, containers and their dependents.

use std::f64::consts::{FRAC_PI_2, PI};

use sitekit_core::{Dimensions, EquipmentItem, EquipmentKind, Metadata, Vec3};

use super::cable_tray::route_cable_tray;
use super::constants::*;
use super::{geo_at, to_world_z};

fn meta_geo(x: f64, z: f64) -> Metadata {
    Metadata {
        geo: Some(geo_at(x, z)),
        ..Metadata::default()
    }
}

/// High-voltage substation at the north head of the site.
pub fn generate_substation(catalog: &mut Vec<EquipmentItem>) {
    let z = to_world_z(Z_SUBSTATION);
    let y = FOUNDATION_HEIGHT + DIM_SUBSTATION.height / 2.0;
    catalog.push(
        EquipmentItem::new("SUBSTATION_MAIN", EquipmentKind::Substation, Vec3::new(0.0, y, z))
            .with_dimensions(DIM_SUBSTATION)
            .with_metadata(Metadata {
                power: Some("100MW HV Station".to_string()),
                geo: Some(geo_at(0.0, z)),
                ..Metadata::default()
            }),
    );
}

/// Staff quarter south of the rows: canteen west of the spine, two
/// dormitories east of it.
pub fn generate_life_quarter(catalog: &mut Vec<EquipmentItem>) {
    let z = to_world_z(life_quarter_z());

    catalog.push(
        EquipmentItem::new("LIFE_CANTEEN", EquipmentKind::Canteen, Vec3::new(-25.0, 0.0, z))
            .with_dimensions(Dimensions::new(15.0, 25.0, 5.0))
            .with_metadata(Metadata {
                power: Some("Canteen".to_string()),
                geo: Some(geo_at(-25.0, z)),
                ..Metadata::default()
            }),
    );

    for (i, dz) in [0.0, 20.0].iter().enumerate() {
        let dorm_z = z + dz;
        catalog.push(
            EquipmentItem::new(
                format!("LIFE_DORM_{}", i + 1),
                EquipmentKind::Dormitory,
                Vec3::new(25.0, 0.0, dorm_z),
            )
            .with_dimensions(Dimensions::new(12.0, 40.0, 7.0))
            .with_metadata(Metadata {
                power: Some(format!("Dormitory {}", ["A", "B"][i])),
                geo: Some(geo_at(25.0, dorm_z)),
                ..Metadata::default()
            }),
        );
    }
}

/// Secure turnstile cage on the spine, just north of row 1.
pub fn generate_access_cage(catalog: &mut Vec<EquipmentItem>) {
    let z = to_world_z(Z_ROWS_START - 10.0);
    catalog.push(
        EquipmentItem::new(
            "CENTRAL_ACCESS_CAGE",
            EquipmentKind::SecurityCage,
            Vec3::new(0.0, FOUNDATION_HEIGHT, z),
        )
        .with_dimensions(Dimensions::new(2.0, 2.0, 2.5))
        .with_metadata(Metadata {
            power: Some("Secure Access".to_string()),
            ..Metadata::default()
        }),
    );
}

/// The four equipment rows. Rows 1-3 are full (8 transformers, 16
/// containers); the last row is the service row: its west half is replaced by
/// workshops, parking, a logistics apron and the fire station.
pub fn generate_rows(catalog: &mut Vec<EquipmentItem>) {
    for row in 0..ROW_COUNT {
        let row_z = to_world_z(Z_ROWS_START + row as f64 * ROW_SPACING_Z);
        let unit_id = format!("PU{}", row + 1);
        let is_service_row = row == SERVICE_ROW;

        generate_power_units(catalog, &unit_id, row_z, is_service_row);
        generate_row_roads(catalog, &unit_id, row, row_z, is_service_row);

        if is_service_row {
            generate_service_area(catalog, row_z);
        }

        for (idx, &offset_x) in TRANSFORMER_OFFSETS_X.iter().enumerate() {
            // West half of the service row hosts the workshops instead.
            if is_service_row && offset_x < 0.0 {
                continue;
            }
            let tr_id = format!("{unit_id}_TR{}", idx + 1);
            generate_transformer_bay(catalog, &unit_id, &tr_id, offset_x, row_z);
        }
    }

    generate_under_unit_roads(catalog);
}

/// Maintenance lanes running the full row depth underneath each power unit
/// column, flush with the foundation tops.
fn generate_under_unit_roads(catalog: &mut Vec<EquipmentItem>) {
    let z_first = to_world_z(Z_ROWS_START);
    let z_last = to_world_z(last_row_z());
    let overhang = 33.75;
    let length = (z_last - z_first) + 2.0 * overhang;
    let center_z = (z_first + z_last) / 2.0;

    for (side, x) in [("L", -POWER_UNIT_OFFSET_X), ("R", POWER_UNIT_OFFSET_X)] {
        catalog.push(
            EquipmentItem::new(
                format!("UNDER_UNIT_ROAD_{side}"),
                EquipmentKind::Road,
                Vec3::new(x, FOUNDATION_HEIGHT + 0.06, center_z),
            )
            .with_dimensions(Dimensions::new(6.0, length, 0.1))
            .with_metadata(Metadata {
                color: Some("#333333".to_string()),
                ..Metadata::default()
            }),
        );
    }
}

/// Power unit columns at x = ±90, each on its own concrete foundation and
/// turned a quarter turn to align with the row axis. The west unit is omitted
/// on the service row.
fn generate_power_units(
    catalog: &mut Vec<EquipmentItem>,
    unit_id: &str,
    row_z: f64,
    is_service_row: bool,
) {
    let mut push_unit = |suffix: &str, x: f64| {
        catalog.push(
            EquipmentItem::new(
                format!("{unit_id}_FOUNDATION_{suffix}"),
                EquipmentKind::Foundation,
                Vec3::new(x, FOUNDATION_HEIGHT / 2.0, row_z),
            )
            .with_dimensions(Dimensions::new(14.0, 6.0, FOUNDATION_HEIGHT)),
        );
        catalog.push(
            EquipmentItem::new(
                format!("{unit_id}_{suffix}"),
                EquipmentKind::PowerUnit,
                Vec3::new(x, FOUNDATION_HEIGHT, row_z),
            )
            .with_rotation(Vec3::yaw(FRAC_PI_2))
            .with_dimensions(DIM_POWER_UNIT)
            .with_metadata(Metadata {
                power: Some(format!("20MW E-House {suffix}")),
                geo: Some(geo_at(x, row_z)),
                ..Metadata::default()
            }),
        );
    };

    if !is_service_row {
        push_unit("L", -POWER_UNIT_OFFSET_X);
    }
    push_unit("R", POWER_UNIT_OFFSET_X);
}

/// One transformer bay: foundation, transformer, protective cage, the two
/// containers with their stair units, and the elevated cable trays feeding
/// them.
fn generate_transformer_bay(
    catalog: &mut Vec<EquipmentItem>,
    unit_id: &str,
    tr_id: &str,
    x: f64,
    row_z: f64,
) {
    let group = Metadata {
        group: Some(unit_id.to_string()),
        ..Metadata::default()
    };

    // Transverse access road tying the bay to the spine.
    catalog.push(
        EquipmentItem::new(
            format!("{tr_id}_ACCESS_ROAD"),
            EquipmentKind::Road,
            Vec3::new(x, FOUNDATION_HEIGHT + 0.05, row_z),
        )
        .with_dimensions(Dimensions::new(3.0, 45.0, 0.1))
        .with_metadata(Metadata {
            color: Some("#333333".to_string()),
            ..Metadata::default()
        }),
    );

    // Foundation with a 1 m margin all around the transformer footprint.
    catalog.push(
        EquipmentItem::new(
            format!("{tr_id}_FOUNDATION"),
            EquipmentKind::Foundation,
            Vec3::new(x, FOUNDATION_HEIGHT / 2.0, row_z),
        )
        .with_dimensions(Dimensions::new(
            DIM_TRANSFORMER.length + 2.0,
            DIM_TRANSFORMER.width + 2.0,
            FOUNDATION_HEIGHT,
        )),
    );

    let tr_pos = Vec3::new(x, FOUNDATION_HEIGHT + 0.3, row_z);
    catalog.push(
        EquipmentItem::new(tr_id, EquipmentKind::Transformer, tr_pos)
            .with_dimensions(DIM_TRANSFORMER)
            .with_metadata(Metadata {
                power: Some("5MW".to_string()),
                geo: Some(geo_at(x, row_z)),
                ..group.clone()
            }),
    );

    // Open-fronted protective cage around the transformer.
    catalog.push(
        EquipmentItem::new(
            format!("{tr_id}_CAGE"),
            EquipmentKind::TransformerCage,
            Vec3::new(x, FOUNDATION_HEIGHT, row_z),
        )
        .with_dimensions(Dimensions::new(
            DIM_TRANSFORMER.length + 1.8,
            DIM_TRANSFORMER.width + 1.8,
            5.0,
        ))
        .with_metadata(group.clone()),
    );

    // Containers A (north) and B (south), flush with the slab edges.
    let standoff = container_standoff();
    for (suffix, sign) in [("A", -1.0), ("B", 1.0)] {
        let c_z = row_z + sign * standoff;
        let c_pos = Vec3::new(x, FOUNDATION_HEIGHT, c_z);
        catalog.push(
            EquipmentItem::new(format!("{tr_id}_C{suffix}"), EquipmentKind::Container, c_pos)
                .with_rotation(Vec3::yaw(-FRAC_PI_2))
                .with_dimensions(DIM_CONTAINER)
                .with_metadata(Metadata {
                    power: Some(format!("Cont {suffix}")),
                    geo: Some(geo_at(x, c_z)),
                    ..group.clone()
                }),
        );

        // Stair unit against the container's outer face, offset by half the
        // stair footprint, facing the door.
        let stair_z = c_z + sign * (DIM_CONTAINER.length / 2.0 + DIM_STAIRS.length / 2.0);
        let stair_yaw = if sign < 0.0 { 0.0 } else { PI };
        catalog.push(
            EquipmentItem::new(
                format!("{tr_id}_STAIRS_{suffix}"),
                EquipmentKind::Stairs,
                Vec3::new(x, 0.0, stair_z),
            )
            .with_rotation(Vec3::yaw(stair_yaw))
            .with_dimensions(DIM_STAIRS)
            .with_metadata(group.clone()),
        );

        // Cable tray from the container roof down to the transformer head on
        // the matching side.
        route_cable_tray(
            &format!("{tr_id}_CABLE_{suffix}"),
            Vec3::new(c_pos.x, 5.4, c_pos.z),
            Vec3::new(tr_pos.x, 3.2, tr_pos.z + sign * 1.5),
            catalog,
        );
    }
}

/// Row-local circulation: walkway strips with painted lane lines north and
/// south of the slab, and the inter-row link road.
fn generate_row_roads(
    catalog: &mut Vec<EquipmentItem>,
    unit_id: &str,
    row: usize,
    row_z: f64,
    is_service_row: bool,
) {
    let road_y = 0.05 / 2.0 + 0.005;

    // Link road filling the gap between consecutive slabs.
    if row + 1 < ROW_COUNT {
        catalog.push(
            EquipmentItem::new(
                format!("INTER_ROW_ROAD_{row}"),
                EquipmentKind::Road,
                Vec3::new(0.0, FOUNDATION_HEIGHT + 0.05, row_z + 35.0),
            )
            .with_dimensions(Dimensions::new(SLAB_WIDTH_X, 15.0, 0.1))
            .with_metadata(Metadata {
                color: Some("#7f8c8d".to_string()),
                ..Metadata::default()
            }),
        );
    }

    let walkway_width = 6.0;
    let margin = 1.5;
    let z_north = row_z - SLAB_LENGTH_Z / 2.0 - margin - walkway_width / 2.0;
    let z_south = row_z + SLAB_LENGTH_Z / 2.0 + margin + walkway_width / 2.0;
    let spine_half = SPINE_ROAD_WIDTH / 2.0;

    let mut segments: Vec<(f64, f64, &str)> = Vec::with_capacity(2);
    if !is_service_row {
        segments.push((-90.0, -spine_half, "L"));
    }
    segments.push((spine_half, 90.0, "R"));

    for (start, end, suffix) in segments {
        let seg_len = (end - start).abs();
        let center_x = (start + end) / 2.0;

        for (side, z) in [("NORTH", z_north), ("SOUTH", z_south)] {
            let base_id = format!("{unit_id}_WALKWAY_{side}_{suffix}");
            catalog.push(
                EquipmentItem::new(
                    format!("{base_id}_ASPHALT"),
                    EquipmentKind::Road,
                    Vec3::new(center_x, road_y, z),
                )
                .with_dimensions(Dimensions::new(seg_len, walkway_width, 0.05))
                .with_metadata(Metadata {
                    walkable: Some(true),
                    color: Some("#1a1a1a".to_string()),
                    material: Some(sitekit_core::MaterialOverrides {
                        roughness: Some(0.9),
                        metalness: Some(0.1),
                        ..Default::default()
                    }),
                    ..Metadata::default()
                }),
            );

            // Pedestrian lane separators on both edges of the walkway.
            let lane = 1.4;
            for (line, dz) in [("N", lane - walkway_width / 2.0), ("S", walkway_width / 2.0 - lane)]
            {
                catalog.push(
                    EquipmentItem::new(
                        format!("{base_id}_LINE_{line}"),
                        EquipmentKind::Road,
                        Vec3::new(center_x, road_y + 0.01, z + dz),
                    )
                    .with_dimensions(Dimensions::new(seg_len, 0.25, 0.005))
                    .with_metadata(Metadata {
                        color: Some("#ffffff".to_string()),
                        material: Some(sitekit_core::MaterialOverrides {
                            emissive_intensity: Some(0.5),
                            ..Default::default()
                        }),
                        ..Metadata::default()
                    }),
                );
            }
        }
    }
}

/// Service-row west half: three workshops with door aprons, staff parking,
/// an access road serving them, the logistics apron and the fire station.
fn generate_service_area(catalog: &mut Vec<EquipmentItem>, row_z: f64) {
    for (i, x) in [-80.0, -60.0, -40.0].iter().enumerate() {
        catalog.push(
            EquipmentItem::new(
                format!("WORKSHOP_{}", i + 1),
                EquipmentKind::Hangar,
                Vec3::new(*x, FOUNDATION_HEIGHT, row_z),
            )
            .with_dimensions(Dimensions::new(15.0, 20.0, 6.0))
            .with_metadata(Metadata {
                power: Some(format!("Workshop {}", i + 1)),
                color: Some("#2c3e50".to_string()),
                ..Metadata::default()
            }),
        );
        catalog.push(
            EquipmentItem::new(
                format!("WORKSHOP_DOOR_APRON_{}", i + 1),
                EquipmentKind::Road,
                Vec3::new(*x, FOUNDATION_HEIGHT + 0.05, row_z + 10.0),
            )
            .with_dimensions(Dimensions::new(6.0, 5.0, 0.1))
            .with_metadata(Metadata {
                color: Some("#1a1a1a".to_string()),
                ..Metadata::default()
            }),
        );
    }

    catalog.push(
        EquipmentItem::new(
            "SERVICE_PARKING",
            EquipmentKind::Parking,
            Vec3::new(-20.0, 0.0, row_z + 5.0),
        )
        .with_dimensions(Dimensions::new(16.0, 25.0, 0.0))
        .with_metadata(meta_geo(-20.0, row_z + 5.0)),
    );

    catalog.push(
        EquipmentItem::new(
            "SERVICE_ACCESS_ROAD",
            EquipmentKind::Road,
            Vec3::new(-25.0, FOUNDATION_HEIGHT + 0.05, row_z + 15.0),
        )
        .with_dimensions(Dimensions::new(80.0, 6.0, 0.1))
        .with_metadata(Metadata {
            color: Some("#1a1a1a".to_string()),
            ..Metadata::default()
        }),
    );

    // Decorative forklift parked between the workshops and the parking strip.
    catalog.push(
        EquipmentItem::new(
            "DECO_FORKLIFT",
            EquipmentKind::Road,
            Vec3::new(-40.0, 1.0, row_z + 9.0),
        )
        .with_rotation(Vec3::new(0.0, 0.5, 0.0))
        .with_dimensions(Dimensions::new(1.2, 2.5, 1.8))
        .with_metadata(Metadata {
            color: Some("#f1c40f".to_string()),
            ..Metadata::default()
        }),
    );

    catalog.push(
        EquipmentItem::new(
            "LOGISTICS_APRON",
            EquipmentKind::LogisticsZone,
            Vec3::new(-25.0, 0.0, row_z + 30.0),
        )
        .with_dimensions(Dimensions::new(25.0, 15.0, 0.0))
        .with_metadata(meta_geo(-25.0, row_z + 30.0)),
    );

    catalog.push(
        EquipmentItem::new(
            "FIRE_STATION_MAIN",
            EquipmentKind::FireStation,
            Vec3::new(5.0, 0.0, row_z + 30.0),
        )
        .with_dimensions(Dimensions::new(18.0, 14.0, 6.0))
        .with_metadata(meta_geo(5.0, row_z + 30.0)),
    );
}
